use std::fmt::Debug;
use std::io::{Read, Write};
use serde::{Deserialize, Serialize};
use crate::avl_tree::AvlTree;
use crate::error::Error;




/**
 * The key set of a tree, for saving to and restoring from CBOR. The shape is
 * not recorded; restoring re-inserts the keys, which gives a valid tree
 * holding the same keys.
 */
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<K> {
    pub keys: Vec<K>,
}




// ============================================================================
impl<K: Ord + Copy + Debug> Snapshot<K> {

    pub fn of(tree: &AvlTree<K>) -> Self {
        Self { keys: tree.iter().copied().collect() }
    }

    pub fn into_tree(self) -> Result<AvlTree<K>, Error> {
        let mut tree = AvlTree::new();
        for key in self.keys {
            tree.insert(key)?;
        }
        Ok(tree)
    }
}

impl<K: Serialize> Snapshot<K> {
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), Error> {
        ciborium::ser::into_writer(self, writer).map_err(|e| Error::Snapshot(format!("{:?}", e)))
    }
}

impl<K: for<'de> Deserialize<'de>> Snapshot<K> {
    pub fn read_from<R: Read>(reader: R) -> Result<Self, Error> {
        ciborium::de::from_reader(reader).map_err(|e| Error::Snapshot(format!("{:?}", e)))
    }
}

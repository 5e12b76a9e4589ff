use std::fmt::Debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;
use log::{debug, info};
use crate::avl_node::Insertion;
use crate::avl_tree::AvlTree;
use crate::error::Error;




/**
 * Counts of what happened during a bulk load.
 */
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub inserted: usize,
    pub duplicates: usize,
}




/**
 * Read whitespace-separated keys from a stream, in input order. A line may
 * hold any number of keys; blank lines are skipped. A token that does not
 * parse as a key is an error naming its (1-based) line.
 */
pub fn read_keys<K: FromStr, R: BufRead>(reader: R) -> Result<Vec<K>, Error> {
    let mut keys = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        for token in line?.split_whitespace() {
            match token.parse() {
                Ok(key) => keys.push(key),
                Err(_) => return Err(Error::Parse { line: index + 1, token: token.to_string() }),
            }
        }
    }
    Ok(keys)
}




/**
 * Read keys from the text file at the given path.
 */
pub fn read_file<K: FromStr, P: AsRef<Path>>(path: P) -> Result<Vec<K>, Error> {
    let file = File::open(path.as_ref())?;
    let keys = read_keys(BufReader::new(file))?;
    info!("read {} keys from {}", keys.len(), path.as_ref().display());
    Ok(keys)
}




/**
 * Insert each key in order, calling `after_each` with the tree, the key, and
 * the outcome once the insertion is complete. Stops at the first error.
 */
pub fn insert_all<K, I, F>(tree: &mut AvlTree<K>, keys: I, mut after_each: F) -> Result<LoadSummary, Error>
where
    K: Ord + Copy + Debug,
    I: IntoIterator<Item = K>,
    F: FnMut(&AvlTree<K>, K, Insertion),
{
    let mut summary = LoadSummary::default();

    for key in keys {
        let outcome = tree.insert(key)?;
        match outcome {
            Insertion::Inserted => summary.inserted += 1,
            Insertion::Duplicate => summary.duplicates += 1,
        }
        debug!("{:?}: {:?}", key, outcome);
        after_each(tree, key, outcome);
    }
    info!("inserted {} keys, skipped {} duplicates", summary.inserted, summary.duplicates);
    Ok(summary)
}

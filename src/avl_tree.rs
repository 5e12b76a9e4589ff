use std::fmt::Debug;
use log::info;
use crate::avl_node::{Arena, Insertion, Iter, Levels, NodeId};
use crate::error::Error;

/**
 * An ordered set of keys stored in a self-balancing (AVL) binary search tree.
 * After every insertion, the two child sub-trees of any node differ in height
 * by at most one, so search and insertion are O(log n).
 */
#[derive(Clone, Debug)]
pub struct AvlTree<K> {
    arena: Arena<K>,
    root: Option<NodeId>,
}

// ============================================================================
impl<K: Ord + Copy> AvlTree<K> {
    pub fn new() -> Self {
        Self { arena: Arena::new(), root: None }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// The height of the root node, or -1 for an empty tree.
    pub fn height(&self) -> i32 {
        self.arena.height_of(self.root)
    }

    pub fn root(&self) -> Option<NodeRef<'_, K>> {
        self.node_ref(self.root)
    }

    pub fn search(&self, key: &K) -> Option<NodeRef<'_, K>> {
        self.node_ref(self.arena.search(self.root, key))
    }

    pub fn contains(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Keys in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(&self.arena, self.root)
    }

    /// Node positions and heights, top to bottom and left to right.
    pub fn levels(&self) -> Levels<'_, K> {
        Levels::new(&self.arena, self.root)
    }

    /**
     * Tear down the tree, releasing every node exactly once, children before
     * their parent. Returns the keys in the order they were released.
     */
    pub fn release(self) -> Vec<K> {
        let order = self.arena.release(self.root);
        info!("released {} nodes", order.len());
        order
    }

    fn node_ref(&self, id: Option<NodeId>) -> Option<NodeRef<'_, K>> {
        id.map(|id| NodeRef { arena: &self.arena, id })
    }
}

impl<K: Ord + Copy + Debug> AvlTree<K> {
    /**
     * Insert a key, rebalancing the path back to the root. Inserting a key
     * that is already present is not an error, and leaves the tree as it was.
     * If a node cannot be allocated, the tree is also left as it was.
     */
    pub fn insert(&mut self, key: K) -> Result<Insertion, Error> {
        let (root, outcome) = self.arena.insert(self.root, key)?;
        self.root = Some(root);
        Ok(outcome)
    }
}

impl<K: Ord + Copy> Default for AvlTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K: Ord + Copy> IntoIterator for &'a AvlTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/**
 * A read-only handle to one node of a tree.
 */
#[derive(Clone, Copy)]
pub struct NodeRef<'a, K> {
    arena: &'a Arena<K>,
    id: NodeId,
}

// ============================================================================
impl<'a, K: Ord + Copy> NodeRef<'a, K> {
    pub fn key(&self) -> K {
        self.arena.node(self.id).key
    }

    /// The height of the sub-tree rooted here; 0 for a leaf.
    pub fn height(&self) -> i32 {
        self.arena.node(self.id).height
    }

    /// The height of the right sub-tree minus that of the left.
    pub fn balance(&self) -> i32 {
        self.arena.balance_of(self.id)
    }

    pub fn left(&self) -> Option<NodeRef<'a, K>> {
        self.arena.node(self.id).l.map(|id| NodeRef { arena: self.arena, id })
    }

    pub fn right(&self) -> Option<NodeRef<'a, K>> {
        self.arena.node(self.id).r.map(|id| NodeRef { arena: self.arena, id })
    }
}

impl<'a, K: Ord + Copy + Debug> Debug for NodeRef<'a, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", &self.key())
            .field("height", &self.height())
            .finish()
    }
}

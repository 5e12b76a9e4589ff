use std::cmp::Ordering::{Less, Greater, Equal};
use std::collections::VecDeque;
use std::fmt::Debug;
use log::debug;
use crate::error::Error;




/**
 * Index of a node within its arena.
 */
pub(crate) type NodeId = usize;




/**
 * The outcome of a successful insertion. A duplicate key leaves the tree
 * untouched.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Insertion {
    Inserted,
    Duplicate,
}




/**
 * A node in an AVL tree. The height of a leaf is 0, and an absent child
 * counts as -1.
 */
#[derive(Clone, Debug)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) height: i32,
    pub(crate) l: Option<NodeId>,
    pub(crate) r: Option<NodeId>,
}




/**
 * Owner of every node in a tree. Nodes are never removed, so a node's index
 * is stable for the lifetime of the arena. Each node is the child of at most
 * one other node.
 */
#[derive(Clone, Debug)]
pub(crate) struct Arena<K> {
    nodes: Vec<Node<K>>,
    #[cfg(test)]
    limit: Option<usize>,
}




// ============================================================================
impl<K: Ord + Copy> Arena<K> {




    pub(crate) fn new() -> Self {
        Self {
            nodes: Vec::new(),
            #[cfg(test)]
            limit: None,
        }
    }




    /**
     * Make every allocation past the given number of nodes fail, as if the
     * system were out of memory. This function is for testing purposes.
     */
    #[cfg(test)]
    pub(crate) fn set_limit(&mut self, limit: usize) {
        self.limit = Some(limit)
    }




    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }




    pub(crate) fn node(&self, id: NodeId) -> &Node<K> {
        &self.nodes[id]
    }




    /**
     * Create a childless node with the given key. Reserving space in the
     * arena is fallible, so running out of memory surfaces as an error
     * rather than aborting the process.
     */
    fn allocate(&mut self, key: K) -> Result<NodeId, Error> {
        #[cfg(test)]
        {
            if self.limit.map_or(false, |limit| self.nodes.len() >= limit) {
                Vec::<Node<K>>::new().try_reserve(usize::MAX)?;
            }
        }
        self.nodes.try_reserve(1)?;
        self.nodes.push(Node { key, height: 0, l: None, r: None });
        Ok(self.nodes.len() - 1)
    }




    /**
     * Return the cached height of a maybe-node, -1 if absent.
     */
    pub(crate) fn height_of(&self, node: Option<NodeId>) -> i32 {
        node.map_or(-1, |n| self.nodes[n].height)
    }




    /**
     * Reset a node's cached height from the cached heights of its children.
     * Must be called whenever the node's children are re-linked.
     */
    pub(crate) fn recompute_height(&mut self, n: NodeId) {
        let node = &self.nodes[n];
        let height = 1 + self.height_of(node.l).max(self.height_of(node.r));
        self.nodes[n].height = height;
    }




    /**
     * Return the height of the right subtree minus that of the left.
     */
    pub(crate) fn balance_of(&self, n: NodeId) -> i32 {
        let node = &self.nodes[n];
        self.height_of(node.r) - self.height_of(node.l)
    }




    /**
     * Return the node in this sub-tree holding the given key, if any.
     */
    pub(crate) fn search(&self, node: Option<NodeId>, key: &K) -> Option<NodeId> {
        let n = node?;
        match key.cmp(&self.nodes[n].key) {
            Less    => self.search(self.nodes[n].l, key),
            Greater => self.search(self.nodes[n].r, key),
            Equal   => Some(n),
        }
    }




    /**
     * Rotate the sub-tree rooted at `p` to the left, with its right child `q`
     * as the pivot. `q`'s old left child becomes `p`'s right child. Returns
     * the new sub-tree root, which the caller must store in the parent slot.
     */
    pub(crate) fn rotate_left(&mut self, p: NodeId) -> NodeId {
        let q = match self.nodes[p].r {
            Some(q) => q,
            None => {
                debug_assert!(false, "left rotation without a right child");
                return p;
            }
        };
        self.nodes[p].r = self.nodes[q].l;
        self.nodes[q].l = Some(p);
        self.recompute_height(p);
        self.recompute_height(q);
        q
    }




    /**
     * Mirror image of `rotate_left`.
     */
    pub(crate) fn rotate_right(&mut self, p: NodeId) -> NodeId {
        let q = match self.nodes[p].l {
            Some(q) => q,
            None => {
                debug_assert!(false, "right rotation without a left child");
                return p;
            }
        };
        self.nodes[p].l = self.nodes[q].r;
        self.nodes[q].r = Some(p);
        self.recompute_height(p);
        self.recompute_height(q);
        q
    }




    /**
     * Collect the keys of this sub-tree in post-order (children before
     * parent), the order in which the nodes are released.
     */
    fn post_order(&self, node: Option<NodeId>, order: &mut Vec<K>) {
        if let Some(n) = node {
            self.post_order(self.nodes[n].l, order);
            self.post_order(self.nodes[n].r, order);
            order.push(self.nodes[n].key);
        }
    }




    /**
     * Consume the arena, visiting every node reachable from `root` exactly
     * once in post-order. Returns the keys in the order they were visited.
     */
    pub(crate) fn release(self, root: Option<NodeId>) -> Vec<K> {
        let mut order = Vec::with_capacity(self.nodes.len());
        self.post_order(root, &mut order);
        order
    }




    /**
     * Panic unless a node and its entire subtree is properly ordered. This
     * function is for testing purposes.
     */
    #[cfg(test)]
    pub(crate) fn validate_order(&self, node: Option<NodeId>, lower: Option<K>, upper: Option<K>) {
        if let Some(n) = node {
            let key = self.nodes[n].key;
            if lower.map_or(false, |lower| key <= lower) || upper.map_or(false, |upper| key >= upper) {
                panic!("unordered node")
            }
            self.validate_order(self.nodes[n].l, lower, Some(key));
            self.validate_order(self.nodes[n].r, Some(key), upper);
        }
    }




    /**
     * Panic unless every node in the subtree caches its true height and is
     * balanced. Returns the height of the subtree. This function is for
     * testing purposes.
     */
    #[cfg(test)]
    pub(crate) fn validate_height_and_balance(&self, node: Option<NodeId>) -> i32 {
        match node {
            None => -1,
            Some(n) => {
                let hl = self.validate_height_and_balance(self.nodes[n].l);
                let hr = self.validate_height_and_balance(self.nodes[n].r);
                if self.nodes[n].height != 1 + hl.max(hr) {
                    panic!("stored height out of sync with subtree");
                }
                if (hr - hl).abs() > 1 {
                    panic!("unbalanced node")
                }
                self.nodes[n].height
            }
        }
    }
}




// ============================================================================
impl<K: Ord + Copy + Debug> Arena<K> {




    /**
     * Insert a node with the given key into the sub-tree rooted at `node`.
     * Returns the root of the sub-tree after any rebalancing, whose cached
     * height is the new height of the sub-tree. On error, no link in the
     * tree has been changed.
     */
    pub(crate) fn insert(&mut self, node: Option<NodeId>, key: K) -> Result<(NodeId, Insertion), Error> {
        let n = match node {
            Some(n) => n,
            None => return Ok((self.allocate(key)?, Insertion::Inserted)),
        };

        let outcome = match key.cmp(&self.nodes[n].key) {
            Greater => {
                let r = self.nodes[n].r;
                let (r, outcome) = self.insert(r, key)?;
                self.nodes[n].r = Some(r);
                self.raise_height(n, r);
                outcome
            }
            Less => {
                let l = self.nodes[n].l;
                let (l, outcome) = self.insert(l, key)?;
                self.nodes[n].l = Some(l);
                self.raise_height(n, l);
                outcome
            }
            Equal => {
                debug!("key {:?} already exists", key);
                Insertion::Duplicate
            }
        };
        Ok((self.rebalance(n), outcome))
    }




    /**
     * Insertion can only grow a child sub-tree, so the parent's height is the
     * larger of its old height and one above the child's.
     */
    fn raise_height(&mut self, n: NodeId, child: NodeId) {
        let h = self.nodes[child].height;
        self.nodes[n].height = (h + 1).max(self.nodes[n].height);
    }




    /**
     * Restore the balance of a node whose children differ in height by at
     * most two. Returns the (possibly new) sub-tree root. A node that is
     * already balanced is returned unchanged.
     */
    fn rebalance(&mut self, p: NodeId) -> NodeId {
        let balance = self.balance_of(p);

        if balance > 1 {
            debug!("node {:?} is right-heavy", self.nodes[p].key);
            self.rebalance_right_heavy(p)
        } else if balance < -1 {
            debug!("node {:?} is left-heavy", self.nodes[p].key);
            self.rebalance_left_heavy(p)
        } else {
            p
        }
    }




    /**
     * The pivot is the right child. A pivot that is itself left-heavy is
     * first rotated right, making this a right-left double rotation.
     * Otherwise (including a pivot balance of 0) a single left rotation.
     */
    fn rebalance_right_heavy(&mut self, p: NodeId) -> NodeId {
        if let Some(q) = self.nodes[p].r {
            if self.balance_of(q) < 0 {
                debug!("right-left rotation at {:?}", self.nodes[p].key);
                let r = self.rotate_right(q);
                self.nodes[p].r = Some(r);
            } else {
                debug!("left rotation at {:?}", self.nodes[p].key);
            }
        }
        self.rotate_left(p)
    }




    /**
     * Mirror image of `rebalance_right_heavy`.
     */
    fn rebalance_left_heavy(&mut self, p: NodeId) -> NodeId {
        if let Some(q) = self.nodes[p].l {
            if self.balance_of(q) > 0 {
                debug!("left-right rotation at {:?}", self.nodes[p].key);
                let r = self.rotate_left(q);
                self.nodes[p].l = Some(r);
            } else {
                debug!("right rotation at {:?}", self.nodes[p].key);
            }
        }
        self.rotate_right(p)
    }
}




/**
 * A node's place in the tree, as seen by a level-order traversal. `position`
 * is the node's index among the `2^depth` slots at its depth, counting from
 * the left, whether or not the other slots are occupied.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeView<K> {
    pub key: K,
    pub depth: usize,
    pub position: usize,
    pub height: i32,
}




/**
 * By-reference iterator that traverses a whole tree in-order, yielding keys
 * in ascending order.
 */
pub struct Iter<'a, K> {
    arena: &'a Arena<K>,
    stack: Vec<NodeId>,
}

impl<'a, K> Iter<'a, K> {
    pub(crate) fn new(arena: &'a Arena<K>, root: Option<NodeId>) -> Self {
        let mut iter = Self { arena, stack: Vec::new() };
        iter.push_lmost_path(root);
        iter
    }

    fn push_lmost_path(&mut self, mut node: Option<NodeId>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = self.arena.nodes[n].l;
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {

        /*
         * Pop the last node on the stack (A). If A has a right child then
         * push the path from it to its minimum node. Yield the key of A.
         */
        let a = self.stack.pop()?;
        let arena = self.arena;
        self.push_lmost_path(arena.nodes[a].r);
        Some(&arena.nodes[a].key)
    }
}




/**
 * By-reference iterator that traverses a whole tree level by level, top to
 * bottom and left to right.
 */
pub struct Levels<'a, K> {
    arena: &'a Arena<K>,
    queue: VecDeque<(NodeId, usize, usize)>,
}

impl<'a, K> Levels<'a, K> {
    pub(crate) fn new(arena: &'a Arena<K>, root: Option<NodeId>) -> Self {
        Self { arena, queue: root.map(|n| (n, 0, 0)).into_iter().collect() }
    }
}

impl<'a, K: Copy> Iterator for Levels<'a, K> {
    type Item = NodeView<K>;

    fn next(&mut self) -> Option<Self::Item> {
        let (n, depth, position) = self.queue.pop_front()?;
        let node = &self.arena.nodes[n];

        if let Some(l) = node.l {
            self.queue.push_back((l, depth + 1, 2 * position))
        }
        if let Some(r) = node.r {
            self.queue.push_back((r, depth + 1, 2 * position + 1))
        }
        Some(NodeView { key: node.key, depth, position, height: node.height })
    }
}




// ============================================================================
#[cfg(test)]
mod test {

    use crate::error::Error;
    use super::{Arena, Insertion, Iter, Levels, NodeId};

    /**
     * A simple deterministic linear congruential generator:
     *
     * https://en.wikipedia.org/wiki/Linear_congruential_generator
     */
    fn stupid_random_keys(len: usize, mut seed: i64) -> Vec<i64> {
        let mut values = Vec::new();
        let a = 1103515245;
        let c = 12345;
        let m = 1 << 31;
        for _ in 0..len {
            seed = (a * seed + c) % m;
            values.push(seed % 1000 - 500)
        }
        values
    }

    fn build(keys: &[i64]) -> (Arena<i64>, Option<NodeId>) {
        let mut arena = Arena::new();
        let mut root = None;
        for &key in keys {
            root = Some(arena.insert(root, key).unwrap().0);
        }
        (arena, root)
    }

    fn key_of(arena: &Arena<i64>, node: Option<NodeId>) -> Option<i64> {
        node.map(|n| arena.node(n).key)
    }

    /**
     * Link up a right-heavy node by hand: p has no left child, and its right
     * child q has two leaf children, so the pivot balance is 0. Insertion can
     * never produce this shape.
     */
    fn right_heavy_with_level_pivot() -> (Arena<i64>, NodeId) {
        let mut arena = Arena::new();
        let p = arena.allocate(1).unwrap();
        let q = arena.allocate(3).unwrap();
        let a = arena.allocate(2).unwrap();
        let b = arena.allocate(4).unwrap();
        arena.nodes[q].l = Some(a);
        arena.nodes[q].r = Some(b);
        arena.recompute_height(q);
        arena.nodes[p].r = Some(q);
        arena.recompute_height(p);
        (arena, p)
    }

    /**
     * Mirror image of `right_heavy_with_level_pivot`: p has no right child,
     * and its left child q has two leaf children.
     */
    fn left_heavy_with_level_pivot() -> (Arena<i64>, NodeId) {
        let mut arena = Arena::new();
        let p = arena.allocate(4).unwrap();
        let q = arena.allocate(2).unwrap();
        let a = arena.allocate(1).unwrap();
        let b = arena.allocate(3).unwrap();
        arena.nodes[q].l = Some(a);
        arena.nodes[q].r = Some(b);
        arena.recompute_height(q);
        arena.nodes[p].l = Some(q);
        arena.recompute_height(p);
        (arena, p)
    }

    #[test]
    fn heights_of_absent_and_leaf_nodes() {
        let (arena, root) = build(&[7]);
        assert_eq!(arena.height_of(None), -1);
        assert_eq!(arena.height_of(root), 0);
        assert_eq!(arena.balance_of(root.unwrap()), 0);
    }

    #[test]
    fn single_left_rotation_relinks_three_nodes() {
        let (arena, root) = build(&[10, 20, 30]);
        let root = root.unwrap();
        assert_eq!(arena.node(root).key, 20);
        assert_eq!(arena.node(root).height, 1);
        assert_eq!(key_of(&arena, arena.node(root).l), Some(10));
        assert_eq!(key_of(&arena, arena.node(root).r), Some(30));
    }

    #[test]
    fn right_left_double_rotation_relinks_three_nodes() {
        let (arena, root) = build(&[10, 30, 20]);
        let root = root.unwrap();
        assert_eq!(arena.node(root).key, 20);
        assert_eq!(key_of(&arena, arena.node(root).l), Some(10));
        assert_eq!(key_of(&arena, arena.node(root).r), Some(30));
    }

    #[test]
    fn left_right_double_rotation_relinks_three_nodes() {
        let (arena, root) = build(&[30, 10, 20]);
        let root = root.unwrap();
        assert_eq!(arena.node(root).key, 20);
        assert_eq!(key_of(&arena, arena.node(root).l), Some(10));
        assert_eq!(key_of(&arena, arena.node(root).r), Some(30));
    }

    #[test]
    fn level_pivot_takes_the_single_rotation() {
        let (mut arena, p) = right_heavy_with_level_pivot();
        assert_eq!(arena.balance_of(p), 2);

        let root = arena.rebalance(p);
        assert_eq!(arena.node(root).key, 3);
        assert_eq!(key_of(&arena, arena.node(root).l), Some(1));
        assert_eq!(key_of(&arena, arena.node(root).r), Some(4));
        assert_eq!(key_of(&arena, arena.node(p).r), Some(2));
        assert_eq!(arena.node(p).height, 1);
        assert_eq!(arena.node(root).height, 2);
        arena.validate_order(Some(root), None, None);
    }

    #[test]
    fn left_heavy_level_pivot_takes_the_single_rotation() {
        let (mut arena, p) = left_heavy_with_level_pivot();
        assert_eq!(arena.balance_of(p), -2);

        let root = arena.rebalance(p);
        assert_eq!(arena.node(root).key, 2);
        assert_eq!(key_of(&arena, arena.node(root).l), Some(1));
        assert_eq!(key_of(&arena, arena.node(root).r), Some(4));
        assert_eq!(key_of(&arena, arena.node(p).l), Some(3));
        assert_eq!(arena.node(p).height, 1);
        assert_eq!(arena.node(root).height, 2);
        arena.validate_order(Some(root), None, None);
        arena.validate_height_and_balance(Some(root));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "left rotation without a right child")]
    fn left_rotation_without_pivot_panics() {
        let (mut arena, root) = build(&[5]);
        arena.rotate_left(root.unwrap());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "right rotation without a left child")]
    fn right_rotation_without_pivot_panics() {
        let (mut arena, root) = build(&[5]);
        arena.rotate_right(root.unwrap());
    }

    #[test]
    fn failed_allocation_leaves_every_link_alone() {
        let (mut arena, root) = build(&[4, 2, 6, 1, 3]);
        let before: Vec<_> = Levels::new(&arena, root).collect();
        arena.set_limit(5);

        assert!(matches!(arena.insert(root, 0), Err(Error::AllocationFailed(_))));
        assert!(matches!(arena.insert(root, 7), Err(Error::AllocationFailed(_))));
        assert_eq!(arena.len(), 5);
        assert_eq!(Levels::new(&arena, root).collect::<Vec<_>>(), before);
        arena.validate_height_and_balance(root);

        let (new_root, outcome) = arena.insert(root, 3).unwrap();
        assert_eq!(outcome, Insertion::Duplicate);
        assert_eq!(Some(new_root), root);
    }

    #[test]
    fn balanced_node_is_not_rotated() {
        let (mut arena, root) = build(&[2, 1]);
        let root = root.unwrap();
        assert_eq!(arena.rebalance(root), root);

        let (root, outcome) = arena.insert(Some(root), 3).unwrap();
        assert_eq!(outcome, Insertion::Inserted);
        assert_eq!(arena.node(root).key, 2);
        assert_eq!(arena.node(root).height, 1);
    }

    #[test]
    fn duplicate_insert_reports_and_leaves_links_alone() {
        let (mut arena, root) = build(&[4, 2, 6, 1]);
        let before: Vec<_> = Levels::new(&arena, root).collect();

        let (new_root, outcome) = arena.insert(root, 2).unwrap();
        assert_eq!(outcome, Insertion::Duplicate);
        assert_eq!(Some(new_root), root);
        assert_eq!(arena.len(), 4);
        assert_eq!(Levels::new(&arena, root).collect::<Vec<_>>(), before);
    }

    #[test]
    fn search_finds_only_inserted_keys() {
        let keys = stupid_random_keys(500, 666);
        let (arena, root) = build(&keys);
        for key in &keys {
            let n = arena.search(root, key).unwrap();
            assert_eq!(arena.node(n).key, *key);
        }
        for key in [-1000, 1000, i64::MIN, i64::MAX].iter() {
            assert_eq!(arena.search(root, key), None);
        }
    }

    #[test]
    fn invariants_hold_for_random_incremental_tree() {
        for seed in 0..20 {
            let (arena, root) = build(&stupid_random_keys(1000, seed));
            arena.validate_order(root, None, None);
            arena.validate_height_and_balance(root);
        }
    }

    #[test]
    fn invariants_hold_for_sorted_and_reversed_input() {
        let ascending: Vec<i64> = (0..1000).collect();
        let descending: Vec<i64> = (0..1000).rev().collect();

        for keys in [ascending, descending].iter() {
            let (arena, root) = build(keys);
            arena.validate_order(root, None, None);
            let height = arena.validate_height_and_balance(root);
            assert!((9..=10).contains(&height));
        }
    }

    #[test]
    fn in_order_iteration_is_sorted() {
        let mut keys = stupid_random_keys(300, 12345);
        let (arena, root) = build(&keys);
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(Iter::new(&arena, root).copied().collect::<Vec<_>>(), keys);
    }

    #[test]
    fn level_order_reports_depth_and_position() {
        let (arena, root) = build(&[1, 2, 3, 4, 5, 6, 7]);
        let views: Vec<_> = Levels::new(&arena, root).map(|v| (v.key, v.depth, v.position, v.height)).collect();
        assert_eq!(views, vec![
            (4, 0, 0, 2),
            (2, 1, 0, 1),
            (6, 1, 1, 1),
            (1, 2, 0, 0),
            (3, 2, 1, 0),
            (5, 2, 2, 0),
            (7, 2, 3, 0),
        ]);
    }

    #[test]
    fn release_visits_children_before_parents() {
        let (arena, root) = build(&[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(arena.release(root), vec![1, 3, 2, 5, 7, 6, 4]);
    }
}

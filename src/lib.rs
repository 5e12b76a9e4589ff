//! An ordered set of integer keys kept in a self-balancing (AVL) binary search
//! tree. Every insertion restores the AVL balance condition on the way back
//! up to the root: for each node, the heights of its two child sub-trees
//! differ by at most one. Heights are cached on the nodes, and an unbalanced
//! node is repaired with a single or double rotation.
//!
//! Around the tree sit a few thin collaborators: loading keys from text,
//! drawing the tree as ASCII art, an interactive menu, and CBOR snapshots of
//! the key set.

pub mod avl_node;
pub mod avl_tree;
pub mod error;
pub mod load;
pub mod menu;
pub mod render;
pub mod snapshot;

pub use avl_node::{Insertion, NodeView};
pub use avl_tree::{AvlTree, NodeRef};
pub use error::Error;

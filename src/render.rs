//! ASCII-art drawing of a tree, built from its level-order traversal.

use std::fmt::Display;
use crate::avl_tree::AvlTree;




/**
 * The tallest tree drawn without being asked for explicitly. A drawing's
 * width doubles with each level, so taller trees make lines too long to read.
 */
pub const DEFAULT_MAX_HEIGHT: i32 = 6;




/**
 * Return true if the tree is no taller than `max_height`, and so is worth
 * drawing unprompted.
 */
pub fn fits<K: Ord + Copy>(tree: &AvlTree<K>, max_height: i32) -> bool {
    tree.height() <= max_height
}




/**
 * Draw the tree as text: one row of keys per depth, with a row of `/` and `\`
 * connectors between consecutive depths. Every slot on the bottom row is one
 * label wide plus a space, and each parent is centred over the slots of its
 * sub-tree. Labels are right-aligned to the widest key. An empty tree draws
 * as an empty string.
 */
pub fn render<K: Ord + Copy + Display>(tree: &AvlTree<K>) -> String {
    if tree.is_empty() {
        return String::new();
    }
    let height = tree.height() as usize;
    let views: Vec<_> = tree.levels().map(|v| (v, v.key.to_string())).collect();
    let width = views.iter().map(|(_, label)| label.chars().count()).max().unwrap_or(1);
    let slot = width + 1;

    let start = |depth: usize, position: usize| {
        let span = 1 << (height - depth);
        let first = position * span;
        let last = first + span - 1;
        (first + last) * slot / 2
    };
    let mut rows = vec![vec![' '; (1 << height) * slot]; 2 * height + 1];

    for (view, label) in &views {
        let col = start(view.depth, view.position) + width - label.chars().count();

        for (i, c) in label.chars().enumerate() {
            rows[2 * view.depth][col + i] = c;
        }
        if view.depth > 0 {
            let parent = start(view.depth - 1, view.position / 2) + width / 2;
            let child = start(view.depth, view.position) + width / 2;
            let connector = if view.position % 2 == 0 { '/' } else { '\\' };
            rows[2 * view.depth - 1][(parent + child) / 2] = connector;
        }
    }

    let mut text = String::new();
    for row in rows {
        let line: String = row.into_iter().collect();
        text.push_str(line.trim_end());
        text.push('\n');
    }
    text
}




// ============================================================================
#[cfg(test)]
mod test {

    use crate::avl_tree::AvlTree;
    use super::{fits, render, DEFAULT_MAX_HEIGHT};

    fn tree_of(keys: &[i64]) -> AvlTree<i64> {
        let mut tree = AvlTree::new();
        for &key in keys {
            tree.insert(key).unwrap();
        }
        tree
    }

    #[test]
    fn tall_trees_do_not_fit_by_default() {
        let keys: Vec<i64> = (0..127).collect();
        assert!(fits(&tree_of(&keys), DEFAULT_MAX_HEIGHT));
        assert!(fits(&AvlTree::<i64>::new(), DEFAULT_MAX_HEIGHT));

        let keys: Vec<i64> = (0..128).collect();
        let tree = tree_of(&keys);
        assert_eq!(tree.height(), 7);
        assert!(!fits(&tree, DEFAULT_MAX_HEIGHT));
        assert!(fits(&tree, 7));
    }

    #[test]
    fn empty_tree_draws_nothing() {
        assert_eq!(render(&AvlTree::<i64>::new()), "");
    }

    #[test]
    fn single_node_draws_its_key() {
        assert_eq!(render(&tree_of(&[42])), "42\n");
    }

    #[test]
    fn three_nodes_draw_with_connectors() {
        assert_eq!(render(&tree_of(&[10, 20, 30])), " 20\n / \\\n10 30\n");
    }

    #[test]
    fn perfect_tree_draws_every_level() {
        let expected = [
            "   4",
            "  / \\",
            " 2   6",
            "/\\  /\\",
            "1 3 5 7",
        ];
        let drawn = render(&tree_of(&[1, 2, 3, 4, 5, 6, 7]));
        assert_eq!(drawn.lines().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn labels_are_padded_to_the_widest_key() {
        let drawn = render(&tree_of(&[-100, 5, 7]));
        let lines: Vec<_> = drawn.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].trim(), "5");
        assert!(lines[2].starts_with("-100"));
        assert!(lines[2].ends_with("   7"));
    }

    #[test]
    fn missing_children_leave_gaps() {
        let drawn = render(&tree_of(&[2, 1, 3, 4]));
        let lines: Vec<_> = drawn.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[4].trim(), "4");
        assert!(!lines[3].contains('/'));
    }
}

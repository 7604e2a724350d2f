//! Read-only statistics over a finished search tree.

use std::fmt::Write;

use crate::board::Move;
use crate::constants::{INFINITY, NEG_INFINITY};
use crate::search::SearchNode;

/// Nodes in the tree, pruned placeholders included.
pub fn node_count(node: &SearchNode) -> usize {
    1 + node.children.iter().map(node_count).sum::<usize>()
}

/// Pruned placeholders in the tree.
pub fn pruned_count(node: &SearchNode) -> usize {
    usize::from(node.is_pruned) + node.children.iter().map(pruned_count).sum::<usize>()
}

/// Share of nodes that are pruned placeholders, as a percentage.
pub fn efficiency(node: &SearchNode) -> f64 {
    percentage(pruned_count(node), node_count(node))
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Aggregate figures for display next to a tree.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TreeSummary {
    pub nodes: usize,
    pub pruned: usize,
    /// Explored nodes without children.
    pub leaves: usize,
    pub max_depth: u32,
    pub efficiency: f64,
}

impl TreeSummary {
    /// Summarize a tree; an absent tree yields all zeros.
    pub fn of(root: Option<&SearchNode>) -> Self {
        let Some(root) = root else {
            return Self::default();
        };

        let mut summary = Self::default();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            summary.nodes += 1;
            if node.is_pruned {
                summary.pruned += 1;
            } else if node.is_leaf() {
                summary.leaves += 1;
            }
            summary.max_depth = summary.max_depth.max(node.depth);
            stack.extend(node.children.iter());
        }
        summary.efficiency = percentage(summary.pruned, summary.nodes);
        summary
    }
}

/// Moves along the chain of best children, starting below the root.
pub fn principal_variation(root: &SearchNode) -> Vec<Move> {
    let mut line = Vec::new();
    let mut node = root;
    while let Some(best) = node.best_child() {
        if let Some(mv) = best.mv {
            line.push(mv);
        }
        node = best;
    }
    line
}

fn bound(v: i32) -> String {
    match v {
        INFINITY => "+inf".to_string(),
        NEG_INFINITY => "-inf".to_string(),
        v => v.to_string(),
    }
}

/// Indented text dump of the tree down to `max_depth` plies.
pub fn render_tree(root: &SearchNode, max_depth: u32) -> String {
    let mut out = String::new();
    render_node(root, max_depth, &mut out);
    out
}

fn render_node(node: &SearchNode, max_depth: u32, out: &mut String) {
    let indent = "  ".repeat(node.depth as usize);
    let mv = node.mv.map(|m| format!("({m})")).unwrap_or_else(|| "root".to_string());
    let side = if node.is_maximizing { "max" } else { "min" };

    // Writing to a String cannot fail.
    let _ = if node.is_pruned {
        writeln!(out, "{indent}{} {mv} pruned", node.label())
    } else {
        writeln!(
            out,
            "{indent}{} {mv} {side} score={} a={} b={}{}",
            node.label(),
            node.score,
            bound(node.alpha),
            bound(node.beta),
            if node.is_best_move { " *" } else { "" }
        )
    };

    if node.depth < max_depth {
        for child in &node.children {
            render_node(child, max_depth, out);
        }
    } else if !node.children.is_empty() {
        let _ = writeln!(out, "{indent}  ... {} more", node_count(node) - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::search::search;

    fn leaf(id: usize, pruned: bool) -> SearchNode {
        let mut n = search(&Board::empty(), 0).tree.root;
        n.id = id;
        n.depth = 1;
        n.is_pruned = pruned;
        n
    }

    #[test]
    fn test_counts_on_hand_built_tree() {
        let mut root = search(&Board::empty(), 0).tree.root;
        root.children = vec![leaf(1, false), leaf(2, true), leaf(3, true)];
        assert_eq!(node_count(&root), 4);
        assert_eq!(pruned_count(&root), 2);
        assert_eq!(efficiency(&root), 50.0);
    }

    #[test]
    fn test_single_node_tree() {
        let root = search(&Board::empty(), 0).tree.root;
        assert_eq!(node_count(&root), 1);
        assert_eq!(pruned_count(&root), 0);
        assert_eq!(efficiency(&root), 0.0);
    }

    #[test]
    fn test_summary_of_missing_tree_is_zero() {
        let s = TreeSummary::of(None);
        assert_eq!(s.nodes, 0);
        assert_eq!(s.efficiency, 0.0);
    }

    #[test]
    fn test_summary_agrees_with_counts() {
        let board: Board = "X.../.X../..../....".parse().unwrap();
        let tree = search(&board, 4).tree;
        let s = TreeSummary::of(Some(&tree.root));
        assert_eq!(s.nodes, node_count(&tree.root));
        assert_eq!(s.nodes, tree.node_count);
        assert_eq!(s.pruned, pruned_count(&tree.root));
        assert_eq!(s.max_depth, 4);
        assert!(s.efficiency > 0.0 && s.efficiency <= 100.0);
        assert_eq!(s.efficiency, efficiency(&tree.root));
    }

    #[test]
    fn test_principal_variation_starts_with_best_move() {
        let board: Board = "X.../.X../..../....".parse().unwrap();
        let result = search(&board, 3);
        let pv = principal_variation(&result.tree.root);
        assert_eq!(pv.first().copied(), result.best_move);
        assert_eq!(pv.len(), 3);
    }

    #[test]
    fn test_render_tree_limits_depth() {
        let result = search(&Board::empty(), 2);
        let text = render_tree(&result.tree.root, 1);
        assert!(text.starts_with("node-0 root max score="));
        assert!(text.lines().next().unwrap().ends_with("b=+inf"));
        assert!(text.contains("more"));
        assert!(!text.lines().any(|l| l.starts_with("    node-")));
    }
}

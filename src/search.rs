//! Minimax search with alpha-beta pruning that records its own game tree.
//!
//! Every call to [`search`] builds a fresh [`SearchTree`]: one [`SearchNode`]
//! per position visited, plus a pruned placeholder for each move skipped by a
//! cutoff so a viewer can show which branches were never explored.
//!
//! Node ids come from a [`SearchContext`] owned by that one call. Nothing is
//! shared between calls, so searches for separate games can run side by side.
//!
//! O is the maximizing side (the engine) and X the minimizing side (the human).

use serde::Serialize;
use tracing::debug;

use crate::board::{evaluate, Board, Cell, Move};
use crate::constants::{INFINITY, NEG_INFINITY};

/// One position explored (or skipped) during search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchNode {
    /// Pre-order creation index, unique within one search.
    pub id: usize,
    /// Move that led here from the parent; `None` only at the root.
    #[serde(rename = "move")]
    pub mv: Option<Move>,
    /// Minimax value. Always 0 for pruned placeholders.
    pub score: i32,
    /// Plies from the root.
    pub depth: u32,
    /// Lower bound when this node returned (inherited bound for leaves).
    pub alpha: i32,
    /// Upper bound when this node returned (inherited bound for leaves).
    pub beta: i32,
    /// True when O picks the move at this node.
    pub is_maximizing: bool,
    /// Children in row-major move order.
    pub children: Vec<SearchNode>,
    /// True for the child matching the parent's chosen move.
    pub is_best_move: bool,
    /// True for placeholders standing in for moves skipped by a cutoff.
    pub is_pruned: bool,
}

impl SearchNode {
    fn new(
        id: usize,
        mv: Option<Move>,
        depth: u32,
        alpha: i32,
        beta: i32,
        is_maximizing: bool,
    ) -> Self {
        Self {
            id,
            mv,
            score: 0,
            depth,
            alpha,
            beta,
            is_maximizing,
            children: Vec::new(),
            is_best_move: false,
            is_pruned: false,
        }
    }

    /// Identifier used by tree viewers: `node-<id>` or `pruned-<id>`.
    pub fn label(&self) -> String {
        if self.is_pruned {
            format!("pruned-{}", self.id)
        } else {
            format!("node-{}", self.id)
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The child flagged as the chosen move, if any.
    pub fn best_child(&self) -> Option<&SearchNode> {
        self.children.iter().find(|c| c.is_best_move)
    }
}

/// The annotated tree produced by one top-level search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTree {
    pub root: SearchNode,
    /// Number of ids handed out, i.e. every node including placeholders.
    pub node_count: usize,
    pub max_depth: u32,
}

impl SearchTree {
    /// Serialize the tree for an external viewer.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Output of [`search`].
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub score: i32,
    /// `None` when the root is already terminal or the depth limit is 0.
    pub best_move: Option<Move>,
    pub tree: SearchTree,
}

/// Work-in-progress state of a single search call.
#[derive(Debug, Default)]
pub struct SearchContext {
    next_id: usize,
    max_depth: u32,
}

impl SearchContext {
    pub fn new(max_depth: u32) -> Self {
        Self {
            next_id: 0,
            max_depth,
        }
    }

    #[inline]
    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Ids handed out so far.
    pub fn issued(&self) -> usize {
        self.next_id
    }
}

/// Run a full-window search with O to move.
pub fn search(board: &Board, max_depth: u32) -> SearchResult {
    let mut ctx = SearchContext::new(max_depth);
    let (score, best_move, root) =
        alphabeta(&mut ctx, board, 0, true, NEG_INFINITY, INFINITY, None);

    let tree = SearchTree {
        root,
        node_count: ctx.issued(),
        max_depth,
    };
    debug!(
        max_depth,
        score,
        best_move = ?best_move,
        nodes = tree.node_count,
        "search complete"
    );

    SearchResult {
        score,
        best_move,
        tree,
    }
}

/// Score of a position where the search stops.
///
/// Wins are shifted by depth so that O prefers quicker wins and X's wins
/// found deeper are less negative.
fn leaf_score(board: &Board, winner: Option<Cell>, depth: u32) -> i32 {
    let base = evaluate(board);
    let depth = depth as i32;
    match winner {
        Some(Cell::O) => base - depth,
        Some(Cell::X) => base + depth,
        _ => base,
    }
}

#[inline]
fn is_leaf(board: &Board, winner: Option<Cell>, depth: u32, max_depth: u32) -> bool {
    winner.is_some() || board.is_full() || depth >= max_depth
}

/// Recursive minimax with alpha-beta cutoffs.
///
/// Returns the node's score, the move it chose, and the subtree rooted at it.
fn alphabeta(
    ctx: &mut SearchContext,
    board: &Board,
    depth: u32,
    maximizing: bool,
    mut alpha: i32,
    mut beta: i32,
    incoming: Option<Move>,
) -> (i32, Option<Move>, SearchNode) {
    let mut node = SearchNode::new(ctx.next_id(), incoming, depth, alpha, beta, maximizing);

    let winner = board.winner();
    if is_leaf(board, winner, depth, ctx.max_depth) {
        node.score = leaf_score(board, winner, depth);
        return (node.score, incoming, node);
    }

    let player = if maximizing { Cell::O } else { Cell::X };
    let moves = board.legal_moves();
    let mut best: Option<(i32, Move)> = None;

    for (i, &mv) in moves.iter().enumerate() {
        let next = board.apply_move(mv, player);
        let (score, _, child) =
            alphabeta(ctx, &next, depth + 1, !maximizing, alpha, beta, Some(mv));
        node.children.push(child);

        if maximizing {
            if best.is_none_or(|(s, _)| score > s) {
                best = Some((score, mv));
            }
            alpha = alpha.max(score);
            node.alpha = alpha;
        } else {
            if best.is_none_or(|(s, _)| score < s) {
                best = Some((score, mv));
            }
            beta = beta.min(score);
            node.beta = beta;
        }

        if beta <= alpha {
            for &skipped in &moves[i + 1..] {
                let mut placeholder = SearchNode::new(
                    ctx.next_id(),
                    Some(skipped),
                    depth + 1,
                    alpha,
                    beta,
                    !maximizing,
                );
                placeholder.is_pruned = true;
                node.children.push(placeholder);
            }
            break;
        }
    }

    // A non-terminal board always has at least one legal move.
    let Some((score, best_move)) = best else {
        node.score = leaf_score(board, winner, depth);
        return (node.score, None, node);
    };

    node.score = score;
    if let Some(child) = node
        .children
        .iter_mut()
        .find(|c| !c.is_pruned && c.mv == Some(best_move))
    {
        child.is_best_move = true;
    }

    (score, Some(best_move), node)
}

/// Plain minimax value without cutoffs or tree construction.
///
/// Slow, but a direct statement of the value alpha-beta must reproduce.
pub fn minimax_reference(board: &Board, max_depth: u32) -> i32 {
    fn go(board: &Board, depth: u32, maximizing: bool, max_depth: u32) -> i32 {
        let winner = board.winner();
        if is_leaf(board, winner, depth, max_depth) {
            return leaf_score(board, winner, depth);
        }
        let player = if maximizing { Cell::O } else { Cell::X };
        let scores = board
            .legal_moves()
            .into_iter()
            .map(|mv| go(&board.apply_move(mv, player), depth + 1, !maximizing, max_depth));
        if maximizing {
            scores.max().unwrap_or(NEG_INFINITY)
        } else {
            scores.min().unwrap_or(INFINITY)
        }
    }
    go(board, 0, true, max_depth)
}

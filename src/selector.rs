//! Move selection: the engine's entry point for a game loop.
//!
//! A [`MoveSelector`] resolves a difficulty tier, occasionally substitutes a
//! random legal move for the search result, and keeps the tree of the last
//! search it ran so it can be inspected afterwards.

use tracing::{debug, info};

use crate::board::{Board, Move};
use crate::difficulty::Difficulty;
use crate::search::{search, SearchTree};

/// Source of randomness for mistake injection.
pub trait RandomSource {
    /// Uniform value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;
    /// Uniform index in `0..len`. `len` is never 0.
    fn index(&mut self, len: usize) -> usize;
}

impl RandomSource for fastrand::Rng {
    #[inline]
    fn next_f64(&mut self) -> f64 {
        self.f64()
    }

    #[inline]
    fn index(&mut self, len: usize) -> usize {
        self.usize(..len)
    }
}

/// How a move was chosen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectionKind {
    /// Result of a full search, with the root score.
    Searched { score: i32 },
    /// Random legal move; no search ran.
    Mistake,
}

/// A chosen move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub mv: Move,
    pub kind: SelectionKind,
}

impl Selection {
    pub fn is_mistake(&self) -> bool {
        self.kind == SelectionKind::Mistake
    }
}

/// Picks moves for O and remembers the last search tree.
///
/// Each selector owns its own random source and tree; separate games should
/// use separate selectors.
pub struct MoveSelector<R: RandomSource = fastrand::Rng> {
    rng: R,
    last_tree: Option<SearchTree>,
}

impl Default for MoveSelector<fastrand::Rng> {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSelector<fastrand::Rng> {
    /// Selector seeded from the thread-local generator.
    pub fn new() -> Self {
        Self::with_rng(fastrand::Rng::new())
    }

    /// Selector with a reproducible mistake sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(fastrand::Rng::with_seed(seed))
    }
}

impl<R: RandomSource> MoveSelector<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            last_tree: None,
        }
    }

    /// Choose a move for O at the given tier.
    pub fn select_move(&mut self, board: &Board, difficulty: Difficulty) -> Option<Selection> {
        let config = difficulty.config();
        self.select_move_with(board, config.max_depth, config.mistake_probability)
    }

    /// Choose a move for O with explicit search settings.
    ///
    /// Returns `None` only when the board has no legal move. The previous
    /// tree is always dropped: after a mistake there is no tree at all.
    pub fn select_move_with(
        &mut self,
        board: &Board,
        max_depth: u32,
        mistake_probability: f64,
    ) -> Option<Selection> {
        self.last_tree = None;

        let draw = self.rng.next_f64();
        if mistake_probability > 0.0 && draw < mistake_probability {
            let moves = board.legal_moves();
            if !moves.is_empty() {
                let mv = moves[self.rng.index(moves.len())];
                info!(%mv, draw, mistake_probability, "playing a deliberate mistake");
                return Some(Selection {
                    mv,
                    kind: SelectionKind::Mistake,
                });
            }
        }

        let result = search(board, max_depth);
        debug!(nodes = result.tree.node_count, "keeping search tree");
        self.last_tree = Some(result.tree);

        let mv = result.best_move?;
        info!(%mv, score = result.score, max_depth, "selected move");
        Some(Selection {
            mv,
            kind: SelectionKind::Searched {
                score: result.score,
            },
        })
    }

    /// Tree from the most recent call, if that call ran a search.
    pub fn last_search_tree(&self) -> Option<&SearchTree> {
        self.last_tree.as_ref()
    }

    /// Drop the stored tree, e.g. when a new game starts.
    pub fn clear(&mut self) {
        self.last_tree = None;
    }
}

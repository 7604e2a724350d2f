//! tictac4: a move engine for 4x4 tic-tac-toe that shows its work.
//!
//! The engine plays O against a human X. It searches with minimax and
//! alpha-beta pruning, and every search leaves behind an annotated tree of
//! explored and pruned positions that can be inspected or exported.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, evaluation weights, search bounds
//! - [`board`] - Board model, win detection, static evaluation
//! - [`search`] - Alpha-beta search and the annotated search tree
//! - [`difficulty`] - Difficulty tiers (depth, mistake rate, display delay)
//! - [`selector`] - Move selection with optional random mistakes
//! - [`analysis`] - Node counts and pruning efficiency of a tree
//! - [`game`] - Turn order, game results and session statistics
//! - [`protocol`] - Text protocol for playing from a terminal or front end
//! - [`error`] - Error types for parsing and game actions
//!
//! ## Example
//!
//! ```
//! use tictac4::board::{Board, Move};
//! use tictac4::difficulty::Difficulty;
//! use tictac4::selector::MoveSelector;
//! use tictac4::analysis::efficiency;
//!
//! let board: Board = "OOO./XXOX/XOXX/.XXO".parse().unwrap();
//!
//! let mut selector = MoveSelector::with_seed(1);
//! let selection = selector.select_move(&board, Difficulty::Expert).unwrap();
//! assert_eq!(selection.mv, Move::new(0, 3));
//!
//! let tree = selector.last_search_tree().unwrap();
//! println!("pruned {:.1}% of the tree", efficiency(&tree.root));
//! ```

pub mod analysis;
pub mod board;
pub mod constants;
pub mod difficulty;
pub mod error;
pub mod game;
pub mod protocol;
pub mod search;
pub mod selector;

pub use board::{Board, Cell, Move};
pub use difficulty::Difficulty;
pub use search::{SearchNode, SearchResult, SearchTree};
pub use selector::{MoveSelector, Selection, SelectionKind};

//! Error types for the text boundary of the engine.
//!
//! The search itself never fails: boards handed to it are assumed valid.
//! These errors only surface when boards, moves, or tiers are parsed from
//! text, or when a game session is driven out of order.

use thiserror::Error;

use crate::board::{Cell, Move};

/// Failure to parse a board or move from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("expected 4 rows, found {0}")]
    RowCount(usize),

    #[error("row {row} has {len} cells, expected 4")]
    RowLength { row: usize, len: usize },

    #[error("unknown cell character {0:?}")]
    BadCell(char),

    #[error("invalid move {0:?}, expected `row,col` with values 0..=3")]
    BadMove(String),
}

/// Unknown difficulty tier name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty {0:?}, expected one of easy, medium, hard, expert")]
pub struct DifficultyError(pub String);

/// Illegal action within a game session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("cell {0} is already occupied")]
    Occupied(Move),

    #[error("game is already over")]
    GameOver,

    #[error("it is not {0}'s turn")]
    OutOfTurn(Cell),

    #[error("no legal move available")]
    NoMove,
}

//! Constants for board geometry, evaluation weights, and search bounds.
//!
//! The engine only ever plays on a 4x4 grid, so the geometry is fixed at
//! compile time rather than selected through features.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const N: usize = 4;

/// Total number of cells on the board.
pub const CELLS: usize = N * N;

/// Cells worth the most in the positional heuristic.
pub const CENTER_CELLS: [(usize, usize); 4] = [(1, 1), (1, 2), (2, 1), (2, 2)];

/// Cells worth slightly less than the center.
pub const CORNER_CELLS: [(usize, usize); 4] = [(0, 0), (0, 3), (3, 0), (3, 3)];

// =============================================================================
// Evaluation Weights
// =============================================================================

/// Score of a completed line. Positive for O, negated for X.
pub const WIN_SCORE: i32 = 100;

/// Positional weight of an occupied center cell.
pub const CENTER_WEIGHT: i32 = 3;

/// Positional weight of an occupied corner cell.
pub const CORNER_WEIGHT: i32 = 2;

// =============================================================================
// Search Bounds
// =============================================================================

/// Stand-in for an unbounded alpha/beta window.
///
/// Scores stay within `[-WIN_SCORE - CELLS, WIN_SCORE + CELLS]`; bounds are
/// only compared, never negated.
pub const INFINITY: i32 = i32::MAX;

/// Lower end of the initial window.
pub const NEG_INFINITY: i32 = -INFINITY;

//! 4x4 board model and static evaluation.
//!
//! A [`Board`] is a small `Copy` value: applying a move returns a new board
//! and leaves the original untouched, so boards can be kept around freely
//! while the search walks the game tree.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    CELLS, CENTER_CELLS, CENTER_WEIGHT, CORNER_CELLS, CORNER_WEIGHT, N, WIN_SCORE,
};
use crate::error::BoardError;

/// Contents of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    /// The human side; moves first and minimizes.
    X,
    /// The automated side; maximizes.
    O,
}

impl Cell {
    /// The other player. `Empty` maps to itself.
    #[inline]
    pub fn opponent(self) -> Cell {
        match self {
            Cell::X => Cell::O,
            Cell::O => Cell::X,
            Cell::Empty => Cell::Empty,
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::X => 'X',
            Cell::O => 'O',
            Cell::Empty => '.',
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A board coordinate, `0 <= row, col < 4`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        debug_assert!(row < N && col < N);
        Self { row, col }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl FromStr for Move {
    type Err = BoardError;

    /// Accepts `row,col` or `row col`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || BoardError::BadMove(s.to_string());
        let mut parts = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty());
        let row: usize = parts.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;
        let col: usize = parts.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;
        if parts.next().is_some() || row >= N || col >= N {
            return Err(bad());
        }
        Ok(Move::new(row, col))
    }
}

/// The 4x4 grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; N]; N],
}

impl Board {
    /// The starting position.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [[Cell; N]; N]) -> Self {
        Self { cells }
    }

    #[inline]
    pub fn get(&self, mv: Move) -> Cell {
        self.cells[mv.row][mv.col]
    }

    /// Number of cells holding `cell`.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().flatten().filter(|&&c| c == cell).count()
    }

    /// The player owning a complete line, if any.
    ///
    /// Rows are checked first, then columns, the main diagonal, and the
    /// anti-diagonal. Only full four-cell lines count.
    pub fn winner(&self) -> Option<Cell> {
        let c = &self.cells;
        let line = |cells: [Cell; N]| -> Option<Cell> {
            let first = cells[0];
            (first != Cell::Empty && cells.iter().all(|&x| x == first)).then_some(first)
        };

        for row in 0..N {
            if let Some(w) = line(c[row]) {
                return Some(w);
            }
        }
        for col in 0..N {
            if let Some(w) = line([c[0][col], c[1][col], c[2][col], c[3][col]]) {
                return Some(w);
            }
        }
        line([c[0][0], c[1][1], c[2][2], c[3][3]])
            .or_else(|| line([c[0][3], c[1][2], c[2][1], c[3][0]]))
    }

    /// True when no empty cell remains.
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|&c| c != Cell::Empty)
    }

    /// Empty cells in row-major order.
    ///
    /// The order drives move generation in the search, which makes it the
    /// tie-breaker between equally scored moves.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(CELLS);
        for row in 0..N {
            for col in 0..N {
                if self.cells[row][col] == Cell::Empty {
                    moves.push(Move::new(row, col));
                }
            }
        }
        moves
    }

    /// A copy of this board with `player` placed at `mv`.
    #[must_use]
    pub fn apply_move(&self, mv: Move, player: Cell) -> Board {
        let mut next = *self;
        next.cells[mv.row][mv.col] = player;
        next
    }
}

/// Static score of a position. Positive favors O, negative favors X.
///
/// A completed line scores exactly `±WIN_SCORE`. Any other position (draw or
/// ongoing) is scored by the occupied center and corner cells.
pub fn evaluate(board: &Board) -> i32 {
    match board.winner() {
        Some(Cell::O) => return WIN_SCORE,
        Some(Cell::X) => return -WIN_SCORE,
        _ => {}
    }

    let weight = |cells: &[(usize, usize)], w: i32| -> i32 {
        cells
            .iter()
            .map(|&(r, c)| match board.cells[r][c] {
                Cell::O => w,
                Cell::X => -w,
                Cell::Empty => 0,
            })
            .sum()
    };

    weight(&CENTER_CELLS, CENTER_WEIGHT) + weight(&CORNER_CELLS, CORNER_WEIGHT)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parses four rows separated by newlines or `/`, e.g. `"OOO./XXOX/XOXX/.XXO"`.
    /// Spaces inside a row are ignored; `.` and `_` mark empty cells.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .split(|c: char| c == '\n' || c == '/')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .collect();
        if rows.len() != N {
            return Err(BoardError::RowCount(rows.len()));
        }

        let mut cells = [[Cell::Empty; N]; N];
        for (r, text) in rows.iter().enumerate() {
            let parsed = text
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|ch| match ch {
                    'X' | 'x' => Ok(Cell::X),
                    'O' | 'o' => Ok(Cell::O),
                    '.' | '_' => Ok(Cell::Empty),
                    other => Err(BoardError::BadCell(other)),
                })
                .collect::<Result<Vec<_>, _>>()?;
            if parsed.len() != N {
                return Err(BoardError::RowLength {
                    row: r,
                    len: parsed.len(),
                });
            }
            cells[r].copy_from_slice(&parsed);
        }
        Ok(Board { cells })
    }
}

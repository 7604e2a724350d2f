//! Game session state: turn order, result tracking, and running totals.
//!
//! X (the human) always opens. The session only enforces turn order and
//! cell occupancy; choosing O's move is the [`MoveSelector`]'s job.
//!
//! [`MoveSelector`]: crate::selector::MoveSelector

use tracing::info;

use crate::board::{Board, Cell, Move};
use crate::error::GameError;

/// Where a game stands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Won(Cell),
    Draw,
}

impl GameStatus {
    fn of(board: &Board) -> Self {
        match board.winner() {
            Some(w) => GameStatus::Won(w),
            None if board.is_full() => GameStatus::Draw,
            None => GameStatus::Playing,
        }
    }

    pub fn is_over(self) -> bool {
        self != GameStatus::Playing
    }
}

/// One game in progress.
#[derive(Clone, Debug)]
pub struct GameState {
    pub board: Board,
    pub to_move: Cell,
    pub status: GameStatus,
    pub move_count: usize,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            board: Board::empty(),
            to_move: Cell::X,
            status: GameStatus::Playing,
            move_count: 0,
        }
    }

    /// Play `mv` for `player`, then hand the turn over.
    pub fn play(&mut self, player: Cell, mv: Move) -> Result<GameStatus, GameError> {
        if self.status.is_over() {
            return Err(GameError::GameOver);
        }
        if player != self.to_move {
            return Err(GameError::OutOfTurn(player));
        }
        if self.board.get(mv) != Cell::Empty {
            return Err(GameError::Occupied(mv));
        }

        self.board = self.board.apply_move(mv, player);
        self.move_count += 1;
        self.to_move = player.opponent();
        self.status = GameStatus::of(&self.board);
        if self.status.is_over() {
            info!(status = ?self.status, moves = self.move_count, "game over");
        }
        Ok(self.status)
    }
}

/// Results across games in one session.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GameStats {
    pub games_played: u32,
    pub player_wins: u32,
    pub ai_wins: u32,
    pub draws: u32,
}

impl GameStats {
    /// Count a game. Unfinished games are ignored.
    pub fn record(&mut self, status: GameStatus) {
        match status {
            GameStatus::Playing => return,
            GameStatus::Won(Cell::X) => self.player_wins += 1,
            GameStatus::Won(_) => self.ai_wins += 1,
            GameStatus::Draw => self.draws += 1,
        }
        self.games_played += 1;
    }

    /// Percentage of finished games won by the human.
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.player_wins as f64 / self.games_played as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_order() {
        let mut game = GameState::new();
        assert_eq!(
            game.play(Cell::O, Move::new(0, 0)),
            Err(GameError::OutOfTurn(Cell::O))
        );
        assert_eq!(game.play(Cell::X, Move::new(0, 0)), Ok(GameStatus::Playing));
        assert_eq!(game.to_move, Cell::O);
        assert_eq!(
            game.play(Cell::O, Move::new(0, 0)),
            Err(GameError::Occupied(Move::new(0, 0)))
        );
        assert_eq!(game.move_count, 1);
    }

    #[test]
    fn test_win_ends_game() {
        let mut game = GameState::new();
        for col in 0..3 {
            game.play(Cell::X, Move::new(0, col)).unwrap();
            game.play(Cell::O, Move::new(1, col)).unwrap();
        }
        assert_eq!(game.play(Cell::X, Move::new(0, 3)), Ok(GameStatus::Won(Cell::X)));
        assert_eq!(game.play(Cell::O, Move::new(1, 3)), Err(GameError::GameOver));
    }

    #[test]
    fn test_draw_detected() {
        let cells = [
            (0, 0), (0, 1), (0, 3), (0, 2),
            (1, 2), (1, 0), (1, 1), (1, 3),
            (2, 0), (2, 1), (2, 3), (2, 2),
            (3, 2), (3, 0), (3, 1), (3, 3),
        ];
        let mut game = GameState::new();
        let mut status = GameStatus::Playing;
        for (i, &(r, c)) in cells.iter().enumerate() {
            let player = if i % 2 == 0 { Cell::X } else { Cell::O };
            status = game.play(player, Move::new(r, c)).unwrap();
            if i < 15 {
                assert_eq!(status, GameStatus::Playing, "ended early at move {i}");
            }
        }
        assert_eq!(status, GameStatus::Draw);
    }

    #[test]
    fn test_stats() {
        let mut stats = GameStats::default();
        assert_eq!(stats.win_rate(), 0.0);
        stats.record(GameStatus::Playing);
        stats.record(GameStatus::Won(Cell::X));
        stats.record(GameStatus::Won(Cell::O));
        stats.record(GameStatus::Draw);
        stats.record(GameStatus::Won(Cell::X));
        assert_eq!(stats.games_played, 4);
        assert_eq!(stats.player_wins, 2);
        assert_eq!(stats.ai_wins, 1);
        assert_eq!(stats.draws, 1);
        assert_eq!(stats.win_rate(), 50.0);
    }
}

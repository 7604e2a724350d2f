//! Line-oriented text protocol for playing against the engine.
//!
//! Modelled on GTP: each line is an optional numeric id, a command, and its
//! arguments. Replies start with `=` on success or `?` on failure, followed
//! by the id (if any), the message, and a blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `list_commands`, `known_command <cmd>`, `quit`
//! - `new` - Start a new game (the finished one is added to the stats)
//! - `difficulty [tier]` - Show or change the tier; changing it mid-game starts over
//! - `play <row> <col>` - Play X there; the engine answers as O unless the game ended
//! - `genmove` - Ask the engine to move for O
//! - `showboard` - Print the board
//! - `analysis` - Node counts, pruning efficiency and the last engine move
//! - `tree [depth]` - Text dump of the last search tree
//! - `tree_json` - The last search tree as JSON
//! - `stats` - Results of finished games

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use crate::analysis::{principal_variation, render_tree, TreeSummary};
use crate::board::{Cell, Move};
use crate::difficulty::Difficulty;
use crate::error::GameError;
use crate::game::{GameState, GameStats, GameStatus};
use crate::selector::{MoveSelector, RandomSource, Selection, SelectionKind};

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "analysis",
    "difficulty",
    "genmove",
    "known_command",
    "list_commands",
    "name",
    "new",
    "play",
    "quit",
    "showboard",
    "stats",
    "tree",
    "tree_json",
];

/// Depth shown by `tree` when none is given.
const DEFAULT_TREE_DEPTH: u32 = 1;

/// Protocol session state.
pub struct Session<R: RandomSource = fastrand::Rng> {
    game: GameState,
    stats: GameStats,
    difficulty: Difficulty,
    selector: MoveSelector<R>,
    last_engine_move: Option<Selection>,
}

impl Session<fastrand::Rng> {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_selector(difficulty, MoveSelector::new())
    }
}

impl<R: RandomSource> Session<R> {
    pub fn with_selector(difficulty: Difficulty, selector: MoveSelector<R>) -> Self {
        Self {
            game: GameState::new(),
            stats: GameStats::default(),
            difficulty,
            selector,
            last_engine_move: None,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// Run the command loop over stdin/stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Run the command loop over arbitrary streams until `quit` or end of input.
    pub fn run_with<I: BufRead, O: Write>(&mut self, input: I, mut output: O) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            if !success {
                warn!(%command, %message, "command failed");
            }
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute a command and return (success, response).
    pub fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        debug!(command, ?args, "executing");
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => match args.first() {
                Some(cmd) => {
                    let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                    (true, known.to_string())
                }
                None => (false, "missing argument".to_string()),
            },

            "quit" => (true, String::new()),

            "new" => {
                self.new_game();
                (true, String::new())
            }

            "difficulty" => match args.first() {
                None => (true, self.difficulty.to_string()),
                Some(name) => match name.parse::<Difficulty>() {
                    Ok(d) => {
                        self.difficulty = d;
                        if self.game.move_count > 0 {
                            self.new_game();
                        }
                        (true, d.to_string())
                    }
                    Err(e) => (false, e.to_string()),
                },
            },

            "play" => {
                if args.is_empty() {
                    return (false, "missing arguments".to_string());
                }
                let mv: Move = match args.join(" ").parse() {
                    Ok(mv) => mv,
                    Err(e) => return (false, e.to_string()),
                };
                if let Err(e) = self.game.play(Cell::X, mv) {
                    return (false, e.to_string());
                }
                if self.game.status.is_over() {
                    return (true, self.status_text());
                }
                match self.engine_move() {
                    Ok(reply) => (true, reply),
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => match self.engine_move() {
                Ok(reply) => (true, reply),
                Err(e) => (false, e.to_string()),
            },

            "showboard" => (true, format!("\n{}", self.game.board)),

            "analysis" => (true, self.analysis_text()),

            "tree" => {
                let depth = match args.first().map(|d| d.parse::<u32>()) {
                    None => DEFAULT_TREE_DEPTH,
                    Some(Ok(d)) => d,
                    Some(Err(_)) => return (false, "invalid depth".to_string()),
                };
                match self.selector.last_search_tree() {
                    Some(tree) => (true, format!("\n{}", render_tree(&tree.root, depth).trim_end())),
                    None => (false, "no search tree".to_string()),
                }
            }

            "tree_json" => match self.selector.last_search_tree() {
                Some(tree) => match tree.to_json() {
                    Ok(json) => (true, json),
                    Err(e) => (false, e.to_string()),
                },
                None => (false, "no search tree".to_string()),
            },

            "stats" => {
                let s = &self.stats;
                (
                    true,
                    format!(
                        "games {} player {} ai {} draws {} winrate {:.1}%",
                        s.games_played,
                        s.player_wins,
                        s.ai_wins,
                        s.draws,
                        s.win_rate()
                    ),
                )
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }

    fn new_game(&mut self) {
        self.stats.record(self.game.status);
        self.game = GameState::new();
        self.selector.clear();
        self.last_engine_move = None;
    }

    /// Let the engine move for O and describe the result.
    fn engine_move(&mut self) -> Result<String, GameError> {
        if self.game.status.is_over() {
            return Err(GameError::GameOver);
        }
        if self.game.to_move != Cell::O {
            return Err(GameError::OutOfTurn(Cell::O));
        }

        let selection = self
            .selector
            .select_move(&self.game.board, self.difficulty)
            .ok_or(GameError::NoMove)?;
        self.game.play(Cell::O, selection.mv)?;
        self.last_engine_move = Some(selection);

        let mut reply = selection.mv.to_string();
        if self.game.status.is_over() {
            reply.push(' ');
            reply.push_str(&self.status_text());
        }
        Ok(reply)
    }

    fn status_text(&self) -> String {
        match self.game.status {
            GameStatus::Playing => "playing".to_string(),
            GameStatus::Won(cell) => format!("{cell} wins"),
            GameStatus::Draw => "draw".to_string(),
        }
    }

    fn analysis_text(&self) -> String {
        let tree = self.selector.last_search_tree();
        let summary = TreeSummary::of(tree.map(|t| &t.root));
        let config = self.difficulty.config();

        let mut lines = vec![
            format!("difficulty {} (depth {})", self.difficulty, config.max_depth),
            format!("nodes {}", summary.nodes),
            format!("pruned {}", summary.pruned),
            format!("efficiency {:.1}%", summary.efficiency),
            format!("thinking {}ms", config.thinking_delay_ms),
        ];
        match self.last_engine_move {
            Some(Selection {
                mv,
                kind: SelectionKind::Searched { score },
            }) => lines.push(format!("last {mv} score {score}")),
            Some(Selection {
                mv,
                kind: SelectionKind::Mistake,
            }) => lines.push(format!("last {mv} random")),
            None => {}
        }
        if let Some(tree) = tree {
            let pv: Vec<String> = principal_variation(&tree.root)
                .iter()
                .map(Move::to_string)
                .collect();
            if !pv.is_empty() {
                lines.push(format!("line {}", pv.join(" ")));
            }
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::with_selector(Difficulty::Expert, MoveSelector::with_seed(1))
    }

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = Session::<fastrand::Rng>::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = Session::<fastrand::Rng>::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_known_command() {
        let mut s = session();
        assert_eq!(s.execute("known_command", &["tree"]), (true, "true".to_string()));
        assert_eq!(s.execute("known_command", &["boardsize"]), (true, "false".to_string()));
        assert!(!s.execute("known_command", &[]).0);
    }

    #[test]
    fn test_difficulty_command() {
        let mut s = session();
        assert_eq!(s.execute("difficulty", &[]), (true, "expert".to_string()));
        assert_eq!(s.execute("difficulty", &["Easy"]), (true, "easy".to_string()));
        assert!(!s.execute("difficulty", &["nightmare"]).0);
    }

    #[test]
    fn test_genmove_out_of_turn() {
        let mut s = session();
        let (ok, msg) = s.execute("genmove", &[]);
        assert!(!ok);
        assert!(msg.contains("not O's turn"));
    }

    #[test]
    fn test_play_rejects_bad_input() {
        let mut s = session();
        assert!(!s.execute("play", &[]).0);
        assert!(!s.execute("play", &["7", "7"]).0);
        assert!(!s.execute("unknown", &[]).0);
    }

    #[test]
    fn test_changing_difficulty_restarts_game() {
        let mut s = session();
        s.execute("difficulty", &["easy"]);
        let (ok, _) = s.execute("play", &["0", "0"]);
        assert!(ok);
        assert_eq!(s.game().move_count, 2);
        s.execute("difficulty", &["medium"]);
        assert_eq!(s.game().move_count, 0);
        // Unfinished games do not count.
        assert_eq!(s.stats().games_played, 0);
    }

    #[test]
    fn test_run_with_streams() {
        let mut s = session();
        let input = "1 name\n# comment\n\nbogus\nquit\nname\n";
        let mut out = Vec::new();
        s.run_with(input.as_bytes(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("=1 tictac4-engine\n\n"));
        assert!(text.contains("? unknown command: bogus"));
        // Nothing after quit is processed.
        assert_eq!(text.matches("tictac4-engine").count(), 1);
    }
}

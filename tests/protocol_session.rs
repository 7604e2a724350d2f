//! Full games driven through the text protocol.

use tictac4::difficulty::Difficulty;
use tictac4::game::GameStatus;
use tictac4::protocol::Session;
use tictac4::selector::{MoveSelector, RandomSource};

/// Draws that never fall under a mistake probability.
struct NeverErr;

impl RandomSource for NeverErr {
    fn next_f64(&mut self) -> f64 {
        0.99
    }

    fn index(&mut self, _len: usize) -> usize {
        0
    }
}

/// X always takes the first free cell until the game ends.
fn play_out(session: &mut Session) {
    while !session.game().status.is_over() {
        let mv = session.game().board.legal_moves()[0];
        let (row, col) = (mv.row.to_string(), mv.col.to_string());
        let (ok, reply) = session.execute("play", &[row.as_str(), col.as_str()]);
        assert!(ok, "play {mv} failed: {reply}");
    }
}

#[test]
fn test_game_runs_to_completion_and_counts() {
    let mut session = Session::with_selector(Difficulty::Easy, MoveSelector::with_seed(8));
    play_out(&mut session);
    let finished = session.game().status;
    assert!(matches!(finished, GameStatus::Won(_) | GameStatus::Draw));

    let (ok, _) = session.execute("new", &[]);
    assert!(ok);
    assert_eq!(session.stats().games_played, 1);
    assert_eq!(session.game().move_count, 0);

    let (ok, text) = session.execute("stats", &[]);
    assert!(ok);
    assert!(text.starts_with("games 1 "));
}

#[test]
fn test_play_after_game_over_is_rejected() {
    let mut session = Session::with_selector(Difficulty::Easy, MoveSelector::with_seed(9));
    play_out(&mut session);
    let (ok, reply) = session.execute("genmove", &[]);
    assert!(!ok);
    assert_eq!(reply, "game is already over");
}

#[test]
fn test_analysis_and_tree_after_engine_move() {
    let selector = MoveSelector::with_rng(NeverErr);
    let mut session = Session::with_selector(Difficulty::Medium, selector);
    session.execute("difficulty", &["easy"]);

    // Before any search there is nothing to show.
    assert!(!session.execute("tree", &[]).0);

    let script = "play 0 0\nshowboard\ngenmove\n";
    let mut out = Vec::new();
    session.run_with(script.as_bytes(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.iter().filter(|l| l.starts_with('=')).count(), 2, "{text}");
    assert!(lines.iter().any(|l| l.starts_with("? it is not O's turn")), "{text}");
    assert_eq!(session.game().move_count, 2);

    let (ok, analysis) = session.execute("analysis", &[]);
    assert!(ok);
    assert!(analysis.contains("difficulty easy (depth 3)"));
    assert!(analysis.contains("thinking 300ms"));
    assert!(analysis.contains(" score "));
    assert!(analysis.contains("line "));

    let (ok, tree) = session.execute("tree", &["1"]);
    assert!(ok);
    assert!(tree.contains("node-0 root max"));

    let (ok, json) = session.execute("tree_json", &[]);
    assert!(ok);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["root"]["id"], 0);
    assert_eq!(value["root"]["move"], serde_json::Value::Null);
    assert_eq!(value["maxDepth"], 3);
}

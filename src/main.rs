//! tictac4: a 4x4 tic-tac-toe engine that explains its moves.
//!
//! ## Usage
//!
//! - `tictac4` - Show a demo
//! - `tictac4 play` - Start the text protocol on stdin/stdout
//! - `tictac4 suggest <board>` - Print the engine's move for a position
//! - `tictac4 demo` - Run the demo

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use tictac4::analysis::{principal_variation, render_tree, TreeSummary};
use tictac4::board::{Board, Cell, Move};
use tictac4::difficulty::Difficulty;
use tictac4::protocol::Session;
use tictac4::selector::{MoveSelector, SelectionKind};

/// tictac4: minimax with alpha-beta pruning for 4x4 tic-tac-toe
#[derive(Parser)]
#[command(name = "tictac4")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game over the line protocol (stdin/stdout)
    Play {
        #[arg(short, long, value_enum, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,
        /// Seed for the mistake generator
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Choose O's move for a position such as "X.../.O../..../...."
    Suggest {
        board: String,
        #[arg(short, long, value_enum, default_value_t = Difficulty::Expert)]
        difficulty: Difficulty,
        #[arg(long)]
        seed: Option<u64>,
        /// Print the search tree as JSON instead of a summary
        #[arg(long)]
        json: bool,
        /// Plies of the tree to print in the summary
        #[arg(long, default_value_t = 1)]
        tree_depth: u32,
    },
    /// Run a short demo of the engine
    Demo,
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("invalid log level {level:?}"))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn selector(seed: Option<u64>) -> MoveSelector {
    seed.map_or_else(MoveSelector::new, MoveSelector::with_seed)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    match cli.command {
        Some(Commands::Play { difficulty, seed }) => {
            info!(%difficulty, "starting protocol session");
            let mut session = Session::with_selector(difficulty, selector(seed));
            session.run().context("protocol session failed")?;
        }
        Some(Commands::Suggest {
            board,
            difficulty,
            seed,
            json,
            tree_depth,
        }) => {
            let board: Board = board.parse().context("could not parse board")?;
            suggest(&board, difficulty, seed, json, tree_depth)?;
        }
        Some(Commands::Demo) | None => run_demo(),
    }
    Ok(())
}

fn suggest(
    board: &Board,
    difficulty: Difficulty,
    seed: Option<u64>,
    json: bool,
    tree_depth: u32,
) -> Result<()> {
    let mut selector = selector(seed);
    let selection = selector.select_move(board, difficulty);

    if json {
        let tree = selector
            .last_search_tree()
            .context("no search ran (random move or finished game)")?;
        println!("{}", tree.to_json_pretty()?);
        return Ok(());
    }

    print!("{board}");
    match selection {
        None => println!("no legal move"),
        Some(sel) => match sel.kind {
            SelectionKind::Searched { score } => println!("move {} score {score}", sel.mv),
            SelectionKind::Mistake => println!("move {} (random)", sel.mv),
        },
    }

    if let Some(tree) = selector.last_search_tree() {
        let s = TreeSummary::of(Some(&tree.root));
        println!(
            "nodes {} pruned {} leaves {} efficiency {:.1}%",
            s.nodes, s.pruned, s.leaves, s.efficiency
        );
        let line: Vec<String> = principal_variation(&tree.root)
            .iter()
            .map(ToString::to_string)
            .collect();
        println!("line {}", line.join(" "));
        print!("{}", render_tree(&tree.root, tree_depth));
    }
    Ok(())
}

fn run_demo() {
    println!("tictac4: 4x4 tic-tac-toe with alpha-beta search\n");

    let mut selector = MoveSelector::with_seed(42);
    // X opens in a corner, O answers at every tier.
    let board = Board::empty().apply_move(Move::new(0, 0), Cell::X);
    println!("{board}");

    for difficulty in Difficulty::ALL {
        let config = difficulty.config();
        // Capped: a depth-9 search from an almost empty board takes a while.
        let depth = config.max_depth.min(4);
        match selector.select_move_with(&board, depth, config.mistake_probability) {
            Some(sel) => {
                let s = TreeSummary::of(selector.last_search_tree().map(|t| &t.root));
                println!(
                    "{:<7} depth {} -> {}{}  nodes {} pruned {} ({:.1}%)",
                    config.name,
                    depth,
                    sel.mv,
                    if sel.is_mistake() { " (random)" } else { "" },
                    s.nodes,
                    s.pruned,
                    s.efficiency
                );
            }
            None => println!("{:<7} no move", config.name),
        }
    }
}

//! Goban-Core command line.
//!
//! ## Usage
//!
//! - `goban-core` - Show a demo
//! - `goban-core play D4 Q16 pass ...` - Replay a move list and print the result
//! - `goban-core demo` - Run the capture demo

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use goban_core::board::{format_vertex, parse_vertex};
use goban_core::constants::DEFAULT_BOARD_SIZE;
use goban_core::game::GoGameModel;
use goban_core::rules::GameRules;
use goban_core::sequence::GoMoveSequence;

/// Goban-Core: Go rules engine with move tree and superko detection
#[derive(Parser)]
#[command(name = "goban-core")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    game: GameOptions,

    /// Log engine decisions (same as RUST_LOG=goban_core=debug)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct GameOptions {
    /// Board size (NxN)
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,

    /// Ruleset: chinese, japanese, new-zealand or tromp-taylor
    #[arg(long, default_value = "chinese")]
    rules: GameRules,

    /// Override the ruleset's komi
    #[arg(long)]
    komi: Option<f32>,

    /// Seed for the position hash table (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay moves (vertices like D4, or pass / resign) and print the final position
    Play {
        moves: Vec<String>,
    },
    /// Run a simple capture demo
    Demo,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut game = new_game(&cli.game)?;
    match cli.command {
        Some(Commands::Play { moves }) => run_play(&mut game, &moves)?,
        Some(Commands::Demo) | None => run_demo(&mut game)?,
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("goban_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn new_game(opts: &GameOptions) -> anyhow::Result<GoGameModel> {
    let mut game = match opts.seed {
        Some(seed) => GoGameModel::with_seed(opts.size, opts.size, opts.rules, seed),
        None => GoGameModel::new(opts.size, opts.size, opts.rules),
    }
    .context("failed to create game")?;
    if let Some(komi) = opts.komi {
        game.set_komi(komi);
    }
    Ok(game)
}

fn run_play(game: &mut GoGameModel, moves: &[String]) -> anyhow::Result<()> {
    let height = game.board_height();
    for mv in moves {
        let mut seq = GoMoveSequence::new(game);
        match mv.to_ascii_lowercase().as_str() {
            "pass" => {
                seq.pass();
            }
            "resign" => {
                seq.resign();
            }
            vertex => {
                let Some((x, y)) = parse_vertex(vertex, height) else {
                    bail!("invalid vertex '{mv}'");
                };
                seq.play_move(x, y).with_context(|| format!("move {mv} rejected"))?;
            }
        }
    }
    print_summary(game);
    Ok(())
}

fn run_demo(game: &mut GoGameModel) -> anyhow::Result<()> {
    println!("Goban-Core: Go rules engine\n");
    println!("Rules: {} (komi {})", game.rules(), game.komi());

    // White's stone at (2, 3) gets surrounded and captured.
    GoMoveSequence::new(game)
        .play_move(1, 3)?
        .play_move(2, 3)?
        .play_move(3, 3)?
        .play_move(6, 6)?
        .play_move(2, 4)?
        .play_move(6, 7)?
        .play_move(2, 2)?;
    print_summary(game);
    Ok(())
}

fn print_summary(game: &GoGameModel) {
    let height = game.board_height();
    let update = game.current_update();
    println!("{}", game.current_position());
    println!("Move {}: {:?}", game.distance_to_root(), update.kind());
    if let Some(stone) = update.primary_move() {
        println!("Last stone: {} {}", stone.color, format_vertex(stone.x, stone.y, height));
    }
    if !update.captures().is_empty() {
        let mut captured: Vec<String> =
            update.captures().iter().map(|s| format_vertex(s.x, s.y, height)).collect();
        captured.sort();
        println!("Captured: {}", captured.join(" "));
    }
    println!("Hash: {:016x}", game.current_hash());
    println!("Next to play: {}", game.next_turn_color());
}

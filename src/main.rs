//! Twister
//!
//! A virtual 3x3x3 rotating cube. Drag on the cube to turn a layer, drag
//! elsewhere to orbit the camera. The subcommands run the same engine
//! headless and print the resulting state.

mod visualization;

use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use twister::{grid, scramble, Config, Move, RotationEngine};

/// Turns a virtual 3x3x3 cube with the mouse.
#[derive(Parser)]
#[command(name = "twister")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    tuning: Tuning,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive 3D viewer (default).
    View,
    /// Scramble a solved cube and print the moves and the resulting state.
    Scramble,
    /// Apply moves such as `x1+` or `y-1-` to a solved cube and print the state.
    Turn {
        #[arg(required = true)]
        moves: Vec<Move>,
    },
}

/// Overrides for the default thresholds.
#[derive(Args)]
struct Tuning {
    /// Length of an animated quarter turn, in milliseconds.
    #[arg(long, global = true)]
    duration_ms: Option<u64>,
    /// Minimum alignment score before a drag commits to an axis.
    #[arg(long, global = true)]
    confidence: Option<f32>,
    /// Pointer jitter ignored at the start of a drag, in pixels.
    #[arg(long, global = true)]
    dead_zone: Option<f32>,
    /// Number of moves in a scramble.
    #[arg(long, global = true)]
    scramble_moves: Option<usize>,
    /// Seed for reproducible scrambles.
    #[arg(long, global = true)]
    seed: Option<u64>,
}

impl Tuning {
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = Config::default();
        if let Some(ms) = self.duration_ms {
            config.engine.default_duration = Duration::from_millis(ms);
        }
        if let Some(confidence) = self.confidence {
            config.resolver.confidence = confidence;
        }
        if let Some(dead_zone) = self.dead_zone {
            config.resolver.dead_zone_px = dead_zone;
        }
        if let Some(moves) = self.scramble_moves {
            config.scramble.moves = moves;
        }
        config.scramble.seed = self.seed;
        config.validate().context("invalid tuning")?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let config = cli.tuning.config()?;

    match cli.command.unwrap_or(Command::View) {
        Command::View => visualization::display(config),
        Command::Scramble => print!("{}", scramble_report(&config)),
        Command::Turn { moves } => print!("{}", turn_report(&moves)),
    }
    Ok(())
}

/// Scrambles a fresh cube and describes the result.
fn scramble_report(config: &Config) -> String {
    let mut rng = match config.scramble.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut engine = RotationEngine::new(config.engine);
    let moves = scramble::scramble(&mut engine, &mut rng, config.scramble.moves);

    let notation: Vec<String> = moves.iter().map(Move::to_string).collect();
    format!(
        "Scramble: {}\n\n{}",
        notation.join(" "),
        grid::format_state(engine.store())
    )
}

/// Applies moves instantly to a solved cube and dumps the state.
fn turn_report(moves: &[Move]) -> String {
    let mut engine = RotationEngine::default();
    for &turn in moves {
        engine.turn(turn);
    }
    let solved = if engine.store().is_solved() {
        "solved"
    } else {
        "not solved"
    };
    format!("{}({solved})\n", grid::format_state(engine.store()))
}

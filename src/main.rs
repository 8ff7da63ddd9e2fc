//! Boardgame-Rules: chess, special chess and checkers on the command line.
//!
//! ## Usage
//!
//! - `boardgame-rules` - Start the text console with a classic game
//! - `boardgame-rules play --variant checkers` - Console with another variant
//! - `boardgame-rules demo --variant special --seed 7` - Play a short scripted game
//!
//! Set `RUST_LOG=debug` to trace moves on stderr.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use boardgame_rules::console::{Console, parse_square, render};
use boardgame_rules::game::{Game, Variant};

/// Boardgame-Rules: chess, special chess and checkers
#[derive(Parser)]
#[command(name = "boardgame-rules")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Rule set: classic, special or checkers
    #[arg(long, global = true, default_value = "classic")]
    variant: Variant,

    /// Seed for random piece moves
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read commands from stdin and answer on stdout
    Play,
    /// Play a few scripted moves and print the board
    Demo,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let game = match cli.seed {
        Some(seed) => Game::with_seed(cli.variant, seed),
        None => Game::new(cli.variant),
    };

    match cli.command {
        Some(Commands::Play) | None => {
            let mut console = Console::new(game);
            if let Some(seed) = cli.seed {
                console = console.with_seed(seed);
            }
            console.run()
        }
        Some(Commands::Demo) => {
            run_demo(game);
            Ok(())
        }
    }
}

fn run_demo(mut game: Game) {
    println!("Boardgame-Rules: {} demo\n", game.variant());

    let script: &[(&str, &str)] = match game.variant() {
        Variant::Classic => &[("e2", "e4"), ("e7", "e5"), ("g1", "f3"), ("b8", "c6")],
        Variant::Special => &[("g4", "f5"), ("b5", "c4"), ("d1", "d1"), ("e7", "e6")],
        Variant::Checkers => &[("c3", "d4"), ("f6", "e5"), ("d4", "f6")],
    };

    for &(from, to) in script {
        let (Some(from_sq), Some(to_sq)) = (parse_square(from), parse_square(to)) else {
            continue;
        };
        match game.play(from_sq, to_sq) {
            Ok(outcome) => println!(
                "{} plays {from}-{to}{}",
                game.moves().last().map_or(game.turn(), |r| r.mover),
                outcome.captured.map(|p| format!(" taking {p}")).unwrap_or_default()
            ),
            Err(err) => println!("{from}-{to}: {err}"),
        }
    }

    println!("\n{}", render(game.board(), &[]));
    println!("Move {}, {} to play", game.move_count() as u32, game.turn());
}

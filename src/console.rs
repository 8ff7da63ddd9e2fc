//! Line-oriented text front end.
//!
//! Reads one command per line and answers in the style of a Go Text Protocol
//! engine: `= <message>` on success, `? <message>` on failure, followed by a
//! blank line. Squares are written as a file letter `a`-`h` and a rank digit
//! `1`-`8`, rank 8 being the top row of the board.
//!
//! ## Supported Commands
//!
//! - `new [classic|special|checkers]` - Start a new game
//! - `show` - Print the board
//! - `status` - Move number, side to move, or the winner
//! - `moves <square>` - List the destinations of a piece
//! - `select <square>` - Select a piece and print its destinations
//! - `to <square>` - Move the selected piece
//! - `move <from> <to>` - Select and move in one command
//! - `cancel` - Drop the current selection
//! - `undo` - Take back the last move
//! - `list_commands`, `known_command <cmd>`, `name`, `version`, `quit`

use std::io::{self, BufRead, Write};

use anyhow::Context;

use crate::board::{Board, Square};
use crate::constants::N;
use crate::game::{Game, Outcome, Phase, Selection};

const KNOWN_COMMANDS: &[&str] = &[
    "cancel",
    "known_command",
    "list_commands",
    "move",
    "moves",
    "name",
    "new",
    "quit",
    "select",
    "show",
    "status",
    "to",
    "undo",
    "version",
];

/// Parse a square such as `e2`. Returns `None` for anything off the board.
pub fn parse_square(s: &str) -> Option<Square> {
    let bytes = s.trim().as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];
    if !(b'a'..b'a' + N as u8).contains(&file) || !(b'1'..b'1' + N as u8).contains(&rank) {
        return None;
    }
    let col = (file - b'a') as usize;
    let row = N - (rank - b'0') as usize;
    Some((row, col))
}

/// Name of a square, e.g. `(6, 4)` is `e2`.
pub fn square_name(sq: Square) -> String {
    let file = (b'a' + sq.1 as u8) as char;
    format!("{file}{}", N - sq.0)
}

/// Draw the board with file and rank labels. Hinted squares show `*` when
/// empty and `x` when they hold a piece that would be captured.
pub fn render(board: &Board, hints: &[Square]) -> String {
    let files: String = (0..N).map(|c| format!("{} ", (b'a' + c as u8) as char)).collect();
    let mut out = format!("   {files}\n");
    for row in 0..N {
        let rank = N - row;
        out.push_str(&format!("{rank}  "));
        for col in 0..N {
            let piece = board.get((row, col));
            let ch = match (hints.contains(&(row, col)), piece) {
                (true, Some(_)) => 'x',
                (true, None) => '*',
                (false, Some(p)) => p.symbol(),
                (false, None) => '.',
            };
            out.push(ch);
            out.push(' ');
        }
        out.push_str(&format!(" {rank}\n"));
    }
    out.push_str(&format!("   {files}"));
    out
}

/// Console session driving one [`Game`] at a time.
pub struct Console {
    game: Game,
    seed: Option<u64>,
}

impl Console {
    pub fn new(game: Game) -> Self {
        Self { game, seed: None }
    }

    /// Reseed every game started with `new` so that random moves repeat.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.game.reseed(seed);
        self
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the command loop on stdin/stdout until `quit` or end of input.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let line = line.context("failed to read command")?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            let command = parts[0].to_lowercase();
            let args = &parts[1..];

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            writeln!(stdout, "{prefix} {message}\n").context("failed to write response")?;
            stdout.flush().context("failed to flush stdout")?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    fn status(&self) -> String {
        match self.game.phase() {
            Phase::GameOver { winner } => {
                format!("game over, {winner} won in {} moves", self.game.move_count() as u32)
            }
            Phase::ContinuingCapture(sq) => format!(
                "move {}, {} must keep capturing with {}",
                self.game.move_count() as u32,
                self.game.turn(),
                square_name(sq)
            ),
            _ => format!(
                "move {}, {} to play",
                self.game.move_count() as u32,
                self.game.turn()
            ),
        }
    }

    fn describe(&self, outcome: &Outcome) -> String {
        let mut msg = format!("{}{}", square_name(outcome.from), square_name(outcome.to));
        if let Some(piece) = outcome.captured {
            msg.push_str(&format!(" takes {piece}"));
        }
        if outcome.promoted {
            msg.push_str(", crowned");
        }
        if outcome.winner.is_none() && !outcome.turn_over {
            msg.push_str(", capture again");
        }
        msg.push('\n');
        msg.push_str(&render(self.game.board(), &[]));
        msg.push('\n');
        msg.push_str(&self.status());
        msg
    }

    fn square_arg(args: &[&str], i: usize) -> Result<Square, String> {
        let raw = args.get(i).ok_or_else(|| "missing argument".to_string())?;
        parse_square(raw).ok_or_else(|| format!("invalid square: {raw}"))
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        let result = match command {
            "name" => Ok(env!("CARGO_PKG_NAME").to_string()),

            "version" => Ok(env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => Ok(KNOWN_COMMANDS.join("\n")),

            "known_command" => match args.first() {
                Some(cmd) => {
                    let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                    Ok(if known { "true" } else { "false" }.to_string())
                }
                None => Err("missing argument".to_string()),
            },

            "quit" => Ok(String::new()),

            "new" => {
                let variant = match args.first() {
                    Some(name) => name.parse(),
                    None => Ok(self.game.variant()),
                };
                variant.map(|variant| {
                    self.game = match self.seed {
                        Some(seed) => Game::with_seed(variant, seed),
                        None => Game::new(variant),
                    };
                    format!("{variant}\n{}", render(self.game.board(), &[]))
                })
            }

            "show" => Ok(render(self.game.board(), &[])),

            "status" => Ok(self.status()),

            "moves" => Self::square_arg(args, 0).map(|sq| {
                self.game
                    .legal_destinations(sq)
                    .into_iter()
                    .map(square_name)
                    .collect::<Vec<_>>()
                    .join(" ")
            }),

            "select" => Self::square_arg(args, 0).and_then(|sq| {
                match self.game.select(sq).map_err(|e| e.to_string())? {
                    Selection::Destinations(hints) => Ok(render(self.game.board(), &hints)),
                    Selection::Resolved(outcome) => Ok(self.describe(&outcome)),
                }
            }),

            "to" => Self::square_arg(args, 0).and_then(|sq| {
                let outcome = self.game.choose(sq).map_err(|e| e.to_string())?;
                Ok(self.describe(&outcome))
            }),

            "move" => Self::square_arg(args, 0)
                .and_then(|from| Self::square_arg(args, 1).map(|to| (from, to)))
                .and_then(|(from, to)| {
                    let outcome = self.game.play(from, to).map_err(|e| e.to_string())?;
                    Ok(self.describe(&outcome))
                }),

            "cancel" => {
                self.game.cancel();
                Ok(String::new())
            }

            "undo" => self
                .game
                .undo()
                .map(|record| {
                    format!(
                        "took back {}{}\n{}",
                        square_name(record.from),
                        square_name(record.to),
                        self.status()
                    )
                })
                .map_err(|e| e.to_string()),

            _ => Err(format!("unknown command: {command}")),
        };

        match result {
            Ok(message) => (true, message),
            Err(message) => (false, message),
        }
    }
}

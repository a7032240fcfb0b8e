//! pipefitter -- a pipe-placement autoplay engine speaking the PPI protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! A board reader describes each turn (level, discards, pieces, board),
//! sends `go`, and performs the `bestaction` it gets back.

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;

use pipefitter::board::Route;
use pipefitter::engine::Engine;
use pipefitter::logging;
use pipefitter::protocol::{parse_command, Command};
use pipefitter::targets::TargetTable;

#[derive(Parser, Debug)]
#[command(name = "pipefitter", about = "Pipe-placement autoplay engine (PPI protocol on stdin/stdout)")]
struct Args {
    /// JSON target table to use instead of the built-in one.
    #[arg(long)]
    targets: Option<PathBuf>,
    /// Route to pursue: avatar or highscore.
    #[arg(long, default_value_t = Route::Avatar)]
    route: Route,
    /// Tracing filter, e.g. "info", "pipefitter::policy=debug".
    #[arg(long, default_value = "warn")]
    log: String,
}

/// Runs the main PPI protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(&args.log);

    let table = match &args.targets {
        Some(path) => TargetTable::load(path)?,
        None => TargetTable::builtin().context("built-in target table is invalid")?,
    };
    let mut engine = Engine::new(table, args.route);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                warn!(target: "pipefitter::protocol", "stdin closed: {}", e);
                break;
            }
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Ppi => engine.handle_ppi(&mut out)?,
            Command::IsReady => engine.handle_isready(&mut out)?,
            Command::SetOption { name, value } => engine.set_option(name, value),
            Command::NewGame => engine.new_game(),
            Command::Proceed => engine.set_proceed(),
            Command::Level { level } => engine.set_level(level),
            Command::Discards { discards } => engine.set_discards(discards),
            Command::Pieces { pieces } => engine.set_pieces(pieces),
            Command::Board { board } => engine.set_board(board),
            Command::Go => engine.handle_go(&mut out)?,
            Command::Quit => break,
        }
    }

    Ok(())
}

//! Session replay CLI.
//!
//! Plays a recorded session (JSON lines, one frame per turn) through the
//! scheduler and prints `<turn> <action>` for every turn, `none` when no
//! level was active.
//!
//! Usage:
//!   cargo run --release --bin replay -- --session FILE [OPTIONS]
//!
//! Pacing defaults to zero delay; pass `--paced` to use the configured
//! delay bounds, or `--manual` to step one turn per line on stdin.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use pipefitter::autoplay::{RecordingExecutor, Scheduler, ScriptedView, StopReason, TurnOutcome};
use pipefitter::board::Route;
use pipefitter::config::AutoplayConfig;
use pipefitter::logging;
use pipefitter::targets::TargetTable;

#[derive(Parser, Debug)]
#[command(name = "replay", about = "Re-decide a recorded session turn by turn")]
struct Args {
    /// Recorded session, one JSON frame per line.
    #[arg(long)]
    session: PathBuf,
    /// JSON autoplay config (route, delays, seed).
    #[arg(long)]
    config: Option<PathBuf>,
    /// JSON target table to use instead of the built-in one.
    #[arg(long)]
    targets: Option<PathBuf>,
    /// Override the configured route.
    #[arg(long)]
    route: Option<Route>,
    /// Wait between turns using the configured delay bounds.
    #[arg(long)]
    paced: bool,
    /// Step one turn per line read from stdin.
    #[arg(long)]
    manual: bool,
    /// Tracing filter, e.g. "info", "pipefitter::policy=debug".
    #[arg(long, default_value = "info")]
    log: String,
}

/// Writes one `<turn> <outcome>` line; idle turns print `none`.
fn print_turn<W: Write>(out: &mut W, turn: u64, outcome: &TurnOutcome) {
    if let Err(e) = writeln!(out, "{} {}", turn, outcome) {
        tracing::error!(target: "pipefitter::autoplay", "failed to write turn {}: {}", turn, e);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(&args.log);

    let mut config = match &args.config {
        Some(path) => AutoplayConfig::load(path)?,
        None => AutoplayConfig::default(),
    };
    if let Some(route) = args.route {
        config.route = route;
    }
    config.manual |= args.manual;

    let table = match &args.targets {
        Some(path) => TargetTable::load(path)?,
        None => TargetTable::builtin().context("built-in target table is invalid")?,
    };
    let mut view = ScriptedView::load(&args.session)?;
    let frames = view.remaining() as u64;
    if config.max_turns == 0 || config.max_turns > frames {
        config.max_turns = frames;
    }

    let mut scheduler = Scheduler::new(config, table);
    let mut executor = RecordingExecutor::default();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let start = Instant::now();
    scheduler.start();
    let reason = if scheduler.config().manual {
        run_manual(&mut scheduler, &mut view, &mut executor, &mut out)?
    } else if args.paced {
        scheduler.run_reporting(&mut view, &mut executor, thread::sleep, |n, outcome| {
            print_turn(&mut out, n, outcome);
            out.flush().ok();
        })
    } else {
        scheduler.run_reporting(&mut view, &mut executor, |_| {}, |n, outcome| {
            print_turn(&mut out, n, outcome)
        })
    };
    out.flush()?;

    eprintln!(
        "Replayed {} turns ({} actions) in {:.1}s ({:?})",
        scheduler.turns(),
        executor.actions.len(),
        start.elapsed().as_secs_f64(),
        reason
    );
    match reason {
        StopReason::Halted(e) => Err(e.into()),
        _ => Ok(()),
    }
}

/// Runs one turn per stdin line until the frames or stdin run out.
fn run_manual<W: Write>(
    scheduler: &mut Scheduler,
    view: &mut ScriptedView,
    executor: &mut RecordingExecutor,
    out: &mut W,
) -> Result<StopReason> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        line?;
        if view.remaining() == 0 {
            break;
        }
        if !scheduler.is_running() {
            return Ok(StopReason::Stopped);
        }
        let outcome = scheduler.step(view, executor);
        print_turn(out, scheduler.turns(), &outcome);
        out.flush()?;
        if let TurnOutcome::Halted(e) = outcome {
            return Ok(StopReason::Halted(e));
        }
    }
    scheduler.stop();
    Ok(StopReason::Stopped)
}

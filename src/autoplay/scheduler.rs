//! Turn scheduler.
//!
//! Owns the pacing between turns and the start/stop state. Each turn reads
//! a fresh observation, plans, and hands the action to the executor. The
//! next turn only begins after the executor returns, so the engine always
//! sees a settled board.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, error, info};

use crate::config::AutoplayConfig;
use crate::policy::{plan_turn, Action, TurnError, TurnPlan};
use crate::targets::TargetTable;

use super::{observe, ActionExecutor, BoardReader, LevelStateReader};

/// Cloneable handle that stops a running scheduler between turns.
#[derive(Debug, Clone)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Result of a single turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The action was handed to the executor.
    Acted(Action),
    /// No level was active; nothing was executed.
    Idle,
    /// The turn could not be planned and the scheduler stopped.
    Halted(TurnError),
}

impl fmt::Display for TurnOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnOutcome::Acted(action) => write!(f, "{}", action),
            TurnOutcome::Idle => write!(f, "none"),
            TurnOutcome::Halted(TurnError::MissingTarget { level }) => {
                write!(f, "halt missing-target {}", level)
            }
        }
    }
}

/// Why `run` returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// `stop` was called.
    Stopped,
    /// The configured turn limit was reached.
    TurnLimit,
    /// A turn could not be planned.
    Halted(TurnError),
}

/// Drives turns at a randomized pace until stopped.
pub struct Scheduler {
    config: AutoplayConfig,
    table: TargetTable,
    running: Arc<AtomicBool>,
    turns: u64,
    rng: SmallRng,
}

impl Scheduler {
    /// Creates a stopped scheduler. A zero seed draws from entropy.
    pub fn new(config: AutoplayConfig, table: TargetTable) -> Self {
        let rng = if config.seed != 0 {
            SmallRng::seed_from_u64(config.seed)
        } else {
            SmallRng::from_entropy()
        };
        Scheduler {
            config,
            table,
            running: Arc::new(AtomicBool::new(false)),
            turns: 0,
            rng,
        }
    }

    pub fn config(&self) -> &AutoplayConfig {
        &self.config
    }

    /// Turns taken so far.
    pub fn turns(&self) -> u64 {
        self.turns
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(Arc::clone(&self.running))
    }

    pub fn start(&self) {
        self.running.store(true, Ordering::SeqCst);
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Draws the wait before the next turn, uniformly within the bounds.
    pub fn next_delay(&mut self) -> Duration {
        let min = self.config.delay_min();
        let max = self.config.delay_max().max(min);
        self.rng.gen_range(min..=max)
    }

    /// Runs exactly one turn. Used directly for manual stepping.
    pub fn step<V, E>(&mut self, view: &mut V, executor: &mut E) -> TurnOutcome
    where
        V: BoardReader + LevelStateReader + ?Sized,
        E: ActionExecutor + ?Sized,
    {
        self.turns += 1;
        let obs = observe(view);
        match plan_turn(&obs, &self.table, self.config.route) {
            Ok(TurnPlan::Act(decision)) => {
                debug!(target: "pipefitter::autoplay", turn = self.turns, action = %decision.action, "executing");
                executor.execute(decision.action);
                TurnOutcome::Acted(decision.action)
            }
            Ok(TurnPlan::Idle) => TurnOutcome::Idle,
            Err(e) => {
                error!(target: "pipefitter::autoplay", turn = self.turns, "{}", e);
                self.stop();
                TurnOutcome::Halted(e)
            }
        }
    }

    /// Loops turns with real sleeps until stopped. The scheduler must have
    /// been started; a stop issued before the call is honored.
    pub fn run<V, E>(&mut self, view: &mut V, executor: &mut E) -> StopReason
    where
        V: BoardReader + LevelStateReader + ?Sized,
        E: ActionExecutor + ?Sized,
    {
        self.run_with(view, executor, thread::sleep)
    }

    /// Loops turns, waiting via `sleep` before each one, until stopped,
    /// the turn limit is hit, or a turn halts.
    pub fn run_with<V, E, S>(&mut self, view: &mut V, executor: &mut E, sleep: S) -> StopReason
    where
        V: BoardReader + LevelStateReader + ?Sized,
        E: ActionExecutor + ?Sized,
        S: FnMut(Duration),
    {
        self.run_reporting(view, executor, sleep, |_, _| {})
    }

    /// Like `run_with`, also handing every turn's number and outcome to
    /// `report`, idle turns included.
    pub fn run_reporting<V, E, S, R>(
        &mut self,
        view: &mut V,
        executor: &mut E,
        mut sleep: S,
        mut report: R,
    ) -> StopReason
    where
        V: BoardReader + LevelStateReader + ?Sized,
        E: ActionExecutor + ?Sized,
        S: FnMut(Duration),
        R: FnMut(u64, &TurnOutcome),
    {
        if !self.is_running() {
            info!(target: "pipefitter::autoplay", "not started, nothing to run");
            return StopReason::Stopped;
        }
        info!(
            target: "pipefitter::autoplay",
            route = %self.config.route,
            delay_min_ms = self.config.delay_min_ms,
            delay_max_ms = self.config.delay_max_ms,
            "autoplay started"
        );

        let reason = loop {
            if self.config.max_turns > 0 && self.turns >= self.config.max_turns {
                break StopReason::TurnLimit;
            }
            let delay = self.next_delay();
            sleep(delay);
            if !self.is_running() {
                break StopReason::Stopped;
            }
            let outcome = self.step(view, executor);
            report(self.turns, &outcome);
            if let TurnOutcome::Halted(e) = outcome {
                break StopReason::Halted(e);
            }
        };

        self.stop();
        info!(target: "pipefitter::autoplay", turns = self.turns, reason = ?reason, "autoplay stopped");
        reason
    }
}

//! The decision engine.
//!
//! `rules` holds the pure placement policy, `turn` wraps it with the win
//! check, target resolution, and diagnostic reporting.

pub mod action;
pub mod rules;
pub mod turn;

pub use action::{Action, Decision, Diagnostic, Severity};
pub use rules::{decide, dont_care_slot, exact_slot};
pub use turn::{plan_turn, Observation, TurnError, TurnPlan};

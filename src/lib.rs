//! pipefitter engine library.
//!
//! Exposes the board model, target table, decision policy, autoplay
//! scheduler, and protocol modules for use by integration tests and the
//! binary entry points.

pub mod autoplay;
pub mod board;
pub mod config;
pub mod engine;
pub mod logging;
pub mod policy;
pub mod protocol;
pub mod targets;

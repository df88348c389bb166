//! The round state machine.
//!
//! Controllers talk to `RulesEngine`:
//! - Which actions a player could take
//! - How an action changes the match
//! - Whether the match is over
//!
//! `RoundEngine` is the only implementation. Its operations are split by
//! concern: betting, card plays and activations, round flow, and showdown.

mod activations;
mod betting;
pub mod engine;
mod error;
mod round;
mod showdown;

pub use engine::{GameResult, RoundEngine, RulesEngine};
pub use error::ActionError;

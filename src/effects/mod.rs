//! Ability Resolution Engine.
//!
//! A played card is resolved in two composable passes over the same state:
//! - `keywords`: the declarative keyword layer (Cascade, Chrono, Trap, ...)
//! - `scripts`: per-card-id overrides for effects no keyword expresses
//!
//! `AbilityEngine` drives both through a bounded work queue, then
//! re-derives passive flags (`passives`) and checks for a finished match.
//! `ops` holds the state primitives every layer shares.

pub mod keywords;
pub mod ops;
mod passives;
mod resolver;
mod scripts;

pub use keywords::KeywordOutcome;
pub use passives::refresh_passives;
pub use resolver::{AbilityEngine, Play, Resolution};
pub use scripts::{Script, ScriptRegistry};

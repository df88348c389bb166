//! Core match types: seats, RNG, configuration, actions and match state.
//!
//! Everything the rules, ability and CPU layers share lives here. The
//! match is one [`MatchState`] value passed into and returned from every
//! operation.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use player::{PlayerId, Seats};
pub use rng::{GameRng, GameRngState};
pub use config::MatchConfig;
pub use action::{Action, ActionPayload, ActionRecord};
pub use state::{LocationRef, MatchState, Passives, Phase, PlayerState, PlayerStats, ShowdownReport, TableFlags};

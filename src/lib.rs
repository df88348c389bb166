//! # river-of-ruin
//!
//! Rules engine for a two-player hybrid of Texas Hold'em and a trading card
//! game. Players bet points on a shared community board while playing cards
//! whose keywords bend the rules of the round.
//!
//! ## Design Principles
//!
//! 1. **Atomic actions**: `RulesEngine::process` works on a copy of the
//!    state. An action either applies in full or is rejected with an
//!    [`ActionError`] and the original state is untouched.
//!
//! 2. **Cheap copies**: decks, discard piles, the river and the log use
//!    `im` persistent vectors so cloning a `MatchState` per action is cheap.
//!
//! 3. **Seeded randomness**: every shuffle and CPU roll comes from a
//!    ChaCha8 [`GameRng`], so a seed replays a match exactly.
//!
//! ## Modules
//!
//! - `core`: players, RNG, configuration, actions, match state
//! - `cards`: poker faces, card definitions, abilities, the catalog
//! - `hand`: Hand Evaluator
//! - `effects`: Ability Resolution Engine
//! - `triggers`: trap conditions and timed effects
//! - `rules`: Round State Machine
//! - `ai`: CPU Decision Engine

pub mod ai;
pub mod cards;
pub mod core;
pub mod effects;
pub mod hand;
pub mod rules;
pub mod triggers;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionPayload, ActionRecord, GameRng, GameRngState, MatchConfig, MatchState, Phase, PlayerId,
    PlayerState, Seats,
};

pub use crate::cards::{
    standard_catalog, Ability, CardCategory, CardDefinition, CardId, CardInstance, CardRegistry, Keyword, PokerCard,
    Rank, Rarity, Suit,
};

pub use crate::hand::{compare_hands, evaluate, Evaluation, HandCategory, HandValue};

pub use crate::effects::{AbilityEngine, ScriptRegistry};

pub use crate::triggers::{ArmedTrap, TableEvent, TimedEffect, TrapCondition};

pub use crate::rules::{ActionError, GameResult, RoundEngine, RulesEngine};

pub use crate::ai::{play_out, Controller, HeuristicCpu, RandomCpu};

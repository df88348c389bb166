//! CPU Decision Engine.
//!
//! A `Controller` picks one action for the seat it is asked about. The
//! Round State Machine treats its choice exactly like a human's: it goes
//! through `RulesEngine::process` and may be rejected.
//!
//! - [`HeuristicCpu`]: strength, pot odds and card scoring
//! - [`RandomCpu`]: uniform over legal actions, for fuzzing and baselines
//! - [`play_out`]: drive a match between two controllers

mod heuristic;
pub mod strength;

use log::{debug, info};

use crate::core::{Action, GameRng, MatchState, PlayerId, Seats};
use crate::rules::{RoundEngine, RulesEngine};

pub use heuristic::{keep_value, wants_mulligan, HeuristicCpu};
pub use strength::{estimate, Strength};

/// Chooses actions for a seat.
pub trait Controller {
    /// One action for `player` in `state`.
    fn decide(&mut self, engine: &RoundEngine, state: &MatchState, player: PlayerId) -> Action;

    fn name(&self) -> &str;
}

/// Uniform random choice among legal actions.
#[derive(Clone, Debug)]
pub struct RandomCpu {
    rng: GameRng,
}

impl RandomCpu {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { rng: GameRng::new(seed) }
    }
}

impl Controller for RandomCpu {
    fn decide(&mut self, engine: &RoundEngine, state: &MatchState, player: PlayerId) -> Action {
        let actions = engine.legal_actions(state, player);
        match self.rng.choose(&actions) {
            Some(action) => action.clone(),
            None if state.to_call(player) > 0 => Action::Fold,
            None => Action::Check,
        }
    }

    fn name(&self) -> &str {
        "RandomCpu"
    }
}

/// Where a driven match stopped.
#[derive(Clone, Debug)]
pub struct PlayOut {
    pub state: MatchState,
    /// Actions the engine accepted.
    pub actions: usize,
    /// Controller choices the engine rejected.
    pub rejected: usize,
}

/// Play `state` forward until the match ends or `max_actions` are taken.
///
/// A rejected choice is replaced by the first legal action so the match
/// keeps moving.
pub fn play_out(
    engine: &RoundEngine,
    mut state: MatchState,
    controllers: &mut Seats<Box<dyn Controller>>,
    max_actions: usize,
) -> PlayOut {
    let mut actions = 0;
    let mut rejected = 0;

    while !state.is_over() && actions < max_actions {
        let player = state.active;
        let action = controllers[player].decide(engine, &state, player);
        match engine.process(&state, player, &action) {
            Ok(next) => state = next,
            Err(reason) => {
                rejected += 1;
                debug!("{} chose {} for {}: {}", controllers[player].name(), action.name(), player, reason);
                let Some(fallback) = engine.legal_actions(&state, player).into_iter().next() else {
                    break;
                };
                state = engine.apply(state, player, &fallback);
            }
        }
        actions += 1;
    }

    info!(
        "play-out stopped after {} actions in round {}: {:?}",
        actions, state.round, state.result
    );
    PlayOut { state, actions, rejected }
}

//! Rules engine trait and the Round State Machine.
//!
//! `RulesEngine` is the seam every controller talks to:
//! - What actions a player could take (`candidate_actions`)
//! - How an action changes the match (`process`)
//! - Whether the match is over (`is_terminal`)
//!
//! `process` never touches its input. It works on a copy and hands back
//! either the next state or the reason for rejection, so a rejected action
//! leaves the caller's state exactly as it was.

use std::sync::Arc;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::cards::{standard_catalog, CardInstance, CardRegistry};
use crate::core::{Action, ActionRecord, GameRng, MatchConfig, MatchState, Phase, PlayerId, Seats};
use crate::effects::{AbilityEngine, ScriptRegistry};

use super::error::ActionError;

/// Result of a completed match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Both players knocked out at once.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `candidate_actions`: may include actions `process` would reject
/// - `process`: must not mutate its input
/// - `is_terminal`: `None` while the match continues
pub trait RulesEngine {
    /// Every action shape worth trying for `player` right now.
    fn candidate_actions(&self, state: &MatchState, player: PlayerId) -> Vec<Action>;

    /// Validate and apply an action to a copy of `state`.
    fn process(&self, state: &MatchState, player: PlayerId, action: &Action) -> Result<MatchState, ActionError>;

    // === Convenience Methods ===

    /// Apply an action, silently keeping `state` when it is rejected.
    fn apply(&self, state: MatchState, player: PlayerId, action: &Action) -> MatchState {
        match self.process(&state, player, action) {
            Ok(next) => next,
            Err(reason) => {
                debug!("rejected {} from {}: {}", action.name(), player, reason);
                state
            }
        }
    }

    fn is_legal(&self, state: &MatchState, player: PlayerId, action: &Action) -> bool {
        self.process(state, player, action).is_ok()
    }

    /// Candidates that `process` accepts.
    fn legal_actions(&self, state: &MatchState, player: PlayerId) -> Vec<Action> {
        self.candidate_actions(state, player)
            .into_iter()
            .filter(|action| self.is_legal(state, player, action))
            .collect()
    }

    fn is_terminal(&self, state: &MatchState) -> Option<GameResult> {
        state.result
    }
}

/// The River of Ruin round state machine.
///
/// ## Example
///
/// ```
/// use river_of_ruin::core::{Action, MatchConfig, Phase};
/// use river_of_ruin::rules::{RoundEngine, RulesEngine};
///
/// let engine = RoundEngine::standard();
/// let state = engine.standard_match(MatchConfig::default(), 42);
/// assert_eq!(state.phase, Phase::Mulligan);
/// assert_eq!(state.pot, 2);
///
/// let first = state.active;
/// let state = engine.apply(state, first, &Action::KeepHand);
/// let state = engine.apply(state, first.opponent(), &Action::KeepHand);
/// assert_eq!(state.phase, Phase::PreFlop);
/// ```
#[derive(Clone, Debug)]
pub struct RoundEngine {
    registry: Arc<CardRegistry>,
    scripts: ScriptRegistry,
}

impl RoundEngine {
    /// An engine over `registry` with the standard card scripts.
    #[must_use]
    pub fn new(registry: Arc<CardRegistry>) -> Self {
        Self {
            registry,
            scripts: ScriptRegistry::standard(),
        }
    }

    /// An engine over the standard catalog.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(Arc::new(standard_catalog()))
    }

    /// Replace the card scripts (builder pattern).
    #[must_use]
    pub fn with_scripts(mut self, scripts: ScriptRegistry) -> Self {
        self.scripts = scripts;
        self
    }

    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    pub(crate) fn abilities(&self) -> AbilityEngine<'_> {
        AbilityEngine::new(&self.registry, &self.scripts)
    }

    /// Start a match with the given card pools and deal round one.
    #[must_use]
    pub fn new_match(&self, config: MatchConfig, pools: Seats<Vec<CardInstance>>, rng: GameRng) -> MatchState {
        let mut state = MatchState::new(config, pools, rng);
        self.start_round(&mut state);
        state
    }

    /// Start a seeded match where both players use the whole catalog.
    #[must_use]
    pub fn standard_match(&self, config: MatchConfig, seed: u64) -> MatchState {
        let pool = self.registry.full_pool();
        self.new_match(config, Seats::with_value(pool), GameRng::new(seed))
    }

    fn dispatch(&self, state: &mut MatchState, player: PlayerId, action: &Action) -> Result<(), ActionError> {
        match action {
            Action::KeepHand => self.decide_mulligan(state, player, false),
            Action::Mulligan => self.decide_mulligan(state, player, true),
            Action::NextRound => self.next_round(state),
            Action::Check => self.check(state, player),
            Action::Bet { amount } => self.bet(state, player, *amount),
            Action::Call => self.call(state, player),
            Action::Raise { amount } => self.raise(state, player, *amount),
            Action::Fold => self.fold(state, player),
            Action::PlayCard { card_index, overload } => self.play_card(state, player, *card_index, *overload),
            Action::Discard { card_index } => self.discard(state, player, *card_index),
            Action::Cycle { card_index } => self.cycle(state, player, *card_index),
            Action::Peek => self.peek(state, player),
            Action::UseCharge { card_id } => self.use_charge(state, player, *card_id),
            Action::Scrap { card_id } => self.scrap(state, player, *card_id),
            Action::Imbue { card_id } => self.imbue(state, player, *card_id),
        }
    }

    /// Street actions belong to the active player only.
    pub(crate) fn require_turn(state: &MatchState, player: PlayerId) -> Result<(), ActionError> {
        if !state.phase.is_street() {
            return Err(ActionError::WrongPhase(state.phase));
        }
        if state.active != player {
            return Err(ActionError::OutOfTurn);
        }
        Ok(())
    }
}

impl RulesEngine for RoundEngine {
    fn candidate_actions(&self, state: &MatchState, player: PlayerId) -> Vec<Action> {
        match state.phase {
            Phase::Mulligan => vec![Action::KeepHand, Action::Mulligan],
            Phase::EndRound => vec![Action::NextRound],
            phase if phase.is_street() => self.street_candidates(state, player),
            _ => Vec::new(),
        }
    }

    fn process(&self, state: &MatchState, player: PlayerId, action: &Action) -> Result<MatchState, ActionError> {
        if state.is_over() {
            return Err(ActionError::MatchOver);
        }
        let mut next = state.clone();
        self.dispatch(&mut next, player, action)?;

        next.sequence += 1;
        let record = ActionRecord::new(player, action.clone(), next.round, next.sequence);
        next.history.push_back(record);
        trace!("{} {} -> {}", player, action.name(), next.phase);
        Ok(next)
    }
}

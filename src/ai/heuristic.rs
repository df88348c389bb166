//! Heuristic CPU opponent.
//!
//! ## Strategy
//!
//! Every legal action gets a score and the highest one is played:
//! - Fold and call compare pot odds with strength. The strength is adjusted
//!   for a Sanctuary, the opponent's VPIP and how short each stack is.
//! - Bet and check follow strength tiers, with a per-decision roll for
//!   slow-playing a monster and one for bluffing with air.
//! - Card plays are scored from the card's keywords and the board, with
//!   overrides for cards whose scripts need a particular situation.
//!
//! Each score carries a little random noise so the CPU does not settle into
//! one exploitable line. Seed it for reproducible matches.

use log::trace;

use crate::cards::catalog::ids;
use crate::cards::{CardCategory, CardDefinition, CardRegistry, Keyword, Rank, Suit};
use crate::core::{Action, GameRng, MatchState, Phase, PlayerId, PlayerState};
use crate::hand::HandCategory;
use crate::rules::{RoundEngine, RulesEngine};

use super::strength::estimate;
use super::Controller;

/// What the CPU knows going into one decision.
struct Read<'a> {
    state: &'a MatchState,
    player: PlayerId,
    /// Strength after opponent modelling.
    strength: f64,
    made: f64,
    drawing: bool,
    to_call: i64,
    pot_odds: f64,
    slow_play: bool,
    bluff: bool,
    aggression: f64,
    desperate: bool,
}

impl Read<'_> {
    fn seat(&self) -> &PlayerState {
        &self.state.players[self.player]
    }

    fn opponent(&self) -> &PlayerState {
        &self.state.players[self.player.opponent()]
    }
}

/// Keep-or-redraw: mulligan a hand with nothing playable or three
/// cards costing more than 4.
#[must_use]
pub fn wants_mulligan(registry: &CardRegistry, seat: &PlayerState) -> bool {
    if seat.hand.is_empty() {
        return false;
    }
    let defs: Vec<&CardDefinition> = seat.hand.iter().filter_map(|c| registry.get(c.card_id)).collect();
    let playable = defs.iter().filter(|d| d.is_playable()).count();
    let expensive = defs.iter().filter(|d| d.cost() > 4).count();
    playable == 0 || expensive >= 3
}

/// How much a card is worth keeping: rarity, cost and ability count.
#[must_use]
pub fn keep_value(def: &CardDefinition) -> i64 {
    (def.rarity.weight() + 1) * 2 + def.cost() + def.abilities.len() as i64 * 3
}

/// Rule-based CPU player.
///
/// ## Example
///
/// ```
/// use river_of_ruin::ai::{Controller, HeuristicCpu};
/// use river_of_ruin::core::MatchConfig;
/// use river_of_ruin::rules::{RoundEngine, RulesEngine};
///
/// let engine = RoundEngine::standard();
/// let state = engine.standard_match(MatchConfig::default(), 3);
/// let mut cpu = HeuristicCpu::new(11);
///
/// let action = cpu.decide(&engine, &state, state.active);
/// assert!(engine.is_legal(&state, state.active, &action));
/// ```
#[derive(Clone, Debug)]
pub struct HeuristicCpu {
    rng: GameRng,
    noise: f64,
}

impl HeuristicCpu {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::from_rng(GameRng::new(seed))
    }

    #[must_use]
    pub fn from_rng(rng: GameRng) -> Self {
        Self { rng, noise: 0.1 }
    }

    /// A CPU whose stream derives from the match seed and its seat.
    #[must_use]
    pub fn for_seat(state: &MatchState, player: PlayerId) -> Self {
        Self::from_rng(state.rng.for_context(&format!("cpu-{}", player.index())))
    }

    /// Width of the random noise added to each score (builder pattern).
    #[must_use]
    pub fn with_noise(mut self, noise: f64) -> Self {
        self.noise = noise.max(0.0);
        self
    }

    fn read<'a>(&mut self, state: &'a MatchState, player: PlayerId) -> Read<'a> {
        let opponent = player.opponent();
        let threshold = state.config.last_stand_threshold;
        let estimate_own = estimate(state, player);
        let mut strength = estimate_own.effective();

        // Revealed hole cards turn the guess into a comparison.
        if state.table.clarity {
            let theirs = estimate(state, opponent).effective();
            strength = (0.5 + strength - theirs).clamp(0.0, 1.0);
        }

        let to_call = state.to_call(player);
        let pot_odds = if to_call > 0 {
            to_call as f64 / (state.pot + to_call) as f64
        } else {
            0.0
        };

        let mut adjustment = 0.0;
        if state.table.sanctuary {
            adjustment += 0.2;
        }
        let stats = &state.players[opponent].stats;
        if stats.rounds > 5 {
            match stats.vpip() {
                Some(v) if v > 0.7 => adjustment += 0.1,
                Some(v) if v < 0.3 => adjustment -= 0.1,
                _ => {}
            }
        }
        // A short opponent may be holding Last Stand.
        if state.players[opponent].points <= threshold && state.phase != Phase::PreFlop {
            adjustment -= 0.15;
        }
        let desperate = state.players[player].points <= threshold;
        if desperate {
            adjustment += 0.1;
        }

        Read {
            state,
            player,
            strength: (strength + adjustment).clamp(0.0, 1.0),
            made: estimate_own.made,
            drawing: estimate_own.is_drawing(),
            to_call,
            pot_odds,
            slow_play: self.rng.gen_bool(0.25),
            bluff: self.rng.gen_bool(0.15),
            aggression: self.rng.gen_unit(),
            desperate,
        }
    }

    fn score(&mut self, registry: &CardRegistry, read: &Read<'_>, action: &Action) -> f64 {
        let base = match action {
            Action::Fold => score_fold(read),
            Action::Check => score_check(read),
            Action::Call => score_call(read),
            Action::Bet { amount } => score_bet(read, *amount),
            Action::Raise { amount } => score_raise(read, *amount),
            Action::PlayCard { card_index, overload } => score_play(registry, read, *card_index, *overload),
            Action::Discard { card_index } => score_discard(registry, read, *card_index),
            Action::Cycle { card_index } => score_cycle(registry, read, *card_index),
            Action::Peek => {
                if read.state.community.len() < 5 {
                    0.65
                } else {
                    -1.0
                }
            }
            Action::UseCharge { .. } => 0.6,
            Action::Scrap { .. } => {
                if read.seat().hand.len() <= 1 {
                    0.55
                } else {
                    0.1
                }
            }
            Action::Imbue { .. } => {
                if read.seat().points <= read.state.config.last_stand_threshold + 2 {
                    0.6
                } else {
                    0.2
                }
            }
            Action::KeepHand | Action::Mulligan | Action::NextRound => 0.0,
        };
        base + (self.rng.gen_unit() - 0.5) * self.noise
    }

    fn street_action(&mut self, engine: &RoundEngine, state: &MatchState, player: PlayerId) -> Action {
        let legal = engine.legal_actions(state, player);
        let read = self.read(state, player);

        let mut best: Option<(f64, Action)> = None;
        for action in legal {
            let score = self.score(engine.registry(), &read, &action);
            trace!("cpu {} scores {} at {:.3}", player, action.name(), score);
            if best.as_ref().map_or(true, |(top, _)| score > *top) {
                best = Some((score, action));
            }
        }
        match best {
            Some((score, action)) if score > 0.0 => action,
            _ => fallback(state, player),
        }
    }
}

impl Controller for HeuristicCpu {
    fn decide(&mut self, engine: &RoundEngine, state: &MatchState, player: PlayerId) -> Action {
        match state.phase {
            Phase::Mulligan => {
                if wants_mulligan(engine.registry(), &state.players[player]) {
                    Action::Mulligan
                } else {
                    Action::KeepHand
                }
            }
            Phase::EndRound => Action::NextRound,
            _ => self.street_action(engine, state, player),
        }
    }

    fn name(&self) -> &str {
        "HeuristicCpu"
    }
}

/// Fold when facing a bet, otherwise check.
fn fallback(state: &MatchState, player: PlayerId) -> Action {
    if state.to_call(player) > 0 {
        Action::Fold
    } else {
        Action::Check
    }
}

fn is_strong(read: &Read<'_>) -> bool {
    read.strength >= 0.7
}

fn stack_fraction(read: &Read<'_>, amount: i64) -> f64 {
    (amount as f64 / read.state.pot.max(1) as f64).min(2.0)
}

fn all_in_penalty(read: &Read<'_>, total: i64) -> f64 {
    if total < read.seat().points {
        0.0
    } else if read.strength >= 0.85 || (read.desperate && read.strength >= 0.5) {
        0.1
    } else {
        -0.3
    }
}

fn score_fold(read: &Read<'_>) -> f64 {
    if read.to_call == 0 {
        return -1.0;
    }
    // Re-raised over our own bet: get out unless very strong or drawing.
    let reraised = read.seat().street_bet > 0 && read.state.last_bettor == Some(read.player.opponent());
    let very_strong = read.made >= HandCategory::Straight.normalized();
    if reraised && !very_strong && !read.drawing {
        0.9
    } else {
        0.5
    }
}

fn score_call(read: &Read<'_>) -> f64 {
    0.5 + read.strength - read.pot_odds + all_in_penalty(read, read.to_call)
}

fn score_check(read: &Read<'_>) -> f64 {
    if read.to_call > 0 {
        return -1.0;
    }
    if is_strong(read) {
        if read.slow_play {
            0.8
        } else {
            0.3
        }
    } else if read.strength >= 0.45 {
        0.5
    } else if read.bluff {
        0.3
    } else {
        0.55
    }
}

fn score_bet(read: &Read<'_>, amount: i64) -> f64 {
    let fraction = stack_fraction(read, amount);
    let base = if is_strong(read) {
        if read.slow_play {
            0.4
        } else {
            0.65 + 0.15 * fraction.min(1.0)
        }
    } else if read.strength >= 0.45 {
        0.45 - 0.1 * fraction
    } else if read.bluff {
        0.6 + 0.1 * fraction.min(1.0)
    } else {
        0.1
    };
    base + all_in_penalty(read, amount)
}

fn score_raise(read: &Read<'_>, amount: i64) -> f64 {
    let fraction = stack_fraction(read, amount);
    let base = if read.strength >= 0.75 {
        0.7 + 0.2 * read.strength - 0.05 * fraction
    } else if read.bluff && read.aggression > 0.7 {
        0.55
    } else {
        0.2
    };
    base + all_in_penalty(read, read.to_call + amount)
}

fn score_play(registry: &CardRegistry, read: &Read<'_>, index: usize, overload: bool) -> f64 {
    let seat = read.seat();
    let Some(def) = seat.hand.get(index).and_then(|c| registry.get(c.card_id)) else {
        return -1.0;
    };
    let opponent = read.opponent();

    let mut score = match def.id {
        ids::LAST_PLATING => {
            if read.made >= HandCategory::FullHouse.normalized() {
                0.95
            } else {
                -1.0
            }
        }
        ids::LAST_TRANSMISSION => {
            let top = seat.hole_faces().map(|f| f.rank).max();
            if top.is_some_and(|r| r >= Rank::Queen) {
                0.6
            } else {
                -1.0
            }
        }
        ids::SOLAR_FLARE => {
            let damage = if overload { 5 } else { 2 };
            if opponent.points <= damage {
                1.0
            } else {
                0.45
            }
        }
        ids::ECHOES_IN_THE_VOID if opponent.points <= 2 => 1.0,
        ids::THE_HUNGER => 0.3 + 0.07 * opponent.hand.len() as f64,
        ids::SINGULARITY_OF_FEAR => {
            if opponent.points >= 6 {
                0.7
            } else {
                0.2
            }
        }
        ids::ETERNAL_ECLIPSE => {
            let spades = seat.hole_faces().filter(|f| f.suit == Suit::Spades).count();
            0.35 + 0.15 * spades as f64
        }
        _ => keyword_score(registry, read, def),
    };

    // Already lethal at the plain price.
    if overload && score < 1.0 {
        score += 0.05;
    }
    let cost = if overload { def.overload_cost().unwrap_or(0) } else { def.cost() };
    // Keep enough mana for a couple of betting actions.
    if seat.mana - cost < read.state.config.betting_mana_cost * 2 {
        score -= 0.15;
    }
    score
}

fn keyword_score(registry: &CardRegistry, read: &Read<'_>, def: &CardDefinition) -> f64 {
    let seat = read.seat();
    if def.has(Keyword::Trap) {
        return if seat.trap.is_some() { -1.0 } else { 0.5 };
    }
    if def.has(Keyword::Chrono) {
        return 0.55;
    }
    if def.has(Keyword::Cascade) {
        return 0.5;
    }
    if def.has(Keyword::Recall) {
        let units = seat
            .discard
            .iter()
            .filter_map(|c| registry.get(c.card_id))
            .any(|d| d.category == CardCategory::Unit);
        return if units { 0.3 } else { -1.0 };
    }
    if def.has(Keyword::Fate) {
        return 0.4;
    }
    match def.category {
        CardCategory::Location => {
            let ours = read.state.location.is_some_and(|l| l.owner == read.player);
            if ours {
                0.1
            } else if def.has(Keyword::Sanctuary) && read.strength < 0.4 {
                0.55
            } else if def.has(Keyword::HighStakes) && is_strong(read) {
                0.55
            } else {
                0.4
            }
        }
        CardCategory::Artifact => 0.45,
        _ => 0.35,
    }
}

fn score_discard(registry: &CardRegistry, read: &Read<'_>, index: usize) -> f64 {
    if read.aggression <= 0.4 || read.to_call > 0 {
        return -1.0;
    }
    let seat = read.seat();
    let unplayable: Vec<(usize, i64)> = seat
        .hand
        .iter()
        .enumerate()
        .filter_map(|(i, c)| registry.get(c.card_id).map(|d| (i, d)))
        .filter(|(_, d)| d.cost() > seat.mana)
        .map(|(i, d)| (i, keep_value(d)))
        .collect();
    let worst = unplayable.iter().min_by_key(|(_, value)| *value).map(|(i, _)| *i);
    if worst == Some(index) {
        0.7
    } else {
        -1.0
    }
}

fn score_cycle(registry: &CardRegistry, read: &Read<'_>, index: usize) -> f64 {
    let seat = read.seat();
    let Some(def) = seat.hand.get(index).and_then(|c| registry.get(c.card_id)) else {
        return -1.0;
    };
    let spare = seat.mana - read.state.config.cycle_cost;
    if spare >= 3 && (!def.is_playable() || def.cost() > spare) {
        0.3 - keep_value(def) as f64 / 100.0
    } else {
        -1.0
    }
}

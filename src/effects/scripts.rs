//! Card-identity scripts.
//!
//! Several cards do something no keyword expresses. Their logic lives in a
//! table from card id to a plain function, one table per hook:
//!
//! - `on_play` runs after the keyword pass when the card resolves
//! - `on_tick` runs each time the card's Chrono effect ticks
//! - `on_trap` runs when the card's trap springs
//!
//! Adding a card means registering a function; nothing else changes.
//!
//! ```
//! use river_of_ruin::cards::CardId;
//! use river_of_ruin::effects::{ops, ScriptRegistry};
//!
//! let scripts = ScriptRegistry::new().with_play(CardId::new(900), |res, play| {
//!     ops::gain_mana(res.state, play.player, 4);
//! });
//! assert!(scripts.on_play(CardId::new(900)).is_some());
//! assert!(scripts.on_tick(CardId::new(900)).is_none());
//! ```

use rustc_hash::FxHashMap;

use crate::cards::catalog::ids;
use crate::cards::CardId;
use crate::core::PlayerId;

use super::ops::{drain_mana, gain_mana, inflict_points};
use super::resolver::{Play, Resolution};

/// A card-identity hook.
pub type Script = fn(&mut Resolution<'_>, &Play);

/// Per-card-id script tables.
#[derive(Clone, Default)]
pub struct ScriptRegistry {
    on_play: FxHashMap<CardId, Script>,
    on_tick: FxHashMap<CardId, Script>,
    on_trap: FxHashMap<CardId, Script>,
}

impl ScriptRegistry {
    /// An empty registry: every card is keywords only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts for the standard catalog.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with_play(ids::ECHOES_IN_THE_VOID, echoes_in_the_void)
            .with_play(ids::SOLAR_FLARE, solar_flare)
            .with_play(ids::THE_COLD, the_cold)
            .with_play(ids::THE_HUNGER, the_hunger)
            .with_play(ids::LAST_TRANSMISSION, last_transmission)
            .with_play(ids::SINGULARITY_OF_FEAR, singularity_of_fear)
            .with_play(ids::ETERNAL_ECLIPSE, eternal_eclipse)
            .with_play(ids::LAST_PLATING, last_plating)
            .with_tick(ids::SHIPS_LAST_BREATH, ships_last_breath)
            .with_tick(ids::MASK_OF_MIDNIGHT_WINGS, mask_of_midnight_wings)
            .with_trap(ids::UNSEEN_ENTITIES, unseen_entities)
            .with_trap(ids::FINAL_BROADCAST, final_broadcast)
    }

    #[must_use]
    pub fn with_play(mut self, card: CardId, script: Script) -> Self {
        self.on_play.insert(card, script);
        self
    }

    #[must_use]
    pub fn with_tick(mut self, card: CardId, script: Script) -> Self {
        self.on_tick.insert(card, script);
        self
    }

    #[must_use]
    pub fn with_trap(mut self, card: CardId, script: Script) -> Self {
        self.on_trap.insert(card, script);
        self
    }

    #[must_use]
    pub fn on_play(&self, card: CardId) -> Option<Script> {
        self.on_play.get(&card).copied()
    }

    #[must_use]
    pub fn on_tick(&self, card: CardId) -> Option<Script> {
        self.on_tick.get(&card).copied()
    }

    #[must_use]
    pub fn on_trap(&self, card: CardId) -> Option<Script> {
        self.on_trap.get(&card).copied()
    }
}

impl std::fmt::Debug for ScriptRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptRegistry")
            .field("on_play", &self.on_play.len())
            .field("on_tick", &self.on_tick.len())
            .field("on_trap", &self.on_trap.len())
            .finish()
    }
}

fn echoes_in_the_void(res: &mut Resolution<'_>, play: &Play) {
    inflict_points(res.state, play.player, play.opponent(), 1);
}

fn the_cold(res: &mut Resolution<'_>, play: &Play) {
    drain_mana(res.state, play.player, play.opponent(), 1);
}

fn solar_flare(res: &mut Resolution<'_>, play: &Play) {
    let damage = if play.overloaded { 5 } else { 2 };
    res.state.log(format!("Solar Flare erupts for {}.", damage));
    inflict_points(res.state, play.player, play.opponent(), damage);
}

fn the_hunger(res: &mut Resolution<'_>, play: &Play) {
    let hunger = res.state.players[play.opponent()].hand.len() as i64;
    res.state.log(format!("The Hunger feeds on {} card(s).", hunger));
    inflict_points(res.state, play.player, play.opponent(), hunger);
}

/// Higher hole card wins five points from the other player.
fn last_transmission(res: &mut Resolution<'_>, play: &Play) {
    let high = |p: PlayerId| res.state.players[p].hole_faces().map(|f| f.rank).max();
    let (mine, theirs) = (high(play.player), high(play.opponent()));
    match mine.cmp(&theirs) {
        std::cmp::Ordering::Greater => {
            res.state.log(format!("{}'s transmission gets through.", play.player));
            inflict_points(res.state, play.player, play.opponent(), 5);
        }
        std::cmp::Ordering::Less => {
            res.state.log(format!("{}'s transmission is lost.", play.player));
            inflict_points(res.state, play.player, play.player, 5);
        }
        std::cmp::Ordering::Equal => res.state.log("The transmission fades into static."),
    }
}

fn singularity_of_fear(res: &mut Resolution<'_>, play: &Play) {
    let target = play.opponent();
    let points = res.state.players[target].points;
    if play.overloaded {
        if points > 1 {
            res.state.players[target].points = 1;
            res.state.log(format!("The singularity sets {}'s points to 1!", target));
        }
    } else {
        inflict_points(res.state, play.player, target, points / 2);
    }
}

fn eternal_eclipse(res: &mut Resolution<'_>, play: &Play) {
    res.state.spades_round = true;
    res.state.players[play.opponent()].card_play_locked = true;
    res.state.log(format!(
        "The eclipse turns the community to Spades; {} cannot play cards next turn.",
        play.opponent()
    ));
}

fn last_plating(res: &mut Resolution<'_>, play: &Play) {
    res.state.players[play.player].wager_committed = true;
    res.state.log(format!("{} stakes everything on this showdown.", play.player));
}

fn ships_last_breath(res: &mut Resolution<'_>, play: &Play) {
    inflict_points(res.state, play.player, play.opponent(), 1);
}

/// Play the top card of the deck for free, or discard it if unplayable.
fn mask_of_midnight_wings(res: &mut Resolution<'_>, play: &Play) {
    let Some(top) = res.state.players[play.player].deck.pop_front() else {
        return;
    };
    let name = res.name(top.card_id);
    if res.definition(top.card_id).is_some_and(|d| d.is_playable()) {
        res.state.log(format!("The Mask plays {} for free.", name));
        res.enqueue(Play::new(play.player, top).at_depth(play.depth + 1));
    } else {
        res.state.log(format!("The Mask discards {}.", name));
        res.state.players[play.player].discard.push_back(top);
    }
}

fn unseen_entities(res: &mut Resolution<'_>, play: &Play) {
    gain_mana(res.state, play.player, 2);
}

fn final_broadcast(res: &mut Resolution<'_>, play: &Play) {
    let pot = res.state.pot;
    gain_mana(res.state, play.player, pot);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{standard_catalog, CardInstance, PokerCard, Rank, Suit};
    use crate::core::{GameRng, MatchConfig, MatchState, Seats};
    use crate::effects::AbilityEngine;

    fn play(state: &mut MatchState, card: CardId, overloaded: bool) {
        let registry = standard_catalog();
        let scripts = ScriptRegistry::standard();
        AbilityEngine::new(&registry, &scripts).resolve(state, PlayerId::ONE, CardInstance::new(card), overloaded);
    }

    fn state() -> MatchState {
        MatchState::new(MatchConfig::default(), Seats::default(), GameRng::new(4))
    }

    #[test]
    fn test_twin_doubles_echoes() {
        let mut state = state();
        play(&mut state, ids::ECHOES_IN_THE_VOID, false);
        assert_eq!(state.players[PlayerId::TWO].points, 8);
    }

    #[test]
    fn test_singularity_halves_or_sets_to_one() {
        let mut state = state();
        state.players[PlayerId::TWO].points = 9;
        play(&mut state, ids::SINGULARITY_OF_FEAR, false);
        assert_eq!(state.players[PlayerId::TWO].points, 5);

        state.players[PlayerId::TWO].passives.bulwark = true;
        play(&mut state, ids::SINGULARITY_OF_FEAR, true);
        assert_eq!(state.players[PlayerId::TWO].points, 1);
    }

    #[test]
    fn test_last_transmission_compares_hole_cards() {
        let mut state = state();
        let face = |r| CardInstance::new(CardId::new(3)).with_face(PokerCard::new(r, Suit::Hearts));
        state.players[PlayerId::ONE].hole.push(face(Rank::Queen));
        state.players[PlayerId::TWO].hole.push(face(Rank::King));
        play(&mut state, ids::LAST_TRANSMISSION, false);
        assert_eq!(state.players[PlayerId::ONE].points, 5);
        assert_eq!(state.players[PlayerId::TWO].points, 10);
    }

    #[test]
    fn test_hunger_counts_opponent_hand() {
        let mut state = state();
        for id in [1, 2, 4] {
            state.players[PlayerId::TWO].hand.push(CardInstance::new(CardId::new(id)));
        }
        play(&mut state, ids::THE_HUNGER, false);
        assert_eq!(state.players[PlayerId::TWO].points, 7);
    }

    #[test]
    fn test_eclipse_locks_opponent() {
        let mut state = state();
        play(&mut state, ids::ETERNAL_ECLIPSE, false);
        assert!(state.spades_round);
        assert!(state.players[PlayerId::TWO].card_play_locked);
        assert!(!state.players[PlayerId::ONE].card_play_locked);
    }

    #[test]
    fn test_mask_plays_top_card() {
        let registry = standard_catalog();
        let scripts = ScriptRegistry::standard();
        let engine = AbilityEngine::new(&registry, &scripts);
        let mut state = state();
        state.players[PlayerId::ONE].deck.push_back(CardInstance::new(ids::SOLAR_FLARE));
        state.players[PlayerId::ONE].deck.push_back(CardInstance::new(CardId::new(3)));
        engine.resolve(&mut state, PlayerId::ONE, CardInstance::new(ids::MASK_OF_MIDNIGHT_WINGS), false);

        engine.tick_chrono(&mut state, PlayerId::ONE);
        assert_eq!(state.players[PlayerId::TWO].points, 8);

        engine.tick_chrono(&mut state, PlayerId::ONE);
        let seat = &state.players[PlayerId::ONE];
        assert!(seat.deck.is_empty());
        assert_eq!(seat.discard.len(), 2);
        assert!(seat.timed.is_empty());
    }
}

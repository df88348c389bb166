//! Ability resolution - playing cards against match state.
//!
//! A played card goes through two passes: the declarative keyword pass
//! ([`super::keywords`]) and then the per-card script, if the
//! [`ScriptRegistry`] has one. Cards put into play by an effect (Cascade,
//! a Chrono tick) are queued rather than resolved recursively, and the
//! queue depth is capped by `cascade_depth_limit`.
//!
//! ## Example
//!
//! ```
//! use river_of_ruin::cards::{standard_catalog, CardId, CardInstance};
//! use river_of_ruin::core::{GameRng, MatchConfig, MatchState, PlayerId, Seats};
//! use river_of_ruin::effects::{AbilityEngine, ScriptRegistry};
//!
//! let registry = standard_catalog();
//! let scripts = ScriptRegistry::standard();
//! let engine = AbilityEngine::new(&registry, &scripts);
//! let mut state = MatchState::new(MatchConfig::default(), Seats::default(), GameRng::new(1));
//!
//! // Solar Flare deals 2.
//! engine.resolve(&mut state, PlayerId::ONE, CardInstance::new(CardId::new(4)), false);
//! assert_eq!(state.players[PlayerId::TWO].points, 8);
//! ```

use std::collections::VecDeque;

use log::debug;

use crate::cards::{Ability, CardCategory, CardDefinition, CardId, CardInstance, CardRegistry, Keyword};
use crate::core::{LocationRef, MatchState, PlayerId};
use crate::triggers::TableEvent;

use super::keywords::{self, KeywordOutcome};
use super::ops::{card_name, check_terminal};
use super::passives::refresh_passives;
use super::scripts::ScriptRegistry;

/// A card being resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Play {
    pub player: PlayerId,
    pub card: CardInstance,
    /// Paid at the Overload price.
    pub overloaded: bool,
    /// How many effects deep this play was triggered.
    pub depth: usize,
}

impl Play {
    #[must_use]
    pub fn new(player: PlayerId, card: CardInstance) -> Self {
        Self {
            player,
            card,
            overloaded: false,
            depth: 0,
        }
    }

    #[must_use]
    pub fn overloaded(mut self, overloaded: bool) -> Self {
        self.overloaded = overloaded;
        self
    }

    #[must_use]
    pub fn at_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    #[must_use]
    pub fn opponent(&self) -> PlayerId {
        self.player.opponent()
    }

    #[must_use]
    pub fn card_id(&self) -> CardId {
        self.card.card_id
    }
}

/// Mutable view handed to keyword handlers and scripts.
pub struct Resolution<'a> {
    pub state: &'a mut MatchState,
    pub registry: &'a CardRegistry,
    queue: VecDeque<Play>,
}

impl<'a> Resolution<'a> {
    pub fn new(state: &'a mut MatchState, registry: &'a CardRegistry) -> Self {
        Self {
            state,
            registry,
            queue: VecDeque::new(),
        }
    }

    /// Definition lookup that outlives borrows of the state.
    #[must_use]
    pub fn definition(&self, card: CardId) -> Option<&'a CardDefinition> {
        self.registry.get(card)
    }

    #[must_use]
    pub fn name(&self, card: CardId) -> &'a str {
        card_name(self.registry, card)
    }

    /// Queue a card to resolve after the current one.
    pub fn enqueue(&mut self, play: Play) {
        self.queue.push_back(play);
    }
}

/// Resolves played cards, Chrono ticks and traps.
#[derive(Clone, Copy)]
pub struct AbilityEngine<'a> {
    registry: &'a CardRegistry,
    scripts: &'a ScriptRegistry,
}

impl<'a> AbilityEngine<'a> {
    #[must_use]
    pub fn new(registry: &'a CardRegistry, scripts: &'a ScriptRegistry) -> Self {
        Self { registry, scripts }
    }

    /// Resolve `card`, already paid for and removed from hand.
    pub fn resolve(&self, state: &mut MatchState, player: PlayerId, card: CardInstance, overloaded: bool) {
        let mut res = Resolution::new(state, self.registry);
        res.enqueue(Play::new(player, card).overloaded(overloaded));
        self.run(&mut res);
    }

    /// Tick `player`'s Chrono effects at the start of their turn.
    pub fn tick_chrono(&self, state: &mut MatchState, player: PlayerId) {
        let effects = std::mem::take(&mut state.players[player].timed);
        if effects.is_empty() {
            return;
        }
        let mut res = Resolution::new(state, self.registry);
        let mut kept = Vec::with_capacity(effects.len());
        for mut effect in effects {
            let name = res.name(effect.card);
            res.state.log(format!("{}'s {} Chrono effect triggers.", player, name));
            if let Some(script) = self.scripts.on_tick(effect.card) {
                script(&mut res, &Play::new(player, CardInstance::new(effect.card)));
            }
            if effect.tick() {
                res.state.log(format!("{}'s Chrono effect has ended.", name));
            } else {
                kept.push(effect);
            }
        }
        let added = std::mem::take(&mut res.state.players[player].timed);
        kept.extend(added);
        res.state.players[player].timed = kept;
        self.run(&mut res);
    }

    /// Spring the trap armed against the actor of `event`, if it matches.
    pub fn spring_traps(&self, state: &mut MatchState, event: TableEvent) {
        let owner = event.actor().opponent();
        let Some(trap) = state.players[owner].trap else {
            return;
        };
        if !trap.springs_on(owner, &event) {
            return;
        }
        let seat = &mut state.players[owner];
        seat.trap = None;
        let held = seat.trap_card.take();

        let mut res = Resolution::new(state, self.registry);
        let name = res.name(trap.card);
        res.state.log(format!("{}'s trap, {}, is triggered!", owner, name));
        debug!("trap {} sprung for {} on {:?}", trap.card, owner, event);
        if let Some(script) = self.scripts.on_trap(trap.card) {
            script(&mut res, &Play::new(owner, CardInstance::new(trap.card)));
        }
        if let Some(card) = held {
            res.state.players[owner].discard.push_back(card);
        }
        self.run(&mut res);
    }

    fn run(&self, res: &mut Resolution<'_>) {
        while let Some(play) = res.queue.pop_front() {
            if res.state.is_over() {
                res.state.players[play.player].discard.push_back(play.card);
                continue;
            }
            self.resolve_one(res, play);
            check_terminal(res.state);
        }
        refresh_passives(res.state, res.registry);
        check_terminal(res.state);
    }

    fn resolve_one(&self, res: &mut Resolution<'_>, play: Play) {
        let Some(def) = res.definition(play.card_id()) else {
            debug!("unknown card {} resolved as a blank", play.card_id());
            res.state.players[play.player].discard.push_back(play.card);
            return;
        };
        debug!("resolving {} for {} (overload: {}, depth: {})", def.name, play.player, play.overloaded, play.depth);

        let outcome = keywords::apply(res, &play, def);

        if let Some(script) = self.scripts.on_play(def.id) {
            let times = if def.has(Keyword::Twin) { 2 } else { 1 };
            if times > 1 {
                res.state.log(format!("{} is twinned!", def.name));
            }
            for _ in 0..times {
                script(res, &play);
                if res.state.is_over() {
                    break;
                }
            }
        }

        route(res, play, def, outcome);
    }
}

/// Move a resolved card to its post-resolution zone.
fn route(res: &mut Resolution<'_>, play: Play, def: &CardDefinition, outcome: KeywordOutcome) {
    let player = play.player;
    let mut card = play.card;

    if outcome.armed_trap {
        let seat = &mut res.state.players[player];
        if let Some(old) = seat.trap_card.replace(card) {
            seat.discard.push_back(old);
        }
        return;
    }

    match def.category {
        CardCategory::Event | CardCategory::Unit => {
            res.state.players[player].discard.push_back(card);
        }
        CardCategory::Artifact => {
            card.charges = def.abilities.iter().find_map(|a| match a {
                Ability::Charge { charges } => Some(*charges),
                _ => None,
            });
            res.state.players[player].artifacts.push(card);
        }
        CardCategory::Location => {
            if let Some(old) = res.state.location.take() {
                let owner = &mut res.state.players[old.owner];
                if let Some(index) = owner.artifact_index(old.card) {
                    let broken = owner.artifacts.remove(index);
                    owner.discard.push_back(broken);
                }
                let name = res.name(old.card);
                res.state.log(format!("{} is replaced.", name));
            }
            res.state.players[player].artifacts.push(card);
            res.state.location = Some(LocationRef { owner: player, card: def.id });
            res.state.log(format!("{} becomes the active Location.", def.name));
        }
    }
}

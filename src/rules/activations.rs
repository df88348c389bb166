//! Card plays and the activations that do not end the turn.
//!
//! Playing a card from hand passes the turn. Everything else here (the
//! once-per-round discard, cycling, Peek, and the artifact activations)
//! leaves the same player to act.

use crate::cards::{Ability, CardId, Keyword};
use crate::core::{Action, MatchState, PlayerId};
use crate::effects::ops::{card_name, discard_from_hand, draw};
use crate::effects::refresh_passives;

use super::engine::RoundEngine;
use super::error::ActionError;

fn require_unlocked(state: &MatchState, player: PlayerId) -> Result<(), ActionError> {
    if state.players[player].card_play_locked {
        Err(ActionError::CardPlayLocked)
    } else {
        Ok(())
    }
}

fn require_mana(state: &MatchState, player: PlayerId, needed: i64) -> Result<(), ActionError> {
    let available = state.players[player].mana;
    if available < needed {
        Err(ActionError::InsufficientMana { needed, available })
    } else {
        Ok(())
    }
}

impl RoundEngine {
    /// Play the hand card at `index`, at its Overload price if asked.
    pub(crate) fn play_card(
        &self,
        state: &mut MatchState,
        player: PlayerId,
        index: usize,
        overload: bool,
    ) -> Result<(), ActionError> {
        Self::require_turn(state, player)?;
        require_unlocked(state, player)?;
        if state.to_call(player) > 0 {
            return Err(ActionError::BetOutstanding);
        }
        let card_id = state.players[player]
            .hand
            .get(index)
            .map(|c| c.card_id)
            .ok_or(ActionError::NoSuchCard)?;
        let def = self.registry().get(card_id).ok_or(ActionError::NoSuchCard)?;
        if !def.is_playable() {
            return Err(ActionError::NotPlayable);
        }
        let cost = if overload {
            def.overload_cost().ok_or(ActionError::NoAbility)?
        } else {
            def.cost()
        };
        require_mana(state, player, cost)?;

        let card = state.players[player].hand.remove(index);
        state.players[player].mana -= cost;
        if overload {
            state.log(format!("{} plays {} with Overload!", player, def.name));
        } else {
            state.log(format!("{} plays {}.", player, def.name));
        }
        state.players[player].stats.voluntary_this_round = true;

        self.abilities().resolve(state, player, card, overload);
        if state.is_over() {
            return Ok(());
        }

        state.players[player].has_acted = true;
        state.players[player.opponent()].has_acted = false;
        state.players[player].card_play_locked = false;
        self.pass_turn(state);
        Ok(())
    }

    /// Once per round with nothing owed: discard a hand card and draw.
    pub(crate) fn discard(&self, state: &mut MatchState, player: PlayerId, index: usize) -> Result<(), ActionError> {
        Self::require_turn(state, player)?;
        if state.players[player].has_discarded {
            return Err(ActionError::AlreadyUsed);
        }
        if state.to_call(player) > 0 {
            return Err(ActionError::BetOutstanding);
        }
        let card = discard_from_hand(state, player, index).ok_or(ActionError::NoSuchCard)?;
        state.players[player].has_discarded = true;
        let name = card_name(self.registry(), card).to_owned();
        state.log(format!("{} discards {}.", player, name));
        draw(state, player, 1);
        Ok(())
    }

    /// Pay `cycle_cost` mana to swap a hand card for the top of the deck.
    pub(crate) fn cycle(&self, state: &mut MatchState, player: PlayerId, index: usize) -> Result<(), ActionError> {
        Self::require_turn(state, player)?;
        if index >= state.players[player].hand.len() {
            return Err(ActionError::NoSuchCard);
        }
        let cost = state.config.cycle_cost;
        require_mana(state, player, cost)?;
        if state.players[player].deck.is_empty() {
            return Err(ActionError::EmptyDeck);
        }

        state.players[player].mana -= cost;
        let card = discard_from_hand(state, player, index).ok_or(ActionError::NoSuchCard)?;
        draw(state, player, 1);
        let name = card_name(self.registry(), card).to_owned();
        state.log(format!("{} pays {} mana to cycle {}.", player, cost, name));
        Ok(())
    }

    /// Look at the top river card through a hole card with Peek.
    pub(crate) fn peek(&self, state: &mut MatchState, player: PlayerId) -> Result<(), ActionError> {
        Self::require_turn(state, player)?;
        require_unlocked(state, player)?;
        if state.players[player].has_peeked {
            return Err(ActionError::AlreadyUsed);
        }
        let registry = self.registry();
        let cost = state.players[player]
            .hole
            .iter()
            .find_map(|card| {
                let def = registry.get(card.card_id)?;
                match card.find(def, Keyword::Peek) {
                    Some(Ability::Peek { cost }) => Some(*cost),
                    _ => None,
                }
            })
            .ok_or(ActionError::NoAbility)?;
        require_mana(state, player, cost)?;
        let top = state.river.front().copied().ok_or(ActionError::EmptyDeck)?;

        let seat = &mut state.players[player];
        seat.mana -= cost;
        seat.has_peeked = true;
        seat.peeked = Some(top);
        state.log(format!("{} peeks at the river.", player));
        Ok(())
    }

    /// Spend one charge of an in-play artifact to draw a card.
    pub(crate) fn use_charge(&self, state: &mut MatchState, player: PlayerId, card: CardId) -> Result<(), ActionError> {
        Self::require_turn(state, player)?;
        require_unlocked(state, player)?;
        let index = state.players[player].artifact_index(card).ok_or(ActionError::NoSuchCard)?;
        let charges = state.players[player].artifacts[index].charges.unwrap_or(0);
        if charges == 0 {
            return Err(ActionError::NoAbility);
        }
        if state.players[player].deck.is_empty() {
            return Err(ActionError::EmptyDeck);
        }

        let left = charges - 1;
        state.players[player].artifacts[index].charges = Some(left);
        draw(state, player, 1);
        let name = card_name(self.registry(), card).to_owned();
        state.log(format!("{} uses a charge of {} ({} left).", player, name, left));
        if left == 0 {
            let spent = state.players[player].artifacts.remove(index);
            state.players[player].discard.push_back(spent);
            state.log(format!("{} is spent.", name));
            refresh_passives(state, self.registry());
        }
        Ok(())
    }

    /// Sacrifice an in-play Scrap artifact to draw cards.
    pub(crate) fn scrap(&self, state: &mut MatchState, player: PlayerId, card: CardId) -> Result<(), ActionError> {
        Self::require_turn(state, player)?;
        require_unlocked(state, player)?;
        let index = state.players[player].artifact_index(card).ok_or(ActionError::NoSuchCard)?;
        let def = self.registry().get(card).ok_or(ActionError::NoSuchCard)?;
        let count = match state.players[player].artifacts[index].find(def, Keyword::Scrap) {
            Some(Ability::Scrap { draw }) => *draw,
            _ => return Err(ActionError::NoAbility),
        };

        let scrapped = state.players[player].artifacts.remove(index);
        state.players[player].discard.push_back(scrapped);
        if state.location.is_some_and(|l| l.owner == player && l.card == card) {
            state.location = None;
        }
        let drawn = draw(state, player, count);
        state.log(format!("{} scraps {} and draws {}.", player, def.name, drawn));
        refresh_passives(state, self.registry());
        Ok(())
    }

    /// Pay an artifact's Imbue cost to grant its ability to a hole card.
    pub(crate) fn imbue(&self, state: &mut MatchState, player: PlayerId, card: CardId) -> Result<(), ActionError> {
        Self::require_turn(state, player)?;
        require_unlocked(state, player)?;
        let registry = self.registry();
        let index = state.players[player].artifact_index(card).ok_or(ActionError::NoSuchCard)?;
        let def = registry.get(card).ok_or(ActionError::NoSuchCard)?;
        let (cost, grant) = match state.players[player].artifacts[index].find(def, Keyword::Imbue) {
            Some(Ability::Imbue { cost, grant }) => (*cost, (**grant).clone()),
            _ => return Err(ActionError::NoAbility),
        };
        require_mana(state, player, cost)?;

        let keyword = grant.keyword();
        let target = state.players[player]
            .hole
            .iter()
            .position(|hole| match registry.get(hole.card_id) {
                Some(hole_def) => hole.find(hole_def, keyword).is_none(),
                None => !hole.granted.iter().any(|a| a.keyword() == keyword),
            })
            .ok_or(ActionError::AlreadyUsed)?;

        let seat = &mut state.players[player];
        seat.mana -= cost;
        seat.hole[target].granted.push(grant);
        let holder = card_name(registry, seat.hole[target].card_id).to_owned();
        state.log(format!("{} imbues {} with {}.", player, holder, keyword));
        refresh_passives(state, registry);
        Ok(())
    }

    /// Activation shapes for the candidate list; `process` has the final say.
    pub(crate) fn activation_candidates(&self, state: &MatchState, player: PlayerId) -> Vec<Action> {
        let seat = &state.players[player];
        let registry = self.registry();
        let mut actions = Vec::new();

        for (card_index, card) in seat.hand.iter().enumerate() {
            if let Some(def) = registry.get(card.card_id) {
                if def.is_playable() {
                    actions.push(Action::PlayCard { card_index, overload: false });
                    if def.overload_cost().is_some() {
                        actions.push(Action::PlayCard { card_index, overload: true });
                    }
                }
            }
            if !seat.has_discarded {
                actions.push(Action::Discard { card_index });
            }
            actions.push(Action::Cycle { card_index });
        }

        if !seat.has_peeked {
            actions.push(Action::Peek);
        }

        let mut seen: Vec<CardId> = Vec::new();
        for artifact in &seat.artifacts {
            let id = artifact.card_id;
            if seen.contains(&id) {
                continue;
            }
            seen.push(id);
            let Some(def) = registry.get(id) else {
                continue;
            };
            if artifact.charges.is_some_and(|c| c > 0) {
                actions.push(Action::UseCharge { card_id: id });
            }
            if artifact.find(def, Keyword::Scrap).is_some() {
                actions.push(Action::Scrap { card_id: id });
            }
            if artifact.find(def, Keyword::Imbue).is_some() {
                actions.push(Action::Imbue { card_id: id });
            }
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::catalog::ids;
    use crate::cards::{CardInstance, PokerCard, Rank, Suit};
    use crate::core::{GameRng, MatchConfig, Phase, Seats};
    use crate::rules::RulesEngine;

    fn flop_state() -> MatchState {
        let pool: Vec<_> = (1..=6).map(|_| CardInstance::new(CardId::new(3))).collect();
        let mut state = MatchState::new(MatchConfig::default(), Seats::with_value(pool), GameRng::new(5));
        state.phase = Phase::Flop;
        state.active = PlayerId::ONE;
        for (_, p) in state.players.iter_mut() {
            p.points = 9;
            p.mana = 10;
        }
        state
    }

    #[test]
    fn test_play_card_passes_turn() {
        let engine = RoundEngine::standard();
        let mut state = flop_state();
        state.players[PlayerId::ONE].hand.push(CardInstance::new(ids::SOLAR_FLARE));

        engine.play_card(&mut state, PlayerId::ONE, 0, false).unwrap();

        assert_eq!(state.players[PlayerId::ONE].mana, 8);
        assert_eq!(state.players[PlayerId::TWO].points, 7);
        assert_eq!(state.active, PlayerId::TWO);
        assert!(state.players[PlayerId::ONE].hand.is_empty());
    }

    #[test]
    fn test_overload_price_and_effect() {
        let engine = RoundEngine::standard();
        let mut state = flop_state();
        state.players[PlayerId::ONE].hand.push(CardInstance::new(ids::SOLAR_FLARE));
        state.players[PlayerId::ONE].mana = 3;
        assert_eq!(
            engine.play_card(&mut state, PlayerId::ONE, 0, true).unwrap_err(),
            ActionError::InsufficientMana { needed: 4, available: 3 }
        );

        state.players[PlayerId::ONE].mana = 4;
        engine.play_card(&mut state, PlayerId::ONE, 0, true).unwrap();
        assert_eq!(state.players[PlayerId::TWO].points, 4);
    }

    #[test]
    fn test_play_card_rejections() {
        let engine = RoundEngine::standard();
        let mut state = flop_state();
        state.players[PlayerId::ONE].hand.push(CardInstance::new(CardId::new(3)));
        state.players[PlayerId::ONE].hand.push(CardInstance::new(ids::LOST_SIGNAL));

        assert_eq!(engine.play_card(&mut state, PlayerId::ONE, 0, false), Err(ActionError::NotPlayable));
        assert_eq!(engine.play_card(&mut state, PlayerId::ONE, 1, true), Err(ActionError::NoAbility));
        assert_eq!(engine.play_card(&mut state, PlayerId::ONE, 5, false), Err(ActionError::NoSuchCard));

        state.players[PlayerId::ONE].card_play_locked = true;
        assert_eq!(engine.play_card(&mut state, PlayerId::ONE, 1, false), Err(ActionError::CardPlayLocked));

        state.players[PlayerId::ONE].card_play_locked = false;
        state.players[PlayerId::TWO].street_bet = 2;
        assert_eq!(engine.play_card(&mut state, PlayerId::ONE, 1, false), Err(ActionError::BetOutstanding));
    }

    #[test]
    fn test_discard_once_per_round() {
        let engine = RoundEngine::standard();
        let mut state = flop_state();
        state.players[PlayerId::ONE].hand.push(CardInstance::new(ids::LOST_SIGNAL));
        state.players[PlayerId::ONE].hand.push(CardInstance::new(ids::SOLAR_FLARE));

        engine.discard(&mut state, PlayerId::ONE, 0).unwrap();
        assert_eq!(state.players[PlayerId::ONE].hand.len(), 2);
        assert_eq!(state.players[PlayerId::ONE].discard.len(), 1);
        assert_eq!(state.active, PlayerId::ONE);
        assert_eq!(engine.discard(&mut state, PlayerId::ONE, 0), Err(ActionError::AlreadyUsed));
    }

    #[test]
    fn test_cycle_needs_mana_and_deck() {
        let engine = RoundEngine::standard();
        let mut state = flop_state();
        state.players[PlayerId::ONE].hand.push(CardInstance::new(ids::LOST_SIGNAL));

        engine.cycle(&mut state, PlayerId::ONE, 0).unwrap();
        assert_eq!(state.players[PlayerId::ONE].mana, 5);
        assert_eq!(state.players[PlayerId::ONE].hand[0].card_id, CardId::new(3));

        state.players[PlayerId::ONE].mana = 4;
        assert_eq!(
            engine.cycle(&mut state, PlayerId::ONE, 0),
            Err(ActionError::InsufficientMana { needed: 5, available: 4 })
        );
        state.players[PlayerId::ONE].mana = 10;
        state.players[PlayerId::ONE].deck.clear();
        assert_eq!(engine.cycle(&mut state, PlayerId::ONE, 0), Err(ActionError::EmptyDeck));
    }

    #[test]
    fn test_peek_reveals_river_top() {
        let engine = RoundEngine::standard();
        let mut state = flop_state();
        let top = PokerCard::new(Rank::Queen, Suit::Hearts);
        state.river.push_back(top);
        assert_eq!(engine.peek(&mut state, PlayerId::ONE), Err(ActionError::NoAbility));

        state.players[PlayerId::ONE].hole.push(CardInstance::new(CardId::new(5)));
        engine.peek(&mut state, PlayerId::ONE).unwrap();
        assert_eq!(state.players[PlayerId::ONE].peeked, Some(top));
        assert_eq!(state.players[PlayerId::ONE].mana, 9);
        assert_eq!(engine.peek(&mut state, PlayerId::ONE), Err(ActionError::AlreadyUsed));
    }

    #[test]
    fn test_charges_run_out() {
        let engine = RoundEngine::standard();
        let mut state = flop_state();
        let mut artifact = CardInstance::new(CardId::new(73));
        artifact.charges = Some(2);
        state.players[PlayerId::ONE].artifacts.push(artifact);

        engine.use_charge(&mut state, PlayerId::ONE, CardId::new(73)).unwrap();
        assert_eq!(state.players[PlayerId::ONE].artifacts[0].charges, Some(1));
        engine.use_charge(&mut state, PlayerId::ONE, CardId::new(73)).unwrap();
        assert!(state.players[PlayerId::ONE].artifacts.is_empty());
        assert_eq!(state.players[PlayerId::ONE].hand.len(), 2);
        assert_eq!(
            engine.use_charge(&mut state, PlayerId::ONE, CardId::new(73)),
            Err(ActionError::NoSuchCard)
        );
    }

    #[test]
    fn test_scrap_draws() {
        let engine = RoundEngine::standard();
        let mut state = flop_state();
        state.players[PlayerId::ONE].artifacts.push(CardInstance::new(CardId::new(8)));

        engine.scrap(&mut state, PlayerId::ONE, CardId::new(8)).unwrap();
        assert!(state.players[PlayerId::ONE].artifacts.is_empty());
        assert_eq!(state.players[PlayerId::ONE].hand.len(), 2);
        assert_eq!(state.players[PlayerId::ONE].discard.len(), 1);
    }

    #[test]
    fn test_imbue_grants_to_hole_card() {
        let engine = RoundEngine::standard();
        let mut state = flop_state();
        state.players[PlayerId::ONE].artifacts.push(CardInstance::new(CardId::new(55)));
        state.players[PlayerId::ONE].hole.push(CardInstance::new(CardId::new(3)));
        state.players[PlayerId::ONE].hole.push(CardInstance::new(CardId::new(31)));

        engine.imbue(&mut state, PlayerId::ONE, CardId::new(55)).unwrap();
        assert_eq!(state.players[PlayerId::ONE].mana, 8);
        assert_eq!(state.players[PlayerId::ONE].hole[0].granted.len(), 1);
        // Both hole cards now carry Last Stand.
        assert_eq!(engine.imbue(&mut state, PlayerId::ONE, CardId::new(55)), Err(ActionError::AlreadyUsed));
    }

    #[test]
    fn test_candidates_include_activations() {
        let engine = RoundEngine::standard();
        let mut state = flop_state();
        state.players[PlayerId::ONE].hand.push(CardInstance::new(ids::SOLAR_FLARE));
        state.players[PlayerId::ONE].artifacts.push(CardInstance::new(CardId::new(8)));

        let legal = engine.legal_actions(&state, PlayerId::ONE);
        assert!(legal.contains(&Action::PlayCard { card_index: 0, overload: true }));
        assert!(legal.contains(&Action::Scrap { card_id: CardId::new(8) }));
        assert!(!legal.contains(&Action::Peek));
        assert!(engine.legal_actions(&state, PlayerId::TWO).is_empty());
    }
}

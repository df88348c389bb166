//! State primitives shared by keywords, scripts and the round rules.
//!
//! Every numeric effect one player inflicts on the other goes through
//! [`inflict_points`] or [`drain_mana`] so Bulwark applies uniformly.

use log::info;

use crate::cards::{CardId, CardRegistry};
use crate::core::{MatchState, Phase, PlayerId};
use crate::rules::GameResult;

/// Display name of a card for log lines.
#[must_use]
pub fn card_name(registry: &CardRegistry, card: CardId) -> &str {
    registry.get(card).map_or("an unknown card", |def| def.name.as_str())
}

/// Draw up to `count` cards from the top of `player`'s deck.
///
/// Returns how many were actually drawn; an empty deck is a no-op.
pub fn draw(state: &mut MatchState, player: PlayerId, count: usize) -> usize {
    let mut drawn = 0;
    for _ in 0..count {
        let Some(card) = state.players[player].deck.pop_front() else {
            break;
        };
        state.players[player].hand.push(card);
        drawn += 1;
    }
    drawn
}

/// Amount left of an opponent-inflicted effect after Bulwark.
fn after_bulwark(state: &mut MatchState, source: PlayerId, target: PlayerId, amount: i64) -> i64 {
    if source != target && state.players[target].passives.bulwark && amount > 0 {
        state.log(format!("{}'s Bulwark absorbs 1.", target));
        (amount - 1).max(0)
    } else {
        amount
    }
}

/// `source` makes `target` lose `amount` points. Returns the points lost.
pub fn inflict_points(state: &mut MatchState, source: PlayerId, target: PlayerId, amount: i64) -> i64 {
    let amount = after_bulwark(state, source, target, amount);
    if amount > 0 {
        state.players[target].points -= amount;
        state.log(format!("{} loses {} point(s).", target, amount));
    }
    amount
}

/// `source` makes `target` lose up to `amount` mana. Returns the mana lost.
pub fn drain_mana(state: &mut MatchState, source: PlayerId, target: PlayerId, amount: i64) -> i64 {
    let amount = after_bulwark(state, source, target, amount).min(state.players[target].mana);
    if amount > 0 {
        state.players[target].mana -= amount;
        state.log(format!("{} loses {} mana.", target, amount));
    }
    amount
}

pub fn gain_points(state: &mut MatchState, player: PlayerId, amount: i64) {
    if amount > 0 {
        state.players[player].points += amount;
        state.log(format!("{} gains {} point(s).", player, amount));
    }
}

pub fn gain_mana(state: &mut MatchState, player: PlayerId, amount: i64) {
    if amount > 0 {
        state.players[player].mana += amount;
        state.log(format!("{} gains {} mana.", player, amount));
    }
}

/// Pay `cost` mana, converting any shortfall into mana owed.
pub fn pay_with_debt(state: &mut MatchState, player: PlayerId, cost: i64) {
    let seat = &mut state.players[player];
    let paid = cost.min(seat.mana).max(0);
    seat.mana -= paid;
    seat.mana_debt += cost - paid;
}

/// Discard the hand card at `index`.
pub fn discard_from_hand(state: &mut MatchState, player: PlayerId, index: usize) -> Option<CardId> {
    let seat = &mut state.players[player];
    if index >= seat.hand.len() {
        return None;
    }
    let card = seat.hand.remove(index);
    let id = card.card_id;
    seat.discard.push_back(card);
    Some(id)
}

/// End the match if either player has been knocked out.
///
/// Both out at once is a draw. Returns `true` if the match is over.
pub fn check_terminal(state: &mut MatchState) -> bool {
    if state.is_over() {
        return true;
    }
    let out = state.players.map(|_, p| p.is_eliminated());
    let result = match (out[PlayerId::ONE], out[PlayerId::TWO]) {
        (false, false) => return false,
        (true, true) => GameResult::Draw,
        (true, false) => GameResult::Winner(PlayerId::TWO),
        (false, true) => GameResult::Winner(PlayerId::ONE),
    };
    end_match(state, result);
    true
}

/// Force the match into Game Over with `result`.
pub fn end_match(state: &mut MatchState, result: GameResult) {
    match result {
        GameResult::Winner(p) => state.log(format!("{} wins the match!", p)),
        GameResult::Draw => state.log("Both players are defeated. The match is a draw."),
    }
    info!("match over after round {}: {:?}", state.round, result);
    state.result = Some(result);
    state.phase = Phase::GameOver;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardInstance;
    use crate::core::{GameRng, MatchConfig, Seats};

    fn state() -> MatchState {
        let pool: Vec<_> = (1..=4).map(|id| CardInstance::new(CardId::new(id))).collect();
        MatchState::new(MatchConfig::default(), Seats::with_value(pool), GameRng::new(1))
    }

    #[test]
    fn test_draw_stops_at_empty_deck() {
        let mut state = state();
        assert_eq!(draw(&mut state, PlayerId::ONE, 6), 4);
        assert_eq!(state.players[PlayerId::ONE].hand[0].card_id, CardId::new(1));
        assert_eq!(draw(&mut state, PlayerId::ONE, 1), 0);
    }

    #[test]
    fn test_bulwark_reduces_opponent_damage_only() {
        let mut state = state();
        state.players[PlayerId::TWO].passives.bulwark = true;
        assert_eq!(inflict_points(&mut state, PlayerId::ONE, PlayerId::TWO, 2), 1);
        assert_eq!(inflict_points(&mut state, PlayerId::ONE, PlayerId::TWO, 1), 0);
        assert_eq!(inflict_points(&mut state, PlayerId::TWO, PlayerId::TWO, 1), 1);
        assert_eq!(state.players[PlayerId::TWO].points, 8);
    }

    #[test]
    fn test_drain_capped_by_mana() {
        let mut state = state();
        state.players[PlayerId::TWO].mana = 1;
        assert_eq!(drain_mana(&mut state, PlayerId::ONE, PlayerId::TWO, 3), 1);
        assert_eq!(state.players[PlayerId::TWO].mana, 0);
    }

    #[test]
    fn test_pay_with_debt() {
        let mut state = state();
        state.players[PlayerId::ONE].mana = 1;
        pay_with_debt(&mut state, PlayerId::ONE, 3);
        assert_eq!(state.players[PlayerId::ONE].mana, 0);
        assert_eq!(state.players[PlayerId::ONE].mana_debt, 2);
    }

    #[test]
    fn test_simultaneous_knockout_is_draw() {
        let mut state = state();
        state.players[PlayerId::ONE].points = 0;
        state.players[PlayerId::TWO].points = -2;
        assert!(check_terminal(&mut state));
        assert_eq!(state.result, Some(GameResult::Draw));
        assert_eq!(state.phase, Phase::GameOver);
    }

    #[test]
    fn test_all_in_survives_terminal_check() {
        let mut state = state();
        state.players[PlayerId::ONE].points = 0;
        state.players[PlayerId::ONE].all_in = true;
        assert!(!check_terminal(&mut state));
        state.players[PlayerId::ONE].all_in = false;
        assert!(check_terminal(&mut state));
        assert_eq!(state.result, Some(GameResult::Winner(PlayerId::TWO)));
    }
}

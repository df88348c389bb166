//! Betting actions.
//!
//! Points are the chips: every bet, call or raise moves points from the
//! player into the pot. Each betting action except a check also costs
//! `betting_mana_cost` mana (less with Economist, more to call an
//! Intimidate holder); mana the player cannot cover becomes mana owed.

use log::debug;

use crate::core::{Action, MatchState, PlayerId};
use crate::effects::ops::{check_terminal, pay_with_debt};
use crate::triggers::TableEvent;

use super::engine::RoundEngine;
use super::error::ActionError;

/// Mana a betting action costs `player`; marks Economist as spent.
fn pay_betting_mana(state: &mut MatchState, player: PlayerId, calling: bool) {
    let surcharge = if calling {
        state.players[player.opponent()].passives.intimidate
    } else {
        0
    };
    let seat = &mut state.players[player];
    let mut cost = state.config.betting_mana_cost + surcharge;
    if seat.passives.economist && !seat.economist_used {
        cost -= 1;
    }
    seat.economist_used = true;
    let cost = cost.max(0);
    if surcharge > 0 {
        state.log(format!("Intimidate: {} pays {} extra mana to call.", player, surcharge));
    }
    if cost > 0 {
        pay_with_debt(state, player, cost);
    }
}

/// Move `amount` points from `player` into the pot.
pub(crate) fn commit(state: &mut MatchState, player: PlayerId, amount: i64) {
    let seat = &mut state.players[player];
    seat.points -= amount;
    seat.street_bet += amount;
    seat.contributed += amount;
    let all_in = seat.points == 0 && amount > 0;
    if all_in {
        seat.all_in = true;
    }
    state.pot += amount;
    if all_in {
        state.log(format!("{} is all-in!", player));
    }
}

fn mark_voluntary(state: &mut MatchState, player: PlayerId) {
    state.players[player].stats.voluntary_this_round = true;
}

fn bet_sizes(state: &MatchState, player: PlayerId) -> Vec<i64> {
    let points = state.players[player].points;
    let min = state.min_bet();
    let mut sizes = vec![min, min * 2, state.pot / 2, state.pot, points];
    sizes.retain(|&s| s > 0 && s <= points && (s >= min || s == points));
    sizes.sort_unstable();
    sizes.dedup();
    sizes
}

fn raise_sizes(state: &MatchState, player: PlayerId) -> Vec<i64> {
    let headroom = state.players[player].points - state.to_call(player);
    let last = state.last_bet_size;
    let mut sizes = vec![last, last * 2, state.pot, headroom];
    sizes.retain(|&s| s > 0 && s <= headroom && (s >= last || s == headroom));
    sizes.sort_unstable();
    sizes.dedup();
    sizes
}

impl RoundEngine {
    pub(crate) fn check(&self, state: &mut MatchState, player: PlayerId) -> Result<(), ActionError> {
        Self::require_turn(state, player)?;
        if state.to_call(player) > 0 {
            return Err(ActionError::BetOutstanding);
        }
        state.players[player].has_acted = true;
        state.log(format!("{} checks.", player));
        self.finish_betting_turn(state, player);
        Ok(())
    }

    pub(crate) fn bet(&self, state: &mut MatchState, player: PlayerId, amount: i64) -> Result<(), ActionError> {
        Self::require_turn(state, player)?;
        if state.bet_outstanding() || state.to_call(player) > 0 {
            return Err(ActionError::BetOutstanding);
        }
        if state.players[player.opponent()].is_all_in() {
            return Err(ActionError::OpponentAllIn);
        }
        let points = state.players[player].points;
        if amount > points {
            return Err(ActionError::InsufficientPoints { needed: amount, available: points });
        }
        let minimum = state.min_bet();
        if amount <= 0 || (amount < minimum && amount != points) {
            return Err(ActionError::BetTooSmall { amount, minimum });
        }

        pay_betting_mana(state, player, false);
        commit(state, player, amount);
        state.last_bettor = Some(player);
        state.last_bet_size = amount;
        state.players[player].has_acted = true;
        state.players[player.opponent()].has_acted = false;
        mark_voluntary(state, player);
        state.log(format!("{} bets {}.", player, amount));

        self.abilities().spring_traps(state, TableEvent::Bet { by: player });
        self.finish_betting_turn(state, player);
        Ok(())
    }

    pub(crate) fn call(&self, state: &mut MatchState, player: PlayerId) -> Result<(), ActionError> {
        Self::require_turn(state, player)?;
        let to_call = state.to_call(player);
        if to_call == 0 {
            return Err(ActionError::NothingToCall);
        }
        let paid = to_call.min(state.players[player].points);

        pay_betting_mana(state, player, true);
        commit(state, player, paid);
        state.players[player].has_acted = true;
        mark_voluntary(state, player);
        state.log(format!("{} calls {}.", player, paid));

        self.finish_betting_turn(state, player);
        Ok(())
    }

    /// Call and raise by `amount` on top.
    pub(crate) fn raise(&self, state: &mut MatchState, player: PlayerId, amount: i64) -> Result<(), ActionError> {
        Self::require_turn(state, player)?;
        let to_call = state.to_call(player);
        if to_call == 0 {
            return Err(ActionError::NothingToCall);
        }
        if state.players[player.opponent()].is_all_in() {
            return Err(ActionError::OpponentAllIn);
        }
        let points = state.players[player].points;
        let total = to_call + amount;
        if total > points {
            return Err(ActionError::InsufficientPoints { needed: total, available: points });
        }
        let minimum = state.last_bet_size;
        if amount <= 0 || (amount < minimum && total != points) {
            return Err(ActionError::RaiseTooSmall { amount, minimum });
        }

        pay_betting_mana(state, player, false);
        commit(state, player, total);
        state.last_bettor = Some(player);
        state.last_bet_size = amount;
        state.players[player].has_acted = true;
        state.players[player.opponent()].has_acted = false;
        mark_voluntary(state, player);
        state.log(format!("{} raises by {}.", player, amount));

        self.abilities().spring_traps(state, TableEvent::Raise { by: player });
        self.finish_betting_turn(state, player);
        Ok(())
    }

    /// Forfeit the pot; the round ends immediately.
    pub(crate) fn fold(&self, state: &mut MatchState, player: PlayerId) -> Result<(), ActionError> {
        Self::require_turn(state, player)?;
        let winner = player.opponent();
        state.log(format!("{} folds.", player));
        self.abilities().spring_traps(state, TableEvent::Fold { by: player });

        let pot = std::mem::take(&mut state.pot);
        state.players[winner].points += pot;
        state.log(format!("{} wins the pot of {}.", winner, pot));
        debug!("round {} ends on a fold by {}", state.round, player);

        state.players[player].card_play_locked = false;
        self.close_round(state, false);
        Ok(())
    }

    /// Turn bookkeeping after a check, bet, call or raise.
    pub(crate) fn finish_betting_turn(&self, state: &mut MatchState, player: PlayerId) {
        state.players[player].card_play_locked = false;
        if check_terminal(state) {
            return;
        }
        if street_closed(state) {
            self.close_street(state);
        } else {
            self.pass_turn(state);
        }
    }

    pub(crate) fn street_candidates(&self, state: &MatchState, player: PlayerId) -> Vec<Action> {
        if state.active != player {
            return Vec::new();
        }
        let mut actions = vec![Action::Check, Action::Call, Action::Fold];
        actions.extend(bet_sizes(state, player).into_iter().map(|amount| Action::Bet { amount }));
        actions.extend(raise_sizes(state, player).into_iter().map(|amount| Action::Raise { amount }));
        actions.extend(self.activation_candidates(state, player));
        actions
    }
}

/// Both players have acted since the last bet and nothing is owed.
pub(crate) fn street_closed(state: &MatchState) -> bool {
    let [one, two] = [&state.players[PlayerId::ONE], &state.players[PlayerId::TWO]];
    one.has_acted && two.has_acted && (one.street_bet == two.street_bet || one.is_all_in() || two.is_all_in())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameRng, MatchConfig, Phase, Seats};

    fn street_state() -> MatchState {
        let mut state = MatchState::new(MatchConfig::default(), Seats::default(), GameRng::new(2));
        state.phase = Phase::Flop;
        state.pot = 2;
        for (_, p) in state.players.iter_mut() {
            p.points = 9;
            p.contributed = 1;
            p.mana = 10;
        }
        state
    }

    #[test]
    fn test_commit_moves_points_into_pot() {
        let mut state = street_state();
        commit(&mut state, PlayerId::ONE, 9);
        assert_eq!(state.pot, 11);
        assert!(state.players[PlayerId::ONE].is_all_in());
        assert_eq!(state.to_call(PlayerId::TWO), 9);
    }

    #[test]
    fn test_economist_discounts_first_action_only() {
        let mut state = street_state();
        state.players[PlayerId::ONE].passives.economist = true;
        pay_betting_mana(&mut state, PlayerId::ONE, false);
        assert_eq!(state.players[PlayerId::ONE].mana, 10);
        pay_betting_mana(&mut state, PlayerId::ONE, false);
        assert_eq!(state.players[PlayerId::ONE].mana, 9);
    }

    #[test]
    fn test_intimidate_surcharge_becomes_debt() {
        let mut state = street_state();
        state.players[PlayerId::ONE].passives.intimidate = 1;
        state.players[PlayerId::TWO].mana = 1;
        pay_betting_mana(&mut state, PlayerId::TWO, true);
        assert_eq!(state.players[PlayerId::TWO].mana, 0);
        assert_eq!(state.players[PlayerId::TWO].mana_debt, 1);
    }

    #[test]
    fn test_street_closes_on_matched_bets() {
        let mut state = street_state();
        state.players[PlayerId::ONE].has_acted = true;
        assert!(!street_closed(&state));
        state.players[PlayerId::TWO].has_acted = true;
        assert!(street_closed(&state));
        state.players[PlayerId::ONE].street_bet = 2;
        assert!(!street_closed(&state));
    }

    #[test]
    fn test_bet_sizes_respect_minimum_and_stack() {
        let mut state = street_state();
        state.pot = 6;
        assert_eq!(bet_sizes(&state, PlayerId::ONE), vec![1, 2, 3, 6, 9]);
        state.table.high_stakes = true;
        state.players[PlayerId::ONE].points = 1;
        assert_eq!(bet_sizes(&state, PlayerId::ONE), vec![1]);
    }
}

//! Round flow: dealing, mulligans, turn starts and street transitions.
//!
//! ```text
//! Setup -> Mulligan -> Pre-Flop -> Flop -> Turn -> River -> Showdown -> End of Round
//!              ^                                                             |
//!              +------------------------- NEXT_ROUND ------------------------+
//! ```
//!
//! Any phase boundary can end in Game Over instead.

use log::{info, trace};

use crate::cards::{river_deck, CardCategory, CardInstance, PokerCard, Rank, Suit};
use crate::core::{MatchState, Phase, PlayerId};
use crate::effects::ops::{card_name, check_terminal, draw, end_match, gain_mana};
use crate::effects::{keywords, refresh_passives};
use crate::rules::GameResult;

use super::engine::RoundEngine;
use super::error::ActionError;

impl RoundEngine {
    /// Collect every card, ante and deal a new round.
    pub(crate) fn start_round(&self, state: &mut MatchState) {
        for (_, player) in state.players.iter_mut() {
            if std::mem::take(&mut player.stats.voluntary_this_round) {
                player.stats.voluntary += 1;
            }
            if state.round > 0 {
                player.stats.rounds += 1;
            }
        }
        state.round += 1;
        state.log(format!("--- Round {} ---", state.round));
        info!("round {} begins", state.round);

        self.gather_cards(state);
        self.reset_table(state);
        state.first_to_act = self.choose_first(state);

        if !self.post_antes(state) {
            return;
        }
        for player in PlayerId::both() {
            self.deal_player(state, player);
        }

        keywords::round_start(state, self.registry());
        refresh_passives(state, self.registry());

        state.phase = Phase::Mulligan;
        state.active = state.first_to_act;
        state.log(format!("{} acts first.", state.first_to_act));
    }

    /// Pool deck, hand, hole cards, artifacts, discard and any armed trap.
    fn gather_cards(&self, state: &mut MatchState) {
        for (_, player) in state.players.iter_mut() {
            let mut pool: Vec<CardInstance> = player.deck.iter().cloned().collect();
            pool.append(&mut player.hand);
            pool.extend(player.hole.drain(..));
            pool.append(&mut player.artifacts);
            pool.extend(std::mem::take(&mut player.discard));
            pool.extend(player.trap_card.take());
            for card in &mut pool {
                card.reset();
            }
            player.deck = pool.into_iter().collect();
        }
    }

    fn reset_table(&self, state: &mut MatchState) {
        let starting_mana = state.config.starting_mana;
        for (_, player) in state.players.iter_mut() {
            player.mana = starting_mana;
            player.mana_debt = 0;
            player.street_bet = 0;
            player.contributed = 0;
            player.all_in = false;
            player.has_acted = false;
            player.mulligan_decided = false;
            player.has_discarded = false;
            player.has_peeked = false;
            player.peeked = None;
            player.economist_used = false;
            player.card_play_locked = false;
            player.wager_committed = false;
            player.trap = None;
            player.timed.clear();
        }
        state.community.clear();
        state.location = None;
        state.spades_round = false;
        state.showdown = None;
        state.pot = 0;
        state.last_bettor = None;
        state.last_bet_size = state.config.min_bet;

        let mut river = river_deck();
        state.rng.shuffle(&mut river);
        state.river = river.into_iter().collect();
    }

    /// Round one is a coin flip; afterwards the last showdown loser opens.
    fn choose_first(&self, state: &mut MatchState) -> PlayerId {
        if state.round == 1 {
            return if state.rng.gen_bool(0.5) { PlayerId::ONE } else { PlayerId::TWO };
        }
        match (state.previous_round_had_showdown, state.last_showdown_winner) {
            (true, Some(winner)) => winner.opponent(),
            _ => state.first_to_act.opponent(),
        }
    }

    /// Returns `false` if the match ended because an ante could not be paid.
    fn post_antes(&self, state: &mut MatchState) -> bool {
        let ante = state.config.ante;
        let short = state.players.map(|_, p| p.points < ante);
        let result = match (short[PlayerId::ONE], short[PlayerId::TWO]) {
            (false, false) => None,
            (true, true) => Some(GameResult::Draw),
            (true, false) => Some(GameResult::Winner(PlayerId::TWO)),
            (false, true) => Some(GameResult::Winner(PlayerId::ONE)),
        };
        if let Some(result) = result {
            state.log("A player cannot pay the ante.");
            end_match(state, result);
            return false;
        }
        for (_, player) in state.players.iter_mut() {
            player.points -= ante;
            player.contributed = ante;
            player.all_in = player.points == 0;
        }
        state.pot = ante * 2;
        state.log(format!("Both players ante {}.", ante));
        true
    }

    /// Shuffle the pool, pick two Units as hole cards and draw a hand.
    fn deal_player(&self, state: &mut MatchState, player: PlayerId) {
        let mut pool: Vec<CardInstance> = state.players[player].deck.iter().cloned().collect();
        state.rng.shuffle(&mut pool);

        let is_unit = |card: &CardInstance| {
            self.registry()
                .get(card.card_id)
                .is_some_and(|def| def.category == CardCategory::Unit)
        };
        let mut hole: Vec<CardInstance> = Vec::with_capacity(2);
        while hole.len() < 2 {
            let index = match pool.iter().position(|c| is_unit(c)) {
                Some(index) => index,
                None if !pool.is_empty() => 0,
                None => break,
            };
            hole.push(pool.remove(index));
        }
        for card in &mut hole {
            let rank = Rank::ALL[state.rng.gen_range_usize(0..Rank::ALL.len())];
            let suit = Suit::ALL[state.rng.gen_range_usize(0..Suit::ALL.len())];
            card.face = Some(PokerCard::new(rank, suit));
        }

        let hand_size = state.config.hand_size;
        let mut hand = Vec::with_capacity(hand_size);
        let mut rest = Vec::with_capacity(pool.len());
        for card in pool {
            if hand.len() < hand_size && !is_unit(&card) {
                hand.push(card);
            } else {
                rest.push(card);
            }
        }
        state.rng.shuffle(&mut rest);

        let seat = &mut state.players[player];
        seat.hole = hole.into_iter().collect();
        seat.hand = hand;
        seat.deck = rest.into_iter().collect();
        let faces: Vec<String> = seat.hole_faces().map(|f| f.to_string()).collect();
        trace!("{} dealt hole cards {}", player, faces.join(" "));
    }

    /// Keep or redraw the opening hand; first to act decides first.
    pub(crate) fn decide_mulligan(
        &self,
        state: &mut MatchState,
        player: PlayerId,
        redraw: bool,
    ) -> Result<(), ActionError> {
        if state.phase != Phase::Mulligan {
            return Err(ActionError::WrongPhase(state.phase));
        }
        if state.players[player].mulligan_decided {
            return Err(ActionError::AlreadyDecided);
        }
        if state.active != player {
            return Err(ActionError::OutOfTurn);
        }

        if redraw {
            let seat = &mut state.players[player];
            let size = seat.hand.len();
            let mut deck: Vec<CardInstance> = seat.hand.drain(..).collect();
            deck.extend(seat.deck.iter().cloned());
            state.rng.shuffle(&mut deck);
            state.players[player].deck = deck.into_iter().collect();
            draw(state, player, size);
            state.log(format!("{} mulligans.", player));
        } else {
            state.log(format!("{} keeps their hand.", player));
        }
        state.players[player].mulligan_decided = true;

        let other = player.opponent();
        if state.players[other].mulligan_decided {
            let first = state.first_to_act;
            state.phase = Phase::PreFlop;
            state.active = first;
            state.log("--- Pre-Flop ---");
            self.begin_turn(state, first);
        } else {
            state.active = other;
        }
        Ok(())
    }

    pub(crate) fn next_round(&self, state: &mut MatchState) -> Result<(), ActionError> {
        if state.phase != Phase::EndRound {
            return Err(ActionError::WrongPhase(state.phase));
        }
        self.start_round(state);
        Ok(())
    }

    /// Start-of-turn income, debt and Chrono ticks.
    pub(crate) fn begin_turn(&self, state: &mut MatchState, player: PlayerId) {
        let per_turn = state.config.mana_per_turn;
        state.players[player].mana += per_turn;

        let seat = &mut state.players[player];
        let settled = seat.mana_debt.min(seat.mana).max(0);
        seat.mana -= settled;
        seat.mana_debt -= settled;
        if settled > 0 {
            state.log(format!("{} repays {} mana owed.", player, settled));
        }

        let well = state.table.mana_well;
        if well > 0 {
            state.log("The Mana Well stirs.");
            gain_mana(state, player, well);
        }
        let behind = state.players[player].points < state.players[player.opponent()].points;
        if state.players[player].passives.bulwark && behind {
            state.log(format!("{}'s Bulwark holds the line.", player));
            gain_mana(state, player, 1);
        }

        self.abilities().tick_chrono(state, player);
        check_terminal(state);
    }

    /// Hand the turn to the opponent.
    pub(crate) fn pass_turn(&self, state: &mut MatchState) {
        let next = state.active.opponent();
        state.active = next;
        self.begin_turn(state, next);
    }

    /// Deal the next street, or run the board out when someone is all-in.
    pub(crate) fn close_street(&self, state: &mut MatchState) {
        let all_in = state.players.iter().any(|(_, p)| p.is_all_in());
        if all_in {
            state.log("A player is all-in. The board runs out.");
            while state.community.len() < 5 && self.deal_community(state, 1) {}
            self.end_of_river(state);
            return;
        }

        match state.phase.next_street() {
            Some(next) => {
                let count = if next == Phase::Flop { 3 } else { 1 };
                state.phase = next;
                self.reset_street(state);
                state.log(format!("--- {} ---", next));
                self.deal_community(state, count);
                trace!("street {} opens with {} community cards", next, state.community.len());
                let first = state.first_to_act;
                state.active = first;
                self.begin_turn(state, first);
            }
            None => self.end_of_river(state),
        }
    }

    fn reset_street(&self, state: &mut MatchState) {
        for (_, player) in state.players.iter_mut() {
            player.street_bet = 0;
            player.has_acted = false;
        }
        state.last_bettor = None;
        state.last_bet_size = state.config.min_bet;
    }

    /// Reveal `count` river cards. Returns `false` once the river is dry.
    fn deal_community(&self, state: &mut MatchState, count: usize) -> bool {
        let mut dealt = Vec::with_capacity(count);
        for _ in 0..count {
            let Some(card) = state.river.pop_front() else {
                break;
            };
            state.community.push(card);
            dealt.push(card.to_string());
        }
        if dealt.is_empty() {
            return false;
        }
        state.log(format!("The river reveals {}.", dealt.join(" ")));
        true
    }

    /// Volatile Locations break, then the showdown.
    fn end_of_river(&self, state: &mut MatchState) {
        if let (Some(loss), Some(location)) = (state.table.volatile, state.location) {
            let name = card_name(self.registry(), location.card).to_owned();
            state.log(format!("{} collapses! Each player loses {} points.", name, loss));
            for (_, player) in state.players.iter_mut() {
                player.points -= loss;
            }
            let owner = &mut state.players[location.owner];
            if let Some(index) = owner.artifact_index(location.card) {
                let broken = owner.artifacts.remove(index);
                owner.discard.push_back(broken);
            }
            state.location = None;
            refresh_passives(state, self.registry());
            if check_terminal(state) {
                return;
            }
        }
        self.showdown(state);
    }

    /// Close the round after a fold or showdown.
    pub(crate) fn close_round(&self, state: &mut MatchState, had_showdown: bool) {
        state.previous_round_had_showdown = had_showdown;
        for (_, player) in state.players.iter_mut() {
            player.all_in = false;
        }
        state.phase = Phase::EndRound;
        if !check_terminal(state) {
            info!("round {} complete", state.round);
        }
    }
}

//! Showdown: hand evaluation and pot settlement.
//!
//! ## Order of settlement
//!
//! 1. Last Stand promotions and Gravity Well
//! 2. Each player's best hand from hole cards plus the community
//! 3. Underdog mana for weak hands
//! 4. The pot: uncalled excess goes back to the bigger contributor, then a
//!    Sanctuary refunds the loser's matched stake, then the winner takes the
//!    rest. A split gives any odd point to the first player to act.
//! 5. Wager and Flux adjustments

use std::cmp::Ordering;

use log::info;
use smallvec::SmallVec;

use crate::cards::{PokerCard, Suit};
use crate::core::{MatchState, Phase, PlayerId, Seats, ShowdownReport};
use crate::effects::keywords;
use crate::effects::ops::{drain_mana, end_match, gain_points};
use crate::hand::{evaluate, recolor, HandValue};
use crate::rules::GameResult;

use super::engine::RoundEngine;

/// Best hand for `player`, community recolored under an eclipse.
fn best_hand(state: &MatchState, player: PlayerId) -> Option<HandValue> {
    let community: SmallVec<[PokerCard; 7]> = if state.spades_round {
        recolor(&state.community, Suit::Spades)
    } else {
        state.community.iter().copied().collect()
    };
    let mut cards: SmallVec<[PokerCard; 7]> = state.players[player].hole_faces().collect();
    cards.extend(community);
    evaluate(&cards).value().cloned()
}

fn winner_of(hands: &Seats<Option<HandValue>>) -> Option<PlayerId> {
    match (&hands[PlayerId::ONE], &hands[PlayerId::TWO]) {
        (Some(a), Some(b)) => match a.cmp(b) {
            Ordering::Greater => Some(PlayerId::ONE),
            Ordering::Less => Some(PlayerId::TWO),
            Ordering::Equal => None,
        },
        (Some(_), None) => Some(PlayerId::ONE),
        (None, Some(_)) => Some(PlayerId::TWO),
        (None, None) => None,
    }
}

/// Split the pot; returns net points each player received.
fn settle_pot(state: &mut MatchState, winner: Option<PlayerId>) -> Seats<i64> {
    let mut payouts = Seats::with_value(0);
    let one = state.players[PlayerId::ONE].contributed;
    let two = state.players[PlayerId::TWO].contributed;

    let excess = (one - two).abs();
    if excess > 0 {
        let bigger = if one > two { PlayerId::ONE } else { PlayerId::TWO };
        let excess = excess.min(state.pot);
        state.pot -= excess;
        payouts[bigger] += excess;
        state.log(format!("{} uncalled point(s) return to {}.", excess, bigger));
    }

    if let Some(winner) = winner {
        let loser = winner.opponent();
        if state.table.sanctuary {
            let refund = one.min(two).min(state.pot);
            state.pot -= refund;
            payouts[loser] += refund;
            state.log(format!("Sanctuary shields {}: {} point(s) refunded.", loser, refund));
        }
        payouts[winner] += state.pot;
        state.log(format!("{} wins the pot of {}.", winner, state.pot));
    } else {
        let half = state.pot / 2;
        let odd = state.pot - half * 2;
        payouts[PlayerId::ONE] += half;
        payouts[PlayerId::TWO] += half;
        payouts[state.first_to_act] += odd;
        state.log(format!("Split pot: {} each.", half));
    }
    state.pot = 0;

    for (player, seat) in state.players.iter_mut() {
        seat.points += payouts[player];
    }
    payouts
}

impl RoundEngine {
    pub(crate) fn showdown(&self, state: &mut MatchState) {
        state.phase = Phase::Showdown;
        state.log("--- Showdown ---");
        let registry = self.registry();

        keywords::last_stand(state, registry);
        for player in PlayerId::both() {
            if state.players[player].passives.gravity_well {
                let target = player.opponent();
                let half = state.players[target].mana / 2;
                state.log(format!("{}'s Gravity Well pulls at {}.", player, target));
                drain_mana(state, player, target, half);
            }
        }

        let hands = Seats::new(|p| best_hand(state, p));
        for (player, hand) in hands.iter() {
            let shown = hand.as_ref().map_or("no hand", |h| h.category.name());
            state.log(format!("{} shows {}.", player, shown));
        }
        for (player, hand) in hands.iter() {
            if let Some(hand) = hand {
                keywords::underdog(state, registry, player, hand.category);
            }
        }

        let winner = winner_of(&hands);
        match winner {
            Some(w) => state.log(format!("{} wins the showdown.", w)),
            None => state.log("The showdown is a tie."),
        }
        info!("round {} showdown: {:?}", state.round, winner);

        let pot = state.pot;
        let payouts = settle_pot(state, winner);

        if let Some(w) = winner {
            let loser = w.opponent();
            if state.players[w].wager_committed {
                state.log(format!("{}'s wager pays off.", w));
                state.last_showdown_winner = winner;
                state.showdown = Some(ShowdownReport { hands, winner, payouts });
                end_match(state, GameResult::Winner(w));
                return;
            }
            if state.players[loser].wager_committed {
                state.players[loser].points = 1;
                state.log(format!("{}'s wager fails. Their points fall to 1.", loser));
            }
            if state.players[w].passives.flux {
                state.log(format!("{}'s Flux surges.", w));
                gain_points(state, w, pot / 10);
            }
        }

        state.last_showdown_winner = winner;
        state.showdown = Some(ShowdownReport { hands, winner, payouts });
        self.close_round(state, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, CardInstance, Rank};
    use crate::core::{GameRng, MatchConfig};
    use crate::hand::HandCategory;

    fn unit(rank: Rank, suit: Suit) -> CardInstance {
        CardInstance::new(CardId::new(3)).with_face(PokerCard::new(rank, suit))
    }

    fn state(one: i64, two: i64) -> MatchState {
        let mut state = MatchState::new(MatchConfig::default(), Seats::default(), GameRng::new(1));
        state.players[PlayerId::ONE].contributed = one;
        state.players[PlayerId::TWO].contributed = two;
        state.pot = one + two;
        state
    }

    #[test]
    fn test_uncalled_excess_returns_first() {
        let mut state = state(7, 3);
        let payouts = settle_pot(&mut state, Some(PlayerId::TWO));
        assert_eq!(payouts[PlayerId::ONE], 4);
        assert_eq!(payouts[PlayerId::TWO], 6);
        assert_eq!(state.pot, 0);
    }

    #[test]
    fn test_sanctuary_refunds_loser_stake() {
        let mut state = state(3, 3);
        state.table.sanctuary = true;
        let payouts = settle_pot(&mut state, Some(PlayerId::ONE));
        assert_eq!(payouts[PlayerId::ONE], 3);
        assert_eq!(payouts[PlayerId::TWO], 3);
    }

    #[test]
    fn test_split_odd_point_to_first_actor() {
        let mut state = state(2, 2);
        state.pot = 5;
        state.first_to_act = PlayerId::TWO;
        let payouts = settle_pot(&mut state, None);
        assert_eq!(payouts[PlayerId::ONE], 2);
        assert_eq!(payouts[PlayerId::TWO], 3);
    }

    #[test]
    fn test_eclipse_makes_community_spades() {
        let mut state = state(1, 1);
        state.players[PlayerId::ONE].hole.push(unit(Rank::Two, Suit::Spades));
        state.players[PlayerId::ONE].hole.push(unit(Rank::Nine, Suit::Spades));
        state.community.extend([
            PokerCard::new(Rank::Four, Suit::Hearts),
            PokerCard::new(Rank::Jack, Suit::Clubs),
            PokerCard::new(Rank::King, Suit::Diamonds),
        ]);
        assert_eq!(best_hand(&state, PlayerId::ONE).map(|h| h.category), Some(HandCategory::HighCard));
        state.spades_round = true;
        assert_eq!(best_hand(&state, PlayerId::ONE).map(|h| h.category), Some(HandCategory::Flush));
    }

    #[test]
    fn test_showdown_settles_failed_wager() {
        let engine = RoundEngine::standard();
        let mut state = state(1, 1);
        state.players[PlayerId::ONE].hole.extend([unit(Rank::Ace, Suit::Hearts), unit(Rank::Ace, Suit::Clubs)]);
        state.players[PlayerId::TWO].hole.extend([unit(Rank::King, Suit::Hearts), unit(Rank::Queen, Suit::Clubs)]);
        state.community.extend([
            PokerCard::new(Rank::Two, Suit::Spades),
            PokerCard::new(Rank::Seven, Suit::Diamonds),
            PokerCard::new(Rank::Nine, Suit::Clubs),
            PokerCard::new(Rank::Four, Suit::Hearts),
            PokerCard::new(Rank::Jack, Suit::Spades),
        ]);
        state.players[PlayerId::ONE].points = 9;
        state.players[PlayerId::TWO].points = 9;
        state.players[PlayerId::TWO].wager_committed = true;

        engine.showdown(&mut state);

        let report = state.showdown.clone().unwrap();
        assert_eq!(report.winner, Some(PlayerId::ONE));
        assert_eq!(state.players[PlayerId::ONE].points, 11);
        assert_eq!(state.players[PlayerId::TWO].points, 1);
        assert_eq!(state.phase, Phase::EndRound);
        assert_eq!(state.last_showdown_winner, Some(PlayerId::ONE));
    }
}

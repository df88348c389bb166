//! Hand strength and draw estimation.
//!
//! Every estimate is a fraction in `0.0..=1.0`:
//! - Pre-flop: a lookup over pairs, high cards, suitedness and connectedness
//! - Post-flop: the normalized category of the best hand so far, nudged by
//!   the top tie-break rank
//! - Draws: outs to a flush or straight, scaled by the cards still to come

use smallvec::SmallVec;

use crate::cards::{PokerCard, Rank, Suit};
use crate::core::{MatchState, PlayerId};
use crate::hand::{evaluate, multiples_category, recolor, HandCategory};

/// Strength estimate for one player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Strength {
    /// Value of the cards as they stand.
    pub made: f64,
    /// Chance-weighted value of improving.
    pub draw: f64,
    /// Outs to a flush or straight.
    pub outs: u32,
}

impl Strength {
    /// Made strength plus the part of the draw it does not already cover.
    #[must_use]
    pub fn effective(&self) -> f64 {
        (self.made + self.draw * (1.0 - self.made)).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.outs >= 8
    }
}

/// Pre-flop strength of two hole cards.
#[must_use]
pub fn preflop_strength(a: PokerCard, b: PokerCard) -> f64 {
    let (high, low) = if a.rank >= b.rank {
        (a.rank.value(), b.rank.value())
    } else {
        (b.rank.value(), a.rank.value())
    };
    let suited = a.suit == b.suit;

    let score: u8 = if high == low {
        match high {
            13..=14 => 10,
            11..=12 => 9,
            10 => 8,
            9 => 7,
            8 => 6,
            7 => 5,
            _ => 4,
        }
    } else {
        match (high, low, suited) {
            (14, 13, true) => 10,
            (14, 13, false) | (14, 12, true) => 8,
            (14, 12, false) | (14, 11, true) | (13, 12, true) => 7,
            (14, 11, false) | (14, 10, true) | (13, 12, false) | (13, 11, true) | (12, 11, true) => 6,
            (14, 10, false) | (14, _, true) | (13, 11, false) | (13, 10, true) | (12, 11, false) | (12, 10, true) => 5,
            (14, _, false) | (13, 10, false) | (12, 10, false) => 4,
            (h, l, true) if h - l <= 2 => {
                if h >= 9 {
                    5
                } else {
                    4
                }
            }
            (h, l, _) if h >= 11 && l >= 9 => 4,
            (h, l, _) if h - l == 1 => 3,
            _ => 2,
        }
    };
    f64::from(score) / 10.0
}

/// Strength of the best hand from `cards`, complete or not.
#[must_use]
pub fn made_strength(cards: &[PokerCard]) -> f64 {
    let (category, top) = match evaluate(cards).value() {
        Some(value) => (value.category, value.tiebreak.first().copied().unwrap_or(0)),
        None => (
            multiples_category(cards),
            cards.iter().map(|c| c.rank.value()).max().unwrap_or(0),
        ),
    };
    let step = 1.0 / f64::from(HandCategory::RoyalFlush.index());
    // Up to half a category step for the leading rank.
    let kicker = f64::from(top.saturating_sub(2)) / 12.0 * step * 0.5;
    (category.normalized() + kicker).min(1.0)
}

/// Outs to a flush or straight that `cards` do not already make.
#[must_use]
pub fn count_outs(cards: &[PokerCard]) -> u32 {
    if cards.len() < 4 {
        return 0;
    }
    let made = evaluate(cards).category();
    let mut outs = 0;

    let flush_made = made.is_some_and(|c| c >= HandCategory::Flush);
    let flush_draw = Suit::ALL
        .iter()
        .any(|&suit| cards.iter().filter(|c| c.suit == suit).count() == 4);
    if flush_draw && !flush_made {
        outs += 9;
    }

    let straight_made = made.is_some_and(|c| c >= HandCategory::Straight);
    if !straight_made {
        outs += straight_outs(cards);
    }
    outs
}

/// 8 for an open-ended draw, 4 for a gutshot.
fn straight_outs(cards: &[PokerCard]) -> u32 {
    let mut present = [false; 15];
    for card in cards {
        let value = usize::from(card.rank.value());
        present[value] = true;
        if card.rank == Rank::Ace {
            present[1] = true;
        }
    }
    let mut completing = 0;
    for missing in 1..=14 {
        if present[missing] {
            continue;
        }
        let mut with = present;
        with[missing] = true;
        let completes = (1..=10).any(|low| (low..low + 5).all(|v| with[v]));
        if completes {
            completing += 1;
        }
    }
    match completing {
        0 => 0,
        1 => 4,
        _ => 8,
    }
}

/// Chance of hitting with `outs` and `to_come` cards left (rule of 2 and 4).
#[must_use]
pub fn draw_potential(outs: u32, to_come: usize) -> f64 {
    let per_card = match to_come {
        0 => return 0.0,
        1 => 2.0,
        _ => 4.0,
    };
    (f64::from(outs) * per_card / 100.0).min(0.6)
}

/// The community as `player` sees it: recolored under an eclipse, plus a
/// peeked river card.
fn visible_board(state: &MatchState, player: PlayerId) -> SmallVec<[PokerCard; 7]> {
    let mut board: SmallVec<[PokerCard; 7]> = state.community.iter().copied().collect();
    if let Some(peeked) = state.players[player].peeked {
        if board.len() < 5 && state.river.front() == Some(&peeked) {
            board.push(peeked);
        }
    }
    if state.spades_round {
        recolor(&board, Suit::Spades)
    } else {
        board
    }
}

/// Estimate `player`'s strength from their hole cards and the board.
#[must_use]
pub fn estimate(state: &MatchState, player: PlayerId) -> Strength {
    let hole: SmallVec<[PokerCard; 2]> = state.players[player].hole_faces().collect();
    let board = visible_board(state, player);

    if board.is_empty() {
        let made = match hole.as_slice() {
            [a, b] => preflop_strength(*a, *b),
            _ => 0.0,
        };
        return Strength { made, draw: 0.0, outs: 0 };
    }

    let mut cards = hole.clone();
    cards.extend(board.iter().copied());
    let outs = count_outs(&cards);
    let to_come = 5usize.saturating_sub(board.len());
    Strength {
        made: made_strength(&cards),
        draw: draw_potential(outs, to_come),
        outs,
    }
}

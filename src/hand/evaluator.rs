//! Best-five-card hand evaluation.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{PokerCard, Rank, Suit};

/// Poker hand category, weakest first.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum HandCategory {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    RoyalFlush,
}

impl HandCategory {
    /// 0 for High Card up to 9 for Royal Flush.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Category as a fraction of the strongest one.
    #[must_use]
    pub fn normalized(self) -> f64 {
        f64::from(self.index()) / f64::from(HandCategory::RoyalFlush.index())
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::RoyalFlush => "Royal Flush",
        }
    }
}

impl std::fmt::Display for HandCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Category plus descending tie-break vector.
///
/// The derived ordering compares the category first and then the tie-break
/// ranks element-wise, which is the full poker ordering.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct HandValue {
    pub category: HandCategory,
    pub tiebreak: SmallVec<[u8; 5]>,
}

/// A complete five-card hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct MadeHand {
    pub value: HandValue,
    /// The five cards forming the hand, in input order.
    pub cards: [PokerCard; 5],
}

/// Result of evaluating a card set.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Evaluation {
    /// Fewer than five cards; not comparable with a made hand.
    Incomplete,
    Made(MadeHand),
}

impl Evaluation {
    /// The hand value, if five or more cards were supplied.
    #[must_use]
    pub fn value(&self) -> Option<&HandValue> {
        match self {
            Evaluation::Made(hand) => Some(&hand.value),
            Evaluation::Incomplete => None,
        }
    }

    #[must_use]
    pub fn category(&self) -> Option<HandCategory> {
        self.value().map(|v| v.category)
    }
}

/// Evaluate the best five-card hand among `cards`.
///
/// Every five-card subset is scored and the maximum kept.
///
/// ```
/// use river_of_ruin::cards::{PokerCard, Rank::*, Suit::*};
/// use river_of_ruin::hand::{evaluate, HandCategory};
///
/// let cards = [
///     PokerCard::new(Ace, Hearts),
///     PokerCard::new(Two, Clubs),
///     PokerCard::new(Three, Spades),
///     PokerCard::new(Four, Hearts),
///     PokerCard::new(Five, Diamonds),
///     PokerCard::new(King, Clubs),
/// ];
/// let value = evaluate(&cards).value().cloned().unwrap();
/// assert_eq!(value.category, HandCategory::Straight);
/// assert_eq!(value.tiebreak.as_slice(), &[5]);
/// ```
#[must_use]
pub fn evaluate(cards: &[PokerCard]) -> Evaluation {
    let n = cards.len();
    if n < 5 {
        return Evaluation::Incomplete;
    }

    let mut best: Option<MadeHand> = None;
    for a in 0..n - 4 {
        for b in a + 1..n - 3 {
            for c in b + 1..n - 2 {
                for d in c + 1..n - 1 {
                    for e in d + 1..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let value = score_five(&five);
                        if best.as_ref().map_or(true, |current| value > current.value) {
                            best = Some(MadeHand { value, cards: five });
                        }
                    }
                }
            }
        }
    }

    match best {
        Some(hand) => Evaluation::Made(hand),
        None => Evaluation::Incomplete,
    }
}

/// Order two hand values. `Equal` means a split pot.
#[must_use]
pub fn compare_hands(a: &HandValue, b: &HandValue) -> Ordering {
    a.cmp(b)
}

/// Best category reachable from pairs and sets alone.
///
/// Works on any number of cards, so heuristics can read two hole cards or
/// a partial board. Straights and flushes need five cards and are ignored.
#[must_use]
pub fn multiples_category(cards: &[PokerCard]) -> HandCategory {
    let counts = rank_counts(cards);
    let mut trips = 0;
    let mut pairs = 0;
    for &count in counts.iter() {
        match count {
            0 | 1 => {}
            2 => pairs += 1,
            3 => trips += 1,
            _ => return HandCategory::FourOfAKind,
        }
    }
    match (trips, pairs) {
        (t, p) if t >= 2 || (t == 1 && p >= 1) => HandCategory::FullHouse,
        (1, _) => HandCategory::ThreeOfAKind,
        (_, p) if p >= 2 => HandCategory::TwoPair,
        (_, 1) => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    }
}

fn rank_counts(cards: &[PokerCard]) -> [u8; 15] {
    let mut counts = [0u8; 15];
    for card in cards {
        counts[usize::from(card.rank.value())] += 1;
    }
    counts
}

fn score_five(cards: &[PokerCard; 5]) -> HandValue {
    let counts = rank_counts(cards);
    let flush = cards.iter().all(|c| c.suit == cards[0].suit);

    let mut ranks: SmallVec<[u8; 5]> = cards.iter().map(|c| c.rank.value()).collect();
    ranks.sort_unstable_by(|a, b| b.cmp(a));

    let straight_high = straight_high(&ranks);

    if flush {
        if let Some(high) = straight_high {
            if high == Rank::Ace.value() {
                return value(HandCategory::RoyalFlush, &[]);
            }
            return value(HandCategory::StraightFlush, &[high]);
        }
    }

    // Groups by (count desc, rank desc), e.g. full house [trips, pair].
    let mut groups: SmallVec<[(u8, u8); 5]> = (2..=14u8)
        .rev()
        .filter(|&r| counts[usize::from(r)] > 0)
        .map(|r| (counts[usize::from(r)], r))
        .collect();
    groups.sort_by(|a, b| b.cmp(a));
    let grouped: SmallVec<[u8; 5]> = groups.iter().map(|&(_, r)| r).collect();

    match groups.as_slice() {
        // Randomized hole faces can repeat a rank five times.
        [(n, _), ..] if *n >= 4 => value(HandCategory::FourOfAKind, &grouped),
        [(3, _), (2, _)] => value(HandCategory::FullHouse, &grouped),
        _ if flush => value(HandCategory::Flush, &ranks),
        _ if straight_high.is_some() => value(HandCategory::Straight, &[straight_high.unwrap_or(0)]),
        [(3, _), ..] => value(HandCategory::ThreeOfAKind, &grouped),
        [(2, _), (2, _), ..] => value(HandCategory::TwoPair, &grouped),
        [(2, _), ..] => value(HandCategory::OnePair, &grouped),
        _ => value(HandCategory::HighCard, &ranks),
    }
}

fn value(category: HandCategory, tiebreak: &[u8]) -> HandValue {
    HandValue {
        category,
        tiebreak: SmallVec::from_slice(tiebreak),
    }
}

/// High card of a five-rank straight (sorted descending); the wheel is 5-high.
fn straight_high(sorted_desc: &[u8]) -> Option<u8> {
    let distinct = sorted_desc.windows(2).all(|w| w[0] != w[1]);
    if !distinct || sorted_desc.len() != 5 {
        return None;
    }
    if sorted_desc[0] - sorted_desc[4] == 4 {
        return Some(sorted_desc[0]);
    }
    if sorted_desc == [14, 5, 4, 3, 2] {
        return Some(5);
    }
    None
}

/// Treat every card as the given suit (community cards under an eclipse).
pub fn recolor(cards: &[PokerCard], suit: Suit) -> SmallVec<[PokerCard; 7]> {
    cards.iter().map(|c| c.with_suit(suit)).collect()
}

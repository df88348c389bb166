//! Poker faces: suits, ranks and the 52-card river deck.
//!
//! Hole-card Units receive a `PokerCard` face when dealt; community cards
//! are bare `PokerCard` values drawn from the shared river.

use serde::{Deserialize, Serialize};

/// One of the four suits.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// ♠
    Spades,
    /// ♥
    Hearts,
    /// ♦
    Diamonds,
    /// ♣
    Clubs,
}

impl Suit {
    /// All suits in river-deck order.
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    /// Display symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }
}

/// Card rank from Two through Ace. Discriminants are the poker values.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// All ranks, lowest first.
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Numeric poker value (2..=14).
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Rank for a poker value, if it is in 2..=14.
    #[must_use]
    pub fn from_value(value: u8) -> Option<Rank> {
        Rank::ALL.get(usize::from(value).checked_sub(2)?).copied()
    }

    /// The next rank up, saturating at Ace.
    #[must_use]
    pub fn promoted(self) -> Rank {
        Rank::from_value(self.value() + 1).unwrap_or(Rank::Ace)
    }

    /// Jack through Ace.
    #[must_use]
    pub const fn is_face(self) -> bool {
        self.value() >= 11
    }

    /// Short label used in logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

/// A ranked, suited playing card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct PokerCard {
    pub rank: Rank,
    pub suit: Suit,
}

impl PokerCard {
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Same card with a different suit.
    #[must_use]
    pub const fn with_suit(self, suit: Suit) -> Self {
        Self { rank: self.rank, suit }
    }

    /// Same card with a different rank.
    #[must_use]
    pub const fn with_rank(self, rank: Rank) -> Self {
        Self { rank, suit: self.suit }
    }
}

impl std::fmt::Display for PokerCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

/// The 52-card river deck in suit-major order, unshuffled.
#[must_use]
pub fn river_deck() -> Vec<PokerCard> {
    let mut deck = Vec::with_capacity(52);
    for &suit in &Suit::ALL {
        for &rank in &Rank::ALL {
            deck.push(PokerCard::new(rank, suit));
        }
    }
    deck
}

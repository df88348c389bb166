//! Card definitions - static catalog data.
//!
//! `CardDefinition` holds the immutable properties of a card: its category,
//! rarity, mana cost and abilities. Per-match data (a hole card's poker face,
//! remaining charges, granted abilities) lives in `CardInstance`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::ability::{Ability, Keyword};

/// Stable catalog identifier for a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardCategory {
    /// Poker-able card; only Units become hole cards.
    Unit,
    /// Shared board card; at most one is active.
    Location,
    /// One-shot effect, discarded after resolution.
    Event,
    /// Stays in play after resolution.
    Artifact,
}

/// Rarity tier, lowest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    SuperRare,
    Mythic,
    Divine,
}

impl Rarity {
    /// Ordinal weight, Common = 0.
    #[must_use]
    pub const fn weight(self) -> i64 {
        self as i64
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use river_of_ruin::cards::{Ability, CardCategory, CardDefinition, CardId, Keyword};
///
/// let flare = CardDefinition::new(CardId::new(4), "Solar Flare", CardCategory::Event)
///     .with_cost(2)
///     .with_ability(Ability::Overload { cost: 4 });
///
/// assert_eq!(flare.cost(), 2);
/// assert_eq!(flare.overload_cost(), Some(4));
/// assert!(flare.has(Keyword::Overload));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Catalog identifier.
    pub id: CardId,

    /// Display name (used in log lines).
    pub name: String,

    pub category: CardCategory,

    pub rarity: Rarity,

    /// Mana cost; Units have none.
    pub mana_cost: Option<i64>,

    pub abilities: SmallVec<[Ability; 2]>,
}

impl CardDefinition {
    /// Create a new card definition.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, category: CardCategory) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            rarity: Rarity::Common,
            mana_cost: None,
            abilities: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn with_cost(mut self, cost: i64) -> Self {
        self.mana_cost = Some(cost);
        self
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    #[must_use]
    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.abilities.push(ability);
        self
    }

    /// Mana cost, zero when the card has none.
    #[must_use]
    pub fn cost(&self) -> i64 {
        self.mana_cost.unwrap_or(0)
    }

    /// Does any ability carry this keyword?
    #[must_use]
    pub fn has(&self, keyword: Keyword) -> bool {
        self.ability(keyword).is_some()
    }

    /// First ability with this keyword.
    #[must_use]
    pub fn ability(&self, keyword: Keyword) -> Option<&Ability> {
        self.abilities.iter().find(|a| a.keyword() == keyword)
    }

    /// Alternate Overload price, if the card has one.
    #[must_use]
    pub fn overload_cost(&self) -> Option<i64> {
        self.abilities.iter().find_map(|a| match a {
            Ability::Overload { cost } => Some(*cost),
            _ => None,
        })
    }

    /// Can this card be played from hand?
    #[must_use]
    pub fn is_playable(&self) -> bool {
        self.category != CardCategory::Unit
    }

    /// Panics on definitions no catalog may contain.
    pub(crate) fn validate(&self) {
        for ability in &self.abilities {
            ability.validate();
        }
        if let Some(overload) = self.overload_cost() {
            assert!(
                overload > self.cost(),
                "{}: Overload cost must exceed the base cost",
                self.name
            );
        }
        if self.category == CardCategory::Unit {
            assert!(self.mana_cost.is_none(), "{}: Units carry no mana cost", self.name);
        }
    }
}

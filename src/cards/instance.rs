//! Card instances - per-match card state.
//!
//! A `CardInstance` is one physical copy of a catalog card inside a player's
//! pool. It tracks what the catalog cannot: the poker face a hole card was
//! dealt, abilities granted for the round, and charges left on an artifact.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::ability::{Ability, Keyword};
use super::definition::{CardDefinition, CardId};
use super::poker::PokerCard;

/// A card copy inside a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Reference to the catalog definition.
    pub card_id: CardId,

    /// Poker face while dealt as a hole card.
    pub face: Option<PokerCard>,

    /// Abilities granted until the end of the round (Imbue).
    #[serde(default)]
    pub granted: SmallVec<[Ability; 1]>,

    /// Charges remaining on a Charge artifact in play.
    pub charges: Option<u32>,
}

impl CardInstance {
    /// A fresh copy with no round state.
    #[must_use]
    pub fn new(card_id: CardId) -> Self {
        Self {
            card_id,
            face: None,
            granted: SmallVec::new(),
            charges: None,
        }
    }

    /// Assign a poker face (builder pattern).
    #[must_use]
    pub fn with_face(mut self, face: PokerCard) -> Self {
        self.face = Some(face);
        self
    }

    /// Drop everything that only lasts for a round or while in play.
    ///
    /// Called when the card returns to a deck.
    pub fn reset(&mut self) {
        self.face = None;
        self.granted.clear();
        self.charges = None;
    }

    /// Definition abilities followed by granted ones.
    pub fn abilities<'a>(&'a self, def: &'a CardDefinition) -> impl Iterator<Item = &'a Ability> + 'a {
        def.abilities.iter().chain(self.granted.iter())
    }

    /// First ability with this keyword, including granted ones.
    #[must_use]
    pub fn find<'a>(&'a self, def: &'a CardDefinition, keyword: Keyword) -> Option<&'a Ability> {
        self.abilities(def).find(|a| a.keyword() == keyword)
    }
}

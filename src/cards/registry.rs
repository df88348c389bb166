//! Card registry for definition lookup.
//!
//! The `CardRegistry` is the read-only card catalog a match is built from.
//! It keeps registration order so deck building is reproducible, and offers
//! fast lookup by `CardId` during resolution.

use rustc_hash::FxHashMap;

use super::definition::{CardCategory, CardDefinition, CardId};
use super::instance::CardInstance;

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use river_of_ruin::cards::{CardCategory, CardDefinition, CardId, CardRegistry};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardDefinition::new(CardId::new(1), "Lost Signal", CardCategory::Event).with_cost(1));
///
/// let found = registry.get(CardId::new(1)).unwrap();
/// assert_eq!(found.name, "Lost Signal");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardDefinition>,
    order: Vec<CardId>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition.
    ///
    /// Panics if the id is taken or the definition is malformed.
    pub fn register(&mut self, card: CardDefinition) {
        if self.cards.contains_key(&card.id) {
            panic!("Card with ID {:?} already registered", card.id);
        }
        card.validate();
        self.order.push(card.id);
        self.cards.insert(card.id, card);
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    /// All definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.order.iter().filter_map(|id| self.cards.get(id))
    }

    /// Definitions matching a predicate, in registration order.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &CardDefinition>
    where
        F: Fn(&CardDefinition) -> bool,
    {
        self.iter().filter(move |c| predicate(c))
    }

    /// Number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// One copy of every registered card, in registration order.
    #[must_use]
    pub fn full_pool(&self) -> Vec<CardInstance> {
        self.order.iter().copied().map(CardInstance::new).collect()
    }

    /// Instances for an explicit deck list.
    ///
    /// Panics on ids missing from the catalog.
    #[must_use]
    pub fn build_pool(&self, ids: &[CardId]) -> Vec<CardInstance> {
        ids.iter()
            .map(|&id| {
                assert!(self.cards.contains_key(&id), "deck list names unknown card {}", id);
                CardInstance::new(id)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Rarity;

    fn registry() -> CardRegistry {
        let mut registry = CardRegistry::new();
        registry.register(CardDefinition::new(CardId::new(3), "Drifter", CardCategory::Unit));
        registry.register(
            CardDefinition::new(CardId::new(1), "Signal", CardCategory::Event)
                .with_cost(1)
                .with_rarity(Rarity::Common),
        );
        registry.register(CardDefinition::new(CardId::new(8), "Scrap", CardCategory::Artifact).with_cost(3));
        registry
    }

    #[test]
    fn test_registration_order_is_kept() {
        let ids: Vec<_> = registry().iter().map(|c| c.id.raw()).collect();
        assert_eq!(ids, vec![3, 1, 8]);
    }

    #[test]
    fn test_find() {
        let registry = registry();
        let units: Vec<_> = registry.find(|c| c.category == CardCategory::Unit).collect();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].name, "Drifter");

        let cheap: Vec<_> = registry.find(|c| c.cost() < 2).collect();
        assert_eq!(cheap.len(), 2);
    }

    #[test]
    fn test_pools() {
        let registry = registry();
        assert_eq!(registry.full_pool().len(), 3);
        let pool = registry.build_pool(&[CardId::new(1), CardId::new(1)]);
        assert_eq!(pool.len(), 2);
        assert!(pool.iter().all(|c| c.card_id == CardId::new(1)));
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_registration_panics() {
        let mut registry = registry();
        registry.register(CardDefinition::new(CardId::new(3), "Again", CardCategory::Unit));
    }

    #[test]
    #[should_panic(expected = "unknown card")]
    fn test_unknown_deck_entry_panics() {
        let _ = registry().build_pool(&[CardId::new(99)]);
    }
}

//! Card system: poker faces, definitions, instances, and the catalog.
//!
//! ## Key Types
//!
//! - `PokerCard`: Rank + suit, for hole and community cards
//! - `Ability` / `Keyword`: Keyword records with their parameters
//! - `CardDefinition`: Static card data (category, rarity, cost, abilities)
//! - `CardInstance`: One copy inside a match (poker face, charges, grants)
//! - `CardRegistry`: Read-only catalog lookup

pub mod ability;
pub mod catalog;
pub mod definition;
pub mod instance;
pub mod poker;
pub mod registry;

pub use ability::{Ability, Keyword, SynergyMatch};
pub use catalog::standard_catalog;
pub use definition::{CardCategory, CardDefinition, CardId, Rarity};
pub use instance::CardInstance;
pub use poker::{river_deck, PokerCard, Rank, Suit};
pub use registry::CardRegistry;

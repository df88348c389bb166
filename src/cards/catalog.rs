//! The standard card catalog.
//!
//! Card text beyond names is owned by the presentation layer; this table only
//! carries what the rules read. Ids are stable and referenced by the
//! identity scripts in `effects::scripts`.

use super::ability::{Ability, SynergyMatch};
use super::definition::{CardCategory, CardDefinition, CardId, Rarity};
use super::registry::CardRegistry;
use crate::triggers::TrapCondition;

/// Ids of cards with identity-specific logic.
pub mod ids {
    use crate::cards::CardId;

    pub const LOST_SIGNAL: CardId = CardId::new(1);
    pub const ECHOES_IN_THE_VOID: CardId = CardId::new(2);
    pub const SOLAR_FLARE: CardId = CardId::new(4);
    pub const UNSEEN_ENTITIES: CardId = CardId::new(6);
    pub const THE_COLD: CardId = CardId::new(7);
    pub const THE_HUNGER: CardId = CardId::new(12);
    pub const SHIPS_LAST_BREATH: CardId = CardId::new(15);
    pub const LAST_TRANSMISSION: CardId = CardId::new(23);
    pub const SINGULARITY_OF_FEAR: CardId = CardId::new(26);
    pub const ETERNAL_ECLIPSE: CardId = CardId::new(29);
    pub const FINAL_BROADCAST: CardId = CardId::new(33);
    pub const LAST_PLATING: CardId = CardId::new(62);
    pub const MASK_OF_MIDNIGHT_WINGS: CardId = CardId::new(195);
}

const LAST_STAND: Ability = Ability::LastStand { cost: 3 };

fn card(id: u32, name: &str, category: CardCategory, rarity: Rarity) -> CardDefinition {
    CardDefinition::new(CardId::new(id), name, category).with_rarity(rarity)
}

/// Build the standard catalog.
#[must_use]
pub fn standard_catalog() -> CardRegistry {
    use CardCategory::{Artifact, Event, Location, Unit};
    use Rarity::*;

    let cards = [
        card(1, "Lost Signal", Event, Common).with_cost(1).with_ability(Ability::Fate),
        card(2, "Echoes in the Void", Event, Common).with_cost(2).with_ability(Ability::Twin),
        card(3, "The Drifter", Unit, Common).with_ability(Ability::Underdog { mana: 1 }),
        card(4, "Solar Flare", Event, Common).with_cost(2).with_ability(Ability::Overload { cost: 4 }),
        card(5, "Evelyn, The Observer", Unit, Common).with_ability(Ability::Peek { cost: 1 }),
        card(6, "Unseen Entities", Event, Common)
            .with_cost(1)
            .with_ability(Ability::Trap { on: TrapCondition::OpponentBets }),
        card(7, "The Cold Doesn't Care", Event, Common).with_cost(2).with_ability(Ability::Twin),
        card(8, "Message from the Stars", Artifact, Uncommon).with_cost(3).with_ability(Ability::Scrap { draw: 2 }),
        card(9, "Joshua, The Dreamer", Unit, Uncommon)
            .with_ability(Ability::Synergy { matching: SynergyMatch::SuitOrRank, mana: 2 }),
        card(10, "Cracked Reality", Event, Uncommon).with_cost(3).with_ability(Ability::Cascade),
        card(11, "Void Wanderer", Unit, Uncommon).with_ability(Ability::Economist),
        card(12, "The Hunger", Event, SuperRare).with_cost(5).with_ability(Ability::Wager),
        card(13, "Hollow Starlight", Location, Uncommon).with_cost(4).with_ability(Ability::ManaWell { mana: 1 }),
        card(14, "The Watcher Awakens", Unit, Rare).with_ability(Ability::Bulwark),
        card(15, "The Ship's Last Breath", Artifact, Rare).with_cost(4).with_ability(Ability::Chrono { turns: 3 }),
        card(16, "The Devourer of Moons", Unit, Rare).with_ability(Ability::Intimidate { surcharge: 1 }),
        card(17, "Stardust Memories", Event, Rare).with_cost(5).with_ability(Ability::Recall { count: 2 }),
        card(18, "Nova Rebirth", Event, Rare).with_cost(4).with_ability(Ability::Cascade),
        card(19, "Ember, Last Pilot", Unit, SuperRare).with_ability(Ability::Momentum { mana: 3 }),
        card(20, "Nightmare Nebula", Location, Rare).with_cost(5).with_ability(Ability::Volatile { loss: 3 }),
        card(21, "Wylex, The Forgotten", Unit, SuperRare)
            .with_ability(Ability::Intimidate { surcharge: 1 })
            .with_ability(LAST_STAND),
        card(22, "Chrono Rift", Location, SuperRare).with_cost(7).with_ability(Ability::Clarity),
        card(23, "The Last Transmission", Event, SuperRare).with_cost(6).with_ability(Ability::Wager),
        card(24, "Shadow of the Dreadnought", Location, Mythic).with_cost(8).with_ability(Ability::Sanctuary),
        card(25, "The Void Mother", Unit, Divine).with_ability(Ability::GravityWell),
        card(26, "Singularity of Fear", Event, Mythic).with_cost(8).with_ability(Ability::Overload { cost: 12 }),
        card(27, "Omen of the Starborn", Event, Mythic).with_cost(8).with_ability(Ability::Cascade),
        card(28, "The Cosmic Harbinger", Unit, Rare)
            .with_ability(Ability::Synergy { matching: SynergyMatch::Rank, mana: 2 }),
        card(29, "Eternal Eclipse", Event, Uncommon).with_cost(3).with_ability(Ability::Wager),
        card(30, "The Young Explorer", Unit, Common).with_ability(Ability::Underdog { mana: 2 }),
        card(31, "The Violinist's Last Song", Unit, Rare).with_ability(LAST_STAND),
        card(32, "The Child in the Window", Unit, Common).with_ability(Ability::Underdog { mana: 1 }),
        card(33, "Final Broadcast", Event, Uncommon)
            .with_cost(3)
            .with_ability(Ability::Trap { on: TrapCondition::OpponentFolds }),
        card(55, "The Secret Ingredient", Artifact, SuperRare)
            .with_cost(7)
            .with_ability(Ability::Imbue { cost: 2, grant: Box::new(LAST_STAND) }),
        card(59, "Cast Iron Veteran", Artifact, Rare).with_cost(4).with_ability(Ability::Flux),
        card(62, "The Last Plating", Event, Mythic).with_cost(8).with_ability(Ability::Wager),
        card(73, "Tagmaster's Teaching", Artifact, Uncommon).with_cost(3).with_ability(Ability::Charge { charges: 3 }),
        card(195, "Mask of the Midnight Wings", Artifact, Divine)
            .with_cost(9)
            .with_ability(Ability::Chrono { turns: 2 }),
    ];

    let mut registry = CardRegistry::new();
    for definition in cards {
        registry.register(definition);
    }
    registry
}

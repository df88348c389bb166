//! Re-derivation of passive flags.
//!
//! Player passives come from hole cards (granted abilities included) and
//! in-play artifacts. Table flags come from the single active Location.

use crate::cards::{Ability, CardInstance, CardRegistry};
use crate::core::{MatchState, Passives, TableFlags};

fn passives_of<'a>(registry: &CardRegistry, cards: impl Iterator<Item = &'a CardInstance>) -> Passives {
    let mut passives = Passives::default();
    for card in cards {
        let Some(def) = registry.get(card.card_id) else {
            continue;
        };
        for ability in card.abilities(def) {
            match ability {
                Ability::Bulwark => passives.bulwark = true,
                Ability::Intimidate { surcharge } => passives.intimidate += surcharge,
                Ability::Economist => passives.economist = true,
                Ability::Flux => passives.flux = true,
                Ability::GravityWell => passives.gravity_well = true,
                _ => {}
            }
        }
    }
    passives
}

fn table_flags(state: &MatchState, registry: &CardRegistry) -> TableFlags {
    let mut flags = TableFlags::default();
    let Some(location) = state.location else {
        return flags;
    };
    let Some(def) = registry.get(location.card) else {
        return flags;
    };
    for ability in &def.abilities {
        match ability {
            Ability::ManaWell { mana } => flags.mana_well += mana,
            Ability::Sanctuary => flags.sanctuary = true,
            Ability::HighStakes => flags.high_stakes = true,
            Ability::Clarity => flags.clarity = true,
            Ability::Volatile { loss } => flags.volatile = Some(*loss),
            _ => {}
        }
    }
    flags
}

/// Recompute every player's passives and the table flags.
pub fn refresh_passives(state: &mut MatchState, registry: &CardRegistry) {
    let derived = state
        .players
        .map(|_, p| passives_of(registry, p.hole.iter().chain(p.artifacts.iter())));
    for (id, player) in state.players.iter_mut() {
        player.passives = derived[id].clone();
    }
    state.table = table_flags(state, registry);
}

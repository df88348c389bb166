//! Ability records carried by card definitions.
//!
//! An `Ability` names one keyword together with that keyword's parameters.
//! `Keyword` is the bare tag, used for lookups and log text.

use serde::{Deserialize, Serialize};

use crate::triggers::TrapCondition;

/// Which hole-card property a Synergy ability matches on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SynergyMatch {
    /// Other hole card shares suit or rank.
    SuitOrRank,
    /// Other hole card shares rank.
    Rank,
}

/// A keyword plus its parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ability {
    /// Reveal the top of the deck and play the first cheaper non-Event for free.
    Cascade,
    /// Timed effect firing at the start of each of the owner's turns.
    Chrono { turns: u32 },
    /// Armed on play, springs once on the opposing trigger.
    Trap { on: TrapCondition },
    /// Alternate, pricier activation with a stronger outcome.
    Overload { cost: i64 },
    /// Opponent numeric effects reduced by 1; mana when behind on points.
    Bulwark,
    /// Calling the holder costs `surcharge` extra mana.
    Intimidate { surcharge: i64 },
    /// Round-start mana when the other hole card matches.
    Synergy { matching: SynergyMatch, mana: i64 },
    /// Round-start mana after winning the previous showdown.
    Momentum { mana: i64 },
    /// Showdown mana when finishing with High Card or One Pair.
    Underdog { mana: i64 },
    /// Pay at showdown while low on points to promote this card's rank.
    LastStand { cost: i64 },
    /// All-or-nothing card-specific effect.
    Wager,
    /// Pay to grant the nested ability to a hole card for the round.
    Imbue { cost: i64, grant: Box<Ability> },
    /// Stockpile of charges, each drawing a card.
    Charge { charges: u32 },
    /// Hole cards immune to opponent discards; showdown bonus per 10 in the pot.
    Flux,
    /// First betting action each round costs 1 less mana.
    Economist,
    /// Once per round, pay to see the top river card.
    Peek { cost: i64 },
    /// Sacrifice from play to draw cards.
    Scrap { draw: usize },
    /// The card's effect happens twice.
    Twin,
    /// Reveal the river top: face card draws, anything else discards.
    Fate,
    /// Return the highest-cost Units from discard to hand.
    Recall { count: usize },
    /// Location: every player gains mana at the start of their turn.
    ManaWell { mana: i64 },
    /// Location: destroyed after the River, each player loses points.
    Volatile { loss: i64 },
    /// Location: hole cards are revealed.
    Clarity,
    /// Location: showdown losers keep their contribution.
    Sanctuary,
    /// Opponent loses half their mana at showdown.
    GravityWell,
    /// Location: minimum bet doubled.
    HighStakes,
}

/// Keyword tags, one per `Ability` variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    Cascade,
    Chrono,
    Trap,
    Overload,
    Bulwark,
    Intimidate,
    Synergy,
    Momentum,
    Underdog,
    LastStand,
    Wager,
    Imbue,
    Charge,
    Flux,
    Economist,
    Peek,
    Scrap,
    Twin,
    Fate,
    Recall,
    ManaWell,
    Volatile,
    Clarity,
    Sanctuary,
    GravityWell,
    HighStakes,
}

impl Keyword {
    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Keyword::Cascade => "Cascade",
            Keyword::Chrono => "Chrono",
            Keyword::Trap => "Trap",
            Keyword::Overload => "Overload",
            Keyword::Bulwark => "Bulwark",
            Keyword::Intimidate => "Intimidate",
            Keyword::Synergy => "Synergy",
            Keyword::Momentum => "Momentum",
            Keyword::Underdog => "Underdog",
            Keyword::LastStand => "Last Stand",
            Keyword::Wager => "Wager",
            Keyword::Imbue => "Imbue",
            Keyword::Charge => "Charge",
            Keyword::Flux => "Flux",
            Keyword::Economist => "Economist",
            Keyword::Peek => "Peek",
            Keyword::Scrap => "Scrap",
            Keyword::Twin => "Twin",
            Keyword::Fate => "Fate",
            Keyword::Recall => "Echoes of the Past",
            Keyword::ManaWell => "Mana Well",
            Keyword::Volatile => "Volatile",
            Keyword::Clarity => "Clarity",
            Keyword::Sanctuary => "Sanctuary",
            Keyword::GravityWell => "Gravity Well",
            Keyword::HighStakes => "High Stakes",
        }
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Ability {
    /// The keyword tag of this ability.
    #[must_use]
    pub fn keyword(&self) -> Keyword {
        match self {
            Ability::Cascade => Keyword::Cascade,
            Ability::Chrono { .. } => Keyword::Chrono,
            Ability::Trap { .. } => Keyword::Trap,
            Ability::Overload { .. } => Keyword::Overload,
            Ability::Bulwark => Keyword::Bulwark,
            Ability::Intimidate { .. } => Keyword::Intimidate,
            Ability::Synergy { .. } => Keyword::Synergy,
            Ability::Momentum { .. } => Keyword::Momentum,
            Ability::Underdog { .. } => Keyword::Underdog,
            Ability::LastStand { .. } => Keyword::LastStand,
            Ability::Wager => Keyword::Wager,
            Ability::Imbue { .. } => Keyword::Imbue,
            Ability::Charge { .. } => Keyword::Charge,
            Ability::Flux => Keyword::Flux,
            Ability::Economist => Keyword::Economist,
            Ability::Peek { .. } => Keyword::Peek,
            Ability::Scrap { .. } => Keyword::Scrap,
            Ability::Twin => Keyword::Twin,
            Ability::Fate => Keyword::Fate,
            Ability::Recall { .. } => Keyword::Recall,
            Ability::ManaWell { .. } => Keyword::ManaWell,
            Ability::Volatile { .. } => Keyword::Volatile,
            Ability::Clarity => Keyword::Clarity,
            Ability::Sanctuary => Keyword::Sanctuary,
            Ability::GravityWell => Keyword::GravityWell,
            Ability::HighStakes => Keyword::HighStakes,
        }
    }

    /// Panics on parameters no card may carry.
    pub(crate) fn validate(&self) {
        match self {
            Ability::Chrono { turns } => assert!(*turns > 0, "Chrono needs at least one turn"),
            Ability::Charge { charges } => assert!(*charges > 0, "Charge needs at least one charge"),
            Ability::Imbue { cost, grant } => {
                assert!(*cost >= 0, "Imbue cost cannot be negative");
                assert!(
                    !matches!(**grant, Ability::Imbue { .. }),
                    "Imbue cannot grant Imbue"
                );
                grant.validate();
            }
            Ability::LastStand { cost } | Ability::Peek { cost } => {
                assert!(*cost >= 0, "activation cost cannot be negative");
            }
            _ => {}
        }
    }
}

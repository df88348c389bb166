//! Armed traps and Chrono countdowns.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::PlayerId;

use super::condition::TrapCondition;
use super::event::TableEvent;

/// A trap card waiting for its condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmedTrap {
    pub card: CardId,
    pub condition: TrapCondition,
}

impl ArmedTrap {
    #[must_use]
    pub const fn new(card: CardId, condition: TrapCondition) -> Self {
        Self { card, condition }
    }

    /// Would `event` spring this trap for `owner`?
    #[must_use]
    pub fn springs_on(&self, owner: PlayerId, event: &TableEvent) -> bool {
        self.condition.matches(owner, event)
    }
}

/// A Chrono effect counting down the owner's turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedEffect {
    /// Card whose tick logic runs.
    pub card: CardId,
    /// Owner turns left, including the next one.
    pub turns_left: u32,
}

impl TimedEffect {
    #[must_use]
    pub const fn new(card: CardId, turns: u32) -> Self {
        Self { card, turns_left: turns }
    }

    /// Consume one turn. Returns `true` once the effect has expired.
    pub fn tick(&mut self) -> bool {
        self.turns_left = self.turns_left.saturating_sub(1);
        self.turns_left == 0
    }
}

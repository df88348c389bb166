//! Trap conditions.
//!
//! A condition names which opposing table event springs a trap. Conditions
//! only ever match events caused by the trap owner's opponent.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

use super::event::TableEvent;

/// When an armed trap fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrapCondition {
    /// The opponent bets or raises.
    OpponentBets,
    /// The opponent folds.
    OpponentFolds,
}

impl TrapCondition {
    /// Does `event` satisfy this condition for a trap owned by `owner`?
    #[must_use]
    pub fn matches(self, owner: PlayerId, event: &TableEvent) -> bool {
        if event.actor() == owner {
            return false;
        }
        match (self, event) {
            (TrapCondition::OpponentBets, TableEvent::Bet { .. } | TableEvent::Raise { .. }) => true,
            (TrapCondition::OpponentFolds, TableEvent::Fold { .. }) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for TrapCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrapCondition::OpponentBets => f.write_str("opponent bets"),
            TrapCondition::OpponentFolds => f.write_str("opponent folds"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bet_condition() {
        let owner = PlayerId::ONE;
        let cond = TrapCondition::OpponentBets;
        assert!(cond.matches(owner, &TableEvent::Bet { by: PlayerId::TWO }));
        assert!(cond.matches(owner, &TableEvent::Raise { by: PlayerId::TWO }));
        assert!(!cond.matches(owner, &TableEvent::Fold { by: PlayerId::TWO }));
    }

    #[test]
    fn test_own_events_never_match() {
        let owner = PlayerId::TWO;
        assert!(!TrapCondition::OpponentFolds.matches(owner, &TableEvent::Fold { by: owner }));
        assert!(!TrapCondition::OpponentBets.matches(owner, &TableEvent::Bet { by: owner }));
    }
}

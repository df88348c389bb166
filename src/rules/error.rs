//! Reasons an action is rejected.

use thiserror::Error;

use crate::core::Phase;

/// Why an action was rejected. A rejected action never changes the state.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("it is not this player's turn")]
    OutOfTurn,
    #[error("action not allowed during {0}")]
    WrongPhase(Phase),
    #[error("a bet is outstanding")]
    BetOutstanding,
    #[error("there is nothing to call")]
    NothingToCall,
    #[error("bet of {amount} is below the minimum of {minimum}")]
    BetTooSmall { amount: i64, minimum: i64 },
    #[error("raise of {amount} is below the last bet of {minimum}")]
    RaiseTooSmall { amount: i64, minimum: i64 },
    #[error("needs {needed} mana, has {available}")]
    InsufficientMana { needed: i64, available: i64 },
    #[error("needs {needed} points, has {available}")]
    InsufficientPoints { needed: i64, available: i64 },
    #[error("card play is locked this turn")]
    CardPlayLocked,
    #[error("no such card")]
    NoSuchCard,
    #[error("units cannot be played from hand")]
    NotPlayable,
    #[error("already used this round")]
    AlreadyUsed,
    #[error("the deck is empty")]
    EmptyDeck,
    #[error("the card has no such ability")]
    NoAbility,
    #[error("the match is over")]
    MatchOver,
    #[error("this player has already decided")]
    AlreadyDecided,
    #[error("the opponent is all-in")]
    OpponentAllIn,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(ActionError::WrongPhase(Phase::Mulligan).to_string(), "action not allowed during Mulligan");
        assert_eq!(
            ActionError::InsufficientMana { needed: 5, available: 2 }.to_string(),
            "needs 5 mana, has 2"
        );
    }
}

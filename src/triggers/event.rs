//! Table events.
//!
//! Events are fired by the betting rules when a player commits points or
//! gives up the pot. Armed traps listen for the opponent's events.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// A betting event, tagged with the player who caused it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableEvent {
    /// Opened the street with a bet.
    Bet { by: PlayerId },
    /// Raised an outstanding bet.
    Raise { by: PlayerId },
    /// Folded and forfeited the pot.
    Fold { by: PlayerId },
}

impl TableEvent {
    /// The player who caused the event.
    #[must_use]
    pub const fn actor(&self) -> PlayerId {
        match *self {
            TableEvent::Bet { by } | TableEvent::Raise { by } | TableEvent::Fold { by } => by,
        }
    }
}

//! Triggers: table events, trap conditions, and timed effects.
//!
//! ## Key Components
//!
//! - [`TableEvent`]: Something an opponent did that a trap may answer
//! - [`TrapCondition`]: Which opposing event springs a trap
//! - [`ArmedTrap`]: A trap waiting face-down for its condition
//! - [`TimedEffect`]: A Chrono countdown firing at the owner's turn start
//!
//! ## Example Usage
//!
//! ```
//! use river_of_ruin::cards::CardId;
//! use river_of_ruin::core::PlayerId;
//! use river_of_ruin::triggers::{ArmedTrap, TableEvent, TrapCondition};
//!
//! let trap = ArmedTrap::new(CardId::new(6), TrapCondition::OpponentBets);
//! let owner = PlayerId::ONE;
//!
//! assert!(trap.springs_on(owner, &TableEvent::Raise { by: PlayerId::TWO }));
//! assert!(!trap.springs_on(owner, &TableEvent::Raise { by: PlayerId::ONE }));
//! ```

mod condition;
mod event;
mod timed;

pub use condition::TrapCondition;
pub use event::TableEvent;
pub use timed::{ArmedTrap, TimedEffect};

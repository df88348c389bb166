//! Match configuration.
//!
//! `MatchConfig` fixes the numeric rules of a match: starting resources,
//! ante and betting minimums, and a few engine limits. The defaults are the
//! shipping rules; tests shrink or stretch them with the `with_*` builders.

use serde::{Deserialize, Serialize};

/// Numeric rules for one match.
///
/// ## Example
///
/// ```
/// use river_of_ruin::core::MatchConfig;
///
/// let config = MatchConfig::default()
///     .with_starting_points(20)
///     .with_ante(2);
///
/// assert_eq!(config.starting_points, 20);
/// assert_eq!(config.min_bet, 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Points (life total) each player starts the match with.
    pub starting_points: i64,

    /// Mana each player holds at the start of every round.
    pub starting_mana: i64,

    /// Mana gained at the start of each of a player's turns.
    pub mana_per_turn: i64,

    /// Cards dealt to hand each round.
    pub hand_size: usize,

    /// Points each player antes into the pot at round start.
    pub ante: i64,

    /// Smallest opening bet on a street.
    pub min_bet: i64,

    /// Mana paid for each bet, raise or call.
    pub betting_mana_cost: i64,

    /// Mana paid to cycle a card from hand.
    pub cycle_cost: i64,

    /// Cards revealed by Cascade.
    pub cascade_reveal: usize,

    /// Maximum nesting of card resolutions started by other cards.
    pub cascade_depth_limit: usize,

    /// Points at or below which Last Stand becomes available.
    pub last_stand_threshold: i64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            starting_points: 10,
            starting_mana: 10,
            mana_per_turn: 1,
            hand_size: 5,
            ante: 1,
            min_bet: 1,
            betting_mana_cost: 1,
            cycle_cost: 5,
            cascade_reveal: 3,
            cascade_depth_limit: 8,
            last_stand_threshold: 5,
        }
    }
}

impl MatchConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set starting points.
    #[must_use]
    pub fn with_starting_points(mut self, points: i64) -> Self {
        assert!(points > 0, "starting points must be positive");
        self.starting_points = points;
        self
    }

    /// Set per-round mana.
    #[must_use]
    pub fn with_starting_mana(mut self, mana: i64) -> Self {
        assert!(mana >= 0, "starting mana cannot be negative");
        self.starting_mana = mana;
        self
    }

    /// Set the per-turn mana income.
    #[must_use]
    pub fn with_mana_per_turn(mut self, mana: i64) -> Self {
        assert!(mana >= 0, "mana income cannot be negative");
        self.mana_per_turn = mana;
        self
    }

    /// Set hand size.
    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    /// Set the ante.
    #[must_use]
    pub fn with_ante(mut self, ante: i64) -> Self {
        assert!(ante >= 0, "ante cannot be negative");
        self.ante = ante;
        self
    }

    /// Set the minimum opening bet.
    #[must_use]
    pub fn with_min_bet(mut self, min_bet: i64) -> Self {
        assert!(min_bet > 0, "minimum bet must be positive");
        self.min_bet = min_bet;
        self
    }

    /// Set the mana price of betting actions.
    #[must_use]
    pub fn with_betting_mana_cost(mut self, cost: i64) -> Self {
        assert!(cost >= 0, "betting cost cannot be negative");
        self.betting_mana_cost = cost;
        self
    }

    /// Set the cycle price.
    #[must_use]
    pub fn with_cycle_cost(mut self, cost: i64) -> Self {
        self.cycle_cost = cost;
        self
    }

    /// Set the nesting cap for chained resolutions.
    #[must_use]
    pub fn with_cascade_depth_limit(mut self, limit: usize) -> Self {
        assert!(limit > 0, "depth limit must allow the played card itself");
        self.cascade_depth_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MatchConfig::default();
        assert_eq!(config.starting_points, 10);
        assert_eq!(config.starting_mana, 10);
        assert_eq!(config.hand_size, 5);
        assert_eq!(config.ante, 1);
        assert_eq!(config.cascade_reveal, 3);
    }

    #[test]
    fn test_builder() {
        let config = MatchConfig::new()
            .with_min_bet(2)
            .with_betting_mana_cost(0)
            .with_hand_size(3)
            .with_starting_mana(4)
            .with_mana_per_turn(2)
            .with_cycle_cost(3);
        assert_eq!(config.min_bet, 2);
        assert_eq!(config.betting_mana_cost, 0);
        assert_eq!(config.hand_size, 3);
        assert_eq!((config.starting_mana, config.mana_per_turn, config.cycle_cost), (4, 2, 3));
    }

    #[test]
    #[should_panic(expected = "minimum bet must be positive")]
    fn test_zero_min_bet_panics() {
        let _ = MatchConfig::new().with_min_bet(0);
    }

    #[test]
    fn test_config_serde() {
        let config = MatchConfig::default().with_ante(3);
        let json = serde_json::to_string(&config).unwrap();
        let back: MatchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}

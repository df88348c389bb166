//! Player identification and per-seat data storage.
//!
//! ## PlayerId
//!
//! Type-safe seat identifier. A match always has exactly two seats,
//! `PlayerId::ONE` and `PlayerId::TWO`.
//!
//! ## Seats
//!
//! Fixed two-entry storage indexed by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat identifier for one of the two players.
///
/// Indices are 0-based: the first seat is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// The first seat.
    pub const ONE: PlayerId = PlayerId(0);
    /// The second seat.
    pub const TWO: PlayerId = PlayerId(1);

    /// Create a new player ID.
    ///
    /// Panics if `id` is not 0 or 1.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        assert!(id < 2, "a match has exactly two seats");
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other seat.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Both seats in seat order.
    ///
    /// ```
    /// use river_of_ruin::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::both().collect();
    /// assert_eq!(seats, vec![PlayerId::ONE, PlayerId::TWO]);
    /// ```
    pub fn both() -> impl Iterator<Item = PlayerId> {
        [Self::ONE, Self::TWO].into_iter()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// Per-seat data with O(1) access.
///
/// ## Example
///
/// ```
/// use river_of_ruin::core::{PlayerId, Seats};
///
/// let mut points: Seats<i64> = Seats::new(|_| 10);
/// points[PlayerId::TWO] -= 3;
/// assert_eq!(points[PlayerId::ONE], 10);
/// assert_eq!(points[PlayerId::TWO], 7);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seats<T> {
    data: [T; 2],
}

impl<T> Seats<T> {
    /// Create seat data from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::ONE), factory(PlayerId::TWO)],
        }
    }

    /// Create seat data with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            data: [value.clone(), value],
        }
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::both().zip(self.data.iter())
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        PlayerId::both().zip(self.data.iter_mut())
    }

    /// Map every seat to a new value.
    pub fn map<U>(&self, f: impl Fn(PlayerId, &T) -> U) -> Seats<U> {
        Seats {
            data: [f(PlayerId::ONE, &self.data[0]), f(PlayerId::TWO, &self.data[1])],
        }
    }
}

impl<T: Default> Default for Seats<T> {
    fn default() -> Self {
        Self::new(|_| T::default())
    }
}

impl<T> Index<PlayerId> for Seats<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for Seats<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id() {
        let p = PlayerId::new(1);
        assert_eq!(p.index(), 1);
        assert_eq!(format!("{}", p), "Player 2");
    }

    #[test]
    fn test_opponent_is_involution() {
        for p in PlayerId::both() {
            assert_ne!(p, p.opponent());
            assert_eq!(p, p.opponent().opponent());
        }
    }

    #[test]
    #[should_panic(expected = "exactly two seats")]
    fn test_third_seat_panics() {
        let _ = PlayerId::new(2);
    }

    #[test]
    fn test_seats_indexing() {
        let mut seats: Seats<i32> = Seats::new(|p| p.index() as i32 * 10);
        assert_eq!(seats[PlayerId::ONE], 0);
        assert_eq!(seats[PlayerId::TWO], 10);

        seats[PlayerId::ONE] = 5;
        assert_eq!(seats[PlayerId::ONE], 5);
    }

    #[test]
    fn test_seats_iter_and_map() {
        let seats = Seats::with_value(3u32);
        let doubled = seats.map(|_, v| v * 2);
        let collected: Vec<_> = doubled.iter().map(|(p, v)| (p.index(), *v)).collect();
        assert_eq!(collected, vec![(0, 6), (1, 6)]);
    }
}

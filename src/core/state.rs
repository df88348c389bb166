//! Match state: the single value every operation takes and returns.
//!
//! ## PlayerState
//!
//! Per-seat record that persists across rounds: card pool (deck, hand,
//! hole cards, artifacts, discard), mana, points, betting counters and the
//! transient flags abilities read and write.
//!
//! ## MatchState
//!
//! Both players plus the shared table: community cards, the undealt river,
//! the active Location, pot, turn order, phase, the event log and the RNG.
//!
//! Decks, discard piles, the river and both logs use `im` persistent
//! vectors so the engine can copy the whole state per action cheaply.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::ActionRecord;
use super::config::MatchConfig;
use super::player::{PlayerId, Seats};
use super::rng::GameRng;
use crate::cards::{CardId, CardInstance, PokerCard};
use crate::hand::HandValue;
use crate::rules::GameResult;
use crate::triggers::{ArmedTrap, TimedEffect};

/// Round phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Setup,
    Mulligan,
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
    EndRound,
    GameOver,
}

impl Phase {
    /// Is this one of the four betting streets?
    #[must_use]
    pub const fn is_street(self) -> bool {
        matches!(self, Phase::PreFlop | Phase::Flop | Phase::Turn | Phase::River)
    }

    /// The street after this one, `None` after the River.
    #[must_use]
    pub const fn next_street(self) -> Option<Phase> {
        match self {
            Phase::PreFlop => Some(Phase::Flop),
            Phase::Flop => Some(Phase::Turn),
            Phase::Turn => Some(Phase::River),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Phase::Setup => "Setup",
            Phase::Mulligan => "Mulligan",
            Phase::PreFlop => "Pre-Flop",
            Phase::Flop => "Flop",
            Phase::Turn => "Turn",
            Phase::River => "River",
            Phase::Showdown => "Showdown",
            Phase::EndRound => "End of Round",
            Phase::GameOver => "Game Over",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Passive flags derived from a player's hole cards and artifacts.
///
/// Recomputed after every resolution; never written directly by rules.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passives {
    pub bulwark: bool,
    /// Extra mana the opponent pays to call this player.
    pub intimidate: i64,
    pub economist: bool,
    pub flux: bool,
    pub gravity_well: bool,
}

/// Table-wide flags derived from the active Location.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableFlags {
    /// Mana each player gains at their turn start.
    pub mana_well: i64,
    pub sanctuary: bool,
    pub high_stakes: bool,
    pub clarity: bool,
    /// Points each player loses when the Location breaks after the River.
    pub volatile: Option<i64>,
}

/// Opponent-modeling counters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Completed rounds dealt to this player.
    pub rounds: u32,
    /// Rounds in which the player voluntarily bet, raised or called.
    pub voluntary: u32,
    /// Has the player voluntarily put points in this round?
    pub voluntary_this_round: bool,
}

impl PlayerStats {
    /// Share of rounds played voluntarily, `None` before any round ends.
    #[must_use]
    pub fn vpip(&self) -> Option<f64> {
        (self.rounds > 0).then(|| f64::from(self.voluntary) / f64::from(self.rounds))
    }
}

/// Per-seat match record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Draw pile; the front is the top.
    pub deck: Vector<CardInstance>,
    pub hand: Vec<CardInstance>,
    /// Exactly two during a round.
    pub hole: SmallVec<[CardInstance; 2]>,
    /// In-play artifacts, including an owned active Location.
    pub artifacts: Vec<CardInstance>,
    pub discard: Vector<CardInstance>,

    pub mana: i64,
    /// Life total, also the currency wagered into the pot.
    pub points: i64,
    /// Mana owed, settled at the start of the next turn.
    pub mana_debt: i64,

    /// Points committed on the current street.
    pub street_bet: i64,
    /// Points committed this round (ante included).
    pub contributed: i64,
    /// Committed every remaining point to the current pot.
    pub all_in: bool,
    pub has_acted: bool,

    pub mulligan_decided: bool,
    pub has_discarded: bool,
    pub has_peeked: bool,
    /// Top river card seen by this player's Peek this round.
    pub peeked: Option<PokerCard>,
    pub economist_used: bool,
    pub card_play_locked: bool,
    pub wager_committed: bool,

    pub trap: Option<ArmedTrap>,
    /// Trap card held face-down while armed.
    pub trap_card: Option<CardInstance>,
    pub timed: Vec<TimedEffect>,

    pub passives: Passives,
    pub stats: PlayerStats,
}

impl PlayerState {
    /// A player holding `pool` as their deck.
    #[must_use]
    pub fn new(pool: Vec<CardInstance>, points: i64) -> Self {
        Self {
            deck: pool.into_iter().collect(),
            hand: Vec::new(),
            hole: SmallVec::new(),
            artifacts: Vec::new(),
            discard: Vector::new(),
            mana: 0,
            points,
            mana_debt: 0,
            street_bet: 0,
            contributed: 0,
            all_in: false,
            has_acted: false,
            mulligan_decided: false,
            has_discarded: false,
            has_peeked: false,
            peeked: None,
            economist_used: false,
            card_play_locked: false,
            wager_committed: false,
            trap: None,
            trap_card: None,
            timed: Vec::new(),
            passives: Passives::default(),
            stats: PlayerStats::default(),
        }
    }

    /// Poker faces of the hole cards.
    pub fn hole_faces(&self) -> impl Iterator<Item = PokerCard> + '_ {
        self.hole.iter().filter_map(|c| c.face)
    }

    /// Out of points with a stake in the current pot.
    #[must_use]
    pub fn is_all_in(&self) -> bool {
        self.all_in && self.points == 0
    }

    /// Knocked out: below zero, or at zero without an all-in stake.
    #[must_use]
    pub fn is_eliminated(&self) -> bool {
        self.points < 0 || (self.points == 0 && !self.all_in)
    }

    /// Every card this player owns, in zone order.
    pub fn all_cards(&self) -> impl Iterator<Item = &CardInstance> {
        self.deck
            .iter()
            .chain(self.hand.iter())
            .chain(self.hole.iter())
            .chain(self.artifacts.iter())
            .chain(self.discard.iter())
            .chain(self.trap_card.iter())
    }

    /// Index of an in-play artifact by card id.
    #[must_use]
    pub fn artifact_index(&self, card: CardId) -> Option<usize> {
        self.artifacts.iter().position(|c| c.card_id == card)
    }
}

/// The single active Location and who played it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRef {
    pub owner: PlayerId,
    pub card: CardId,
}

/// Outcome of the last showdown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowdownReport {
    pub hands: Seats<Option<HandValue>>,
    /// `None` on a split pot.
    pub winner: Option<PlayerId>,
    /// Net points each player received from the pot.
    pub payouts: Seats<i64>,
}

/// Complete match state.
///
/// ## Example
///
/// ```
/// use river_of_ruin::cards::standard_catalog;
/// use river_of_ruin::core::{GameRng, MatchConfig, MatchState, Phase, Seats};
///
/// let catalog = standard_catalog();
/// let state = MatchState::new(MatchConfig::default(), Seats::new(|_| catalog.full_pool()), GameRng::new(1));
/// assert_eq!(state.phase, Phase::Setup);
/// assert_eq!(state.pot, 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub config: MatchConfig,
    pub players: Seats<PlayerState>,

    /// Revealed community cards (0-5).
    pub community: SmallVec<[PokerCard; 5]>,
    /// Undealt river; the front is the top.
    pub river: Vector<PokerCard>,
    pub location: Option<LocationRef>,
    pub table: TableFlags,
    /// Community cards count as Spades for the rest of the round.
    pub spades_round: bool,

    pub pot: i64,
    pub phase: Phase,
    /// Round number, 1-based once dealt.
    pub round: u32,
    /// Whose turn it is.
    pub active: PlayerId,
    /// Who opens each street this round.
    pub first_to_act: PlayerId,
    pub last_bettor: Option<PlayerId>,
    pub last_bet_size: i64,

    pub last_showdown_winner: Option<PlayerId>,
    pub previous_round_had_showdown: bool,
    pub showdown: Option<ShowdownReport>,
    pub result: Option<GameResult>,

    /// Append-only plain-text event log.
    pub log: Vector<String>,
    pub history: Vector<ActionRecord>,
    pub sequence: u32,

    pub rng: GameRng,
}

impl MatchState {
    /// A fresh match before the first deal.
    #[must_use]
    pub fn new(config: MatchConfig, pools: Seats<Vec<CardInstance>>, rng: GameRng) -> Self {
        let points = config.starting_points;
        let players = pools.map(|_, pool| PlayerState::new(pool.clone(), points));
        let min_bet = config.min_bet;
        Self {
            config,
            players,
            community: SmallVec::new(),
            river: Vector::new(),
            location: None,
            table: TableFlags::default(),
            spades_round: false,
            pot: 0,
            phase: Phase::Setup,
            round: 0,
            active: PlayerId::ONE,
            first_to_act: PlayerId::ONE,
            last_bettor: None,
            last_bet_size: min_bet,
            last_showdown_winner: None,
            previous_round_had_showdown: false,
            showdown: None,
            result: None,
            log: Vector::new(),
            history: Vector::new(),
            sequence: 0,
            rng,
        }
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &PlayerState {
        &self.players[id]
    }

    /// Append a line to the event log.
    pub fn log(&mut self, line: impl Into<String>) {
        self.log.push_back(line.into());
    }

    /// Points `player` must add to match the opponent's street bet.
    #[must_use]
    pub fn to_call(&self, player: PlayerId) -> i64 {
        (self.players[player.opponent()].street_bet - self.players[player].street_bet).max(0)
    }

    /// Has the current street been opened by a bet?
    #[must_use]
    pub fn bet_outstanding(&self) -> bool {
        self.last_bettor.is_some()
    }

    /// Smallest legal opening bet right now.
    #[must_use]
    pub fn min_bet(&self) -> i64 {
        if self.table.high_stakes {
            self.config.min_bet * 2
        } else {
            self.config.min_bet
        }
    }

    /// Has the match ended?
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Encode a snapshot for the presentation layer.
    pub fn encode(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode a snapshot produced by [`MatchState::encode`].
    pub fn decode(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, Rank, Suit};

    fn state() -> MatchState {
        let pool = vec![CardInstance::new(CardId::new(3)), CardInstance::new(CardId::new(1))];
        MatchState::new(MatchConfig::default(), Seats::with_value(pool), GameRng::new(11))
    }

    #[test]
    fn test_new_match_state() {
        let state = state();
        assert_eq!(state.phase, Phase::Setup);
        for (_, player) in state.players.iter() {
            assert_eq!(player.deck.len(), 2);
            assert_eq!(player.points, 10);
        }
    }

    #[test]
    fn test_to_call_is_gap() {
        let mut state = state();
        state.players[PlayerId::ONE].street_bet = 3;
        state.players[PlayerId::TWO].street_bet = 1;
        assert_eq!(state.to_call(PlayerId::TWO), 2);
        assert_eq!(state.to_call(PlayerId::ONE), 0);
    }

    #[test]
    fn test_min_bet_doubles_under_high_stakes() {
        let mut state = state();
        assert_eq!(state.min_bet(), 1);
        state.table.high_stakes = true;
        assert_eq!(state.min_bet(), 2);
    }

    #[test]
    fn test_phase_progression() {
        assert_eq!(Phase::PreFlop.next_street(), Some(Phase::Flop));
        assert_eq!(Phase::River.next_street(), None);
        assert!(Phase::Turn.is_street());
        assert!(!Phase::Mulligan.is_street());
    }

    #[test]
    fn test_all_in_is_not_eliminated() {
        let mut player = PlayerState::new(Vec::new(), 0);
        assert!(!player.is_all_in());
        assert!(player.is_eliminated());
        player.all_in = true;
        assert!(player.is_all_in());
        assert!(!player.is_eliminated());
        player.points = -1;
        assert!(player.is_eliminated());
    }

    #[test]
    fn test_hole_faces() {
        let mut player = PlayerState::new(Vec::new(), 10);
        player.hole.push(CardInstance::new(CardId::new(3)).with_face(PokerCard::new(Rank::Two, Suit::Clubs)));
        player.hole.push(CardInstance::new(CardId::new(5)));
        assert_eq!(player.hole_faces().count(), 1);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut state = state();
        state.log("Round 1 begins.");
        let bytes = state.encode().unwrap();
        let back = MatchState::decode(&bytes).unwrap();
        assert_eq!(back, state);
    }
}

//! Player actions and their intake form.
//!
//! The presentation layer submits an action name plus an optional payload,
//! e.g. `BET {amount}` or `PLAY_CARD {cardIndex, isOverload}`.
//! [`Action::parse`] turns that into a typed [`Action`]; names it does not
//! know, or payloads missing a required field, yield `None` and the caller
//! treats the request as a no-op.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

use super::player::PlayerId;

/// A complete player action.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Keep the dealt hand (Mulligan phase).
    KeepHand,
    /// Redraw the hand once (Mulligan phase).
    Mulligan,
    Check,
    /// Open the street for `amount` points.
    Bet { amount: i64 },
    Call,
    /// Call and raise by `amount` points on top.
    Raise { amount: i64 },
    Fold,
    /// Play the hand card at `card_index`, optionally at its Overload price.
    PlayCard { card_index: usize, overload: bool },
    /// Once per round: discard a hand card and draw a replacement.
    Discard { card_index: usize },
    /// Pay mana to discard a hand card and draw a replacement.
    Cycle { card_index: usize },
    /// Look at the top river card (hole card with Peek).
    Peek,
    /// Remove a charge from an in-play artifact to draw.
    UseCharge { card_id: CardId },
    /// Sacrifice an in-play artifact to draw.
    Scrap { card_id: CardId },
    /// Grant an artifact's Imbue ability to a hole card.
    Imbue { card_id: CardId },
    /// Deal the next round after a round has ended.
    NextRound,
}

/// Optional payload fields accompanying an action name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPayload {
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub card_index: Option<usize>,
    #[serde(default)]
    pub is_overload: Option<bool>,
    #[serde(default)]
    pub card_id: Option<u32>,
}

impl Action {
    /// Build an action from its wire name and payload.
    ///
    /// ```
    /// use river_of_ruin::core::{Action, ActionPayload};
    ///
    /// let payload = ActionPayload { amount: Some(2), ..Default::default() };
    /// assert_eq!(Action::parse("BET", Some(&payload)), Some(Action::Bet { amount: 2 }));
    /// assert_eq!(Action::parse("BET", None), None);
    /// assert_eq!(Action::parse("DANCE", None), None);
    /// ```
    #[must_use]
    pub fn parse(name: &str, payload: Option<&ActionPayload>) -> Option<Action> {
        let empty = ActionPayload::default();
        let p = payload.unwrap_or(&empty);
        let action = match name {
            "KEEP_HAND" => Action::KeepHand,
            "MULLIGAN" => Action::Mulligan,
            "CHECK" => Action::Check,
            "BET" => Action::Bet { amount: p.amount? },
            "CALL" => Action::Call,
            "RAISE" => Action::Raise { amount: p.amount? },
            "FOLD" => Action::Fold,
            "PLAY_CARD" => Action::PlayCard {
                card_index: p.card_index?,
                overload: p.is_overload.unwrap_or(false),
            },
            "DISCARD" => Action::Discard { card_index: p.card_index? },
            "MANA_SINK_CYCLE" | "CYCLE" => Action::Cycle { card_index: p.card_index? },
            "PEEK" => Action::Peek,
            "USE_CHARGE" => Action::UseCharge { card_id: CardId::new(p.card_id?) },
            "SCRAP" => Action::Scrap { card_id: CardId::new(p.card_id?) },
            "IMBUE" => Action::Imbue { card_id: CardId::new(p.card_id?) },
            "NEXT_ROUND" => Action::NextRound,
            _ => return None,
        };
        Some(action)
    }

    /// Wire name of this action.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Action::KeepHand => "KEEP_HAND",
            Action::Mulligan => "MULLIGAN",
            Action::Check => "CHECK",
            Action::Bet { .. } => "BET",
            Action::Call => "CALL",
            Action::Raise { .. } => "RAISE",
            Action::Fold => "FOLD",
            Action::PlayCard { .. } => "PLAY_CARD",
            Action::Discard { .. } => "DISCARD",
            Action::Cycle { .. } => "MANA_SINK_CYCLE",
            Action::Peek => "PEEK",
            Action::UseCharge { .. } => "USE_CHARGE",
            Action::Scrap { .. } => "SCRAP",
            Action::Imbue { .. } => "IMBUE",
            Action::NextRound => "NEXT_ROUND",
        }
    }
}

/// An accepted action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Round number when the action was taken.
    pub round: u32,

    /// Sequence number within the round (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, round: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            round,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_round_trip() {
        let payload = ActionPayload {
            amount: Some(3),
            card_index: Some(1),
            is_overload: Some(true),
            card_id: Some(73),
        };
        let names = [
            "KEEP_HAND", "MULLIGAN", "CHECK", "BET", "CALL", "RAISE", "FOLD", "PLAY_CARD", "DISCARD",
            "MANA_SINK_CYCLE", "PEEK", "USE_CHARGE", "SCRAP", "IMBUE", "NEXT_ROUND",
        ];
        for name in names {
            let action = Action::parse(name, Some(&payload)).unwrap();
            assert_eq!(action.name(), name);
        }
    }

    #[test]
    fn test_play_card_payload() {
        let payload: ActionPayload = serde_json::from_str(r#"{"cardIndex": 2, "isOverload": true}"#).unwrap();
        assert_eq!(
            Action::parse("PLAY_CARD", Some(&payload)),
            Some(Action::PlayCard { card_index: 2, overload: true })
        );

        let plain: ActionPayload = serde_json::from_str(r#"{"cardIndex": 0}"#).unwrap();
        assert_eq!(
            Action::parse("PLAY_CARD", Some(&plain)),
            Some(Action::PlayCard { card_index: 0, overload: false })
        );
    }

    #[test]
    fn test_missing_payload_is_rejected() {
        assert_eq!(Action::parse("RAISE", None), None);
        assert_eq!(Action::parse("SCRAP", Some(&ActionPayload::default())), None);
        assert_eq!(Action::parse("check", None), None);
    }

    #[test]
    fn test_action_record() {
        let record = ActionRecord::new(PlayerId::TWO, Action::Fold, 4, 9);
        assert_eq!(record.player, PlayerId::TWO);
        assert_eq!(record.round, 4);
        assert_eq!(record.sequence, 9);
    }
}

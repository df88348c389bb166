//! Declarative keyword handling.
//!
//! ## Play keywords
//!
//! [`apply`] runs the keyword pass for a played card: Cascade, Chrono,
//! Trap, Recall and Fate. Passive keywords (Bulwark, Intimidate, Flux and
//! the Location keywords) are read by [`super::passives`] instead.
//!
//! ## Round keywords
//!
//! Synergy and Momentum fire at round start; Last Stand and Underdog at
//! showdown.

use crate::cards::{Ability, CardCategory, CardDefinition, CardInstance, CardRegistry, Keyword, Rank, SynergyMatch};
use crate::core::{MatchState, PlayerId};
use crate::hand::HandCategory;
use crate::triggers::{ArmedTrap, TimedEffect};

use super::ops::{card_name, discard_from_hand, draw, gain_mana};
use super::resolver::{Play, Resolution};

/// What the keyword pass decided about the played card itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeywordOutcome {
    /// The card was set as a trap and stays out of the discard.
    pub armed_trap: bool,
}

/// Run every play keyword `play` carries.
pub fn apply(res: &mut Resolution<'_>, play: &Play, def: &CardDefinition) -> KeywordOutcome {
    let mut outcome = KeywordOutcome::default();
    for ability in play.card.abilities(def) {
        match ability {
            Ability::Cascade => cascade(res, play, def),
            Ability::Chrono { turns } => {
                res.state.players[play.player].timed.push(TimedEffect::new(def.id, *turns));
                res.state.log(format!("{} starts a {}-turn Chrono effect.", def.name, turns));
            }
            Ability::Trap { on } => {
                res.state.players[play.player].trap = Some(ArmedTrap::new(def.id, *on));
                res.state.log(format!("{} sets a trap.", play.player));
                outcome.armed_trap = true;
            }
            Ability::Recall { count } => recall(res, play.player, *count),
            Ability::Fate => fate(res, play.player),
            _ => {}
        }
        if res.state.is_over() {
            break;
        }
    }
    outcome
}

/// Reveal the top cards and queue the first cheaper non-Event.
fn cascade(res: &mut Resolution<'_>, play: &Play, def: &CardDefinition) {
    if play.depth >= res.state.config.cascade_depth_limit {
        res.state.log("The cascade collapses on itself.");
        return;
    }
    let registry = res.registry;
    let reveal = res.state.config.cascade_reveal;
    let deck = &mut res.state.players[play.player].deck;
    let mut revealed: Vec<CardInstance> = (0..reveal).map_while(|_| deck.pop_front()).collect();
    if revealed.is_empty() {
        res.state.log("Cascade finds an empty deck.");
        return;
    }

    let names: Vec<&str> = revealed.iter().map(|c| card_name(registry, c.card_id)).collect();
    res.state.log(format!("Cascade reveals {}.", names.join(", ")));

    let casting = def.cost();
    let hit = revealed.iter().position(|c| {
        registry
            .get(c.card_id)
            .is_some_and(|d| d.category != CardCategory::Event && d.cost() < casting)
    });

    match hit {
        Some(index) => {
            let card = revealed.remove(index);
            res.state.log(format!("Cascade hits {}!", card_name(registry, card.card_id)));
            res.enqueue(Play::new(play.player, card).at_depth(play.depth + 1));
            for card in revealed {
                let len = res.state.players[play.player].deck.len();
                let at = res.state.rng.gen_range_usize(0..len + 1);
                res.state.players[play.player].deck.insert(at, card);
            }
        }
        None => {
            res.state.log("Cascade misses.");
            let deck = &mut res.state.players[play.player].deck;
            for card in revealed.into_iter().rev() {
                deck.push_front(card);
            }
        }
    }
}

/// Return the `count` most expensive Units from discard to hand.
fn recall(res: &mut Resolution<'_>, player: PlayerId, count: usize) {
    let registry = res.registry;
    let seat = &mut res.state.players[player];
    let mut units: Vec<(usize, i64, i64)> = seat
        .discard
        .iter()
        .enumerate()
        .filter_map(|(i, c)| {
            registry
                .get(c.card_id)
                .filter(|d| d.category == CardCategory::Unit)
                .map(|d| (i, d.cost(), d.rarity.weight()))
        })
        .collect();
    units.sort_by(|a, b| b.1.cmp(&a.1).then(b.2.cmp(&a.2)).then(a.0.cmp(&b.0)));

    let mut picked: Vec<usize> = units.into_iter().take(count).map(|(i, _, _)| i).collect();
    if picked.is_empty() {
        res.state.log("Echoes of the Past finds no Units to return.");
        return;
    }
    picked.sort_unstable_by(|a, b| b.cmp(a));
    let mut returned: Vec<CardInstance> = picked.into_iter().map(|i| seat.discard.remove(i)).collect();
    returned.reverse();

    let names: Vec<&str> = returned.iter().map(|c| card_name(registry, c.card_id)).collect();
    let line = format!("{} returns {} to hand.", player, names.join(", "));
    seat.hand.extend(returned);
    res.state.log(line);
}

/// Read the top river card: a face card draws, anything else discards.
fn fate(res: &mut Resolution<'_>, player: PlayerId) {
    let Some(top) = res.state.river.front().copied() else {
        res.state.log("Fate finds the river empty.");
        return;
    };
    res.state.log(format!("Fate reveals {}.", top));
    if top.rank.is_face() {
        draw(res.state, player, 1);
    } else if res.state.players[player].passives.flux {
        res.state.log(format!("{}'s Flux resists the discard.", player));
    } else if let Some(last) = res.state.players[player].hand.len().checked_sub(1) {
        if let Some(card) = discard_from_hand(res.state, player, last) {
            let name = res.name(card);
            res.state.log(format!("{} discards {}.", player, name));
        }
    }
}

fn synergy_holds(matching: SynergyMatch, this: &CardInstance, other: &CardInstance) -> bool {
    match (this.face, other.face) {
        (Some(a), Some(b)) => match matching {
            SynergyMatch::SuitOrRank => a.suit == b.suit || a.rank == b.rank,
            SynergyMatch::Rank => a.rank == b.rank,
        },
        _ => false,
    }
}

/// Round-start mana: Synergy and Momentum.
pub fn round_start(state: &mut MatchState, registry: &CardRegistry) {
    for player in PlayerId::both() {
        let seat = &state.players[player];
        let mut grants: Vec<(&str, Keyword, i64)> = Vec::new();
        for (i, card) in seat.hole.iter().enumerate() {
            let Some(def) = registry.get(card.card_id) else {
                continue;
            };
            for ability in card.abilities(def) {
                match ability {
                    Ability::Synergy { matching, mana } => {
                        let other = seat.hole.iter().enumerate().find(|(j, _)| *j != i).map(|(_, c)| c);
                        if other.is_some_and(|o| synergy_holds(*matching, card, o)) {
                            grants.push((def.name.as_str(), Keyword::Synergy, *mana));
                        }
                    }
                    Ability::Momentum { mana } if state.last_showdown_winner == Some(player) => {
                        grants.push((def.name.as_str(), Keyword::Momentum, *mana));
                    }
                    _ => {}
                }
            }
        }
        for (name, keyword, mana) in grants {
            state.log(format!("{}'s {} triggers {}.", player, name, keyword));
            gain_mana(state, player, mana);
        }
    }
}

/// Paid Last Stand promotions before showdown evaluation.
pub fn last_stand(state: &mut MatchState, registry: &CardRegistry) {
    let threshold = state.config.last_stand_threshold;
    for player in PlayerId::both() {
        if state.players[player].points > threshold {
            continue;
        }
        for i in 0..state.players[player].hole.len() {
            let seat = &mut state.players[player];
            let card = &seat.hole[i];
            let Some(def) = registry.get(card.card_id) else {
                continue;
            };
            let Some(Ability::LastStand { cost }) = card.find(def, Keyword::LastStand).cloned() else {
                continue;
            };
            let Some(face) = card.face.filter(|f| f.rank != Rank::Ace) else {
                continue;
            };
            if seat.mana < cost {
                continue;
            }
            seat.mana -= cost;
            let promoted = face.with_rank(face.rank.promoted());
            seat.hole[i].face = Some(promoted);
            state.log(format!("{} pays {} mana: Last Stand promotes {} to {}.", player, cost, face, promoted));
        }
    }
}

/// Underdog mana for finishing the showdown with a weak hand.
pub fn underdog(state: &mut MatchState, registry: &CardRegistry, player: PlayerId, category: HandCategory) {
    if category > HandCategory::OnePair {
        return;
    }
    let mana: i64 = state.players[player]
        .hole
        .iter()
        .filter_map(|card| {
            let def = registry.get(card.card_id)?;
            match card.find(def, Keyword::Underdog)? {
                Ability::Underdog { mana } => Some(*mana),
                _ => None,
            }
        })
        .sum();
    if mana > 0 {
        state.log(format!("{}'s Underdog rallies.", player));
        gain_mana(state, player, mana);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{standard_catalog, CardId, PokerCard, Suit};
    use crate::core::{GameRng, MatchConfig, Seats};

    fn state() -> MatchState {
        MatchState::new(MatchConfig::default(), Seats::default(), GameRng::new(8))
    }

    fn unit(id: u32, rank: Rank, suit: Suit) -> CardInstance {
        CardInstance::new(CardId::new(id)).with_face(PokerCard::new(rank, suit))
    }

    #[test]
    fn test_synergy_needs_a_match() {
        let registry = standard_catalog();
        let mut state = state();
        state.players[PlayerId::ONE].hole.push(unit(9, Rank::Four, Suit::Hearts));
        state.players[PlayerId::ONE].hole.push(unit(3, Rank::King, Suit::Hearts));
        state.players[PlayerId::TWO].hole.push(unit(28, Rank::Four, Suit::Hearts));
        state.players[PlayerId::TWO].hole.push(unit(3, Rank::King, Suit::Hearts));

        round_start(&mut state, &registry);

        assert_eq!(state.players[PlayerId::ONE].mana, 2);
        assert_eq!(state.players[PlayerId::TWO].mana, 0);
    }

    #[test]
    fn test_momentum_rewards_last_winner() {
        let registry = standard_catalog();
        let mut state = state();
        state.players[PlayerId::TWO].hole.push(unit(19, Rank::Two, Suit::Clubs));
        state.players[PlayerId::TWO].hole.push(unit(3, Rank::Nine, Suit::Hearts));
        round_start(&mut state, &registry);
        assert_eq!(state.players[PlayerId::TWO].mana, 0);

        state.last_showdown_winner = Some(PlayerId::TWO);
        round_start(&mut state, &registry);
        assert_eq!(state.players[PlayerId::TWO].mana, 3);
    }

    #[test]
    fn test_last_stand_promotes_when_low() {
        let registry = standard_catalog();
        let mut state = state();
        let seat = &mut state.players[PlayerId::ONE];
        seat.hole.push(unit(31, Rank::Queen, Suit::Spades));
        seat.hole.push(unit(31, Rank::Ace, Suit::Clubs));
        seat.mana = 4;
        seat.points = 6;

        last_stand(&mut state, &registry);
        assert_eq!(state.players[PlayerId::ONE].hole[0].face.map(|f| f.rank), Some(Rank::Queen));

        state.players[PlayerId::ONE].points = 5;
        last_stand(&mut state, &registry);
        let seat = &state.players[PlayerId::ONE];
        assert_eq!(seat.hole[0].face.map(|f| f.rank), Some(Rank::King));
        assert_eq!(seat.hole[1].face.map(|f| f.rank), Some(Rank::Ace));
        assert_eq!(seat.mana, 1);
    }

    #[test]
    fn test_underdog_only_for_weak_hands() {
        let registry = standard_catalog();
        let mut state = state();
        state.players[PlayerId::ONE].hole.push(unit(30, Rank::Two, Suit::Clubs));
        state.players[PlayerId::ONE].hole.push(unit(32, Rank::Three, Suit::Clubs));
        underdog(&mut state, &registry, PlayerId::ONE, HandCategory::TwoPair);
        assert_eq!(state.players[PlayerId::ONE].mana, 0);
        underdog(&mut state, &registry, PlayerId::ONE, HandCategory::OnePair);
        assert_eq!(state.players[PlayerId::ONE].mana, 3);
    }
}

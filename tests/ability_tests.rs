//! Ability Resolution Engine integration tests.
//!
//! Keyword behavior is driven through `AbilityEngine` on hand-built decks,
//! and traps and Overload through the full round engine.

use river_of_ruin::cards::catalog::ids;
use river_of_ruin::cards::{standard_catalog, Ability, CardCategory, CardDefinition, CardId, CardInstance, CardRegistry};
use river_of_ruin::core::{Action, GameRng, MatchConfig, MatchState, PlayerId, Seats};
use river_of_ruin::effects::{AbilityEngine, ScriptRegistry};
use river_of_ruin::rules::{RoundEngine, RulesEngine};

const RIFT: CardId = CardId::new(900);
const DRIFTER: CardId = CardId::new(3);
const TAGMASTER: CardId = CardId::new(73);

/// The standard catalog plus a five-cost Cascade event.
fn cascade_registry() -> CardRegistry {
    let mut registry = standard_catalog();
    registry.register(
        CardDefinition::new(RIFT, "Test Rift", CardCategory::Event)
            .with_cost(5)
            .with_ability(Ability::Cascade),
    );
    registry
}

fn blank_state(seed: u64) -> MatchState {
    MatchState::new(MatchConfig::default(), Seats::default(), GameRng::new(seed))
}

fn stack_deck(state: &mut MatchState, player: PlayerId, cards: &[CardId]) {
    state.players[player].deck = cards.iter().map(|&id| CardInstance::new(id)).collect();
}

fn deck_ids(state: &MatchState, player: PlayerId) -> Vec<CardId> {
    state.players[player].deck.iter().map(|c| c.card_id).collect()
}

#[test]
fn test_cascade_plays_first_cheaper_non_event() {
    let registry = cascade_registry();
    let scripts = ScriptRegistry::standard();
    let engine = AbilityEngine::new(&registry, &scripts);
    let mut state = blank_state(3);
    stack_deck(&mut state, PlayerId::ONE, &[ids::LOST_SIGNAL, TAGMASTER, ids::SOLAR_FLARE, DRIFTER]);

    engine.resolve(&mut state, PlayerId::ONE, CardInstance::new(RIFT), false);

    let seat = &state.players[PlayerId::ONE];
    assert_eq!(seat.artifacts.len(), 1);
    assert_eq!(seat.artifacts[0].card_id, TAGMASTER);
    assert_eq!(seat.artifacts[0].charges, Some(3));
    assert!(seat.discard.iter().any(|c| c.card_id == RIFT));

    // The two misses go back in reveal order, each at a seeded position in
    // what is left of the deck.
    let mut rng = GameRng::new(3);
    let mut expected = vec![DRIFTER];
    for card in [ids::LOST_SIGNAL, ids::SOLAR_FLARE] {
        let at = rng.gen_range_usize(0..expected.len() + 1);
        expected.insert(at, card);
    }
    assert_eq!(deck_ids(&state, PlayerId::ONE), expected);
    assert_eq!(state.rng, rng);
}

#[test]
fn test_cascade_reinsertion_follows_the_seed() {
    let registry = cascade_registry();
    let scripts = ScriptRegistry::standard();
    let engine = AbilityEngine::new(&registry, &scripts);
    let deck = [ids::LOST_SIGNAL, TAGMASTER, ids::SOLAR_FLARE, DRIFTER, ids::THE_COLD, ids::THE_HUNGER];

    let orders: Vec<Vec<CardId>> = (0..2)
        .map(|_| {
            let mut state = blank_state(11);
            stack_deck(&mut state, PlayerId::ONE, &deck);
            engine.resolve(&mut state, PlayerId::ONE, CardInstance::new(RIFT), false);
            deck_ids(&state, PlayerId::ONE)
        })
        .collect();

    assert_eq!(orders[0], orders[1]);
    assert_eq!(orders[0].len(), 5);
    assert!(!orders[0].contains(&TAGMASTER));
}

#[test]
fn test_cascade_miss_restores_deck_order() {
    let registry = cascade_registry();
    let scripts = ScriptRegistry::standard();
    let engine = AbilityEngine::new(&registry, &scripts);
    let mut state = blank_state(3);
    let order = [ids::LOST_SIGNAL, ids::SOLAR_FLARE, ids::SINGULARITY_OF_FEAR, DRIFTER];
    stack_deck(&mut state, PlayerId::ONE, &order);

    engine.resolve(&mut state, PlayerId::ONE, CardInstance::new(RIFT), false);

    assert_eq!(deck_ids(&state, PlayerId::ONE), order.to_vec());
    assert!(state.players[PlayerId::ONE].artifacts.is_empty());
    assert_eq!(state.players[PlayerId::TWO].points, 10);
}

#[test]
fn test_cascade_on_empty_deck_fizzles() {
    let registry = cascade_registry();
    let scripts = ScriptRegistry::standard();
    let engine = AbilityEngine::new(&registry, &scripts);
    let mut state = blank_state(3);

    engine.resolve(&mut state, PlayerId::ONE, CardInstance::new(RIFT), false);

    assert_eq!(state.players[PlayerId::ONE].discard.len(), 1);
    assert!(state.players[PlayerId::ONE].deck.is_empty());
}

#[test]
fn test_cascade_chain_stops_at_depth_limit() {
    let relay = CardId::new(901);
    let mut registry = cascade_registry();
    registry.register(
        CardDefinition::new(relay, "Test Relay", CardCategory::Artifact)
            .with_cost(4)
            .with_ability(Ability::Cascade),
    );
    let scripts = ScriptRegistry::standard();
    let engine = AbilityEngine::new(&registry, &scripts);
    let config = MatchConfig::default().with_cascade_depth_limit(1);
    let mut state = MatchState::new(config, Seats::default(), GameRng::new(3));
    stack_deck(&mut state, PlayerId::ONE, &[relay, TAGMASTER, DRIFTER, ids::LOST_SIGNAL]);

    engine.resolve(&mut state, PlayerId::ONE, CardInstance::new(RIFT), false);

    // The relay is cast by the cascade but cannot cascade again.
    let seat = &state.players[PlayerId::ONE];
    let in_play: Vec<CardId> = seat.artifacts.iter().map(|c| c.card_id).collect();
    assert_eq!(in_play, vec![relay]);
    assert_eq!(seat.deck.len(), 3);
}

#[test]
fn test_chrono_ticks_then_expires() {
    let registry = standard_catalog();
    let scripts = ScriptRegistry::standard();
    let engine = AbilityEngine::new(&registry, &scripts);
    let mut state = blank_state(8);

    engine.resolve(&mut state, PlayerId::ONE, CardInstance::new(ids::SHIPS_LAST_BREATH), false);
    assert_eq!(state.players[PlayerId::ONE].timed.len(), 1);
    assert_eq!(state.players[PlayerId::ONE].artifacts.len(), 1);

    for _ in 0..3 {
        engine.tick_chrono(&mut state, PlayerId::ONE);
    }
    assert_eq!(state.players[PlayerId::TWO].points, 7);
    assert!(state.players[PlayerId::ONE].timed.is_empty());

    engine.tick_chrono(&mut state, PlayerId::ONE);
    assert_eq!(state.players[PlayerId::TWO].points, 7);
}

/// Units only, so the opening hand is empty and every point change comes
/// from the card a test inserts.
fn plain_match(seed: u64) -> (RoundEngine, MatchState) {
    let engine = RoundEngine::standard();
    let pool = engine.registry().build_pool(&[DRIFTER; 6]);
    let state = engine.new_match(MatchConfig::default(), Seats::with_value(pool), GameRng::new(seed));
    (engine, state)
}

fn act(engine: &RoundEngine, state: MatchState, player: PlayerId, action: Action) -> MatchState {
    match engine.process(&state, player, &action) {
        Ok(next) => next,
        Err(reason) => panic!("{} rejected for {}: {}", action.name(), player, reason),
    }
}

fn keep_both(engine: &RoundEngine, state: MatchState) -> MatchState {
    let first = state.active;
    let state = act(engine, state, first, Action::KeepHand);
    act(engine, state, first.opponent(), Action::KeepHand)
}

fn play_first(engine: &RoundEngine, state: MatchState, card: CardId, overload: bool) -> MatchState {
    let mut state = keep_both(engine, state);
    let first = state.active;
    state.players[first].hand.insert(0, CardInstance::new(card));
    act(engine, state, first, Action::PlayCard { card_index: 0, overload })
}

#[test]
fn test_trap_springs_on_opponent_bet() {
    let (engine, state) = plain_match(14);
    let first = state.first_to_act;
    let second = first.opponent();

    let state = play_first(&engine, state, ids::UNSEEN_ENTITIES, false);
    assert!(state.players[first].trap.is_some());
    assert_eq!(state.players[first].trap_card.as_ref().map(|c| c.card_id), Some(ids::UNSEEN_ENTITIES));
    let armed_mana = state.players[first].mana;

    let state = act(&engine, state, second, Action::Bet { amount: 2 });

    let per_turn = state.config.mana_per_turn;
    assert_eq!(state.players[first].mana, armed_mana + 2 + per_turn);
    assert!(state.players[first].trap.is_none());
    assert!(state.players[first].trap_card.is_none());
    assert!(state.players[first].discard.iter().any(|c| c.card_id == ids::UNSEEN_ENTITIES));
}

#[test]
fn test_trap_ignores_its_owner() {
    let (engine, state) = plain_match(14);
    let first = state.first_to_act;
    let second = first.opponent();

    let state = play_first(&engine, state, ids::UNSEEN_ENTITIES, false);
    let state = act(&engine, state, second, Action::Check);
    let state = act(&engine, state, first, Action::Bet { amount: 1 });

    assert!(state.players[first].trap.is_some());
}

#[test]
fn test_fold_trap_pays_out_the_pot() {
    let (engine, state) = plain_match(27);
    let first = state.first_to_act;
    let second = first.opponent();

    let state = play_first(&engine, state, ids::FINAL_BROADCAST, false);
    let state = act(&engine, state, second, Action::Bet { amount: 2 });
    let state = act(&engine, state, first, Action::Raise { amount: 2 });
    let pot = state.pot;
    let before = state.players[first].mana;

    let state = act(&engine, state, second, Action::Fold);

    assert_eq!(pot, 8);
    assert_eq!(state.players[first].mana, before + pot);
    assert!(state.players[first].trap.is_none());
}

#[test]
fn test_overload_replaces_base_effect() {
    let (engine, state) = plain_match(5);
    let first = state.first_to_act;
    let second = first.opponent();

    let plain = play_first(&engine, state.clone(), ids::SINGULARITY_OF_FEAR, false);
    assert_eq!(plain.players[second].points, 9 - 4);

    let mut rich = keep_both(&engine, state);
    rich.players[first].mana = 20;
    rich.players[first].hand.insert(0, CardInstance::new(ids::SINGULARITY_OF_FEAR));
    let overloaded = act(&engine, rich, first, Action::PlayCard { card_index: 0, overload: true });
    assert_eq!(overloaded.players[second].points, 1);
    assert_eq!(overloaded.players[first].mana, 20 - 12);
}

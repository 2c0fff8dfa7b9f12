//! Status and relic behaviors driven through `execute`, with exact numbers.
//!
//! The starter setup: 80 hp player with 3 energy, one Training Dummy at 40 hp whose
//! first move is a 6 damage Chomp.

use super::{CombatEngine, ExecuteError, InvariantViolation, RelicSpec};
use crate::action::Action;
use crate::cards::{Amount, CardEffect};
use crate::env::{
    CardDefinition, CardFlags, CardTarget, CardType, CardUpgrade, CombatEnv, ContentSnapshot,
};
use crate::hooks::{HookKind, Listener};
use crate::state::{CardId, CardInstance, CombatState, EntityId, RelicId, Stance, StatusId};
use crate::testkit;

const PLAYER: EntityId = EntityId::PLAYER;

fn enemy() -> EntityId {
    EntityId::enemy(0)
}

/// Puts exactly `ids` in hand. Deck cards are used first; anything else is created.
fn set_hand(state: &mut CombatState, content: &ContentSnapshot, ids: &[&str]) {
    let env = CombatEnv::from_snapshot(content);
    let mut pool: Vec<CardInstance> = state.piles.hand.drain(..).collect();
    pool.append(&mut state.piles.draw);
    for id in ids {
        let card = match pool.iter().position(|c| c.id.as_str() == *id) {
            Some(index) => pool.remove(index),
            None => CardInstance {
                uid: state.allocate_uid(),
                id: CardId::from(*id),
                upgraded: false,
                cost: env.card(&CardId::from(*id)).unwrap().cost,
                misc: 0,
            },
        };
        state.piles.hand.push(card);
    }
    state.piles.draw = pool;
}

fn grant(state: &mut CombatState, target: EntityId, id: StatusId, amount: i32) {
    let turn = state.turn;
    state
        .creature_mut(target)
        .unwrap()
        .statuses
        .apply(&testkit::status(id), target, amount, turn, false);
}

fn prepared(
    content: &ContentSnapshot,
    hand: &[&str],
    f: impl FnOnce(&mut CombatState),
) -> CombatEngine {
    let mut state = testkit::engine(content).snapshot();
    set_hand(&mut state, content, hand);
    f(&mut state);
    CombatEngine::from_state(state)
}

fn hp(engine: &CombatEngine, id: EntityId) -> i32 {
    engine.state().creature(id).unwrap().hp
}

#[test]
fn reactions_run_after_the_hook_list_is_exhausted() {
    let content = testkit::content();
    let env = CombatEnv::from_snapshot(&content);
    let mut engine = prepared(&content, &[], |state| {
        grant(state, PLAYER, StatusId::Thorns, 3);
        grant(state, PLAYER, StatusId::FlameBarrier, 4);
        grant(state, enemy(), StatusId::Buffer, 1);
    });
    engine.set_hook_tracing(true);

    engine.execute(env, &Action::EndTurn).unwrap();

    let order: Vec<_> = engine
        .last_trace()
        .iter()
        .filter(|f| matches!(f.hook, HookKind::Attacked | HookKind::AttackedToChangeDamage))
        .map(|f| (f.hook, f.subject, f.listener))
        .collect();
    // Both retaliations are queued before the first one reaches the dummy's Buffer.
    assert_eq!(
        order,
        vec![
            (HookKind::Attacked, PLAYER, Listener::Status(StatusId::Thorns)),
            (HookKind::Attacked, PLAYER, Listener::Status(StatusId::FlameBarrier)),
            (
                HookKind::AttackedToChangeDamage,
                enemy(),
                Listener::Status(StatusId::Buffer)
            ),
        ]
    );
    // Buffer eats the 3 thorns, the 4 flame barrier damage lands.
    assert_eq!(hp(&engine, enemy()), 36);
    assert_eq!(hp(&engine, PLAYER), 74);
    assert!(!engine.state().player.creature.statuses.has(StatusId::FlameBarrier));
}

#[test]
fn artifact_negates_flex_strength_loss_but_not_the_gain() {
    let content = testkit::content();
    let env = CombatEnv::from_snapshot(&content);
    let mut engine = prepared(&content, &["flex"], |state| {
        grant(state, PLAYER, StatusId::Artifact, 1);
    });

    engine.execute(env, &Action::play(0)).unwrap();
    let statuses = &engine.state().player.creature.statuses;
    assert_eq!(statuses.amount(StatusId::Strength), 2);
    assert!(!statuses.has(StatusId::LoseStrength));
    assert!(!statuses.has(StatusId::Artifact));

    engine.execute(env, &Action::EndTurn).unwrap();
    assert_eq!(engine.state().turn, 2);
    assert_eq!(engine.state().player.creature.statuses.amount(StatusId::Strength), 2);
}

#[test]
fn enemy_artifact_blocks_one_debuff() {
    let content = testkit::content();
    let env = CombatEnv::from_snapshot(&content);
    let mut engine = prepared(&content, &["bash"], |state| {
        grant(state, enemy(), StatusId::Artifact, 1);
    });

    engine.execute(env, &Action::play_at(0, 0)).unwrap();
    let dummy = engine.state().creature(enemy()).unwrap();
    assert_eq!(dummy.hp, 32);
    assert!(!dummy.statuses.has(StatusId::Vulnerable));
    assert!(!dummy.statuses.has(StatusId::Artifact));
    assert_eq!(engine.state().player.energy, 1);
}

#[test]
fn buffer_zeroes_post_block_damage_once() {
    let content = testkit::content();
    let env = CombatEnv::from_snapshot(&content);
    let mut engine = prepared(&content, &["strike", "strike", "strike"], |state| {
        grant(state, enemy(), StatusId::Buffer, 1);
        state.creature_mut(enemy()).unwrap().block = 10;
    });

    // Fully blocked: nothing reaches Buffer.
    engine.execute(env, &Action::play_at(0, 0)).unwrap();
    let dummy = engine.state().creature(enemy()).unwrap();
    assert_eq!((dummy.hp, dummy.block), (40, 4));
    assert_eq!(dummy.statuses.amount(StatusId::Buffer), 1);

    // 4 blocked, the remaining 2 are zeroed and Buffer is spent.
    engine.execute(env, &Action::play_at(0, 0)).unwrap();
    let dummy = engine.state().creature(enemy()).unwrap();
    assert_eq!((dummy.hp, dummy.block), (40, 0));
    assert!(!dummy.statuses.has(StatusId::Buffer));

    engine.execute(env, &Action::play_at(0, 0)).unwrap();
    assert_eq!(hp(&engine, enemy()), 34);
    assert_eq!(engine.state().player.energy, 0);
}

#[test]
fn poison_ticks_then_decrements() {
    let content = testkit::content();
    let env = CombatEnv::from_snapshot(&content);
    let mut engine = prepared(&content, &[], |state| {
        grant(state, enemy(), StatusId::Poison, 3);
    });

    engine.execute(env, &Action::EndTurn).unwrap();
    let dummy = engine.state().creature(enemy()).unwrap();
    assert_eq!(dummy.hp, 37);
    assert_eq!(dummy.statuses.amount(StatusId::Poison), 2);

    engine.execute(env, &Action::EndTurn).unwrap();
    let dummy = engine.state().creature(enemy()).unwrap();
    assert_eq!(dummy.hp, 35);
    assert_eq!(dummy.statuses.amount(StatusId::Poison), 1);
}

#[test]
fn ten_mantra_enters_divinity_until_next_turn_start() {
    let content = testkit::content();
    let env = CombatEnv::from_snapshot(&content);
    let mut engine = prepared(&content, &["worship"], |state| {
        grant(state, PLAYER, StatusId::Mantra, 7);
    });

    engine.execute(env, &Action::play(0)).unwrap();
    let player = &engine.state().player;
    assert_eq!(player.stance, Stance::Divinity);
    assert_eq!(player.creature.statuses.amount(StatusId::Mantra), 2);
    // 3 - 2 for the card + 3 on entering Divinity.
    assert_eq!(player.energy, 4);

    engine.execute(env, &Action::EndTurn).unwrap();
    let player = &engine.state().player;
    assert_eq!(engine.state().turn, 2);
    assert_eq!(player.stance, Stance::Neutral);
    assert_eq!(player.energy, 3);
    assert_eq!(player.creature.statuses.amount(StatusId::Mantra), 2);
    assert_eq!(player.creature.hp, 74);
}

#[test]
fn intangible_caps_each_hit_at_one() {
    let content = testkit::content();
    let env = CombatEnv::from_snapshot(&content);
    let mut engine = prepared(&content, &["strike"], |state| {
        grant(state, PLAYER, StatusId::Strength, 3);
        grant(state, enemy(), StatusId::Intangible, 1);
        grant(state, PLAYER, StatusId::Intangible, 1);
    });

    engine.execute(env, &Action::play_at(0, 0)).unwrap();
    assert_eq!(hp(&engine, enemy()), 39);

    engine.execute(env, &Action::EndTurn).unwrap();
    assert_eq!(hp(&engine, PLAYER), 79);
}

#[test]
fn wrath_doubles_damage_given_and_received() {
    let content = testkit::content();
    let env = CombatEnv::from_snapshot(&content);
    let mut engine = prepared(&content, &["eruption", "strike"], |_| {});

    // Eruption hits before the stance change.
    engine.execute(env, &Action::play_at(0, 0)).unwrap();
    assert_eq!(hp(&engine, enemy()), 31);
    assert_eq!(engine.state().player.stance, Stance::Wrath);

    engine.execute(env, &Action::play_at(0, 0)).unwrap();
    assert_eq!(hp(&engine, enemy()), 19);
    assert_eq!(engine.state().player.energy, 0);

    engine.execute(env, &Action::EndTurn).unwrap();
    assert_eq!(hp(&engine, PLAYER), 68);
}

#[test]
fn pen_nib_carried_at_nine_doubles_the_first_attack() {
    let content = testkit::content();
    let env = CombatEnv::from_snapshot(&content);
    let started = |counter| {
        let mut setup = testkit::setup();
        setup.player.relics.push(RelicSpec {
            id: RelicId::PenNib,
            counter,
        });
        CombatEngine::start(&setup, env).unwrap()
    };

    assert!(!started(8).state().player.creature.statuses.has(StatusId::PenNib));

    let armed = started(9);
    assert!(armed.state().player.creature.statuses.has(StatusId::PenNib));
    let mut state = armed.snapshot();
    set_hand(&mut state, &content, &["strike", "strike"]);
    let mut engine = CombatEngine::from_state(state);

    engine.execute(env, &Action::play_at(0, 0)).unwrap();
    assert_eq!(hp(&engine, enemy()), 28);
    assert!(!engine.state().player.creature.statuses.has(StatusId::PenNib));
    assert_eq!(engine.state().relic(RelicId::PenNib).unwrap().counter, 0);

    engine.execute(env, &Action::play_at(0, 0)).unwrap();
    assert_eq!(hp(&engine, enemy()), 22);
}

#[test]
fn energy_driven_below_zero_is_an_invariant_violation() {
    let mut content = testkit::content();
    content.insert_card(CardDefinition {
        id: CardId::from("drain"),
        card_type: CardType::Skill,
        target: CardTarget::SelfOnly,
        cost: 0,
        base_damage: 0,
        base_block: 0,
        magic: 0,
        flags: CardFlags::empty(),
        effects: vec![CardEffect::GainEnergy {
            amount: Amount::Fixed(-5),
        }],
        end_of_turn: Vec::new(),
        on_draw: Vec::new(),
        upgrade: CardUpgrade::default(),
    });
    let env = CombatEnv::from_snapshot(&content);
    let mut engine = prepared(&content, &["drain"], |_| {});

    let err = engine.execute(env, &Action::play(0)).unwrap_err();
    assert!(matches!(
        err,
        ExecuteError::Invariant(ref e)
            if matches!(e.error, InvariantViolation::NegativeEnergy { energy: -2 })
    ));
    assert_eq!(engine.state().player.energy, 3);
    assert_eq!(engine.state().piles.hand.len(), 1);
}

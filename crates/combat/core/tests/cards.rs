//! Card, selection and potion flows through the public action API.

mod common;

use combat_core::{
    Action, ActionOutcome, CombatEngine, CombatEnv, SelectionKind, StatusId,
};

#[test]
fn discard_choice_is_requested_then_applied() {
    let content = common::content();
    let env = CombatEnv::from_snapshot(&content);
    let setup = common::setup(&["survivor", "strike", "defend", "strike", "strike"]);
    let mut engine = CombatEngine::from_state(common::with_hand(
        common::start(&content, &setup).snapshot(),
        &["survivor", "strike", "defend"],
    ));

    let ActionOutcome::NeedsInput(request) = engine.execute(env, &Action::play(0)).unwrap() else {
        panic!("survivor needs a discard choice");
    };
    assert_eq!(request.kind, SelectionKind::Discard { count: 1 });
    assert_eq!(request.options, vec![0, 1]);

    let choose = Action::PlayCard {
        hand_index: 0,
        target: None,
        choices: vec![1],
    };
    let obs = engine.execute(env, &choose).unwrap();
    let obs = obs.observation().unwrap();
    assert_eq!(obs.player.block, 8);
    assert_eq!(obs.player.energy, 2);
    assert_eq!(obs.piles.hand, vec!["strike".to_string()]);
    assert_eq!(
        obs.piles.discard,
        vec!["defend".to_string(), "survivor".to_string()]
    );
}

#[test]
fn fire_potion_empties_its_slot() {
    let content = common::content();
    let env = CombatEnv::from_snapshot(&content);
    let mut engine = common::start(&content, &common::starter());

    let action = Action::UsePotion {
        slot: 0,
        target: Some(0),
    };
    let obs = engine.execute(env, &action).unwrap();
    let obs = obs.observation().unwrap();
    assert_eq!(obs.enemies[0].hp, 20);
    assert_eq!(obs.potions[0], None);

    assert!(engine.execute(env, &action).is_err());
}

#[test]
fn flex_strength_wears_off_after_discard() {
    let content = common::content();
    let env = CombatEnv::from_snapshot(&content);
    let setup = common::setup(&["flex", "strike", "strike", "strike", "strike"]);
    let mut engine = CombatEngine::from_state(common::with_hand(
        common::start(&content, &setup).snapshot(),
        &["flex", "strike"],
    ));

    engine.execute(env, &Action::play(0)).unwrap();
    let statuses = &engine.state().player.creature.statuses;
    assert_eq!(statuses.amount(StatusId::Strength), 2);
    assert_eq!(statuses.amount(StatusId::LoseStrength), 2);

    engine.execute(env, &Action::play_at(0, 0)).unwrap();
    assert_eq!(engine.state().enemies[0].creature.hp, 32);

    engine.execute(env, &Action::EndTurn).unwrap();
    let statuses = &engine.state().player.creature.statuses;
    assert!(!statuses.has(StatusId::Strength));
    assert!(!statuses.has(StatusId::LoseStrength));
}

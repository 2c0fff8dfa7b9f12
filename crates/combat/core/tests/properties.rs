//! Engine-wide properties: determinism, atomic rejection, terminal idempotence,
//! stable hook order and RNG stream independence.

mod common;

use combat_core::{
    Action, ActionError, ActionOutcome, CombatEngine, CombatEnv, CombatOutcome, ContentSnapshot,
    EntityId, ErrorKind, ExecuteError, HookKind, InvariantViolation, Listener, Observation,
    RelicId, RelicSpec, RngStreams, Seed, SelectionKind, StatusId, StreamName, TransitionPhase,
    TurnPhase,
};
use proptest::prelude::*;

fn play_out(content: &ContentSnapshot, seed: u64, picks: &[u8]) -> (Vec<Observation>, [u8; 32]) {
    let env = CombatEnv::from_snapshot(content);
    let mut setup = common::setup(&[
        "strike", "strike", "strike", "strike", "defend", "defend", "defend", "bash", "dodge",
        "flex",
    ]);
    setup.seed = Seed::from(seed);
    setup.enemies[0].hp = None;
    let mut engine = CombatEngine::start(&setup, env).unwrap();

    let mut observations = vec![engine.observe(env).unwrap()];
    for pick in picks {
        if engine.is_over() {
            break;
        }
        let actions = engine.available_actions(env).unwrap();
        let action = &actions[*pick as usize % actions.len()];
        if let ActionOutcome::Applied(obs) = engine.execute(env, action).unwrap() {
            observations.push(*obs);
        }
    }
    (observations, engine.state().digest().unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn replaying_seed_and_actions_is_deterministic(
        seed in any::<u64>(),
        picks in prop::collection::vec(any::<u8>(), 0..60),
    ) {
        let content = common::content();
        let first = play_out(&content, seed, &picks);
        let second = play_out(&content, seed, &picks);
        prop_assert_eq!(&first.0, &second.0);
        prop_assert_eq!(first.1, second.1);
    }

    #[test]
    fn drawing_one_stream_leaves_the_others_alone(
        seed in any::<u64>(),
        a in 0usize..StreamName::ALL.len(),
        n in 0u32..200,
    ) {
        let mut rng = RngStreams::new(Seed::from(seed), 3);
        let before = rng.counters();
        let stream = StreamName::ALL[a];
        for _ in 0..n {
            rng.draw(stream, 100);
        }
        for (name, counter) in rng.counters() {
            if name == stream {
                prop_assert_eq!(counter, before[&name] + u64::from(n));
            } else {
                prop_assert_eq!(counter, before[&name]);
            }
        }
    }
}

#[test]
fn rejected_action_mutates_nothing() {
    let content = common::content();
    let env = CombatEnv::from_snapshot(&content);
    let mut state = common::with_hand(
        common::start(&content, &common::starter()).snapshot(),
        &["strike", "defend"],
    );
    state.player.energy = 0;
    let mut engine = CombatEngine::from_state(state);
    let before = engine.snapshot();

    let err = engine.execute(env, &Action::play_at(0, 0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidAction);
    assert!(matches!(
        err,
        ExecuteError::InvalidAction(ActionError::NotEnoughEnergy { cost: 1, energy: 0, .. })
    ));
    assert_eq!(engine.state(), &before);

    let err = engine.execute(env, &Action::play_at(0, 7)).unwrap_err();
    assert!(matches!(
        err,
        ExecuteError::InvalidAction(ActionError::NotEnoughEnergy { .. })
            | ExecuteError::InvalidAction(ActionError::InvalidTarget { .. })
    ));
    assert_eq!(engine.state(), &before);
}

#[test]
fn missing_target_asks_for_input_without_mutating() {
    let content = common::content();
    let env = CombatEnv::from_snapshot(&content);
    let mut engine = CombatEngine::from_state(common::with_hand(
        common::start(&content, &common::starter()).snapshot(),
        &["strike"],
    ));
    let before = engine.snapshot();

    let ActionOutcome::NeedsInput(request) = engine.execute(env, &Action::play(0)).unwrap() else {
        panic!("strike without a target must ask for one");
    };
    assert_eq!(request.kind, SelectionKind::Target);
    assert_eq!(request.options, vec![0]);
    assert_eq!(engine.state(), &before);
}

#[test]
fn terminal_state_rejects_every_action() {
    let content = common::content();
    let env = CombatEnv::from_snapshot(&content);
    let mut state = common::with_hand(
        common::start(&content, &common::starter()).snapshot(),
        &["strike", "defend"],
    );
    state.enemies[0].creature.hp = 1;
    let mut engine = CombatEngine::from_state(state);

    let obs = engine.execute(env, &Action::play_at(0, 0)).unwrap();
    let obs = obs.observation().unwrap();
    assert_eq!(obs.phase, TurnPhase::CombatEnd);
    assert_eq!(obs.outcome, Some(CombatOutcome::Victory));
    assert!(obs.available_actions.is_empty());

    let digest = engine.state().digest().unwrap();
    for action in [Action::EndTurn, Action::play(0), Action::DiscardPotion { slot: 0 }] {
        let err = engine.execute(env, &action).unwrap_err();
        assert_eq!(err, ExecuteError::InvalidAction(ActionError::CombatOver));
    }
    assert_eq!(engine.state().digest().unwrap(), digest);
}

#[test]
fn broken_invariant_aborts_the_action() {
    let content = common::content();
    let env = CombatEnv::from_snapshot(&content);
    let mut state = common::start(&content, &common::starter()).snapshot();
    state.player.creature.hp = 200;
    let mut engine = CombatEngine::from_state(state);
    let before = engine.snapshot();

    let err = engine.execute(env, &Action::EndTurn).unwrap_err();
    let ExecuteError::Invariant(inner) = err else {
        panic!("expected an invariant violation, got {err:?}");
    };
    assert_eq!(inner.phase, TransitionPhase::PostValidate);
    assert!(matches!(inner.error, InvariantViolation::HpOutOfRange { .. }));
    assert_eq!(engine.state(), &before);
}

#[test]
fn identical_states_fire_hooks_in_identical_order() {
    let content = common::content();
    let env = CombatEnv::from_snapshot(&content);
    let mut setup = common::starter();
    setup.player.relics.push(RelicSpec {
        id: RelicId::Torii,
        counter: 0,
    });
    let mut state = common::start(&content, &setup).snapshot();
    common::apply(&mut state, &content, EntityId::PLAYER, StatusId::Thorns, 2);
    state.player.creature.block = 3;

    let trace = |state| {
        let mut engine = CombatEngine::from_state(state);
        engine.set_hook_tracing(true);
        engine.execute(env, &Action::EndTurn).unwrap();
        engine.last_trace().to_vec()
    };
    let first = trace(state.clone());
    let second = trace(state);
    assert!(!first.is_empty());
    assert_eq!(first, second);

    let position = |hook: HookKind, listener: Listener| {
        first
            .iter()
            .position(|f| f.hook == hook && f.listener == listener)
            .unwrap()
    };
    let torii = position(
        HookKind::AttackedToChangeDamage,
        Listener::Relic(RelicId::Torii),
    );
    let thorns = position(HookKind::Attacked, Listener::Status(StatusId::Thorns));
    assert!(torii < thorns);
}

#[test]
fn snapshots_and_simulations_are_isolated() {
    let content = common::content();
    let env = CombatEnv::from_snapshot(&content);
    let engine = CombatEngine::from_state(common::with_hand(
        common::start(&content, &common::starter()).snapshot(),
        &["strike"],
    ));
    let before = engine.snapshot();

    let mut copy = engine.snapshot();
    copy.player.creature.hp = 1;
    copy.piles.hand.clear();
    assert_eq!(engine.state(), &before);

    let branch = engine.simulate(env, &Action::play_at(0, 0)).unwrap();
    assert_eq!(branch.state().enemies[0].creature.hp, 34);
    assert_eq!(engine.state(), &before);
}

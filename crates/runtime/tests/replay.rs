use std::sync::Arc;

use combat_core::{
    Action, ActionOutcome, CardSpec, CombatConfig, CombatSetup, ContentSnapshot, EnemySetup,
    PlayerSetup, PotionId, Seed,
};
use runtime::repository::{ACTIONS_FILE, ActionLogEntry, OBSERVATIONS_FILE, read_json_lines};
use runtime::{
    CombatSession, ReplayFile, RuntimeConfig, RuntimeError, audit, audit_with, available_after,
    load_content, load_reference, replay, replay_with,
};
use tempfile::TempDir;

fn content() -> Arc<ContentSnapshot> {
    load_content(&RuntimeConfig::default()).expect("bundled content")
}

fn setup(deck: &[&str]) -> CombatSetup {
    CombatSetup {
        seed: Seed::parse("TESTSEED").expect("literal seed"),
        floor: 1,
        player: PlayerSetup {
            hp: 80,
            max_hp: 80,
            deck: deck.iter().map(|id| CardSpec::new(id)).collect(),
            relics: Vec::new(),
            potions: vec![PotionId::from("block_potion")],
            energy_per_turn: None,
        },
        enemies: vec![EnemySetup::new("jaw_worm")],
        config: CombatConfig::default(),
    }
}

fn starter() -> CombatSetup {
    setup(&[
        "strike", "strike", "strike", "strike", "strike", "defend", "defend", "defend", "defend",
        "bash",
    ])
}

/// Plays the first available action each step and returns the resulting replay file.
fn recorded_file(content: &Arc<ContentSnapshot>, steps: usize) -> ReplayFile {
    let setup = starter();
    let mut session =
        CombatSession::start(&setup, content.clone(), &RuntimeConfig::default()).unwrap();
    for _ in 0..steps {
        if session.is_over() {
            break;
        }
        let action = session.available_actions().unwrap().remove(0);
        assert!(matches!(
            session.apply(action).unwrap(),
            ActionOutcome::Applied(_)
        ));
    }
    let actions = session.actions().iter().map(|e| e.action.clone()).collect();
    ReplayFile::new(setup, actions)
}

#[test]
fn replaying_a_file_twice_is_identical() {
    let content = content();
    let file = recorded_file(&content, 15);
    assert!(!file.actions.is_empty());

    let first = replay(&file, content.clone()).unwrap();
    let second = replay(&file, content).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.observations.len(), file.actions.len() + 1);
    assert_eq!(first.digest.len(), 64);
    assert_eq!(
        Some(&first.rng),
        first.final_observation().map(|o| &o.rng)
    );
}

#[test]
fn replay_files_round_trip_through_disk() {
    let temp = TempDir::new().unwrap();
    let content = content();
    let file = recorded_file(&content, 6);
    let path = temp.path().join("combat.json");
    file.save(&path).unwrap();
    assert_eq!(ReplayFile::load(&path).unwrap(), file);
}

#[test]
fn recorded_observations_audit_clean() {
    let temp = TempDir::new().unwrap();
    let content = content();
    let file = recorded_file(&content, 10);
    let config = RuntimeConfig::default().with_record_dir(temp.path());

    let report = replay_with(&file, content, &config).unwrap();

    let session_dir = std::fs::read_dir(temp.path())
        .unwrap()
        .next()
        .expect("one session directory")
        .unwrap()
        .path();
    let logged: Vec<ActionLogEntry> = read_json_lines(session_dir.join(ACTIONS_FILE)).unwrap();
    assert_eq!(logged.len(), file.actions.len());
    assert_eq!(logged[0].nonce, 0);

    let reference = load_reference(session_dir.join(OBSERVATIONS_FILE)).unwrap();
    assert_eq!(reference.len(), report.observations.len());
    let audit = audit(&report, &reference).unwrap();
    assert!(audit.is_clean(), "{:?}", audit.first());
    assert_eq!(audit.steps_compared, reference.len());
}

#[test]
fn audit_reports_the_first_divergent_field() {
    let content = content();
    let file = recorded_file(&content, 4);
    let report = replay(&file, content).unwrap();

    let mut reference: Vec<serde_json::Value> = report
        .observations
        .iter()
        .map(|o| serde_json::json!({ "player": { "hp": o.player.hp }, "turn": o.turn }))
        .collect();
    reference[2]["player"]["hp"] = serde_json::json!(1);
    reference[3]["turn"] = serde_json::json!(99);

    let all = audit(&report, &reference).unwrap();
    assert_eq!(all.divergences.len(), 2);
    let first = all.first().unwrap();
    assert_eq!(first.step, 2);
    assert_eq!(first.path, "$.player.hp");
    assert_eq!(first.expected, serde_json::json!(1));

    let stopped = audit_with(&report, &reference, true).unwrap();
    assert_eq!(stopped.divergences.len(), 1);
    let err = stopped.into_result().unwrap_err();
    assert_eq!(err.exit_code(), 5);
}

#[test]
fn reference_past_the_end_diverges_at_root() {
    let content = content();
    let file = recorded_file(&content, 1);
    let report = replay(&file, content).unwrap();
    let mut reference: Vec<serde_json::Value> = Vec::new();
    reference.resize(report.observations.len() + 1, serde_json::json!({}));

    let result = audit(&report, &reference).unwrap();
    let first = result.first().expect("extra line diverges");
    assert_eq!(first.step, report.observations.len());
    assert_eq!(first.path, "$");
}

#[test]
fn invalid_logged_action_fails_with_exit_code_2() {
    let content = content();
    let file = ReplayFile::new(starter(), vec![Action::EndTurn, Action::play(42)]);
    let err = replay(&file, content).unwrap_err();
    assert!(matches!(err, RuntimeError::Execute { nonce: 1, .. }), "{err}");
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn logged_action_missing_its_selection_is_incomplete() {
    let content = content();
    let file = ReplayFile::new(
        setup(&["survivor", "survivor", "survivor", "survivor", "survivor", "survivor"]),
        vec![Action::play(0)],
    );
    let err = replay(&file, content).unwrap_err();
    assert!(matches!(err, RuntimeError::IncompleteAction { nonce: 0, .. }), "{err}");
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn unknown_file_version_is_rejected() {
    let mut file = ReplayFile::new(starter(), Vec::new());
    file.version = 99;
    let err = replay(&file, content()).unwrap_err();
    assert_eq!(err.exit_code(), 4);
}

#[test]
fn available_actions_after_prefix() {
    let content = content();
    let file = recorded_file(&content, 3);
    let opening = available_after(&file, content.clone(), 0).unwrap();
    assert_eq!(opening.last(), Some(&Action::EndTurn));
    assert!(opening.contains(&Action::UsePotion {
        slot: 0,
        target: None
    }));
    // Past the end of the log clamps to the full log.
    let end = available_after(&file, content.clone(), 100).unwrap();
    assert_eq!(end, available_after(&file, content, file.actions.len()).unwrap());
}

#[test]
fn preview_does_not_advance_the_session() {
    let content = content();
    let session = CombatSession::start(&starter(), content, &RuntimeConfig::default()).unwrap();
    let before = session.digest().unwrap();
    let preview = session.preview(&Action::EndTurn).unwrap();
    assert_eq!(preview.turn, 2);
    assert_eq!(session.digest().unwrap(), before);
    assert!(session.actions().is_empty());
    assert_eq!(session.observations().len(), 1);
}

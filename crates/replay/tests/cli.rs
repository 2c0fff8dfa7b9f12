use std::path::Path;
use std::process::Command;

use combat_core::{Action, CardSpec, CombatConfig, CombatSetup, EnemySetup, PlayerSetup, Seed};
use runtime::ReplayFile;
use tempfile::TempDir;

fn replay_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_replay"));
    cmd.env_remove("COMBAT_DATA_DIR")
        .env_remove("COMBAT_RECORD_DIR")
        .env_remove("COMBAT_STOP_ON_DIVERGENCE")
        .env("RUST_LOG", "warn");
    cmd
}

fn write_replay(dir: &Path, actions: Vec<Action>) -> std::path::PathBuf {
    let setup = CombatSetup {
        seed: Seed::parse("TESTSEED").unwrap(),
        floor: 1,
        player: PlayerSetup {
            hp: 80,
            max_hp: 80,
            deck: ["strike", "strike", "strike", "defend", "defend", "bash"]
                .iter()
                .map(|id| CardSpec::new(id))
                .collect(),
            relics: Vec::new(),
            potions: Vec::new(),
            energy_per_turn: None,
        },
        enemies: vec![EnemySetup::new("cultist")],
        config: CombatConfig::default(),
    };
    let path = dir.join("combat.json");
    ReplayFile::new(setup, actions).save(&path).unwrap();
    path
}

fn code(cmd: &mut Command) -> i32 {
    cmd.output().unwrap().status.code().unwrap()
}

#[test]
fn check_content_accepts_bundled_tables() {
    assert_eq!(code(replay_cmd().arg("check-content")), 0);
}

#[test]
fn missing_data_dir_exits_with_4() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope");
    assert_eq!(
        code(replay_cmd().arg("check-content").arg("--data-dir").arg(&missing)),
        4
    );
}

#[test]
fn run_then_audit_against_own_observations() {
    let temp = TempDir::new().unwrap();
    let replay = write_replay(temp.path(), vec![Action::EndTurn, Action::EndTurn]);
    let observations = temp.path().join("observations.jsonl");

    let mut run = replay_cmd();
    run.arg("run").arg(&replay).arg("--observations").arg(&observations);
    assert_eq!(code(&mut run), 0);

    let mut audit = replay_cmd();
    audit.arg("audit").arg(&replay).arg(&observations);
    assert_eq!(code(&mut audit), 0);

    let tampered = temp.path().join("tampered.jsonl");
    let text = std::fs::read_to_string(&observations).unwrap();
    let mut lines: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    lines[1]["turn"] = serde_json::json!(7);
    let body: Vec<String> = lines.iter().map(|v| v.to_string()).collect();
    std::fs::write(&tampered, body.join("\n")).unwrap();

    let mut audit = replay_cmd();
    audit.arg("audit").arg(&replay).arg(&tampered);
    let output = audit.output().unwrap();
    assert_eq!(output.status.code(), Some(5));
    assert!(String::from_utf8_lossy(&output.stdout).contains("$.turn"));
}

#[test]
fn invalid_action_exits_with_2() {
    let temp = TempDir::new().unwrap();
    let replay = write_replay(temp.path(), vec![Action::DiscardPotion { slot: 0 }]);
    assert_eq!(code(replay_cmd().arg("run").arg(&replay)), 2);
}

#[test]
fn actions_lists_end_turn_last() {
    let temp = TempDir::new().unwrap();
    let replay = write_replay(temp.path(), Vec::new());
    let output = replay_cmd().arg("actions").arg(&replay).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let last = stdout.lines().last().unwrap();
    let action: Action = serde_json::from_str(last).unwrap();
    assert_eq!(action, Action::EndTurn);
}

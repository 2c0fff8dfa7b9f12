//! Replay of a recorded action log.
//!
//! A [`ReplayFile`] is a combat setup plus the ordered actions taken from it. Replaying
//! it reproduces every observation; two replays of the same file agree byte for byte.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use combat_core::{
    ACTION_API_VERSION, Action, ActionOutcome, CombatOutcome, CombatSetup, ContentSnapshot,
    Observation,
};
use serde::{Deserialize, Serialize};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::repository::RepositoryError;
use crate::session::CombatSession;

/// Replay files are versioned with the action schema they were written against.
pub const REPLAY_FORMAT_VERSION: u32 = ACTION_API_VERSION;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayFile {
    pub version: u32,
    pub setup: CombatSetup,
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl ReplayFile {
    pub fn new(setup: CombatSetup, actions: Vec<Action>) -> Self {
        Self {
            version: REPLAY_FORMAT_VERSION,
            setup,
            actions,
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| RepositoryError::io(path, e))?;
        let file: Self = serde_json::from_str(&json).map_err(|source| RepositoryError::Json {
            path: path.display().to_string(),
            line: source.line(),
            source,
        })?;
        tracing::debug!(
            target: "runtime::replay",
            path = %path.display(),
            actions = file.actions.len(),
            "Loaded replay file"
        );
        Ok(file)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(RepositoryError::from)?;
        std::fs::write(path, json).map_err(|e| RepositoryError::io(path, e))?;
        Ok(())
    }

    pub fn check_version(&self) -> Result<()> {
        if self.version != REPLAY_FORMAT_VERSION {
            return Err(RuntimeError::UnsupportedVersion {
                found: self.version,
                expected: REPLAY_FORMAT_VERSION,
            });
        }
        Ok(())
    }
}

/// Everything a replay produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayReport {
    /// Opening observation followed by one per action.
    pub observations: Vec<Observation>,
    pub outcome: Option<CombatOutcome>,
    /// Hex SHA-256 of the final state.
    pub digest: String,
    /// Final RNG counters by stream name.
    pub rng: BTreeMap<String, u64>,
}

impl ReplayReport {
    pub fn final_observation(&self) -> Option<&Observation> {
        self.observations.last()
    }
}

/// Replays `file` against `content` with no recording.
pub fn replay(file: &ReplayFile, content: Arc<ContentSnapshot>) -> Result<ReplayReport> {
    replay_with(file, content, &RuntimeConfig::default())
}

/// Replays `file`, recording the session when `config.record_dir` is set.
///
/// # Errors
///
/// The first action that is rejected, aborts on an invariant, or still needs a
/// selection stops the replay.
pub fn replay_with(
    file: &ReplayFile,
    content: Arc<ContentSnapshot>,
    config: &RuntimeConfig,
) -> Result<ReplayReport> {
    let session = run_session(file, content, config, file.actions.len())?;
    let report = ReplayReport {
        observations: session.observations().to_vec(),
        outcome: session.state().outcome,
        digest: session.digest()?,
        rng: session.rng_counters(),
    };

    tracing::info!(
        target: "runtime::replay",
        session = %session.id(),
        actions = file.actions.len(),
        outcome = ?report.outcome,
        digest = %report.digest,
        "Replay finished"
    );
    Ok(report)
}

/// Replays the first `steps` actions and returns the actions legal at that point.
pub fn available_after(
    file: &ReplayFile,
    content: Arc<ContentSnapshot>,
    steps: usize,
) -> Result<Vec<Action>> {
    let steps = steps.min(file.actions.len());
    let session = run_session(file, content, &RuntimeConfig::default(), steps)?;
    session.available_actions()
}

fn run_session(
    file: &ReplayFile,
    content: Arc<ContentSnapshot>,
    config: &RuntimeConfig,
    steps: usize,
) -> Result<CombatSession> {
    file.check_version()?;
    let mut session = CombatSession::start(&file.setup, content, config)?;

    for (nonce, action) in file.actions.iter().take(steps).enumerate() {
        if let ActionOutcome::NeedsInput(request) = session.apply(action.clone())? {
            tracing::error!(
                target: "runtime::replay",
                nonce,
                action = ?action,
                "Logged action is missing a selection"
            );
            return Err(RuntimeError::IncompleteAction {
                nonce: nonce as u64,
                request: Box::new(request),
            });
        }
    }

    session.finish()?;
    Ok(session)
}

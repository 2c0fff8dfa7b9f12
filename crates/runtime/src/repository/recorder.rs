//! On-disk record of one session.
//!
//! ```text
//! {record_dir}/{session_id}/
//!   actions.jsonl        one ActionLogEntry per committed action
//!   observations.jsonl   opening observation, then one per committed action
//! ```
//!
//! `observations.jsonl` is directly usable as an audit reference.

use std::path::{Path, PathBuf};

use combat_core::{Action, Observation};
use serde::{Deserialize, Serialize};

use crate::repository::{JsonLinesLog, Result};

pub const ACTIONS_FILE: &str = "actions.jsonl";
pub const OBSERVATIONS_FILE: &str = "observations.jsonl";

/// One committed action and its position in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLogEntry {
    pub nonce: u64,
    pub action: Action,
}

/// Writes the action log and observation stream of a session.
pub struct SessionRecorder {
    dir: PathBuf,
    actions: JsonLinesLog<ActionLogEntry>,
    observations: JsonLinesLog<Observation>,
}

impl SessionRecorder {
    pub fn create(record_dir: impl AsRef<Path>, session_id: &str) -> Result<Self> {
        let dir = record_dir.as_ref().join(session_id);
        let actions = JsonLinesLog::create(&dir, ACTIONS_FILE)?;
        let observations = JsonLinesLog::create(&dir, OBSERVATIONS_FILE)?;
        tracing::info!(target: "runtime::session", "Recording session to {}", dir.display());
        Ok(Self {
            dir,
            actions,
            observations,
        })
    }

    pub fn record_action(&mut self, entry: &ActionLogEntry) -> Result<()> {
        self.actions.append(entry)?;
        Ok(())
    }

    pub fn record_observation(&mut self, observation: &Observation) -> Result<()> {
        self.observations.append(observation)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.actions.flush()?;
        self.observations.flush()
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

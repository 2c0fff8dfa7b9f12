//! Live combat session.
//!
//! [`CombatSession`] owns one [`CombatEngine`], the content it runs against and the log
//! of every committed action. Each committed action is logged under the
//! `runtime::session` target and, when a record directory is configured, appended to
//! the session's files on disk.

use std::collections::BTreeMap;
use std::sync::Arc;

use combat_core::{
    Action, ActionOutcome, CombatEngine, CombatEnv, CombatSetup, CombatState, ContentSnapshot,
    ErrorKind, ExecuteError, Observation,
};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::repository::{ActionLogEntry, SessionRecorder};

pub struct CombatSession {
    id: String,
    content: Arc<ContentSnapshot>,
    engine: CombatEngine,
    log: Vec<ActionLogEntry>,
    observations: Vec<Observation>,
    recorder: Option<SessionRecorder>,
}

impl CombatSession {
    /// Starts a combat and records its opening observation.
    pub fn start(
        setup: &CombatSetup,
        content: Arc<ContentSnapshot>,
        config: &RuntimeConfig,
    ) -> Result<Self> {
        let env = CombatEnv::from_snapshot(&content);
        let engine = CombatEngine::start(setup, env).map_err(|e| {
            tracing::error!(target: "runtime::session", error = %e, "Combat setup rejected");
            RuntimeError::Setup(e)
        })?;
        let opening = engine.observe(env).map_err(RuntimeError::Setup)?;
        let id = session_id(engine.state())?;

        let mut recorder = match &config.record_dir {
            Some(dir) => Some(SessionRecorder::create(dir, &id)?),
            None => None,
        };
        if let Some(recorder) = recorder.as_mut() {
            recorder.record_observation(&opening)?;
        }

        tracing::info!(
            target: "runtime::session",
            session = %id,
            seed = %setup.seed,
            floor = setup.floor,
            enemies = setup.enemies.len(),
            "Combat started"
        );

        Ok(Self {
            id,
            content,
            engine,
            log: Vec::new(),
            observations: vec![opening],
            recorder,
        })
    }

    /// Executes one action. Only applied actions are logged; a selection request
    /// leaves the session unchanged.
    pub fn apply(&mut self, action: Action) -> Result<ActionOutcome> {
        let nonce = self.log.len() as u64;
        let env = CombatEnv::from_snapshot(&self.content);

        let outcome = match self.engine.execute(env, &action) {
            Ok(outcome) => outcome,
            Err(source) => {
                report_failure(nonce, &action, &source);
                return Err(RuntimeError::Execute {
                    nonce,
                    action: action.as_str(),
                    source,
                });
            }
        };

        let observation = match &outcome {
            ActionOutcome::Applied(observation) => observation.as_ref().clone(),
            ActionOutcome::NeedsInput(request) => {
                tracing::debug!(
                    target: "runtime::session",
                    nonce,
                    kind = ?request.kind,
                    options = ?request.options,
                    "Action needs input"
                );
                return Ok(outcome);
            }
        };

        tracing::info!(
            target: "runtime::session",
            nonce,
            action = ?action,
            turn = observation.turn,
            phase = %observation.phase,
            "Action applied"
        );
        tracing::debug!(target: "runtime::session", nonce, rng = ?observation.rng, "RNG counters");
        if let Some(result) = observation.outcome {
            tracing::info!(
                target: "runtime::session",
                session = %self.id,
                outcome = %result,
                turn = observation.turn,
                "Combat ended"
            );
        }

        let entry = ActionLogEntry { nonce, action };
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.record_action(&entry)?;
            recorder.record_observation(&observation)?;
        }
        self.log.push(entry);
        self.observations.push(observation);
        Ok(outcome)
    }

    /// Runs `action` on a copy of the engine and returns the observation it would
    /// produce. The session is not touched.
    pub fn preview(&self, action: &Action) -> Result<Observation> {
        let env = CombatEnv::from_snapshot(&self.content);
        let nonce = self.log.len() as u64;
        let wrap = |source| RuntimeError::Execute {
            nonce,
            action: action.as_str(),
            source,
        };
        let branch = self.engine.simulate(env, action).map_err(wrap)?;
        branch.observe(env).map_err(wrap)
    }

    pub fn available_actions(&self) -> Result<Vec<Action>> {
        let env = CombatEnv::from_snapshot(&self.content);
        self.engine
            .available_actions(env)
            .map_err(RuntimeError::Setup)
    }

    /// Flushes any on-disk record.
    pub fn finish(&mut self) -> Result<()> {
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.flush()?;
            tracing::debug!(
                target: "runtime::session",
                session = %self.id,
                dir = %recorder.dir().display(),
                "Session record flushed"
            );
        }
        Ok(())
    }

    /// Hex SHA-256 of the current state.
    pub fn digest(&self) -> Result<String> {
        state_digest(self.engine.state())
    }

    pub fn rng_counters(&self) -> BTreeMap<String, u64> {
        self.engine.state().rng.counter_map()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &CombatState {
        self.engine.state()
    }

    pub fn is_over(&self) -> bool {
        self.engine.is_over()
    }

    pub fn actions(&self) -> &[ActionLogEntry] {
        &self.log
    }

    /// Opening observation followed by one per applied action.
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn content(&self) -> &Arc<ContentSnapshot> {
        &self.content
    }
}

pub(crate) fn state_digest(state: &CombatState) -> Result<String> {
    state
        .digest()
        .map(hex::encode)
        .map_err(|e| RuntimeError::Digest(e.to_string()))
}

/// Sessions are named after the digest of their opening state, so replaying the same
/// setup records into the same directory.
fn session_id(state: &CombatState) -> Result<String> {
    let digest = state_digest(state)?;
    Ok(format!("combat_{}", &digest[..16]))
}

fn report_failure(nonce: u64, action: &Action, error: &ExecuteError) {
    match error.kind() {
        ErrorKind::InvalidAction => tracing::warn!(
            target: "runtime::session",
            nonce,
            action = ?action,
            error = %error,
            "Action rejected"
        ),
        ErrorKind::InvariantViolation | ErrorKind::ContentMiss => tracing::error!(
            target: "runtime::session",
            nonce,
            action = ?action,
            kind = %error.kind(),
            error = %error,
            "Action aborted"
        ),
    }
}

//! Session, replay and audit harness around the combat engine.
//!
//! - [`session`] drives one engine and logs every committed action
//! - [`replay`] re-executes a recorded action log into a [`ReplayReport`]
//! - [`audit`] compares a replay against reference observations
//! - [`repository`] holds the JSON-lines files sessions are recorded to
//!
//! Log events use the `runtime::session`, `runtime::replay` and `runtime::audit`
//! targets.
pub mod audit;
pub mod config;
pub mod error;
pub mod replay;
pub mod repository;
pub mod session;

pub use audit::{AuditReport, Divergence, audit, audit_with, load_reference};
pub use config::RuntimeConfig;
pub use error::{EXIT_CONTENT, EXIT_DIVERGENCE, Result, RuntimeError};
pub use replay::{
    REPLAY_FORMAT_VERSION, ReplayFile, ReplayReport, available_after, replay, replay_with,
};
pub use repository::{ActionLogEntry, RepositoryError, SessionRecorder};
pub use session::CombatSession;

use std::sync::Arc;

use combat_core::ContentSnapshot;

/// Loads and validates the content tables named by `config`.
pub fn load_content(config: &RuntimeConfig) -> Result<Arc<ContentSnapshot>> {
    let factory = config.content_factory();
    let content = factory.load_snapshot()?;
    tracing::debug!(
        target: "runtime::session",
        dir = %factory.data_dir().display(),
        "Content loaded"
    );
    Ok(Arc::new(content))
}

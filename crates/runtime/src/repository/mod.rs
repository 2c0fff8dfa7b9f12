//! File-backed persistence for sessions: JSON-lines logs and the per-session recorder.

mod error;
mod log;
mod recorder;

pub use error::{RepositoryError, Result};
pub use log::{JsonLinesLog, read_json_lines};
pub use recorder::{ACTIONS_FILE, ActionLogEntry, OBSERVATIONS_FILE, SessionRecorder};

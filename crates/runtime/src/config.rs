//! Runtime configuration read from the process environment.
use std::env;
use std::path::PathBuf;

use combat_content::DATA_DIR_ENV;

/// Environment variable naming the directory session logs are written to.
pub const RECORD_DIR_ENV: &str = "COMBAT_RECORD_DIR";
/// Environment variable that makes audits stop at the first divergent step.
pub const STOP_ON_DIVERGENCE_ENV: &str = "COMBAT_STOP_ON_DIVERGENCE";

/// Settings shared by sessions, replays and audits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Content data directory; the bundled tables are used when unset.
    pub data_dir: Option<PathBuf>,
    /// When set, every session records its action log and observations here.
    pub record_dir: Option<PathBuf>,
    pub stop_on_divergence: bool,
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_DATA_DIR` - Content data directory (default: bundled tables)
    /// - `COMBAT_RECORD_DIR` - Directory for session logs (default: no recording)
    /// - `COMBAT_STOP_ON_DIVERGENCE` - Stop audits at the first divergence (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.data_dir = read_env::<PathBuf>(DATA_DIR_ENV).filter(|p| !p.as_os_str().is_empty());
        config.record_dir =
            read_env::<PathBuf>(RECORD_DIR_ENV).filter(|p| !p.as_os_str().is_empty());

        if let Some(stop) = read_env::<bool>(STOP_ON_DIVERGENCE_ENV) {
            config.stop_on_divergence = stop;
        } else if let Some(flag) = read_env::<u8>(STOP_ON_DIVERGENCE_ENV) {
            config.stop_on_divergence = flag != 0;
        }

        config
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn with_record_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.record_dir = Some(dir.into());
        self
    }

    pub fn with_stop_on_divergence(mut self, stop: bool) -> Self {
        self.stop_on_divergence = stop;
        self
    }

    /// Content factory for the configured data directory.
    pub fn content_factory(&self) -> combat_content::ContentFactory {
        match &self.data_dir {
            Some(dir) => combat_content::ContentFactory::new(dir),
            None => combat_content::ContentFactory::new(combat_content::bundled_data_dir()),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

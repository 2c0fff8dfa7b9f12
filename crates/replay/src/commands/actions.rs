//! List the actions available after a prefix of an action log.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use runtime::{ReplayFile, RuntimeConfig, available_after, load_content};

#[derive(Parser)]
pub struct Actions {
    /// Replay file (JSON: version, setup, actions)
    #[arg(value_name = "REPLAY")]
    replay: PathBuf,

    /// Number of logged actions to apply first (default: all of them)
    #[arg(short, long, value_name = "N")]
    after: Option<usize>,
}

impl Actions {
    /// Prints one JSON action per line, ready to append to a replay file.
    pub fn execute(self, config: RuntimeConfig) -> Result<()> {
        let file = ReplayFile::load(&self.replay)?;
        let content = load_content(&config)?;
        let steps = self.after.unwrap_or(file.actions.len());

        for action in available_after(&file, content, steps)? {
            println!("{}", serde_json::to_string(&action)?);
        }
        Ok(())
    }
}

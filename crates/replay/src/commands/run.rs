//! Replay an action log.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use runtime::repository::JsonLinesLog;
use runtime::{ReplayFile, RuntimeConfig, load_content, replay_with};

#[derive(Parser)]
pub struct Run {
    /// Replay file (JSON: version, setup, actions)
    #[arg(value_name = "REPLAY")]
    replay: PathBuf,

    /// Record the session under this directory (overrides COMBAT_RECORD_DIR)
    #[arg(long, value_name = "DIR")]
    record_dir: Option<PathBuf>,

    /// Write the observations as JSON lines, usable as an audit reference
    #[arg(long, value_name = "FILE")]
    observations: Option<PathBuf>,

    /// Print the full report as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

impl Run {
    pub fn execute(self, mut config: RuntimeConfig) -> Result<()> {
        if let Some(dir) = self.record_dir {
            config = config.with_record_dir(dir);
        }

        let file = ReplayFile::load(&self.replay)?;
        let content = load_content(&config)?;
        let report = replay_with(&file, content, &config)?;

        if let Some(path) = &self.observations {
            let dir = path.parent().map(PathBuf::from).unwrap_or_default();
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .with_context(|| format!("invalid observations path {}", path.display()))?;
            let mut log = JsonLinesLog::create(dir, name)?;
            for observation in &report.observations {
                log.append(observation)?;
            }
            log.flush()?;
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        let outcome = match report.outcome {
            Some(outcome) => style(outcome.to_string()).green().bold(),
            None => style("ongoing".to_string()).yellow(),
        };
        println!("{} {}", style("Replay:").bold(), self.replay.display());
        println!("  actions:  {}", file.actions.len());
        if let Some(last) = report.final_observation() {
            println!("  turn:     {}", last.turn);
            println!("  player:   {}/{} hp", last.player.hp, last.player.max_hp);
        }
        println!("  outcome:  {outcome}");
        println!("  digest:   {}", style(&report.digest).dim());
        for (stream, counter) in &report.rng {
            println!("  rng.{stream:<12} {counter}");
        }
        Ok(())
    }
}

//! Replay an action log and compare it against reference observations.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;
use runtime::{ReplayFile, RuntimeConfig, audit_with, load_content, load_reference, replay};

#[derive(Parser)]
pub struct Audit {
    /// Replay file (JSON: version, setup, actions)
    #[arg(value_name = "REPLAY")]
    replay: PathBuf,

    /// Reference observations (JSON lines, opening state first)
    #[arg(value_name = "REFERENCE")]
    reference: PathBuf,

    /// Stop at the first divergent step (overrides COMBAT_STOP_ON_DIVERGENCE)
    #[arg(long)]
    stop_on_divergence: bool,
}

impl Audit {
    pub fn execute(self, config: RuntimeConfig) -> Result<()> {
        let stop = self.stop_on_divergence || config.stop_on_divergence;

        let file = ReplayFile::load(&self.replay)?;
        let reference = load_reference(&self.reference)?;
        let content = load_content(&config)?;
        let report = replay(&file, content)?;
        let audit = audit_with(&report, &reference, stop)?;

        for divergence in &audit.divergences {
            println!(
                "{} step {} at {}",
                style("DIVERGED").red().bold(),
                divergence.step,
                style(&divergence.path).cyan()
            );
            println!("    expected: {}", divergence.expected);
            println!("    actual:   {}", divergence.actual);
        }
        if audit.is_clean() {
            println!(
                "{} {} steps match",
                style("OK").green().bold(),
                audit.steps_compared
            );
        }

        audit.into_result()?;
        Ok(())
    }
}

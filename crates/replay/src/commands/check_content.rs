//! Load and validate the content tables.

use anyhow::Result;
use clap::Parser;
use console::style;
use runtime::{RuntimeConfig, load_content};

#[derive(Parser)]
pub struct CheckContent {}

impl CheckContent {
    pub fn execute(self, config: RuntimeConfig) -> Result<()> {
        let factory = config.content_factory();
        let content = load_content(&config)?;

        println!(
            "{} {}",
            style("Content OK:").green().bold(),
            factory.data_dir().display()
        );
        println!("  cards:    {}", content.cards().count());
        println!("  statuses: {}", content.statuses().count());
        println!("  relics:   {}", content.relics().count());
        println!("  potions:  {}", content.potions().count());
        println!("  enemies:  {}", content.enemies().count());
        Ok(())
    }
}

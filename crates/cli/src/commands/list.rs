//! List troops command

use std::path::PathBuf;

use anyhow::{Context, Result};
use battle_content::ContentFactory;
use clap::Parser;

use super::DEFAULT_CONTENT_DIR;

/// List the troops available in a content directory
#[derive(Parser, Debug)]
pub struct List {
    /// Content directory
    #[arg(long, default_value = DEFAULT_CONTENT_DIR)]
    pub content: PathBuf,
}

impl List {
    pub fn execute(self) -> Result<()> {
        let bundle = ContentFactory::new(&self.content)
            .load_bundle()
            .with_context(|| format!("loading content from {}", self.content.display()))?;

        for troop in &bundle.troops {
            let members: Vec<&str> = troop
                .members
                .iter()
                .map(|id| {
                    bundle
                        .data
                        .enemies
                        .get(id)
                        .map_or("?", |enemy| enemy.name.as_str())
                })
                .collect();
            let escape = match troop.escape_allowed {
                Some(false) => " (no escape)",
                _ => "",
            };
            println!("{:>3}  {:<16} {}{}", troop.id, troop.name, members.join(", "), escape);
        }
        Ok(())
    }
}

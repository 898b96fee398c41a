//! Run battle command

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use battle_content::ContentFactory;
use battle_core::Side;
use battle_runtime::{BattleReport, BattleRuntime, RuntimeConfig};
use clap::Parser;

use super::DEFAULT_CONTENT_DIR;

/// Fight one troop and print the report
#[derive(Parser, Debug)]
pub struct Run {
    /// Content directory
    #[arg(long, default_value = DEFAULT_CONTENT_DIR)]
    pub content: PathBuf,

    /// Troop id to fight
    #[arg(long)]
    pub troop: u32,

    /// Battle seed (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Abort the battle after this many ticks
    #[arg(long, default_value_t = RuntimeConfig::default().max_ticks)]
    pub max_ticks: u64,

    /// Milliseconds between ticks (0 runs unpaced)
    #[arg(long, default_value_t = 0)]
    pub tick_ms: u64,

    /// Ticks each animation holds the executor
    #[arg(long, default_value_t = 0)]
    pub animation_ticks: u32,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl Run {
    pub async fn execute(self) -> Result<()> {
        let content = ContentFactory::new(&self.content)
            .load_bundle()
            .with_context(|| format!("loading content from {}", self.content.display()))?;
        let seed = self.seed.unwrap_or_else(rand::random);

        let config = RuntimeConfig {
            max_ticks: self.max_ticks,
            tick_interval: (self.tick_ms > 0).then(|| Duration::from_millis(self.tick_ms)),
            animation_ticks: self.animation_ticks,
            ..RuntimeConfig::default()
        };

        let report = BattleRuntime::builder()
            .config(config)
            .content(content)
            .troop(self.troop)
            .seed(seed)
            .build()
            .context("setting up battle")?
            .run()
            .await
            .context("running battle")?;

        if self.json {
            println!("{}", report.to_json()?);
        } else {
            print_report(&report);
        }
        Ok(())
    }
}

fn print_report(report: &BattleReport) {
    println!(
        "troop {} (seed {}): {} after {} ticks",
        report.troop, report.seed, report.outcome, report.ticks
    );
    for side in [Side::Ally, Side::Enemy] {
        println!("{side}:");
        for c in report.combatants.iter().filter(|c| c.side == side) {
            let status = if c.hidden {
                "gone"
            } else if c.hp == 0 {
                "down"
            } else {
                ""
            };
            println!(
                "  {:<16} {:>4}/{:<4} turns {:>3} {}",
                c.name, c.hp, c.max_hp, c.turns, status
            );
        }
    }
    if let Some(rewards) = &report.rewards {
        let drops: Vec<String> = rewards.drops.iter().map(|id| id.to_string()).collect();
        println!(
            "rewards: {} exp, {} gold, drops [{}]",
            rewards.exp,
            rewards.gold,
            drops.join(", ")
        );
    }
}

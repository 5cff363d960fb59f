use std::path::PathBuf;

use clap::Parser;
use lancard_config::Config;
use lancard_core::{DrillError, DrillOrder};

#[derive(Debug, Parser)]
#[command(name = "lancard", version, about = "Learn words with flash cards in the terminal")]
pub struct Cli {
    /// Dictionary file, created on first use
    pub filename: PathBuf,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Seed the drill order for reproducible sessions
    #[arg(long)]
    pub seed: Option<u64>,

    /// Drill order: shuffle (every word once per lap) or random
    #[arg(long, value_parser = parse_order)]
    pub order: Option<DrillOrder>,
}

fn parse_order(value: &str) -> Result<DrillOrder, String> {
    value.parse().map_err(|e: DrillError| e.to_string())
}

impl Cli {
    /// Command line flags take precedence over the environment
    pub fn apply(&self, config: &mut Config) {
        if self.debug {
            config.log.level = "debug".to_string();
        }
        if let Some(seed) = self.seed {
            config.drill.seed = Some(seed);
        }
        if let Some(order) = self.order {
            config.drill.order = order;
        }
    }
}

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use harvest_core::HarvestConfig;
use harvest_engine::FetchSettings;
use harvest_logging::LogDestination;
use log::LevelFilter;

/// Scrape a curated link list into a CSV file, one row per link.
#[derive(Parser, Debug)]
#[command(name = "link-harvester", version)]
pub struct Cli {
    /// RON file with any of the HarvestConfig fields
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Page listing the links to harvest
    #[arg(long = "url", value_name = "URL")]
    pub primary_url: Option<String>,

    /// CSS selector for candidate anchors on the primary page
    #[arg(long, value_name = "CSS")]
    pub link_selector: Option<String>,

    /// Only anchors whose href starts with this prefix are kept
    #[arg(long, value_name = "PREFIX")]
    pub href_prefix: Option<String>,

    /// CSS selector for the rating element on each linked page
    #[arg(long, value_name = "CSS")]
    pub rating_selector: Option<String>,

    /// Output CSV path
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,

    /// Per-request timeout; requests wait indefinitely when omitted
    #[arg(long, value_name = "SECONDS")]
    pub timeout_secs: Option<u64>,

    /// User-Agent header sent with every request
    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,

    /// Also write the log to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Defaults, then the config file, then explicit flags.
    pub fn resolve_config(&self) -> anyhow::Result<HarvestConfig> {
        let base = match &self.config {
            Some(path) => load_config_file(path)?,
            None => HarvestConfig::default(),
        };
        Ok(self.apply_overrides(base))
    }

    fn apply_overrides(&self, mut config: HarvestConfig) -> HarvestConfig {
        let overrides = [
            (&self.primary_url, &mut config.primary_url),
            (&self.link_selector, &mut config.link_selector),
            (&self.href_prefix, &mut config.href_prefix),
            (&self.rating_selector, &mut config.rating_selector),
            (&self.output, &mut config.output_path),
        ];
        for (flag, field) in overrides {
            if let Some(value) = flag {
                *field = value.clone();
            }
        }
        config
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        let mut settings = FetchSettings {
            request_timeout: self.timeout_secs.map(Duration::from_secs),
            ..FetchSettings::default()
        };
        if let Some(user_agent) = &self.user_agent {
            settings.user_agent = user_agent.clone();
        }
        settings
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    pub fn log_destination(&self) -> LogDestination {
        match &self.log_file {
            Some(path) => LogDestination::TerminalAndFile(path.clone()),
            None => LogDestination::Terminal,
        }
    }
}

fn load_config_file(path: &Path) -> anyhow::Result<HarvestConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {:?}", path))?;
    ron::from_str(&text).with_context(|| format!("failed to parse config file {:?}", path))
}

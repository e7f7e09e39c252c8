use std::path::{Path, PathBuf};

use harvest_core::{ConfigError, Entry, HarvestConfig};
use harvest_logging::{harvest_debug, harvest_info};
use thiserror::Error;

use crate::export::{write_entries, ExportError};
use crate::extract::{find_candidates, EntryExtractor, ExtractionRules};
use crate::fetch::Fetcher;
use crate::parse::{parse_document, DocumentError};
use crate::FetchError;

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestReport {
    pub entries: usize,
    pub unavailable: usize,
    pub output_path: PathBuf,
}

/// Primary fetch, extraction and CSV output wired together.
pub struct Harvester<F: Fetcher> {
    config: HarvestConfig,
    rules: ExtractionRules,
    fetcher: F,
}

impl<F: Fetcher> Harvester<F> {
    /// Validates `config` and compiles its selectors before any network access.
    pub fn new(config: HarvestConfig, fetcher: F) -> Result<Self, HarvestError> {
        config.validate()?;
        let rules = ExtractionRules::from_config(&config)?;
        Ok(Self {
            config,
            rules,
            fetcher,
        })
    }

    /// Fetch the primary page and extract its entries.
    ///
    /// The primary tree is dropped before the first secondary fetch, which
    /// keeps the returned future `Send`.
    pub async fn collect(&self) -> Result<Vec<Entry>, HarvestError> {
        let candidates = {
            let output = self.fetcher.fetch(&self.config.primary_url).await?;
            if output.metadata.final_url != self.config.primary_url {
                harvest_debug!("Primary page redirected to {}", output.metadata.final_url);
            }
            let doc = parse_document(&output.bytes, output.metadata.content_type.as_deref())?;
            find_candidates(&doc, &self.rules)
        };
        let extractor = EntryExtractor::new(&self.fetcher, &self.rules);
        Ok(extractor.extract(candidates).await)
    }

    pub async fn run(&self) -> Result<HarvestReport, HarvestError> {
        let entries = self.collect().await?;
        let summary = write_entries(Path::new(&self.config.output_path), &entries)?;
        let unavailable = entries.iter().filter(|e| !e.rating.is_known()).count();
        harvest_info!(
            "Harvested {} entries from {} into {:?}",
            summary.rows,
            self.config.primary_url,
            summary.output_path
        );
        Ok(HarvestReport {
            entries: summary.rows,
            unavailable,
            output_path: summary.output_path,
        })
    }
}

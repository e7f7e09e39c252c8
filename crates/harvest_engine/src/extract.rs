use harvest_core::{Entry, HarvestConfig, Rating};
use harvest_logging::{harvest_debug, harvest_info, harvest_trace, harvest_warn};
use scraper::{ElementRef, Selector};
use thiserror::Error;

use crate::fetch::Fetcher;
use crate::parse::{compile_selector, element_text, parse_document, DocumentError, ParsedDocument};
use crate::FetchError;

/// Compiled form of the selector and prefix settings in [`HarvestConfig`].
#[derive(Debug, Clone)]
pub struct ExtractionRules {
    link_selector: Selector,
    href_prefix: String,
    rating_selector: Selector,
    rating_css: String,
}

impl ExtractionRules {
    pub fn from_config(config: &HarvestConfig) -> Result<Self, DocumentError> {
        Ok(Self {
            link_selector: compile_selector(&config.link_selector)?,
            href_prefix: config.href_prefix.clone(),
            rating_selector: compile_selector(&config.rating_selector)?,
            rating_css: config.rating_selector.clone(),
        })
    }

    fn accepts_href(&self, href: &str) -> bool {
        !self.href_prefix.is_empty() && !href.is_empty() && href.starts_with(&self.href_prefix)
    }
}

/// An anchor found on the primary page, before enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub source_url: String,
    pub title: String,
    pub description: String,
}

/// Matching anchors in document order.
///
/// Title and description are stored with leading and trailing whitespace trimmed.
pub fn find_candidates(doc: &ParsedDocument, rules: &ExtractionRules) -> Vec<Candidate> {
    let candidates: Vec<Candidate> = doc
        .select(&rules.link_selector)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?;
            if !rules.accepts_href(href) {
                harvest_trace!("Skipping link {:?}", href);
                return None;
            }
            let description = anchor
                .parent()
                .and_then(ElementRef::wrap)
                .map(|parent| element_text(&parent))
                .unwrap_or_default();
            Some(Candidate {
                source_url: href.to_string(),
                title: element_text(&anchor),
                description,
            })
        })
        .collect();
    harvest_info!("Found {} matching links", candidates.len());
    candidates
}

/// Why a rating could not be read from a secondary page.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("no text found for {selector:?}")]
    MissingRating { selector: String },
}

/// Turns primary-page anchors into entries, one secondary fetch at a time.
pub struct EntryExtractor<'a> {
    fetcher: &'a dyn Fetcher,
    rules: &'a ExtractionRules,
}

impl<'a> EntryExtractor<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, rules: &'a ExtractionRules) -> Self {
        Self { fetcher, rules }
    }

    /// Enrich `candidates` in order. Never fails: enrichment problems become
    /// [`Rating::Unavailable`].
    ///
    /// Takes owned candidates so no parsed tree is held across the fetches.
    pub async fn extract(&self, candidates: Vec<Candidate>) -> Vec<Entry> {
        let mut entries = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let rating = self.rating_for(&candidate.source_url).await;
            entries.push(Entry {
                source_url: candidate.source_url,
                title: candidate.title,
                description: candidate.description,
                rating,
            });
        }

        let unavailable = entries.iter().filter(|e| !e.rating.is_known()).count();
        harvest_info!(
            "Extracted {} entries ({} without rating)",
            entries.len(),
            unavailable
        );
        entries
    }

    pub async fn rating_for(&self, url: &str) -> Rating {
        match self.read_rating(url).await {
            Ok(value) => {
                harvest_debug!("Rating for {}: {}", url, value);
                Rating::Known(value)
            }
            Err(err) => {
                harvest_warn!("Failed to get rating for {}: {}", url, err);
                Rating::unavailable(err.to_string())
            }
        }
    }

    async fn read_rating(&self, url: &str) -> Result<String, EnrichmentError> {
        let output = self.fetcher.fetch(url).await?;
        let doc = parse_document(&output.bytes, output.metadata.content_type.as_deref())?;
        doc.select_text(&self.rules.rating_selector)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| EnrichmentError::MissingRating {
                selector: self.rules.rating_css.clone(),
            })
    }
}

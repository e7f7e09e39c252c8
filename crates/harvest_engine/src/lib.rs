//! Harvest engine: fetch, parse, extract and CSV output.
mod decode;
mod export;
mod extract;
mod fetch;
mod harvester;
mod parse;
mod types;

pub use decode::{decode_html, DecodedHtml};
pub use export::{write_entries, ExportError, ExportSummary};
pub use extract::{find_candidates, Candidate, EnrichmentError, EntryExtractor, ExtractionRules};
pub use fetch::{ClientBuildError, FetchSettings, Fetcher, ReqwestFetcher};
pub use harvester::{HarvestError, HarvestReport, Harvester};
pub use parse::{compile_selector, parse_document, DocumentError, ParsedDocument};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput};

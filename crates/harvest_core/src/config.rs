use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub const DEFAULT_PRIMARY_URL: &str = "https://github.com/avelino/awesome-go";
pub const DEFAULT_LINK_SELECTOR: &str = ".markdown-body ul li a";
pub const DEFAULT_HREF_PREFIX: &str = "https://github.com/";
pub const DEFAULT_RATING_SELECTOR: &str = "#repo-stars-counter-star";
pub const DEFAULT_OUTPUT_PATH: &str = "libraries.csv";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid primary url {url:?}: {message}")]
    InvalidUrl { url: String, message: String },
    #[error("configuration field `{0}` must not be empty")]
    EmptyField(&'static str),
}

/// Everything the pipeline needs to know about its inputs and output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    /// Page listing the candidate links.
    pub primary_url: String,
    /// CSS selector for candidate anchors on the primary page.
    pub link_selector: String,
    /// Anchors whose `href` does not start with this (case-sensitive) are skipped.
    pub href_prefix: String,
    /// CSS selector for the rating element on each secondary page.
    pub rating_selector: String,
    /// Output CSV path.
    pub output_path: String,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            primary_url: DEFAULT_PRIMARY_URL.to_string(),
            link_selector: DEFAULT_LINK_SELECTOR.to_string(),
            href_prefix: DEFAULT_HREF_PREFIX.to_string(),
            rating_selector: DEFAULT_RATING_SELECTOR.to_string(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
        }
    }
}

impl HarvestConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("link_selector", &self.link_selector),
            ("href_prefix", &self.href_prefix),
            ("rating_selector", &self.rating_selector),
            ("output_path", &self.output_path),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyField(name));
            }
        }

        let parsed = Url::parse(&self.primary_url).map_err(|err| ConfigError::InvalidUrl {
            url: self.primary_url.clone(),
            message: err.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: self.primary_url.clone(),
                message: format!("unsupported scheme {}", parsed.scheme()),
            });
        }
        Ok(())
    }
}


use std::fmt;

/// Placeholder written in place of a rating that could not be read.
pub const RATING_SENTINEL: &str = "N/A";

/// Outcome of the per-entry enrichment step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rating {
    /// Text read from the secondary page.
    Known(String),
    /// Enrichment failed; `reason` is kept for diagnostics only.
    Unavailable { reason: String },
}

impl Rating {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Rating::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Rating::Known(_))
    }

    /// Text as it appears in the output table.
    pub fn as_str(&self) -> &str {
        match self {
            Rating::Known(value) => value,
            Rating::Unavailable { .. } => RATING_SENTINEL,
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One discovered link plus its enrichment value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub source_url: String,
    pub title: String,
    pub description: String,
    pub rating: Rating,
}

impl Entry {
    /// Output columns, in field declaration order.
    pub const COLUMNS: [&'static str; 4] = ["sourceURL", "title", "description", "rating"];

    /// Fields in the same order as [`Entry::COLUMNS`].
    pub fn to_record(&self) -> [&str; 4] {
        [
            self.source_url.as_str(),
            self.title.as_str(),
            self.description.as_str(),
            self.rating.as_str(),
        ]
    }
}

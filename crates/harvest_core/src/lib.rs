//! Harvest core: the flat record model and pipeline configuration.
mod config;
mod entry;

pub use config::{ConfigError, HarvestConfig};
pub use entry::{Entry, Rating, RATING_SENTINEL};

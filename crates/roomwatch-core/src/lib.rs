pub mod monitors;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use monitors::{load_monitors, MonitorConfig, MonitorsFile};

/// A normalized price extracted from a booking page.
///
/// `raw` preserves the matched text exactly as it appeared in the source so
/// that history entries stay auditable; `value` is the parsed amount and
/// `currency` an ISO-4217 code when one could be resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceResult {
    pub raw: String,
    pub value: f64,
    pub currency: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read monitors file {path}: {source}")]
    MonitorsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse monitors file: {0}")]
    MonitorsFileParse(#[from] serde_yaml::Error),

    #[error("monitors validation failed: {0}")]
    Validation(String),
}

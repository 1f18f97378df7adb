use thiserror::Error;

/// Configuration-level failures of a single extraction call.
///
/// "No price found" is never an error; every extraction entry point reports
/// that as a normal `None`/empty return so callers can distinguish a broken
/// monitor configuration from a page that simply carries no price.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no price_regex configured for this extraction request")]
    MissingRegex,

    #[error("invalid price_regex \"{pattern}\": {reason}")]
    InvalidRegex { pattern: String, reason: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed API payload: {reason}")]
    MalformedPayload { reason: String },
}

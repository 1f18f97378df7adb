//! Domain types for price extraction.

use serde::{Deserialize, Serialize};

/// One textual price occurrence inside a block of text.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceMatch {
    /// The matched amount text exactly as it appeared, e.g. `"1.234,56"`.
    pub raw: String,
    /// Parsed amount.
    pub value: f64,
    /// ISO-4217 code resolved from the adjacent symbol/code, if recognized.
    pub currency: Option<String>,
    /// Byte offset of the full match in the scanned text.
    pub offset: usize,
    /// Byte length of the full match.
    pub length: usize,
}

/// What a price refers to, judged from its surrounding text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceKind {
    Total,
    PerNight,
    PerPerson,
    Unclassified,
}

/// `From`-style qualifiers ("ab 129 €" advertises a starting rate, not the
/// rate for the requested stay).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Qualifier {
    None,
    From,
}

/// A [`PriceMatch`] plus its context classification.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedPrice {
    pub price: PriceMatch,
    pub kind: PriceKind,
    pub qualifier: Qualifier,
}

/// A provisional price found while walking a JSON document.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonCandidate {
    /// Dot-joined path from the document root, e.g. `"offers.0.total"`.
    pub path: String,
    pub value: f64,
    pub currency: Option<String>,
    /// The object key the candidate value lived under.
    pub key: String,
}

/// One room entry from a structured booking-API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiRoom {
    pub name: String,
    pub total: Option<f64>,
    pub night: Option<f64>,
    pub currency: Option<String>,
    pub blocked: bool,
}

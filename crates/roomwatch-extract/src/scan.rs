//! Free-text price scanning.
//!
//! One alternation covers both European and English orderings: symbol before
//! the amount (`€ 1.234,56`) and amount before the symbol/code (`129,00 €`,
//! `1234.56 EUR`). Amounts are runs of digits, dots, commas, spaces and
//! non-breaking spaces that end in a digit; whatever fails
//! [`normalize_amount`] afterwards is dropped so a stray match never aborts
//! the scan.

use regex::Regex;

use crate::classify::classify_window;
use crate::normalize::{normalize_amount, normalize_currency};
use crate::types::{ClassifiedPrice, PriceKind, PriceMatch};

const PRICE_PATTERN: &str = r"(?i)(€|\$|£|CHF|EUR|USD|GBP)[ \x{A0}]?([0-9](?:[0-9., \x{A0}]*[0-9])?)|([0-9](?:[0-9., \x{A0}]*[0-9])?)[ \x{A0}]?(€|\$|£|CHF|EUR|USD|GBP)";

/// Find every currency/amount occurrence in `text`, in document order.
///
/// Occurrences whose amount does not survive normalization are discarded.
#[must_use]
pub fn scan_text(text: &str) -> Vec<PriceMatch> {
    let re = Regex::new(PRICE_PATTERN).expect("valid regex");

    re.captures_iter(text)
        .filter_map(|cap| {
            let full = cap.get(0)?;
            // Branch 1: symbol first; branch 2: amount first.
            let (currency_m, amount_m) = match (cap.get(1), cap.get(2)) {
                (Some(c), Some(a)) => (c, a),
                _ => (cap.get(4)?, cap.get(3)?),
            };

            let raw = amount_m.as_str().to_string();
            let value = normalize_amount(&raw)?;

            Some(PriceMatch {
                raw,
                value,
                currency: normalize_currency(currency_m.as_str()),
                offset: full.start(),
                length: full.len(),
            })
        })
        .collect()
}

/// Scan `text` and pick the primary price among all matches.
///
/// Selection order: the first `total` match wins; otherwise the first
/// `per_night`; otherwise the first `per_person`; otherwise the first match
/// at all. Returns `None` when nothing survives normalization.
#[must_use]
pub fn find_primary_price(text: &str) -> Option<ClassifiedPrice> {
    let classified: Vec<ClassifiedPrice> = scan_text(text)
        .into_iter()
        .map(|price| {
            let (kind, qualifier) = classify_window(text, price.offset, price.length);
            ClassifiedPrice {
                price,
                kind,
                qualifier,
            }
        })
        .collect();

    for wanted in [PriceKind::Total, PriceKind::PerNight, PriceKind::PerPerson] {
        if let Some(found) = classified.iter().find(|c| c.kind == wanted) {
            return Some(found.clone());
        }
    }
    classified.into_iter().next()
}

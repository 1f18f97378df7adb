//! Extraction entry point.
//!
//! One call takes whatever the fetch or render layer delivered — an HTML
//! document, a JSON body, or a DOM text snapshot — and routes it through the
//! right path: explicit monitor regex, JSON candidate selection, or
//! host-strategy markup extraction with the built-in total-price fallback.

use roomwatch_core::{MonitorConfig, PriceResult};

use crate::error::ExtractError;
use crate::hint::{extract_price, extract_total_price};
use crate::json::{extract_candidates_from_json, pick_preferred_json_price};
use crate::markup::extract_price_for_url;

/// Extract a normalized price from a fetched response body.
///
/// Path selection:
/// 1. a monitor with a configured `price_regex` uses exactly that regex —
///    its result is final, even when it is `None`;
/// 2. bodies that parse as JSON go through candidate extraction and
///    total-preferring selection;
/// 3. everything else is treated as markup, with `extract_total_price` as
///    the terminal fallback.
///
/// # Errors
///
/// Configuration errors only ([`ExtractError::InvalidRegex`]); a page
/// without a price is `Ok(None)`.
pub fn extract_from_body(
    url: &str,
    body: &str,
    monitor: Option<&MonitorConfig>,
) -> Result<Option<PriceResult>, ExtractError> {
    if let Some(monitor) = monitor.filter(|m| m.price_regex.is_some()) {
        tracing::debug!(url, monitor = monitor.name, "using configured price regex");
        return extract_price(body, monitor);
    }

    let trimmed = body.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
            tracing::debug!(url, "body parses as JSON, selecting from candidates");
            let candidates = extract_candidates_from_json(&value);
            return Ok(pick_preferred_json_price(&candidates).map(|c| PriceResult {
                raw: format_amount(c.value),
                value: c.value,
                currency: c.currency.clone(),
            }));
        }
    }

    if let Some(result) = extract_price_for_url(url, body) {
        return Ok(Some(result));
    }

    tracing::debug!(url, "no markup candidate, trying total-price patterns");
    extract_total_price(body, None)
}

/// Canonical raw text for values that never existed as page text (JSON
/// numbers). Kept plain so re-normalizing the raw yields the same value.
fn format_amount(value: f64) -> String {
    if (value.fract()).abs() < f64::EPSILON {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

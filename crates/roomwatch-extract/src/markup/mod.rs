//! Strategy-driven markup extraction.
//!
//! Resolves a host strategy, collects candidate text snippets from the
//! parsed document in selector-declaration order, and feeds each through the
//! text scanner until one yields a price. When no markup candidate works,
//! the strategy's fallback regexes run against the raw HTML with a
//! `Gesamtpreis` hint window.

mod selectors;
mod strategies;

pub use selectors::{parse_selector, select_structural, select_texts, SelectorQuery};
pub use strategies::{resolve_strategy, HostStrategy, STRATEGIES};

use scraper::Html;

use roomwatch_core::PriceResult;

use crate::hint::{hint_window, parse_matched_price};
use crate::scan::find_primary_price;

/// Extract a price from `html` using the strategy resolved for `url`.
///
/// Returns `None` when neither the markup candidates nor the fallback
/// regexes produce a price — the normal outcome for pages without one.
#[must_use]
pub fn extract_price_for_url(url: &str, html: &str) -> Option<PriceResult> {
    let strategy = resolve_strategy(url);
    tracing::debug!(url, strategy = strategy.name, "resolved host strategy");

    let doc = Html::parse_document(html);

    for candidate in candidate_texts(&doc, strategy) {
        if let Some(classified) = find_primary_price(&candidate) {
            tracing::debug!(
                strategy = strategy.name,
                kind = ?classified.kind,
                "markup candidate yielded a price"
            );
            return Some(PriceResult {
                raw: classified.price.raw,
                value: classified.price.value,
                currency: classified.price.currency,
            });
        }
    }

    for pattern in strategy.fallback_regexes {
        if let Some(result) = apply_fallback_regex(html, pattern) {
            tracing::debug!(strategy = strategy.name, pattern, "fallback regex matched");
            return Some(result);
        }
    }

    None
}

/// Candidate snippets for a strategy: CSS selectors first, then structural
/// queries, deduplicated while keeping declaration order.
fn candidate_texts(doc: &Html, strategy: &HostStrategy) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut candidates = Vec::new();

    let mut push = |texts: Vec<String>| {
        for text in texts {
            if seen.insert(text.clone()) {
                candidates.push(text);
            }
        }
    };

    for selector in strategy.css_selectors {
        push(select_texts(doc, &parse_selector(selector)));
    }
    for query in strategy.structural_queries {
        push(select_structural(doc, query));
    }

    candidates
}

/// Run one fallback regex against the hint-narrowed document and decorate
/// the result with a currency found by direct symbol search in the matched
/// text.
fn apply_fallback_regex(html: &str, pattern: &str) -> Option<PriceResult> {
    let re = regex::Regex::new(pattern).expect("valid regex");

    let subject = hint_window(html, "Gesamtpreis").unwrap_or(html);
    let caps = re.captures(subject)?;
    let full = caps.get(0)?.as_str();
    let matched = caps.get(1).map_or(full, |m| m.as_str());

    let mut result = parse_matched_price(matched)?;
    result.currency = detect_currency(context_after(subject, caps.get(0)?.end()));
    Some(result)
}

/// The matched text plus a little trailing context; currency symbols usually
/// follow the amount on German pages.
fn context_after(subject: &str, end: usize) -> &str {
    let mut stop = end.saturating_add(12).min(subject.len());
    while !subject.is_char_boundary(stop) {
        stop += 1;
    }
    let mut start = end.saturating_sub(48).min(subject.len());
    while !subject.is_char_boundary(start) {
        start -= 1;
    }
    &subject[start..stop]
}

/// Direct substring search against the symbol/code table.
fn detect_currency(text: &str) -> Option<String> {
    const TABLE: &[(&str, &str)] = &[
        ("€", "EUR"),
        ("EUR", "EUR"),
        ("CHF", "CHF"),
        ("$", "USD"),
        ("USD", "USD"),
        ("£", "GBP"),
        ("GBP", "GBP"),
    ];
    TABLE
        .iter()
        .find(|(needle, _)| text.contains(needle))
        .map(|(_, code)| (*code).to_string())
}

//! Context classification of price matches.
//!
//! A price means nothing without knowing whether it is the stay total, a
//! per-night rate, or a per-person rate. The signal lives in the ~20
//! characters around the match ("Gesamtpreis: 1.234,56 €", "ab 129 € pro
//! Nacht"), so classification looks at a fixed window, not the whole page.

use crate::types::{PriceKind, Qualifier};

/// Window radius in characters on each side of the match.
const CONTEXT_CHARS: usize = 20;

/// Classify a match at `(offset, length)` within `text`.
///
/// Check order is per-night, then total, then per-person: when a window
/// carries both a "Gesamt" and a "pro Nacht" phrase the night label sits
/// closer to the rate it describes, and total-preference is enforced later
/// at selection time, not here.
#[must_use]
pub fn classify_window(text: &str, offset: usize, length: usize) -> (PriceKind, Qualifier) {
    let window = context_window(text, offset, length).to_lowercase();

    let kind = if window.contains("pro nacht") || window.contains("per night") {
        PriceKind::PerNight
    } else if window.contains("gesamt") || window.contains("total") {
        PriceKind::Total
    } else if window.contains("pro person") || window.contains("p.p") || window.contains("per person")
    {
        PriceKind::PerPerson
    } else {
        PriceKind::Unclassified
    };

    let qualifier = if window.contains("ab ") {
        Qualifier::From
    } else {
        Qualifier::None
    };

    (kind, qualifier)
}

/// The match text plus up to [`CONTEXT_CHARS`] characters on each side.
///
/// Offsets are byte positions; the expansion counts characters and therefore
/// stays on UTF-8 boundaries even around `€` and umlauts.
fn context_window(text: &str, offset: usize, length: usize) -> &str {
    let start_byte = offset.min(text.len());
    let end_byte = offset.saturating_add(length).min(text.len());

    let start = text[..start_byte]
        .char_indices()
        .rev()
        .take(CONTEXT_CHARS)
        .last()
        .map_or(start_byte, |(i, _)| i);

    let end = text[end_byte..]
        .char_indices()
        .nth(CONTEXT_CHARS)
        .map_or(text.len(), |(i, _)| end_byte + i);

    &text[start..end]
}

//! Static host-strategy table.
//!
//! A strategy bundles the markup selectors and fallback regexes that work on
//! one booking engine's pages. Adding support for a new site means adding a
//! table entry, never branching code. The entry whose pattern set contains
//! the sentinel `default` is the terminal fallback for unknown hosts.

/// Selector sets and fallback regexes for one family of booking hosts.
#[derive(Debug)]
pub struct HostStrategy {
    pub name: &'static str,
    /// Matched against the URL host, exact or as a `.`-suffix.
    pub host_patterns: &'static [&'static str],
    /// CSS-like selectors, tried in declaration order.
    pub css_selectors: &'static [&'static str],
    /// Structural `tag:text` contains-queries, tried after the CSS set.
    pub structural_queries: &'static [&'static str],
    /// Regexes for when no markup candidate yields a price.
    pub fallback_regexes: &'static [&'static str],
}

pub const STRATEGIES: &[HostStrategy] = &[
    HostStrategy {
        name: "onepagebooking",
        host_patterns: &["onepagebooking.com", "caesar-data.de"],
        css_selectors: &[
            ".tcpPrice__value",
            "span.tcpPrice",
            "#total-price",
            "[data-price-type=total]",
        ],
        structural_queries: &["td:Gesamtpreis", "div:Gesamtpreis"],
        fallback_regexes: &[
            r"(?i)Gesamtpreis\D*(\d[\d.,]*\d|\d)",
            r#"tcpPrice__value[^>]*>\s*(\d[\d.,]*\d|\d)"#,
        ],
    },
    HostStrategy {
        name: "hrs",
        host_patterns: &["hrs.de", "hrs.com"],
        css_selectors: &["strong.totalRate", ".offer-price", "[itemprop=price]"],
        structural_queries: &["span:Gesamt", "div:Total"],
        fallback_regexes: &[r"(?i)(?:Gesamt|Total)\D*(\d[\d.,]*\d|\d)"],
    },
    HostStrategy {
        name: "default",
        host_patterns: &["default"],
        css_selectors: &[
            ".total-price",
            "#price",
            ".price-total",
            "[itemprop=price]",
            ".price",
        ],
        structural_queries: &[":Gesamtpreis", ":Gesamtsumme", "td:Total"],
        fallback_regexes: &[r"(?i)Gesamtpreis\D*(\d[\d.,]*\d|\d)"],
    },
];

/// Resolve the strategy for a URL by host.
///
/// Hosts match a pattern exactly or as a subdomain (`www.hrs.de` matches
/// `hrs.de`). Unknown hosts get the `default` entry; the table is static, so
/// its presence is a compile-time fact guarded by a test.
#[must_use]
pub fn resolve_strategy(url: &str) -> &'static HostStrategy {
    let host = host_of(url);

    STRATEGIES
        .iter()
        .find(|s| {
            s.host_patterns.iter().any(|p| {
                *p != "default" && (host == *p || host.ends_with(&format!(".{p}")))
            })
        })
        .unwrap_or_else(default_strategy)
}

fn default_strategy() -> &'static HostStrategy {
    STRATEGIES
        .iter()
        .find(|s| s.host_patterns.contains(&"default"))
        .expect("strategy table contains a default entry")
}

/// Lowercase host portion of a URL, without scheme, port or path.
fn host_of(url: &str) -> String {
    let after_scheme = url.find("://").map_or(url, |i| &url[i + 3..]);
    let host_end = after_scheme
        .find(['/', '?', '#'])
        .unwrap_or(after_scheme.len());
    let host = &after_scheme[..host_end];
    let host = host.rsplit('@').next().unwrap_or(host);
    let host = host.split(':').next().unwrap_or(host);
    host.to_lowercase()
}

//! Deterministic translation of a small CSS-like selector subset.
//!
//! Strategies name their candidates with `#id`, `.class`, `tag`, `tag.class`,
//! `tag#id`, `[attr=val]` and `tag[attr=val]` forms only. Anything else is
//! treated as a bare tag name, which for combinator-style strings (`div > p`,
//! `:nth-child(2)`) matches no element at all — unsupported syntax misses
//! predictably instead of partially matching.

use scraper::{ElementRef, Html};

/// A translated selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorQuery {
    Id(String),
    Class(String),
    Tag(String),
    TagClass { tag: String, class: String },
    TagId { tag: String, id: String },
    Attr { name: String, value: String },
    TagAttr {
        tag: String,
        name: String,
        value: String,
    },
}

/// Translate a CSS-like selector string into a [`SelectorQuery`].
pub fn parse_selector(selector: &str) -> SelectorQuery {
    let s = selector.trim();

    if let Some(id) = s.strip_prefix('#') {
        return SelectorQuery::Id(id.to_string());
    }
    if let Some(class) = s.strip_prefix('.') {
        return SelectorQuery::Class(class.to_string());
    }
    if let Some(attr) = s.strip_prefix('[') {
        if let Some((name, value)) = parse_attr(attr) {
            return SelectorQuery::Attr { name, value };
        }
    }
    if let Some(open) = s.find('[') {
        let (tag, rest) = s.split_at(open);
        if is_plain_name(tag) {
            if let Some((name, value)) = rest.strip_prefix('[').and_then(parse_attr) {
                return SelectorQuery::TagAttr {
                    tag: tag.to_lowercase(),
                    name,
                    value,
                };
            }
        }
    }
    if let Some((tag, id)) = s.split_once('#') {
        if is_plain_name(tag) {
            return SelectorQuery::TagId {
                tag: tag.to_lowercase(),
                id: id.to_string(),
            };
        }
    }
    if let Some((tag, class)) = s.split_once('.') {
        if is_plain_name(tag) {
            return SelectorQuery::TagClass {
                tag: tag.to_lowercase(),
                class: class.to_string(),
            };
        }
    }

    // Unknown form: treat the whole string as a tag name.
    SelectorQuery::Tag(s.to_lowercase())
}

/// `attr=val]`, `attr="val"]` or `attr='val']` after the opening bracket.
fn parse_attr(rest: &str) -> Option<(String, String)> {
    let body = rest.strip_suffix(']')?;
    let (name, value) = body.split_once('=')?;
    if !is_plain_name(name) {
        return None;
    }
    let value = value.trim_matches('"').trim_matches('\'');
    Some((name.to_lowercase(), value.to_string()))
}

fn is_plain_name(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Collect trimmed, non-empty text of every element matching `query`, in
/// document order.
#[must_use]
pub fn select_texts(doc: &Html, query: &SelectorQuery) -> Vec<String> {
    doc.root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| element_matches(el, query))
        .filter_map(|el| {
            let text = el.text().collect::<String>();
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect()
}

/// Structural "contains text" query: `tag:needle` or `:needle` (any tag).
///
/// Matches elements whose own text contains `needle` case-insensitively and
/// returns their trimmed text.
#[must_use]
pub fn select_structural(doc: &Html, query: &str) -> Vec<String> {
    let (tag, needle) = match query.split_once(':') {
        Some((t, n)) => (t.trim().to_lowercase(), n.trim().to_lowercase()),
        None => (String::new(), query.trim().to_lowercase()),
    };
    if needle.is_empty() {
        return Vec::new();
    }

    doc.root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| tag.is_empty() || el.value().name() == tag)
        .filter_map(|el| {
            let text = el.text().collect::<String>();
            let trimmed = text.trim();
            (!trimmed.is_empty() && trimmed.to_lowercase().contains(&needle))
                .then(|| trimmed.to_string())
        })
        .collect()
}

fn element_matches(el: &ElementRef<'_>, query: &SelectorQuery) -> bool {
    let v = el.value();
    match query {
        SelectorQuery::Id(id) => v.attr("id") == Some(id.as_str()),
        SelectorQuery::Class(class) => v.classes().any(|c| c == class),
        SelectorQuery::Tag(tag) => v.name() == tag,
        SelectorQuery::TagClass { tag, class } => {
            v.name() == tag && v.classes().any(|c| c == class)
        }
        SelectorQuery::TagId { tag, id } => v.name() == tag && v.attr("id") == Some(id.as_str()),
        SelectorQuery::Attr { name, value } => v.attr(name) == Some(value.as_str()),
        SelectorQuery::TagAttr { tag, name, value } => {
            v.name() == tag && v.attr(name) == Some(value.as_str())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <div id="summary">Gesamtpreis: 1.234,56 €</div>
          <span class="rate nightly">129,00 € pro Nacht</span>
          <table><tr><td class="rate">129,00 € pro Nacht</td></tr></table>
          <p data-role="total">Total: 903,00 €</p>
          <table><tr><td>Gesamtsumme</td><td>450,00 €</td></tr></table>
        </body></html>
    "#;

    fn doc() -> Html {
        Html::parse_document(PAGE)
    }

    // -----------------------------------------------------------------------
    // parse_selector
    // -----------------------------------------------------------------------

    #[test]
    fn translates_each_supported_form() {
        assert_eq!(parse_selector("#summary"), SelectorQuery::Id("summary".into()));
        assert_eq!(parse_selector(".rate"), SelectorQuery::Class("rate".into()));
        assert_eq!(parse_selector("td"), SelectorQuery::Tag("td".into()));
        assert_eq!(
            parse_selector("span.rate"),
            SelectorQuery::TagClass {
                tag: "span".into(),
                class: "rate".into()
            }
        );
        assert_eq!(
            parse_selector("div#summary"),
            SelectorQuery::TagId {
                tag: "div".into(),
                id: "summary".into()
            }
        );
        assert_eq!(
            parse_selector("[data-role=total]"),
            SelectorQuery::Attr {
                name: "data-role".into(),
                value: "total".into()
            }
        );
        assert_eq!(
            parse_selector(r#"p[data-role="total"]"#),
            SelectorQuery::TagAttr {
                tag: "p".into(),
                name: "data-role".into(),
                value: "total".into()
            }
        );
    }

    #[test]
    fn unknown_forms_degrade_to_tag_match() {
        assert_eq!(
            parse_selector("div > p"),
            SelectorQuery::Tag("div > p".into())
        );
    }

    // -----------------------------------------------------------------------
    // select_texts
    // -----------------------------------------------------------------------

    #[test]
    fn id_selector_finds_exact_element() {
        let texts = select_texts(&doc(), &parse_selector("#summary"));
        assert_eq!(texts, vec!["Gesamtpreis: 1.234,56 €"]);
    }

    #[test]
    fn class_selector_is_class_contains() {
        // The span carries class="rate nightly"; both elements match ".rate".
        let texts = select_texts(&doc(), &parse_selector(".rate"));
        assert_eq!(texts.len(), 2);
    }

    #[test]
    fn tag_class_combination_narrows() {
        let texts = select_texts(&doc(), &parse_selector("td.rate"));
        assert_eq!(texts, vec!["129,00 € pro Nacht"]);
    }

    #[test]
    fn attribute_selector_matches_equality() {
        let texts = select_texts(&doc(), &parse_selector("[data-role=total]"));
        assert_eq!(texts, vec!["Total: 903,00 €"]);
    }

    #[test]
    fn unsupported_combinator_matches_nothing() {
        assert!(select_texts(&doc(), &parse_selector("div > p")).is_empty());
        assert!(select_texts(&doc(), &parse_selector("td:nth-child(2)")).is_empty());
    }

    // -----------------------------------------------------------------------
    // select_structural
    // -----------------------------------------------------------------------

    #[test]
    fn structural_query_filters_by_tag_and_text() {
        let texts = select_structural(&doc(), "tr:Gesamtsumme");
        assert_eq!(texts, vec!["Gesamtsumme450,00 €"]);
    }

    #[test]
    fn structural_query_without_tag_matches_any_element() {
        let texts = select_structural(&doc(), ":gesamtpreis");
        assert!(texts.iter().any(|t| t.contains("1.234,56")));
    }

    #[test]
    fn structural_query_is_case_insensitive() {
        assert!(!select_structural(&doc(), "div:GESAMTPREIS").is_empty());
    }
}

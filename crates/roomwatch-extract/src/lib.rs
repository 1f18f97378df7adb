pub mod api;
pub mod blocked;
pub mod classify;
pub mod error;
pub mod hint;
pub mod json;
pub mod markup;
pub mod normalize;
pub mod pipeline;
pub mod scan;
pub mod types;

pub use api::parse_api_response;
pub use blocked::is_blocked;
pub use error::ExtractError;
pub use hint::{extract_price, extract_total_price};
pub use json::{contains_price_keys, extract_candidates_from_json, pick_preferred_json_price};
pub use markup::{extract_price_for_url, resolve_strategy, HostStrategy};
pub use pipeline::extract_from_body;
pub use scan::{find_primary_price, scan_text};
pub use types::{ApiRoom, ClassifiedPrice, JsonCandidate, PriceKind, PriceMatch, Qualifier};

//! Extraction strategies, each isolated behind a function that returns an
//! empty result instead of failing on malformed input.

mod endpoints;
mod html;
mod inline;
mod jsonld;
mod text;

pub use endpoints::discover_endpoints;
pub use html::parse_html_fallback;
pub use inline::try_extract_candidates;
pub use jsonld::extract_jsonld_documents;
pub use text::find_address_in_text;

//! Address and coordinate extraction for vacation-rental property pages.

pub mod cascade;
pub mod client;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod platform;
pub mod probe;
pub mod search;
pub mod types;

pub use cascade::{extract_from_html, extract_page};
pub use client::{FetchedPage, PageClient, DEFAULT_USER_AGENT};
pub use error::ScraperError;
pub use normalize::normalize_candidate;
pub use platform::Platform;
pub use types::{AddressRecord, Approach, Candidate, ExtractionResult, NO_RESULT_NOTE};

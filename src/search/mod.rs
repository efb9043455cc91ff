//! Doctor search: specialty detection, filtering, ranking and pagination
//!
//! Pipeline: query -> `conditions` (specialties) -> `filter` (candidate pool)
//! -> relevance gate -> `ranking` (score + stable sort) -> page ->
//! `response` rows + `advisory` note.

pub mod advisory;
pub mod conditions;
pub mod engine;
pub mod filter;
pub mod normalize;
pub mod ranking;
pub mod response;


pub use advisory::ResponseLanguage;
pub use engine::{SearchEngine, SearchQuery};
pub use filter::SearchFilters;
pub use response::SearchResponse;

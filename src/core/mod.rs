// Core algorithm exports
pub mod filters;
pub mod recommender;

pub use filters::{matches_browse_filter, matches_request};
pub use recommender::{Recommender, RecommendResult, DEFAULT_RECOMMEND_LIMIT};

//! Carmatch - listings and recommendation service for the dealership marketplace
//!
//! This library serves the public vehicle catalog and the admin panel API,
//! delegating all persistence to the hosted Supabase store. The one piece of
//! local business logic is the recommendation rule that maps a user's latest
//! find-my-car request to matching visible listings.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{matches_request, RecommendResult, Recommender};
pub use crate::models::{Car, CarFilter, CarRequest, RecommendationsResponse, RequestStatus};

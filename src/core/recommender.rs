use crate::core::filters::matches_request;
use crate::models::{Car, CarRequest};

/// Result of the recommendation process
#[derive(Debug)]
pub struct RecommendResult {
    pub recommendations: Vec<Car>,
    pub total_candidates: usize,
}

/// Recommendation engine over the user's latest car request
///
/// Pure and side-effect-free: the route layer fetches the latest request
/// and the candidate listings, then invokes `recommend` on the two
/// snapshots. Identical inputs always produce identical output.
#[derive(Debug, Clone)]
pub struct Recommender {
    limit: usize,
}

/// Default number of listings surfaced on the recommendation rail
pub const DEFAULT_RECOMMEND_LIMIT: usize = 6;

impl Recommender {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    /// Rank the candidate listings against the user's latest request
    ///
    /// # Arguments
    /// * `latest_request` - The most recent request for the user, if any
    /// * `candidates` - Listing snapshot from the hosted store
    ///
    /// # Returns
    /// At most `limit` visible matching listings, featured first, then
    /// newest first. No request means no recommendations, not an error.
    pub fn recommend(
        &self,
        latest_request: Option<&CarRequest>,
        candidates: Vec<Car>,
    ) -> RecommendResult {
        let total_candidates = candidates.len();

        let request = match latest_request {
            Some(request) => request,
            None => {
                return RecommendResult {
                    recommendations: Vec::new(),
                    total_candidates,
                }
            }
        };

        let mut matching: Vec<Car> = candidates
            .into_iter()
            .filter(|car| matches_request(car, request))
            .collect();

        // Featured listings first, then newest listings within each group
        matching.sort_by(|a, b| {
            b.featured()
                .cmp(&a.featured())
                .then_with(|| b.created_at.cmp(&a.created_at))
        });

        matching.truncate(self.limit);

        RecommendResult {
            recommendations: matching,
            total_candidates,
        }
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new(DEFAULT_RECOMMEND_LIMIT)
    }
}

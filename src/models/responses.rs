use serde::{Deserialize, Serialize};
use crate::models::domain::{Admin, Car, CarRequest};

/// Response for the recommendations endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<Car>,
    pub total_candidates: usize,
}

/// Response for the public listings endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarListResponse {
    pub cars: Vec<Car>,
    pub total: usize,
}

/// Response for request listing endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestListResponse {
    pub requests: Vec<CarRequest>,
    pub total: usize,
}

/// Response for the admin accounts listing
#[derive(Debug, Clone, Serialize)]
pub struct AdminListResponse {
    pub admins: Vec<Admin>,
    pub total: usize,
}

/// Response for a successful admin login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub email: String,
    pub expires_in_secs: u64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Generic acknowledgement for single-field admin mutations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateResponse {
    pub success: bool,
    pub id: String,
}

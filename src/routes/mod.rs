// Route exports
pub mod admin;
pub mod cars;
pub mod requests;

use crate::core::Recommender;
use crate::services::{AuthService, CacheManager, SupabaseClient};
use actix_web::web;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub supabase: Arc<SupabaseClient>,
    pub cache: Arc<CacheManager>,
    pub recommender: Recommender,
    pub auth: AuthService,
    pub max_list_limit: u16,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(cars::configure)
            .configure(requests::configure)
            .configure(admin::configure),
    );
}

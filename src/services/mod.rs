// Service exports
pub mod auth;
pub mod cache;
pub mod supabase;

pub use auth::{AdminClaims, AuthError, AuthService};
pub use cache::{CacheError, CacheKey, CacheManager};
pub use supabase::{SupabaseClient, SupabaseError, SupabaseTables};

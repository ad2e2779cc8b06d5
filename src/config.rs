use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub supabase: SupabaseSettings,
    #[serde(default)]
    pub table: TableSettings,
    pub cache: CacheSettings,
    #[serde(default)]
    pub recommend: RecommendSettings,
    pub auth: AuthSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseSettings {
    pub url: String,
    pub service_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableSettings {
    #[serde(default = "default_cars_table")]
    pub cars: String,
    #[serde(default = "default_requests_table")]
    pub car_requests: String,
    #[serde(default = "default_admins_table")]
    pub admins: String,
}

fn default_cars_table() -> String { "cars".to_string() }
fn default_requests_table() -> String { "car_requests".to_string() }
fn default_admins_table() -> String { "admins".to_string() }

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            cars: default_cars_table(),
            car_requests: default_requests_table(),
            admins: default_admins_table(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub redis_url: String,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendSettings {
    #[serde(default = "default_recommend_limit")]
    pub limit: usize,
    #[serde(default = "default_list_limit")]
    pub max_list_limit: u16,
}

fn default_recommend_limit() -> usize { 6 }
fn default_list_limit() -> u16 { 100 }

impl Default for RecommendSettings {
    fn default() -> Self {
        Self {
            limit: default_recommend_limit(),
            max_list_limit: default_list_limit(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
}

fn default_token_ttl() -> u64 { 8 * 60 * 60 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with CARMATCH_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with CARMATCH_)
            // e.g., CARMATCH_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("CARMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("CARMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Pull secrets from well-known environment variables
///
/// SUPABASE_URL / SUPABASE_SERVICE_KEY / JWT_SECRET take priority over the
/// prefixed equivalents so the service shares variable names with the
/// hosted project it talks to.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let supabase_url = env::var("SUPABASE_URL")
        .or_else(|_| env::var("CARMATCH_SUPABASE__URL"))
        .ok();
    let service_key = env::var("SUPABASE_SERVICE_KEY")
        .or_else(|_| env::var("CARMATCH_SUPABASE__SERVICE_KEY"))
        .ok();
    let jwt_secret = env::var("JWT_SECRET")
        .or_else(|_| env::var("CARMATCH_AUTH__JWT_SECRET"))
        .ok();
    let redis_url = env::var("REDIS_URL")
        .or_else(|_| env::var("CARMATCH_CACHE__REDIS_URL"))
        .ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(url) = supabase_url {
        builder = builder.set_override("supabase.url", url)?;
    }
    if let Some(key) = service_key {
        builder = builder.set_override("supabase.service_key", key)?;
    }
    if let Some(secret) = jwt_secret {
        builder = builder.set_override("auth.jwt_secret", secret)?;
    }
    if let Some(url) = redis_url {
        builder = builder.set_override("cache.redis_url", url)?;
    }

    builder.build()
}

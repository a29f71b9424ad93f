use std::env;
use std::sync::Arc;

use auth::Authenticator;
use auth::HashCost;
use auth::PasswordError;
use auth::PasswordHasher;
use auth::SessionManager;
use auth::SessionStore;
use auth::TokenIssuer;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Shortest accepted `auth.secret`, in bytes.
pub const MIN_SECRET_LENGTH: usize = 32;

/// Longest accepted token TTL or session max age, ten years in hours.
pub const MAX_LIFETIME_HOURS: i64 = 87_600;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub backend: StorageBackend,
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Token,
    Session,
}

#[derive(Deserialize, Clone)]
pub struct AuthConfig {
    pub strategy: StrategyKind,
    pub secret: String,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,
    #[serde(default = "default_session_store")]
    pub session_store: StorageBackend,
    pub session_max_age_hours: Option<i64>,
}

// Manual impl keeps the secret out of startup logs.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("strategy", &self.strategy)
            .field("secret", &"<redacted>")
            .field("token_ttl_hours", &self.token_ttl_hours)
            .field("session_cookie", &self.session_cookie)
            .field("session_store", &self.session_store)
            .field("session_max_age_hours", &self.session_max_age_hours)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        let cost = HashCost::RECOMMENDED;
        Self {
            memory_kib: cost.memory_kib,
            iterations: cost.iterations,
            parallelism: cost.parallelism,
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_token_ttl_hours() -> i64 {
    auth::DEFAULT_TOKEN_TTL_HOURS
}

fn default_session_cookie() -> String {
    auth::DEFAULT_SESSION_COOKIE.to_string()
}

fn default_session_store() -> StorageBackend {
    StorageBackend::Memory
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (AUTH__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: AUTH__SECRET=... overrides auth.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the service cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.secret.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::Message(format!(
                "auth.secret must be at least {} bytes, got {}",
                MIN_SECRET_LENGTH,
                self.auth.secret.len()
            )));
        }

        if self.requires_database() && self.database.url.is_none() {
            return Err(ConfigError::Message(
                "database.url is required for the postgres backend".to_string(),
            ));
        }

        if !(1..=MAX_LIFETIME_HOURS).contains(&self.auth.token_ttl_hours) {
            return Err(ConfigError::Message(format!(
                "auth.token_ttl_hours must be between 1 and {}",
                MAX_LIFETIME_HOURS
            )));
        }

        if matches!(
            self.auth.session_max_age_hours,
            Some(hours) if !(1..=MAX_LIFETIME_HOURS).contains(&hours)
        ) {
            return Err(ConfigError::Message(format!(
                "auth.session_max_age_hours must be between 1 and {} when set",
                MAX_LIFETIME_HOURS
            )));
        }

        if self.auth.session_cookie.is_empty() {
            return Err(ConfigError::Message(
                "auth.session_cookie must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Whether any configured store lives in Postgres.
    pub fn requires_database(&self) -> bool {
        self.database.backend == StorageBackend::Postgres || self.auth.uses_postgres_sessions()
    }
}

impl AuthConfig {
    pub fn uses_postgres_sessions(&self) -> bool {
        self.strategy == StrategyKind::Session && self.session_store == StorageBackend::Postgres
    }

    /// Build the configured strategy.
    ///
    /// `session_store` is only consulted by the session strategy.
    pub fn authenticator(
        &self,
        session_store: Arc<dyn SessionStore>,
    ) -> Result<Authenticator, ConfigError> {
        let authenticator = match self.strategy {
            StrategyKind::Token => Authenticator::token(
                TokenIssuer::new(self.secret.as_bytes())
                    .with_ttl(hours("auth.token_ttl_hours", self.token_ttl_hours)?),
            ),
            StrategyKind::Session => {
                let mut manager = SessionManager::new(session_store);
                if let Some(max_age) = self.session_max_age_hours {
                    manager = manager.with_max_age(hours("auth.session_max_age_hours", max_age)?);
                }
                Authenticator::session(manager, self.session_cookie.clone())
            }
        };

        Ok(authenticator)
    }
}

fn hours(key: &str, value: i64) -> Result<Duration, ConfigError> {
    Duration::try_hours(value)
        .ok_or_else(|| ConfigError::Message(format!("{} is out of range", key)))
}

impl PasswordConfig {
    pub fn hasher(&self) -> Result<PasswordHasher, PasswordError> {
        PasswordHasher::with_cost(HashCost {
            memory_kib: self.memory_kib,
            iterations: self.iterations,
            parallelism: self.parallelism,
        })
    }
}

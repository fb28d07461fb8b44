//! Configuration management for the catalog server

use config::{Config, ConfigError, Environment, File};
use mongodb::options::Credential;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;

/// Signing secret shipped in the defaults; never acceptable in production.
pub const DEFAULT_TOKEN_SECRET: &str = "change-this-secret-in-production";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Full connection string. When unset, one is assembled from the Atlas
    /// credentials below.
    pub uri: Option<String>,
    pub user: String,
    pub password: String,
    pub cluster_host: String,
    pub app_name: String,
    /// Database holding the `books`, `bookCategories` and `borrowedBooks` collections
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AuthConfig {
    pub access_token_secret: String,
    pub token_expiration_hours: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct CatalogConfig {
    /// Reject book writes missing required fields
    pub validate_books: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub cors: CorsConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
    /// Deployment mode, `production` enables secure cross-site cookies
    pub environment: String,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_vars(env::vars().collect())
    }

    /// Load configuration with `vars` standing in for the process environment
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let run_mode = vars
            .get("RUN_MODE")
            .cloned()
            .unwrap_or_else(|| "development".into());
        // A legacy variable left blank, as in a fresh .env, overrides nothing
        let legacy = |name: &str| vars.get(name).filter(|v| !v.trim().is_empty()).cloned();

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // LIBRARY_SERVER__PORT, LIBRARY_AUTH__ACCESS_TOKEN_SECRET, ...
            .add_source(
                Environment::with_prefix("LIBRARY")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true)
                    .source(Some(vars.clone())),
            )
            .set_override_option("server.port", legacy("PORT"))?
            .set_override_option("database.uri", legacy("DATABASE_URL"))?
            .set_override_option("database.user", legacy("DB_USER"))?
            .set_override_option("database.password", legacy("DB_PASS"))?
            .set_override_option("auth.access_token_secret", legacy("ACCESS_TOKEN_SECRET"))?
            .set_override_option("environment", legacy("NODE_ENV"))?
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.check_secret()?;
        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    /// Refuse signing secrets anyone could guess: an empty one anywhere, and
    /// the shipped default in production.
    pub fn check_secret(&self) -> Result<(), ConfigError> {
        let secret = self.auth.access_token_secret.trim();
        if secret.is_empty() {
            return Err(ConfigError::Message(
                "auth.access_token_secret must not be empty".to_string(),
            ));
        }
        if self.is_production() && secret == DEFAULT_TOKEN_SECRET {
            return Err(ConfigError::Message(
                "ACCESS_TOKEN_SECRET must be set in production".to_string(),
            ));
        }
        Ok(())
    }
}

impl DatabaseConfig {
    fn uri_override(&self) -> Option<&str> {
        self.uri.as_deref().filter(|uri| !uri.trim().is_empty())
    }

    /// Connection string used by the MongoDB client. Credentials are not
    /// embedded; see [`DatabaseConfig::credential`].
    pub fn connection_uri(&self) -> String {
        match self.uri_override() {
            Some(uri) => uri.to_string(),
            None => format!(
                "mongodb+srv://{}/?retryWrites=true&w=majority&appName={}",
                self.cluster_host, self.app_name
            ),
        }
    }

    /// Atlas credentials, passed to the driver as-is so that reserved URI
    /// characters in the password need no escaping. A full `uri` carries its
    /// own credentials.
    pub fn credential(&self) -> Option<Credential> {
        if self.uri_override().is_some() || self.user.is_empty() {
            return None;
        }

        Some(
            Credential::builder()
                .username(self.user.clone())
                .password(self.password.clone())
                .build(),
        )
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: None,
            user: String::new(),
            password: String::new(),
            cluster_host: "cluster0.8yiviav.mongodb.net".to_string(),
            app_name: "Cluster0".to_string(),
            name: "booksDB".to_string(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_secret: DEFAULT_TOKEN_SECRET.to_string(),
            token_expiration_hours: 1,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

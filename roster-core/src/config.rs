use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Result, RosterError};

/// Environment variable that overrides any configured database URL
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Load environment variables from .env files in multiple locations
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set
/// 2. Current directory .env
/// 3. ~/.roster/.env
pub fn load_dotenv() {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded_from.push(format!("current directory ({})", path.display()));
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            // dotenvy never overwrites variables that are already set
            match dotenvy::from_path(&env_file) {
                Ok(()) => loaded_from.push(format!("~/.roster/.env ({})", env_file.display())),
                Err(e) => debug!("Failed to load {}: {}", env_file.display(), e),
            }
        }
    }

    if loaded_from.is_empty() {
        debug!("No .env files found (current dir or ~/.roster)");
    } else {
        info!("Loaded environment from: {}", loaded_from.join(", "));
    }
}

/// Get the roster config directory path (~/.roster)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".roster"))
}

/// TOML configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RosterConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string; `DATABASE_URL` takes precedence
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds a store call waits for a free pooled connection
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout_secs() -> u64 {
    30
}

impl RosterConfig {
    /// Load config from TOML files
    ///
    /// Priority order (highest to lowest):
    /// 1. ./roster.toml (project-specific)
    /// 2. ~/.roster/config.toml (user defaults)
    /// 3. Built-in defaults
    ///
    /// Unreadable or malformed files are logged and skipped.
    pub fn load() -> Self {
        let mut config = RosterConfig::default();

        if let Some(global_path) = config_dir().map(|d| d.join("config.toml")) {
            if global_path.exists() {
                match Self::from_file(&global_path) {
                    Ok(global) => {
                        debug!("Loaded global config from {}", global_path.display());
                        config = global;
                    }
                    Err(e) => warn!("{}", e),
                }
            }
        }

        let local_path = PathBuf::from("roster.toml");
        if local_path.exists() {
            match Self::from_file(&local_path) {
                Ok(local) => {
                    debug!("Loaded local config from {}", local_path.display());
                    config = Self::merge(config, local);
                }
                Err(e) => warn!("{}", e),
            }
        }

        config
    }

    /// Parse a single TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| RosterError::toml(path, e))
    }

    /// Merge two configs (right overrides left)
    fn merge(mut base: Self, overlay: Self) -> Self {
        if overlay.database.url.is_some() {
            base.database.url = overlay.database.url;
        }
        base.database.max_connections = overlay.database.max_connections;
        base.database.acquire_timeout_secs = overlay.database.acquire_timeout_secs;
        base
    }

    /// Resolve the database URL: `DATABASE_URL` first, then the config file.
    pub fn database_url(&self) -> Result<String> {
        self.database_url_with(std::env::var(DATABASE_URL_ENV).ok())
    }

    fn database_url_with(&self, env_value: Option<String>) -> Result<String> {
        env_value
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.database.url.clone())
            .ok_or_else(|| {
                RosterError::config(
                    "DATABASE_URL not set. Set it in the environment, .env, or [database] url in roster.toml",
                )
            })
    }
}

//! Configuration for the focus server.
//!
//! Loaded from TOML, then overridden from the environment. Every section is
//! optional and falls back to its defaults.
//!
//! ```toml
//! [server]
//! port = 4000
//!
//! [hours]
//! start_hour = 9
//! end_hour = 17
//! timezone = "Europe/Berlin"
//!
//! [duration]
//! min_minutes = 15
//! max_minutes = 240
//! default_minutes = 60
//!
//! [store]
//! backend = "rest"
//!
//! [store.rest]
//! base_url = "https://project.supabase.co"
//! api_key = "..."
//! user_id = "..."
//! ```

use std::path::{Path, PathBuf};

use focus_engine::{DurationBounds, WorkHours};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

type Result<T> = std::result::Result<T, ConfigError>;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub hours: HoursConfig,
    pub duration: DurationBounds,
    pub store: StoreConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::ReadFile)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string. Validation is left to
    /// [`Config::validate`] so environment overrides can fill gaps first.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from `path`, or from the first default location that exists, or
    /// fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            tracing::info!("Loading config from: {}", path.display());
            return Self::from_file(path);
        }

        let config_paths = [
            Some(PathBuf::from("focus.toml")),
            dirs::config_dir().map(|p| p.join("focus/config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }

    /// Apply environment overrides. `lookup` is usually `std::env::var(..).ok()`.
    ///
    /// - `PORT` → `server.port`
    /// - `SUPABASE_URL` → `store.rest.base_url`
    /// - `SUPABASE_SERVICE_ROLE_KEY` → `store.rest.api_key`
    /// - `FOCUS_USER_ID` → `store.rest.user_id`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("PORT is not a port number: {port}")))?;
        }
        if let Some(url) = lookup("SUPABASE_URL") {
            self.store.rest.base_url = url;
        }
        if let Some(key) = lookup("SUPABASE_SERVICE_ROLE_KEY") {
            self.store.rest.api_key = key;
        }
        if let Some(user) = lookup("FOCUS_USER_ID") {
            self.store.rest.user_id = user;
        }
        Ok(())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.hours.work_hours()?;

        if !self.duration.is_valid() {
            return Err(ConfigError::Invalid(format!(
                "duration bounds must satisfy 0 < min <= default <= max, got {:?}",
                self.duration
            )));
        }

        if self.store.backend == StoreBackend::Rest {
            let rest = &self.store.rest;
            for (field, value) in [
                ("store.rest.base_url", &rest.base_url),
                ("store.rest.api_key", &rest.api_key),
                ("store.rest.user_id", &rest.user_id),
                ("store.rest.table", &rest.table),
            ] {
                if value.trim().is_empty() {
                    return Err(ConfigError::MissingField(field.to_string()));
                }
            }
            if rest.timeout_secs == 0 {
                return Err(ConfigError::Invalid("store.rest.timeout_secs must be > 0".to_string()));
            }
        }

        Ok(())
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Enable CORS for the dashboard.
    pub enable_cors: bool,
    /// Allowed origins; `"*"` allows any.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            enable_cors: true,
            cors_origins: vec!["*".to_string()],
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Daily working hours used for every search day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HoursConfig {
    pub start_hour: u32,
    pub end_hour: u32,
    /// IANA timezone name.
    pub timezone: String,
}

impl Default for HoursConfig {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 17,
            timezone: "UTC".to_string(),
        }
    }
}

impl HoursConfig {
    pub fn work_hours(&self) -> Result<WorkHours> {
        WorkHours::from_names(self.start_hour, self.end_hour, &self.timezone)
            .map_err(|e| ConfigError::Invalid(format!("hours: {e}")))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// PostgREST-compatible HTTP API (e.g. Supabase).
    Rest,
    /// JSON array of events on local disk.
    #[default]
    File,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub rest: RestStoreConfig,
    pub file: FileStoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RestStoreConfig {
    /// Project URL; `/rest/v1/<table>` is appended.
    pub base_url: String,
    pub api_key: String,
    /// Events are filtered to this user.
    pub user_id: String,
    pub table: String,
    pub timeout_secs: u64,
}

impl Default for RestStoreConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            user_id: String::new(),
            table: "events".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoreConfig {
    pub path: PathBuf,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("events.json"),
        }
    }
}

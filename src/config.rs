use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::GestureThresholds;
use crate::services::realtor::DEFAULT_HOST;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub realtor: RealtorSettings,
    #[serde(default)]
    pub sessions: SessionSettings,
    #[serde(default)]
    pub deck: DeckSettings,
    #[serde(default)]
    pub gesture: GestureSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct RealtorSettings {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_realtor_host")]
    pub host: String,
    /// Overrides `https://{host}`, mostly for tests
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_city")]
    pub default_city: String,
    #[serde(default = "default_state")]
    pub default_state: String,
    #[serde(default = "default_limit")]
    pub default_limit: u16,
    #[serde(default)]
    pub use_real_data: bool,
}

impl RealtorSettings {
    pub fn base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| format!("https://{}", self.host))
    }
}

impl Default for RealtorSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            host: default_realtor_host(),
            base_url: None,
            timeout_secs: default_timeout_secs(),
            default_city: default_city(),
            default_state: default_state(),
            default_limit: default_limit(),
            use_real_data: false,
        }
    }
}

fn default_realtor_host() -> String { DEFAULT_HOST.to_string() }
fn default_timeout_secs() -> u64 { 30 }
fn default_city() -> String { "Charlottesville".to_string() }
fn default_state() -> String { "VA".to_string() }
fn default_limit() -> u16 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    #[serde(default = "default_session_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_max_sessions")]
    pub max_sessions: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_session_ttl(),
            max_sessions: default_max_sessions(),
        }
    }
}

fn default_session_ttl() -> u64 { 3600 }
fn default_max_sessions() -> u64 { 10_000 }

#[derive(Debug, Clone, Deserialize)]
pub struct DeckSettings {
    #[serde(default = "default_lookahead")]
    pub lookahead: usize,
}

impl Default for DeckSettings {
    fn default() -> Self {
        Self { lookahead: default_lookahead() }
    }
}

fn default_lookahead() -> usize { 3 }

#[derive(Debug, Clone, Deserialize)]
pub struct GestureSettings {
    #[serde(default = "default_distance_threshold")]
    pub distance_threshold: f64,
    #[serde(default = "default_velocity_threshold")]
    pub velocity_threshold: f64,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            distance_threshold: default_distance_threshold(),
            velocity_threshold: default_velocity_threshold(),
        }
    }
}

impl From<&GestureSettings> for GestureThresholds {
    fn from(settings: &GestureSettings) -> Self {
        Self {
            distance: settings.distance_threshold,
            velocity: settings.velocity_threshold,
        }
    }
}

fn default_distance_threshold() -> f64 { 100.0 }
fn default_velocity_threshold() -> f64 { 500.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with HOMEMATCH_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., HOMEMATCH__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("HOMEMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_api_key_override(settings, rapidapi_key())?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("HOMEMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_api_key_override(settings, rapidapi_key())?.try_deserialize()
    }
}

fn rapidapi_key() -> Option<String> {
    std::env::var("RAPIDAPI_KEY").ok()
}

/// `RAPIDAPI_KEY` from the environment wins over any configured key
fn apply_api_key_override(settings: Config, key: Option<String>) -> Result<Config, ConfigError> {
    match key {
        Some(key) if !key.is_empty() => Config::builder()
            .add_source(settings)
            .set_override("realtor.api_key", key)?
            .build(),
        _ => Ok(settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_realtor_settings() {
        let realtor = RealtorSettings::default();
        assert_eq!(realtor.host, "realtor.p.rapidapi.com");
        assert_eq!(realtor.base_url(), "https://realtor.p.rapidapi.com");
        assert_eq!(realtor.default_city, "Charlottesville");
        assert_eq!(realtor.default_state, "VA");
        assert_eq!(realtor.default_limit, 30);
        assert!(!realtor.use_real_data);
    }

    #[test]
    fn test_default_gesture_thresholds() {
        let thresholds = GestureThresholds::from(&GestureSettings::default());
        assert_eq!(thresholds, GestureThresholds::default());
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("homematch-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            "[server]\nport = 9090\n\n[deck]\nlookahead = 5\n\n[realtor]\nuse_real_data = true\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.deck.lookahead, 5);
        assert!(settings.realtor.use_real_data);
        assert_eq!(settings.sessions.ttl_secs, 3600);
    }

    #[test]
    fn test_api_key_override() {
        let path = std::env::temp_dir().join(format!("homematch-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[realtor]\napi_key = \"from-file\"\n").unwrap();

        let file = || Config::builder().add_source(File::from(path.as_path())).build().unwrap();

        let settings: Settings = apply_api_key_override(file(), Some("from-env".to_string()))
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.realtor.api_key.as_deref(), Some("from-env"));

        let settings: Settings = apply_api_key_override(file(), Some(String::new()))
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.realtor.api_key.as_deref(), Some("from-file"));

        std::fs::remove_file(&path).ok();
    }
}

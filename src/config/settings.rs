use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use lazy_static::lazy_static;

use crate::completions::streak::StreakPolicy;
use crate::config::paths;
use crate::error::SparkError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CoachConfig {
    /// OpenAI-compatible chat completions endpoint
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
}

impl Default for CoachConfig {
    fn default() -> Self {
        CoachConfig {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 500,
            timeout_secs: 60,
            api_key_env: "OPENAI_API_KEY".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReminderConfig {
    pub enabled: bool,
    /// Local wall-clock time, "HH:MM" or "HH:MM:SS"
    pub time: String,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        ReminderConfig {
            enabled: true,
            time: "09:00".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub log_filter: String,
    pub log_json: bool,
    pub streak_policy: StreakPolicy,
    /// Replaces the built-in catalog when set
    pub catalog_path: Option<PathBuf>,
    pub data_dir: PathBuf,
    pub coach: CoachConfig,
    pub reminder: ReminderConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            log_filter: "info".to_string(),
            log_json: true,
            streak_policy: StreakPolicy::default(),
            catalog_path: None,
            data_dir: paths::app_data_dir().join("data"),
            coach: CoachConfig::default(),
            reminder: ReminderConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from an explicit path. A missing file yields defaults; a file that
    /// exists but does not parse is an error.
    pub fn load_from(path: &Path) -> Result<AppConfig, SparkError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str::<AppConfig>(&content).map_err(|e| {
                SparkError::from(e).with_context(format!("path: {:?}", path))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
            Err(e) => Err(SparkError::from(e).with_context(format!("path: {:?}", path))),
        }
    }
}

fn load_app_config_internal() -> AppConfig {
    let config_path = paths::settings_path();

    // Logging is not up yet when this first runs, so stderr it is
    match AppConfig::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[Config] {}; using defaults", e);
            AppConfig::default()
        }
    }
}

lazy_static! {
    static ref APP_CONFIG: AppConfig = load_app_config_internal();
}

/// Get the cached application configuration (loaded once at startup)
pub fn get_app_config() -> &'static AppConfig {
    &APP_CONFIG
}

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::storage::ensure_parent_dir;

pub const DEFAULT_CONFIG_PATH: &str = "config/chat.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Address the API server listens on
    pub bind_address: String,
    /// SQLite file holding the message table
    pub database_path: String,
    /// Base URL clients talk to
    pub server_url: String,
    /// SQLite file holding this device's settings
    pub client_database_path: String,
    pub poll_interval_secs: u64,
    /// Value of `Access-Control-Allow-Origin` on every response
    pub cors_allow_origin: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            database_path: "data/messages.db".to_string(),
            server_url: "http://127.0.0.1:3000".to_string(),
            client_database_path: "data/client.db".to_string(),
            poll_interval_secs: 60,
            cors_allow_origin: "*".to_string(),
        }
    }
}

impl AppConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}

pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            log::info!("Config file {} not found; writing defaults", path.display());
            let config = AppConfig::default();
            if let Err(err) = save_config(path, &config) {
                log::warn!("Unable to create {}: {err}", path.display());
            }
            config
        }
        Err(err) => {
            log::warn!("Failed to read config file {}: {err}", path.display());
            AppConfig::default()
        }
    }
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &AppConfig) -> std::io::Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)
}

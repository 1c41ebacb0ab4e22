//! Configuration management
//!
//! Credentials for the assertion exchange plus API and like-store settings,
//! stored as TOML in the platform config directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::api::client::Credentials as ApiCredentials;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Platform application credentials
    #[serde(default)]
    pub credentials: CredentialsConfig,
    /// Remote API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Like-store settings
    #[serde(default)]
    pub store: StoreConfig,
}

/// Secrets for the OAuth assertion exchange. All three have to be filled in
/// before a run; `Config::load` writes an empty template on first use.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default)]
    pub facebook_auth_token: String,
}

impl CredentialsConfig {
    pub fn is_complete(&self) -> bool {
        !self.client_id.is_empty()
            && !self.client_secret.is_empty()
            && !self.facebook_auth_token.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Root URL of the platform API
    #[serde(default = "default_root_url")]
    pub root_url: String,
    /// Per-request deadline in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// How many crossings to request per run
    #[serde(default = "default_crossings_limit")]
    pub crossings_limit: u32,
}

fn default_root_url() -> String {
    "https://api.happn.fr/".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_crossings_limit() -> u32 {
    250
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            root_url: default_root_url(),
            timeout_secs: default_timeout_secs(),
            crossings_limit: default_crossings_limit(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the liked-users file; defaults to likes.json in the data dir
    #[serde(default)]
    pub likes_path: Option<PathBuf>,
}

impl StoreConfig {
    pub fn likes_path(&self) -> Result<PathBuf> {
        match &self.likes_path {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join("likes.json")),
        }
    }
}

impl Config {
    /// Load configuration, writing a default template on first run.
    pub fn load() -> Result<Self> {
        let config_path = config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            let config = toml::from_str(&contents)
                .context("Failed to parse config file")?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = config_path()?;
        let parent = config_path.parent()
            .context("Config path has no parent")?;

        std::fs::create_dir_all(parent)
            .context("Failed to create config directory")?;

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        std::fs::write(&config_path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Credentials in the form the session client takes, after checking they
    /// were actually filled in.
    pub fn api_credentials(&self) -> Result<ApiCredentials> {
        if !self.credentials.is_complete() {
            anyhow::bail!(
                "Missing credentials: fill in client_id, client_secret and \
                 facebook_auth_token in {}",
                config_path()?.display()
            );
        }
        Ok(ApiCredentials {
            client_id: self.credentials.client_id.clone(),
            client_secret: self.credentials.client_secret.clone(),
            facebook_auth_token: self.credentials.facebook_auth_token.clone(),
        })
    }
}

/// Get the configuration file path
pub fn config_path() -> Result<PathBuf> {
    let base = directories::ProjectDirs::from("com", "crosslike", "crosslike")
        .context("Failed to get project directories")?;
    Ok(base.config_dir().join("config.toml"))
}

/// Get the data directory path
pub fn data_dir() -> Result<PathBuf> {
    let base = directories::ProjectDirs::from("com", "crosslike", "crosslike")
        .context("Failed to get project directories")?;
    Ok(base.data_dir().to_path_buf())
}

/// Show current configuration with secrets redacted
pub fn show_config() -> Result<()> {
    let config = Config::load()?;

    println!("Config file:      {}", config_path()?.display());
    println!("API root:         {}", config.api.root_url);
    println!("Request timeout:  {}s", config.api.timeout_secs);
    println!("Crossings limit:  {}", config.api.crossings_limit);
    println!("Like-store file:  {}", config.store.likes_path()?.display());
    println!(
        "Credentials:      {}",
        if config.credentials.is_complete() { "configured" } else { "MISSING" }
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.root_url, "https://api.happn.fr/");
        assert_eq!(config.api.crossings_limit, 250);
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert!(!config.credentials.is_complete());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [credentials]
            client_id = "cid"
            client_secret = "sec"
            facebook_auth_token = "fb"

            [api]
            crossings_limit = 10
            "#,
        )
        .expect("parse");
        assert!(config.credentials.is_complete());
        assert_eq!(config.api.crossings_limit, 10);
        // untouched fields keep their defaults
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_likes_path_override() {
        let config = StoreConfig {
            likes_path: Some(PathBuf::from("/tmp/custom.json")),
        };
        assert_eq!(config.likes_path().expect("path"), PathBuf::from("/tmp/custom.json"));
    }
}

//! Persistent CLI profile configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use quire_core::util::{is_http_url, normalize_text_option};
use quire_core::ClientConfig;
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "cli-config.json";
const APP_DIR_NAME: &str = "quire";
pub const DEFAULT_PROFILE: &str = "default";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliProfilesConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default)]
    pub active_profile: Option<String>,
    #[serde(default)]
    pub profiles: BTreeMap<String, CliProfile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliProfile {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub token_store: Option<TokenStoreKind>,
}

/// Where a profile keeps its session tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TokenStoreKind {
    /// OS keychain
    Keyring,
    /// JSON file in the data directory
    File,
}

impl Default for TokenStoreKind {
    /// The keychain where it outlives a reboot, the token file elsewhere.
    ///
    /// On Linux the `linux-native` keyring backend is the kernel keyutils
    /// store, which is dropped on reboot.
    fn default() -> Self {
        if cfg!(any(target_os = "macos", target_os = "windows")) {
            Self::Keyring
        } else {
            Self::File
        }
    }
}

const fn default_config_version() -> u32 {
    1
}

pub fn default_config_path() -> Result<PathBuf, String> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
        .ok_or_else(|| "Failed to resolve CLI config directory".to_string())
}

pub fn default_token_file_path(profile_name: &str) -> Result<PathBuf, String> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(format!("{profile_name}-tokens.json")))
        .ok_or_else(|| "Failed to resolve CLI data directory".to_string())
}

pub fn normalize_profile_name(value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl CliProfilesConfig {
    pub fn load() -> Result<Self, String> {
        Self::load_from_path(&default_config_path()?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|error| format!("Failed to read config at {}: {}", path.display(), error))?;
        let mut config = serde_json::from_str::<Self>(&raw)
            .map_err(|error| format!("Failed to parse config at {}: {}", path.display(), error))?;
        config.normalize();
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf, String> {
        let path = default_config_path()?;
        self.save_to_path(&path)?;
        Ok(path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    error
                )
            })?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        let serialized = serde_json::to_string_pretty(&normalized)
            .map_err(|error| format!("Failed to serialize config: {error}"))?;
        std::fs::write(path, serialized)
            .map_err(|error| format!("Failed to write config at {}: {}", path.display(), error))
    }

    /// `--profile`, then `QUIRE_PROFILE`, then the active profile, then `default`.
    pub fn resolve_profile_name(&self, explicit: Option<&str>) -> String {
        normalize_profile_name(explicit)
            .or_else(|| normalize_profile_name(std::env::var("QUIRE_PROFILE").ok().as_deref()))
            .or_else(|| normalize_profile_name(self.active_profile.as_deref()))
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string())
    }

    pub fn profile(&self, name: &str) -> Option<&CliProfile> {
        self.profiles.get(name)
    }

    pub fn profile_mut_or_default(&mut self, name: &str) -> &mut CliProfile {
        self.profiles.entry(name.to_string()).or_default()
    }

    fn normalize(&mut self) {
        self.active_profile = normalize_profile_name(self.active_profile.as_deref());
        for profile in self.profiles.values_mut() {
            profile.normalize();
        }
    }
}

impl CliProfile {
    /// Build the client configuration, letting `api_url_override` win over
    /// the stored URL.
    pub fn client_config(&self, api_url_override: Option<String>) -> Result<ClientConfig, String> {
        let mut config = ClientConfig::default();
        if let Some(url) = normalize_text_option(api_url_override)
            .or_else(|| normalize_text_option(self.api_url.clone()))
        {
            config.api_url = url;
        }
        if let Some(timeout) = self.request_timeout_secs {
            config.request_timeout_secs = timeout;
        }
        config.normalized().map_err(|error| error.to_string())
    }

    pub fn token_store_kind(&self) -> TokenStoreKind {
        self.token_store.unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(url) = normalize_text_option(self.api_url.clone()) {
            if !is_http_url(&url) {
                return Err("api_url must include http:// or https://".to_string());
            }
        }
        if self.request_timeout_secs == Some(0) {
            return Err("timeout must be at least one second".to_string());
        }
        Ok(())
    }

    fn normalize(&mut self) {
        self.api_url = normalize_text_option(self.api_url.clone())
            .map(|url| url.trim_end_matches('/').to_string());
    }
}

//! Configuration constants and profile loading for mesto
//!
//! Profiles live in an INI file, one section per profile:
//!
//! ```ini
//! [default]
//! auth_url = https://auth.nomoreparties.co
//! api_url = https://mesto.nomoreparties.co/v1/cohort
//! api_token = 0f1e2d3c-...
//! storage = ~/.mesto/storage.json
//! ```
//!
//! A missing file or section is not an error; every key has a default.

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default profile file path for mesto
pub const DEFAULT_PROFILE_PATH: &str = "~/.mesto/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "MESTO_PROFILE_PATH";

pub const DEFAULT_AUTH_URL: &str = "https://auth.nomoreparties.co";
pub const DEFAULT_API_URL: &str = "https://mesto.nomoreparties.co/v1/cohort";
pub const DEFAULT_STORAGE_PATH: &str = "~/.mesto/storage.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read profile file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: ini::Error,
    },
}

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

/// Expand a leading `~` into the home directory
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Server endpoints and token storage for one profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceProfile {
    pub auth_url: String,
    pub api_url: String,
    /// Static content-server token; when absent the session token is sent
    pub api_token: Option<String>,
    pub storage: PathBuf,
}

impl Default for ServiceProfile {
    fn default() -> Self {
        Self {
            auth_url: DEFAULT_AUTH_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            storage: expand_path(DEFAULT_STORAGE_PATH),
        }
    }
}

impl ServiceProfile {
    /// Load profile `name` from the INI file at `path`
    pub fn load(path: &Path, name: &str) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No profile file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let mut profile = Self::default();
        let Some(section) = ini.section(Some(name)) else {
            tracing::warn!("Profile [{}] not found in {}, using defaults", name, path.display());
            return Ok(profile);
        };

        let value = |key: &str| {
            section
                .get(key)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        if let Some(url) = value("auth_url") {
            profile.auth_url = url;
        }
        if let Some(url) = value("api_url") {
            profile.api_url = url;
        }
        profile.api_token = value("api_token");
        if let Some(storage) = value("storage") {
            profile.storage = expand_path(&storage);
        }
        Ok(profile)
    }

    /// Load profile `name` from the configured profile file
    pub fn load_named(name: &str) -> Result<Self, ConfigError> {
        let path = expand_path(&get_profile_path());
        Self::load(&path, name)
    }
}

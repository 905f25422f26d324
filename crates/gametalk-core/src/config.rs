//! Client configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then `GAMETALK_*` environment variables. The backend base URL can
//! additionally be overridden at runtime; that override is persisted by the
//! store under [`SERVER_URL_SETTING`].

use crate::errors::{ForumError, GtError, GtErrorKind, Result};
use crate::logging_facility::Profile;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Loopback of the host machine as seen from the Android emulator
pub const DEFAULT_BASE_URL: &str = "http://10.0.2.2:8080/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_DATABASE_PATH: &str = ".gametalk/gametalk.db";

/// Settings-table key holding the runtime base URL override
pub const SERVER_URL_SETTING: &str = "server_url";

const ENV_PREFIX: &str = "GAMETALK";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
    pub write_timeout_secs: u64,
    pub database_path: PathBuf,
    pub log_profile: Profile,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_secs: DEFAULT_TIMEOUT_SECS,
            read_timeout_secs: DEFAULT_TIMEOUT_SECS,
            write_timeout_secs: DEFAULT_TIMEOUT_SECS,
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            log_profile: Profile::Development,
        }
    }
}

impl ClientConfig {
    /// Load defaults, then `file` (when given and present), then the
    /// process environment.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error when a source cannot be parsed or the
    /// resulting base URL is not an http(s) URL.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        Self::load_with_env(file, None)
    }

    /// Like [`ClientConfig::load`] but reads variables from `env` instead of
    /// the process environment when it is `Some`.
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::load`].
    pub fn load_with_env(file: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("base_url", defaults.base_url)
            .and_then(|b| b.set_default("connect_timeout_secs", DEFAULT_TIMEOUT_SECS as i64))
            .and_then(|b| b.set_default("read_timeout_secs", DEFAULT_TIMEOUT_SECS as i64))
            .and_then(|b| b.set_default("write_timeout_secs", DEFAULT_TIMEOUT_SECS as i64))
            .and_then(|b| b.set_default("database_path", DEFAULT_DATABASE_PATH))
            .and_then(|b| b.set_default("log_profile", "development"))
            .map_err(config_error)?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(false));
        }

        let loaded: ClientConfig = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error)?;

        let base_url = normalize_base_url(&loaded.base_url)?;
        Ok(Self { base_url, ..loaded })
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    /// Overall bound on one request, covering sending the body and reading
    /// the response: the longer of the read and write timeouts
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs.max(self.write_timeout_secs))
    }
}

/// Validate a backend base URL and give it a trailing slash so relative
/// paths like `api/topics` join under it
///
/// # Errors
///
/// `InvalidServerUrl` (kind `Config`) for unparsable input or a scheme other
/// than http/https.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let invalid = |reason: String| -> GtError {
        ForumError::InvalidServerUrl {
            url: trimmed.to_string(),
            reason,
        }
        .into()
    };

    let mut url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url.to_string())
}

fn config_error(err: config::ConfigError) -> GtError {
    GtError::new(GtErrorKind::Config)
        .with_op("load_config")
        .with_message(err.to_string())
}

//! Layered configuration for the HTTP document source.
//!
//! Settings are merged in priority order, later layers winning:
//!
//! 1. Built-in defaults.
//! 2. `config.toml`, `config.yaml` or `config.json` in the platform config
//!    directory, or a single explicitly given file.
//! 3. Environment variables prefixed with `GC_` (e.g. `GC_TIMEOUT=10`).

pub mod error;

use std::path::{Path, PathBuf};
use std::time::Duration;

use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use url::Url;

use crate::error::{ErrorKind, Result};

const ENV_PREFIX: &str = "GC_";
const CONFIG_FILES: [&str; 3] = ["config.toml", "config.yaml", "config.json"];

/// Connection settings for talking to the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Site root that entity paths are resolved against.
    pub base_url: String,
    pub user_agent: String,
    /// Request timeout in seconds.
    pub timeout: u64,
    /// `Cookie` header of an authenticated session, e.g. `gspkauth=...`.
    pub session_cookie: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "https://www.geocaching.com".to_string(),
            user_agent: concat!("gc-client/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: 30,
            session_cookie: None,
        }
    }
}

impl Settings {
    /// Load from the platform config directory and the environment.
    #[instrument]
    pub fn load() -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(dir) = config_dir() {
            for name in CONFIG_FILES {
                let path = dir.join(name);
                if path.is_file() {
                    tracing::debug!(path = %path.display(), "Merging configuration file");
                    figment = figment.merge(file_provider(&path)?);
                }
            }
        }
        Self::extract(figment.merge(Env::prefixed(ENV_PREFIX)))
    }

    /// Load from one explicit file and the environment. The file must exist.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.is_file() {
            exn::bail!(ErrorKind::Invalid(format!("configuration file not found: {}", path.display())));
        }
        let figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(file_provider(path)?)
            .merge(Env::prefixed(ENV_PREFIX));
        Self::extract(figment)
    }

    fn extract(figment: Figment) -> Result<Self> {
        let settings: Self = figment.extract().or_raise(|| ErrorKind::Load)?;
        settings.validate()?;
        tracing::info!(base_url = %settings.base_url, session = settings.session_cookie.is_some(), "Loaded configuration");
        Ok(settings)
    }

    /// Reject values the document source cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.timeout == 0 {
            exn::bail!(ErrorKind::Invalid("timeout must be at least one second".to_string()));
        }
        let url = Url::parse(&self.base_url)
            .or_raise(|| ErrorKind::Invalid(format!("base URL `{}` does not parse", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            exn::bail!(ErrorKind::Invalid(format!("base URL `{}` is not http(s)", self.base_url)));
        }
        if self.user_agent.trim().is_empty() {
            exn::bail!(ErrorKind::Invalid("user agent must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// The platform configuration directory, if one can be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "geocaching", "gc").map(|dirs| dirs.config_dir().to_path_buf())
}

fn file_provider(path: &Path) -> Result<Figment> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();
    Ok(match extension.to_ascii_lowercase().as_str() {
        "toml" => Figment::from(Toml::file(path)),
        "yaml" | "yml" => Figment::from(Yaml::file(path)),
        "json" => Figment::from(Json::file(path)),
        _ => exn::bail!(ErrorKind::Invalid(format!("unsupported configuration format: {}", path.display()))),
    })
}

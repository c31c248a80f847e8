use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub router: RouterConfig,
    pub storage: StorageConfig,
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RouterConfig {
    pub transition_duration_ms: u64,
    /// `id` of the element whose children are swapped on navigation.
    pub content_region_id: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            transition_duration_ms: 450,
            content_region_id: "page-content".to_string(),
        }
    }
}

impl RouterConfig {
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_duration_ms)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Backing file for the durable tier. In-memory when unset.
    pub durable_path: Option<PathBuf>,
    pub quota_kb: Option<usize>,
}

impl StorageConfig {
    const KIBIBYTE: usize = 1024;

    pub fn quota_bytes(&self) -> Option<usize> {
        self.quota_kb
            .map(|kb| kb.saturating_mul(Self::KIBIBYTE).max(1))
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SiteConfig {
    pub root: PathBuf,
    /// Location path the document is opened at.
    pub entry_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("site"),
            entry_path: "/index.html".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> AppResult<Self> {
        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };
        Self::load_from_path(path)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        if !path.is_file() {
            return Err(AppError::invalid_argument(format!(
                "config path is not a regular file: {}",
                path.display()
            )));
        }

        let raw = fs::read_to_string(path).map_err(|source| {
            AppError::io_with_context(source, format!("failed to read config: {}", path.display()))
        })?;
        let parsed = toml::from_str::<Self>(&raw).map_err(|source| {
            AppError::invalid_argument(format!(
                "failed to parse config {}: {source}",
                path.display()
            ))
        })?;
        Ok(parsed.sanitized())
    }

    fn sanitized(mut self) -> Self {
        let defaults = RouterConfig::default();
        self.router.transition_duration_ms = self.router.transition_duration_ms.max(1);
        let region = self.router.content_region_id.trim();
        self.router.content_region_id = if region.is_empty() {
            defaults.content_region_id
        } else {
            region.trim_start_matches('#').to_string()
        };
        if self.site.entry_path.trim().is_empty() {
            self.site.entry_path = SiteConfig::default().entry_path;
        }
        self
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os("BDAY_CONFIG_PATH")
        && !explicit.is_empty()
    {
        return Some(PathBuf::from(explicit));
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Some(PathBuf::from(xdg).join("bday").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return Some(
            PathBuf::from(home)
                .join(".config")
                .join("bday")
                .join("config.toml"),
        );
    }
    if let Some(appdata) = std::env::var_os("APPDATA")
        && !appdata.is_empty()
    {
        return Some(PathBuf::from(appdata).join("bday").join("config.toml"));
    }
    None
}

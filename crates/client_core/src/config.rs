use std::{fs, path::Path, time::Duration};

use anyhow::{bail, ensure, Context};
use serde::Deserialize;
use tracing::warn;
use url::Url;

pub const DEFAULT_SETTINGS_FILE: &str = "catalog.toml";
pub const DEFAULT_CATALOG_BASE_URL: &str = "https://pokeapi.co/api/v2/pokemon";
pub const DEFAULT_MAX_CREATURE_ID: u32 = 1118;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub base_url: String,
    /// Upper bound of the identifier space, inclusive.
    pub max_creature_id: u32,
    /// Lookups per `fetch_random_creature` call before giving up.
    pub max_attempts: u32,
    pub request_timeout_secs: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CATALOG_BASE_URL.into(),
            max_creature_id: DEFAULT_MAX_CREATURE_ID,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl CatalogSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let url = Url::parse(&self.base_url)
            .with_context(|| format!("invalid catalog base url '{}'", self.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!(
                "catalog base url '{}' must use http or https, got '{}'",
                self.base_url,
                url.scheme()
            );
        }
        ensure!(self.max_creature_id > 0, "max_creature_id must be at least 1");
        ensure!(self.max_attempts > 0, "max_attempts must be at least 1");
        Ok(())
    }
}

/// Reads `./catalog.toml` when present; a missing file means defaults.
pub fn load_settings() -> CatalogSettings {
    let mut settings = read_settings_file(Path::new(DEFAULT_SETTINGS_FILE)).unwrap_or_default();
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    settings
}

/// Reads a settings file the user named explicitly; it must exist and parse.
pub fn load_settings_from(path: &Path) -> anyhow::Result<CatalogSettings> {
    let mut settings = parse_settings_file(path)?;
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn parse_settings_file(path: &Path) -> anyhow::Result<CatalogSettings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
    toml::from_str(&raw)
        .with_context(|| format!("failed to parse settings file '{}'", path.display()))
}

fn read_settings_file(path: &Path) -> Option<CatalogSettings> {
    let raw = fs::read_to_string(path).ok()?;
    match toml::from_str::<CatalogSettings>(&raw) {
        Ok(settings) => Some(settings),
        Err(error) => {
            warn!(path = %path.display(), %error, "config: ignoring unreadable settings file");
            None
        }
    }
}

fn apply_env_overrides(settings: &mut CatalogSettings, lookup: impl Fn(&str) -> Option<String>) {
    let first = |keys: [&str; 2]| keys.into_iter().rev().find_map(&lookup);

    if let Some(v) = first(["CATALOG_BASE_URL", "APP__CATALOG_BASE_URL"]) {
        settings.base_url = v;
    }
    if let Some(v) = first(["CATALOG_MAX_ID", "APP__CATALOG_MAX_ID"]) {
        if let Ok(parsed) = v.trim().parse() {
            settings.max_creature_id = parsed;
        }
    }
    if let Some(v) = first(["CATALOG_MAX_ATTEMPTS", "APP__CATALOG_MAX_ATTEMPTS"]) {
        if let Ok(parsed) = v.trim().parse() {
            settings.max_attempts = parsed;
        }
    }
    if let Some(v) = first(["CATALOG_TIMEOUT_SECS", "APP__CATALOG_TIMEOUT_SECS"]) {
        if let Ok(parsed) = v.trim().parse() {
            settings.request_timeout_secs = parsed;
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

//! Daemon configuration
//!
//! Layered: built-in defaults, then an optional TOML file
//! (`MINDFUL_CONFIG` or `~/.mindful/config.toml`), then `MINDFUL_*` environment
//! variables (`MINDFUL_HTTP__PORT=9000` for nested keys).

use anyhow::{Context, Result};
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_CONFIG_PATH: &str = "~/.mindful/config.toml";
const DEFAULT_DB_PATH: &str = "~/.mindful/mindful.db";

#[derive(Debug, Clone, Deserialize)]
pub struct DaemonConfig {
    pub database_url: String,
    pub http: HttpSection,
    pub auth: AuthSection,
    pub maintenance: MaintenanceSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpSection {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSection {
    pub session_ttl_hours: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MaintenanceSection {
    pub interval_minutes: u64,
    pub max_db_size_mb: f64,
}

impl DaemonConfig {
    /// Load from the default locations
    pub fn load() -> Result<Self> {
        let path = std::env::var("MINDFUL_CONFIG")
            .map(|p| shellexpand::tilde(&p).into_owned())
            .unwrap_or_else(|_| shellexpand::tilde(DEFAULT_CONFIG_PATH).into_owned());
        Self::load_from(Path::new(&path))
    }

    /// Load with an explicit (optional) config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let builder = defaults()?
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix("MINDFUL")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder
            .build()
            .and_then(|c| c.try_deserialize())
            .with_context(|| format!("Invalid configuration (file: {})", path.display()))
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.auth.session_ttl_hours.saturating_mul(60 * 60))
    }

    pub fn maintenance_period(&self) -> Duration {
        Duration::from_secs(self.maintenance.interval_minutes.max(1).saturating_mul(60))
    }

    /// Filesystem path behind a `sqlite://` URL (None for in-memory databases)
    pub fn database_file(&self) -> Option<PathBuf> {
        let rest = self
            .database_url
            .strip_prefix("sqlite://")
            .or_else(|| self.database_url.strip_prefix("sqlite:"))?;
        let file = rest.split('?').next().unwrap_or(rest);

        if file.is_empty() || file.contains(":memory:") {
            return None;
        }
        Some(PathBuf::from(file))
    }
}

fn defaults() -> Result<ConfigBuilder<config::builder::DefaultState>> {
    let db_path = shellexpand::tilde(DEFAULT_DB_PATH).into_owned();

    Ok(Config::builder()
        .set_default("database_url", format!("sqlite://{}", db_path))?
        .set_default("http.host", "127.0.0.1")?
        .set_default("http.port", 8080)?
        .set_default("auth.session_ttl_hours", 24)?
        .set_default("maintenance.interval_minutes", 60)?
        .set_default("maintenance.max_db_size_mb", 512.0)?)
}

#[cfg(test)]
fn from_toml(toml: &str) -> Result<DaemonConfig> {
    Ok(defaults()?
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?
        .try_deserialize()?)
}

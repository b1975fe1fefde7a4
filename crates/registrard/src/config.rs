//! registrar.toml configuration parser.
//!
//! Every field is optional; missing sections fall back to the defaults
//! below and CLI flags override whatever the file sets.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_PORT: u16 = 7000;
pub const DEFAULT_DASHBOARD_PORT: u16 = 3000;
pub const DEFAULT_DATABASE: &str = "registrar.db";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrarConfig {
    pub server: ServerConfig,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub database: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_API_PORT,
            database: PathBuf::from(DEFAULT_DATABASE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub port: u16,
    /// REST API origin; `REGISTRAR_API_URL` applies when unset.
    pub api_url: Option<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_DASHBOARD_PORT,
            api_url: None,
        }
    }
}

impl RegistrarConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: RegistrarConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `path` if given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file() {
        let config = RegistrarConfig::load(None).unwrap();
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.server.database, PathBuf::from("registrar.db"));
        assert_eq!(config.dashboard.port, 3000);
        assert_eq!(config.dashboard.api_url, None);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: RegistrarConfig = toml::from_str(
            r#"
            [server]
            port = 9000

            [dashboard]
            api_url = "http://api.internal:9000"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.database, PathBuf::from("registrar.db"));
        assert_eq!(config.dashboard.port, 3000);
        assert_eq!(config.dashboard.api_url.as_deref(), Some("http://api.internal:9000"));
    }

    #[test]
    fn from_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registrar.toml");
        std::fs::write(&path, "[server]\ndatabase = \"/var/lib/registrar/data.db\"\n").unwrap();

        let config = RegistrarConfig::from_file(&path).unwrap();
        assert_eq!(
            config.server.database,
            PathBuf::from("/var/lib/registrar/data.db")
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(RegistrarConfig::from_file(Path::new("/nonexistent/registrar.toml")).is_err());
    }
}

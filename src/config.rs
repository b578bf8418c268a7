//! Connection configuration.
//!
//! Loaded from TOML. The compiler itself never opens a connection; the
//! settings decide how finished statements are handed to a driver.
//!
//! ```toml
//! hosts = ["10.0.0.1", "10.0.0.2"]
//! ports = [9042]
//! keyspace = "app"
//! consistency = "LOCAL_QUORUM"
//! allow_filtering = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CqlError, CqlResult};

pub const DEFAULT_PORT: u16 = 9042;
pub const DEFAULT_TIMEOUT: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT: f64 = 5.0;
pub const DEFAULT_REQUEST_TIMEOUT: f64 = 12.0;
pub const DEFAULT_PAGE_SIZE: u32 = 500;

/// File looked up in the working directory before the user config dir.
pub const LOCAL_CONFIG_FILE: &str = "cqlg.toml";

/// Read/write consistency level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Consistency {
    Any,
    One,
    Two,
    Three,
    Quorum,
    All,
    LocalQuorum,
    EachQuorum,
    Serial,
    LocalSerial,
    #[default]
    LocalOne,
}

impl std::fmt::Display for Consistency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Consistency::Any => "ANY",
            Consistency::One => "ONE",
            Consistency::Two => "TWO",
            Consistency::Three => "THREE",
            Consistency::Quorum => "QUORUM",
            Consistency::All => "ALL",
            Consistency::LocalQuorum => "LOCAL_QUORUM",
            Consistency::EachQuorum => "EACH_QUORUM",
            Consistency::Serial => "SERIAL",
            Consistency::LocalSerial => "LOCAL_SERIAL",
            Consistency::LocalOne => "LOCAL_ONE",
        };
        f.write_str(name)
    }
}

/// A resolved contact point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub host: String,
    pub port: u16,
}

/// Connection-layer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    pub hosts: Vec<String>,
    /// Paired with `hosts` by index; missing entries use the first port.
    pub ports: Vec<u16>,
    pub keyspace: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Seconds.
    pub timeout: u64,
    pub connect_timeout: f64,
    pub request_timeout: f64,
    pub page_size: u32,
    pub consistency: Consistency,
    /// Append `allow filtering` to select statements.
    pub allow_filtering: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            hosts: vec!["127.0.0.1".to_string()],
            ports: vec![DEFAULT_PORT],
            keyspace: String::new(),
            username: None,
            password: None,
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            page_size: DEFAULT_PAGE_SIZE,
            consistency: Consistency::default(),
            allow_filtering: false,
        }
    }
}

impl ConnectionConfig {
    /// Parse and validate TOML text.
    pub fn from_toml_str(content: &str) -> CqlResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| CqlError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit file.
    pub fn load(path: &Path) -> CqlResult<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!("Loaded connection config from {}", path.display());
        Ok(config)
    }

    /// Resolve the config: explicit path, `./cqlg.toml`, the user config
    /// dir, then defaults. Returns the file used, if any.
    pub fn discover(explicit: Option<&Path>) -> CqlResult<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let candidates = [Some(PathBuf::from(LOCAL_CONFIG_FILE)), Self::user_config_path()];
        Self::first_existing(candidates.into_iter().flatten())
    }

    /// Load the first candidate that exists, or fall back to defaults.
    fn first_existing(
        candidates: impl IntoIterator<Item = PathBuf>,
    ) -> CqlResult<(Self, Option<PathBuf>)> {
        for path in candidates {
            if path.is_file() {
                let config = Self::load(&path)?;
                return Ok((config, Some(path)));
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok((Self::default(), None))
    }

    /// `<config dir>/cqlg/config.toml`
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cqlg").join("config.toml"))
    }

    pub fn validate(&self) -> CqlResult<()> {
        if self.hosts.iter().all(|h| h.trim().is_empty()) {
            return Err(CqlError::config(
                "DB hostname is not found, please check the hosts setting",
            ));
        }
        if self.page_size == 0 {
            return Err(CqlError::config("page_size must be greater than zero"));
        }
        Ok(())
    }

    /// Contact points with their ports resolved.
    pub fn nodes(&self) -> Vec<Node> {
        let fallback = self.ports.first().copied().unwrap_or(DEFAULT_PORT);
        self.hosts
            .iter()
            .map(|h| h.trim())
            .enumerate()
            .filter(|(_, h)| !h.is_empty())
            .map(|(i, host)| Node {
                host: host.to_string(),
                port: self.ports.get(i).copied().unwrap_or(fallback),
            })
            .collect()
    }

    /// Serialize back to TOML, with the password masked.
    pub fn to_masked_toml(&self) -> CqlResult<String> {
        let mut shown = self.clone();
        if shown.password.is_some() {
            shown.password = Some("********".to_string());
        }
        toml::to_string_pretty(&shown).map_err(|e| CqlError::config(e.to_string()))
    }
}

use crate::error::ConfigError;
use analytics::DEFAULT_RETURN_BIN_EDGES;
use sample_data::GeneratorSettings;
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sample_data: GeneratorSettings,
    pub data: DataSettings,
    pub dashboard: DashboardSettings,
    pub server: ServerSettings,
    pub logging: LoggingSettings,
}

impl Config {
    /// Rejects settings that would only fail later, at generation or bind time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sample_data
            .validate()
            .map_err(|e| ConfigError::ValidationError(format!("[sample_data] {}", e)))?;
        analytics::validate_edges(&self.dashboard.histogram_edges)
            .map_err(|e| ConfigError::ValidationError(format!("[dashboard] {}", e)))?;
        self.server.socket_addr()?;
        Ok(())
    }
}

/// Selects the series source behind every snapshot.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// A local `Date,Close[,High,Low,Volume]` export. When unset the
    /// `[sample_data]` random walk is used.
    pub csv_path: Option<PathBuf>,
}

/// Contains parameters for the data handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Ascending bucket edges of the daily return histogram, in percent.
    pub histogram_edges: Vec<f64>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            histogram_edges: DEFAULT_RETURN_BIN_EDGES.to_vec(),
        }
    }
}

/// Where the JSON API listens.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.host.parse().map_err(|_| {
            ConfigError::ValidationError(format!("[server] host '{}' is not an IP address", self.host))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Verbosity used when `RUST_LOG` is not set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Contains parameters for log output.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: LogLevel,
    /// When set, logs are also written to daily rolling files in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            directory: None,
            file_prefix: "tickerscope.log".to_string(),
        }
    }
}

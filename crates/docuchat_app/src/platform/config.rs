use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use docuchat_core::ThemeConfig;
use docuchat_gateway::GatewaySettings;
use docuchat_logging::{dc_info, LogDestination};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

const DEFAULT_CONFIG_FILENAME: &str = "docuchat.ron";

#[derive(Debug, Parser)]
#[command(name = "docuchat", version, about = "Chat with your documents through a DocuChat backend")]
pub struct Cli {
    /// Path to a RON configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Backend address, overriding the configuration file.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
    /// Log at debug level.
    #[arg(long)]
    pub verbose: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogTarget {
    #[default]
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSection {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for BackendSection {
    fn default() -> Self {
        let defaults = GatewaySettings::default();
        Self {
            base_url: defaults.base_url,
            connect_timeout_secs: defaults.connect_timeout.as_secs(),
            request_timeout_secs: defaults.request_timeout.as_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendSection,
    pub theme: ThemeConfig,
    pub log_target: LogTarget,
    pub log_file: PathBuf,
    /// Emit 24-bit colour escapes.
    pub color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendSection::default(),
            theme: ThemeConfig::default(),
            log_target: LogTarget::default(),
            log_file: PathBuf::from(docuchat_logging::DEFAULT_LOG_FILE),
            color: true,
        }
    }
}

impl AppConfig {
    pub fn gateway_settings(&self) -> GatewaySettings {
        GatewaySettings {
            base_url: self.backend.base_url.clone(),
            connect_timeout: Duration::from_secs(self.backend.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.backend.request_timeout_secs),
        }
    }
}

pub fn log_level(cli: &Cli) -> LevelFilter {
    if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Resolves the configuration from the command line.
///
/// A missing default config file yields defaults; a missing file that was
/// named explicitly is an error.
pub fn load(cli: &Cli) -> Result<AppConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILENAME);
            if path.exists() {
                read_config(&path)?
            } else {
                AppConfig::default()
            }
        }
    };
    if let Some(base_url) = &cli.base_url {
        config.backend.base_url = base_url.clone();
    }
    Ok(config)
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    dc_info!("Loaded configuration from {:?}", path);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docuchat_core::AccentPalette;
    use tempfile::TempDir;

    fn cli(config: Option<PathBuf>, base_url: Option<&str>) -> Cli {
        Cli {
            config,
            base_url: base_url.map(str::to_owned),
            verbose: false,
        }
    }

    #[test]
    fn partial_config_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("docuchat.ron");
        fs::write(
            &path,
            r#"(
                backend: (base_url: "http://backend:8000"),
                theme: (accent_palette: Violet, dark_mode: false),
                log_target: Both,
            )"#,
        )
        .unwrap();

        let config = load(&cli(Some(path), None)).unwrap();
        assert_eq!(config.backend.base_url, "http://backend:8000");
        assert_eq!(config.backend.request_timeout_secs, 120);
        assert_eq!(config.theme.accent_palette, AccentPalette::Violet);
        assert!(!config.theme.dark_mode);
        assert_eq!(config.log_target, LogTarget::Both);
        assert!(config.color);
    }

    #[test]
    fn command_line_base_url_wins() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("docuchat.ron");
        fs::write(&path, r#"(backend: (base_url: "http://from-file:1"))"#).unwrap();

        let config = load(&cli(Some(path), Some("http://from-cli:2"))).unwrap();
        assert_eq!(config.gateway_settings().base_url, "http://from-cli:2");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = load(&cli(Some(temp.path().join("nope.ron")), None)).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.ron");
        fs::write(&path, "(backend: ").unwrap();

        let err = load(&cli(Some(path), None)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}

//! Configuration structures and loading logic.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub device: DeviceConfig,

    #[serde(default)]
    pub options: OptionsConfig,

    /// List of measurement channels to download.
    #[serde(default = "default_channels")]
    pub channels: Vec<ChannelConfig>,
}

/// Power meter device configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Base URL of the power meter.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request read timeout in seconds. No timeout when absent.
    #[serde(default)]
    pub request_timeout_seconds: Option<u64>,

    /// Exact byte length of the device's "another file transfer is in
    /// progress" error page. The device signals the condition only through
    /// this length, so the value has to track its firmware.
    #[serde(default = "default_busy_marker_length")]
    pub busy_marker_length: usize,
}

/// Transfer options configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Directory the CSV files are written to.
    #[serde(default)]
    pub data_directory: Option<PathBuf>,

    /// Whether to show the live download progress line.
    #[serde(default = "default_true")]
    pub show_downloads: bool,
}

/// One measurement channel: display name, device path and local filename.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub channel: String,
    pub path: String,
    pub filename: String,
}

impl ChannelConfig {
    pub fn new(channel: &str, path: &str, filename: &str) -> Self {
        Self {
            channel: channel.to_string(),
            path: path.to_string(),
            filename: filename.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device: DeviceConfig::default(),
            options: OptionsConfig::default(),
            channels: default_channels(),
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_seconds: None,
            busy_marker_length: default_busy_marker_length(),
        }
    }
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            data_directory: None,
            show_downloads: true,
        }
    }
}

fn default_base_url() -> String {
    "http://powermeter.fritz.box/".to_string()
}

fn default_busy_marker_length() -> usize {
    37
}

fn default_true() -> bool {
    true
}

/// The six per-phase exports of a Shelly 3EM.
fn default_channels() -> Vec<ChannelConfig> {
    vec![
        ChannelConfig::new("L1-Energy", "emeter/0/em_data.csv", "L1-em_data.csv"),
        ChannelConfig::new("L2-Energy", "emeter/1/em_data.csv", "L2-em_data.csv"),
        ChannelConfig::new("L3-Energy", "emeter/2/em_data.csv", "L3-em_data.csv"),
        ChannelConfig::new("L1-Voltage", "emeter/0/vm_data.csv", "L1-vm_data.csv"),
        ChannelConfig::new("L2-Voltage", "emeter/1/vm_data.csv", "L2-vm_data.csv"),
        ChannelConfig::new("L3-Voltage", "emeter/2/vm_data.csv", "L3-vm_data.csv"),
    ]
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}. Create one from config.example.toml",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the effective data directory.
    pub fn data_directory(&self) -> PathBuf {
        self.options
            .data_directory
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.device.base_url, "http://powermeter.fritz.box/");
        assert_eq!(config.device.busy_marker_length, 37);
        assert_eq!(config.device.request_timeout_seconds, None);
        assert_eq!(config.channels.len(), 6);
        assert!(config.options.show_downloads);
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            [device]
            base_url = "http://192.168.1.50/"
            request_timeout_seconds = 15
            busy_marker_length = 42

            [options]
            data_directory = "data"
            show_downloads = false

            [[channels]]
            channel = "L1-Energy"
            path = "emeter/0/em_data.csv"
            filename = "L1-em_data.csv"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.device.base_url, "http://192.168.1.50/");
        assert_eq!(config.device.request_timeout_seconds, Some(15));
        assert_eq!(config.device.busy_marker_length, 42);
        assert_eq!(config.channels.len(), 1);
        assert_eq!(config.channels[0].channel, "L1-Energy");
        assert!(!config.options.show_downloads);
        assert_eq!(config.data_directory(), PathBuf::from("data"));
    }

    #[test]
    fn test_parse_toml_missing_sections_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.device.base_url, "http://powermeter.fritz.box/");
        assert_eq!(config.channels.len(), 6);
    }
}

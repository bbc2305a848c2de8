//! Configuration validation logic.

use url::Url;

use crate::config::loader::Config;
use crate::error::{Error, Result};
use crate::fs::paths::sanitize_filename;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_base_url(&config.device.base_url)?;
    validate_channels(config)?;

    Ok(())
}

/// Validate the device base URL.
pub fn validate_base_url(base_url: &str) -> Result<()> {
    if base_url.is_empty() {
        return Err(Error::MissingConfig("device.base_url".to_string()));
    }

    let url = Url::parse(base_url).map_err(|e| Error::ConfigValidation {
        field: "device.base_url".to_string(),
        message: format!("'{}' is not a valid URL: {}", base_url, e),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Error::ConfigValidation {
            field: "device.base_url".to_string(),
            message: format!("unsupported scheme '{}' (expected http or https)", url.scheme()),
        });
    }

    Ok(())
}

/// Validate the channel list.
pub fn validate_channels(config: &Config) -> Result<()> {
    if config.channels.is_empty() {
        return Err(Error::MissingConfig(
            "channels (at least one measurement channel required)".to_string(),
        ));
    }

    for channel in &config.channels {
        if channel.channel.trim().is_empty() {
            return Err(Error::ConfigValidation {
                field: "channels.channel".to_string(),
                message: "channel name must not be empty".to_string(),
            });
        }

        if channel.path.trim().is_empty() {
            return Err(Error::ConfigValidation {
                field: "channels.path".to_string(),
                message: format!("channel '{}' has an empty device path", channel.channel),
            });
        }

        // Rejects separators, traversal and control characters
        sanitize_filename(&channel.filename)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::ChannelConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(validate_base_url("not a url").is_err());
        assert!(validate_base_url("").is_err());
        assert!(validate_base_url("ftp://powermeter.fritz.box/").is_err());
    }

    #[test]
    fn test_valid_base_url() {
        assert!(validate_base_url("http://powermeter.fritz.box/").is_ok());
        assert!(validate_base_url("https://192.168.1.50/").is_ok());
    }

    #[test]
    fn test_empty_channel_list() {
        let mut config = Config::default();
        config.channels.clear();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_channel_filename_traversal_rejected() {
        let mut config = Config::default();
        config.channels = vec![ChannelConfig::new(
            "L1-Energy",
            "emeter/0/em_data.csv",
            "../evil.csv",
        )];
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_empty_channel_name_rejected() {
        let mut config = Config::default();
        config.channels = vec![ChannelConfig::new("", "emeter/0/em_data.csv", "a.csv")];
        assert!(validate_config(&config).is_err());
    }
}

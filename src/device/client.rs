//! Power meter HTTP client.

use std::time::Duration;

use reqwest::{Client, Response};
use url::Url;

use crate::config::DeviceConfig;
use crate::error::Result;

/// Thin HTTP client bound to the power meter's base URL.
///
/// The device serves plain HTTP on the LAN; there is no authentication
/// and no API beyond fetching the per-channel CSV paths.
pub struct DeviceClient {
    client: Client,
    base_url: Url,
}

impl DeviceClient {
    /// Create a new client for the configured device.
    pub fn new(config: &DeviceConfig) -> Result<Self> {
        let mut builder = Client::builder();

        // Read timeout only; a whole-request timeout would cap the total
        // transfer time of large exports.
        if let Some(secs) = config.request_timeout_seconds {
            builder = builder.read_timeout(Duration::from_secs(secs));
        }

        let client = builder.build()?;
        let base_url = Url::parse(&config.base_url)?;

        Ok(Self { client, base_url })
    }

    /// Resolve a channel's relative device path against the base URL.
    pub fn resolve(&self, relative_path: &str) -> Result<Url> {
        Ok(self.base_url.join(relative_path)?)
    }

    /// Issue a streaming GET for the given URL.
    ///
    /// The response status is not checked here; the caller decides how a
    /// non-success status maps onto the transfer outcome.
    pub async fn get_stream(&self, url: &Url) -> Result<Response> {
        let response = self.client.get(url.clone()).send().await?;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_joins_relative_path() {
        let config = DeviceConfig::default();
        let client = DeviceClient::new(&config).unwrap();

        let url = client.resolve("emeter/0/em_data.csv").unwrap();
        assert_eq!(
            url.as_str(),
            "http://powermeter.fritz.box/emeter/0/em_data.csv"
        );
    }

    #[test]
    fn test_resolve_rejects_invalid_base() {
        let config = DeviceConfig {
            base_url: "not a url".to_string(),
            ..DeviceConfig::default()
        };
        assert!(DeviceClient::new(&config).is_err());
    }
}

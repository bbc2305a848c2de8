//! Powermeter Downloader - fetch CSV exports from a Shelly power meter
//!
//! This library provides functionality for downloading the measurement
//! CSV files a Shelly energy meter serves over plain HTTP on the LAN.
//!
//! # Features
//!
//! - Streaming transfers written atomically (temp file + rename)
//! - Single-generation backup of a pre-existing destination file
//! - Cooperative cancellation via Ctrl-C
//! - Live progress line with a time-synchronized scrolling target indicator
//! - Detection of the device's "another transfer in progress" error page
//!
//! # Example
//!
//! ```no_run
//! use powermeter_downloader::{
//!     config::Config, device::DeviceClient, download::{fetch_channel, TransferTask},
//! };
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let client = DeviceClient::new(&config.device)?;
//!     let cancel = CancellationToken::new();
//!
//!     let channel = &config.channels[0];
//!     let url = client.resolve(&channel.path)?;
//!     let mut task = TransferTask::new(
//!         channel.channel.clone(),
//!         url,
//!         config.data_directory().join(&channel.filename),
//!     );
//!     fetch_channel(&client, &config, &mut task, &cancel).await;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod device;
pub mod download;
pub mod error;
pub mod fs;
pub mod output;

// Re-exports for convenience
pub use config::{validate_config, ChannelConfig, Config};
pub use device::DeviceClient;
pub use download::{fetch_channel, TaskStatus, TransferTask};
pub use error::{Error, Result};

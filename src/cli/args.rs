//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// Power meter CSV downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "powermeter-downloader",
    version,
    about = "Download measurement CSV exports from a Shelly power meter",
    long_about = "A CLI tool to fetch the per-phase energy and voltage CSV exports a Shelly\n\
                  power meter serves over HTTP, writing each file atomically to local storage."
)]
pub struct Args {
    /// Channel name(s) to download.
    /// Restricts the configured channel list; downloads all channels when omitted.
    #[arg(short = 'n', long = "channel", value_delimiter = ' ', num_args = 1..)]
    pub channels: Option<Vec<String>>,

    /// Directory the CSV files are written to.
    #[arg(short = 'd', long = "directory")]
    pub data_directory: Option<PathBuf>,

    /// Base URL of the power meter.
    #[arg(short = 'u', long = "base-url", env = "POWERMETER_URL")]
    pub base_url: Option<String>,

    /// Request read timeout in seconds (no timeout when omitted).
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Hide the live download progress line.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        // Restrict the channel list if names were given
        if let Some(names) = self.channels {
            config
                .channels
                .retain(|c| names.iter().any(|n| n == &c.channel));
        }

        if let Some(url) = self.base_url {
            config.device.base_url = url;
        }

        if let Some(secs) = self.timeout {
            config.device.request_timeout_seconds = Some(secs);
        }

        if let Some(dir) = self.data_directory {
            config.options.data_directory = Some(dir);
        }

        if self.quiet {
            config.options.show_downloads = false;
        }
    }
}

//! Powermeter Downloader - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, EnvFilter};

use powermeter_downloader::{
    cli::Args,
    config::{validate_config, Config},
    device::DeviceClient,
    download::{fetch_channel, TaskStatus, TransferTask},
    error::{exit_codes, Error, Result},
    output::{
        print_banner, print_config_summary, print_error, print_info, print_run_stats,
        print_warning, RunStats,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::MissingConfig(_)
                | Error::InvalidFilename(_)
                | Error::TomlParse(_)
                | Error::UrlParse(_) => ExitCode::from(exit_codes::CONFIG_ERROR as u8),
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    // Print banner
    print_banner();

    // Load configuration
    let config_path = args.config.clone();
    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        print_warning(&format!(
            "Configuration file not found: {}",
            config_path.display()
        ));
        print_info("Using default configuration with CLI arguments");
        Config::default()
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    // Validate configuration
    validate_config(&config)?;

    // Print configuration summary
    let channels: Vec<String> = config.channels.iter().map(|c| c.channel.clone()).collect();
    print_config_summary(
        &channels,
        &config.device.base_url,
        &config.data_directory().display().to_string(),
    );

    let client = DeviceClient::new(&config.device)?;

    // Ctrl-C requests cooperative cancellation; the transfer loop polls
    // the token once per chunk and between channels.
    let cancel = CancellationToken::new();
    let interrupt_listener = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    let data_dir = config.data_directory();
    let mut stats = RunStats::default();

    // Strictly sequential: the device serves only one transfer at a time.
    for channel in &config.channels {
        if cancel.is_cancelled() {
            print_error("Download canceled by user (SIGINT received)");
            break;
        }

        let url = match client.resolve(&channel.path) {
            Ok(url) => url,
            Err(e) => {
                print_error(&format!(
                    "Skipping channel {}: invalid path '{}': {}",
                    channel.channel, channel.path, e
                ));
                stats.record(TaskStatus::Failed, 0);
                continue;
            }
        };

        let mut task = TransferTask::new(
            channel.channel.clone(),
            url,
            data_dir.join(&channel.filename),
        );

        // Continue with the next channel irrespective of the outcome
        let status = fetch_channel(&client, &config, &mut task, &cancel).await;
        stats.record(status, task.transferred_bytes());
    }

    interrupt_listener.abort();

    print_run_stats(&stats);

    Ok(())
}

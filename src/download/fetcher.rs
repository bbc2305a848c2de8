//! Channel CSV fetching.
//!
//! Streams one export from the device into `<dest>.temp` and renames it
//! over the destination on success. The rename is the sole commit point:
//! a crash or abort mid-transfer never corrupts a previously valid file.

use futures::StreamExt;
use reqwest::Response;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::device::DeviceClient;
use crate::download::task::{TaskStatus, TransferTask};
use crate::error::{Error, Result};
use crate::fs::paths::{backup_path, temp_path};
use crate::output::console::{print_error, print_info, print_success};
use crate::output::progress::TransferBar;

/// True when a chunk matches the device's "another file transfer is in
/// progress" error page. The device signals the condition only through
/// the exact byte length of that page, so the comparison is as fragile
/// as the convention itself; the length tracks the firmware via
/// `device.busy_marker_length`.
fn is_busy_marker(chunk: &[u8], marker_length: usize) -> bool {
    marker_length > 0 && chunk.len() == marker_length
}

/// Fetch one channel export, reporting the outcome to the user.
///
/// Every error is handled here; the caller only sees the terminal
/// [`TaskStatus`] and always proceeds to the next channel.
pub async fn fetch_channel(
    client: &DeviceClient,
    config: &Config,
    task: &mut TransferTask,
    cancel: &CancellationToken,
) -> TaskStatus {
    tracing::debug!(
        "Fetching {} -> {}",
        task.source_url,
        task.destination_path.display()
    );

    match transfer(client, config, task, cancel).await {
        Ok(()) => {
            task.complete(TaskStatus::Finished);
            print_success(&format!("Downloaded {}", task.destination_path.display()));
        }
        Err(Error::Cancelled) => {
            task.complete(TaskStatus::Cancelled);
            discard_temp(task).await;
            print_error("Download interrupted by user");
        }
        Err(Error::DeviceBusy) => {
            task.complete(TaskStatus::Failed);
            print_error("Download canceled due to another active download.");
        }
        Err(e @ Error::HttpStatus { .. }) => {
            task.complete(TaskStatus::Failed);
            print_error(&e.to_string());
        }
        Err(e @ Error::Http(_)) => {
            task.complete(TaskStatus::Failed);
            print_error(&format!("Error downloading file: {}", e));
        }
        Err(e) => {
            task.complete(TaskStatus::Failed);
            discard_temp(task).await;
            print_error(&format!("An unexpected error occurred: {}", e));
        }
    }

    task.status()
}

async fn transfer(
    client: &DeviceClient,
    config: &Config,
    task: &mut TransferTask,
    cancel: &CancellationToken,
) -> Result<()> {
    let response = client.get_stream(&task.source_url).await?;

    // Status is checked before anything touches the filesystem.
    let status = response.status();
    if !status.is_success() {
        return Err(Error::HttpStatus {
            status,
            url: task.source_url.to_string(),
        });
    }

    task.expected_size = response.content_length();
    task.start();

    // Keep a single backup generation of a pre-existing destination.
    if tokio::fs::try_exists(&task.destination_path).await? {
        let backup = backup_path(&task.destination_path);
        tokio::fs::rename(&task.destination_path, &backup).await?;
        print_info(&format!("Renamed existing file to {}", backup.display()));
    }

    let temp = temp_path(&task.destination_path);
    let mut file = File::create(&temp).await?;
    let bar = TransferBar::open(task, config.options.show_downloads);
    bar.set_message("retrieving data...");

    let streamed = stream_to_file(
        response,
        &mut file,
        task,
        &bar,
        cancel,
        config.device.busy_marker_length,
    )
    .await;

    if let Err(e) = streamed {
        bar.abandon();
        return Err(e);
    }

    file.flush().await?;
    drop(file);

    // Final reporter update freezes the displayed total, then commit.
    bar.finish("we are done");
    tokio::fs::rename(&temp, &task.destination_path).await?;

    Ok(())
}

async fn stream_to_file(
    response: Response,
    file: &mut File,
    task: &mut TransferTask,
    bar: &TransferBar,
    cancel: &CancellationToken,
    busy_marker_length: usize,
) -> Result<()> {
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;

        if is_busy_marker(&chunk, busy_marker_length) {
            return Err(Error::DeviceBusy);
        }

        // Polled once per chunk; an in-flight read always completes.
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        file.write_all(&chunk).await?;
        task.advance(chunk.len() as u64);
        bar.advance(chunk.len() as u64);
    }

    Ok(())
}

async fn discard_temp(task: &TransferTask) {
    let temp = temp_path(&task.destination_path);
    if tokio::fs::try_exists(&temp).await.unwrap_or(false) {
        if let Err(e) = tokio::fs::remove_file(&temp).await {
            tracing::warn!("Could not remove temp file {}: {}", temp.display(), e);
        }
    }
}

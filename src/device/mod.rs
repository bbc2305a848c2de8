//! HTTP access to the power meter.

pub mod client;

pub use client::DeviceClient;

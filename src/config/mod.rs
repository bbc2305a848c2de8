//! Configuration module.
//!
//! Provides:
//! - TOML configuration loading
//! - Channel list, device address and transfer options
//! - Configuration validation

pub mod loader;
pub mod validation;

pub use loader::{ChannelConfig, Config, DeviceConfig, OptionsConfig};
pub use validation::validate_config;

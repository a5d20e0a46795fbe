//! Application-level utilities for the Slotlog CLI.
//!
//! This module provides:
//! - The per-invocation context handed to every command handler
//! - Path resolution for the config file and data directory

mod context;
mod resolver;

pub use context::AppContext;
pub use resolver::{missing_data_message, resolve_config_path, resolve_data_dir};

//! Configuration module for Price-Ladder
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! All keys are optional; missing ones fall back to the production defaults.
//!
//! # Example
//!
//! ```no_run
//! use price_ladder::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Page jitter: {}..{}ms", config.pacing.page_delay_min_ms, config.pacing.page_delay_max_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, EndpointConfig, HttpConfig, OutputConfig, PacingConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};

pub use validation::{override_output_directory, validate};

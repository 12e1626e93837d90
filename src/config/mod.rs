//! Configuration loading for the lounge engine.
//!
//! This module loads the lounge metadata (name, currency, UTC offset,
//! booking scheduler settings) and the machine inventory from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use lounge_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/lounge").unwrap();
//! println!("Loaded lounge: {}", config.lounge().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{DeviceLimits, LoungeConfig, LoungeMetadata};

//! Configuration loading and management for the course engine.
//!
//! This module loads engine defaults and named threshold band sets from YAML
//! files, or provides the same values built in.
//!
//! # Example
//!
//! ```no_run
//! use course_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/default").unwrap();
//! println!("Default topic: {}", loader.config().default_session_topic);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, ThresholdsConfig};

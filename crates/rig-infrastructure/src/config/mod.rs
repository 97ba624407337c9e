//! Configuration
//!
//! Sources are merged in order, later ones overriding earlier ones:
//!
//! 1. [`AppConfig::default`]
//! 2. A TOML file (`rig.toml`)
//! 3. `RIG__`-prefixed environment variables (`RIG__RUNNER__FEATURES=[tracing]`)

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, LoggingConfig, ResourceConfig, RunnerConfig};

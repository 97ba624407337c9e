//! # Infrastructure Layer
//!
//! Technical concerns around a class run: configuration, logging, resource
//! lookup on disk, run reporting and the features shipped with rig.
//!
//! ### Configuration & Bootstrap
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment configuration (defaults, TOML file, `RIG__` environment) |
//! | [`bootstrap`] | Builds runners from configuration and runs test classes |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Run Support
//! | Module | Description |
//! |--------|-------------|
//! | [`locator`] | Filesystem resource locator |
//! | [`notifier`] | Tracing run notifier with a run summary |
//! | [`features`] | Built-in `tracing` and `workspace` features |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod features;
pub mod locator;
pub mod logging;
pub mod notifier;
pub mod utils;

// Re-export commonly used types
pub use bootstrap::Bootstrap;
pub use error_ext::ErrorContext;
pub use locator::TargetResourceLocator;
pub use notifier::{RunSummary, TracingRunNotifier};
pub use utils::TimedOperation;

//! Built-in features
//!
//! | Name | Feature | Description |
//! |------|---------|-------------|
//! | `tracing` | [`TracingFeature`] | Logs every lifecycle hook and the run duration |
//! | `workspace` | [`WorkspaceFeature`] | Per-run temporary directory bound as [`TestWorkspace`] |

pub mod trace;
pub mod workspace;

pub use trace::TracingFeature;
pub use workspace::{TestWorkspace, WorkspaceFeature};

//! Application Layer - rig
//!
//! Drives a test class and the features it declares through the fixed
//! lifecycle of a class run.
//!
//! ## Architecture
//!
//! ```text
//! RunnerBuilder ──► GraphResolver ──► FeatureGraph
//!                        │
//!                  AnnotationIndex
//!
//! FeaturesRunner
//! ├── FeatureRegistry   (one instance per resolved feature)
//! ├── Scope chain       (root: run context, child: feature bindings)
//! ├── invoke_features   (invoke-all-aggregate dispatch per phase)
//! └── RuleCollector     (class and method rules)
//!
//! ClassRunner (reference host engine) ──► FeaturesRunner statements
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`ports`] | Feature, test class, rule, notifier and locator contracts, feature registry |
//! | [`di`] | Injection scopes, binder and injection slots |
//! | [`services`] | Annotation index, graph resolver, feature registry, dispatch, rule collector |
//! | [`runner`] | The `FeaturesRunner` orchestrator |
//! | [`engine`] | Minimal block engine driving a runner |

pub mod di;
pub mod engine;
pub mod ports;
pub mod runner;
pub mod services;

pub use di::{Binder, Inject, Injectable, Scope};
pub use engine::ClassRunner;
pub use ports::*;
pub use runner::{FeaturesRunner, RunnerBuilder, RunnerRef};
pub use services::*;

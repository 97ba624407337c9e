//! # rig
//!
//! Feature-driven lifecycle orchestration for test classes.
//!
//! A test class declares the features it needs. rig resolves them into a
//! dependency-ordered graph, instantiates one of each per class run, layers
//! their bindings into injection scopes and calls every feature at each
//! lifecycle phase, collecting failures instead of stopping at the first.
//!
//! ## Example
//!
//! ```ignore
//! use rig::prelude::*;
//!
//! struct CacheTest { workspace: Inject<TestWorkspace> }
//!
//! impl Annotated for CacheTest {
//!     fn annotations() -> Annotations {
//!         Annotations::new().requires([FeatureId::of::<WorkspaceFeature>()])
//!     }
//! }
//!
//! let summary = Bootstrap::new(AppConfig::default())
//!     .run(TestClassDescriptor::of::<CacheTest>())?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Phases, run states, declarations, errors
//! - `application` - Graph resolution, feature registry, scopes, dispatch, rules, runner
//! - `infrastructure` - Configuration, logging, resource lookup, built-in features
//! - `cli` - The `rig` command line

pub mod cli;

/// Domain layer - phases, run states, declarations and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use rig_domain::*;
}

/// Application layer - the runner and everything it orchestrates
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use rig_application::*;
}

/// Infrastructure layer - configuration, logging and built-in features
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use rig_infrastructure::*;
}

/// Everything needed to write features and test classes
pub mod prelude {
    pub use rig_application::{
        Binder, ClassRunner, DeclareFeatures, Feature, FeatureId, FeatureType, FeaturesRunner,
        Inject, Injectable, RuleMember, RunNotifier, RunnerRef, Scope, Statement, TestClass,
        TestClassDescriptor, TestInstance, TestMethod, TestRule,
    };
    pub use rig_domain::{
        Annotated, Annotations, Configuration, Description, Error, Phase, Result, TypeKey,
    };
    pub use rig_infrastructure::config::AppConfig;
    pub use rig_infrastructure::features::{TestWorkspace, TracingFeature, WorkspaceFeature};
    pub use rig_infrastructure::{Bootstrap, RunSummary};
}

// Re-export commonly used types at the crate root
pub use rig_application::{ClassRunner, FeaturesRunner, RunnerBuilder};
pub use rig_domain::{Error, Result};
pub use rig_infrastructure::Bootstrap;

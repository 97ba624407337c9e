//! Dependency Injection
//!
//! A class run owns a chain of scopes:
//!
//! ```text
//! root scope   ── runner handle, run notifier, resource locator
//!    └── child scope ── bindings contributed by features (configure_bindings)
//! ```
//!
//! Lookups walk from the current scope to the root. Within one [`Binder`] a
//! later binding for the same type replaces the earlier one, so a feature
//! later in resolution order overrides what its dependencies bound.

mod scope;

pub use scope::{Binder, Inject, Injectable, Scope};

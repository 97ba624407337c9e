//! Test resource location

use rig_domain::Result;
use std::path::{Path, PathBuf};

/// Resolves test resources relative to a base directory
///
/// Bound in the root scope of every class run.
pub trait ResourceLocator: Send + Sync {
    /// Directory test resources are resolved against
    fn basepath(&self) -> &Path;

    /// Path of the named resource when it exists
    fn target_test_resource(&self, name: &str) -> Result<Option<PathBuf>>;
}

/// Resolves resources directly under one directory
#[derive(Debug, Clone)]
pub struct FixedResourceLocator {
    base: PathBuf,
}

impl FixedResourceLocator {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Locator rooted at the process working directory
    pub fn current_dir() -> Self {
        Self::new(std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }
}

impl ResourceLocator for FixedResourceLocator {
    fn basepath(&self) -> &Path {
        &self.base
    }

    fn target_test_resource(&self, name: &str) -> Result<Option<PathBuf>> {
        let candidate = self.base.join(name);
        Ok(candidate.exists().then_some(candidate))
    }
}

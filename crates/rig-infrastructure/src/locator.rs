//! Filesystem resource locator

use crate::config::ResourceConfig;
use crate::constants::MANIFEST_DIR_ENV;
use rig_application::ResourceLocator;
use rig_domain::error::{Error, Result};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Resolves test resources below a base directory
///
/// The base is the configured directory, else the package directory Cargo
/// reports, else the working directory. Resources are looked up in each
/// search directory in turn.
#[derive(Debug, Clone)]
pub struct TargetResourceLocator {
    base: PathBuf,
    search_dirs: Vec<String>,
}

impl TargetResourceLocator {
    pub fn new(base: impl Into<PathBuf>, search_dirs: Vec<String>) -> Self {
        Self {
            base: base.into(),
            search_dirs,
        }
    }

    /// Build from configuration
    pub fn from_config(config: &ResourceConfig) -> Self {
        let base = config
            .base_dir
            .clone()
            .or_else(|| std::env::var_os(MANIFEST_DIR_ENV).map(PathBuf::from))
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(base, config.search_dirs.clone())
    }

    pub fn search_dirs(&self) -> &[String] {
        &self.search_dirs
    }
}

/// Reject names that could leave the base directory
fn check_relative(name: &str) -> Result<&Path> {
    let path = Path::new(name);
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if name.is_empty() || escapes {
        return Err(Error::configuration(format!(
            "Test resource '{name}' must be a relative path inside the resource directories"
        )));
    }
    Ok(path)
}

impl ResourceLocator for TargetResourceLocator {
    fn basepath(&self) -> &Path {
        &self.base
    }

    fn target_test_resource(&self, name: &str) -> Result<Option<PathBuf>> {
        let relative = check_relative(name)?;
        let found = self
            .search_dirs
            .iter()
            .map(|dir| self.base.join(dir).join(relative))
            .find(|candidate| candidate.exists());
        debug!(resource = name, found = ?found, "Resolved test resource");
        Ok(found)
    }
}

//! Per-run temporary workspace

use super::trace::TracingFeature;
use crate::constants::{WORKSPACE_DIR_PREFIX, WORKSPACE_FEATURE_NAME};
use crate::error_ext::ErrorContext;
use rig_application::{
    Binder, DeclareFeatures, FEATURE_REGISTRY, Feature, FeatureEntry, FeatureId, FeatureType,
    FeaturesRunner, Injectable,
};
use rig_domain::{Annotated, Annotations, Error, Result};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tempfile::TempDir;
use tracing::debug;

/// Directory owned by the current class run
///
/// Bound in the child scope; inject it with `Inject<TestWorkspace>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestWorkspace {
    path: PathBuf,
}

impl TestWorkspace {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of `name` inside the workspace
    pub fn join(&self, name: impl AsRef<Path>) -> PathBuf {
        self.path.join(name)
    }
}

/// Creates a temporary directory on start and removes it on stop
#[derive(Debug, Default)]
pub struct WorkspaceFeature {
    dir: Mutex<Option<TempDir>>,
}

impl WorkspaceFeature {
    /// Current workspace directory, between start and stop
    pub fn path(&self) -> Option<PathBuf> {
        self.dir
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|dir| dir.path().to_path_buf())
    }
}

impl Annotated for WorkspaceFeature {
    fn annotations() -> Annotations {
        Annotations::new().requires([FeatureId::of::<TracingFeature>()])
    }
}

impl Injectable for WorkspaceFeature {}

impl FeatureType for WorkspaceFeature {
    fn construct() -> Result<Self> {
        Ok(Self::default())
    }
}

impl Feature for WorkspaceFeature {
    fn start(&self, _runner: &FeaturesRunner) -> Result<()> {
        let dir = tempfile::Builder::new()
            .prefix(WORKSPACE_DIR_PREFIX)
            .tempdir()
            .io_context("Failed to create test workspace")?;
        debug!(path = %dir.path().display(), "Test workspace created");
        *self.dir.lock().unwrap_or_else(PoisonError::into_inner) = Some(dir);
        Ok(())
    }

    fn configure(&self, _runner: &FeaturesRunner, binder: &mut Binder) -> Result<()> {
        let path = self
            .path()
            .ok_or_else(|| Error::internal("Test workspace requested before start"))?;
        binder.bind(TestWorkspace { path });
        Ok(())
    }

    fn stop(&self, _runner: &FeaturesRunner) -> Result<()> {
        let dir = self
            .dir
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(dir) = dir {
            let path = dir.path().to_path_buf();
            dir.close().io_context("Failed to remove test workspace")?;
            debug!(path = %path.display(), "Test workspace removed");
        }
        Ok(())
    }
}

#[linkme::distributed_slice(FEATURE_REGISTRY)]
static WORKSPACE_FEATURE: FeatureEntry = FeatureEntry {
    name: WORKSPACE_FEATURE_NAME,
    description: "Temporary directory for the class run, bound as TestWorkspace",
    feature: FeatureId::of::<WorkspaceFeature>,
};

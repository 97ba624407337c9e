//! Live feature instances of one class run

use crate::ports::feature::{Feature, FeatureId};
use crate::services::graph::FeatureGraph;
use rig_domain::error::{Error, Result};
use std::any::TypeId;
use std::sync::Arc;
use tracing::debug;

/// A feature identity with its instance
#[derive(Clone)]
pub struct RegisteredFeature {
    id: FeatureId,
    instance: Arc<dyn Feature>,
}

impl RegisteredFeature {
    pub fn id(&self) -> &FeatureId {
        &self.id
    }

    pub fn instance(&self) -> &Arc<dyn Feature> {
        &self.instance
    }
}

impl std::fmt::Debug for RegisteredFeature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("RegisteredFeature").field(&self.id).finish()
    }
}

/// One instance per resolved feature, in resolution order
#[derive(Debug, Clone, Default)]
pub struct FeatureRegistry {
    entries: Vec<RegisteredFeature>,
}

impl FeatureRegistry {
    /// Construct every feature of `graph`, in order
    ///
    /// The first construction failure aborts with [`Error::Instantiation`].
    pub fn instantiate(graph: &FeatureGraph) -> Result<Self> {
        let mut entries = Vec::with_capacity(graph.len());
        for id in graph {
            let instance = id
                .construct()
                .map_err(|e| Error::instantiation(id.name(), e))?;
            debug!(feature = id.short_name(), "Instantiated feature");
            entries.push(RegisteredFeature { id: *id, instance });
        }
        Ok(Self { entries })
    }

    /// The instance of exactly type `F`
    pub fn get<F: Feature>(&self) -> Option<Arc<F>> {
        self.entries
            .iter()
            .find(|entry| entry.id.type_id() == TypeId::of::<F>())
            .and_then(|entry| Arc::clone(&entry.instance).downcast_arc::<F>().ok())
    }

    /// The instance registered for `id`
    pub fn lookup(&self, id: &FeatureId) -> Option<Arc<dyn Feature>> {
        self.entries
            .iter()
            .find(|entry| entry.id == *id)
            .map(|entry| Arc::clone(&entry.instance))
    }

    pub fn entries(&self) -> &[RegisteredFeature] {
        &self.entries
    }

    /// Instances, in resolution order
    pub fn instances(&self) -> Vec<Arc<dyn Feature>> {
        self.entries.iter().map(|e| Arc::clone(&e.instance)).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

//! Feature graph resolution
//!
//! Requirements are followed depth first; a feature is placed after every
//! feature it requires. Reaching a feature that is still on the active path
//! is a cycle.

use crate::ports::feature::{FeatureId, Features};
use crate::services::annotation_index::AnnotationIndex;
use rig_domain::TypeKey;
use rig_domain::error::{Error, Result};
use std::any::TypeId;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Visit state of a feature during one resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionStatus {
    #[default]
    Unvisited,
    /// On the active depth-first path
    InProgress,
    /// Placed in the output order
    Resolved,
}

/// Features in dependency-first order, each exactly once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureGraph {
    order: Vec<FeatureId>,
}

impl FeatureGraph {
    pub fn ids(&self) -> &[FeatureId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &FeatureId) -> bool {
        self.order.contains(id)
    }

    /// Index of `id` in resolution order
    pub fn position(&self, id: &FeatureId) -> Option<usize> {
        self.order.iter().position(|candidate| candidate == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FeatureId> {
        self.order.iter()
    }

    /// Dependents first
    pub fn reversed(&self) -> Vec<FeatureId> {
        self.order.iter().rev().copied().collect()
    }

    /// Short type names, in resolution order
    pub fn names(&self) -> Vec<&'static str> {
        self.order.iter().map(FeatureId::short_name).collect()
    }
}

impl<'a> IntoIterator for &'a FeatureGraph {
    type Item = &'a FeatureId;
    type IntoIter = std::slice::Iter<'a, FeatureId>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}

#[derive(Default)]
struct Walk {
    status: HashMap<TypeId, ResolutionStatus>,
    order: Vec<FeatureId>,
}

impl Walk {
    fn status(&self, id: &FeatureId) -> ResolutionStatus {
        self.status.get(&id.type_id()).copied().unwrap_or_default()
    }
}

/// Orders the features a type requires
pub struct GraphResolver<'a> {
    index: &'a AnnotationIndex,
}

impl<'a> GraphResolver<'a> {
    pub fn new(index: &'a AnnotationIndex) -> Self {
        Self { index }
    }

    /// Features `key` declares, inherited declarations included
    pub fn requirements(&self, key: &TypeKey) -> Vec<FeatureId> {
        self.index
            .annotations::<Features>(key)
            .iter()
            .flat_map(|features| features.ids().iter().copied())
            .collect()
    }

    /// Transitive requirements of `root`, dependency first
    ///
    /// `root` itself is not part of the graph.
    pub fn resolve(&self, root: &TypeKey) -> Result<FeatureGraph> {
        let graph = self.resolve_roots(&self.requirements(root))?;
        debug!(
            root = root.short_name(),
            features = ?graph.names(),
            "Resolved feature graph"
        );
        Ok(graph)
    }

    /// `roots` and their transitive requirements, dependency first
    pub fn resolve_roots(&self, roots: &[FeatureId]) -> Result<FeatureGraph> {
        let mut walk = Walk::default();
        for root in roots {
            self.visit(*root, &mut walk)?;
        }
        Ok(FeatureGraph { order: walk.order })
    }

    fn visit(&self, id: FeatureId, walk: &mut Walk) -> Result<()> {
        match walk.status(&id) {
            ResolutionStatus::Resolved => return Ok(()),
            ResolutionStatus::InProgress => {
                return Err(Error::CycleDetected {
                    feature: id.name().to_string(),
                });
            }
            ResolutionStatus::Unvisited => {}
        }

        walk.status.insert(id.type_id(), ResolutionStatus::InProgress);
        for required in self.requirements(id.key()) {
            trace!(
                feature = id.short_name(),
                requires = required.short_name(),
                "Following requirement"
            );
            self.visit(required, walk)?;
        }
        walk.status.insert(id.type_id(), ResolutionStatus::Resolved);
        walk.order.push(id);
        Ok(())
    }
}

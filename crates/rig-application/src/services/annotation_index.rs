//! Annotation index
//!
//! Scanning a type evaluates its declarations and those of every type it
//! inherits from. The result is cached per type for the lifetime of the
//! index, so a shared index scans each type once no matter how many runners
//! or threads ask for it.

use dashmap::DashMap;
use rig_domain::{Annotations, TypeKey};
use std::any::{Any, TypeId};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// Declarations of one type, flattened over its hierarchy
#[derive(Debug)]
pub struct ScannedType {
    key: TypeKey,
    // The type itself first, then its ancestors breadth first
    layers: Vec<(TypeKey, Annotations)>,
}

impl ScannedType {
    pub fn key(&self) -> &TypeKey {
        &self.key
    }

    /// The scanned type followed by its ancestors
    pub fn hierarchy(&self) -> Vec<TypeKey> {
        self.layers.iter().map(|(key, _)| *key).collect()
    }

    /// Every declaration of type `A`, own declarations first
    pub fn annotations<A: Any + Send + Sync>(&self) -> Vec<Arc<A>> {
        self.layers
            .iter()
            .flat_map(|(_, annotations)| annotations.all::<A>())
            .collect()
    }

    /// The most specific declaration of type `A`
    pub fn annotation<A: Any + Send + Sync>(&self) -> Option<Arc<A>> {
        self.layers
            .iter()
            .find_map(|(_, annotations)| annotations.get::<A>())
    }
}

/// Process-wide memo of scanned types
#[derive(Debug, Default)]
pub struct AnnotationIndex {
    cache: DashMap<TypeId, Arc<ScannedType>>,
    scans: AtomicUsize,
}

impl AnnotationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan `key`, or return the cached scan
    pub fn scan(&self, key: &TypeKey) -> Arc<ScannedType> {
        if let Some(hit) = self.cache.get(&key.id()) {
            return Arc::clone(hit.value());
        }

        // Computed without holding a shard lock; a concurrent scan of the
        // same type may run twice but only the first result is kept
        let scanned = Arc::new(Self::collect(key));
        self.scans.fetch_add(1, Ordering::Relaxed);
        debug!(
            type_name = key.short_name(),
            layers = scanned.layers.len(),
            "Scanned type declarations"
        );

        let entry = self.cache.entry(key.id()).or_insert(scanned);
        Arc::clone(entry.value())
    }

    fn collect(key: &TypeKey) -> ScannedType {
        let mut layers = Vec::new();
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([*key]);

        while let Some(current) = queue.pop_front() {
            if !seen.insert(current.id()) {
                continue;
            }
            let annotations = current.describe();
            queue.extend(annotations.parents().iter().copied());
            layers.push((current, annotations));
        }

        ScannedType { key: *key, layers }
    }

    /// Every declaration of type `A` on `key` and its ancestors
    pub fn annotations<A: Any + Send + Sync>(&self, key: &TypeKey) -> Vec<Arc<A>> {
        self.scan(key).annotations::<A>()
    }

    /// The most specific declaration of type `A` on `key` or its ancestors
    pub fn annotation<A: Any + Send + Sync>(&self, key: &TypeKey) -> Option<Arc<A>> {
        self.scan(key).annotation::<A>()
    }

    /// How many scans were computed (cache misses)
    pub fn scan_count(&self) -> usize {
        self.scans.load(Ordering::Relaxed)
    }

    /// Number of cached types
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

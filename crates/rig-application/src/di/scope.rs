//! Scopes, binder and injection slots

use rig_domain::error::{Error, Result};
use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

#[derive(Clone)]
struct Binding {
    type_name: &'static str,
    // Always holds an `Arc<T>` for the bound `T`
    value: Arc<dyn Any + Send + Sync>,
}

/// Collects bindings for a scope
///
/// Bindings are keyed by type. Binding the same type twice keeps the last
/// value.
#[derive(Default)]
pub struct Binder {
    bindings: HashMap<TypeId, Binding>,
}

impl Binder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a concrete value
    pub fn bind<T: Send + Sync + 'static>(&mut self, value: T) -> &mut Self {
        self.bind_arc(Arc::new(value))
    }

    /// Bind a shared value; `T` may be a trait object
    ///
    /// ```ignore
    /// binder.bind_arc::<dyn Clock>(Arc::new(SystemClock));
    /// ```
    pub fn bind_arc<T: ?Sized + Send + Sync + 'static>(&mut self, value: Arc<T>) -> &mut Self {
        let binding = Binding {
            type_name: type_name::<T>(),
            value: Arc::new(value),
        };
        if let Some(previous) = self.bindings.insert(TypeId::of::<T>(), binding) {
            warn!(
                binding = previous.type_name,
                "Binding overridden by a later registration"
            );
        }
        self
    }

    /// Whether `T` is bound
    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        self.bindings.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl fmt::Debug for Binder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binder")
            .field("bindings", &self.bindings.len())
            .finish()
    }
}

/// A layer of the injection chain
pub struct Scope {
    name: String,
    parent: Option<Arc<Scope>>,
    bindings: HashMap<TypeId, Binding>,
}

impl Scope {
    /// Create a scope without parent
    pub fn root(binder: Binder) -> Arc<Self> {
        Self::new("root", None, binder)
    }

    /// Create a scope layered on `parent`
    pub fn child(parent: &Arc<Scope>, binder: Binder) -> Arc<Self> {
        Self::new("child", Some(Arc::clone(parent)), binder)
    }

    fn new(name: &str, parent: Option<Arc<Scope>>, binder: Binder) -> Arc<Self> {
        debug!(
            scope = name,
            bindings = binder.len(),
            "Created injection scope"
        );
        Arc::new(Self {
            name: name.to_string(),
            parent,
            bindings: binder.bindings,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The scope this one was layered on
    pub fn parent(&self) -> Option<&Arc<Scope>> {
        self.parent.as_ref()
    }

    /// The outermost scope of the chain
    pub fn root_of(scope: &Arc<Scope>) -> Arc<Scope> {
        let mut current = scope;
        while let Some(parent) = &current.parent {
            current = parent;
        }
        Arc::clone(current)
    }

    /// Number of scopes from this one to the root, inclusive
    pub fn depth(&self) -> usize {
        1 + self.parent.as_ref().map_or(0, |p| p.depth())
    }

    /// Look `T` up, nearest scope first
    pub fn get<T: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.bindings
            .get(&TypeId::of::<T>())
            .and_then(|binding| binding.value.downcast_ref::<Arc<T>>().cloned())
            .or_else(|| self.parent.as_ref().and_then(|parent| parent.get::<T>()))
    }

    /// Look `T` up, failing when no scope binds it
    pub fn require<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        self.get::<T>().ok_or_else(|| Error::UnsatisfiedDependency {
            type_name: type_name::<T>(),
            scope: self.name.clone(),
        })
    }

    /// Whether any scope of the chain binds `T`
    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        self.bindings.contains_key(&TypeId::of::<T>())
            || self.parent.as_ref().is_some_and(|p| p.contains::<T>())
    }

    /// Fill the injection slots of `target` from this scope
    pub fn inject_members<T: Injectable + ?Sized>(&self, target: &T) -> Result<()> {
        target.inject_members(self)
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bound: Vec<&str> = self.bindings.values().map(|b| b.type_name).collect();
        bound.sort_unstable();
        f.debug_struct("Scope")
            .field("name", &self.name)
            .field("bindings", &bound)
            .field("parent", &self.parent)
            .finish()
    }
}

/// A value whose members can be filled from a [`Scope`]
///
/// Implementations resolve each of their [`Inject`] slots; the default has
/// nothing to inject.
pub trait Injectable {
    fn inject_members(&self, scope: &Scope) -> Result<()> {
        let _ = scope;
        Ok(())
    }
}

/// An injection slot
///
/// Slots may be filled more than once; every injection replaces the held
/// value with what the current scope binds.
pub struct Inject<T: ?Sized + Send + Sync + 'static> {
    slot: RwLock<Option<Arc<T>>>,
}

impl<T: ?Sized + Send + Sync + 'static> Inject<T> {
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// Fill the slot, failing when `T` is not bound
    pub fn resolve(&self, scope: &Scope) -> Result<()> {
        let value = scope.require::<T>()?;
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(value);
        Ok(())
    }

    /// Fill the slot when `T` is bound, leave it untouched otherwise
    pub fn resolve_optional(&self, scope: &Scope) {
        if let Some(value) = scope.get::<T>() {
            *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(value);
        }
    }

    /// The injected value
    pub fn get(&self) -> Result<Arc<T>> {
        self.try_get().ok_or_else(|| {
            Error::internal(format!("{} has not been injected", type_name::<T>()))
        })
    }

    pub fn try_get(&self) -> Option<Arc<T>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_injected(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl<T: ?Sized + Send + Sync + 'static> Default for Inject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized + Send + Sync + 'static> fmt::Debug for Inject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inject")
            .field("type", &type_name::<T>())
            .field("injected", &self.is_injected())
            .finish()
    }
}

//! Static type declarations
//!
//! Feature and test types describe themselves through [`Annotated`]: a bag of
//! typed declaration values (required features, configuration values, ...)
//! plus the parent types whose declarations they inherit.
//!
//! ```ignore
//! struct DatabaseConfig { url: String }
//!
//! impl Annotated for MyTest {
//!     fn annotations() -> Annotations {
//!         Annotations::new()
//!             .with(DatabaseConfig { url: "mem://".into() })
//!             .inherit(TypeKey::of::<BaseTest>())
//!     }
//! }
//! ```

use crate::value_objects::TypeKey;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// A type that carries static declarations
pub trait Annotated: 'static {
    /// The type's own declarations; none by default
    fn annotations() -> Annotations {
        Annotations::new()
    }
}

#[derive(Clone)]
struct Entry {
    type_id: TypeId,
    type_name: &'static str,
    value: Arc<dyn Any + Send + Sync>,
}

/// Ordered, type-erased set of declarations attached to one type
///
/// Declarations are repeatable: several values of the same type are kept
/// in declaration order.
#[derive(Clone, Default)]
pub struct Annotations {
    entries: Vec<Entry>,
    parents: Vec<TypeKey>,
}

impl Annotations {
    /// Empty declaration set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration value
    pub fn with<A: Any + Send + Sync>(mut self, value: A) -> Self {
        self.entries.push(Entry {
            type_id: TypeId::of::<A>(),
            type_name: std::any::type_name::<A>(),
            value: Arc::new(value),
        });
        self
    }

    /// Inherit the declarations of `parent`, visible after this type's own
    pub fn inherit(mut self, parent: TypeKey) -> Self {
        self.parents.push(parent);
        self
    }

    /// Parent types, in declaration order
    pub fn parents(&self) -> &[TypeKey] {
        &self.parents
    }

    /// First declaration of type `A`
    pub fn get<A: Any + Send + Sync>(&self) -> Option<Arc<A>> {
        self.all::<A>().next()
    }

    /// Every declaration of type `A`, in declaration order
    pub fn all<A: Any + Send + Sync>(&self) -> impl Iterator<Item = Arc<A>> + '_ {
        self.entries
            .iter()
            .filter(|entry| entry.type_id == TypeId::of::<A>())
            .filter_map(|entry| Arc::clone(&entry.value).downcast::<A>().ok())
    }

    /// Whether a declaration of type `A` is present
    pub fn contains<A: Any + Send + Sync>(&self) -> bool {
        self.entries.iter().any(|e| e.type_id == TypeId::of::<A>())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Annotations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Annotations")
            .field(
                "entries",
                &self.entries.iter().map(|e| e.type_name).collect::<Vec<_>>(),
            )
            .field("parents", &self.parents)
            .finish()
    }
}

/// A configuration declaration that can be looked up across a class run
///
/// Lookups collect every declaration from the most specific source to the
/// most generic one and fold them with [`Configuration::merge`]. When nothing
/// is declared the [`Default`] value is used.
pub trait Configuration: Any + Send + Sync + Clone + Default {
    /// Overlay `self` (higher precedence) onto `fallback`
    ///
    /// The default keeps `self` whole. Implement it to merge field by field.
    fn merge(&self, fallback: &Self) -> Self {
        let _ = fallback;
        self.clone()
    }
}

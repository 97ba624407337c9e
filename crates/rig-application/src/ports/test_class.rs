//! Test class contract
//!
//! A test class is a type with a no-argument constructor, a list of test
//! methods and optional setup, teardown and rule members. One instance is
//! created per test method.

use crate::di::Injectable;
use crate::ports::rule::RuleMember;
use downcast_rs::{DowncastSync, impl_downcast};
use rig_domain::error::{Error, Result};
use rig_domain::{Annotated, Annotations, TypeKey};
use std::any::type_name;
use std::fmt;
use std::sync::Arc;

/// An instance of a test class
pub trait TestInstance: Injectable + DowncastSync {
    /// Runs after features saw `before_setup`, before the method body
    fn set_up(&self) -> Result<()> {
        Ok(())
    }

    /// Runs after the method body, even when it failed
    fn tear_down(&self) -> Result<()> {
        Ok(())
    }

    /// Method-level rule members of this instance
    fn rule_members(&self) -> Vec<RuleMember> {
        Vec::new()
    }
}

impl_downcast!(sync TestInstance);

/// A concrete test class
pub trait TestClass: TestInstance + Annotated + Sized {
    fn create() -> Result<Self>;

    /// Test methods, in execution order
    fn methods() -> Vec<TestMethod>;

    /// Class-level rule members
    fn class_rule_members() -> Vec<RuleMember> {
        Vec::new()
    }
}

type MethodBody = Arc<dyn Fn(&dyn TestInstance) -> Result<()> + Send + Sync>;

/// One test method of a class
#[derive(Clone)]
pub struct TestMethod {
    name: String,
    annotations: Annotations,
    body: MethodBody,
}

impl TestMethod {
    /// A method whose body runs against an instance of `T`
    pub fn new<T, F>(name: impl Into<String>, body: F) -> Self
    where
        T: TestInstance,
        F: Fn(&T) -> Result<()> + Send + Sync + 'static,
    {
        let body: MethodBody = Arc::new(move |test: &dyn TestInstance| {
            let test = test.downcast_ref::<T>().ok_or_else(|| {
                Error::internal(format!("test instance is not a {}", type_name::<T>()))
            })?;
            body(test)
        });
        Self {
            name: name.into(),
            annotations: Annotations::new(),
            body,
        }
    }

    /// Attach method-level declarations
    #[must_use]
    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    /// Run the body against `test`
    pub fn invoke(&self, test: &dyn TestInstance) -> Result<()> {
        (self.body)(test)
    }
}

impl fmt::Debug for TestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestMethod")
            .field("name", &self.name)
            .field("annotations", &self.annotations)
            .finish_non_exhaustive()
    }
}

/// Type-erased handle on a [`TestClass`]
#[derive(Clone, Copy)]
pub struct TestClassDescriptor {
    key: TypeKey,
    create: fn() -> Result<Arc<dyn TestInstance>>,
    methods: fn() -> Vec<TestMethod>,
    class_rules: fn() -> Vec<RuleMember>,
}

fn create_instance<T: TestClass>() -> Result<Arc<dyn TestInstance>> {
    let test: Arc<dyn TestInstance> = Arc::new(T::create()?);
    Ok(test)
}

impl TestClassDescriptor {
    pub fn of<T: TestClass>() -> Self {
        Self {
            key: TypeKey::of::<T>(),
            create: create_instance::<T>,
            methods: T::methods,
            class_rules: T::class_rule_members,
        }
    }

    pub fn key(&self) -> &TypeKey {
        &self.key
    }

    pub fn name(&self) -> &'static str {
        self.key.name()
    }

    pub fn short_name(&self) -> &'static str {
        self.key.short_name()
    }

    /// Create a fresh instance
    pub fn create_instance(&self) -> Result<Arc<dyn TestInstance>> {
        (self.create)()
    }

    pub fn methods(&self) -> Vec<TestMethod> {
        (self.methods)()
    }

    pub fn class_rule_members(&self) -> Vec<RuleMember> {
        (self.class_rules)()
    }
}

impl fmt::Debug for TestClassDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TestClassDescriptor")
            .field(&self.key.name())
            .finish()
    }
}

//! Test descriptions

use std::fmt;

/// Names the class or the method a statement runs for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Description {
    class_name: String,
    method_name: Option<String>,
}

impl Description {
    /// Description of a whole test class
    pub fn for_class(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            method_name: None,
        }
    }

    /// Description of one test method
    pub fn for_method(class_name: impl Into<String>, method_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            method_name: Some(method_name.into()),
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn method_name(&self) -> Option<&str> {
        self.method_name.as_deref()
    }

    /// True for a single test method
    pub fn is_test(&self) -> bool {
        self.method_name.is_some()
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.method_name {
            Some(method) => write!(f, "{method}({})", self.class_name),
            None => f.write_str(&self.class_name),
        }
    }
}

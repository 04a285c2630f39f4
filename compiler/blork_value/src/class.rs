//! Classes for instance checks.

use std::fmt;
use std::sync::Arc;

struct ClassDef {
    name: Option<Arc<str>>,
    parent: Option<Class>,
}

/// A nominal class with optional single inheritance.
///
/// Equality is identity: two classes with the same name are different classes.
#[derive(Clone)]
pub struct Class(Arc<ClassDef>);

impl Class {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Class(Arc::new(ClassDef {
            name: Some(name.into()),
            parent: None,
        }))
    }

    pub fn anonymous() -> Self {
        Class(Arc::new(ClassDef {
            name: None,
            parent: None,
        }))
    }

    /// A named subclass of `parent`.
    pub fn extending(name: impl Into<Arc<str>>, parent: &Class) -> Self {
        Class(Arc::new(ClassDef {
            name: Some(name.into()),
            parent: Some(parent.clone()),
        }))
    }

    pub fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    /// Name for messages: the class name, or `anonymous class`.
    pub fn display_name(&self) -> &str {
        self.name().unwrap_or("anonymous class")
    }

    pub fn parent(&self) -> Option<&Class> {
        self.0.parent.as_ref()
    }

    /// Whether `self` is `ancestor` or inherits from it.
    pub fn is_subclass_of(&self, ancestor: &Class) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if class == ancestor {
                return true;
            }
            current = class.parent();
        }
        false
    }

    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.0).cast::<()>() as usize
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Class {}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Class({})", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subclass_chain() {
        let animal = Class::new("Animal");
        let dog = Class::extending("Dog", &animal);
        let puppy = Class::extending("Puppy", &dog);
        assert!(puppy.is_subclass_of(&animal));
        assert!(puppy.is_subclass_of(&puppy));
        assert!(!animal.is_subclass_of(&dog));
    }

    #[test]
    fn identity_not_name() {
        assert_ne!(Class::new("Same"), Class::new("Same"));
        assert_eq!(Class::anonymous().display_name(), "anonymous class");
    }
}

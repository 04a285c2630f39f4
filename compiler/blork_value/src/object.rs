//! Object property storage.

use std::sync::Arc;

use crate::{Class, Value};

/// Properties of an object value, in insertion order.
///
/// An object without a class is a plain object.
#[derive(Clone, Default)]
pub struct ObjectValue {
    class: Option<Class>,
    props: Vec<(Arc<str>, Value)>,
}

impl ObjectValue {
    pub(crate) fn new(class: Option<Class>, props: Vec<(Arc<str>, Value)>) -> Self {
        let mut object = ObjectValue {
            class,
            props: Vec::with_capacity(props.len()),
        };
        for (key, value) in props {
            object.insert(key, value);
        }
        object
    }

    pub fn class(&self) -> Option<&Class> {
        self.class.as_ref()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.props
            .iter()
            .find(|(k, _)| &**k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.props.iter().any(|(k, _)| &**k == key)
    }

    /// Set `key`, replacing an existing value in place.
    pub fn insert(&mut self, key: impl Into<Arc<str>>, value: Value) {
        let key = key.into();
        if let Some(slot) = self.props.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.props.push((key, value));
        }
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.props.iter().map(|(k, v)| (&**k, v))
    }

    /// Owned copy of the entries, for walking without holding a lock.
    pub fn entries(&self) -> Vec<(Arc<str>, Value)> {
        self.props.clone()
    }
}

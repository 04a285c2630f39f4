//! The dynamic `Value` type.
//!
//! # Heap Discipline
//!
//! Containers (`Array`, `Object`, `Map`, `Set`) hold a [`Heap`] cell and can
//! only be built through the factory methods below:
//!
//! ```text
//! let list = Value::array([Value::from(1), Value::from(2)]); // OK
//! let list = Value::Array(Heap::new(vec![]));                // ERROR: Heap::new is pub(crate)
//! ```
//!
//! # Equality
//!
//! `PartialEq` is strict equality: scalars compare by value (`NaN != NaN`),
//! containers by identity.

use std::fmt;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{Class, Heap, ObjectValue, MAX_SAFE_INTEGER};

/// A runtime value.
#[derive(Clone)]
pub enum Value {
    // Scalars
    /// Absence of a value; what a missing key or argument reads as.
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Str(Arc<str>),
    /// Symbol with its description.
    Symbol(Arc<str>),
    /// Callable marker, optionally named.
    Function(Option<Arc<str>>),
    /// Milliseconds since the Unix epoch. `NaN` is an invalid date.
    Date(f64),
    /// Regular expression, by pattern source.
    RegExp(Arc<str>),

    // Containers
    Array(Heap<Vec<Value>>),
    Object(Heap<ObjectValue>),
    /// Insertion-ordered key/value pairs.
    Map(Heap<Vec<(Value, Value)>>),
    Set(Heap<Vec<Value>>),
}

impl Value {
    // Factories

    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::Str(s.into())
    }

    pub fn symbol(description: impl Into<Arc<str>>) -> Self {
        Value::Symbol(description.into())
    }

    pub fn function(name: impl Into<Arc<str>>) -> Self {
        Value::Function(Some(name.into()))
    }

    pub fn anonymous_function() -> Self {
        Value::Function(None)
    }

    pub fn date(millis: f64) -> Self {
        Value::Date(millis)
    }

    /// The current time as a date.
    pub fn now() -> Self {
        Value::Date(now_millis())
    }

    pub fn regexp(source: impl Into<Arc<str>>) -> Self {
        Value::RegExp(source.into())
    }

    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(Heap::new(items.into_iter().collect()))
    }

    /// A plain object.
    pub fn object<K: Into<Arc<str>>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Object(Heap::new(ObjectValue::new(None, collect_props(entries))))
    }

    /// An instance of `class`.
    pub fn instance<K: Into<Arc<str>>>(
        class: &Class,
        entries: impl IntoIterator<Item = (K, Value)>,
    ) -> Self {
        Value::Object(Heap::new(ObjectValue::new(
            Some(class.clone()),
            collect_props(entries),
        )))
    }

    pub fn map(pairs: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Value::Map(Heap::new(pairs.into_iter().collect()))
    }

    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        let mut unique: Vec<Value> = Vec::new();
        for item in items {
            if !unique.contains(&item) {
                unique.push(item);
            }
        }
        Value::Set(Heap::new(unique))
    }

    // Mutation

    /// Set a property on an object. Returns `false` if `self` is not an object.
    pub fn insert(&self, key: impl Into<Arc<str>>, value: Value) -> bool {
        match self {
            Value::Object(object) => {
                object.write().insert(key, value);
                true
            }
            _ => false,
        }
    }

    /// Append to an array. Returns `false` if `self` is not an array.
    pub fn push(&self, value: Value) -> bool {
        match self {
            Value::Array(items) => {
                items.write().push(value);
                true
            }
            _ => false,
        }
    }

    // Accessors

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Property `key` of an object, `Undefined` when absent or not an object.
    pub fn get(&self, key: &str) -> Value {
        match self {
            Value::Object(object) => object.read().get(key).cloned().unwrap_or(Value::Undefined),
            _ => Value::Undefined,
        }
    }

    /// Element `index` of an array, `Undefined` when out of range or not an array.
    pub fn index(&self, index: usize) -> Value {
        match self {
            Value::Array(items) => items.read().get(index).cloned().unwrap_or(Value::Undefined),
            _ => Value::Undefined,
        }
    }

    /// Class of an object instance.
    pub fn class(&self) -> Option<Class> {
        match self {
            Value::Object(object) => object.read().class().cloned(),
            _ => None,
        }
    }

    /// Identity of a container, `None` for scalars.
    pub fn identity(&self) -> Option<usize> {
        match self {
            Value::Array(h) | Value::Set(h) => Some(h.id()),
            Value::Object(h) => Some(h.id()),
            Value::Map(h) => Some(h.id()),
            _ => None,
        }
    }

    /// Owned copies of every directly contained value (map keys included).
    pub fn children(&self) -> Vec<Value> {
        match self {
            Value::Array(items) | Value::Set(items) => items.snapshot(),
            Value::Object(object) => object.read().iter().map(|(_, v)| v.clone()).collect(),
            Value::Map(pairs) => pairs
                .read()
                .iter()
                .flat_map(|(k, v)| [k.clone(), v.clone()])
                .collect(),
            _ => Vec::new(),
        }
    }

    // Classification

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_finite_number(&self) -> bool {
        matches!(self, Value::Number(n) if n.is_finite())
    }

    /// Integer within the safe-integer range.
    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER)
    }

    pub fn is_plain_object(&self) -> bool {
        matches!(self, Value::Object(object) if object.read().class().is_none())
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Any non-null object-like value: containers, dates and regexps.
    pub fn is_objectlike(&self) -> bool {
        matches!(
            self,
            Value::Array(_)
                | Value::Object(_)
                | Value::Map(_)
                | Value::Set(_)
                | Value::Date(_)
                | Value::RegExp(_)
        )
    }

    /// Whether this is an instance of `class` or one of its subclasses.
    pub fn instance_of(&self, class: &Class) -> bool {
        self.class().is_some_and(|own| own.is_subclass_of(class))
    }

    /// Truthiness: everything except `false`, `0`, `NaN`, `""`, `null`
    /// and `undefined` is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Emptiness: zero-length strings and arrays, zero-size maps and sets,
    /// objects without keys, and falsy scalars.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Str(s) => s.is_empty(),
            Value::Array(items) | Value::Set(items) => items.read().is_empty(),
            Value::Map(pairs) => pairs.read().is_empty(),
            Value::Object(object) => object.read().is_empty(),
            _ => !self.is_truthy(),
        }
    }

    /// Size used by size-range checks. Numbers measure as themselves.
    pub fn size(&self) -> Option<f64> {
        #[expect(clippy::cast_precision_loss, reason = "lengths are far below 2^52")]
        let len = |n: usize| n as f64;
        match self {
            Value::Number(n) => Some(*n),
            Value::Str(s) => Some(len(s.chars().count())),
            Value::Array(items) | Value::Set(items) => Some(len(items.read().len())),
            Value::Map(pairs) => Some(len(pairs.read().len())),
            Value::Object(object) => Some(len(object.read().len())),
            _ => None,
        }
    }

    /// Short kind name, e.g. for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Function(_) => "function",
            Value::Date(_) => "date",
            Value::RegExp(_) => "regexp",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Map(_) => "map",
            Value::Set(_) => "set",
        }
    }
}

fn collect_props<K: Into<Arc<str>>>(
    entries: impl IntoIterator<Item = (K, Value)>,
) -> Vec<(Arc<str>, Value)> {
    entries.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

#[expect(
    clippy::cast_precision_loss,
    reason = "millisecond timestamps fit in f64 exactly"
)]
/// Current time in milliseconds since the Unix epoch.
pub fn now_millis() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0.0, |elapsed| elapsed.as_millis() as f64)
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => Arc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::RegExp(a), Value::RegExp(b)) => Arc::ptr_eq(a, b),
            (Value::Array(a), Value::Array(b)) | (Value::Set(a), Value::Set(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Map(a), Value::Map(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.debug())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.debug())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Arc::from(s))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Undefined, Into::into)
    }
}

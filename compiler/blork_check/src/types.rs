//! Type expressions.
//!
//! A [`TypeExpr`] is what a value is checked against. Strings go through the
//! grammar; everything else is matched structurally. Lists and shapes are
//! shared, identity-bearing cells, so a type graph can refer back to itself.
//! The matcher rejects such a graph once it reaches the same node twice.
//!
//! ```text
//! let node = TypeShape::new().field("name", "str+");
//! node.insert("next", node.clone()); // circular: rejected when checked
//! ```

use std::fmt;
use std::sync::Arc;

use blork_stack::ensure_sufficient_stack;
use blork_value::{Class, Value};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::ConfigError;

/// What a value is checked against.
#[derive(Clone, Debug)]
pub enum TypeExpr {
    /// A type string, e.g. `str & lower+`.
    Grammar(Arc<str>),
    True,
    False,
    Null,
    Undefined,
    Boolean,
    Number,
    String,
    /// Instance of a class or one of its subclasses.
    Instance(Class),
    /// One element type: array of. Two or more: tuple.
    List(TypeList),
    /// Keyed object.
    Shape(TypeShape),
}

impl TypeExpr {
    pub fn grammar(type_str: impl Into<Arc<str>>) -> Self {
        TypeExpr::Grammar(type_str.into())
    }

    pub fn instance(class: &Class) -> Self {
        TypeExpr::Instance(class.clone())
    }

    pub fn list<T: Into<TypeExpr>>(items: impl IntoIterator<Item = T>) -> Self {
        TypeExpr::List(TypeList::new(items))
    }

    pub fn shape<K: Into<Arc<str>>, T: Into<TypeExpr>>(
        fields: impl IntoIterator<Item = (K, T)>,
    ) -> Self {
        let shape = TypeShape::new();
        for (key, ty) in fields {
            shape.insert(key, ty);
        }
        TypeExpr::Shape(shape)
    }

    /// Read a value as a type.
    ///
    /// Strings become type strings, `true`/`false`/`null`/`undefined` their
    /// literals, arrays lists and plain objects shapes. Shared containers map
    /// to shared type nodes, so a circular value becomes a circular type.
    pub fn from_value(value: &Value) -> Result<TypeExpr, ConfigError> {
        convert(value, &mut FxHashMap::default())
    }
}

fn convert(value: &Value, seen: &mut FxHashMap<usize, TypeExpr>) -> Result<TypeExpr, ConfigError> {
    ensure_sufficient_stack(|| {
        if let Some(ty) = value.identity().and_then(|id| seen.get(&id)) {
            return Ok(ty.clone());
        }
        match value {
            Value::Str(type_str) => Ok(TypeExpr::Grammar(type_str.clone())),
            Value::Bool(true) => Ok(TypeExpr::True),
            Value::Bool(false) => Ok(TypeExpr::False),
            Value::Null => Ok(TypeExpr::Null),
            Value::Undefined => Ok(TypeExpr::Undefined),
            Value::Array(items) => {
                let list = TypeList::new::<TypeExpr>([]);
                seen.insert(items.id(), TypeExpr::List(list.clone()));
                for item in items.snapshot() {
                    list.push(convert(&item, seen)?);
                }
                Ok(TypeExpr::List(list))
            }
            Value::Object(object) if value.is_plain_object() => {
                let shape = TypeShape::new();
                seen.insert(object.id(), TypeExpr::Shape(shape.clone()));
                let entries = object.read().entries();
                for (key, field) in entries {
                    shape.insert(key, convert(&field, seen)?);
                }
                Ok(TypeExpr::Shape(shape))
            }
            _ => Err(ConfigError::InvalidType {
                found: value.debug(),
            }),
        }
    })
}

impl From<&str> for TypeExpr {
    fn from(type_str: &str) -> Self {
        TypeExpr::Grammar(Arc::from(type_str))
    }
}

impl From<String> for TypeExpr {
    fn from(type_str: String) -> Self {
        TypeExpr::Grammar(Arc::from(type_str))
    }
}

impl From<&Class> for TypeExpr {
    fn from(class: &Class) -> Self {
        TypeExpr::Instance(class.clone())
    }
}

impl From<Class> for TypeExpr {
    fn from(class: Class) -> Self {
        TypeExpr::Instance(class)
    }
}

impl From<TypeList> for TypeExpr {
    fn from(list: TypeList) -> Self {
        TypeExpr::List(list)
    }
}

impl From<TypeShape> for TypeExpr {
    fn from(shape: TypeShape) -> Self {
        TypeExpr::Shape(shape)
    }
}

impl From<&TypeExpr> for TypeExpr {
    fn from(ty: &TypeExpr) -> Self {
        ty.clone()
    }
}

/// Shared list of element types.
#[derive(Clone)]
pub struct TypeList(Arc<RwLock<Vec<TypeExpr>>>);

impl TypeList {
    pub fn new<T: Into<TypeExpr>>(items: impl IntoIterator<Item = T>) -> Self {
        TypeList(Arc::new(RwLock::new(
            items.into_iter().map(Into::into).collect(),
        )))
    }

    pub fn push(&self, item: impl Into<TypeExpr>) {
        self.0.write().push(item.into());
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.0).cast::<()>() as usize
    }

    pub(crate) fn snapshot(&self) -> Vec<TypeExpr> {
        self.0.read().clone()
    }
}

// Identity only: the list may contain itself.
impl fmt::Debug for TypeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeList({:#x})", self.id())
    }
}

#[derive(Clone, Default)]
pub(crate) struct ShapeDef {
    pub(crate) fields: Vec<(Arc<str>, TypeExpr)>,
    pub(crate) class: Option<Class>,
    pub(crate) keys: Option<TypeExpr>,
    pub(crate) values: Option<TypeExpr>,
}

impl ShapeDef {
    pub(crate) fn declares(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| &**k == key)
    }

    pub(crate) fn has_markers(&self) -> bool {
        self.keys.is_some() || self.values.is_some()
    }
}

/// Shared keyed-object type: declared fields plus optional markers.
///
/// - `class`: the value must be an instance of this class (instead of a
///   plain object).
/// - `keys`: every undeclared key, as a string, must match.
/// - `values`: every undeclared key's value must match.
#[derive(Clone)]
pub struct TypeShape(Arc<RwLock<ShapeDef>>);

impl TypeShape {
    pub fn new() -> Self {
        TypeShape(Arc::new(RwLock::new(ShapeDef::default())))
    }

    #[must_use]
    pub fn field(self, key: impl Into<Arc<str>>, ty: impl Into<TypeExpr>) -> Self {
        self.insert(key, ty);
        self
    }

    #[must_use]
    pub fn class(self, class: &Class) -> Self {
        self.0.write().class = Some(class.clone());
        self
    }

    #[must_use]
    pub fn keys(self, ty: impl Into<TypeExpr>) -> Self {
        self.0.write().keys = Some(ty.into());
        self
    }

    #[must_use]
    pub fn values(self, ty: impl Into<TypeExpr>) -> Self {
        self.0.write().values = Some(ty.into());
        self
    }

    /// Declare or replace a field.
    pub fn insert(&self, key: impl Into<Arc<str>>, ty: impl Into<TypeExpr>) {
        let key = key.into();
        let ty = ty.into();
        let mut def = self.0.write();
        if let Some(slot) = def.fields.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = ty;
        } else {
            def.fields.push((key, ty));
        }
    }

    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.0).cast::<()>() as usize
    }

    pub(crate) fn snapshot(&self) -> ShapeDef {
        self.0.read().clone()
    }
}

impl Default for TypeShape {
    fn default() -> Self {
        Self::new()
    }
}

// Identity only: the shape may contain itself.
impl fmt::Debug for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeShape({:#x})", self.id())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]

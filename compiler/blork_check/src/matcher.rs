//! Structural matching of values against type expressions.
//!
//! # Visitation Path
//!
//! Lists and shapes record `(type node, value node)` identities on a path
//! that lives on the call stack. Each recursive step links a new entry to its
//! parent instead of mutating shared state, so an early return leaves nothing
//! to clean up.
//!
//! - type node already on the path: the type is circular, a configuration error
//! - value node already on the path: the value is circular, accepted as matched
//!
//! Matching short-circuits: the first failing node is reported.

use blork_stack::ensure_sufficient_stack;
use blork_value::{Class, Value};

use crate::types::ShapeDef;
use crate::{
    CheckConfig, CheckError, Checker, CheckerRegistry, ConfigError, ErrorFactory, ExcessKeys,
    TypeExpr, TypeList, TypeShape, ValueFailure,
};

/// One container being matched, linked to the container that holds it.
struct Visit<'p> {
    ty: usize,
    value: usize,
    parent: Option<&'p Visit<'p>>,
}

fn ancestors<'p>(path: Option<&'p Visit<'p>>) -> impl Iterator<Item = &'p Visit<'p>> {
    std::iter::successors(path, |visit| visit.parent)
}

/// Matches values against type expressions for one check call.
pub struct Matcher<'a> {
    registry: &'a CheckerRegistry,
    error: &'a ErrorFactory,
    config: CheckConfig,
}

impl<'a> Matcher<'a> {
    /// `error` builds value failures for checkers without their own factory.
    pub fn new(registry: &'a CheckerRegistry, error: &'a ErrorFactory, config: CheckConfig) -> Self {
        Matcher {
            registry,
            error,
            config,
        }
    }

    /// Check `value` against `ty`. `prefix` names the value in failures.
    pub fn check(&self, value: &Value, ty: &TypeExpr, prefix: &str) -> Result<(), CheckError> {
        self.match_type(value, ty, prefix, None, 0)
    }

    /// Check positional arguments against parallel types. Missing arguments
    /// are matched as `undefined`; extra arguments fail.
    pub fn check_args(
        &self,
        args: &[Value],
        types: &[TypeExpr],
        prefix: &str,
    ) -> Result<(), CheckError> {
        for (i, ty) in types.iter().enumerate() {
            let arg = args.get(i).cloned().unwrap_or(Value::Undefined);
            self.match_type(&arg, ty, &index_prefix(prefix, i), None, 0)?;
        }
        if args.len() > types.len() {
            return Err(self.fail(
                None,
                format!("Must have {} arguments", types.len()),
                Some(count(args.len())),
                prefix,
            ));
        }
        Ok(())
    }

    fn match_type(
        &self,
        value: &Value,
        ty: &TypeExpr,
        prefix: &str,
        path: Option<&Visit<'_>>,
        depth: usize,
    ) -> Result<(), CheckError> {
        ensure_sufficient_stack(|| match ty {
            TypeExpr::Grammar(type_str) => {
                let checker = self.registry.get_or_compile(type_str)?;
                self.run(&checker, value, prefix)
            }
            TypeExpr::True => self.run_builtin("true", value, prefix),
            TypeExpr::False => self.run_builtin("false", value, prefix),
            TypeExpr::Null => self.run_builtin("null", value, prefix),
            TypeExpr::Undefined => self.run_builtin("undefined", value, prefix),
            TypeExpr::Boolean => self.run_builtin("boolean", value, prefix),
            TypeExpr::Number => self.run_builtin("number", value, prefix),
            TypeExpr::String => self.run_builtin("string", value, prefix),
            TypeExpr::Instance(class) => self.match_instance(value, class, prefix),
            TypeExpr::List(list) => self.match_list(value, list, prefix, path, depth),
            TypeExpr::Shape(shape) => self.match_shape(value, shape, prefix, path, depth),
        })
    }

    fn match_instance(&self, value: &Value, class: &Class, prefix: &str) -> Result<(), CheckError> {
        if value.instance_of(class) {
            return Ok(());
        }
        Err(self.fail(
            None,
            format!("Must be an instance of {}", class.display_name()),
            Some(value.clone()),
            prefix,
        ))
    }

    fn match_list(
        &self,
        value: &Value,
        list: &TypeList,
        prefix: &str,
        path: Option<&Visit<'_>>,
        depth: usize,
    ) -> Result<(), CheckError> {
        let types = list.snapshot();
        if types.is_empty() {
            return Err(ConfigError::InvalidType {
                found: "[]".to_owned(),
            }
            .into());
        }
        let Value::Array(elements) = value else {
            return self.run_builtin("array", value, prefix);
        };
        let Some(visit) = enter(path, list.id(), elements.id())? else {
            return Ok(());
        };
        let depth = self.descend(depth)?;
        let elements = elements.snapshot();

        if let [element_type] = types.as_slice() {
            for (i, element) in elements.iter().enumerate() {
                self.match_type(element, element_type, &index_prefix(prefix, i), Some(&visit), depth)?;
            }
            return Ok(());
        }

        for (i, element_type) in types.iter().enumerate() {
            let element = elements.get(i).cloned().unwrap_or(Value::Undefined);
            self.match_type(&element, element_type, &index_prefix(prefix, i), Some(&visit), depth)?;
        }
        if elements.len() > types.len() {
            return Err(self.fail(
                None,
                format!("Must have {} items", types.len()),
                Some(count(elements.len())),
                prefix,
            ));
        }
        Ok(())
    }

    fn match_shape(
        &self,
        value: &Value,
        shape: &TypeShape,
        prefix: &str,
        path: Option<&Visit<'_>>,
        depth: usize,
    ) -> Result<(), CheckError> {
        let def = shape.snapshot();
        match &def.class {
            Some(class) => self.match_instance(value, class, prefix)?,
            None => self.run_builtin("object", value, prefix)?,
        }
        let Value::Object(object) = value else {
            return self.run_builtin("object", value, prefix);
        };
        let Some(visit) = enter(path, shape.id(), object.id())? else {
            return Ok(());
        };
        let depth = self.descend(depth)?;

        for (key, field_type) in &def.fields {
            let field = value.get(key);
            self.match_type(&field, field_type, &key_prefix(prefix, key), Some(&visit), depth)?;
        }

        if !def.has_markers() && self.config.excess_keys == ExcessKeys::Allow {
            return Ok(());
        }
        let entries = object.read().entries();
        for (key, field) in entries.iter().filter(|(key, _)| !def.declares(key)) {
            self.match_excess(&def, key, field, prefix, &visit, depth)?;
        }
        Ok(())
    }

    /// An undeclared key: checked against the `keys`/`values` markers, or
    /// rejected outright when the shape has neither and excess keys are denied.
    fn match_excess(
        &self,
        def: &ShapeDef,
        key: &str,
        field: &Value,
        prefix: &str,
        visit: &Visit<'_>,
        depth: usize,
    ) -> Result<(), CheckError> {
        if !def.has_markers() {
            return Err(self.fail(
                None,
                "Must not have unexpected key".to_owned(),
                Some(Value::from(key)),
                prefix,
            ));
        }
        let field_prefix = key_prefix(prefix, key);
        if let Some(keys) = &def.keys {
            let key_value = Value::from(key);
            let key_name = format!("{field_prefix}: Key");
            self.match_type(&key_value, keys, &key_name, Some(visit), depth)?;
        }
        if let Some(values) = &def.values {
            self.match_type(field, values, &field_prefix, Some(visit), depth)?;
        }
        Ok(())
    }

    fn descend(&self, depth: usize) -> Result<usize, ConfigError> {
        let depth = depth + 1;
        match self.config.max_depth {
            Some(limit) if depth > limit => Err(ConfigError::DepthExceeded { limit }),
            _ => Ok(depth),
        }
    }

    fn run_builtin(&self, name: &str, value: &Value, prefix: &str) -> Result<(), CheckError> {
        let checker = self
            .registry
            .get(name)
            .ok_or_else(|| ConfigError::UnknownChecker {
                name: name.to_owned(),
            })?;
        self.run(&checker, value, prefix)
    }

    fn run(&self, checker: &Checker, value: &Value, prefix: &str) -> Result<(), CheckError> {
        if checker.check(value) {
            return Ok(());
        }
        Err(self.fail(
            checker.error_factory(),
            format!("Must be {}", checker.description()),
            Some(value.clone()),
            prefix,
        ))
    }

    /// Build a value failure with the checker's own factory, or the active one.
    fn fail(
        &self,
        factory: Option<&ErrorFactory>,
        reason: String,
        value: Option<Value>,
        prefix: &str,
    ) -> CheckError {
        let factory = factory.unwrap_or(self.error);
        CheckError::Value(factory(ValueFailure::new(reason, value, prefix)))
    }
}

/// Link a new visit onto `path`, or `None` if the value is already on it.
fn enter<'p>(
    path: Option<&'p Visit<'p>>,
    ty: usize,
    value: usize,
) -> Result<Option<Visit<'p>>, ConfigError> {
    if ancestors(path).any(|visit| visit.ty == ty) {
        return Err(ConfigError::CircularType);
    }
    if ancestors(path).any(|visit| visit.value == value) {
        tracing::trace!(value, "value cycle reached, accepting");
        return Ok(None);
    }
    Ok(Some(Visit {
        ty,
        value,
        parent: path,
    }))
}

fn key_prefix(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_owned()
    } else {
        format!("{prefix}.{key}")
    }
}

fn index_prefix(prefix: &str, index: usize) -> String {
    format!("{prefix}[{index}]")
}

#[expect(clippy::cast_precision_loss, reason = "lengths are far below 2^52")]
fn count(n: usize) -> Value {
    Value::Number(n as f64)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]

//! Built-in checkers every registry starts with.
//!
//! Each entry lists the name, its aliases and the description used in
//! failure messages (`Must be {description}`). Aliases share one checker.

use std::sync::{Arc, LazyLock};

use blork_value::{now_millis, Value, MAX_SAFE_INTEGER};
use regex::Regex;
use rustc_hash::FxHashMap;

use crate::Checker;

type Entry = (&'static [&'static str], &'static str, fn(&Value) -> bool);

const BUILTINS: &[Entry] = &[
    // Primitives
    (&["primitive"], "primitive", is_primitive),
    (&["null"], "null", |v| v.is_null()),
    (&["undefined", "void", "undef"], "undefined", |v| v.is_undefined()),
    (&["defined", "def"], "defined", |v| !v.is_undefined()),
    // Booleans
    (&["boolean", "bool"], "boolean", |v| matches!(v, Value::Bool(_))),
    (&["true"], "true", |v| matches!(v, Value::Bool(true))),
    (&["false"], "false", |v| matches!(v, Value::Bool(false))),
    (&["truthy"], "truthy", Value::is_truthy),
    (&["falsy"], "falsy", |v| !v.is_truthy()),
    // Numbers
    (&["zero"], "zero", |v| v.as_number() == Some(0.0)),
    (&["one"], "one", |v| v.as_number() == Some(1.0)),
    (&["nan"], "NaN", |v| v.as_number().is_some_and(f64::is_nan)),
    (&["number", "num"], "finite number", Value::is_finite_number),
    (
        &["+number", "+num"],
        "positive finite number",
        |v| v.is_finite_number() && v.as_number().is_some_and(|n| n >= 0.0),
    ),
    (
        &["-number", "-num"],
        "negative finite number",
        |v| v.is_finite_number() && v.as_number().is_some_and(|n| n <= 0.0),
    ),
    (&["integer", "int"], "integer", Value::is_integer),
    (
        &["+integer", "+int"],
        "positive integer",
        |v| v.is_integer() && v.as_number().is_some_and(|n| n >= 0.0),
    ),
    (
        &["-integer", "-int"],
        "negative integer",
        |v| v.is_integer() && v.as_number().is_some_and(|n| n <= 0.0),
    ),
    // Strings
    (&["string", "str"], "string", |v| v.as_str().is_some()),
    (&["alphanumeric"], "alphanumeric string", |v| Case::Alphanumeric.test(v)),
    (&["alphabetic"], "alphabetic string", |v| Case::Alphabetic.test(v)),
    (&["numeric"], "numeric string", |v| Case::Numeric.test(v)),
    (&["lower"], "lowercase string", |v| Case::Lower.test(v)),
    (&["upper"], "UPPERCASE string", |v| Case::Upper.test(v)),
    (&["camel"], "camelCase string", |v| Case::Camel.test(v)),
    (&["pascal"], "PascalCase string", |v| Case::Pascal.test(v)),
    (&["snake"], "snake_case string", |v| Case::Snake.test(v)),
    (&["screaming"], "SCREAMING_SNAKE_CASE string", |v| Case::Screaming.test(v)),
    (&["kebab", "slug"], "kebab-case string", |v| Case::Kebab.test(v)),
    (&["train"], "Camel-Kebab-Case string", |v| Case::Train.test(v)),
    // Objects
    (&["function", "func"], "function", |v| matches!(v, Value::Function(_))),
    (&["objectlike"], "object", Value::is_objectlike),
    (&["object", "obj"], "plain object", Value::is_plain_object),
    (&["iterable"], "iterable object", |v| {
        matches!(v, Value::Array(_) | Value::Map(_) | Value::Set(_))
    }),
    (&["circular"], "circular object", Value::is_circular),
    (&["array", "arr"], "plain array", Value::is_array),
    (
        &["arraylike", "arguments", "args"],
        "arraylike object with a numeric length property",
        is_arraylike,
    ),
    (&["date"], "date", |v| matches!(v, Value::Date(_))),
    (&["future"], "date in the future", |v| {
        matches!(v, Value::Date(ms) if *ms > now_millis())
    }),
    (&["past"], "date in the past", |v| {
        matches!(v, Value::Date(ms) if *ms < now_millis())
    }),
    (&["map"], "map", |v| matches!(v, Value::Map(_))),
    (&["set"], "set", |v| matches!(v, Value::Set(_))),
    (&["regex", "regexp"], "regular expression", |v| matches!(v, Value::RegExp(_))),
    (&["symbol"], "symbol", |v| matches!(v, Value::Symbol(_))),
    // Other
    (&["empty"], "empty", Value::is_empty),
    (&["any", "mixed"], "any", |_| true),
    (&["json", "jsonable"], "JSON-friendly value", Value::is_jsonable),
];

/// Table of built-in checkers keyed by every name and alias.
pub(crate) fn builtin_checkers() -> FxHashMap<Arc<str>, Checker> {
    let mut checkers = FxHashMap::default();
    for &(names, description, predicate) in BUILTINS {
        let checker = Checker::new(description, predicate);
        for &name in names {
            checkers.insert(Arc::from(name), checker.clone());
        }
    }
    checkers
}

/// Kebab case, also the rule for registered names.
pub(crate) fn is_kebab(s: &str) -> bool {
    Case::Kebab.matches(s)
}

/// String shapes checked by pattern, indexing `CASE_SOURCES`.
#[derive(Clone, Copy, Debug)]
enum Case {
    Alphanumeric,
    Alphabetic,
    Numeric,
    Lower,
    Upper,
    Camel,
    Pascal,
    Snake,
    Screaming,
    Kebab,
    Train,
}

const CASE_SOURCES: [&str; 11] = [
    r"^[a-zA-Z0-9]+$",
    r"^[a-zA-Z]+$",
    r"^[0-9]+$",
    r"^[a-z]+$",
    r"^[A-Z]+$",
    r"^[a-z][a-zA-Z0-9]*$",
    r"^[A-Z][a-zA-Z0-9]*$",
    r"^[a-z][a-z0-9]*(_[a-z0-9]+)*$",
    r"^[A-Z][A-Z0-9]*(_[A-Z0-9]+)*$",
    r"^[a-z][a-z0-9]*(-[a-z0-9]+)*$",
    r"^[A-Z][a-zA-Z0-9]*(-[A-Z0-9][a-zA-Z0-9]+)*$",
];

/// Compiled once on first use. The sources are literals, so `None` only
/// shows up as a failing pattern test.
static CASE_PATTERNS: LazyLock<[Option<Regex>; 11]> =
    LazyLock::new(|| CASE_SOURCES.map(|source| Regex::new(source).ok()));

impl Case {
    fn matches(self, s: &str) -> bool {
        CASE_PATTERNS[self as usize]
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(s))
    }

    fn test(self, v: &Value) -> bool {
        v.as_str().is_some_and(|s| self.matches(s))
    }
}

fn is_primitive(v: &Value) -> bool {
    match v {
        Value::Undefined | Value::Null | Value::Bool(_) | Value::Str(_) => true,
        Value::Number(n) => n.is_finite(),
        _ => false,
    }
}

fn is_arraylike(v: &Value) -> bool {
    match v {
        Value::Array(_) => true,
        Value::Object(_) => {
            let length = v.get("length");
            length.is_integer() && length.as_number().is_some_and(|n| n >= 0.0 && n <= MAX_SAFE_INTEGER)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests;

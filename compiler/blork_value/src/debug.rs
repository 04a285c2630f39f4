//! Bounded, cycle-safe rendering of values for error messages.
//!
//! Output stays short no matter the input: long strings are cut, large
//! collections are elided, deep nesting collapses, and a container that is
//! already being rendered on the current path prints as `↻`.

use std::fmt::Write;

use blork_stack::ensure_sufficient_stack;
use chrono::{DateTime, SecondsFormat, Utc};
use smallvec::SmallVec;

use crate::Value;

/// Characters of a string shown before it is cut with `…`.
const MAX_STRING_CHARS: usize = 40;

/// Items shown per collection before eliding the rest.
const MAX_ITEMS: usize = 10;

/// Nesting level at which non-empty collections collapse.
const MAX_DEPTH: usize = 3;

const CYCLE: &str = "↻";
const ELLIPSIS: &str = "…";

impl Value {
    /// Render for inclusion in a message, e.g. `{ "a": [1, 2] }`.
    pub fn debug(&self) -> String {
        let mut renderer = Renderer {
            out: String::new(),
            path: SmallVec::new(),
        };
        renderer.value(self, 0);
        renderer.out
    }
}

struct Renderer {
    out: String,
    path: SmallVec<[usize; 8]>,
}

impl Renderer {
    fn value(&mut self, value: &Value, depth: usize) {
        match value {
            Value::Undefined => self.out.push_str("undefined"),
            Value::Null => self.out.push_str("null"),
            Value::Bool(b) => self.out.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => self.out.push_str(&format_number(*n)),
            Value::Str(s) => self.string(s),
            Value::Symbol(desc) => {
                let _ = write!(self.out, "Symbol({desc})");
            }
            Value::Function(Some(name)) => {
                let _ = write!(self.out, "{name}()");
            }
            Value::Function(None) => self.out.push_str("anonymous function"),
            Value::Date(millis) => self.out.push_str(&format_date(*millis)),
            Value::RegExp(source) => {
                let _ = write!(self.out, "/{source}/");
            }
            Value::Array(_) | Value::Object(_) | Value::Map(_) | Value::Set(_) => {
                self.container(value, depth);
            }
        }
    }

    fn string(&mut self, s: &str) {
        self.out.push('"');
        for (i, c) in s.chars().enumerate() {
            if i == MAX_STRING_CHARS {
                self.out.push_str(ELLIPSIS);
                break;
            }
            match c {
                '"' => self.out.push_str("\\\""),
                '\\' => self.out.push_str("\\\\"),
                '\n' => self.out.push_str("\\n"),
                '\r' => self.out.push_str("\\r"),
                '\t' => self.out.push_str("\\t"),
                c if c.is_control() => {
                    let _ = write!(self.out, "\\u{:04x}", u32::from(c));
                }
                c => self.out.push(c),
            }
        }
        self.out.push('"');
    }

    fn container(&mut self, value: &Value, depth: usize) {
        if let Value::Object(object) = value {
            if let Some(class) = object.read().class() {
                let _ = write!(self.out, "instance of {}", class.display_name());
                return;
            }
        }
        let Some(id) = value.identity() else {
            return;
        };
        if self.path.contains(&id) {
            self.out.push_str(CYCLE);
            return;
        }
        self.path.push(id);
        ensure_sufficient_stack(|| match value {
            Value::Array(items) => {
                let items = items.snapshot();
                self.list("[", "]", depth, &items, |r, item, d| r.value(item, d));
            }
            Value::Object(object) => {
                let entries = object.read().entries();
                self.list("{ ", " }", depth, &entries, |r, (key, item), d| {
                    r.string(key);
                    r.out.push_str(": ");
                    r.value(item, d);
                });
            }
            Value::Map(pairs) => {
                let pairs = pairs.snapshot();
                let _ = write!(self.out, "Map({}) ", pairs.len());
                self.list("{ ", " }", depth, &pairs, |r, (key, item), d| {
                    r.value(key, d);
                    r.out.push_str(" => ");
                    r.value(item, d);
                });
            }
            Value::Set(items) => {
                let items = items.snapshot();
                let _ = write!(self.out, "Set({}) ", items.len());
                self.list("{ ", " }", depth, &items, |r, item, d| r.value(item, d));
            }
            _ => {}
        });
        self.path.pop();
    }

    /// Write `open item, item, … close`, collapsing at the depth limit.
    fn list<T>(
        &mut self,
        open: &str,
        close: &str,
        depth: usize,
        items: &[T],
        mut item: impl FnMut(&mut Self, &T, usize),
    ) {
        let open_trimmed = open.trim_end();
        let close_trimmed = close.trim_start();
        if items.is_empty() {
            self.out.push_str(open_trimmed);
            self.out.push_str(close_trimmed);
            return;
        }
        if depth >= MAX_DEPTH {
            self.out.push_str(open_trimmed);
            self.out.push_str(ELLIPSIS);
            self.out.push_str(close_trimmed);
            return;
        }
        self.out.push_str(open);
        for (i, entry) in items.iter().take(MAX_ITEMS).enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            item(self, entry, depth + 1);
        }
        if items.len() > MAX_ITEMS {
            self.out.push_str(", ");
            self.out.push_str(ELLIPSIS);
        }
        self.out.push_str(close);
    }
}

/// Numbers the way JavaScript prints them: `1`, `1.5`, `NaN`, `-Infinity`.
pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_owned()
    } else if n.is_infinite() {
        (if n > 0.0 { "Infinity" } else { "-Infinity" }).to_owned()
    } else if n == 0.0 {
        "0".to_owned()
    } else {
        format!("{n}")
    }
}

/// ISO-8601 UTC timestamp with millisecond precision, or `Invalid Date`
/// outside the representable range.
#[expect(
    clippy::cast_possible_truncation,
    reason = "out-of-range values saturate and are rejected by chrono"
)]
pub(crate) fn format_date(millis: f64) -> String {
    if !millis.is_finite() {
        return "Invalid Date".to_owned();
    }
    DateTime::<Utc>::from_timestamp_millis(millis.trunc() as i64).map_or_else(
        || "Invalid Date".to_owned(),
        |date| date.to_rfc3339_opts(SecondsFormat::Millis, true),
    )
}

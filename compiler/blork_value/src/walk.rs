//! Cycle-aware structural walks.
//!
//! Both walks track the containers on the current path (not every container
//! seen), so a value shared between two siblings is not a cycle. Containers
//! whose whole subgraph has already passed are remembered in `done` and not
//! walked again, which keeps shared DAGs linear.

use blork_stack::ensure_sufficient_stack;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::Value;

#[derive(Default)]
struct Walk {
    path: SmallVec<[usize; 16]>,
    done: FxHashSet<usize>,
}

impl Value {
    /// Whether the value graph reaches one of its own ancestors.
    pub fn is_circular(&self) -> bool {
        Walk::default().circular(self)
    }

    /// Whether the value survives a JSON round trip: null, booleans, finite
    /// numbers, strings, and arrays or plain objects of those, without cycles.
    pub fn is_jsonable(&self) -> bool {
        Walk::default().jsonable(self)
    }
}

impl Walk {
    fn circular(&mut self, value: &Value) -> bool {
        let Some(id) = value.identity() else {
            return false;
        };
        if self.done.contains(&id) {
            return false;
        }
        if self.path.contains(&id) {
            return true;
        }
        self.path.push(id);
        let found = ensure_sufficient_stack(|| {
            value.children().iter().any(|child| self.circular(child))
        });
        self.path.pop();
        if !found {
            self.done.insert(id);
        }
        found
    }

    fn jsonable(&mut self, value: &Value) -> bool {
        match value {
            Value::Null | Value::Bool(_) | Value::Str(_) => true,
            Value::Number(n) => n.is_finite(),
            Value::Array(_) => self.descend(value),
            Value::Object(_) if value.is_plain_object() => self.descend(value),
            _ => false,
        }
    }

    fn descend(&mut self, value: &Value) -> bool {
        let Some(id) = value.identity() else {
            return false;
        };
        if self.done.contains(&id) {
            return true;
        }
        if self.path.contains(&id) {
            return false;
        }
        self.path.push(id);
        let ok = ensure_sufficient_stack(|| {
            value.children().iter().all(|child| self.jsonable(child))
        });
        self.path.pop();
        if ok {
            self.done.insert(id);
        }
        ok
    }
}

#[cfg(test)]
mod tests;

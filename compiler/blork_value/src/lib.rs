//! Runtime values for the blork checker.
//!
//! Values are dynamic: scalars are stored inline, containers live in shared
//! [`Heap`] cells that carry identity and can be mutated after creation, so a
//! graph may point back at its own ancestors.
//!
//! ```text
//! let node = Value::object([("name", Value::from("root"))]);
//! node.insert("self", node.clone()); // self-referential
//! ```

mod class;
mod debug;
mod heap;
mod object;
mod value;
mod walk;

pub use class::Class;
pub use heap::Heap;
pub use object::ObjectValue;
pub use value::{now_millis, Value};

/// Largest integer exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

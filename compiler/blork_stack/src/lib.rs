//! Stack growth guard for deep recursion.
//!
//! Three places in blork recurse on caller-supplied structure: the grammar
//! parser (nesting in a type string), the structural matcher (nesting of
//! values and type expressions), and the value walkers (`is_circular`,
//! `is_jsonable`, debug rendering). Each wraps its recursive step in
//! [`ensure_sufficient_stack`] so deeply nested input grows the stack instead
//! of overflowing it.
//!
//! On `wasm32` the guard is a plain call.
//!
//! # Sizing
//!
//! - **Red zone**: 128KB. Below this, the stack is grown before recursing.
//! - **Segment**: 1MB per growth.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const STACK_SEGMENT: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
///
/// ```text
/// fn match_node(&self, value: &Value, ty: &TypeExpr) -> Result<(), CheckError> {
///     ensure_sufficient_stack(|| self.match_children(value, ty))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, f)
}

/// Passthrough on `wasm32`.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

//! Stack growth for recursive model walks.
//!
//! Typedef resolution descends once per alias in a chain (`type A is B`,
//! `type B is C`, ...). Generated schemas can nest these deeply, so every
//! recursive step runs inside [`ensure_sufficient_stack`], which moves
//! execution onto a fresh segment when the current one runs low.
//!
//! On `wasm32` the call is a plain passthrough.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 64 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
///
/// ```text
/// fn resolve(&mut self, id: DataTypeId) -> Result<Descriptor, ResolutionError> {
///     ensure_sufficient_stack(|| self.resolve_uncached(id))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

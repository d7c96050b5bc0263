//! Allocator facade.
//!
//! The reference runtime allocates every heap object through a tracing
//! garbage collector and never frees explicitly. In this crate every
//! `Value`/`Unit`/`Closure` is a plain owned Rust value (or an `Rc` where a
//! node is shared), so there is no separate arena to manage — Rust's own
//! ownership model plays the role of the GC's reachability tracking for the
//! non-shared parts, and `Rc` plays it for the shared unit trees.
//!
//! `alloc`/`release` exist only so the L0 contract from the specification
//! stays visible and testable; they are not on any hot path.

/// Allocates a value of type `T`, handing back ownership.
///
/// Kept as a named function (rather than just using `Box::new`/ownership
/// directly everywhere) so the allocator facade has a single seam a future
/// custom allocator could replace without touching call sites.
pub fn alloc<T>(value: T) -> Box<T> {
    Box::new(value)
}

/// Reallocation is not meaningful for owned Rust values; this exists only to
/// keep the facade's shape explicit. Implemented as a move.
pub fn realloc<T>(value: Box<T>) -> Box<T> {
    value
}

/// No-op release, matching the reference runtime's GC-backed semantics:
/// nothing is ever explicitly freed, reachability alone decides lifetime.
pub fn release<T>(_value: T) {}

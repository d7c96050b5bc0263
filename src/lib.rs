//! Core runtime for a dynamically-typed language with first-class units of
//! measurement.
//!
//! This crate is not a compiler: it is the set of boxed values, dispatch
//! behavior, unit algebra and diagnostics that compiled programs call into.
//! Lexing, parsing, type checking and code generation all live outside this
//! crate; see `cli/` for a thin demonstration harness that drives this
//! library directly instead of through a real frontend.

pub mod alloc;
pub mod builtins;
pub mod errors;
mod format;
pub mod init;
pub mod location;
pub mod slice;
pub mod source_registry;
pub mod units;
pub mod value;

pub use errors::{u_throw, ErrorCode};
pub use init::init;
pub use location::Location;
pub use units::{BaseUnitTable, EvalMode, Unit};
pub use value::{Value, ValueKind};

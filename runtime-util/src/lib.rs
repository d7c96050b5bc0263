//! Small helpers shared between the runtime crate and its derive macros.
//!
//! Adapted from the teacher's `util` crate: the `Endian`/`byteorder`
//! re-export is dropped (nothing in this workspace serializes a binary
//! program image any more), `InteropGetName` is renamed and reworked into
//! a plain `&'static str` accessor since there is no FFI boundary left to
//! serve, and `ParseEnumError`/`EnumFromStr` carry over unchanged.

use std::{error::Error, fmt};

/// Gives a fieldless enum a stable, human-readable name for its current
/// variant — used for `ValueKind`'s debug label and the error taxonomy's
/// `TYPE` header. Implemented via `#[derive(runtime_derive::KindName)]`
/// rather than by hand, the same way the teacher derives
/// `InteropGetName` for its register/opcode enums.
pub trait KindName {
    fn kind_name(&self) -> &'static str;
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ParseEnumError {
    pub value: String,
    pub enum_name: &'static str,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Failed to parse \"{}\" as {}.",
            &self.value, &self.enum_name
        )
    }
}

impl Error for ParseEnumError {
    fn description(&self) -> &str {
        "Failed to parse enum."
    }
}

pub trait EnumFromStr: Sized {
    fn from_str(s: &str) -> Result<Self, ParseEnumError>;
}

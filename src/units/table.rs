//! The compiler-to-runtime contract for base units (spec §6): a table of
//! per-id conversion hooks the compiler is expected to emit. This crate
//! only needs to consume the trait; [`DemoUnitTable`] is a concrete
//! implementation covering the units named in the worked examples (`m`,
//! `km`, `s`, `dB`) so the scenarios and property tests have something real
//! to run against without a compiler.

/// Conversion hooks for a closed set of base-unit ids, supplied externally
/// (by the compiler, in a real deployment).
pub trait BaseUnitTable {
    /// Canonicalizes a quantity `x` expressed in the unit identified by
    /// `id` into the runtime's reference representation for that unit.
    fn base_unit(&self, id: u16, x: f64) -> f64;

    /// Inverse of [`BaseUnitTable::base_unit`]: expresses a canonical
    /// quantity in the unit identified by `id`.
    fn unit_id_eval(&self, id: u16, x: f64) -> f64;

    /// Display evaluation used by dimensioned add/sub for logarithmic
    /// units, after the internal recomputation in the left operand's unit.
    fn unit_id_eval_normal(&self, id: u16, x: f64) -> f64;

    /// Whether the unit identified by `id` is logarithmic (e.g. decibels).
    fn is_logarithmic(&self, id: u16) -> bool;
}

/// Ids for [`DemoUnitTable`]. A real compiler would assign these; fixed
/// here only so the demonstration CLI and tests have stable identifiers.
pub mod demo_ids {
    pub const METER: u16 = 0;
    pub const KILOMETER: u16 = 1;
    pub const SECOND: u16 = 2;
    pub const DECIBEL: u16 = 3;
}

/// A CLI-facing lookup failure, distinct from anything the runtime itself
/// raises: `u_throw` (`src/errors.rs`) reports a fault in a *running*
/// program at a source span; this is a usage error in the *invocation*
/// of the demonstration harness, before any unit-tagged value even
/// exists, so it is modeled as an ordinary recoverable `Result` instead.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitNameError {
    #[error("unknown unit `{0}` (expected one of: m, km, s, dB)")]
    Unknown(String),
}

/// A small, self-contained [`BaseUnitTable`] covering meters, kilometers,
/// seconds and decibels — enough to run every scenario in spec §8.
#[derive(Debug, Default, Clone, Copy)]
pub struct DemoUnitTable;

impl DemoUnitTable {
    /// Resolves a unit's surface name to its [`demo_ids`] key, for callers
    /// (the CLI harness) that only have a user-typed string to work with.
    pub fn id_for(name: &str) -> Result<u16, UnitNameError> {
        use demo_ids::*;
        match name {
            "m" => Ok(METER),
            "km" => Ok(KILOMETER),
            "s" => Ok(SECOND),
            "dB" => Ok(DECIBEL),
            other => Err(UnitNameError::Unknown(other.to_string())),
        }
    }
}

impl BaseUnitTable for DemoUnitTable {
    fn base_unit(&self, id: u16, x: f64) -> f64 {
        use demo_ids::*;
        match id {
            // Plain multiplicative units: `base_unit`/`unit_id_eval` are
            // only ever invoked by `eval_number`/`convert` self-referentially
            // (same id supplies both hooks), so for these the pair only
            // needs to agree with itself — real cross-unit rescaling (m to
            // km) is the compiler's base-unit-coefficient table, which sits
            // outside this runtime entirely. Keeping both hooks the
            // identity here makes stripping a linear unit to `ONE` the
            // no-op it should be (`5 m` as a bare number is just `5`).
            METER | KILOMETER | SECOND => x,
            // dB: base_unit is the fixed reference level the ratio is taken
            // against; unit_id_eval is the linear<->dB identity this demo
            // table uses, so `unit_id_eval(x) / base_unit(x) == x` and a
            // plain `N dB` value displays as `N` unchanged.
            DECIBEL => 1.0,
            _ => x,
        }
    }

    fn unit_id_eval(&self, id: u16, x: f64) -> f64 {
        use demo_ids::*;
        match id {
            METER | KILOMETER | SECOND => x,
            DECIBEL => x,
            _ => x,
        }
    }

    fn unit_id_eval_normal(&self, id: u16, x: f64) -> f64 {
        // The re-lift after dimensioned add/sub recomputation; this demo's
        // dB values already live in the same linear space `eval_number`
        // works in, so NORMAL is the identity too.
        self.unit_id_eval(id, x)
    }

    fn is_logarithmic(&self, id: u16) -> bool {
        id == demo_ids::DECIBEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use demo_ids::*;

    #[test]
    fn linear_units_are_self_print_no_ops() {
        let table = DemoUnitTable;
        for id in [METER, KILOMETER, SECOND] {
            let base = table.base_unit(id, 42.0);
            let inv = table.unit_id_eval(id, 42.0);
            assert_eq!(inv / base, 1.0);
        }
    }

    #[test]
    fn decibel_round_trips_its_own_value() {
        let table = DemoUnitTable;
        let base = table.base_unit(DECIBEL, 3.0);
        let inv = table.unit_id_eval(DECIBEL, 3.0);
        assert_eq!(inv / base, 3.0);
    }

    #[test]
    fn id_for_resolves_every_known_surface_name() {
        assert_eq!(DemoUnitTable::id_for("m"), Ok(METER));
        assert_eq!(DemoUnitTable::id_for("km"), Ok(KILOMETER));
        assert_eq!(DemoUnitTable::id_for("s"), Ok(SECOND));
        assert_eq!(DemoUnitTable::id_for("dB"), Ok(DECIBEL));
    }

    #[test]
    fn id_for_reports_an_unknown_unit_by_name() {
        let err = DemoUnitTable::id_for("furlong").unwrap_err();
        assert_eq!(err, UnitNameError::Unknown("furlong".to_string()));
    }
}

//! Evaluation of a unit-expression tree to a scalar, and the logarithmic
//! predicate used to gate dimensioned add/sub. Ported from the reference
//! runtime's `eval_unit`/`is_unit_logarithmic`/`eval_number` (the `units/`
//! tree's newer revision, which added the three-mode enum and
//! `eval_number` on top of the older two-mode evaluator).

use super::ast::Unit;
use super::table::BaseUnitTable;

/// Which hook a [`Unit::Identifier`] leaf evaluates through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EvalMode {
    /// `base_unit`: maps a quantity in this unit to the canonical
    /// reference.
    Base,
    /// `unit_id_eval`: the inverse mapping.
    Inverted,
    /// `unit_id_eval_normal`: the post-recomputation re-lift used after
    /// dimensioned add/sub.
    Normal,
}

/// Evaluates `node` at `x` under `mode`, recursing through the unit
/// algebra's combinators and bottoming out at [`Unit::Identifier`] leaves,
/// which defer to `table`.
///
/// A scalar evaluates to its own value (not `x` scaled by it — every child
/// of a product/sum/power receives the same `x`, and scalars act as the
/// constant terms those combinators fold together); `One` evaluates to `x`
/// unchanged, since there's nothing to convert.
pub fn eval(node: &Unit, x: f64, mode: EvalMode, table: &dyn BaseUnitTable) -> f64 {
    match node {
        Unit::One => x,
        Unit::Scalar(s) => *s,
        Unit::Identifier { id, .. } => match mode {
            EvalMode::Base => table.base_unit(*id, x),
            EvalMode::Inverted => table.unit_id_eval(*id, x),
            EvalMode::Normal => table.unit_id_eval_normal(*id, x),
        },
        Unit::Neg(inner) => -eval(inner, x, mode, table),
        Unit::Expression(inner) => eval(inner, x, mode, table),
        // Every child is evaluated against the same `x`, then combined;
        // children don't thread an accumulator through one another.
        Unit::Power(base, exponent) => {
            eval(base, x, mode, table).powf(eval(exponent, x, mode, table))
        }
        Unit::Product(children) => {
            children.iter().fold(1.0, |acc, child| acc * eval(child, x, mode, table))
        }
        Unit::Sum(children) => {
            children.iter().map(|child| eval(child, x, mode, table)).sum()
        }
    }
}

/// Whether `node` is (or contains) a logarithmic base unit — the gate
/// `Number::binop`/`Number::convert` use to choose between additive and
/// multiplicative combination of the base/inverted ratio.
///
/// Ported from `is_unit_logarithmic`: a product or sum is logarithmic if
/// any child is, a power is logarithmic if either its base or its exponent
/// is, and the transparent wrappers (`Expression`, `Neg`) defer to their
/// inner node.
pub fn is_logarithmic(node: &Unit, table: &dyn BaseUnitTable) -> bool {
    match node {
        Unit::Scalar(_) | Unit::One => false,
        Unit::Identifier { id, .. } => table.is_logarithmic(*id),
        Unit::Expression(inner) | Unit::Neg(inner) => is_logarithmic(inner, table),
        Unit::Power(base, exponent) => {
            is_logarithmic(base, table) || is_logarithmic(exponent, table)
        }
        Unit::Product(children) | Unit::Sum(children) => {
            children.iter().any(|child| is_logarithmic(child, table))
        }
    }
}

/// Re-expresses a number's raw value `value`, stored under `own_unit`, in
/// terms of `target`'s hooks (`target` defaults to `own_unit` when `None`).
///
/// Ported from `eval_number`: the generic "what scalar does this quantity
/// reduce to" computation used both by `Number::convert`'s dimensionless
/// branch and by the display path (`print_number` calls this with
/// `target = None`, i.e. a number evaluates itself through its own unit's
/// hooks for display).
pub fn eval_number(
    value: f64,
    own_unit: &Unit,
    target: Option<&Unit>,
    table: &dyn BaseUnitTable,
) -> f64 {
    let unit = target.unwrap_or(own_unit);
    if unit.is_one() {
        return value;
    }
    let base = eval(unit, value, EvalMode::Base, table);
    let inverted = eval(unit, value, EvalMode::Inverted, table);
    let ratio = inverted / base;
    if is_logarithmic(unit, table) {
        ratio
    } else {
        value * ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::table::{demo_ids, DemoUnitTable};

    #[test]
    fn one_is_transparent() {
        let table = DemoUnitTable;
        assert_eq!(eval(&Unit::one(), 7.0, EvalMode::Base, &table), 7.0);
    }

    #[test]
    fn scalar_evaluates_to_its_own_value() {
        let table = DemoUnitTable;
        assert_eq!(eval(&Unit::scalar(2.0), 5.0, EvalMode::Base, &table), 2.0);
    }

    #[test]
    fn product_multiplies_each_childs_evaluation_at_the_same_x() {
        let table = DemoUnitTable;
        let expr = Unit::product_of([Unit::scalar(2.0), Unit::scalar(3.0)]);
        assert_eq!(eval(&expr, 100.0, EvalMode::Base, &table), 6.0);
    }

    #[test]
    fn plain_linear_number_prints_itself() {
        let table = DemoUnitTable;
        let meter = Unit::identifier("m", demo_ids::METER);
        assert_eq!(eval_number(5.0, &meter, None, &table), 5.0);
    }

    #[test]
    fn plain_decibel_number_prints_itself() {
        let table = DemoUnitTable;
        let db = Unit::identifier("dB", demo_ids::DECIBEL);
        assert_eq!(eval_number(3.0, &db, None, &table), 3.0);
    }

    #[test]
    fn decibel_is_logarithmic_meter_is_not() {
        let table = DemoUnitTable;
        let db = Unit::identifier("dB", demo_ids::DECIBEL);
        let m = Unit::identifier("m", demo_ids::METER);
        assert!(is_logarithmic(&db, &table));
        assert!(!is_logarithmic(&m, &table));
    }
}

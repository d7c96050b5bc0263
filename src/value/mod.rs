//! The runtime's value universe (spec.md §3/§4.4): a closed, tagged
//! union standing in for the reference runtime's boxed record plus
//! per-kind dispatch table. Each kind's real behavior lives in its own
//! submodule; this file is only the discriminant and the cross-kind
//! dispatch spec.md §4.3–4.4 describe (`__eq__`, ordering, truthiness,
//! `echo`'s rendering).

mod closure;
mod extern_fn;
mod list;
mod number;
mod range;
mod string;

pub use closure::{Closure, Env};
pub use extern_fn::ExternFn;
pub use list::ListValue;
pub use number::{binop, Number, OpKind, Repr};
pub(crate) use number::format_g;
pub use range::RangeValue;
pub use string::NumString;

use std::cmp::Ordering;

use runtime_derive::KindName;
use runtime_util::KindName as _;

use crate::units::BaseUnitTable;

/// The eight runtime kinds (spec.md §3's "discriminant selects exactly
/// one of" list). `KindName` (derived, see `runtime-derive`) gives each
/// variant a stable display label without a hand-written match arm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, KindName)]
pub enum ValueKind {
    Number,
    Bool,
    String,
    List,
    Range,
    None,
    Closure,
    Extern,
}

/// A runtime value. `None` is a single shared marker rather than a
/// pointer to a shared heap cell — spec.md §4.4 only requires "a single
/// shared none value is acceptable", and a unit variant already gives
/// that for free.
#[derive(Clone, Debug)]
pub enum Value {
    Number(Number),
    Bool(bool),
    String(NumString),
    List(ListValue),
    Range(RangeValue),
    None,
    Closure(Closure),
    Extern(ExternFn),
}

/// Formatter state threaded through `echo`'s rendering in place of the
/// source's `__thread bool _echo_in_list` (spec.md §9, resolved in §3 of
/// the expanded design): strings nested inside a list render quoted,
/// top-level strings don't.
#[derive(Clone, Copy, Debug, Default)]
pub struct FormatCtx {
    pub in_list: bool,
}

impl FormatCtx {
    pub fn top_level() -> FormatCtx {
        FormatCtx { in_list: false }
    }

    fn nested(self) -> FormatCtx {
        FormatCtx { in_list: true }
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Number(_) => ValueKind::Number,
            Value::Bool(_) => ValueKind::Bool,
            Value::String(_) => ValueKind::String,
            Value::List(_) => ValueKind::List,
            Value::Range(_) => ValueKind::Range,
            Value::None => ValueKind::None,
            Value::Closure(_) => ValueKind::Closure,
            Value::Extern(_) => ValueKind::Extern,
        }
    }

    /// Truthiness (`__cbool__`): numbers are nonzero, bools are
    /// themselves, strings/lists are nonempty, ranges are unconditionally
    /// true, `None` is always false, closures/externs (callable, never
    /// absent) are always true.
    pub fn truthy(&self) -> bool {
        match self {
            Value::Number(n) => n.truthy(),
            Value::Bool(b) => *b,
            Value::String(s) => !s.is_empty(),
            Value::List(l) => !l.is_empty(),
            Value::Range(_) => true,
            Value::None => false,
            Value::Closure(_) | Value::Extern(_) => true,
        }
    }

    /// `__eq__`: only ever true between values of the same kind — a
    /// mismatched-kind comparison is simply unequal, never an error
    /// (spec.md §4.4). Lists compare deeply, element by element;
    /// everything else compares by its own kind's equality.
    pub fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.cmp(b) == Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                let (ai, bi) = (a.items(), b.items());
                ai.len() == bi.len() && ai.iter().zip(bi.iter()).all(|(x, y)| x.eq(y))
            }
            (Value::Range(a), Value::Range(b)) => a == b,
            (Value::None, Value::None) => true,
            (Value::Closure(a), Value::Closure(b)) => a.ptr_eq(b),
            (Value::Extern(a), Value::Extern(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Ordering operators (`<`, `<=`, `>`, `>=`). Only the kinds spec.md
    /// §4.4 names an ordering for compare; everything else (bools,
    /// ranges, `None`, closures, externs, mixed kinds) has none.
    ///
    /// Lists order by length only, never lexicographically by content —
    /// "surprising but intentional" per spec.md §9, preserved here rather
    /// than upgraded to the ordering a reader would expect.
    pub fn partial_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Some(a.cmp(b)),
            (Value::String(a), Value::String(b)) => Some(a.bytes_cmp(b)),
            (Value::List(a), Value::List(b)) => Some(a.len().cmp(&b.len())),
            _ => None,
        }
    }

    /// Renders `self` the way `echo` does (spec.md §4.6), given the unit
    /// table needed to display numbers and a [`FormatCtx`] tracking
    /// whether this value is nested inside a list being echoed.
    pub fn render(&self, ctx: FormatCtx, table: &dyn BaseUnitTable) -> String {
        match self {
            Value::Number(n) => n.display(table),
            Value::String(s) => {
                if ctx.in_list {
                    format!("\"{}\"", s.as_string())
                } else {
                    s.as_string()
                }
            }
            Value::Bool(b) => if *b { "true" } else { "false" }.to_string(),
            Value::List(l) => {
                let inner = ctx.nested();
                let parts: Vec<String> =
                    l.items().iter().map(|v| v.render(inner, table)).collect();
                format!("[{}]", parts.join(", "))
            }
            Value::Range(_) => format!("<{}>", ValueKind::Range.kind_name()),
            Value::Closure(c) => format!("{:?}", c),
            Value::Extern(e) => format!("{:?}", e),
            Value::None => "None".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::table::DemoUnitTable;
    use crate::units::Unit;

    #[test]
    fn numbers_compare_equal_through_number_cmp() {
        let a = Value::Number(Number::int(2, Unit::one()));
        let b = Value::Number(Number::float(2.0, Unit::one()));
        assert!(a.eq(&b));
    }

    #[test]
    fn lists_equal_deeply_element_by_element() {
        let a = Value::List(ListValue::new(vec![Value::Bool(true), Value::None]));
        let b = Value::List(ListValue::new(vec![Value::Bool(true), Value::None]));
        let c = Value::List(ListValue::new(vec![Value::Bool(false), Value::None]));
        assert!(a.eq(&b));
        assert!(!a.eq(&c));
    }

    #[test]
    fn lists_order_by_length_only_not_content() {
        let short = Value::List(ListValue::new(vec![Value::Bool(true)]));
        let long = Value::List(ListValue::new(vec![Value::None, Value::None]));
        assert_eq!(short.partial_cmp(&long), Some(Ordering::Less));
    }

    #[test]
    fn mismatched_kinds_are_never_equal_and_never_ordered() {
        let n = Value::Number(Number::int(0, Unit::one()));
        let s = Value::String(NumString::new(""));
        assert!(!n.eq(&s));
        assert_eq!(n.partial_cmp(&s), None);
    }

    #[test]
    fn none_is_falsy_and_equal_only_to_none() {
        assert!(!Value::None.truthy());
        assert!(Value::None.eq(&Value::None));
    }

    #[test]
    fn strings_render_quoted_only_when_nested_in_a_list() {
        let table = DemoUnitTable;
        let s = Value::String(NumString::new("hi"));
        assert_eq!(s.render(FormatCtx::top_level(), &table), "hi");
        let list = Value::List(ListValue::new(vec![s]));
        assert_eq!(list.render(FormatCtx::top_level(), &table), "[\"hi\"]");
    }
}

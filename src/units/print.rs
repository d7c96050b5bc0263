//! Unit-tree printer (spec.md §4.2.5), ported from
//! `original_source/.../units/units.c:89-290`'s `print_unit`: simplify
//! first, partition a product's factors into a numerator and denominator
//! set, elide unit exponents, and parenthesize compound bases/exponents
//! only where the grammar would otherwise misparse them.

use std::fmt::Write as _;

use super::ast::Unit;
use super::simplify::simplify;

/// Renders `unit` as the language's unit-expression syntax, simplifying it
/// first. Returns an empty string for the dimensionless unit, matching
/// `print_number`'s "append nothing when dimensionless" rule.
pub fn format_unit(unit: &Unit) -> String {
    let simplified = simplify(unit);
    if simplified.is_one() {
        return String::new();
    }
    render(&simplified)
}

fn render(node: &Unit) -> String {
    match node {
        Unit::One => String::new(),
        Unit::Scalar(s) => format_f64(*s),
        Unit::Identifier { name, .. } => name.to_string(),
        Unit::Neg(inner) => format!("-{}", render_atom(inner)),
        Unit::Expression(inner) => format!("[{}]", render(inner)),
        Unit::Sum(children) => render_sum(children),
        Unit::Power(base, exponent) => render_power(base, exponent),
        Unit::Product(children) => render_product(children),
    }
}

/// A bare `+` separator with no surrounding spaces (`units.c:214`'s
/// `g_string_append(out, "+")`) — a negative child renders its own `-`
/// prefix (a `Neg` node, or a negative `Scalar`), so `a + (-b)` comes out
/// as `a+-b`, not folded into a `" - "` term.
fn render_sum(children: &[std::rc::Rc<Unit>]) -> String {
    let mut out = String::new();
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            write!(out, "+").unwrap();
        }
        write!(out, "{}", render(child)).unwrap();
    }
    out
}

/// A denominator factor is a `POWER` whose exponent is a negative scalar,
/// or a bare `NEG`.
fn is_denominator(node: &Unit) -> bool {
    match node {
        Unit::Power(_, exponent) => matches!(&**exponent, Unit::Scalar(s) if *s < 0.0),
        Unit::Neg(_) => true,
        _ => false,
    }
}

fn render_product(children: &[std::rc::Rc<Unit>]) -> String {
    let mut numerator = Vec::new();
    let mut denominator = Vec::new();
    for child in children {
        if is_denominator(child) {
            denominator.push(child.clone());
        } else {
            numerator.push(child.clone());
        }
    }

    let num_str = if numerator.is_empty() && !denominator.is_empty() {
        "1".to_string()
    } else {
        numerator.iter().map(|c| render_factor(c)).collect::<Vec<_>>().join("*")
    };

    if denominator.is_empty() {
        return num_str;
    }

    let den_parts: Vec<String> = denominator.iter().map(|c| render_denominator_factor(c)).collect();
    let den_str = if den_parts.len() == 1 {
        den_parts.into_iter().next().unwrap()
    } else {
        format!("({})", den_parts.join("*"))
    };

    format!("{}/{}", num_str, den_str)
}

/// Renders a positive (numerator-side) product factor, parenthesizing
/// compound bases in a power.
fn render_factor(node: &Unit) -> String {
    render_atom(node)
}

/// Renders a denominator-side factor with its sign inverted and a
/// magnitude-1 exponent elided.
fn render_denominator_factor(node: &Unit) -> String {
    match node {
        Unit::Neg(inner) => render_atom(inner),
        Unit::Power(base, exponent) => {
            let flipped = match &**exponent {
                Unit::Scalar(s) => -s,
                _ => unreachable!("is_denominator only matches negative scalar exponents"),
            };
            if flipped == 1.0 {
                render_atom(base)
            } else {
                format!("{}^{}", render_atom(base), format_f64(flipped))
            }
        }
        other => render_atom(other),
    }
}

fn render_power(base: &Unit, exponent: &Unit) -> String {
    match exponent {
        Unit::Scalar(s) if *s == 1.0 => render(base),
        Unit::One => render(base),
        // A bare negative-exponent power outside a product is its own
        // one-factor denominator: `s^-1` reads as `1/s`, matching the rule
        // applied to denominator factors inside a product.
        Unit::Scalar(s) if *s < 0.0 => {
            let flipped = -s;
            let base_str = render_atom(base);
            if flipped == 1.0 {
                format!("1/{}", base_str)
            } else {
                format!("1/{}^{}", base_str, format_f64(flipped))
            }
        }
        _ => format!("{}^{}", render_atom(base), render_exponent(exponent)),
    }
}

/// Renders `node` as a single syntactic atom, parenthesizing it if its own
/// rendering would otherwise be ambiguous as a factor/base (sums and
/// products need grouping; everything else is already atomic).
fn render_atom(node: &Unit) -> String {
    match node {
        Unit::Sum(_) | Unit::Product(_) => format!("({})", render(node)),
        _ => render(node),
    }
}

/// Renders `node` as a power's exponent, ported from `units.c`'s
/// `exp_parens`: every non-scalar, non-identifier exponent is
/// parenthesized — a stricter rule than [`render_atom`]'s, since an
/// exponent like `a^b` or `-c` reads ambiguously next to the `^` even
/// though it wouldn't as a bare factor or base.
fn render_exponent(node: &Unit) -> String {
    match node {
        Unit::Scalar(_) | Unit::Identifier { .. } => render(node),
        _ => format!("({})", render(node)),
    }
}

fn format_f64(value: f64) -> String {
    crate::format::format_g(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str, n: u16) -> Unit {
        Unit::identifier(name, n)
    }

    #[test]
    fn dimensionless_prints_empty() {
        assert_eq!(format_unit(&Unit::one()), "");
        assert_eq!(format_unit(&Unit::scalar(1.0)), "");
    }

    #[test]
    fn plain_identifier() {
        assert_eq!(format_unit(&id("m", 0)), "m");
    }

    #[test]
    fn product_of_two_units() {
        let m = id("m", 0);
        let s = id("s", 1);
        assert_eq!(format_unit(&Unit::product_of([m, s])), "m*s");
    }

    #[test]
    fn division_renders_with_slash() {
        let m = id("m", 0);
        let s = id("s", 1);
        let per_second = Unit::power(s, Unit::scalar(-1.0));
        assert_eq!(format_unit(&Unit::product_of([m, per_second])), "m/s");
    }

    #[test]
    fn squared_unit_elides_nothing() {
        let m = id("m", 0);
        assert_eq!(format_unit(&Unit::power(m, Unit::scalar(2.0))), "m^2");
    }

    #[test]
    fn reciprocal_alone_gets_implicit_numerator() {
        let s = id("s", 1);
        let per_second = Unit::power(s, Unit::scalar(-1.0));
        assert_eq!(format_unit(&per_second), "1/s");
    }

    #[test]
    fn a_sum_valued_exponent_has_no_spaces_around_its_plus() {
        let m = id("m", 0);
        let s = id("s", 1);
        let exp = Unit::sum_of([Unit::scalar(1.0), s]);
        assert_eq!(format_unit(&Unit::power(m, exp)), "m^(1+s)");
    }

    #[test]
    fn non_scalar_non_identifier_exponent_is_parenthesized() {
        let m = id("m", 0);
        let s = id("s", 1);
        let exp = Unit::power(s, Unit::scalar(2.0));
        assert_eq!(format_unit(&Unit::power(m, exp)), "m^(s^2)");
    }

    #[test]
    fn unit_scalar_renders_through_the_shared_percent_g_formatter() {
        assert_eq!(format_unit(&Unit::scalar(10.0 / 3.0)), "3.33333");
    }
}

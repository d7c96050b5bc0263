//! Structural simplifier for the unit algebra. Ported term-for-term from
//! the reference runtime's `unit_simplify`/`do_simplify` dispatch and its
//! `simplify_neg`/`simplify_power`/`simplify_product`/`simplify_sum`
//! helpers, adapted to persistent `Rc<Unit>` trees instead of a
//! GLib-backed mutable node graph.

use std::rc::Rc;

use super::ast::Unit;

/// Simplifies `node` to a canonical form: flattened products/sums, merged
/// like bases, folded scalar coefficients, and powers reduced wherever a
/// scalar exponent makes that possible. Idempotent — simplifying an
/// already-simplified tree returns it unchanged (up to value equality).
pub fn simplify(node: &Unit) -> Unit {
    (*do_simplify(node)).clone()
}

fn do_simplify(node: &Unit) -> Rc<Unit> {
    match node {
        Unit::Expression(inner) => do_simplify(inner),
        Unit::Neg(inner) => simplify_neg(inner),
        Unit::Power(base, exponent) => simplify_power(base, exponent),
        Unit::Product(values) => simplify_product(values),
        Unit::Sum(values) => simplify_sum(values),
        other => Rc::new(other.clone()),
    }
}

fn simplify_neg(inner: &Unit) -> Rc<Unit> {
    let val = do_simplify(inner);
    match &*val {
        Unit::One => Rc::new(Unit::Scalar(-1.0)),
        Unit::Scalar(s) => Rc::new(Unit::Scalar(-s)),
        _ => Rc::new(Unit::Neg(val)),
    }
}

fn simplify_power(base_node: &Unit, exponent_node: &Unit) -> Rc<Unit> {
    let base = do_simplify(base_node);
    let exp = do_simplify(exponent_node);

    if let Unit::Scalar(e) = &*exp {
        if *e == 0.0 {
            return Rc::new(Unit::Scalar(1.0));
        }
        if *e == 1.0 {
            return base;
        }
    }
    if let Unit::One = &*exp {
        return base;
    }
    if let Unit::One = &*base {
        return Rc::new(Unit::Scalar(1.0));
    }

    if let (Unit::Scalar(b), Unit::Scalar(e)) = (&*base, &*exp) {
        return Rc::new(Unit::Scalar(b.powf(*e)));
    }

    // (x^a)^b -> x^(simplify(a * b)), recursing to allow further reduction.
    if let Unit::Power(inner_base, inner_exp) = &*base {
        let combined = simplify_product(&[inner_exp.clone(), exp.clone()]);
        return simplify_power(inner_base, &combined);
    }

    // (a * b * ...)^n -> a^n * b^n * ...
    if let Unit::Product(factors) = &*base {
        let powered: Vec<Rc<Unit>> = factors
            .iter()
            .map(|factor| Rc::new(Unit::Power(factor.clone(), exp.clone())))
            .collect();
        return simplify_product(&powered);
    }

    Rc::new(Unit::Power(base, exp))
}

/// Simplifies each child and flattens nested groups of the same `kind`
/// into this one, dropping identity (`One`) children entirely.
fn flatten(values: &[Rc<Unit>], kind_is_product: bool) -> Vec<Rc<Unit>> {
    let mut flat = Vec::with_capacity(values.len());
    for value in values {
        let child = do_simplify(value);
        match &*child {
            Unit::Product(cv) if kind_is_product => flat.extend(cv.iter().cloned()),
            Unit::Sum(cv) if !kind_is_product => flat.extend(cv.iter().cloned()),
            Unit::One => {}
            _ => flat.push(child),
        }
    }
    flat
}

fn finalize(mut values: Vec<Rc<Unit>>, kind_is_product: bool, identity: f64) -> Rc<Unit> {
    match values.len() {
        0 => Rc::new(Unit::Scalar(identity)),
        1 => values.pop().unwrap(),
        _ => {
            if kind_is_product {
                Rc::new(Unit::Product(values))
            } else {
                Rc::new(Unit::Sum(values))
            }
        }
    }
}

/// A product term split into its scalar coefficient and the remaining
/// (non-scalar) factor, used by `simplify_sum` to group like terms that
/// differ only by a leading numeric coefficient (`3*m + 2*m -> 5*m`).
struct Decomposed {
    coeff: f64,
    base: Rc<Unit>,
}

fn decompose(node: &Rc<Unit>) -> Decomposed {
    let Unit::Product(values) = &**node else {
        return Decomposed { coeff: 1.0, base: node.clone() };
    };

    let mut coeff = 1.0;
    let mut had_scalar = false;
    let mut others = Vec::with_capacity(values.len());
    for value in values {
        if let Unit::Scalar(s) = &**value {
            coeff *= s;
            had_scalar = true;
        } else {
            others.push(value.clone());
        }
    }

    if !had_scalar {
        return Decomposed { coeff: 1.0, base: node.clone() };
    }

    let base = match others.len() {
        0 => Rc::new(Unit::One),
        1 => others.into_iter().next().unwrap(),
        _ => Rc::new(Unit::Product(others)),
    };
    Decomposed { coeff, base }
}

fn simplify_product(values: &[Rc<Unit>]) -> Rc<Unit> {
    let terms = flatten(values, true);

    let mut scalar_acc = 1.0;
    let mut bases: Vec<Rc<Unit>> = Vec::new();
    let mut exps: Vec<Vec<Rc<Unit>>> = Vec::new();

    for term in &terms {
        if let Unit::Scalar(s) = &**term {
            scalar_acc *= s;
            continue;
        }

        let (base, exp_node): (Rc<Unit>, Rc<Unit>) = match &**term {
            Unit::Power(b, e) => (b.clone(), e.clone()),
            _ => (term.clone(), Rc::new(Unit::Scalar(1.0))),
        };

        match bases.iter().position(|b| **b == *base) {
            Some(idx) => exps[idx].push(exp_node),
            None => {
                bases.push(base);
                exps.push(vec![exp_node]);
            }
        }
    }

    let mut new_values = Vec::new();
    if scalar_acc != 1.0 {
        new_values.push(Rc::new(Unit::Scalar(scalar_acc)));
    }

    for (base, eg) in bases.into_iter().zip(exps.into_iter()) {
        let total_exp = if eg.len() == 1 {
            eg.into_iter().next().unwrap()
        } else {
            simplify_sum(&eg)
        };

        if let Unit::Scalar(s) = &*total_exp {
            if *s == 0.0 {
                continue;
            }
            if *s == 1.0 {
                new_values.push(base);
                continue;
            }
        }

        new_values.push(Rc::new(Unit::Power(base, total_exp)));
    }

    finalize(new_values, true, 1.0)
}

fn simplify_sum(values: &[Rc<Unit>]) -> Rc<Unit> {
    let terms = flatten(values, false);

    let mut scalar_acc = 0.0;
    let mut bases: Vec<Rc<Unit>> = Vec::new();
    let mut coeffs: Vec<f64> = Vec::new();

    for term in &terms {
        if let Unit::Scalar(s) = &**term {
            scalar_acc += s;
            continue;
        }

        let decomposed = decompose(term);
        if let Unit::One = &*decomposed.base {
            scalar_acc += decomposed.coeff;
            continue;
        }

        match bases.iter().position(|b| **b == *decomposed.base) {
            Some(idx) => coeffs[idx] += decomposed.coeff,
            None => {
                bases.push(decomposed.base);
                coeffs.push(decomposed.coeff);
            }
        }
    }

    let mut new_values = Vec::new();
    if scalar_acc != 0.0 {
        new_values.push(Rc::new(Unit::Scalar(scalar_acc)));
    }

    for (base, total_coeff) in bases.into_iter().zip(coeffs.into_iter()) {
        if total_coeff == 0.0 {
            continue;
        }
        if total_coeff == 1.0 {
            new_values.push(base);
            continue;
        }

        let mut factors = vec![Rc::new(Unit::Scalar(total_coeff))];
        match &*base {
            Unit::Product(bv) => factors.extend(bv.iter().cloned()),
            _ => factors.push(base),
        }
        new_values.push(Rc::new(Unit::Product(factors)));
    }

    finalize(new_values, false, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str, n: u16) -> Unit {
        Unit::identifier(name, n)
    }

    #[test]
    fn folds_scalar_products() {
        let expr = Unit::product_of([Unit::scalar(2.0), Unit::scalar(3.0)]);
        assert_eq!(simplify(&expr), Unit::scalar(6.0));
    }

    #[test]
    fn merges_like_bases_in_product() {
        let m = id("m", 0);
        let expr = Unit::product_of([m.clone(), m.clone()]);
        let got = simplify(&expr);
        assert_eq!(got, Unit::power(m, Unit::scalar(2.0)));
    }

    #[test]
    fn merges_like_bases_in_sum() {
        let m = id("m", 0);
        let expr = Unit::sum_of([
            Unit::product_of([Unit::scalar(3.0), m.clone()]),
            Unit::product_of([Unit::scalar(2.0), m.clone()]),
        ]);
        let got = simplify(&expr);
        assert_eq!(got, Unit::product_of([Unit::scalar(5.0), m]));
    }

    #[test]
    fn power_of_one_exponent_is_identity() {
        let m = id("m", 0);
        let expr = Unit::power(m.clone(), Unit::scalar(1.0));
        assert_eq!(simplify(&expr), m);
    }

    #[test]
    fn power_of_zero_exponent_is_one() {
        let m = id("m", 0);
        let expr = Unit::power(m, Unit::scalar(0.0));
        assert_eq!(simplify(&expr), Unit::scalar(1.0));
    }

    #[test]
    fn nested_power_multiplies_exponents() {
        let m = id("m", 0);
        let expr = Unit::power(Unit::power(m.clone(), Unit::scalar(2.0)), Unit::scalar(3.0));
        assert_eq!(simplify(&expr), Unit::power(m, Unit::scalar(6.0)));
    }

    #[test]
    fn product_is_order_insensitive_after_simplify() {
        let m = id("m", 0);
        let s = id("s", 1);
        let a = simplify(&Unit::product_of([m.clone(), s.clone()]));
        let b = simplify(&Unit::product_of([s, m]));
        assert_eq!(a, b);
    }

    #[test]
    fn negating_one_is_negative_one() {
        assert_eq!(simplify(&Unit::neg(Unit::one())), Unit::scalar(-1.0));
    }
}

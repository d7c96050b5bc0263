//! A faithful C `%g` formatter, shared by number display (spec.md §4.3.5,
//! `eval.c:101`'s `g_string_printf(out, "%g", value)`) and unit-scalar
//! display (`units.c:102`'s identical call). `%g` picks 6 significant
//! digits, switches to exponential once the decimal exponent is < -4 or
//! >= 6, and always strips trailing zeros (and a bare trailing `.`).

const SIG_DIGITS: i32 = 6;

/// Formats `value` exactly the way C's `printf("%g", value)` would.
pub fn format_g(value: f64) -> String {
    if value == 0.0 {
        return if value.is_sign_negative() { "-0".to_string() } else { "0".to_string() };
    }
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-inf".to_string() } else { "inf".to_string() };
    }

    let neg = value.is_sign_negative();
    let abs = value.abs();

    // Round to SIG_DIGITS significant digits via scientific notation first,
    // so the exponent reflects any rounding carry (e.g. 999999.6 -> 1e6)
    // before deciding between fixed and exponential style.
    let sci = format!("{:.*e}", (SIG_DIGITS - 1) as usize, abs);
    let (mantissa, exp_str) = sci.split_once('e').expect("scientific notation always has an 'e'");
    let exponent: i32 = exp_str.parse().expect("exponent is always a plain integer");

    let body = if exponent < -4 || exponent >= SIG_DIGITS {
        let mantissa = strip_trailing_zeros(mantissa);
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.abs())
    } else {
        let decimals = (SIG_DIGITS - 1 - exponent).max(0) as usize;
        strip_trailing_zeros(&format!("{:.*}", decimals, abs))
    };

    if neg {
        format!("-{body}")
    } else {
        body
    }
}

fn strip_trailing_zeros(s: &str) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_render_without_a_decimal_point() {
        assert_eq!(format_g(5.0), "5");
        assert_eq!(format_g(-5.0), "-5");
        assert_eq!(format_g(0.0), "0");
    }

    #[test]
    fn large_magnitudes_switch_to_exponential() {
        assert_eq!(format_g(1234567.0), "1.23457e+06");
    }

    #[test]
    fn six_significant_digits_with_trailing_zeros_stripped() {
        assert_eq!(format_g(10.0 / 3.0), "3.33333");
    }

    #[test]
    fn small_magnitudes_switch_to_exponential_past_the_threshold() {
        assert_eq!(format_g(0.0001), "0.0001");
        assert_eq!(format_g(0.00001), "1e-05");
    }

    #[test]
    fn rounding_carry_bumps_the_exponent_into_scientific_range() {
        assert_eq!(format_g(999999.6), "1e+06");
    }
}

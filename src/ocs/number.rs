//! Float text in the legacy wire form.
//!
//! Both encoders print the shortest digits that round-trip, never a
//! trailing `.0`. They differ in when they switch to exponent form:
//!
//! ```text
//! JSON  below 1e-6 or from 1e21       1e-7   1e+21
//! XML   below 1e-4 or from 1e6        1e-05  1e+06
//! ```

/// Shortest round-trip digits of `abs` and the position of the decimal
/// point relative to them.
fn shortest_digits(abs: f64) -> (String, i32) {
    // `{:e}` prints the shortest digits, e.g. `1.2345e-7`
    let sci = format!("{abs:e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let digits = mantissa.chars().filter(|c| *c != '.').collect();
    (digits, exp + 1)
}

fn fixed(digits: &str, point: i32) -> String {
    let len = digits.len() as i32;
    if point <= 0 {
        format!("0.{}{}", "0".repeat(point.unsigned_abs() as usize), digits)
    } else if point >= len {
        format!("{}{}", digits, "0".repeat((point - len) as usize))
    } else {
        let (int, frac) = digits.split_at(point as usize);
        format!("{int}.{frac}")
    }
}

fn exponent(digits: &str, point: i32, min_exp_digits: usize) -> String {
    let (first, rest) = digits.split_at(1);
    let exp = point - 1;
    let mut out = String::from(first);
    if !rest.is_empty() {
        out.push('.');
        out.push_str(rest);
    }
    out.push('e');
    out.push(if exp < 0 { '-' } else { '+' });
    out.push_str(&format!(
        "{:0width$}",
        exp.unsigned_abs(),
        width = min_exp_digits
    ));
    out
}

fn signed(value: f64, body: String) -> String {
    if value.is_sign_negative() {
        format!("-{body}")
    } else {
        body
    }
}

/// JSON text of a finite float.
pub(crate) fn json_float(value: f64) -> String {
    let abs = value.abs();
    let (digits, point) = shortest_digits(abs);
    let body = if abs != 0.0 && !(1e-6..1e21).contains(&abs) {
        exponent(&digits, point, 1)
    } else {
        fixed(&digits, point)
    };
    signed(value, body)
}

/// XML text of a finite float.
pub(crate) fn xml_float(value: f64) -> String {
    let (digits, point) = shortest_digits(value.abs());
    let exp = point - 1;
    let body = if exp < -4 || exp >= 6 {
        exponent(&digits, point, 2)
    } else {
        fixed(&digits, point)
    };
    signed(value, body)
}

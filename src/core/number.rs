// Shared numeric conversion helpers used by the value operators

use crate::unicode::{utf16_to_utf8, utf16_trim};

const TWO_32: f64 = 2_i64.pow(32) as f64; // 2^32

/// JS ToInteger semantics for Number inputs
pub fn to_integer(n: f64) -> f64 {
    if n.is_nan() {
        0.0
    } else if n == 0.0 || n.is_infinite() {
        n
    } else {
        n.trunc()
    }
}

/// JS ToInt32 semantics for Number inputs
pub fn to_int32(n: f64) -> i32 {
    if !n.is_finite() || n == 0.0 {
        return 0;
    }
    let int = n.trunc();
    let int32bit = ((int % TWO_32) + TWO_32) % TWO_32;
    if int32bit >= TWO_32 / 2.0 {
        (int32bit - TWO_32) as i32
    } else {
        int32bit as i32
    }
}

/// JS ToUint32 semantics for Number inputs
pub fn to_uint32(n: f64) -> u32 {
    if !n.is_finite() {
        return 0_u32;
    }
    let int = n.trunc();
    let u = ((int % TWO_32) + TWO_32) % TWO_32;
    u as u32
}

/// JS ToUint16 semantics for Number inputs. 2^16 divides 2^32, so the low half of
/// ToUint32 is the same residue.
pub fn to_uint16(n: f64) -> u16 {
    (to_uint32(n) & 0xFFFF) as u16
}

/// Number::toString for radix 10.
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    // ToString(-0) is "0"
    if n == 0.0 {
        return "0".to_string();
    }
    if n.is_infinite() {
        return if n.is_sign_negative() { "-Infinity" } else { "Infinity" }.to_string();
    }
    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        // Display never switches to exponent notation and already yields the shortest
        // digits that round-trip.
        return format!("{}", n);
    }
    let s = format!("{:e}", n);
    match s.split_once('e') {
        Some((mantissa, exp)) => match exp.parse::<i32>() {
            Ok(exp) => format!("{}e{:+}", mantissa, exp),
            Err(_) => s,
        },
        None => s,
    }
}

/// ToNumber applied to the String type (StringNumericLiteral grammar).
pub fn string_to_number(units: &[u16]) -> f64 {
    let trimmed = utf16_trim(units);
    if trimmed.is_empty() {
        return 0.0;
    }
    let s = utf16_to_utf8(trimmed);
    match s.as_str() {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return parse_hex_digits(hex);
    }
    if !is_str_decimal_literal(&s) {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_hex_digits(digits: &str) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    let mut acc = 0.0_f64;
    for c in digits.chars() {
        match c.to_digit(16) {
            Some(d) => acc = acc * 16.0 + d as f64,
            None => return f64::NAN,
        }
    }
    acc
}

// Rust's float parser also accepts "inf", "nan" and "infinity"; those must stay NaN here.
fn is_str_decimal_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }
    if digits == 0 {
        return false;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }
    i == bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unicode::utf8_to_utf16;

    fn num(s: &str) -> f64 {
        string_to_number(&utf8_to_utf16(s))
    }

    #[test]
    fn int32_wraps_modulo_two_pow_32() {
        assert_eq!(to_int32(2147483648.0), -2147483648);
        assert_eq!(to_int32(4294967297.0), 1);
        assert_eq!(to_int32(-1.9), -1);
        assert_eq!(to_int32(f64::NAN), 0);
        assert_eq!(to_int32(f64::INFINITY), 0);
    }

    #[test]
    fn uint_conversions() {
        assert_eq!(to_uint32(-1.0), 4294967295);
        assert_eq!(to_uint32(4294967296.5), 0);
        assert_eq!(to_uint16(65537.0), 1);
        assert_eq!(to_uint16(-1.0), 65535);
    }

    #[test]
    fn to_integer_truncates_toward_zero() {
        assert_eq!(to_integer(-3.7), -3.0);
        assert_eq!(to_integer(3.7), 3.0);
        assert_eq!(to_integer(f64::NAN), 0.0);
        assert_eq!(to_integer(f64::NEG_INFINITY), f64::NEG_INFINITY);
    }

    #[test]
    fn formats_numbers_like_ecmascript() {
        assert_eq!(number_to_string(-0.0), "0");
        assert_eq!(number_to_string(1.0), "1");
        assert_eq!(number_to_string(0.1), "0.1");
        assert_eq!(number_to_string(-2.5), "-2.5");
        assert_eq!(number_to_string(1e21), "1e+21");
        assert_eq!(number_to_string(1.5e-7), "1.5e-7");
        assert_eq!(number_to_string(123456789012345680000.0), "123456789012345680000");
        assert_eq!(number_to_string(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(number_to_string(f64::NAN), "NaN");
    }

    #[test]
    fn parses_string_numeric_literals() {
        assert_eq!(num(""), 0.0);
        assert_eq!(num("   "), 0.0);
        assert_eq!(num(" 42 "), 42.0);
        assert_eq!(num("-1.5e3"), -1500.0);
        assert_eq!(num(".5"), 0.5);
        assert_eq!(num("5."), 5.0);
        assert_eq!(num("0x1F"), 31.0);
        assert_eq!(num("-Infinity"), f64::NEG_INFINITY);
        assert!(num("inf").is_nan());
        assert!(num("nan").is_nan());
        assert!(num("1e").is_nan());
        assert!(num("0x").is_nan());
        assert!(num("12px").is_nan());
        assert!(num(".").is_nan());
    }
}

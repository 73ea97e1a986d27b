use std::str;

/// Suppresses floating point representation noise beyond ten decimal
/// digits: `0.1 + 0.2` becomes exactly `0.3`
pub fn round_result(v: f64) -> f64 {
    (v * 1e10).round() / 1e10
}

const F64_BUF_LEN: usize = 48;

/// Renders a float with the shortest representation that parses back to the
/// same value. Integral results lose the trailing `.0` so `120.0` displays
/// as `120`
pub fn format_f64(g: f64) -> String {
    let mut buf = [b'\0'; F64_BUF_LEN];
    let s = match dtoa::write(&mut buf[..], g) {
        Ok(len) => match str::from_utf8(&buf[..len]) {
            Ok(s) => s.to_string(),
            Err(..) => format!("{}", g),
        },
        Err(..) => format!("{}", g),
    };
    match s.strip_suffix(".0") {
        Some(stripped) => stripped.to_string(),
        None => s,
    }
}

/// Groups the integer part of a plain numeric string with thousands
/// separators and keeps fractional digits verbatim. Text that is not a plain
/// number (an expression still being typed) is returned unchanged
pub fn display_number(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(p) => (&unsigned[..p], Some(&unsigned[p + 1..])),
        None => (unsigned, None),
    };
    if int_part.is_empty() || !int_part.chars().all(|c| c.is_ascii_digit()) {
        return text.to_string();
    }
    if let Some(frac) = frac_part {
        if !frac.chars().all(|c| c.is_ascii_digit()) {
            return text.to_string();
        }
    }

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i != 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_result() {
        assert_eq!(round_result(0.1 + 0.2), 0.3);
        assert_eq!(round_result(0.30000000000000004), 0.3);
        assert_eq!(round_result(120.0), 120.0);
        assert_eq!(round_result(-1.00000000000001), -1.0);
    }

    #[test]
    fn test_format_f64() {
        assert_eq!(format_f64(120.0), "120");
        assert_eq!(format_f64(0.3), "0.3");
        assert_eq!(format_f64(-2.5), "-2.5");
        assert_eq!(format_f64(0.0), "0");
    }

    #[test]
    fn test_display_number() {
        assert_eq!(display_number("1234567"), "1,234,567");
        assert_eq!(display_number("1234567.891"), "1,234,567.891");
        assert_eq!(display_number("-1000"), "-1,000");
        assert_eq!(display_number("12"), "12");
        assert_eq!(display_number("0.5"), "0.5");
        // fractional digits stay verbatim
        assert_eq!(display_number("1000.10000"), "1,000.10000");
        // in-progress expressions pass through
        assert_eq!(display_number("(1+2"), "(1+2");
        assert_eq!(display_number(""), "");
    }
}

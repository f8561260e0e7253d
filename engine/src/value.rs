//! FILENAME: engine/src/value.rs
//! Lenient numeric parsing for spreadsheet cell text.
//!
//! The upstream sheets mix plain numbers with annotated text like
//! "85 ราย" or "12.5%". Parsing takes the longest leading numeric
//! prefix and ignores the rest, so annotated cells still yield their
//! numeric value.

/// Parses the longest numeric prefix of `s`, after skipping leading
/// whitespace. Returns `None` when no digits are present at the start.
///
/// Accepts an optional sign, a decimal point, and an exponent part.
/// "85 ราย" parses to 85.0; "abc85" parses to nothing.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut i = 0;

    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if i < bytes.len() && bytes[i] == b'.' {
        let dot = i;
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - frac_start;
        if int_digits == 0 && frac_digits == 0 {
            // A lone "." or ".x" with no digits anywhere is not a number.
            i = dot;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // Optional exponent. Only consumed when it is well formed; a
    // trailing "e" with no digits is left out of the number.
    let mantissa_end = i;
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        } else {
            i = mantissa_end;
        }
    }

    s[..i].parse::<f64>().ok()
}

/// Like [`parse_float_prefix`], but yields NaN on failure so callers
/// that feed the result into comparisons get the "always false"
/// behaviour instead of a branch.
pub fn parse_float_prefix_or_nan(s: &str) -> f64 {
    parse_float_prefix(s).unwrap_or(f64::NAN)
}

/// Renders a float the way the sheet displays it: whole values drop
/// the fractional part ("50", not "50.0").
pub fn render_number(n: f64) -> String {
    format!("{}", n)
}

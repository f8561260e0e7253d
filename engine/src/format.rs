//! FILENAME: engine/src/format.rs
//! Display formatting for cell values and percentages.

use crate::record::RawValue;
use crate::value::parse_float_prefix;

/// Formats a cell for display with thousands separators. Cells that
/// do not start with a number are shown verbatim.
pub fn format_number(value: &RawValue) -> String {
    let text = value.trimmed();
    match parse_float_prefix(&text) {
        Some(n) => group_thousands(n),
        None => text,
    }
}

/// Fixed-digit percentage, e.g. `87.50%` with two digits. No-data
/// values render as an empty string rather than a fake `0%`.
pub fn format_percentage(value: Option<f64>, digits: usize) -> String {
    match value {
        Some(n) if !n.is_nan() => format!("{:.*}%", digits, n),
        _ => String::new(),
    }
}

/// Comma-grouped rendering with at most three fractional digits.
fn group_thousands(n: f64) -> String {
    let rounded = (n * 1000.0).round() / 1000.0;
    let mut s = format!("{}", rounded);

    let negative = s.starts_with('-');
    if negative {
        s.remove(0);
    }
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (s, None),
    };

    let mut grouped = String::new();
    let digits: Vec<char> = int_part.chars().collect();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(&f);
    }
    out
}

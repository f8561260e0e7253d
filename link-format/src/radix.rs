//! FILENAME: link-format/src/radix.rs
//! Base-36 rendering for token segments.

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8(buf).unwrap_or_default()
}

/// Case-insensitive base-36 parse. `None` for the empty string or any
/// character outside `[0-9a-z]`.
pub fn from_base36(s: &str) -> Option<u64> {
    if s.is_empty() {
        return None;
    }
    let mut n: u64 = 0;
    for c in s.chars() {
        let d = c.to_ascii_lowercase().to_digit(36)?;
        n = n.checked_mul(36)?.checked_add(d as u64)?;
    }
    Some(n)
}

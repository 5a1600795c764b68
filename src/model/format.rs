//! Human-readable byte formatting for file sizes.

/// Format a byte count as a short human-readable string.
///
/// Divides by 1024 through `B`, `KB`, `MB`, `GB`. Values under 10 in a
/// non-byte unit get one decimal place; everything else is rounded to a
/// whole number. Zero formats as `"0 B"`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut n = bytes as f64;
    let mut unit = 0;
    while n >= 1024.0 && unit < UNITS.len() - 1 {
        n /= 1024.0;
        unit += 1;
    }

    let decimals = if unit == 0 {
        0
    } else if n < 10.0 {
        1
    } else {
        0
    };
    format!("{:.*} {}", decimals, n, UNITS[unit])
}

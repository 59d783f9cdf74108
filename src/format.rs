//! Display Formatting
//!
//! Number helpers for creative cards and the result header.

/// Compact count: `950`, `1.2k`, `12.0k`
pub fn compact(n: u64) -> String {
    if n >= 1000 {
        format!("{:.1}k", n as f64 / 1000.0)
    } else {
        n.to_string()
    }
}

/// Click-through rate as a percentage with two decimals, `0%` without data
pub fn ctr(clicks: u64, impressions: u64) -> String {
    if clicks == 0 || impressions == 0 {
        return "0%".to_string();
    }
    format!("{:.2}%", clicks as f64 / impressions as f64 * 100.0)
}

/// Integer with thousands separators: `12,345`
pub fn grouped(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

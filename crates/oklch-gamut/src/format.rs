//! Number formatting shared by the text encodings.

/// Format with at most `decimals` fractional digits, trimming trailing
/// zeros (and a trailing dot). Negative zero prints as `0`.
pub(crate) fn number(value: f64, decimals: usize) -> String {
    let s = format!("{:.*}", decimals, value);
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s.as_str()
    };
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Round to `decimals` fractional digits. The result is the same double
/// that parsing the [`number`] output would give back.
pub(crate) fn round_to(value: f64, decimals: usize) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

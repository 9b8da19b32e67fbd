//! sRGB transfer function
//!
//! IEC 61966-2-1 piecewise curve. Display P3 uses the same curve, so both
//! encoded spaces share these two functions.

/// Decode a gamma-encoded channel (0.0..=1.0) to linear light.
#[inline]
pub fn decode(encoded: f64) -> f64 {
    if encoded <= 0.04045 {
        encoded / 12.92
    } else {
        ((encoded + 0.055) / 1.055).powf(2.4)
    }
}

/// Encode a linear channel (0.0..=1.0) with the sRGB gamma curve.
///
/// # Panics (debug only)
/// Debug-asserts that the input is in the range 0.0..=1.0.
#[inline]
pub fn encode(linear: f64) -> f64 {
    debug_assert!(
        (0.0..=1.0).contains(&linear),
        "encode: input {linear} out of range 0.0..=1.0"
    );

    if linear <= 0.003_130_8 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert!((decode(0.0) - 0.0).abs() < 1e-12);
        assert!((decode(1.0) - 1.0).abs() < 1e-12);
        assert!((encode(0.0) - 0.0).abs() < 1e-12);
        assert!((encode(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_round_trip() {
        for i in 0..=1000 {
            let v = i as f64 / 1000.0;
            assert!(
                (encode(decode(v)) - v).abs() < 1e-12,
                "round trip failed at {v}"
            );
        }
    }

    #[test]
    fn test_monotonicity() {
        let mut prev_decoded = decode(0.0);
        let mut prev_encoded = encode(0.0);
        for i in 1..=1000 {
            let v = i as f64 / 1000.0;
            let d = decode(v);
            let e = encode(v);
            assert!(d >= prev_decoded, "decode not monotonic at {i}");
            assert!(e >= prev_encoded, "encode not monotonic at {i}");
            prev_decoded = d;
            prev_encoded = e;
        }
    }

    #[test]
    fn test_linear_segment() {
        // Below the knee the curve is a straight line
        assert!((decode(0.04) - 0.04 / 12.92).abs() < 1e-12);
        assert!((encode(0.003) - 0.003 * 12.92).abs() < 1e-12);
    }
}

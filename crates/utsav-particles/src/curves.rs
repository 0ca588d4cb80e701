//! Value-over-lifetime curves

/// Linear interpolation between two floats
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Opacity for a normalized age in [0, 1].
///
/// Starts at 1, reaches exactly 0 at `age_ratio = 1`, and never increases.
/// `exponent = 1` is a linear fade; larger values drop off faster early on.
pub fn fade(age_ratio: f32, exponent: f32) -> f32 {
    let remaining = (1.0 - age_ratio.clamp(0.0, 1.0)).max(0.0);
    if exponent == 1.0 {
        remaining
    } else {
        remaining.powf(exponent.max(f32::EPSILON))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_f32_endpoints() {
        assert!((lerp_f32(0.0, 10.0, 0.0) - 0.0).abs() < 1e-6);
        assert!((lerp_f32(0.0, 10.0, 1.0) - 10.0).abs() < 1e-6);
        assert!((lerp_f32(0.0, 10.0, 0.5) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn fade_endpoints() {
        for exponent in [1.0, 1.2, 2.0] {
            assert!((fade(0.0, exponent) - 1.0).abs() < 1e-6);
            assert_eq!(fade(1.0, exponent), 0.0);
            assert_eq!(fade(3.0, exponent), 0.0);
            assert!((fade(-1.0, exponent) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn fade_is_monotonic() {
        for exponent in [1.0, 1.2] {
            let mut last = f32::INFINITY;
            for step in 0..=100 {
                let v = fade(step as f32 / 100.0, exponent);
                assert!(v <= last);
                last = v;
            }
        }
    }
}

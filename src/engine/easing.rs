//! Easing curve used by scroll and toggle animations.

/// Cubic ease-in-out over `t` in `[0, 1]`.
pub fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        0.5 * (t * 2.0).powi(3)
    } else {
        0.5 * (t * 2.0 - 2.0).powi(3) + 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_fixed() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert_eq!(ease_in_out(0.5), 0.5);
    }

    #[test]
    fn is_monotonic() {
        let samples: Vec<f64> = (0..=100).map(|i| ease_in_out(i as f64 / 100.0)).collect();
        assert!(samples.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn is_symmetric_about_midpoint() {
        for i in 0..=50 {
            let t = i as f64 / 100.0;
            let lhs = ease_in_out(t);
            let rhs = 1.0 - ease_in_out(1.0 - t);
            assert!((lhs - rhs).abs() < 1e-12, "asymmetry at t={t}");
        }
    }
}

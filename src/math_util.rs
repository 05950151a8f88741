use std::f32::consts::PI;

pub const TWO_PI: f32 = PI * 2.0;
pub const ONE_OVER_TWO_PI: f32 = 1.0 / TWO_PI;

/// Wraps an angle in radians into (-pi, pi].
///
/// Uses the multiply-by-reciprocal form: `wrap_pi(PI)` stays `PI` instead of
/// flipping to `-PI`, and downstream canonicalization depends on that parity.
pub fn wrap_pi(theta: f32) -> f32 {
    let mut theta = theta + PI;
    theta -= (theta * ONE_OVER_TWO_PI).floor() * TWO_PI;
    theta - PI
}

/// Epsilon comparison for near-zero denominators in homogeneous divides.
pub fn float_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-6
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn wrap_pi_keeps_angles_already_in_range() {
        assert_eq!(wrap_pi(0.0), 0.0);
        assert!((wrap_pi(1.0) - 1.0).abs() < 1e-6);
        assert!((wrap_pi(-FRAC_PI_2) + FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn wrap_pi_wraps_out_of_range_angles() {
        assert!((wrap_pi(5.0) - (5.0 - TWO_PI)).abs() < 1e-5);
        assert!((wrap_pi(-5.0) - (TWO_PI - 5.0)).abs() < 1e-5);
        assert!((wrap_pi(4.0 * PI + 0.5) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn wrap_pi_maps_positive_pi_to_positive_pi() {
        // The pi boundary keeps its sign.
        assert_eq!(wrap_pi(PI), PI);
    }

    #[test]
    fn float_eq_is_a_narrow_band() {
        assert!(float_eq(1.0, 1.0));
        assert!(float_eq(0.0, 1e-7));
        assert!(!float_eq(0.0, 1e-3));
    }
}

/// Exponent of the Coulomb-matrix self-interaction term (Rupp et al. convention).
const SELF_INTERACTION_EXPONENT: f64 = 2.4;

/// Smooth shifted-cosine taper from 1 to 0 over `[cutoff - smooth_width, cutoff]`.
///
/// Below the onset the value is exactly 1; at and beyond the cutoff it is
/// exactly 0. A zero smooth width degenerates to a hard step at the cutoff.
#[inline]
pub fn shifted_cosine(dist: f64, cutoff: f64, smooth_width: f64) -> f64 {
    if dist >= cutoff {
        return 0.0;
    }
    let onset = cutoff - smooth_width;
    if smooth_width <= 0.0 || dist <= onset {
        return 1.0;
    }
    0.5 * (1.0 + (std::f64::consts::PI * (dist - onset) / smooth_width).cos())
}

/// Decay multiplier for an interaction entry at the given distance.
///
/// A negative `smooth_width` disables smoothing entirely: the factor is a step
/// function, 1 inside the cutoff and 0 outside.
#[inline]
pub fn decay_factor(dist: f64, cutoff: f64, smooth_width: f64) -> f64 {
    if smooth_width < 0.0 {
        if dist < cutoff { 1.0 } else { 0.0 }
    } else {
        shifted_cosine(dist, cutoff, smooth_width)
    }
}

/// Bare inverse-distance charge-product interaction between two distinct atoms.
#[inline]
pub fn coulomb_pair(charge_a: f64, charge_b: f64, dist: f64) -> f64 {
    if dist < 1e-6 {
        return charge_a.signum() * charge_b.signum() * 1e10;
    }
    charge_a * charge_b / dist
}

/// Self-interaction of an atom with itself (the matrix diagonal).
#[inline]
pub fn coulomb_self(charge: f64) -> f64 {
    0.5 * charge.abs().powf(SELF_INTERACTION_EXPONENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn shifted_cosine_is_one_below_the_onset() {
        assert_eq!(shifted_cosine(1.0, 4.0, 1.0), 1.0);
        assert_eq!(shifted_cosine(3.0, 4.0, 1.0), 1.0);
    }

    #[test]
    fn shifted_cosine_is_exactly_zero_at_and_beyond_the_cutoff() {
        assert!(f64_approx_equal(shifted_cosine(4.0, 4.0, 1.0), 0.0));
        assert_eq!(shifted_cosine(5.0, 4.0, 1.0), 0.0);
    }

    #[test]
    fn shifted_cosine_is_one_half_at_the_midpoint() {
        assert!(f64_approx_equal(shifted_cosine(3.5, 4.0, 1.0), 0.5));
    }

    #[test]
    fn shifted_cosine_is_monotonically_non_increasing() {
        let mut previous = f64::INFINITY;
        for step in 0..=400 {
            let dist = 0.01 * f64::from(step);
            let value = shifted_cosine(dist, 4.0, 1.5);
            assert!(value <= previous + TOLERANCE);
            previous = value;
        }
    }

    #[test]
    fn zero_smooth_width_is_a_hard_step() {
        assert_eq!(shifted_cosine(3.999, 4.0, 0.0), 1.0);
        assert_eq!(shifted_cosine(4.0, 4.0, 0.0), 0.0);
    }

    #[test]
    fn negative_smooth_width_disables_decay() {
        assert_eq!(decay_factor(3.999, 4.0, -1.0), 1.0);
        assert_eq!(decay_factor(4.0, 4.0, -1.0), 0.0);
        assert_eq!(decay_factor(4.5, 4.0, -1.0), 0.0);
    }

    #[test]
    fn decay_factor_with_non_negative_width_matches_the_taper() {
        for &d in &[0.5, 3.2, 3.7, 4.0, 4.3] {
            assert!(f64_approx_equal(
                decay_factor(d, 4.0, 0.8),
                shifted_cosine(d, 4.0, 0.8)
            ));
        }
    }

    #[test]
    fn coulomb_pair_follows_inverse_distance_law() {
        assert!(f64_approx_equal(coulomb_pair(1.0, 1.0, 1.0), 1.0));
        assert!(f64_approx_equal(coulomb_pair(6.0, 8.0, 2.0), 24.0));
        assert!(f64_approx_equal(coulomb_pair(1.0, -1.0, 2.0), -0.5));
    }

    #[test]
    fn coulomb_pair_at_very_small_distance_returns_large_value_with_correct_sign() {
        assert!(f64_approx_equal(coulomb_pair(1.0, 1.0, 1e-9), 1e10));
        assert!(f64_approx_equal(coulomb_pair(-1.0, 1.0, 1e-9), -1e10));
    }

    #[test]
    fn coulomb_self_uses_the_species_dependent_constant() {
        assert!(f64_approx_equal(coulomb_self(1.0), 0.5));
        assert!(f64_approx_equal(coulomb_self(6.0), 0.5 * 6.0f64.powf(2.4)));
    }
}

use nalgebra::Vector3;
use std::f64::consts::PI;

/// Number of real spherical harmonics up to and including degree `l_max`.
#[inline]
pub fn harmonic_count(l_max: usize) -> usize {
    (l_max + 1) * (l_max + 1)
}

/// Flat index of the real harmonic `(l, m)` in the output of
/// [`real_spherical_harmonics`]: `l^2 + l + m`.
#[inline]
pub fn harmonic_index(l: usize, m: isize) -> usize {
    l * l + (l as isize + m) as usize
}

/// Evaluates all real spherical harmonics up to degree `l_max` in the given
/// direction.
///
/// The direction need not be normalized; only its orientation matters. Values
/// are returned in a flat vector indexed by [`harmonic_index`], using the
/// standard real-harmonic convention
///
/// - `Y_l0   = K(l, 0) P_l^0(cos θ)`
/// - `Y_lm   = √2 K(l, m) cos(mφ) P_l^m(cos θ)` for `m > 0`
/// - `Y_l,-m = √2 K(l, m) sin(mφ) P_l^m(cos θ)` for `m > 0`
///
/// with `K(l, m) = sqrt((2l + 1)/(4π) · (l − m)!/(l + m)!)` and
/// Condon–Shortley-free associated Legendre polynomials. The zero direction has
/// no defined orientation and evaluates to all zeros.
pub fn real_spherical_harmonics(l_max: usize, direction: &Vector3<f64>) -> Vec<f64> {
    let mut out = vec![0.0; harmonic_count(l_max)];
    let r = direction.norm();
    if r < 1e-12 {
        return out;
    }

    let cos_theta = direction.z / r;
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    let phi = direction.y.atan2(direction.x);

    let legendre = associated_legendre(l_max, cos_theta, sin_theta);

    for l in 0..=l_max {
        out[harmonic_index(l, 0)] = normalization(l, 0) * legendre[legendre_index(l, 0)];
        for m in 1..=l {
            let k = std::f64::consts::SQRT_2 * normalization(l, m);
            let p = legendre[legendre_index(l, m)];
            let m_phi = m as f64 * phi;
            out[harmonic_index(l, m as isize)] = k * m_phi.cos() * p;
            out[harmonic_index(l, -(m as isize))] = k * m_phi.sin() * p;
        }
    }
    out
}

/// `K(l, m)`: the orthonormalization constant of the real harmonic `(l, m)`.
fn normalization(l: usize, m: usize) -> f64 {
    let mut ratio = 1.0;
    // (l - m)! / (l + m)! computed as a running product to stay in range.
    for k in (l - m + 1)..=(l + m) {
        ratio /= k as f64;
    }
    ((2 * l + 1) as f64 / (4.0 * PI) * ratio).sqrt()
}

/// Index of `P_l^m` in the packed lower-triangular Legendre table.
#[inline]
fn legendre_index(l: usize, m: usize) -> usize {
    l * (l + 1) / 2 + m
}

/// Associated Legendre polynomials `P_l^m(cos θ)` for `0 <= m <= l <= l_max`,
/// without the Condon–Shortley phase, via the standard three-term recursions.
fn associated_legendre(l_max: usize, cos_theta: f64, sin_theta: f64) -> Vec<f64> {
    let size = (l_max + 1) * (l_max + 2) / 2;
    let mut table = vec![0.0; size];
    table[legendre_index(0, 0)] = 1.0;

    // Diagonal: P_mm = (2m - 1)!! sin^m θ.
    for m in 1..=l_max {
        table[legendre_index(m, m)] =
            table[legendre_index(m - 1, m - 1)] * (2 * m - 1) as f64 * sin_theta;
    }
    // First off-diagonal: P_{m+1,m} = (2m + 1) cos θ P_mm.
    for m in 0..l_max {
        table[legendre_index(m + 1, m)] =
            (2 * m + 1) as f64 * cos_theta * table[legendre_index(m, m)];
    }
    // Remaining terms by the l-recursion.
    for l in 2..=l_max {
        for m in 0..=(l - 2) {
            let a = (2 * l - 1) as f64 * cos_theta * table[legendre_index(l - 1, m)];
            let b = (l + m - 1) as f64 * table[legendre_index(l - 2, m)];
            table[legendre_index(l, m)] = (a - b) / (l - m) as f64;
        }
    }
    table
}

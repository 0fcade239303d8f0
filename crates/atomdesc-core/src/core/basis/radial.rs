use super::BasisError;
use nalgebra::DMatrix;

/// Eigenvalues of the overlap matrix below this threshold mark the basis as
/// numerically singular.
const MIN_OVERLAP_EIGENVALUE: f64 = 1e-10;

/// A truncated, orthonormalized radial basis on `[0, cutoff]`.
///
/// The raw functions are normalized polynomials vanishing at the cutoff,
/// `g_n(r) = N_n (cutoff - r)^(n + 2)` for `n = 0 .. order`, which are smooth,
/// positive, and peak progressively closer to the center. They are not mutually
/// orthogonal, so the basis carries a Löwdin transform `S^(-1/2)` built from
/// the analytic overlap matrix; [`evaluate`](RadialBasis::evaluate) returns the
/// orthonormalized combinations.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialBasis {
    order: usize,
    cutoff: f64,
    transform: DMatrix<f64>,
}

impl RadialBasis {
    /// Builds the basis for the given truncation order and cutoff.
    ///
    /// # Errors
    ///
    /// Returns [`BasisError::InvalidRadialOrder`] for a zero order,
    /// [`BasisError::InvalidCutoff`] for a non-positive or non-finite cutoff,
    /// and [`BasisError::IllConditioned`] when the overlap matrix of the
    /// requested order is numerically singular (orders around 20 and beyond
    /// degrade in double precision).
    pub fn new(order: usize, cutoff: f64) -> Result<Self, BasisError> {
        if order == 0 {
            return Err(BasisError::InvalidRadialOrder(order));
        }
        if !cutoff.is_finite() || cutoff <= 0.0 {
            return Err(BasisError::InvalidCutoff(cutoff));
        }

        let overlap = overlap_matrix(order);
        let transform = inverse_sqrt(overlap, order)?;

        Ok(Self {
            order,
            cutoff,
            transform,
        })
    }

    /// Number of radial functions.
    pub fn order(&self) -> usize {
        self.order
    }

    /// The radial cutoff.
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Evaluates the orthonormalized radial functions at `r`.
    ///
    /// Distances at or beyond the cutoff evaluate to zero in every channel,
    /// matching the compact support of the raw polynomials.
    pub fn evaluate(&self, r: f64) -> Vec<f64> {
        let mut raw = vec![0.0; self.order];
        if r < self.cutoff {
            let base = self.cutoff - r;
            let mut power = base * base; // (cutoff - r)^(n + 2), starting at n = 0
            for n in 0..self.order {
                raw[n] = normalization(n, self.cutoff) * power;
                power *= base;
            }
        }
        (0..self.order)
            .map(|n| {
                (0..self.order)
                    .map(|m| self.transform[(n, m)] * raw[m])
                    .sum()
            })
            .collect()
    }
}

/// `N_n` such that the raw function `g_n` has unit L2 norm on `[0, cutoff]`.
fn normalization(n: usize, cutoff: f64) -> f64 {
    let k = 2 * n as i32 + 5;
    (f64::from(k) / cutoff.powi(k)).sqrt()
}

/// Analytic overlap of the normalized raw functions.
///
/// `S_nm = sqrt((2n + 5)(2m + 5)) / (n + m + 5)`; conveniently cutoff-free.
fn overlap_matrix(order: usize) -> DMatrix<f64> {
    DMatrix::from_fn(order, order, |n, m| {
        let num = ((2 * n + 5) as f64 * (2 * m + 5) as f64).sqrt();
        num / (n + m + 5) as f64
    })
}

/// Löwdin symmetric orthonormalization: `S^(-1/2)` via eigendecomposition.
fn inverse_sqrt(overlap: DMatrix<f64>, order: usize) -> Result<DMatrix<f64>, BasisError> {
    let eigen = overlap.symmetric_eigen();
    if eigen
        .eigenvalues
        .iter()
        .any(|&lambda| lambda < MIN_OVERLAP_EIGENVALUE)
    {
        return Err(BasisError::IllConditioned { order });
    }
    let scaled = DMatrix::from_fn(order, order, |i, j| {
        eigen.eigenvectors[(i, j)] / eigen.eigenvalues[j].sqrt()
    });
    Ok(scaled * eigen.eigenvectors.transpose())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-8;

    /// Trapezoidal L2 inner product of two channel evaluations over [0, cutoff].
    fn inner_product(basis: &RadialBasis, a: usize, b: usize, steps: usize) -> f64 {
        let h = basis.cutoff() / steps as f64;
        let mut acc = 0.0;
        for i in 0..=steps {
            let r = h * i as f64;
            let values = basis.evaluate(r);
            let weight = if i == 0 || i == steps { 0.5 } else { 1.0 };
            acc += weight * values[a] * values[b] * h;
        }
        acc
    }

    #[test]
    fn zero_order_is_rejected() {
        assert_eq!(
            RadialBasis::new(0, 3.0).unwrap_err(),
            BasisError::InvalidRadialOrder(0)
        );
    }

    #[test]
    fn non_positive_cutoff_is_rejected() {
        assert!(matches!(
            RadialBasis::new(4, 0.0),
            Err(BasisError::InvalidCutoff(_))
        ));
        assert!(matches!(
            RadialBasis::new(4, f64::NAN),
            Err(BasisError::InvalidCutoff(_))
        ));
    }

    #[test]
    fn functions_vanish_at_and_beyond_the_cutoff() {
        let basis = RadialBasis::new(5, 4.0).unwrap();
        for &r in &[4.0, 4.5, 100.0] {
            for value in basis.evaluate(r) {
                assert_eq!(value, 0.0);
            }
        }
    }

    #[test]
    fn evaluation_is_finite_and_nonzero_inside_the_support() {
        let basis = RadialBasis::new(4, 3.0).unwrap();
        let values = basis.evaluate(1.0);
        assert_eq!(values.len(), 4);
        assert!(values.iter().all(|v| v.is_finite()));
        assert!(values.iter().any(|v| v.abs() > 1e-6));
    }

    #[test]
    fn orthonormalized_channels_have_unit_norm() {
        let basis = RadialBasis::new(3, 2.5).unwrap();
        for n in 0..3 {
            let norm = inner_product(&basis, n, n, 20_000);
            assert!(
                (norm - 1.0).abs() < 1e-4,
                "channel {n} has norm {norm}, expected 1"
            );
        }
    }

    #[test]
    fn orthonormalized_channels_are_mutually_orthogonal() {
        let basis = RadialBasis::new(3, 2.5).unwrap();
        for n in 0..3 {
            for m in (n + 1)..3 {
                let overlap = inner_product(&basis, n, m, 20_000);
                assert!(
                    overlap.abs() < 1e-4,
                    "channels {n},{m} overlap by {overlap}"
                );
            }
        }
    }

    #[test]
    fn transform_is_symmetric() {
        let basis = RadialBasis::new(6, 3.0).unwrap();
        for i in 0..6 {
            for j in 0..6 {
                assert!((basis.transform[(i, j)] - basis.transform[(j, i)]).abs() < TOLERANCE);
            }
        }
    }

    #[test]
    fn very_high_orders_are_reported_as_ill_conditioned() {
        // The polynomial overlap matrix is Hilbert-like; around order 25 its
        // smallest eigenvalue drops below double precision.
        let result = RadialBasis::new(40, 3.0);
        assert!(matches!(result, Err(BasisError::IllConditioned { .. })));
    }
}

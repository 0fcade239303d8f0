use crate::core::basis::radial::RadialBasis;
use crate::core::basis::spherical::{harmonic_count, real_spherical_harmonics};
use crate::core::interactions;
use crate::core::neighbours::list::NeighbourList;
use crate::engine::config::SphericalExpansionConfig;
use crate::engine::error::EngineError;

/// The spherical-expansion calculator.
///
/// Per center atom, the neighbour density is expanded into coefficients
/// `c[n][l][m] = sum_j f_cut(r_j) R_n(r_j) Y_lm(r_hat_j)` over the neighbours
/// within the cutoff. The feature width
/// `radial_basis_order * (angular_degree + 1)^2` is a closed form of the two
/// truncation orders and does not depend on how many neighbours any center
/// has, so this variant needs no dataset-wide size resolution.
#[derive(Debug, Clone)]
pub struct SphericalExpansionCalculator {
    config: SphericalExpansionConfig,
    radial: RadialBasis,
}

impl SphericalExpansionCalculator {
    /// Creates the calculator, building its orthonormalized radial basis.
    ///
    /// # Errors
    ///
    /// Fails before any structure is processed if the truncation order or the
    /// cutoff is invalid, or the radial overlap matrix is numerically
    /// singular.
    pub fn new(config: SphericalExpansionConfig) -> Result<Self, EngineError> {
        let radial = RadialBasis::new(config.radial_basis_order, config.cutoff)?;
        Ok(Self { config, radial })
    }

    /// Length of each coefficient row.
    pub fn feature_width(&self) -> usize {
        self.config.feature_width()
    }

    /// Computes the expansion coefficients for one center atom.
    ///
    /// A center with no neighbours yields an all-zero row; under-full
    /// neighbourhoods are never an error for this variant.
    pub fn compute_for_center(&self, list: &NeighbourList<'_>, center: usize) -> Vec<f64> {
        let angular_terms = harmonic_count(self.config.angular_degree);
        let mut coefficients = vec![0.0; self.feature_width()];

        for nb in list.neighbours_of(center) {
            // A coincident neighbour has no defined direction; it cannot
            // contribute to an orientation expansion.
            if nb.distance <= 0.0 {
                continue;
            }
            let weight =
                interactions::shifted_cosine(nb.distance, self.config.cutoff, self.config.smooth_width);
            if weight == 0.0 {
                continue;
            }
            let radial = self.radial.evaluate(nb.distance);
            let angular = real_spherical_harmonics(self.config.angular_degree, &nb.offset);
            for (n, r_value) in radial.iter().enumerate() {
                let block = n * angular_terms;
                for (lm, y_value) in angular.iter().enumerate() {
                    coefficients[block + lm] += weight * r_value * y_value;
                }
            }
        }
        coefficients
    }
}

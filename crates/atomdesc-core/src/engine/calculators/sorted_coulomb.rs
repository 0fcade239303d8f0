use crate::core::interactions;
use crate::core::neighbours::list::NeighbourList;
use crate::engine::config::{ResolvedCoulombMatrixConfig, SortingAlgorithm};
use crate::engine::error::EngineError;
use nalgebra::{DMatrix, Vector3};

/// The sorted Coulomb interaction-matrix calculator.
///
/// Per center atom: the center and its neighbours occupy the leading slots of a
/// symmetric `size x size` interaction matrix (virtual zero slots pad under-full
/// neighbourhoods); rows and columns are then sorted by descending row norm,
/// and the upper triangle is packed row-major into a feature row of length
/// `size * (size + 1) / 2`.
///
/// The row-norm sort makes the output invariant under permutation of the input
/// atom order; ties are broken by original slot order, so the transform is
/// fully deterministic.
#[derive(Debug, Clone)]
pub struct SortedCoulombCalculator {
    config: ResolvedCoulombMatrixConfig,
}

impl SortedCoulombCalculator {
    /// Creates the calculator from a resolved configuration.
    pub fn new(config: ResolvedCoulombMatrixConfig) -> Self {
        Self { config }
    }

    /// Length of each packed feature row.
    pub fn feature_width(&self) -> usize {
        self.config.feature_width()
    }

    /// The fixed slot count (resolved size) of the interaction matrix.
    pub fn size(&self) -> usize {
        self.config.size
    }

    /// Computes the packed, sorted interaction matrix for one center atom.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SizeOverflow`] when the neighbourhood occupies
    /// more slots than the resolved size allows; a truncated, silently-wrong
    /// row is never produced.
    pub fn compute_for_center(
        &self,
        list: &NeighbourList<'_>,
        center: usize,
    ) -> Result<Vec<f64>, EngineError> {
        let size = self.config.size;
        let neighbours = list.neighbours_of(center);
        let occupied = neighbours.len() + 1;
        if occupied > size {
            return Err(EngineError::SizeOverflow {
                center,
                occupied,
                size,
            });
        }

        let structure = list.structure();
        let mut offsets: Vec<Vector3<f64>> = Vec::with_capacity(occupied);
        let mut charges: Vec<f64> = Vec::with_capacity(occupied);
        offsets.push(Vector3::zeros());
        charges.push(structure.charge(center));
        for nb in neighbours {
            offsets.push(nb.offset);
            charges.push(structure.charge(nb.index));
        }

        let matrix = self.interaction_matrix(&offsets, &charges);
        let order = match self.config.base.sorting_algorithm {
            SortingAlgorithm::RowNorm => row_norm_order(&matrix),
        };
        Ok(pack_upper_triangle(&matrix, &order))
    }

    /// Assembles the symmetric interaction matrix over the occupied slots;
    /// padding slots stay zero.
    fn interaction_matrix(&self, offsets: &[Vector3<f64>], charges: &[f64]) -> DMatrix<f64> {
        let size = self.config.size;
        let base = &self.config.base;
        let mut matrix = DMatrix::zeros(size, size);

        for p in 0..offsets.len() {
            matrix[(p, p)] = interactions::coulomb_self(charges[p]);
            for q in (p + 1)..offsets.len() {
                let dist = (offsets[q] - offsets[p]).norm();
                let bare = interactions::coulomb_pair(charges[p], charges[q], dist);
                // Entries touching the center decay against the structure-level
                // cutoff; environment-environment entries against the
                // interaction cutoff.
                let factor = if p == 0 {
                    interactions::decay_factor(dist, base.central_cutoff, base.central_decay)
                } else {
                    interactions::decay_factor(dist, base.interaction_cutoff, base.interaction_decay)
                };
                let value = bare * factor;
                matrix[(p, q)] = value;
                matrix[(q, p)] = value;
            }
        }
        matrix
    }
}

/// Slot permutation ordering rows by descending Euclidean norm, ties broken by
/// original slot order (stable sort).
fn row_norm_order(matrix: &DMatrix<f64>) -> Vec<usize> {
    let norms: Vec<f64> = (0..matrix.nrows())
        .map(|row| matrix.row(row).norm())
        .collect();
    let mut order: Vec<usize> = (0..matrix.nrows()).collect();
    order.sort_by(|&a, &b| {
        norms[b]
            .partial_cmp(&norms[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order
}

/// Packs the permuted upper triangle (diagonal included) row-major.
fn pack_upper_triangle(matrix: &DMatrix<f64>, order: &[usize]) -> Vec<f64> {
    let size = order.len();
    let mut packed = Vec::with_capacity(size * (size + 1) / 2);
    for i in 0..size {
        for j in i..size {
            packed.push(matrix[(order[i], order[j])]);
        }
    }
    packed
}

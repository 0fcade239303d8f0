use nalgebra::{Matrix3, Point3, Vector3};
use thiserror::Error;

/// A periodic cell must span a volume above this threshold to be usable.
const MIN_CELL_VOLUME: f64 = 1e-9;

/// Errors arising from malformed structure input.
///
/// These are surfaced per structure; the batch workflow can be configured to
/// skip offending structures instead of aborting the whole computation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("structure has {species} species entries but {positions} positions")]
    CountMismatch { species: usize, positions: usize },

    #[error("structure has {atoms} atoms but {charges} charge entries")]
    ChargeCountMismatch { atoms: usize, charges: usize },

    #[error("periodic cell is degenerate (volume {volume:.3e})")]
    DegenerateCell { volume: f64 },

    #[error("atom {atom} has a non-finite position or charge")]
    NonFiniteAtom { atom: usize },

    #[error("cutoff radius must be positive and finite, got {0}")]
    InvalidCutoff(f64),
}

/// A parallelepiped simulation cell with per-axis periodicity flags.
///
/// The three lattice vectors are stored as the rows of a 3x3 matrix. A cell is
/// validated at construction: the spanned volume must be non-degenerate, since a
/// flat cell makes periodic-image enumeration meaningless.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitCell {
    vectors: Matrix3<f64>,
    periodic: [bool; 3],
}

impl UnitCell {
    /// Creates a cell from three row lattice vectors and periodicity flags.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateCell`] if any axis is periodic and the
    /// cell volume is below the degeneracy threshold.
    pub fn new(vectors: Matrix3<f64>, periodic: [bool; 3]) -> Result<Self, GeometryError> {
        let volume = vectors.determinant().abs();
        if periodic.iter().any(|&p| p) && volume < MIN_CELL_VOLUME {
            return Err(GeometryError::DegenerateCell { volume });
        }
        Ok(Self { vectors, periodic })
    }

    /// Returns the lattice vector along the given axis (0, 1, or 2).
    pub fn lattice_vector(&self, axis: usize) -> Vector3<f64> {
        self.vectors.row(axis).transpose()
    }

    /// Returns true if the cell is periodic along the given axis.
    pub fn is_periodic(&self, axis: usize) -> bool {
        self.periodic[axis]
    }

    /// Returns the cell volume.
    pub fn volume(&self) -> f64 {
        self.vectors.determinant().abs()
    }

    /// Number of cell repeats needed along each axis to cover a sphere of the
    /// given radius around any point in the cell.
    ///
    /// The repeat count along an axis is derived from the perpendicular spacing
    /// between the lattice planes spanned by the other two axes; non-periodic
    /// axes need no repeats.
    pub fn repeats_for_radius(&self, radius: f64) -> [i32; 3] {
        let mut repeats = [0i32; 3];
        let volume = self.volume();
        for axis in 0..3 {
            if !self.periodic[axis] {
                continue;
            }
            let b = self.lattice_vector((axis + 1) % 3);
            let c = self.lattice_vector((axis + 2) % 3);
            let cross_norm = b.cross(&c).norm();
            if cross_norm < MIN_CELL_VOLUME {
                continue;
            }
            let spacing = volume / cross_norm;
            repeats[axis] = (radius / spacing).ceil() as i32;
        }
        repeats
    }

    /// Cartesian translation corresponding to an integer image shift.
    pub fn shift_vector(&self, shift: [i32; 3]) -> Vector3<f64> {
        self.lattice_vector(0) * f64::from(shift[0])
            + self.lattice_vector(1) * f64::from(shift[1])
            + self.lattice_vector(2) * f64::from(shift[2])
    }

    /// Maps a position into the cell along its periodic axes.
    ///
    /// The fractional coordinate along each periodic axis is reduced to
    /// `[0, 1)`; non-periodic components pass through unchanged. Positions
    /// already inside the cell are returned as-is up to floating-point
    /// round-trip error.
    pub fn wrap(&self, position: &Point3<f64>) -> Point3<f64> {
        // Rows are lattice vectors, so cartesian = fractional * vectors.
        let Some(inverse) = self.vectors.transpose().try_inverse() else {
            // A degenerate matrix passes construction only when every axis is
            // aperiodic, in which case there is nothing to wrap.
            return *position;
        };
        let mut fractional = inverse * position.coords;
        for axis in 0..3 {
            if self.periodic[axis] {
                fractional[axis] = fractional[axis].rem_euclid(1.0);
            }
        }
        Point3::from(self.vectors.transpose() * fractional)
    }
}

/// An immutable atomic structure: ordered species, positions, and charges, with
/// an optional periodic cell.
///
/// Validation happens once, at construction; every later stage of the pipeline
/// borrows the structure read-only. The per-atom charge defaults to the species
/// number when not supplied, which reproduces the nuclear-charge convention of
/// the Coulomb-matrix representation.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomicStructure {
    species: Vec<u32>,
    positions: Vec<Point3<f64>>,
    charges: Vec<f64>,
    cell: Option<UnitCell>,
}

impl AtomicStructure {
    /// Creates a structure with charges defaulting to the species numbers.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::CountMismatch`] if the species and position
    /// sequences differ in length.
    pub fn new(
        species: Vec<u32>,
        positions: Vec<Point3<f64>>,
        cell: Option<UnitCell>,
    ) -> Result<Self, GeometryError> {
        let charges = species.iter().map(|&z| f64::from(z)).collect();
        Self::with_charges(species, positions, charges, cell)
    }

    /// Creates a structure with explicit per-atom charges.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::CountMismatch`] or
    /// [`GeometryError::ChargeCountMismatch`] if the input sequences differ in
    /// length.
    pub fn with_charges(
        species: Vec<u32>,
        positions: Vec<Point3<f64>>,
        charges: Vec<f64>,
        cell: Option<UnitCell>,
    ) -> Result<Self, GeometryError> {
        if species.len() != positions.len() {
            return Err(GeometryError::CountMismatch {
                species: species.len(),
                positions: positions.len(),
            });
        }
        if charges.len() != species.len() {
            return Err(GeometryError::ChargeCountMismatch {
                atoms: species.len(),
                charges: charges.len(),
            });
        }
        Ok(Self {
            species,
            positions,
            charges,
            cell,
        })
    }

    /// Number of atoms in the structure.
    pub fn len(&self) -> usize {
        self.species.len()
    }

    /// Returns true if the structure contains no atoms.
    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Species number of the atom at `index`.
    pub fn species(&self, index: usize) -> u32 {
        self.species[index]
    }

    /// Position of the atom at `index`.
    pub fn position(&self, index: usize) -> &Point3<f64> {
        &self.positions[index]
    }

    /// Per-atom scalar attribute (charge) of the atom at `index`.
    pub fn charge(&self, index: usize) -> f64 {
        self.charges[index]
    }

    /// The periodic cell, if the structure has one.
    pub fn cell(&self) -> Option<&UnitCell> {
        self.cell.as_ref()
    }

    /// Checks the numeric content of the structure.
    ///
    /// Shape errors (mismatched counts, degenerate cells) are rejected at
    /// construction; non-finite coordinates or charges are data errors that
    /// typically originate upstream, so they are checked separately, per
    /// structure, where a batch workflow can choose to skip the offender.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonFiniteAtom`] naming the first offending
    /// atom.
    pub fn validate(&self) -> Result<(), GeometryError> {
        for atom in 0..self.len() {
            let position = &self.positions[atom];
            let finite = position.coords.iter().all(|c| c.is_finite())
                && self.charges[atom].is_finite();
            if !finite {
                return Err(GeometryError::NonFiniteAtom { atom });
            }
        }
        Ok(())
    }
}

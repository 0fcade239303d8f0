use crate::core::models::structure::{AtomicStructure, GeometryError};
use nalgebra::Vector3;

/// Pairs closer than this are treated as numerically coincident; `strict` mode
/// drops them as self-overlap artifacts.
const SELF_OVERLAP_TOLERANCE: f64 = 1e-9;

/// One neighbour of a center atom.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbour {
    /// Index of the neighbour atom in the owning structure.
    pub index: usize,
    /// Center-to-neighbour distance.
    pub distance: f64,
    /// Cartesian vector from the center to the (possibly image-shifted) neighbour.
    pub offset: Vector3<f64>,
    /// Periodic-image shift applied to the neighbour, in lattice units.
    pub shift: [i32; 3],
}

/// A cutoff-bounded neighbour list over a borrowed structure.
///
/// The list maps each center atom to the ordered sequence of neighbours within
/// the cutoff radius, counting periodic images separately. It is built in one
/// pass and never mutated; changing the cutoff or the structure means building
/// a new list.
#[derive(Debug)]
pub struct NeighbourList<'a> {
    structure: &'a AtomicStructure,
    cutoff: f64,
    neighbours: Vec<Vec<Neighbour>>,
}

impl<'a> NeighbourList<'a> {
    /// Builds the neighbour list for `structure` with the given cutoff.
    ///
    /// For periodic structures every image shift within the cutoff's reach is
    /// enumerated, so a pair may legitimately appear once per image. Positions
    /// are wrapped into the cell along its periodic axes first; the shift range
    /// is derived from the cell geometry and only covers the cutoff sphere
    /// around in-cell points. An atom is never its own neighbour at the
    /// identity shift; with `strict` enabled, any pair at numerically zero
    /// distance (an atom overlapping its own periodic image) is discarded as
    /// well.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidCutoff`] if the cutoff is non-positive
    /// or non-finite. A structure with zero atoms yields an empty list, not an
    /// error.
    pub fn build(
        structure: &'a AtomicStructure,
        cutoff: f64,
        strict: bool,
    ) -> Result<Self, GeometryError> {
        if !cutoff.is_finite() || cutoff <= 0.0 {
            return Err(GeometryError::InvalidCutoff(cutoff));
        }

        let shifts = image_shifts(structure, cutoff);
        let positions: Vec<_> = match structure.cell() {
            Some(cell) => (0..structure.len())
                .map(|i| cell.wrap(structure.position(i)))
                .collect(),
            None => (0..structure.len())
                .map(|i| *structure.position(i))
                .collect(),
        };
        let mut neighbours = vec![Vec::new(); structure.len()];

        for (center, slots) in neighbours.iter_mut().enumerate() {
            let center_pos = positions[center];
            for other in 0..structure.len() {
                for shift in &shifts {
                    if center == other && *shift == [0, 0, 0] {
                        continue;
                    }
                    let translation = match structure.cell() {
                        Some(cell) => cell.shift_vector(*shift),
                        None => Vector3::zeros(),
                    };
                    let offset = positions[other] + translation - center_pos;
                    let distance = offset.norm();
                    if distance > cutoff {
                        continue;
                    }
                    if strict && distance < SELF_OVERLAP_TOLERANCE {
                        continue;
                    }
                    slots.push(Neighbour {
                        index: other,
                        distance,
                        offset,
                        shift: *shift,
                    });
                }
            }
        }

        Ok(Self {
            structure,
            cutoff,
            neighbours,
        })
    }

    /// The structure this list was built from.
    pub fn structure(&self) -> &'a AtomicStructure {
        self.structure
    }

    /// The cutoff radius this list was built with.
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Number of center atoms (equals the structure's atom count).
    pub fn len(&self) -> usize {
        self.neighbours.len()
    }

    /// Returns true if the list has no centers.
    pub fn is_empty(&self) -> bool {
        self.neighbours.is_empty()
    }

    /// Neighbours of the given center atom, in enumeration order.
    pub fn neighbours_of(&self, center: usize) -> &[Neighbour] {
        &self.neighbours[center]
    }
}

/// Enumerates the periodic-image shifts reachable within `cutoff`.
///
/// Aperiodic structures (and aperiodic axes) contribute only the zero shift.
fn image_shifts(structure: &AtomicStructure, cutoff: f64) -> Vec<[i32; 3]> {
    let repeats = match structure.cell() {
        Some(cell) => cell.repeats_for_radius(cutoff),
        None => [0, 0, 0],
    };
    let mut shifts = Vec::new();
    for a in -repeats[0]..=repeats[0] {
        for b in -repeats[1]..=repeats[1] {
            for c in -repeats[2]..=repeats[2] {
                shifts.push([a, b, c]);
            }
        }
    }
    shifts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::structure::UnitCell;
    use nalgebra::{Matrix3, Point3};

    fn dimer(separation: f64) -> AtomicStructure {
        AtomicStructure::new(
            vec![1, 1],
            vec![Point3::origin(), Point3::new(separation, 0.0, 0.0)],
            None,
        )
        .unwrap()
    }

    fn cubic(a: f64, species: Vec<u32>, positions: Vec<Point3<f64>>) -> AtomicStructure {
        let cell = UnitCell::new(
            Matrix3::new(a, 0.0, 0.0, 0.0, a, 0.0, 0.0, 0.0, a),
            [true, true, true],
        )
        .unwrap();
        AtomicStructure::new(species, positions, Some(cell)).unwrap()
    }

    #[test]
    fn non_positive_cutoff_fails_fast() {
        let structure = dimer(1.0);
        assert!(matches!(
            NeighbourList::build(&structure, 0.0, false),
            Err(GeometryError::InvalidCutoff(_))
        ));
        assert!(matches!(
            NeighbourList::build(&structure, -1.5, false),
            Err(GeometryError::InvalidCutoff(_))
        ));
        assert!(matches!(
            NeighbourList::build(&structure, f64::NAN, false),
            Err(GeometryError::InvalidCutoff(_))
        ));
    }

    #[test]
    fn empty_structure_yields_empty_list() {
        let structure = AtomicStructure::new(vec![], vec![], None).unwrap();
        let list = NeighbourList::build(&structure, 2.0, true).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn dimer_within_cutoff_pairs_both_ways() {
        let structure = dimer(1.0);
        let list = NeighbourList::build(&structure, 2.0, false).unwrap();
        assert_eq!(list.neighbours_of(0).len(), 1);
        assert_eq!(list.neighbours_of(1).len(), 1);
        let nb = &list.neighbours_of(0)[0];
        assert_eq!(nb.index, 1);
        assert_eq!(nb.distance, 1.0);
        assert_eq!(nb.offset, Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(nb.shift, [0, 0, 0]);
    }

    #[test]
    fn dimer_beyond_cutoff_has_no_neighbours() {
        let structure = dimer(3.0);
        let list = NeighbourList::build(&structure, 2.0, false).unwrap();
        assert!(list.neighbours_of(0).is_empty());
        assert!(list.neighbours_of(1).is_empty());
    }

    #[test]
    fn pair_at_exactly_the_cutoff_distance_is_kept() {
        let structure = dimer(2.0);
        let list = NeighbourList::build(&structure, 2.0, false).unwrap();
        assert_eq!(list.neighbours_of(0).len(), 1);
    }

    #[test]
    fn periodic_single_atom_sees_its_own_images() {
        let structure = cubic(2.0, vec![1], vec![Point3::origin()]);
        let list = NeighbourList::build(&structure, 2.0, true).unwrap();
        // Six face images at distance 2.0, each counted separately.
        assert_eq!(list.neighbours_of(0).len(), 6);
        for nb in list.neighbours_of(0) {
            assert_eq!(nb.index, 0);
            assert_eq!(nb.distance, 2.0);
            assert_ne!(nb.shift, [0, 0, 0]);
        }
    }

    #[test]
    fn strict_mode_discards_numerically_overlapping_pairs() {
        let structure = AtomicStructure::new(
            vec![1, 1],
            vec![Point3::origin(), Point3::new(1e-12, 0.0, 0.0)],
            None,
        )
        .unwrap();
        let lenient = NeighbourList::build(&structure, 1.0, false).unwrap();
        let strict = NeighbourList::build(&structure, 1.0, true).unwrap();
        assert_eq!(lenient.neighbours_of(0).len(), 1);
        assert!(strict.neighbours_of(0).is_empty());
    }

    #[test]
    fn periodic_dimer_counts_images_within_reach() {
        let structure = cubic(
            10.0,
            vec![1, 1],
            vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)],
        );
        let list = NeighbourList::build(&structure, 1.5, true).unwrap();
        // Only the in-cell partner is within 1.5 of either atom.
        assert_eq!(list.neighbours_of(0).len(), 1);
        assert_eq!(list.neighbours_of(1).len(), 1);
        assert_eq!(list.neighbours_of(1)[0].offset, Vector3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn out_of_cell_positions_are_wrapped_before_enumeration() {
        // x = 9 in a 4 A cell sits at wrapped x = 1, within 2.0 of the origin.
        let structure = cubic(
            4.0,
            vec![1, 1],
            vec![Point3::origin(), Point3::new(9.0, 0.0, 0.0)],
        );
        let list = NeighbourList::build(&structure, 2.0, true).unwrap();
        assert_eq!(list.neighbours_of(0).len(), 1);
        assert_eq!(list.neighbours_of(1).len(), 1);
        let nb = &list.neighbours_of(0)[0];
        assert_eq!(nb.index, 1);
        assert!((nb.distance - 1.0).abs() < 1e-12);
    }

    #[test]
    fn wrapped_and_unwrapped_inputs_yield_the_same_distances() {
        let inside = cubic(
            4.0,
            vec![1, 8],
            vec![Point3::new(0.5, 0.5, 0.5), Point3::new(3.5, 0.5, 0.5)],
        );
        // The same configuration, translated by two cell lengths along x.
        let outside = cubic(
            4.0,
            vec![1, 8],
            vec![Point3::new(8.5, 0.5, 0.5), Point3::new(11.5, 0.5, 0.5)],
        );
        let a = NeighbourList::build(&inside, 3.0, true).unwrap();
        let b = NeighbourList::build(&outside, 3.0, true).unwrap();
        for center in 0..a.len() {
            let da: Vec<f64> = a.neighbours_of(center).iter().map(|n| n.distance).collect();
            let db: Vec<f64> = b.neighbours_of(center).iter().map(|n| n.distance).collect();
            assert_eq!(da.len(), db.len());
            for (x, y) in da.iter().zip(db.iter()) {
                assert!((x - y).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn offsets_are_consistent_with_distances() {
        let structure = cubic(
            3.0,
            vec![6, 8],
            vec![Point3::new(0.5, 0.5, 0.5), Point3::new(2.5, 0.5, 0.5)],
        );
        let list = NeighbourList::build(&structure, 3.0, true).unwrap();
        for center in 0..list.len() {
            for nb in list.neighbours_of(center) {
                let diff = (nb.offset.norm() - nb.distance).abs();
                assert!(diff < 1e-12);
                assert!(nb.distance > 0.0);
                assert!(nb.distance <= 3.0);
            }
        }
    }
}

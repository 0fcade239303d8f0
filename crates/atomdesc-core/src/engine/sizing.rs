use crate::core::neighbours::list::NeighbourList;
use crate::engine::error::EngineError;
use tracing::debug;

/// Resolves the dataset-wide feature size from a batch of neighbour lists.
///
/// For each center atom the occupied slot count is its neighbourhood
/// cardinality plus one (the center occupies a slot alongside its neighbours);
/// the resolved size is the maximum of that value over every atom in every
/// structure. This single sequential pass is the synchronization barrier of the
/// pipeline: it must complete before any calculator row is written, because it
/// fixes the row width for the entire run.
///
/// # Errors
///
/// Returns [`EngineError::EmptyBatch`] when the batch contains no atoms at
/// all; there is no defined maximum to resolve.
pub fn resolve_size(lists: &[NeighbourList<'_>]) -> Result<usize, EngineError> {
    let mut resolved: Option<usize> = None;
    for list in lists {
        for center in 0..list.len() {
            let occupied = list.neighbours_of(center).len() + 1;
            resolved = Some(resolved.map_or(occupied, |max| max.max(occupied)));
        }
    }
    let size = resolved.ok_or(EngineError::EmptyBatch)?;
    debug!(size, "resolved dataset-wide feature size");
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::structure::AtomicStructure;
    use nalgebra::Point3;

    fn chain(n: usize, spacing: f64) -> AtomicStructure {
        let positions = (0..n)
            .map(|i| Point3::new(spacing * i as f64, 0.0, 0.0))
            .collect();
        AtomicStructure::new(vec![1; n], positions, None).unwrap()
    }

    #[test]
    fn resolved_size_is_max_neighbour_count_plus_one() {
        // A 3-chain with spacing 1 and cutoff 1.5: the middle atom has two
        // neighbours, the ends one each.
        let a = chain(3, 1.0);
        let b = chain(2, 1.0);
        let lists = vec![
            NeighbourList::build(&a, 1.5, true).unwrap(),
            NeighbourList::build(&b, 1.5, true).unwrap(),
        ];
        assert_eq!(resolve_size(&lists).unwrap(), 3);
    }

    #[test]
    fn isolated_atoms_resolve_to_size_one() {
        let a = chain(2, 100.0);
        let lists = vec![NeighbourList::build(&a, 1.0, true).unwrap()];
        assert_eq!(resolve_size(&lists).unwrap(), 1);
    }

    #[test]
    fn resolving_twice_yields_the_same_value() {
        let a = chain(5, 1.0);
        let lists = vec![NeighbourList::build(&a, 2.5, true).unwrap()];
        let first = resolve_size(&lists).unwrap();
        let second = resolve_size(&lists).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_batch_fails() {
        assert!(matches!(resolve_size(&[]), Err(EngineError::EmptyBatch)));
    }

    #[test]
    fn batch_of_empty_structures_fails() {
        let empty = AtomicStructure::new(vec![], vec![], None).unwrap();
        let lists = vec![NeighbourList::build(&empty, 1.0, true).unwrap()];
        assert!(matches!(
            resolve_size(&lists),
            Err(EngineError::EmptyBatch)
        ));
    }
}

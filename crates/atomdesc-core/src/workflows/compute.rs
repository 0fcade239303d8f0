use crate::core::models::structure::{AtomicStructure, GeometryError};
use crate::core::neighbours::list::NeighbourList;
use crate::engine::calculators::Calculator;
use crate::engine::config::CalculatorConfig;
use crate::engine::error::EngineError;
use crate::engine::features::{FeatureMatrix, FeatureStore};
use crate::engine::sizing::resolve_size;
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// How the workflow reacts to a per-structure geometry error.
///
/// Only geometry errors are skippable; configuration, sizing, and aggregation
/// errors always abort, since masking them would produce statistically wrong
/// downstream features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeometryErrorPolicy {
    /// Abort the whole batch on the first malformed structure.
    #[default]
    FailFast,
    /// Skip malformed structures and report them in the result.
    Skip,
}

/// A structure excluded from the batch under [`GeometryErrorPolicy::Skip`].
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedStructure {
    /// Index of the structure in the input batch.
    pub index: usize,
    /// The geometry error that excluded it.
    pub error: GeometryError,
}

/// The outcome of one batch computation run.
#[derive(Debug)]
pub struct ComputeResult {
    /// One fixed-width feature row per atom, in input order (skipped
    /// structures contribute no rows).
    pub features: FeatureMatrix,
    /// Structures excluded by the skip policy, in input order.
    pub skipped: Vec<SkippedStructure>,
}

/// Runs the complete descriptor pipeline over a batch of structures.
///
/// Phases: neighbour-list construction per structure (parallel across
/// structures), size resolution for the variants that need it (a sequential
/// barrier), calculator construction from the explicit resolved size, per-atom
/// feature computation (parallel across structures, private output slots), and
/// an ordered merge into the feature store.
///
/// # Errors
///
/// Propagates configuration errors, sizing errors ([`EngineError::EmptyBatch`],
/// [`crate::engine::config::ConfigError::SizeTooSmall`] via
/// [`EngineError::Config`]), size overflows at compute time, and — under
/// [`GeometryErrorPolicy::FailFast`] — the first per-structure geometry error.
#[instrument(skip_all, name = "descriptor_workflow", fields(structures = structures.len()))]
pub fn run(
    structures: &[AtomicStructure],
    config: &CalculatorConfig,
    policy: GeometryErrorPolicy,
) -> Result<ComputeResult, EngineError> {
    let cutoff = config.cutoff();

    // === Phase 1: Neighbour lists, one per structure ===
    let built = build_neighbour_lists(structures, cutoff);

    let mut lists = Vec::with_capacity(structures.len());
    let mut skipped = Vec::new();
    for (index, result) in built.into_iter().enumerate() {
        match result {
            Ok(list) => lists.push(list),
            Err(error) => match policy {
                GeometryErrorPolicy::FailFast => {
                    return Err(EngineError::Geometry {
                        index,
                        source: error,
                    });
                }
                GeometryErrorPolicy::Skip => skipped.push(SkippedStructure { index, error }),
            },
        }
    }
    if !skipped.is_empty() {
        info!(
            skipped = skipped.len(),
            "excluded malformed structures from the batch"
        );
    }

    // === Phase 2: Size resolution barrier ===
    let resolved_size = match config {
        CalculatorConfig::SortedCoulomb(_) => Some(resolve_size(&lists)?),
        CalculatorConfig::SphericalExpansion(_) => None,
    };

    // === Phase 3: Calculator construction from the resolved size ===
    let calculator = Calculator::from_config(config, resolved_size)?;
    let width = calculator.feature_width();
    info!(width, "constructed descriptor calculator");

    // === Phase 4: Per-structure computation, ordered merge ===
    let per_structure = compute_rows(&calculator, &lists);

    let mut store = FeatureStore::with_width(width);
    for rows in per_structure {
        for row in rows? {
            store.append(row)?;
        }
    }

    let features = store.finalize();
    info!(rows = features.len(), "batch computation complete");
    Ok(ComputeResult { features, skipped })
}

fn build_neighbour_lists(
    structures: &[AtomicStructure],
    cutoff: f64,
) -> Vec<Result<NeighbourList<'_>, GeometryError>> {
    #[cfg(feature = "parallel")]
    let iterator = structures.par_iter();

    #[cfg(not(feature = "parallel"))]
    let iterator = structures.iter();

    iterator
        .map(|structure| {
            structure.validate()?;
            NeighbourList::build(structure, cutoff, true)
        })
        .collect()
}

fn compute_rows(
    calculator: &Calculator,
    lists: &[NeighbourList<'_>],
) -> Vec<Result<Vec<Vec<f64>>, EngineError>> {
    #[cfg(feature = "parallel")]
    let iterator = lists.par_iter();

    #[cfg(not(feature = "parallel"))]
    let iterator = lists.iter();

    iterator
        .map(|list| calculator.compute_for_structure(list))
        .collect()
}

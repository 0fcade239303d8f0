//! # Calculators Module
//!
//! This module implements the closed set of descriptor variants and their
//! per-atom computation.
//!
//! ## Overview
//!
//! Each calculator consumes a neighbour list and produces one fixed-length
//! feature row per center atom. The set of variants is a tagged enum selected
//! at construction time, so dispatch is compile-time exhaustive rather than a
//! runtime string lookup:
//!
//! - [`sorted_coulomb`] - The sorted Coulomb interaction matrix, packed as its
//!   upper triangle after a deterministic row-norm sort
//! - [`spherical_expansion`] - The neighbour-density expansion in an
//!   orthonormalized radial basis times real spherical harmonics
//!
//! Calculators are stateless between calls: all run state (hyperparameters and
//! the resolved size) is fixed at construction and read-only afterwards, which
//! makes per-structure computation freely parallelizable.

pub mod sorted_coulomb;
pub mod spherical_expansion;

use crate::core::neighbours::list::NeighbourList;
use crate::engine::config::{CalculatorConfig, ConfigError};
use crate::engine::error::EngineError;

pub use sorted_coulomb::SortedCoulombCalculator;
pub use spherical_expansion::SphericalExpansionCalculator;

/// A constructed descriptor calculator, polymorphic over the variant set.
#[derive(Debug, Clone)]
pub enum Calculator {
    SortedCoulomb(SortedCoulombCalculator),
    SphericalExpansion(SphericalExpansionCalculator),
}

impl Calculator {
    /// Constructs a calculator from a validated config and, for the variants
    /// that need one, the resolved dataset size.
    ///
    /// The resolved size is an explicit argument by design: calculators never
    /// read sizing information from ambient state.
    ///
    /// # Errors
    ///
    /// Returns an error if a pinned size is below the resolved dataset
    /// maximum, or if basis construction fails for the expansion variant.
    pub fn from_config(
        config: &CalculatorConfig,
        resolved_size: Option<usize>,
    ) -> Result<Self, EngineError> {
        match config {
            CalculatorConfig::SortedCoulomb(config) => {
                let size =
                    resolved_size.ok_or(ConfigError::MissingParameter("resolved size"))?;
                let resolved = config.resolve(size)?;
                Ok(Calculator::SortedCoulomb(SortedCoulombCalculator::new(
                    resolved,
                )))
            }
            CalculatorConfig::SphericalExpansion(config) => Ok(Calculator::SphericalExpansion(
                SphericalExpansionCalculator::new(config.clone())?,
            )),
        }
    }

    /// Length of every feature row this calculator produces.
    pub fn feature_width(&self) -> usize {
        match self {
            Calculator::SortedCoulomb(calc) => calc.feature_width(),
            Calculator::SphericalExpansion(calc) => calc.feature_width(),
        }
    }

    /// Computes one feature row per center atom of the given structure.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SizeOverflow`] if a center's neighbourhood
    /// exceeds the resolved size (possible only when the size was pinned
    /// externally or the structures changed between resolution and compute).
    pub fn compute_for_structure(
        &self,
        list: &NeighbourList<'_>,
    ) -> Result<Vec<Vec<f64>>, EngineError> {
        let mut rows = Vec::with_capacity(list.len());
        for center in 0..list.len() {
            let row = match self {
                Calculator::SortedCoulomb(calc) => calc.compute_for_center(list, center)?,
                Calculator::SphericalExpansion(calc) => calc.compute_for_center(list, center),
            };
            rows.push(row);
        }
        Ok(rows)
    }
}

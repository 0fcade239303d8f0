//! # Basis Expansion Module
//!
//! This module provides the truncated orthogonal function bases used by the
//! spherical-expansion descriptor variant.
//!
//! ## Overview
//!
//! The neighbour density around a center atom is expanded as coefficients in a
//! product basis of radial functions and real spherical harmonics:
//!
//! - **Radial basis** ([`radial`]) - polynomial functions vanishing at the cutoff,
//!   Löwdin-orthonormalized through the overlap matrix
//! - **Angular basis** ([`spherical`]) - real spherical harmonics up to a
//!   configured degree, built by associated-Legendre recursion
//!
//! Both bases are pure functions of geometry and the truncation orders; the
//! coefficient length they induce is a closed form independent of how many
//! neighbours a center happens to have.

pub mod radial;
pub mod spherical;

use thiserror::Error;

/// Errors arising while constructing a truncated basis.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BasisError {
    #[error("radial basis order must be at least 1, got {0}")]
    InvalidRadialOrder(usize),

    #[error("basis cutoff must be positive and finite, got {0}")]
    InvalidCutoff(f64),

    #[error("radial overlap matrix is numerically singular at order {order}")]
    IllConditioned { order: usize },
}

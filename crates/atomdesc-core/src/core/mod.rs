//! # Core Module
//!
//! This module provides the fundamental building blocks for atomic-environment
//! descriptor computation, serving as the stateless computational core of the
//! library.
//!
//! ## Overview
//!
//! The core module implements the data structures and pure mathematics that every
//! descriptor variant is assembled from: immutable atomic structures with optional
//! periodic cells, cutoff-bounded neighbour enumeration with periodic-image
//! bookkeeping, pairwise interaction kernels with smooth decay, and truncated
//! radial/angular basis expansions.
//!
//! ## Architecture
//!
//! The module is organized into specialized submodules that handle different
//! aspects of the computation:
//!
//! - **Structure Representation** ([`models`]) - Immutable atomic structures and periodic cells
//! - **Neighbour Enumeration** ([`neighbours`]) - Cutoff-bounded neighbour lists with image shifts
//! - **Interaction Kernels** ([`interactions`]) - Pairwise Coulomb values and smooth cutoff tapers
//! - **Basis Expansion** ([`basis`]) - Orthonormalized radial bases and real spherical harmonics
//!
//! Everything in this layer is pure: no configuration state, no logging, no
//! parallelism. Those concerns live in the `engine` and `workflows` layers.

pub mod basis;
pub mod interactions;
pub mod models;
pub mod neighbours;

//! # Core Models Module
//!
//! This module contains the fundamental data structures used to represent atomic
//! structures, providing the foundation for all descriptor computations.
//!
//! ## Overview
//!
//! The models module defines the immutable input side of the pipeline:
//!
//! - **Atomic structures** - Ordered species, positions, and per-atom charges
//! - **Periodic cells** - Lattice vectors with per-axis periodicity flags
//! - **Geometry validation** - Construction-time rejection of malformed input
//!
//! Structures are validated once, at construction, and never mutated afterwards;
//! every downstream component borrows them read-only.
//!
//! ## Key Components
//!
//! - [`structure`] - `AtomicStructure`, `UnitCell`, and `GeometryError`

pub mod structure;

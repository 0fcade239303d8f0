//! # atomdesc Core Library
//!
//! A high-performance library for computing fixed-size, symmetry-adapted numerical
//! descriptors of local atomic environments, for use as machine-learning features.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models (`AtomicStructure`,
//!   `NeighbourList`), pure mathematical building blocks (interaction kernels, radial
//!   basis functions, real spherical harmonics), and nothing else.
//!
//! - **[`engine`]: The Logic Core.** This layer turns user configuration into
//!   validated, resolved calculator instances, determines the dataset-wide feature
//!   width from the data itself, computes per-atom feature rows, and aggregates them
//!   into a fixed-width feature store.
//!
//! - **[`workflows`]: The Public API.** The highest-level, user-facing layer. It ties
//!   the `engine` and `core` together to execute the complete batch descriptor
//!   pipeline: neighbour lists, size resolution, parallel per-structure computation,
//!   and ordered aggregation.

pub mod core;
pub mod engine;
pub mod workflows;

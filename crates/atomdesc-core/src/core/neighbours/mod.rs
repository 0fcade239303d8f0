//! # Neighbour Enumeration Module
//!
//! This module builds cutoff-bounded neighbour lists over atomic structures,
//! the leaf dependency of every descriptor variant.
//!
//! ## Overview
//!
//! For a structure and a cutoff radius, the neighbour list records, per center
//! atom, every neighbour within range together with its distance, the Cartesian
//! offset from the center, and the periodic-image shift that produced it.
//! Non-periodic structures are enumerated by direct distance comparison;
//! periodic structures additionally enumerate every image shift whose translation
//! can bring an atom within the cutoff.
//!
//! ## Key Components
//!
//! - [`list`] - `NeighbourList`, `Neighbour`, and the build algorithm

pub mod list;

//! # Engine Module
//!
//! This module turns user configuration into validated descriptor calculators
//! and runs the sizing, computation, and aggregation machinery of the pipeline.
//!
//! ## Overview
//!
//! The engine sits between the pure mathematics of [`crate::core`] and the
//! batch-oriented public API in [`crate::workflows`]. It owns everything that is
//! stateful for the duration of one computation run: the validated
//! hyperparameters, the dataset-wide resolved feature size, and the growing
//! feature store.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Per-variant hyperparameter structs, builders,
//!   and the allow-listed key/value ingestion path
//! - **Dynamic Sizing** ([`sizing`]) - The one-pass dataset-wide size resolution
//!   that fixes the feature width before any row is written
//! - **Calculators** ([`calculators`]) - The closed set of descriptor variants and
//!   their per-atom computation
//! - **Aggregation** ([`features`]) - The fixed-width feature store and its
//!   finalized immutable view
//! - **Error Handling** ([`error`]) - Engine-level error types and propagation
//!
//! ## Key Capabilities
//!
//! - **Two-phase configuration**: immutable user config, then an explicit resolved
//!   config produced once the dataset size is known; nothing is back-written
//! - **Compile-time exhaustive variant dispatch** over the calculator enum
//! - **Fail-loud width enforcement**: over-full neighbourhoods and ragged rows
//!   abort instead of producing silently wrong features

pub mod calculators;
pub mod config;
pub mod error;
pub mod features;
pub mod sizing;

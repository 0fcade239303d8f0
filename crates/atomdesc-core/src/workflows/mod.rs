//! # Workflows Module
//!
//! This module provides the high-level entry point that orchestrates the
//! complete batch descriptor pipeline.
//!
//! ## Overview
//!
//! Workflows are the top-level API for users of atomdesc. A workflow accepts a
//! batch of in-memory atomic structures and a calculator configuration, and
//! carries the computation through its phases: per-structure neighbour lists,
//! the dataset-wide size-resolution barrier, per-structure feature rows, and
//! the ordered merge into a fixed-width feature matrix.
//!
//! ## Key Capabilities
//!
//! - **Barrier ordering**: size resolution always completes before any feature
//!   row is computed, so every row in one run shares a single width
//! - **Parallel per-structure computation** (with the `parallel` feature) with
//!   ordered aggregation; results are independent of the thread schedule
//! - **Opt-in skip-and-continue** for per-structure geometry errors; every
//!   other error kind propagates to the caller

pub mod compute;

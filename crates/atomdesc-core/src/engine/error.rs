use thiserror::Error;

use crate::core::basis::BasisError;
use crate::core::models::structure::GeometryError;
use crate::engine::config::ConfigError;

/// Errors raised by the descriptor engine and workflow.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("basis construction failed: {source}")]
    Basis {
        #[from]
        source: BasisError,
    },

    #[error("geometry error in structure {index}: {source}")]
    Geometry { index: usize, source: GeometryError },

    #[error("cannot resolve a feature size over a batch with no atoms")]
    EmptyBatch,

    #[error(
        "neighbourhood of center {center} occupies {occupied} slots but the resolved size is {size}"
    )]
    SizeOverflow {
        center: usize,
        occupied: usize,
        size: usize,
    },

    #[error("feature row has length {got} but the store width is {expected}")]
    WidthMismatch { expected: usize, got: usize },
}

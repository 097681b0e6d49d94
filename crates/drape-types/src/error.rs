//! Error types for the drape simulator.
//!
//! All crates return `DrapeResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the drape simulator.
#[derive(Debug, Error)]
pub enum DrapeError {
    /// A grid was requested with a zero (or overflowing) dimension.
    #[error("Invalid grid dimensions: {width}x{height}")]
    InvalidGridDimensions {
        width: usize,
        height: usize,
    },

    /// A vertex arena is too small for the nodes that index into it.
    #[error("{buffer} buffer holds {actual} floats but {required} are required")]
    BufferSizeMismatch {
        /// Which buffer was short ("position" or "normal").
        buffer: &'static str,
        required: usize,
        actual: usize,
    },

    /// A node without enough structural neighbors was asked for its normal.
    #[error("Node {node} has fewer than two structural connections; cannot evaluate its normal")]
    DegenerateNormalField {
        node: usize,
    },

    /// A node index or grid coordinate is out of range.
    #[error("Node index {index} out of bounds (count: {count})")]
    NodeOutOfBounds {
        index: usize,
        count: usize,
    },

    /// A field id that was never registered with the system.
    #[error("Field {index} is not registered (fields: {count})")]
    UnknownField {
        index: usize,
        count: usize,
    },

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, DrapeError>`.
pub type DrapeResult<T> = Result<T, DrapeError>;

//! Error types for kernel matrices and kernel sets

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KernelError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Empty dataset")]
    EmptyDataset,

    #[error("Kernel matrix '{0}' is not attached to any dataset")]
    NotAttached(String),

    /// A member could not be added to (or combined into) a kernel set
    #[error("Cannot add kernel matrix {position} ('{name}') to the set: {reason}")]
    SetAddition {
        position: usize,
        name: String,
        reason: String,
    },

    #[error("Index {index} is out of bounds for a kernel set of size {size}")]
    IndexOutOfBounds { index: i64, size: usize },

    #[error("Sample pair ({i}, {j}) is out of bounds for {num_samples} samples")]
    SampleIndexOutOfBounds {
        i: usize,
        j: usize,
        num_samples: usize,
    },

    #[error("Invalid index type: expected a non-negative integer, got {0}")]
    InvalidIndexType(String),

    #[error("Kernel contract violated: {0}")]
    KernelContract(String),

    #[error("Degenerate kernel: {0}")]
    DegenerateKernel(String),

    #[error("Invalid kernel matrix operation '{given}': must be one of {valid}")]
    InvalidOperation { given: String, valid: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, KernelError>;

//! Kernel matrices and kernel sets for kernel methods
//!
//! A [`KernelMatrix`] pairs a kernel function with a dataset and evaluates
//! K[i,j] lazily, caching every pair it computes. A [`KernelSet`] groups
//! several kernel matrices over the same samples for multiple-kernel
//! learning and kernel alignment.

pub mod attributes;
pub mod cache;
pub mod core;
pub mod data;
pub mod kernel;
pub mod matrix;
pub mod ops;
pub mod set;

// Re-export main types for convenience
pub use crate::attributes::{AttrAssignment, AttrValue};
pub use crate::cache::{CacheStats, KernelCache};
pub use crate::core::error::{KernelError, Result};
pub use crate::core::types::*;
pub use crate::data::CsvDataset;
pub use crate::kernel::{
    FnKernel, GaussianKernel, Kernel, KernelSpec, LaplacianKernel, LinearKernel,
    PolynomialKernel,
};
pub use crate::matrix::KernelMatrix;
pub use crate::set::KernelSet;

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

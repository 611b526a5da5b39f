//! Operations on materialized kernel matrices

pub mod alignment;
pub mod combine;
pub mod transform;

pub use self::alignment::{alignment, frobenius_inner, frobenius_norm, ideal_kernel};
pub use self::combine::combine;
pub use self::transform::{center_matrix, normalize_matrix};

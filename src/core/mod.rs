//! Core types, errors and input validation

pub mod error;
pub mod types;
pub mod validation;

pub use self::error::*;
pub use self::types::*;

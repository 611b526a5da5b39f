//! Core type definitions shared by kernel matrices and kernel sets

use crate::core::{KernelError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Transform currently baked into the values of a kernel matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transform {
    /// Plain kernel evaluations
    #[default]
    Raw,
    /// Double-centered in feature space
    Centered,
    /// Cosine-normalized to unit self-similarity
    Normalized,
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Raw => "raw",
            Self::Centered => "centered",
            Self::Normalized => "normalized",
        };
        f.write_str(name)
    }
}

/// Element-wise operation used to combine several kernel matrices into one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatrixOp {
    /// K = K1 + K2 + ...
    Sum,
    /// Hadamard product K = K1 ∘ K2 ∘ ...
    Product,
    /// Element-wise mean of all members
    Average,
}

impl MatrixOp {
    pub const ALL: [MatrixOp; 3] = [MatrixOp::Sum, MatrixOp::Product, MatrixOp::Average];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Product => "product",
            Self::Average => "average",
        }
    }
}

impl fmt::Display for MatrixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatrixOp {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self> {
        let op = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|candidate| candidate.as_str() == op)
            .ok_or_else(|| KernelError::InvalidOperation {
                given: s.to_string(),
                valid: Self::ALL
                    .iter()
                    .map(|op| op.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// How two kernel matrices are compared by [`crate::ops::alignment`]
///
/// There is no implicit default: callers choose between the plain
/// Frobenius alignment and the centered variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentMethod {
    /// <K1, K2>_F / (||K1||_F * ||K2||_F)
    Frobenius,
    /// Frobenius alignment of the double-centered matrices
    Centered,
}

impl FromStr for AlignmentMethod {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "frobenius" => Ok(Self::Frobenius),
            "centered" => Ok(Self::Centered),
            other => Err(KernelError::InvalidParameter(format!(
                "unknown alignment method '{other}', expected 'frobenius' or 'centered'"
            ))),
        }
    }
}

/// Index used to address a member of a [`crate::set::KernelSet`]
///
/// Integer inputs become [`MemberIndex::Position`] and are bounds-checked;
/// any other kind of input is kept as [`MemberIndex::Invalid`] so that the
/// lookup can report a type error instead of a bounds error.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberIndex {
    Position(i64),
    Invalid(String),
}

impl MemberIndex {
    /// Resolve the index against a collection of `size` members
    pub fn resolve(&self, size: usize) -> Result<usize> {
        match *self {
            Self::Position(index) if index >= 0 && (index as u64) < size as u64 => {
                Ok(index as usize)
            }
            Self::Position(index) => Err(KernelError::IndexOutOfBounds { index, size }),
            Self::Invalid(ref repr) => Err(KernelError::InvalidIndexType(repr.clone())),
        }
    }
}

impl From<usize> for MemberIndex {
    fn from(index: usize) -> Self {
        i64::try_from(index)
            .map(Self::Position)
            .unwrap_or(Self::Position(i64::MAX))
    }
}

impl From<i64> for MemberIndex {
    fn from(index: i64) -> Self {
        Self::Position(index)
    }
}

impl From<i32> for MemberIndex {
    fn from(index: i32) -> Self {
        Self::Position(index as i64)
    }
}

impl From<f64> for MemberIndex {
    fn from(index: f64) -> Self {
        Self::Invalid(format!("{index:?}"))
    }
}

impl From<&str> for MemberIndex {
    fn from(index: &str) -> Self {
        Self::Invalid(format!("{index:?}"))
    }
}

impl From<String> for MemberIndex {
    fn from(index: String) -> Self {
        Self::Invalid(format!("{index:?}"))
    }
}

//! Element-wise combination of kernel matrices

use crate::core::validation::ensure_square;
use crate::core::{KernelError, MatrixOp, Result};
use ndarray::Array2;

/// Combine equally sized kernel matrices with `op`
///
/// Sums and Hadamard products of positive semi-definite matrices remain
/// positive semi-definite, so the result is itself a valid kernel matrix.
pub fn combine(matrices: &[Array2<f64>], op: MatrixOp) -> Result<Array2<f64>> {
    let (first, rest) = matrices.split_first().ok_or_else(|| {
        KernelError::InvalidParameter("cannot combine an empty collection of matrices".to_string())
    })?;
    let n = ensure_square(first.view())?;

    let mut combined = first.clone();
    for matrix in rest {
        let m = ensure_square(matrix.view())?;
        if m != n {
            return Err(KernelError::DimensionMismatch {
                expected: n,
                actual: m,
            });
        }
        match op {
            MatrixOp::Sum | MatrixOp::Average => combined += matrix,
            MatrixOp::Product => combined *= matrix,
        }
    }

    if op == MatrixOp::Average {
        combined /= matrices.len() as f64;
    }
    Ok(combined)
}

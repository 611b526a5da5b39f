//! Kernel alignment
//!
//! Alignment measures how similar two kernel matrices are, typically a
//! computed kernel and the "ideal" kernel yyᵀ derived from target labels.

use crate::core::validation::ensure_square;
use crate::core::{AlignmentMethod, KernelError, Result};
use crate::ops::transform::center_matrix;
use ndarray::{Array2, ArrayView1, ArrayView2};

/// Frobenius inner product <A, B>_F = Σᵢⱼ A[i,j] * B[i,j]
pub fn frobenius_inner(a: ArrayView2<'_, f64>, b: ArrayView2<'_, f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Frobenius norm ||A||_F
pub fn frobenius_norm(a: ArrayView2<'_, f64>) -> f64 {
    frobenius_inner(a, a).sqrt()
}

/// Alignment between two kernel matrices of the same size
///
/// `method` selects between the plain Frobenius alignment and the
/// centered alignment, which double-centers both matrices first.
pub fn alignment(
    k1: ArrayView2<'_, f64>,
    k2: ArrayView2<'_, f64>,
    method: AlignmentMethod,
) -> Result<f64> {
    let n1 = ensure_square(k1)?;
    let n2 = ensure_square(k2)?;
    if n1 != n2 {
        return Err(KernelError::DimensionMismatch {
            expected: n1,
            actual: n2,
        });
    }

    match method {
        AlignmentMethod::Frobenius => normalized_inner(k1, k2),
        AlignmentMethod::Centered => {
            let c1 = center_matrix(k1)?;
            let c2 = center_matrix(k2)?;
            normalized_inner(c1.view(), c2.view())
        }
    }
}

/// Ideal target kernel yyᵀ for a label vector
pub fn ideal_kernel(labels: ArrayView1<'_, f64>) -> Array2<f64> {
    let n = labels.len();
    Array2::from_shape_fn((n, n), |(i, j)| labels[i] * labels[j])
}

fn normalized_inner(a: ArrayView2<'_, f64>, b: ArrayView2<'_, f64>) -> Result<f64> {
    let denominator = frobenius_norm(a) * frobenius_norm(b);
    if !(denominator > 0.0 && denominator.is_finite()) {
        return Err(KernelError::DegenerateKernel(
            "alignment is undefined for a kernel matrix with zero norm".to_string(),
        ));
    }
    Ok(frobenius_inner(a, b) / denominator)
}

//! Similarity-preserving transforms of materialized kernel matrices

use crate::core::validation::ensure_square;
use crate::core::{KernelError, Result};
use ndarray::{Array1, Array2, ArrayView2, Axis};

/// Double-center a kernel matrix: K_c[i,j] = K[i,j] - row_mean[i] - col_mean[j] + grand_mean
///
/// Equivalent to (I - 11ᵀ/n) K (I - 11ᵀ/n). An exactly symmetric input
/// yields an exactly symmetric output.
pub fn center_matrix(kernel_matrix: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
    let n = ensure_square(kernel_matrix)?;
    if n == 0 {
        return Ok(Array2::zeros((0, 0)));
    }

    let row_means: Array1<f64> = kernel_matrix.sum_axis(Axis(1)) / n as f64;
    let col_means: Array1<f64> = kernel_matrix.sum_axis(Axis(0)) / n as f64;
    let grand_mean = row_means.sum() / n as f64;

    let mut centered =
        Array2::from_shape_fn((n, n), |(i, j)| {
            kernel_matrix[[i, j]] - row_means[i] - col_means[j] + grand_mean
        });

    if kernel_matrix == kernel_matrix.t() {
        mirror_upper(&mut centered);
    }
    Ok(centered)
}

/// Cosine-normalize a kernel matrix: K[i,j] / sqrt(K[i,i] * K[j,j])
///
/// Fails with [`KernelError::DegenerateKernel`] if any diagonal entry is
/// not strictly positive.
pub fn normalize_matrix(kernel_matrix: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
    let n = ensure_square(kernel_matrix)?;
    let diagonal = kernel_matrix.diag();

    if let Some((i, &value)) = diagonal
        .iter()
        .enumerate()
        .find(|(_, d)| !(**d > 0.0 && d.is_finite()))
    {
        return Err(KernelError::DegenerateKernel(format!(
            "cannot normalize: diagonal entry K[{i},{i}] = {value} is not positive"
        )));
    }

    let sqrt_diag = diagonal.mapv(f64::sqrt);
    Ok(Array2::from_shape_fn((n, n), |(i, j)| {
        kernel_matrix[[i, j]] / (sqrt_diag[i] * sqrt_diag[j])
    }))
}

fn mirror_upper(matrix: &mut Array2<f64>) {
    let n = matrix.nrows();
    for i in 0..n {
        for j in i + 1..n {
            matrix[[j, i]] = matrix[[i, j]];
        }
    }
}

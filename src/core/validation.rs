//! Input validation for datasets, sample vectors and kernel matrices

use crate::core::{KernelError, Result};
use ndarray::{Array2, ArrayView1, ArrayView2};

/// Check that two sample vectors can be fed to a kernel function
///
/// Both vectors must be non-empty, of the same length and finite.
pub fn check_input_arrays(x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> Result<()> {
    if x.len() != y.len() {
        return Err(KernelError::DimensionMismatch {
            expected: x.len(),
            actual: y.len(),
        });
    }
    if x.is_empty() {
        return Err(KernelError::InvalidDataset(
            "sample vectors must have at least one feature".to_string(),
        ));
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return Err(KernelError::InvalidDataset(
            "sample vectors contain NaN or infinite values".to_string(),
        ));
    }
    Ok(())
}

/// Validate a dataset before it is attached to a kernel matrix
pub fn ensure_dataset(dataset: &Array2<f64>) -> Result<()> {
    let (n_samples, n_features) = dataset.dim();
    if n_samples == 0 {
        return Err(KernelError::EmptyDataset);
    }
    if n_features == 0 {
        return Err(KernelError::InvalidDataset(format!(
            "dataset of shape ({n_samples}, 0) has no features"
        )));
    }
    if contains_nan_inf(dataset.view()) {
        return Err(KernelError::InvalidDataset(
            "dataset contains NaN or infinite values".to_string(),
        ));
    }
    Ok(())
}

/// Build a 2-D dataset from row vectors, rejecting ragged input
pub fn ensure_2d(rows: &[Vec<f64>]) -> Result<Array2<f64>> {
    let n_features = rows.first().map(Vec::len).ok_or(KernelError::EmptyDataset)?;

    if let Some((row, sample)) = rows
        .iter()
        .enumerate()
        .find(|(_, sample)| sample.len() != n_features)
    {
        return Err(KernelError::InvalidDataset(format!(
            "row {row} has {} features, expected {n_features}",
            sample.len()
        )));
    }

    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    let dataset = Array2::from_shape_vec((rows.len(), n_features), flat)
        .map_err(|e| KernelError::InvalidDataset(e.to_string()))?;
    ensure_dataset(&dataset)?;
    Ok(dataset)
}

/// Returns true if any element is NaN or infinite
pub fn contains_nan_inf(matrix: ArrayView2<'_, f64>) -> bool {
    matrix.iter().any(|v| !v.is_finite())
}

/// Check that a matrix is square, returning its side length
pub fn ensure_square(matrix: ArrayView2<'_, f64>) -> Result<usize> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(KernelError::DimensionMismatch {
            expected: rows,
            actual: cols,
        });
    }
    Ok(rows)
}

/// Returns true if the matrix is square and equal to its transpose within `tol`
pub fn is_symmetric(matrix: ArrayView2<'_, f64>, tol: f64) -> bool {
    let n = match ensure_square(matrix) {
        Ok(n) => n,
        Err(_) => return false,
    };
    (0..n).all(|i| (i + 1..n).all(|j| (matrix[[i, j]] - matrix[[j, i]]).abs() <= tol))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1};

    #[test]
    fn test_check_input_arrays() {
        let x = array![1.0, 2.0, 3.0];
        let y = array![4.0, 5.0, 6.0];
        assert!(check_input_arrays(x.view(), y.view()).is_ok());

        let short = array![1.0, 2.0];
        assert!(matches!(
            check_input_arrays(x.view(), short.view()),
            Err(KernelError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));

        let empty = Array1::<f64>::zeros(0);
        assert!(check_input_arrays(empty.view(), empty.view()).is_err());

        let nan = array![1.0, f64::NAN, 3.0];
        assert!(check_input_arrays(x.view(), nan.view()).is_err());
    }

    #[test]
    fn test_ensure_dataset() {
        assert!(ensure_dataset(&Array2::zeros((3, 2))).is_ok());
        assert!(matches!(
            ensure_dataset(&Array2::zeros((0, 2))),
            Err(KernelError::EmptyDataset)
        ));
        assert!(ensure_dataset(&Array2::zeros((3, 0))).is_err());

        let mut data = Array2::zeros((2, 2));
        data[[1, 1]] = f64::INFINITY;
        assert!(ensure_dataset(&data).is_err());
    }

    #[test]
    fn test_ensure_2d() {
        let rows = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]];
        let dataset = ensure_2d(&rows).unwrap();
        assert_eq!(dataset.dim(), (3, 2));
        assert_eq!(dataset[[2, 0]], 5.0);

        let ragged = vec![vec![1.0, 2.0], vec![3.0]];
        let err = ensure_2d(&ragged).unwrap_err();
        assert!(err.to_string().contains("row 1"));

        assert!(matches!(ensure_2d(&[]), Err(KernelError::EmptyDataset)));
    }

    #[test]
    fn test_is_symmetric() {
        let sym = array![[1.0, 0.5], [0.5, 2.0]];
        assert!(is_symmetric(sym.view(), 1e-12));

        let asym = array![[1.0, 0.5], [0.4, 2.0]];
        assert!(!is_symmetric(asym.view(), 1e-12));
        assert!(is_symmetric(asym.view(), 0.2));

        let rect = Array2::<f64>::zeros((2, 3));
        assert!(!is_symmetric(rect.view(), 1.0));
    }

    #[test]
    fn test_contains_nan_inf() {
        let clean = array![[1.0, 2.0], [3.0, 4.0]];
        assert!(!contains_nan_inf(clean.view()));

        let dirty = array![[1.0, f64::NAN], [3.0, 4.0]];
        assert!(contains_nan_inf(dirty.view()));
    }
}

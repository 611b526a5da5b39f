//! Gaussian (RBF) kernel implementation
//!
//! The Gaussian kernel is defined as: K(x, y) = exp(-||x - y||² / (2σ²))
//! where σ (sigma) is the bandwidth controlling the kernel width.

use crate::core::{KernelError, Result};
use crate::kernel::Kernel;
use ndarray::ArrayView1;

/// Gaussian kernel: K(x, y) = exp(-||x - y||² / (2σ²))
///
/// The sigma parameter controls the "reach" of each sample:
/// - Small sigma: only close points are similar (potential overfitting)
/// - Large sigma: distant points remain similar (potential underfitting)
#[derive(Debug, Clone, Copy)]
pub struct GaussianKernel {
    sigma: f64,
    skip_input_checks: bool,
}

impl GaussianKernel {
    /// Create a new Gaussian kernel with specified bandwidth
    ///
    /// # Panics
    /// Panics if sigma is not positive
    pub fn new(sigma: f64) -> Self {
        assert!(sigma > 0.0, "Sigma must be positive, got: {}", sigma);
        Self {
            sigma,
            skip_input_checks: false,
        }
    }

    /// Fallible counterpart of [`GaussianKernel::new`]
    pub fn try_new(sigma: f64) -> Result<Self> {
        if !(sigma > 0.0 && sigma.is_finite()) {
            return Err(KernelError::InvalidParameter(format!(
                "gaussian sigma must be positive, got {sigma}"
            )));
        }
        Ok(Self::new(sigma))
    }

    /// Get the sigma parameter
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Equivalent RBF gamma = 1 / (2σ²)
    pub fn gamma(&self) -> f64 {
        1.0 / (2.0 * self.sigma * self.sigma)
    }

    pub fn with_skip_input_checks(mut self, skip: bool) -> Self {
        self.skip_input_checks = skip;
        self
    }
}

impl Default for GaussianKernel {
    /// Default Gaussian kernel with sigma = 2.0
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl Kernel for GaussianKernel {
    fn name(&self) -> &str {
        "gaussian"
    }

    fn evaluate(&self, x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> f64 {
        (-self.gamma() * squared_euclidean_distance(x, y)).exp()
    }

    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![("sigma", self.sigma)]
    }

    fn skip_input_checks(&self) -> bool {
        self.skip_input_checks
    }
}

/// ||x - y||² = Σᵢ (xᵢ - yᵢ)²
fn squared_euclidean_distance(x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> f64 {
    x.iter()
        .zip(y.iter())
        .map(|(a, b)| {
            let diff = a - b;
            diff * diff
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_gaussian_kernel_creation() {
        let kernel = GaussianKernel::new(0.5);
        assert_eq!(kernel.sigma(), 0.5);
        assert_eq!(kernel.gamma(), 2.0);

        let kernel_default = GaussianKernel::default();
        assert_eq!(kernel_default.sigma(), 2.0);
    }

    #[test]
    #[should_panic(expected = "Sigma must be positive")]
    fn test_gaussian_kernel_invalid_sigma() {
        GaussianKernel::new(-0.5);
    }

    #[test]
    fn test_try_new_zero_sigma() {
        assert!(matches!(
            GaussianKernel::try_new(0.0),
            Err(KernelError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_gaussian_kernel_identical_vectors() {
        let kernel = GaussianKernel::new(1.0);
        let x = array![1.0, 2.0, 3.0];

        // K(x, x) is always 1.0
        assert!((kernel.compute(x.view(), x.view()).unwrap() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_gaussian_kernel_value() {
        let kernel = GaussianKernel::new(1.0);
        let x = array![1.0, 0.0];
        let y = array![0.0, 1.0];

        // ||x - y||² = 2, K = exp(-2 / 2) = exp(-1)
        let expected = (-1.0_f64).exp();
        let result = kernel.compute(x.view(), y.view()).unwrap();
        assert!((result - expected).abs() < 1e-10);
    }

    #[test]
    fn test_gaussian_kernel_different_sigmas() {
        let x = array![1.0];
        let y = array![3.0];

        let narrow = GaussianKernel::new(0.5);
        let wide = GaussianKernel::new(10.0);

        // Wide bandwidth keeps distant points more similar
        assert!(wide.compute(x.view(), y.view()).unwrap() > narrow.compute(x.view(), y.view()).unwrap());
    }

    #[test]
    fn test_gaussian_kernel_symmetry() {
        let kernel = GaussianKernel::new(0.7);
        let x = array![1.0, 2.0, 3.0];
        let y = array![0.5, -1.0, 2.0];

        assert_eq!(
            kernel.compute(x.view(), y.view()).unwrap(),
            kernel.compute(y.view(), x.view()).unwrap()
        );
    }

    #[test]
    fn test_squared_euclidean_distance() {
        let x = array![1.0, 3.0, 2.0];
        let y = array![0.0, 2.0, 4.0];

        // 1 + 1 + 4 = 6
        assert_eq!(squared_euclidean_distance(x.view(), y.view()), 6.0);
        assert_eq!(squared_euclidean_distance(x.view(), x.view()), 0.0);
    }

    #[test]
    fn test_gaussian_kernel_numerical_stability() {
        let kernel = GaussianKernel::new(1e-3);
        let x = array![1e6];
        let y = array![-1e6];

        // Underflows to zero rather than producing NaN
        let result = kernel.compute(x.view(), y.view()).unwrap();
        assert!(result.is_finite());
        assert!((0.0..=1.0).contains(&result));
    }
}

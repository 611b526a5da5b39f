//! Laplacian kernel implementation
//!
//! K(x, y) = exp(-γ * ||x - y||₁)

use crate::core::{KernelError, Result};
use crate::kernel::Kernel;
use ndarray::ArrayView1;

/// Laplacian kernel: exponential of the negative scaled L1 distance
#[derive(Debug, Clone, Copy)]
pub struct LaplacianKernel {
    gamma: f64,
    skip_input_checks: bool,
}

impl LaplacianKernel {
    /// # Panics
    /// Panics if gamma is not positive
    pub fn new(gamma: f64) -> Self {
        assert!(gamma > 0.0, "Gamma must be positive, got: {}", gamma);
        Self {
            gamma,
            skip_input_checks: false,
        }
    }

    pub fn try_new(gamma: f64) -> Result<Self> {
        if !(gamma > 0.0 && gamma.is_finite()) {
            return Err(KernelError::InvalidParameter(format!(
                "laplacian gamma must be positive, got {gamma}"
            )));
        }
        Ok(Self::new(gamma))
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn with_skip_input_checks(mut self, skip: bool) -> Self {
        self.skip_input_checks = skip;
        self
    }
}

impl Default for LaplacianKernel {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Kernel for LaplacianKernel {
    fn name(&self) -> &str {
        "laplacian"
    }

    fn evaluate(&self, x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> f64 {
        let l1: f64 = x.iter().zip(y.iter()).map(|(a, b)| (a - b).abs()).sum();
        (-self.gamma * l1).exp()
    }

    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![("gamma", self.gamma)]
    }

    fn skip_input_checks(&self) -> bool {
        self.skip_input_checks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_laplacian_kernel_value() {
        let kernel = LaplacianKernel::new(0.5);
        let x = array![1.0, 2.0];
        let y = array![2.0, 0.0];

        // ||x - y||₁ = 1 + 2 = 3, K = exp(-1.5)
        let result = kernel.compute(x.view(), y.view()).unwrap();
        assert_relative_eq!(result, (-1.5_f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_laplacian_kernel_self_similarity() {
        let kernel = LaplacianKernel::default();
        let x = array![0.3, -4.0, 7.5];
        assert_eq!(kernel.compute(x.view(), x.view()).unwrap(), 1.0);
    }

    #[test]
    fn test_laplacian_kernel_describe() {
        assert_eq!(LaplacianKernel::new(2.0).describe(), "laplacian(gamma=2)");
    }

    #[test]
    #[should_panic(expected = "Gamma must be positive")]
    fn test_laplacian_kernel_invalid_gamma() {
        LaplacianKernel::new(0.0);
    }

    #[test]
    fn test_try_new_rejects_nan() {
        assert!(LaplacianKernel::try_new(f64::NAN).is_err());
    }
}

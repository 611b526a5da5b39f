//! Linear kernel implementation

use crate::kernel::traits::dot;
use crate::kernel::Kernel;
use ndarray::ArrayView1;

/// Linear kernel: K(x, y) = x^T * y
///
/// This is the simplest kernel function, computing the dot product between two vectors.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearKernel {
    skip_input_checks: bool,
}

impl LinearKernel {
    /// Create a new linear kernel
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skip_input_checks(mut self, skip: bool) -> Self {
        self.skip_input_checks = skip;
        self
    }
}

impl Kernel for LinearKernel {
    fn name(&self) -> &str {
        "linear"
    }

    fn evaluate(&self, x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> f64 {
        dot(x, y)
    }

    fn skip_input_checks(&self) -> bool {
        self.skip_input_checks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::KernelError;
    use ndarray::array;

    #[test]
    fn test_linear_kernel_basic() {
        let kernel = LinearKernel::new();

        let x = array![1.0, 2.0, 3.0];
        let y = array![4.0, 5.0, 6.0];

        // 1*4 + 2*5 + 3*6 = 32
        assert_eq!(kernel.compute(x.view(), y.view()).unwrap(), 32.0);
    }

    #[test]
    fn test_linear_kernel_identical() {
        let kernel = LinearKernel::new();
        let x = array![1.0, 2.0, 3.0];

        // x^T * x = 1^2 + 2^2 + 3^2 = 14
        assert_eq!(kernel.compute(x.view(), x.view()).unwrap(), 14.0);
    }

    #[test]
    fn test_linear_kernel_orthogonal() {
        let kernel = LinearKernel::new();
        let x = array![1.0, 0.0];
        let y = array![0.0, 2.0];

        assert_eq!(kernel.compute(x.view(), y.view()).unwrap(), 0.0);
    }

    #[test]
    fn test_linear_kernel_length_mismatch() {
        let kernel = LinearKernel::new();
        let x = array![1.0, 2.0, 3.0];
        let y = array![1.0, 2.0];

        assert!(matches!(
            kernel.compute(x.view(), y.view()),
            Err(KernelError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_linear_kernel_metadata() {
        let kernel = LinearKernel::new().with_skip_input_checks(true);
        assert_eq!(kernel.name(), "linear");
        assert!(kernel.params().is_empty());
        assert!(kernel.skip_input_checks());
        assert_eq!(kernel.describe(), "linear");
    }
}

//! Kernel trait definition

use crate::core::validation::check_input_arrays;
use crate::core::{KernelError, Result};
use ndarray::ArrayView1;

/// Kernel function trait
///
/// A kernel function K(x, y) is a symmetric similarity between two feature
/// vectors of equal length. Implementors provide the raw formula in
/// [`Kernel::evaluate`]; [`Kernel::compute`] wraps it with input and output
/// checks unless [`Kernel::skip_input_checks`] is set.
pub trait Kernel: Send + Sync {
    /// Short identifier such as `linear` or `gaussian`
    fn name(&self) -> &str;

    /// Raw kernel value K(x, y), without any validation
    fn evaluate(&self, x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> f64;

    /// Scalar hyperparameters in declaration order
    fn params(&self) -> Vec<(&'static str, f64)> {
        Vec::new()
    }

    /// Skip per-call validation once inputs are known to be well formed
    fn skip_input_checks(&self) -> bool {
        false
    }

    /// Compute kernel value K(x, y)
    fn compute(&self, x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> Result<f64> {
        if self.skip_input_checks() {
            return Ok(self.evaluate(x, y));
        }

        check_input_arrays(x, y)?;
        let value = self.evaluate(x, y);
        if !value.is_finite() {
            return Err(KernelError::KernelContract(format!(
                "{} returned a non-finite value ({value})",
                self.describe()
            )));
        }
        Ok(value)
    }

    /// Human readable description, e.g. `polynomial(degree=2, b=0, gamma=1)`
    fn describe(&self) -> String {
        let params = self.params();
        if params.is_empty() {
            return self.name().to_string();
        }
        let rendered: Vec<String> = params
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        format!("{}({})", self.name(), rendered.join(", "))
    }
}

impl<K: Kernel + ?Sized> Kernel for Box<K> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn evaluate(&self, x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> f64 {
        (**self).evaluate(x, y)
    }

    fn params(&self) -> Vec<(&'static str, f64)> {
        (**self).params()
    }

    fn skip_input_checks(&self) -> bool {
        (**self).skip_input_checks()
    }

    fn compute(&self, x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> Result<f64> {
        (**self).compute(x, y)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Dot product of two dense vectors
pub(crate) fn dot(x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> f64 {
    x.iter().zip(y.iter()).map(|(a, b)| a * b).sum()
}

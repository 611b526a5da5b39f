//! Kernels backed by user supplied closures

use crate::core::{KernelError, Result};
use crate::kernel::Kernel;
use ndarray::ArrayView1;
use std::fmt;

/// Named kernel wrapping any `Fn(x, y) -> f64`
///
/// ```
/// use kernelmethods::kernel::{FnKernel, Kernel};
/// use ndarray::array;
///
/// let cosine = FnKernel::new("cosine", |x, y| x.dot(&y) / (x.dot(&x) * y.dot(&y)).sqrt()).unwrap();
/// let x = array![1.0, 0.0];
/// assert_eq!(cosine.compute(x.view(), x.view()).unwrap(), 1.0);
/// ```
pub struct FnKernel<F> {
    name: String,
    func: F,
    params: Vec<(&'static str, f64)>,
    skip_input_checks: bool,
}

impl<F> FnKernel<F> {
    /// Wrap `func` under `name`
    ///
    /// Fails with [`KernelError::KernelContract`] when the name is blank,
    /// since kernels are identified by name in sets and reports.
    pub fn new(name: impl Into<String>, func: F) -> Result<Self>
    where
        F: Fn(ArrayView1<'_, f64>, ArrayView1<'_, f64>) -> f64 + Send + Sync,
    {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(KernelError::KernelContract(
                "kernel functions must have a non-empty name".to_string(),
            ));
        }
        Ok(Self {
            name,
            func,
            params: Vec::new(),
            skip_input_checks: false,
        })
    }

    /// Declare a hyperparameter for reporting purposes
    pub fn with_param(mut self, key: &'static str, value: f64) -> Self {
        self.params.push((key, value));
        self
    }

    pub fn with_skip_input_checks(mut self, skip: bool) -> Self {
        self.skip_input_checks = skip;
        self
    }
}

impl<F> Kernel for FnKernel<F>
where
    F: Fn(ArrayView1<'_, f64>, ArrayView1<'_, f64>) -> f64 + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> f64 {
        (self.func)(x, y)
    }

    fn params(&self) -> Vec<(&'static str, f64)> {
        self.params.clone()
    }

    fn skip_input_checks(&self) -> bool {
        self.skip_input_checks
    }
}

impl<F> fmt::Debug for FnKernel<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnKernel")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("skip_input_checks", &self.skip_input_checks)
            .finish()
    }
}

//! Polynomial Kernel Implementation
//!
//! The polynomial kernel is defined as:
//! K(x, y) = (γ * <x, y> + b)^d
//!
//! Where:
//! - γ (gamma): scaling factor for the dot product
//! - b: independent term in the polynomial
//! - d (degree): degree of the polynomial
//!
//! Common configurations:
//! - Homogeneous kernel: d=3, γ=1, b=0 (the default)
//! - Quadratic kernel: d=2, γ=1, b=1
//! - Cubic kernel: d=3, γ=1, b=1

use crate::core::{KernelError, Result};
use crate::kernel::traits::{dot, Kernel};
use ndarray::ArrayView1;

/// Largest accepted degree; the exponent is evaluated with `f64::powi`
pub const MAX_POLYNOMIAL_DEGREE: u32 = i32::MAX as u32;

/// Polynomial kernel with configurable degree, gamma, and intercept
#[derive(Debug, Clone)]
pub struct PolynomialKernel {
    degree: u32,
    b: f64,
    gamma: f64,
    skip_input_checks: bool,
}

impl PolynomialKernel {
    /// Creates a new polynomial kernel with the specified parameters
    ///
    /// # Arguments
    /// * `degree` - Degree of the polynomial (1 to [`MAX_POLYNOMIAL_DEGREE`])
    /// * `b` - Independent term (must be non-negative)
    /// * `gamma` - Scaling factor for the dot product (must be > 0)
    ///
    /// # Examples
    /// ```
    /// use kernelmethods::kernel::PolynomialKernel;
    ///
    /// // Quadratic kernel: (x·y + 1)²
    /// let quad_kernel = PolynomialKernel::new(2, 1.0, 1.0);
    /// assert_eq!(quad_kernel.degree(), 2);
    /// ```
    ///
    /// # Panics
    /// Panics on invalid parameters; use [`PolynomialKernel::try_new`] to get an error instead.
    pub fn new(degree: u32, b: f64, gamma: f64) -> Self {
        assert!(degree > 0, "Polynomial degree must be positive");
        assert!(
            degree <= MAX_POLYNOMIAL_DEGREE,
            "Polynomial degree must not exceed {MAX_POLYNOMIAL_DEGREE}, got {degree}"
        );
        assert!(gamma > 0.0, "Gamma must be positive");
        assert!(b >= 0.0, "Intercept b must be non-negative");

        Self {
            degree,
            b,
            gamma,
            skip_input_checks: false,
        }
    }

    /// Fallible counterpart of [`PolynomialKernel::new`]
    pub fn try_new(degree: u32, b: f64, gamma: f64) -> Result<Self> {
        if degree == 0 {
            return Err(KernelError::InvalidParameter(
                "polynomial degree must be positive".to_string(),
            ));
        }
        if degree > MAX_POLYNOMIAL_DEGREE {
            return Err(KernelError::InvalidParameter(format!(
                "polynomial degree must not exceed {MAX_POLYNOMIAL_DEGREE}, got {degree}"
            )));
        }
        if !(gamma > 0.0 && gamma.is_finite()) {
            return Err(KernelError::InvalidParameter(format!(
                "polynomial gamma must be positive, got {gamma}"
            )));
        }
        if !(b >= 0.0 && b.is_finite()) {
            return Err(KernelError::InvalidParameter(format!(
                "polynomial intercept b must be non-negative, got {b}"
            )));
        }
        Ok(Self::new(degree, b, gamma))
    }

    /// Creates a homogeneous kernel of the given degree: <x,y>^d
    pub fn with_degree(degree: u32) -> Self {
        Self::new(degree, 0.0, 1.0)
    }

    /// Creates a quadratic kernel: (γ * <x,y> + 1)²
    pub fn quadratic(gamma: f64) -> Self {
        Self::new(2, 1.0, gamma)
    }

    /// Creates a cubic kernel: (γ * <x,y> + 1)³
    pub fn cubic(gamma: f64) -> Self {
        Self::new(3, 1.0, gamma)
    }

    /// Degree of the polynomial (default: 3)
    pub fn degree(&self) -> u32 {
        self.degree
    }

    /// Independent term (default: 0.0)
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Scaling factor for the dot product (default: 1.0)
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn with_skip_input_checks(mut self, skip: bool) -> Self {
        self.skip_input_checks = skip;
        self
    }
}

impl Default for PolynomialKernel {
    fn default() -> Self {
        Self::new(3, 0.0, 1.0)
    }
}

impl Kernel for PolynomialKernel {
    fn name(&self) -> &str {
        "polynomial"
    }

    fn evaluate(&self, x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> f64 {
        // degree <= MAX_POLYNOMIAL_DEGREE is enforced at construction
        (self.gamma * dot(x, y) + self.b).powi(self.degree as i32)
    }

    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("degree", self.degree as f64),
            ("b", self.b),
            ("gamma", self.gamma),
        ]
    }

    fn skip_input_checks(&self) -> bool {
        self.skip_input_checks
    }
}

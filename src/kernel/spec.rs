//! Declarative kernel configuration
//!
//! A [`KernelSpec`] names a built-in kernel and its hyperparameters. It can be
//! (de)serialized with serde or parsed from compact strings such as
//! `linear`, `poly:degree=2,b=1` or `gaussian:sigma=10`.

use crate::core::{KernelError, Result};
use crate::kernel::{
    GaussianKernel, Kernel, LaplacianKernel, LinearKernel, PolynomialKernel,
    MAX_POLYNOMIAL_DEGREE,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kernel", rename_all = "lowercase")]
pub enum KernelSpec {
    Linear,
    Polynomial { degree: u32, b: f64, gamma: f64 },
    Gaussian { sigma: f64 },
    Laplacian { gamma: f64 },
}

impl KernelSpec {
    /// Instantiate the described kernel
    pub fn build(&self, skip_input_checks: bool) -> Result<Box<dyn Kernel>> {
        let kernel: Box<dyn Kernel> = match *self {
            Self::Linear => Box::new(LinearKernel::new().with_skip_input_checks(skip_input_checks)),
            Self::Polynomial { degree, b, gamma } => Box::new(
                PolynomialKernel::try_new(degree, b, gamma)?
                    .with_skip_input_checks(skip_input_checks),
            ),
            Self::Gaussian { sigma } => Box::new(
                GaussianKernel::try_new(sigma)?.with_skip_input_checks(skip_input_checks),
            ),
            Self::Laplacian { gamma } => Box::new(
                LaplacianKernel::try_new(gamma)?.with_skip_input_checks(skip_input_checks),
            ),
        };
        Ok(kernel)
    }
}

impl fmt::Display for KernelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("linear"),
            Self::Polynomial { degree, b, gamma } => {
                write!(f, "polynomial:degree={degree},b={b},gamma={gamma}")
            }
            Self::Gaussian { sigma } => write!(f, "gaussian:sigma={sigma}"),
            Self::Laplacian { gamma } => write!(f, "laplacian:gamma={gamma}"),
        }
    }
}

impl FromStr for KernelSpec {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self> {
        let (kind, args) = match s.split_once(':') {
            Some((kind, args)) => (kind.trim().to_lowercase(), args),
            None => (s.trim().to_lowercase(), ""),
        };

        let mut params = Vec::new();
        for pair in args.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                KernelError::ParseError(format!("expected key=value, got '{pair}'"))
            })?;
            let value = value.trim().parse::<f64>().map_err(|_| {
                KernelError::ParseError(format!("invalid value for '{}': {value}", key.trim()))
            })?;
            params.push((key.trim().to_lowercase(), value));
        }

        let mut take = |key: &str, default: f64| -> f64 {
            match params.iter().position(|(k, _)| k == key) {
                Some(pos) => params.remove(pos).1,
                None => default,
            }
        };

        let spec = match kind.as_str() {
            "linear" => Self::Linear,
            "poly" | "polynomial" => {
                let raw_degree = take("degree", 3.0);
                let degree = parse_degree(raw_degree).ok_or_else(|| {
                    KernelError::InvalidParameter(format!(
                        "polynomial degree must be an integer in 1..={MAX_POLYNOMIAL_DEGREE}, got {raw_degree}"
                    ))
                })?;
                Self::Polynomial {
                    degree,
                    b: take("b", 0.0),
                    gamma: take("gamma", 1.0),
                }
            }
            "gaussian" | "rbf" => Self::Gaussian {
                sigma: take("sigma", 2.0),
            },
            "laplacian" => Self::Laplacian {
                gamma: take("gamma", 1.0),
            },
            other => {
                return Err(KernelError::InvalidParameter(format!(
                    "unknown kernel '{other}', expected linear, polynomial, gaussian or laplacian"
                )))
            }
        };

        if let Some((key, _)) = params.first() {
            return Err(KernelError::InvalidParameter(format!(
                "unknown parameter '{key}' for {kind} kernel"
            )));
        }
        Ok(spec)
    }
}

/// Exact positive integer degree that fits the `powi` exponent range
fn parse_degree(value: f64) -> Option<u32> {
    if value.fract() != 0.0 || !(1.0..=MAX_POLYNOMIAL_DEGREE as f64).contains(&value) {
        return None;
    }
    i32::try_from(value as i64).ok().and_then(|d| u32::try_from(d).ok())
}

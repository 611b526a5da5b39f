//! Lazily evaluated kernel matrix
//!
//! A [`KernelMatrix`] binds one kernel function to a dataset and computes the
//! Gram matrix K[i,j] = k(x_i, x_j) on demand. Every evaluation is stored in a
//! [`KernelCache`] under the canonical pair (min(i,j), max(i,j)), so K[i,j]
//! and K[j,i] are the same lookup and each pair is evaluated at most once per
//! attachment.
//!
//! ```
//! use kernelmethods::{KernelMatrix, LinearKernel};
//! use ndarray::array;
//!
//! let mut km = KernelMatrix::new(LinearKernel::new());
//! km.attach_to(array![[1.0, 0.0], [1.0, 1.0]]).unwrap();
//!
//! assert_eq!(km.get(0, 1).unwrap(), 1.0);
//! assert_eq!(km.full().unwrap(), array![[1.0, 1.0], [1.0, 2.0]]);
//! ```

use crate::attributes::{AttrValue, AttributeStore};
use crate::cache::{CacheStats, KernelCache, PairKey};
use crate::core::validation::{ensure_2d, ensure_dataset};
use crate::core::{AlignmentMethod, KernelError, Result, Transform};
use crate::kernel::Kernel;
use crate::ops;
use log::{debug, trace};
use ndarray::{Array1, Array2};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

/// Numeric state tied to the current attachment
#[derive(Debug, Default)]
struct MatrixState {
    /// Raw kernel evaluations, never transformed
    cache: KernelCache,
    /// Materialized n×n matrix with `transform` applied
    values: Option<Array2<f64>>,
    transform: Transform,
}

/// Gram matrix of one kernel function over an attached dataset
pub struct KernelMatrix {
    kernel: Box<dyn Kernel>,
    dataset: Option<Arc<Array2<f64>>>,
    state: Mutex<MatrixState>,
    attributes: RwLock<AttributeStore>,
}

impl KernelMatrix {
    /// Create an unattached kernel matrix for `kernel`
    pub fn new<K: Kernel + 'static>(kernel: K) -> Self {
        Self::from_boxed(Box::new(kernel))
    }

    pub fn from_boxed(kernel: Box<dyn Kernel>) -> Self {
        Self {
            kernel,
            dataset: None,
            state: Mutex::new(MatrixState::default()),
            attributes: RwLock::new(AttributeStore::new()),
        }
    }

    /// Create a kernel matrix and attach it to `dataset` in one step
    pub fn attached<K: Kernel + 'static>(
        kernel: K,
        dataset: impl Into<Arc<Array2<f64>>>,
    ) -> Result<Self> {
        let mut km = Self::new(kernel);
        km.attach_to(dataset)?;
        Ok(km)
    }

    /// Bind a dataset of shape (n_samples, n_features)
    ///
    /// Clears every cached value and resets the transform to
    /// [`Transform::Raw`]. The dataset is shared, not copied; it must not be
    /// mutated while attached (attach again to pick up new data).
    pub fn attach_to(&mut self, dataset: impl Into<Arc<Array2<f64>>>) -> Result<()> {
        let dataset = dataset.into();
        ensure_dataset(&dataset)?;

        let (n_samples, n_features) = dataset.dim();
        debug!(
            "attaching {} to dataset of shape ({}, {})",
            self.kernel.describe(),
            n_samples,
            n_features
        );

        *self.state_mut() = MatrixState {
            cache: KernelCache::for_samples(n_samples),
            ..MatrixState::default()
        };
        self.dataset = Some(dataset);
        Ok(())
    }

    /// Attach row vectors, rejecting ragged or empty input
    pub fn attach_rows(&mut self, rows: &[Vec<f64>]) -> Result<()> {
        let dataset = ensure_2d(rows)?;
        self.attach_to(dataset)
    }

    pub fn kernel(&self) -> &dyn Kernel {
        self.kernel.as_ref()
    }

    /// Kernel description used in messages, e.g. `gaussian(sigma=10)`
    pub fn name(&self) -> String {
        self.kernel.describe()
    }

    pub fn is_attached(&self) -> bool {
        self.dataset.is_some()
    }

    /// Number of samples of the attached dataset, `None` when unattached
    pub fn num_samples(&self) -> Option<usize> {
        self.dataset.as_ref().map(|d| d.nrows())
    }

    pub fn num_features(&self) -> Option<usize> {
        self.dataset.as_ref().map(|d| d.ncols())
    }

    pub fn dataset(&self) -> Option<&Arc<Array2<f64>>> {
        self.dataset.as_ref()
    }

    /// Similarity between samples `i` and `j`, computed on first request
    pub fn get(&self, i: usize, j: usize) -> Result<f64> {
        let dataset = self.require_dataset()?;
        let num_samples = dataset.nrows();
        if i >= num_samples || j >= num_samples {
            return Err(KernelError::SampleIndexOutOfBounds { i, j, num_samples });
        }

        let mut state = self.state();
        if let Some(values) = state.values.as_ref() {
            return Ok(values[[i, j]]);
        }
        self.evaluate_pair(dataset, &mut state, i, j)
    }

    /// The complete n×n matrix
    ///
    /// Pairs already in the cache are reused; only missing pairs with i <= j
    /// are evaluated and mirrored. The result is kept for later calls.
    pub fn full(&self) -> Result<Array2<f64>> {
        let dataset = self.require_dataset()?;
        let mut state = self.state();
        if let Some(values) = state.values.as_ref() {
            return Ok(values.clone());
        }

        let full = self.raw_full(dataset, &mut state)?;
        state.values = Some(full.clone());
        Ok(full)
    }

    /// Diagonal K[i,i] for every sample
    pub fn diagonal(&self) -> Result<Array1<f64>> {
        let n = self.require_dataset()?.nrows();
        (0..n).map(|i| self.get(i, i)).collect()
    }

    /// Double-center the matrix in feature space
    ///
    /// Re-centering an already centered matrix changes it only within
    /// floating-point tolerance. Centering a normalized matrix starts again
    /// from the raw kernel values.
    pub fn center(&self) -> Result<()> {
        let dataset = self.require_dataset()?;
        let mut state = self.state();
        let base = self.transform_base(dataset, &mut state, Transform::Centered)?;

        state.values = Some(ops::center_matrix(base.view())?);
        state.transform = Transform::Centered;
        debug!("centered {}", self.kernel.describe());
        Ok(())
    }

    /// Cosine-normalize: K[i,j] / sqrt(K[i,i] * K[j,j])
    ///
    /// Fails with [`KernelError::DegenerateKernel`] if any raw diagonal entry
    /// is not positive; the matrix is left unchanged in that case.
    pub fn normalize(&self) -> Result<()> {
        let dataset = self.require_dataset()?;
        let mut state = self.state();
        let base = self.transform_base(dataset, &mut state, Transform::Normalized)?;

        let normalized = ops::normalize_matrix(base.view()).map_err(|e| match e {
            KernelError::DegenerateKernel(msg) => {
                KernelError::DegenerateKernel(format!("{}: {msg}", self.kernel.describe()))
            }
            other => other,
        })?;
        state.values = Some(normalized);
        state.transform = Transform::Normalized;
        debug!("normalized {}", self.kernel.describe());
        Ok(())
    }

    /// Transform currently baked into the values
    pub fn transform(&self) -> Transform {
        self.state().transform
    }

    pub fn is_centered(&self) -> bool {
        self.transform() == Transform::Centered
    }

    pub fn is_normalized(&self) -> bool {
        self.transform() == Transform::Normalized
    }

    /// Alignment of the full matrix with `target`
    pub fn alignment_to(&self, target: &Array2<f64>, method: AlignmentMethod) -> Result<f64> {
        let full = self.full()?;
        ops::alignment(full.view(), target.view(), method)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.state().cache.stats()
    }

    /// Store a metadata attribute; never touches the numeric state
    pub fn set_attr(&self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.attributes_mut().set(key, value);
    }

    /// Look up a metadata attribute, `None` when absent
    pub fn get_attr(&self, key: &str) -> Option<AttrValue> {
        self.attributes().get(key).cloned()
    }

    /// Look up a metadata attribute, falling back to `default`
    pub fn get_attr_or(&self, key: &str, default: impl Into<AttrValue>) -> AttrValue {
        self.attributes().get_or(key, default)
    }

    pub fn attr_keys(&self) -> Vec<String> {
        self.attributes().keys().map(str::to_string).collect()
    }

    fn require_dataset(&self) -> Result<&Array2<f64>> {
        self.dataset
            .as_deref()
            .ok_or_else(|| KernelError::NotAttached(self.kernel.describe()))
    }

    fn evaluate_pair(
        &self,
        dataset: &Array2<f64>,
        state: &mut MatrixState,
        i: usize,
        j: usize,
    ) -> Result<f64> {
        if let Some(value) = state.cache.get(i, j) {
            return Ok(value);
        }

        // Always evaluate in canonical order so K[i,j] and K[j,i] are bit-identical
        let (a, b) = PairKey::new(i, j).indices();
        let value = self.kernel.compute(dataset.row(a), dataset.row(b))?;
        trace!("{}: K[{a},{b}] = {value}", self.kernel.name());
        state.cache.put(a, b, value);
        Ok(value)
    }

    fn raw_full(&self, dataset: &Array2<f64>, state: &mut MatrixState) -> Result<Array2<f64>> {
        let n = dataset.nrows();
        let cached_before = state.cache.len();

        let mut full = Array2::zeros((n, n));
        for i in 0..n {
            for j in i..n {
                let value = self.evaluate_pair(dataset, state, i, j)?;
                full[[i, j]] = value;
                full[[j, i]] = value;
            }
        }

        debug!(
            "materialized {}x{} matrix for {} ({} new evaluations)",
            n,
            n,
            self.kernel.describe(),
            state.cache.len() - cached_before
        );
        Ok(full)
    }

    /// Matrix a transform starts from: the current values when the same
    /// transform is re-applied, the raw matrix otherwise
    fn transform_base(
        &self,
        dataset: &Array2<f64>,
        state: &mut MatrixState,
        target: Transform,
    ) -> Result<Array2<f64>> {
        if state.transform == target || state.transform == Transform::Raw {
            if let Some(values) = state.values.as_ref() {
                return Ok(values.clone());
            }
        }
        self.raw_full(dataset, state)
    }

    fn state(&self) -> MutexGuard<'_, MatrixState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn state_mut(&mut self) -> &mut MatrixState {
        self.state.get_mut().unwrap_or_else(PoisonError::into_inner)
    }

    fn attributes(&self) -> std::sync::RwLockReadGuard<'_, AttributeStore> {
        self.attributes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn attributes_mut(&self) -> std::sync::RwLockWriteGuard<'_, AttributeStore> {
        self.attributes.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for KernelMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KernelMatrix")
            .field("kernel", &self.kernel.describe())
            .field("num_samples", &self.num_samples())
            .field("transform", &self.transform())
            .finish()
    }
}

impl fmt::Display for KernelMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.num_samples() {
            Some(n) => write!(
                f,
                "KernelMatrix({}, {} samples, {})",
                self.kernel.describe(),
                n,
                self.transform()
            ),
            None => write!(f, "KernelMatrix({}, unattached)", self.kernel.describe()),
        }
    }
}

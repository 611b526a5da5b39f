//! Collections of kernel matrices over one sample population
//!
//! A [`KernelSet`] groups kernel matrices that are index-aligned: every
//! member is attached to a dataset with the same number of samples, so
//! K_a[i,j] and K_b[i,j] always refer to the same pair of samples. This is
//! what multiple-kernel learning and kernel alignment rely on, and it is
//! checked on every insertion.

use crate::attributes::AttrAssignment;
use crate::core::{AlignmentMethod, KernelError, MatrixOp, MemberIndex, Result};
use crate::matrix::KernelMatrix;
use crate::ops;
use log::debug;
use ndarray::Array2;
use std::fmt;
use std::sync::Arc;

/// Ordered set of kernel matrices sharing one sample count
#[derive(Debug, Clone, Default)]
pub struct KernelSet {
    members: Vec<Arc<KernelMatrix>>,
    num_samples: Option<usize>,
}

impl KernelSet {
    /// Empty set whose size is fixed by the first appended member
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty set that only accepts members with `num_samples` samples
    pub fn with_num_samples(num_samples: usize) -> Self {
        Self {
            members: Vec::new(),
            num_samples: Some(num_samples),
        }
    }

    /// Build a set from an initial collection
    ///
    /// Every member is validated against the declared size (if any) and
    /// against the members before it; the first mismatch fails the whole
    /// construction with [`KernelError::SetAddition`].
    pub fn from_members<I, M>(members: I, num_samples: Option<usize>) -> Result<Self>
    where
        I: IntoIterator<Item = M>,
        M: Into<Arc<KernelMatrix>>,
    {
        let mut set = Self {
            members: Vec::new(),
            num_samples,
        };
        for km in members {
            set.append(km)?;
        }
        Ok(set)
    }

    /// Add one attached kernel matrix
    ///
    /// Fails with [`KernelError::SetAddition`] if the matrix is unattached or
    /// its sample count differs from the set's; the set is left unchanged.
    pub fn append(&mut self, km: impl Into<Arc<KernelMatrix>>) -> Result<()> {
        let km = km.into();
        let position = self.members.len();
        let addition_error = |reason: String| KernelError::SetAddition {
            position,
            name: km.name(),
            reason,
        };

        let n = km
            .num_samples()
            .ok_or_else(|| addition_error("kernel matrix is not attached to a dataset".to_string()))?;

        match self.num_samples {
            Some(expected) if expected != n => {
                return Err(addition_error(format!(
                    "expected {expected} samples, got {n}"
                )));
            }
            Some(_) => {}
            None => {
                debug!("kernel set size fixed to {n} samples by {}", km.name());
                self.num_samples = Some(n);
            }
        }

        self.members.push(km);
        Ok(())
    }

    /// Append several members, all or nothing
    pub fn extend<I, M>(&mut self, members: I) -> Result<()>
    where
        I: IntoIterator<Item = M>,
        M: Into<Arc<KernelMatrix>>,
    {
        let mut candidate = self.clone();
        for km in members {
            candidate.append(km)?;
        }
        *self = candidate;
        Ok(())
    }

    /// Number of members
    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Sample count shared by all members, once known
    pub fn num_samples(&self) -> Option<usize> {
        self.num_samples
    }

    /// Member at `index`
    ///
    /// Negative or out-of-range integers fail with
    /// [`KernelError::IndexOutOfBounds`]; non-integer indices fail with
    /// [`KernelError::InvalidIndexType`].
    pub fn get(&self, index: impl Into<MemberIndex>) -> Result<&Arc<KernelMatrix>> {
        let position = index.into().resolve(self.members.len())?;
        Ok(&self.members[position])
    }

    /// New set with the members at `indices`, in that order
    ///
    /// Members are shared with `self`, not copied, and `self` is unchanged.
    pub fn take<I, T>(&self, indices: I) -> Result<KernelSet>
    where
        I: IntoIterator<Item = T>,
        T: Into<MemberIndex>,
    {
        let members = indices
            .into_iter()
            .map(|index| self.get(index).map(Arc::clone))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            members,
            num_samples: self.num_samples,
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<KernelMatrix>> {
        self.members.iter()
    }

    /// Set an attribute on every member
    ///
    /// A single value is broadcast; a per-member sequence must have exactly
    /// [`KernelSet::size`] elements and assigns element `i` to member `i`.
    pub fn set_attr(&self, key: &str, value: impl Into<AttrAssignment>) -> Result<()> {
        match value.into() {
            AttrAssignment::Broadcast(value) => {
                for km in &self.members {
                    km.set_attr(key, value.clone());
                }
            }
            AttrAssignment::PerMember(values) => {
                if values.len() != self.members.len() {
                    return Err(KernelError::InvalidParameter(format!(
                        "attribute '{key}' has {} values for {} kernel matrices",
                        values.len(),
                        self.members.len()
                    )));
                }
                for (km, value) in self.members.iter().zip(values) {
                    km.set_attr(key, value);
                }
            }
        }
        Ok(())
    }

    /// Materialize every member
    pub fn full_matrices(&self) -> Result<Vec<Array2<f64>>> {
        self.members.iter().map(|km| km.full()).collect()
    }

    /// Combine all members element-wise into a single kernel matrix
    pub fn combine(&self, op: MatrixOp) -> Result<Array2<f64>> {
        if self.members.is_empty() {
            return Err(KernelError::InvalidOperation {
                given: op.as_str().to_string(),
                valid: "a non-empty kernel set".to_string(),
            });
        }
        ops::combine(&self.full_matrices()?, op)
    }

    /// Alignment of every member with `target`, in member order
    pub fn alignments(&self, target: &Array2<f64>, method: AlignmentMethod) -> Result<Vec<f64>> {
        self.members
            .iter()
            .map(|km| km.alignment_to(target, method))
            .collect()
    }
}

impl<'a> IntoIterator for &'a KernelSet {
    type Item = &'a Arc<KernelMatrix>;
    type IntoIter = std::slice::Iter<'a, Arc<KernelMatrix>>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl fmt::Display for KernelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.num_samples {
            Some(n) => writeln!(f, "KernelSet({} kernels, {} samples)", self.size(), n)?,
            None => writeln!(f, "KernelSet({} kernels)", self.size())?,
        }
        for (i, km) in self.members.iter().enumerate() {
            writeln!(f, "  {i}: {km}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttrValue;
    use crate::kernel::{GaussianKernel, LinearKernel, PolynomialKernel};
    use ndarray::array;

    fn data(n: usize) -> Array2<f64> {
        Array2::from_shape_fn((n, 2), |(i, j)| (i as f64 + 1.0) * (j as f64 - 0.5))
    }

    fn three_member_set() -> KernelSet {
        KernelSet::from_members(
            vec![
                KernelMatrix::attached(LinearKernel::new(), data(4)).unwrap(),
                KernelMatrix::attached(PolynomialKernel::new(2, 1.0, 1.0), data(4)).unwrap(),
                KernelMatrix::attached(GaussianKernel::new(1.0), data(4)).unwrap(),
            ],
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_empty_set() {
        let set = KernelSet::new();
        assert!(set.is_empty());
        assert_eq!(set.size(), 0);
        assert_eq!(set.num_samples(), None);
        assert_eq!(set.iter().count(), 0);
    }

    #[test]
    fn test_first_append_fixes_size() {
        let mut set = KernelSet::new();
        set.append(KernelMatrix::attached(LinearKernel::new(), data(4)).unwrap())
            .unwrap();
        assert_eq!(set.num_samples(), Some(4));

        let err = set
            .append(KernelMatrix::attached(LinearKernel::new(), data(5)).unwrap())
            .unwrap_err();
        assert!(matches!(err, KernelError::SetAddition { position: 1, .. }));
        assert_eq!(set.size(), 1);
    }

    #[test]
    fn test_declared_size_mismatch() {
        let mut set = KernelSet::with_num_samples(5);
        let err = set
            .append(KernelMatrix::attached(LinearKernel::new(), data(4)).unwrap())
            .unwrap_err();

        assert!(err.to_string().contains("expected 5 samples, got 4"));
        assert!(set.is_empty());
        assert_eq!(set.num_samples(), Some(5));
    }

    #[test]
    fn test_unattached_member_rejected() {
        let mut set = KernelSet::new();
        let err = set.append(KernelMatrix::new(LinearKernel::new())).unwrap_err();
        assert!(matches!(err, KernelError::SetAddition { .. }));
        assert_eq!(set.num_samples(), None);
    }

    #[test]
    fn test_from_members_names_offender() {
        let err = KernelSet::from_members(
            vec![
                KernelMatrix::attached(LinearKernel::new(), data(4)).unwrap(),
                KernelMatrix::attached(GaussianKernel::new(3.0), data(6)).unwrap(),
            ],
            None,
        )
        .unwrap_err();

        match err {
            KernelError::SetAddition { position, name, .. } => {
                assert_eq!(position, 1);
                assert_eq!(name, "gaussian(sigma=3)");
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(KernelSet::from_members(
            vec![KernelMatrix::attached(LinearKernel::new(), data(4)).unwrap()],
            Some(3),
        )
        .is_err());
    }

    #[test]
    fn test_extend_is_all_or_nothing() {
        let mut set = three_member_set();
        let result = set.extend(vec![
            KernelMatrix::attached(LinearKernel::new(), data(4)).unwrap(),
            KernelMatrix::attached(LinearKernel::new(), data(9)).unwrap(),
        ]);
        assert!(result.is_err());
        assert_eq!(set.size(), 3);

        set.extend(vec![KernelMatrix::attached(LinearKernel::new(), data(4)).unwrap()])
            .unwrap();
        assert_eq!(set.size(), 4);
    }

    #[test]
    fn test_get_bounds_and_types() {
        let set = three_member_set();
        assert_eq!(set.get(0).unwrap().kernel().name(), "linear");
        assert_eq!(set.get(2usize).unwrap().kernel().name(), "gaussian");

        for invalid in [-1, 3] {
            assert!(matches!(
                set.get(invalid),
                Err(KernelError::IndexOutOfBounds { .. })
            ));
        }
        assert!(matches!(set.get(1.0), Err(KernelError::InvalidIndexType(_))));
        assert!(matches!(set.get("1"), Err(KernelError::InvalidIndexType(_))));
    }

    #[test]
    fn test_take_aliases_members() {
        let set = three_member_set();
        let subset = set.take([2, 0]).unwrap();

        assert_eq!(subset.size(), 2);
        assert_eq!(set.size(), 3);
        assert_eq!(subset.num_samples(), Some(4));
        assert!(Arc::ptr_eq(subset.get(0).unwrap(), set.get(2).unwrap()));
        assert!(Arc::ptr_eq(subset.get(1).unwrap(), set.get(0).unwrap()));

        assert!(set.take([0, 3]).is_err());
        assert!(set.take([-1]).is_err());
    }

    #[test]
    fn test_iteration_is_restartable() {
        let set = three_member_set();
        let names: Vec<String> = set.iter().map(|km| km.kernel().name().to_string()).collect();
        assert_eq!(names, vec!["linear", "polynomial", "gaussian"]);

        let again: Vec<String> = (&set)
            .into_iter()
            .map(|km| km.kernel().name().to_string())
            .collect();
        assert_eq!(names, again);
    }

    #[test]
    fn test_set_attr_broadcast_and_per_member() {
        let set = three_member_set();
        set.set_attr("name", "linear").unwrap();
        for km in &set {
            assert_eq!(km.get_attr("name"), Some(AttrValue::from("linear")));
        }

        set.set_attr("weight", vec![0.2, 0.3, 0.5]).unwrap();
        let weights: Vec<f64> = set
            .iter()
            .filter_map(|km| km.get_attr("weight").and_then(|w| w.as_f64()))
            .collect();
        assert_eq!(weights, vec![0.2, 0.3, 0.5]);

        assert!(matches!(
            set.set_attr("weight", vec![1.0, 2.0]),
            Err(KernelError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_combine_members() {
        let set = three_member_set();
        let sum = set.combine(MatrixOp::Sum).unwrap();
        let average = set.combine(MatrixOp::Average).unwrap();

        let manual: Array2<f64> = set.full_matrices().unwrap().iter().fold(
            Array2::zeros((4, 4)),
            |acc, m| acc + m,
        );
        assert_eq!(sum, manual);
        assert_eq!(average, manual / 3.0);

        assert!(KernelSet::new().combine(MatrixOp::Sum).is_err());
    }

    #[test]
    fn test_alignments() {
        let set = three_member_set();
        let target = set.get(0).unwrap().full().unwrap();
        let scores = set.alignments(&target, AlignmentMethod::Frobenius).unwrap();

        assert_eq!(scores.len(), 3);
        assert!((scores[0] - 1.0).abs() < 1e-12);
        assert!(scores.iter().all(|s| (-1.0 - 1e-12..=1.0 + 1e-12).contains(s)));
    }

    #[test]
    fn test_display() {
        let set = KernelSet::from_members(
            vec![KernelMatrix::attached(LinearKernel::new(), array![[1.0], [2.0]]).unwrap()],
            None,
        )
        .unwrap();
        let rendered = set.to_string();
        assert!(rendered.starts_with("KernelSet(1 kernels, 2 samples)"));
        assert!(rendered.contains("0: KernelMatrix(linear, 2 samples, raw)"));
    }
}

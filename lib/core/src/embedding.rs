use serde::{Deserialize, Serialize};

/// A dense embedding vector produced by an external provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Embedding {
    data: Vec<f32>,
}

impl Embedding {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn from_slice(data: &[f32]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Dot product with another embedding.
    ///
    /// With both embeddings unit-normalized this is their cosine similarity.
    /// Mismatched dimensions yield 0.0.
    #[inline]
    pub fn dot(&self, other: &Embedding) -> f32 {
        if self.dim() != other.dim() {
            return 0.0;
        }
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    /// L2 norm.
    #[inline]
    pub fn norm(&self) -> f32 {
        self.data.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    /// Scale to unit L2 norm in place.
    ///
    /// A vector with norm exactly zero is left unchanged: it carries no
    /// direction, so there is nothing to scale.
    #[inline]
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm == 0.0 {
            return;
        }
        let inv_norm = 1.0 / norm;
        for x in &mut self.data {
            *x *= inv_norm;
        }
    }

    /// Get normalized copy.
    #[inline]
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut v = self.clone();
        v.normalize();
        v
    }

    /// Whether the norm is 1 within 1e-6.
    #[inline]
    pub fn is_unit(&self) -> bool {
        (self.norm() - 1.0).abs() <= 1e-6
    }
}

impl From<Vec<f32>> for Embedding {
    fn from(data: Vec<f32>) -> Self {
        Self::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_unit_norm() {
        let mut v = Embedding::new(vec![3.0, 4.0]);
        v.normalize();
        assert!((v.norm() - 1.0).abs() < 1e-6);
        assert!(v.is_unit());
    }

    #[test]
    fn test_normalize_zero_vector_unchanged() {
        let mut v = Embedding::new(vec![0.0, 0.0, 0.0]);
        v.normalize();
        assert_eq!(v.as_slice(), &[0.0, 0.0, 0.0]);
        assert!(!v.is_unit());
    }

    #[test]
    fn test_dot_as_cosine_for_unit_vectors() {
        let a = Embedding::new(vec![1.0, 0.0]);
        let b = Embedding::new(vec![1.0, 0.0]);
        assert!((a.dot(&b) - 1.0).abs() < 1e-6);

        let c = Embedding::new(vec![0.0, 1.0]);
        assert!((a.dot(&c)).abs() < 1e-6);
    }

    #[test]
    fn test_dot_dimension_mismatch() {
        let a = Embedding::new(vec![1.0, 0.0]);
        let b = Embedding::new(vec![1.0, 0.0, 0.0]);
        assert_eq!(a.dot(&b), 0.0);
    }

    #[test]
    fn test_normalized_copy_leaves_original() {
        let v = Embedding::new(vec![2.0, 0.0]);
        let n = v.normalized();
        assert_eq!(v.as_slice(), &[2.0, 0.0]);
        assert_eq!(n.as_slice(), &[1.0, 0.0]);
    }
}

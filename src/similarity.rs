//! Pairwise similarity between mean-centred rating vectors.
//!
//! `CenteredCosine` is the cosine of two centred vectors where the numerator
//! only sees co-rated items while each norm is taken over the vector's full
//! key set:
//!
//! ```text
//! sim(a, b) = Σ_{i ∈ A∩B} a_i b_i / (‖a‖ ‖b‖)
//! ```
//!
//! so users who agree on a few items but rated many others score lower than
//! a Pearson correlation over the overlap would give them.

use crate::core::CenteredVector;

/// Similarity of two centred profiles. Implementations must be symmetric.
pub trait SimilarityFunction {
    fn similarity(&self, a: &CenteredVector, b: &CenteredVector) -> f64;
}

/// Cosine similarity over mean-centred vectors.
///
/// Returns 0.0 if either vector has zero norm (e.g. a single rating, or all
/// ratings equal to the mean).
///
/// # Examples
///
/// ```
/// use userknn::core::RatingVector;
/// use userknn::similarity::{CenteredCosine, SimilarityFunction};
///
/// let a = RatingVector::from_pairs(vec![(1, 4.0), (2, 2.0)]).unwrap().center().unwrap();
/// let b = RatingVector::from_pairs(vec![(1, 5.0), (2, 3.0), (3, 4.0)]).unwrap().center().unwrap();
/// assert!((CenteredCosine.similarity(&a, &b) - 1.0).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct CenteredCosine;

impl SimilarityFunction for CenteredCosine {
    #[inline]
    fn similarity(&self, a: &CenteredVector, b: &CenteredVector) -> f64 {
        let denom = a.offsets().norm() * b.offsets().norm();
        if denom > 0.0 {
            a.offsets().dot(b.offsets()) / denom
        } else {
            0.0
        }
    }
}

impl<F: SimilarityFunction + ?Sized> SimilarityFunction for &F {
    #[inline]
    fn similarity(&self, a: &CenteredVector, b: &CenteredVector) -> f64 {
        (**self).similarity(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::{CenteredCosine, SimilarityFunction};
    use crate::core::RatingVector;

    fn centred(pairs: Vec<(usize, f64)>) -> crate::core::CenteredVector {
        RatingVector::from_pairs(pairs).unwrap().center().unwrap()
    }

    #[test]
    fn denominator_uses_full_norms() {
        // overlap on item 1 only; item 3 inflates b's norm but not the numerator
        let a = centred(vec![(1, 5.0), (2, 1.0)]); // offsets 2, -2
        let b = centred(vec![(1, 4.0), (3, 0.0)]); // offsets 2, -2
        let sim = CenteredCosine.similarity(&a, &b);
        let expected = (2.0 * 2.0) / (8.0f64.sqrt() * 8.0f64.sqrt());
        assert!((sim - expected).abs() < 1e-12, "{sim} vs {expected}");
    }

    #[test]
    fn zero_norm_is_zero_similarity() {
        let single = centred(vec![(1, 3.0)]);
        let other = centred(vec![(1, 1.0), (2, 5.0)]);
        assert_eq!(CenteredCosine.similarity(&single, &other), 0.0);
        assert_eq!(CenteredCosine.similarity(&single, &single), 0.0);
    }
}

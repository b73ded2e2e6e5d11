//! Slice kernels shared by rating vectors and the similarity function.
//!
//! - `mean`: arithmetic mean, `None` on empty input
//! - `norm`: Euclidean norm (L2) without allocating
//! - `squared_norm`: sum of squares

/// Computes the Euclidean norm (L2) without allocating.
#[inline]
pub fn norm(a: &[f64]) -> f64 {
    squared_norm(a).sqrt()
}

#[inline]
pub fn squared_norm(a: &[f64]) -> f64 {
    a.iter().map(|&x| x * x).sum::<f64>()
}

/// Arithmetic mean of the values; `None` when there are none.
#[inline]
pub fn mean(a: &[f64]) -> Option<f64> {
    if a.is_empty() {
        return None;
    }
    Some(a.iter().sum::<f64>() / a.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::{mean, norm, squared_norm};

    #[test]
    fn norm_of_pythagorean_pair() {
        assert!((norm(&[3.0, 4.0]) - 5.0).abs() < 1e-12);
        assert!((squared_norm(&[3.0, 4.0]) - 25.0).abs() < 1e-12);
        assert_eq!(norm(&[]), 0.0);
    }

    #[test]
    fn mean_guards_empty_input() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[2.0, 4.0, 9.0]), Some(5.0));
    }
}

//! Weighted-offset prediction from a neighbourhood.
//!
//! For an item `i` and target mean `μ`:
//!
//! ```text
//! p(i) = μ + Σ_v sim_v · (r_vi − μ_v) / Σ_{v rated i} |sim_v|
//! ```
//!
//! A neighbour that did not rate `i` falls back to its own mean, i.e. an
//! offset of zero: it adds nothing to the numerator and nothing to the
//! normaliser. If no neighbour rated `i` the prediction is undefined and
//! `predict` returns `None`.

use log::trace;

use crate::core::ItemId;
use crate::neighbourhood::Neighbourhood;

/// Sums accumulated over a neighbourhood for one item.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PredictionTerms {
    /// Σ sim_v · offset_v over all neighbours.
    pub sum_of_ratings: f64,
    /// Σ |sim_v| over neighbours who rated the item.
    pub sum_of_abs_similarities: f64,
    /// Neighbours who rated the item.
    pub contributors: usize,
}

impl PredictionTerms {
    /// `baseline + sum_of_ratings / sum_of_abs_similarities`, or `None` when
    /// the normaliser is zero.
    #[inline]
    pub fn resolve(&self, baseline: f64) -> Option<f64> {
        if self.sum_of_abs_similarities > 0.0 {
            Some(baseline + self.sum_of_ratings / self.sum_of_abs_similarities)
        } else {
            None
        }
    }
}

/// Predicts ratings for one target user from their neighbourhood.
#[derive(Clone, Copy, Debug)]
pub struct Predictor<'a> {
    target_mean: f64,
    neighbourhood: &'a Neighbourhood,
}

impl<'a> Predictor<'a> {
    pub fn new(target_mean: f64, neighbourhood: &'a Neighbourhood) -> Self {
        Self {
            target_mean,
            neighbourhood,
        }
    }

    pub fn target_mean(&self) -> f64 {
        self.target_mean
    }

    /// Accumulates the weighted offsets for `item` without resolving them.
    pub fn terms(&self, item: ItemId) -> PredictionTerms {
        let mut terms = PredictionTerms::default();
        for neighbour in self.neighbourhood {
            let sim = neighbour.similarity;
            // unrated: rating = neighbour mean, offset 0
            let offset = match neighbour.vector.offset(item) {
                Some(offset) => {
                    terms.sum_of_abs_similarities += sim.abs();
                    terms.contributors += 1;
                    offset
                }
                None => 0.0,
            };
            terms.sum_of_ratings += sim * offset;
        }
        trace!(
            "item {}: {} contributors, Σsim·off={:.6}, Σ|sim|={:.6}",
            item,
            terms.contributors,
            terms.sum_of_ratings,
            terms.sum_of_abs_similarities
        );
        terms
    }

    /// Predicted rating for `item`, or `None` if no neighbour rated it.
    #[inline]
    pub fn predict(&self, item: ItemId) -> Option<f64> {
        self.terms(item).resolve(self.target_mean)
    }
}

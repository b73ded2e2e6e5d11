use serde::{Deserialize, Serialize};

use crate::error::{RatingError, Result};
use crate::neighbourhood::{NeighbourhoodSelector, TiePolicy, DEFAULT_NEIGHBOURHOOD_SIZE};
use crate::scorer::UserUserScorer;
use crate::similarity::{CenteredCosine, SimilarityFunction};
use crate::source::RatingSource;

// Add logging
use log::{debug, info};

/// Tunables for a `UserUserScorer`. Serialisable so a pipeline can carry it
/// in its own configuration files.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScorerConfig {
    /// Target neighbourhood size K (a boundary tie group may exceed it).
    pub neighbourhood_size: usize,
    pub tie_policy: TiePolicy,
    /// Minimum similarity a candidate needs to be ranked at all.
    pub similarity_threshold: Option<f64>,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            neighbourhood_size: DEFAULT_NEIGHBOURHOOD_SIZE,
            tie_policy: TiePolicy::Exact,
            similarity_threshold: None,
        }
    }
}

impl ScorerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.neighbourhood_size == 0 {
            return Err(RatingError::InvalidConfig(
                "neighbourhood_size must be at least 1".to_string(),
            ));
        }
        if let TiePolicy::Tolerance(eps) = self.tie_policy {
            if !eps.is_finite() || eps < 0.0 {
                return Err(RatingError::InvalidConfig(format!(
                    "tie tolerance must be finite and non-negative, got {eps}"
                )));
            }
        }
        if let Some(t) = self.similarity_threshold {
            if t.is_nan() {
                return Err(RatingError::InvalidConfig(
                    "similarity_threshold cannot be NaN".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn selector(&self) -> NeighbourhoodSelector {
        NeighbourhoodSelector::new(self.neighbourhood_size)
            .with_tie_policy(self.tie_policy)
            .with_threshold(self.similarity_threshold)
    }
}

#[derive(Clone, Debug, Default)]
pub struct ScorerBuilder {
    config: ScorerConfig,
}

impl ScorerBuilder {
    pub fn new() -> Self {
        info!("Initializing new ScorerBuilder");
        Self::default()
    }

    /// Start from a configuration loaded elsewhere.
    pub fn from_config(config: ScorerConfig) -> Self {
        debug!("ScorerBuilder from config: {:?}", config);
        Self { config }
    }

    // -------------------- Neighbourhood configuration --------------------

    /// Target number of neighbours K used for every prediction.
    pub fn with_neighbourhood_size(mut self, k: usize) -> Self {
        info!("Setting neighbourhood size: {}", k);
        self.config.neighbourhood_size = k;
        self
    }

    /// How ties in similarity are grouped at the K boundary.
    pub fn with_tie_policy(mut self, tie_policy: TiePolicy) -> Self {
        info!("Setting tie policy: {:?}", tie_policy);
        self.config.tie_policy = tie_policy;
        self
    }

    /// Optional: drop candidates below this similarity before ranking.
    /// `None` (the default) ranks every candidate.
    pub fn with_similarity_threshold(mut self, threshold: Option<f64>) -> Self {
        info!("Setting similarity threshold: {:?}", threshold);
        self.config.similarity_threshold = threshold;
        self
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    // -------------------- Build --------------------

    /// Build a scorer over `source` using centred cosine similarity.
    pub fn build<S: RatingSource>(self, source: S) -> Result<UserUserScorer<S, CenteredCosine>> {
        self.build_with_similarity(source, CenteredCosine)
    }

    /// Build a scorer with a custom similarity function.
    pub fn build_with_similarity<S, F>(self, source: S, similarity: F) -> Result<UserUserScorer<S, F>>
    where
        S: RatingSource,
        F: SimilarityFunction,
    {
        self.config.validate()?;
        debug!("Build configuration: {:?}", self.config);
        Ok(UserUserScorer::new(source, similarity, self.config))
    }
}

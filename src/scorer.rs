//! User-user scoring entry point.
//!
//! A request is one target user and a set of items. The scorer fetches and
//! centres the target's profile, collects and ranks neighbours, then predicts
//! every requested item from the resulting neighbourhood. All intermediate
//! state is local to the call, so a scorer can serve concurrent requests as
//! long as its rating source can be read concurrently.
//!
//! # Examples
//!
//! ```
//! use userknn::builder::ScorerBuilder;
//! use userknn::source::InMemoryRatings;
//!
//! let ratings = InMemoryRatings::from_triples(vec![
//!     (1, 10, 4.0), (1, 20, 2.0),
//!     (2, 10, 5.0), (2, 20, 3.0), (2, 30, 4.0),
//!     (3, 10, 1.0),
//! ]).unwrap();
//!
//! let scorer = ScorerBuilder::new().build(ratings).unwrap();
//! let scores = scorer.score(1, &[30]).unwrap();
//! assert!((scores.get(30).unwrap() - 3.0).abs() < 1e-12);
//! ```

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info};
use rayon::prelude::*;

use crate::builder::ScorerConfig;
use crate::core::{CenteredVector, ItemId, UserId};
use crate::error::{RatingError, Result};
use crate::neighbourhood::{collect_candidates, Neighbourhood};
use crate::predictor::Predictor;
use crate::similarity::SimilarityFunction;
use crate::source::RatingSource;

/// Scores for one request. Items no neighbour rated are listed in
/// `unpredictable` instead of carrying a score.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scores {
    user: UserId,
    scores: BTreeMap<ItemId, f64>,
    unpredictable: BTreeSet<ItemId>,
}

impl Scores {
    pub fn user(&self) -> UserId {
        self.user
    }

    pub fn get(&self, item: ItemId) -> Option<f64> {
        self.scores.get(&item).copied()
    }

    pub fn is_unpredictable(&self, item: ItemId) -> bool {
        self.unpredictable.contains(&item)
    }

    /// Scored items, ascending by item id.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, f64)> + '_ {
        self.scores.iter().map(|(&i, &s)| (i, s))
    }

    pub fn unpredictable(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.unpredictable.iter().copied()
    }

    /// Number of scored items.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn into_map(self) -> BTreeMap<ItemId, f64> {
        self.scores
    }
}

/// One entry of a batch: a target user and the items to score for them.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreRequest {
    pub user: UserId,
    pub items: Vec<ItemId>,
}

impl ScoreRequest {
    pub fn new(user: UserId, items: Vec<ItemId>) -> Self {
        Self { user, items }
    }
}

/// User-user collaborative filtering scorer. Build via `ScorerBuilder`.
#[derive(Clone, Debug)]
pub struct UserUserScorer<S, F> {
    source: S,
    similarity: F,
    config: ScorerConfig,
}

impl<S, F> UserUserScorer<S, F>
where
    S: RatingSource,
    F: SimilarityFunction,
{
    pub(crate) fn new(source: S, similarity: F, config: ScorerConfig) -> Self {
        Self {
            source,
            similarity,
            config,
        }
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches and centres the target's profile.
    ///
    /// # Errors
    ///
    /// Whatever the source reports for the user, or `EmptyRatingHistory`.
    fn target_profile(&self, user: UserId) -> Result<CenteredVector> {
        let profile = self.source.rating_vector(user)?;
        profile
            .center()
            .map_err(|_| RatingError::EmptyRatingHistory { user })
    }

    fn neighbourhood_of(&self, user: UserId, target: &CenteredVector) -> Neighbourhood {
        let candidates = collect_candidates(&self.source, user, target, &self.similarity);
        self.config.selector().select(candidates)
    }

    /// Ranked neighbourhood of `user`, without predicting anything.
    pub fn neighbourhood(&self, user: UserId) -> Result<Neighbourhood> {
        let target = self.target_profile(user)?;
        Ok(self.neighbourhood_of(user, &target))
    }

    /// Predicts a score for every item in `items` (duplicates collapse).
    ///
    /// Items no neighbour rated are reported via `Scores::unpredictable`
    /// rather than failing the request. Items the user already rated are
    /// scored like any other.
    ///
    /// # Errors
    ///
    /// `EmptyRatingHistory` if the user has rated nothing, or the source's
    /// error if the user's profile cannot be fetched.
    pub fn score(&self, user: UserId, items: &[ItemId]) -> Result<Scores> {
        info!("Scoring {} items for user {}", items.len(), user);
        let target = self.target_profile(user)?;
        let neighbourhood = self.neighbourhood_of(user, &target);
        let predictor = Predictor::new(target.mean(), &neighbourhood);

        let mut out = Scores {
            user,
            ..Scores::default()
        };
        for &item in items {
            match predictor.predict(item) {
                Some(score) => {
                    out.scores.insert(item, score);
                }
                None => {
                    out.unpredictable.insert(item);
                }
            }
        }

        debug!(
            "User {}: {} neighbours, {} scored, {} unpredictable",
            user,
            neighbourhood.len(),
            out.scores.len(),
            out.unpredictable.len()
        );
        Ok(out)
    }

    /// Predicts a single item.
    ///
    /// # Errors
    ///
    /// As `score`, plus `NoQualifyingNeighbour` when no neighbour rated it.
    pub fn score_item(&self, user: UserId, item: ItemId) -> Result<f64> {
        self.score(user, &[item])?
            .get(item)
            .ok_or(RatingError::NoQualifyingNeighbour { user, item })
    }
}

impl<S, F> UserUserScorer<S, F>
where
    S: RatingSource + Sync,
    F: SimilarityFunction + Sync,
{
    /// Scores independent requests in parallel. Results keep request order;
    /// a failing request does not affect the others.
    pub fn score_batch(&self, requests: &[ScoreRequest]) -> Vec<Result<Scores>> {
        info!("Scoring batch of {} requests", requests.len());
        requests
            .par_iter()
            .map(|req| self.score(req.user, &req.items))
            .collect()
    }
}

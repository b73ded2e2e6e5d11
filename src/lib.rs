//! # userknn
//!
//! User-user collaborative filtering. Given a target user and a set of items,
//! predict the user's rating for each item from the ratings of similar users.
//!
//! Pipeline for one request:
//!
//! 1. fetch the target's `RatingVector` from a `RatingSource` and mean-centre it
//! 2. for every item the target rated, gather the other users who rated it
//! 3. centre each candidate's profile and score it with centred cosine similarity
//! 4. keep the top-K candidates (boundary tie groups are kept whole)
//! 5. predict `mean + Σ sim·offset / Σ|sim|` over neighbours who rated the item
//!
//! ```
//! use userknn::builder::ScorerBuilder;
//! use userknn::source::InMemoryRatings;
//!
//! let ratings = InMemoryRatings::from_delimited(
//!     "1,1,4\n1,2,2\n2,1,5\n2,2,3\n2,3,4\n3,1,1\n",
//! ).unwrap();
//! let scorer = ScorerBuilder::new().with_neighbourhood_size(30).build(ratings).unwrap();
//!
//! let scores = scorer.score(1, &[3]).unwrap();
//! assert!(scores.get(3).is_some());
//! ```

pub mod builder;
pub mod core;
pub mod error;
pub mod neighbourhood;
pub mod operators;
pub mod predictor;
pub mod scorer;
pub mod similarity;
pub mod source;

pub use crate::builder::{ScorerBuilder, ScorerConfig};
pub use crate::core::{CenteredVector, ItemId, RatingVector, UserId};
pub use crate::error::{RatingError, Result};
pub use crate::neighbourhood::{Neighbourhood, NeighbourhoodSelector, SimilarityEntry, TiePolicy};
pub use crate::scorer::{ScoreRequest, Scores, UserUserScorer};
pub use crate::similarity::{CenteredCosine, SimilarityFunction};
pub use crate::source::{InMemoryRatings, RatingSource};

#[cfg(test)]
mod tests;

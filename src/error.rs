//! Error types for rating retrieval, neighbourhood building and prediction.
//!
//! Conditions local to a single candidate or item (a failed lookup while
//! collecting neighbours, an item nobody in the neighbourhood rated) are
//! recovered inside the scorer; the variants below are what escapes to callers.

use thiserror::Error;

use crate::core::{ItemId, UserId};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RatingError {
    /// Mean requested on a vector with no entries.
    #[error("cannot compute the mean of an empty rating vector")]
    EmptyVector,

    /// The target user has rated nothing, so no baseline mean exists.
    #[error("user {user} has no rating history")]
    EmptyRatingHistory { user: UserId },

    /// No neighbour in the selected neighbourhood rated the item.
    #[error("no neighbour of user {user} rated item {item}")]
    NoQualifyingNeighbour { user: UserId, item: ItemId },

    #[error("rating source has no data for user {user}")]
    UnknownUser { user: UserId },

    #[error("rating source has no data for item {item}")]
    UnknownItem { item: ItemId },

    #[error("invalid rating {value} for item {item}")]
    InvalidRating { item: ItemId, value: f64 },

    #[error("malformed rating record at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("invalid scorer configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, RatingError>;

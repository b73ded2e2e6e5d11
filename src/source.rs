//! Read access to the rating corpus.
//!
//! The scorer only ever asks two questions of its corpus: "what did this user
//! rate?" and "who rated this item?". `RatingSource` captures exactly that;
//! storage, caching and consistency belong to the implementor.
//!
//! `InMemoryRatings` is a complete source backed by ordered maps. It can be
//! filled programmatically or parsed from `user,item,rating[,timestamp]` text.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use log::{debug, info, trace};

use crate::core::{ItemId, RatingVector, UserId, ITEM_SPACE};
use crate::error::{RatingError, Result};

/// Read-only view of a rating corpus.
///
/// Implementations should return an empty vector / empty list for ids with
/// no data. `UnknownUser` / `UnknownItem` are for sources that cannot resolve
/// an id at all; the scorer treats them as fatal only for the target user.
pub trait RatingSource {
    /// All ratings given by `user`.
    fn rating_vector(&self, user: UserId) -> Result<RatingVector>;

    /// All users who rated `item`.
    fn raters_of(&self, item: ItemId) -> Result<Vec<UserId>>;
}

impl<S: RatingSource + ?Sized> RatingSource for &S {
    fn rating_vector(&self, user: UserId) -> Result<RatingVector> {
        (**self).rating_vector(user)
    }

    fn raters_of(&self, item: ItemId) -> Result<Vec<UserId>> {
        (**self).raters_of(item)
    }
}

impl<S: RatingSource + ?Sized> RatingSource for Arc<S> {
    fn rating_vector(&self, user: UserId) -> Result<RatingVector> {
        (**self).rating_vector(user)
    }

    fn raters_of(&self, item: ItemId) -> Result<Vec<UserId>> {
        (**self).raters_of(item)
    }
}

/// Rating corpus held in memory, indexed both by user and by item.
///
/// Re-rating an item replaces the earlier rating.
///
/// # Examples
///
/// ```
/// use userknn::source::{InMemoryRatings, RatingSource};
///
/// let ratings = InMemoryRatings::from_delimited("1,10,4.0\n2,10,3.5\n").unwrap();
/// assert_eq!(ratings.raters_of(10).unwrap(), vec![1, 2]);
/// assert_eq!(ratings.rating_vector(2).unwrap().get(10), Some(3.5));
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryRatings {
    by_user: BTreeMap<UserId, BTreeMap<ItemId, f64>>,
    by_item: BTreeMap<ItemId, BTreeSet<UserId>>,
}

impl InMemoryRatings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a rating.
    ///
    /// # Errors
    ///
    /// `InvalidRating` for a non-finite value or the reserved item id.
    pub fn insert(&mut self, user: UserId, item: ItemId, rating: f64) -> Result<()> {
        if !rating.is_finite() || item == ITEM_SPACE {
            return Err(RatingError::InvalidRating {
                item,
                value: rating,
            });
        }
        trace!("rating: user={} item={} value={}", user, item, rating);
        self.by_user.entry(user).or_default().insert(item, rating);
        self.by_item.entry(item).or_default().insert(user);
        Ok(())
    }

    pub fn from_triples<I>(triples: I) -> Result<Self>
    where
        I: IntoIterator<Item = (UserId, ItemId, f64)>,
    {
        let mut out = Self::new();
        for (user, item, rating) in triples {
            out.insert(user, item, rating)?;
        }
        debug!(
            "Loaded {} ratings from {} users over {} items",
            out.n_ratings(),
            out.n_users(),
            out.n_items()
        );
        Ok(out)
    }

    /// Parses `user,item,rating[,timestamp]` lines.
    ///
    /// Blank lines and lines starting with `#` are skipped; the timestamp
    /// column, if present, is ignored. Line numbers in errors are 1-based.
    pub fn from_delimited(text: &str) -> Result<Self> {
        let mut out = Self::new();
        for (idx, line) in text.lines().enumerate() {
            let l = line.trim();
            if l.is_empty() || l.starts_with('#') {
                continue;
            }
            let (user, item, rating) = parse_record(l, idx + 1)?;
            out.insert(user, item, rating).map_err(|e| RatingError::Parse {
                line: idx + 1,
                reason: e.to_string(),
            })?;
        }
        info!(
            "Parsed rating corpus: {} users, {} items, {} ratings",
            out.n_users(),
            out.n_items(),
            out.n_ratings()
        );
        Ok(out)
    }

    pub fn n_users(&self) -> usize {
        self.by_user.len()
    }

    pub fn n_items(&self) -> usize {
        self.by_item.len()
    }

    pub fn n_ratings(&self) -> usize {
        self.by_user.values().map(|r| r.len()).sum()
    }

    /// User ids, ascending.
    pub fn users(&self) -> impl Iterator<Item = UserId> + '_ {
        self.by_user.keys().copied()
    }

    /// Item ids, ascending.
    pub fn items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.by_item.keys().copied()
    }
}

impl RatingSource for InMemoryRatings {
    fn rating_vector(&self, user: UserId) -> Result<RatingVector> {
        match self.by_user.get(&user) {
            Some(ratings) => RatingVector::from_pairs(ratings.iter().map(|(&i, &r)| (i, r))),
            None => Ok(RatingVector::empty()),
        }
    }

    fn raters_of(&self, item: ItemId) -> Result<Vec<UserId>> {
        Ok(self
            .by_item
            .get(&item)
            .map(|users| users.iter().copied().collect())
            .unwrap_or_default())
    }
}

fn parse_record(line: &str, line_no: usize) -> Result<(UserId, ItemId, f64)> {
    let parse_err = |reason: String| RatingError::Parse {
        line: line_no,
        reason,
    };

    let mut parts = line.split(',').map(str::trim);
    let user = parts
        .next()
        .ok_or_else(|| parse_err("missing user id".to_string()))?
        .parse::<UserId>()
        .map_err(|e| parse_err(format!("user id: {e}")))?;
    let item = parts
        .next()
        .ok_or_else(|| parse_err("missing item id".to_string()))?
        .parse::<ItemId>()
        .map_err(|e| parse_err(format!("item id: {e}")))?;
    let rating = parts
        .next()
        .ok_or_else(|| parse_err("missing rating".to_string()))?
        .parse::<f64>()
        .map_err(|e| parse_err(format!("rating: {e}")))?;
    Ok((user, item, rating))
}

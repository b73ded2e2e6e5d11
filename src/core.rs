//! RatingVector and CenteredVector: sparse per-user rating profiles.
//!
//! This module provides the two value types every other stage works on:
//!
//! - RatingVector: one user's observed ratings, a sparse item → rating map
//!   stored as a `sprs::CsVec<f64>` indexed by item id. Supports mean,
//!   membership test, lookup, and a dot product over co-rated items.
//! - CenteredVector: the offsets of a RatingVector from its own mean, with
//!   that mean retained so absolute ratings can be reconstructed.
//!
//! Absence of an item means "unknown", never zero. Both types are immutable
//! once built; centring always produces a new value.
//!
//! # Examples
//!
//! Build a profile and centre it:
//!
//! ```
//! use userknn::core::RatingVector;
//!
//! let v = RatingVector::from_pairs(vec![(1, 4.0), (2, 2.0)]).unwrap();
//! assert_eq!(v.mean().unwrap(), 3.0);
//!
//! let c = v.center().unwrap();
//! assert_eq!(c.offsets().get(1), Some(1.0));
//! assert_eq!(c.offsets().get(2), Some(-1.0));
//! assert_eq!(c.mean(), 3.0);
//! ```
//!
//! # Performance
//!
//! - Lookups are binary searches over the sorted item ids: O(log n).
//! - `dot` walks both index lists once: O(n + m).

use sprs::CsVec;

use crate::error::{RatingError, Result};
use crate::operators;

pub type UserId = usize;
pub type ItemId = usize;

/// Dimension of every rating vector. Item ids index into this space, so the
/// id `usize::MAX` itself is reserved.
pub const ITEM_SPACE: usize = usize::MAX;

/// One user's observed ratings.
///
/// Entries are kept sorted by item id; iteration order is therefore
/// deterministic even though the mapping itself carries no ordering.
///
/// # Examples
///
/// ```
/// use userknn::core::RatingVector;
///
/// let v = RatingVector::from_pairs(vec![(10, 5.0), (3, 1.0)]).unwrap();
/// assert_eq!(v.len(), 2);
/// assert!(v.contains(10));
/// assert!(!v.contains(4));
/// assert_eq!(v.items(), &[3, 10]);
/// ```
#[derive(Clone, Debug)]
pub struct RatingVector {
    entries: CsVec<f64>,
}

impl PartialEq for RatingVector {
    fn eq(&self, other: &Self) -> bool {
        self.items() == other.items() && self.values() == other.values()
    }
}

impl Default for RatingVector {
    fn default() -> Self {
        Self::empty()
    }
}

impl RatingVector {
    /// A vector with no ratings.
    pub fn empty() -> Self {
        Self {
            entries: CsVec::new(ITEM_SPACE, Vec::new(), Vec::new()),
        }
    }

    /// Builds from (item, rating) pairs in any order.
    ///
    /// When an item appears more than once the last rating wins.
    ///
    /// # Errors
    ///
    /// `InvalidRating` if a rating is not finite or the item id is the
    /// reserved `ITEM_SPACE` sentinel.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (ItemId, f64)>,
    {
        let mut pairs: Vec<(ItemId, f64)> = pairs.into_iter().collect();
        for &(item, value) in &pairs {
            if !value.is_finite() || item == ITEM_SPACE {
                return Err(RatingError::InvalidRating { item, value });
            }
        }

        // stable sort keeps insertion order within an item, so the last rating
        // of a duplicated item is the last of its run
        pairs.sort_by_key(|&(item, _)| item);
        let mut indices: Vec<ItemId> = Vec::with_capacity(pairs.len());
        let mut data: Vec<f64> = Vec::with_capacity(pairs.len());
        for (item, value) in pairs {
            if indices.last() == Some(&item) {
                if let Some(last) = data.last_mut() {
                    *last = value;
                }
                continue;
            }
            indices.push(item);
            data.push(value);
        }

        Ok(Self::from_sorted(indices, data))
    }

    // indices strictly increasing and below ITEM_SPACE
    fn from_sorted(indices: Vec<ItemId>, data: Vec<f64>) -> Self {
        Self {
            entries: CsVec::new(ITEM_SPACE, indices, data),
        }
    }

    /// Number of rated items.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.nnz()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rated item ids, ascending.
    #[inline]
    pub fn items(&self) -> &[ItemId] {
        self.entries.indices()
    }

    /// Ratings, aligned with `items()`.
    #[inline]
    pub fn values(&self) -> &[f64] {
        self.entries.data()
    }

    #[inline]
    pub fn contains(&self, item: ItemId) -> bool {
        self.items().binary_search(&item).is_ok()
    }

    #[inline]
    pub fn get(&self, item: ItemId) -> Option<f64> {
        self.items()
            .binary_search(&item)
            .ok()
            .map(|idx| self.values()[idx])
    }

    /// Iterates (item, rating) pairs in ascending item order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, f64)> + '_ {
        self.items().iter().copied().zip(self.values().iter().copied())
    }

    /// Arithmetic mean of all ratings.
    ///
    /// # Errors
    ///
    /// `EmptyVector` when there are no ratings.
    pub fn mean(&self) -> Result<f64> {
        operators::mean(self.values()).ok_or(RatingError::EmptyVector)
    }

    /// Euclidean norm over every stored rating.
    #[inline]
    pub fn norm(&self) -> f64 {
        operators::norm(self.values())
    }

    /// Dot product restricted to the items both vectors rated.
    #[inline]
    pub fn dot(&self, other: &RatingVector) -> f64 {
        self.entries.dot(&other.entries)
    }

    /// Subtracts this vector's own mean from every rating.
    ///
    /// # Errors
    ///
    /// `EmptyVector` when there are no ratings.
    pub fn center(&self) -> Result<CenteredVector> {
        let mean = self.mean()?;
        let offsets = self.values().iter().map(|&r| r - mean).collect();
        Ok(CenteredVector {
            offsets: Self::from_sorted(self.items().to_vec(), offsets),
            mean,
        })
    }
}

/// A rating vector re-expressed as offsets from its own mean.
///
/// `offsets` has exactly the key set of the source vector; `mean` is the
/// source's mean, so `offsets.get(i) + mean` is the original rating.
#[derive(Clone, Debug, PartialEq)]
pub struct CenteredVector {
    offsets: RatingVector,
    mean: f64,
}

impl CenteredVector {
    #[inline]
    pub fn offsets(&self) -> &RatingVector {
        &self.offsets
    }

    /// Mean of the uncentred source vector.
    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    #[inline]
    pub fn contains(&self, item: ItemId) -> bool {
        self.offsets.contains(item)
    }

    /// Offset of the rating for `item` from the mean, if rated.
    #[inline]
    pub fn offset(&self, item: ItemId) -> Option<f64> {
        self.offsets.get(item)
    }

    /// Original (uncentred) rating for `item`, if rated.
    #[inline]
    pub fn rating(&self, item: ItemId) -> Option<f64> {
        self.offsets.get(item).map(|o| o + self.mean)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

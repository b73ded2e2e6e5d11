use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::{ItemId, RatingVector, UserId};
use crate::error::{RatingError, Result};
use crate::neighbourhood::SimilarityEntry;
use crate::source::{InMemoryRatings, RatingSource};

pub const ITEM_A: ItemId = 1;
pub const ITEM_B: ItemId = 2;
pub const ITEM_C: ItemId = 3;

/// user 1: {A:4, B:2}; user 2: {A:5, B:3, C:4}; user 3: {A:1}
pub fn three_users() -> InMemoryRatings {
    InMemoryRatings::from_triples(vec![
        (1, ITEM_A, 4.0),
        (1, ITEM_B, 2.0),
        (2, ITEM_A, 5.0),
        (2, ITEM_B, 3.0),
        (2, ITEM_C, 4.0),
        (3, ITEM_A, 1.0),
    ])
    .unwrap()
}

/// `three_users` plus user 4: {A:2, B:4, C:5}, who disagrees with user 1.
pub fn four_users() -> InMemoryRatings {
    let mut ratings = three_users();
    ratings.insert(4, ITEM_A, 2.0).unwrap();
    ratings.insert(4, ITEM_B, 4.0).unwrap();
    ratings.insert(4, ITEM_C, 5.0).unwrap();
    ratings
}

/// Seeded sparse corpus with half-star ratings in [1, 5]. Every user rates
/// at least one item.
pub fn random_corpus(n_users: usize, n_items: usize, density: f64, seed: u64) -> InMemoryRatings {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut ratings = InMemoryRatings::new();
    for user in 0..n_users {
        let anchor = user % n_items;
        for item in 0..n_items {
            if item == anchor || rng.random_bool(density) {
                let stars = rng.random_range(2u8..=10) as f64 / 2.0;
                ratings.insert(user, item, stars).unwrap();
            }
        }
    }
    ratings
}

/// Candidate with a throwaway profile; only `user` and `similarity` matter.
pub fn entry(user: UserId, similarity: f64) -> SimilarityEntry {
    SimilarityEntry {
        user,
        similarity,
        vector: RatingVector::from_pairs(vec![(0, 3.0), (1, 4.0)])
            .unwrap()
            .center()
            .unwrap(),
    }
}

/// Candidate whose centred profile is built from `pairs`.
pub fn entry_with(user: UserId, similarity: f64, pairs: Vec<(ItemId, f64)>) -> SimilarityEntry {
    SimilarityEntry {
        user,
        similarity,
        vector: RatingVector::from_pairs(pairs).unwrap().center().unwrap(),
    }
}

/// Wraps a corpus and fails lookups for chosen ids.
pub struct FaultySource {
    pub inner: InMemoryRatings,
    pub broken_users: HashSet<UserId>,
    pub broken_items: HashSet<ItemId>,
}

impl FaultySource {
    pub fn new(inner: InMemoryRatings) -> Self {
        Self {
            inner,
            broken_users: HashSet::new(),
            broken_items: HashSet::new(),
        }
    }

    pub fn break_user(mut self, user: UserId) -> Self {
        self.broken_users.insert(user);
        self
    }

    pub fn break_item(mut self, item: ItemId) -> Self {
        self.broken_items.insert(item);
        self
    }
}

impl RatingSource for FaultySource {
    fn rating_vector(&self, user: UserId) -> Result<RatingVector> {
        if self.broken_users.contains(&user) {
            return Err(RatingError::UnknownUser { user });
        }
        self.inner.rating_vector(user)
    }

    fn raters_of(&self, item: ItemId) -> Result<Vec<UserId>> {
        if self.broken_items.contains(&item) {
            return Err(RatingError::UnknownItem { item });
        }
        self.inner.raters_of(item)
    }
}

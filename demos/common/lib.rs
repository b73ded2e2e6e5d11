use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use userknn::source::InMemoryRatings;

const RATINGS_DATA: &str = include_str!("datasets/ratings_small.csv");

/// Bundled corpus: 40 users in three taste groups over 24 items.
#[allow(dead_code)]
pub fn load_ratings_block() -> InMemoryRatings {
    InMemoryRatings::from_delimited(RATINGS_DATA).expect("bundled ratings are well formed")
}

/// Seeded synthetic corpus with half-star ratings. Users fall into `groups`
/// taste clusters so neighbourhoods carry signal.
#[allow(dead_code)]
pub fn synthetic_ratings(
    n_users: usize,
    n_items: usize,
    density: f64,
    groups: usize,
    seed: u64,
) -> InMemoryRatings {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut ratings = InMemoryRatings::new();
    for user in 0..n_users {
        let group = user % groups;
        for item in 0..n_items {
            if !rng.random_bool(density) {
                continue;
            }
            let base: f64 = if item % groups == group { 4.5 } else { 2.0 };
            let noisy = (base + rng.random_range(-1.0..1.0)) * 2.0;
            let stars = (noisy.round() / 2.0).clamp(0.5, 5.0);
            ratings.insert(user, item, stars).expect("finite rating");
        }
    }
    ratings
}

//! Score every unrated item for one user of a ratings file.
//!
//! ```text
//! cargo run --example score_user -- [USER] [RATINGS_CSV]
//! ```
//!
//! Without a file the bundled 40-user corpus is used. Set `RUST_LOG=debug`
//! to see neighbourhood sizes.
use std::env;
use std::fs;

use userknn::builder::ScorerBuilder;
use userknn::source::{InMemoryRatings, RatingSource};

#[path = "./common/lib.rs"]
mod common;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let user: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(1);
    let ratings = match args.get(2) {
        Some(path) => {
            let text = fs::read_to_string(path).expect("readable ratings file");
            InMemoryRatings::from_delimited(&text).expect("well-formed ratings file")
        }
        None => common::load_ratings_block(),
    };
    println!(
        "corpus: {} users, {} items, {} ratings",
        ratings.n_users(),
        ratings.n_items(),
        ratings.n_ratings()
    );

    let history = ratings.rating_vector(user).expect("user lookup");
    let candidates: Vec<usize> = ratings.items().filter(|&i| !history.contains(i)).collect();

    let scorer = ScorerBuilder::new().build(&ratings).expect("valid config");
    let hood = scorer.neighbourhood(user).expect("user has ratings");
    println!("user {user}: {} ratings, {} neighbours", history.len(), hood.len());
    for n in hood.iter().take(5) {
        println!("  neighbour {:>4}  sim {:+.4}", n.user, n.similarity);
    }

    let scores = scorer.score(user, &candidates).expect("scoring");
    let mut ranked: Vec<_> = scores.iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    println!("top predictions:");
    for (item, score) in ranked.iter().take(10) {
        println!("  item {:>4}  {:.3}", item, score);
    }
    let missing: Vec<_> = scores.unpredictable().collect();
    if !missing.is_empty() {
        println!("no supporting neighbour for items {:?}", missing);
    }
}

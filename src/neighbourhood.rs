//! Candidate collection and top-K neighbourhood selection.
//!
//! Collection walks every item the target rated, unions the raters of those
//! items (minus the target and anyone already seen) and scores each
//! first-seen candidate against the target. Nothing is filtered here: a
//! candidate with zero overlap or negative similarity is still recorded.
//!
//! Selection ranks candidates by similarity, descending, and emits whole tie
//! groups until at least K neighbours are taken. A group that straddles the
//! K boundary is kept intact, so a neighbourhood can end up larger than K but
//! never splits candidates that share a similarity value.

use std::collections::HashSet;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::core::{CenteredVector, UserId};
use crate::similarity::SimilarityFunction;
use crate::source::RatingSource;

pub const DEFAULT_NEIGHBOURHOOD_SIZE: usize = 30;

/// How similarity values are grouped into ties at the selection boundary.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub enum TiePolicy {
    /// Literal floating-point equality.
    #[default]
    Exact,
    /// Values within the given absolute distance of a group's leading value
    /// belong to that group.
    Tolerance(f64),
}

impl TiePolicy {
    /// Whether `value` joins the group led by `head`.
    #[inline]
    pub fn ties(&self, head: f64, value: f64) -> bool {
        match *self {
            TiePolicy::Exact => head == value,
            TiePolicy::Tolerance(eps) => approx::abs_diff_eq!(head, value, epsilon = eps),
        }
    }
}

/// A scored candidate: who, how similar, and their centred profile.
#[derive(Clone, Debug, PartialEq)]
pub struct SimilarityEntry {
    pub user: UserId,
    pub similarity: f64,
    pub vector: CenteredVector,
}

/// Ranked neighbours of one target user, most similar first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Neighbourhood {
    entries: Vec<SimilarityEntry>,
}

impl Neighbourhood {
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, SimilarityEntry> {
        self.entries.iter()
    }

    pub fn users(&self) -> impl Iterator<Item = UserId> + '_ {
        self.entries.iter().map(|e| e.user)
    }

    pub fn contains(&self, user: UserId) -> bool {
        self.entries.iter().any(|e| e.user == user)
    }

    pub fn entries(&self) -> &[SimilarityEntry] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a Neighbourhood {
    type Item = &'a SimilarityEntry;
    type IntoIter = std::slice::Iter<'a, SimilarityEntry>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Scores every user who co-rated at least one item with the target.
///
/// Fetch failures are local: an item whose raters cannot be listed
/// contributes no candidates, and a candidate whose profile cannot be fetched
/// (or is empty) is skipped. Candidates are visited in the target's item
/// order, then in the order the source lists raters, so the result is
/// deterministic for a deterministic source.
pub fn collect_candidates<S, F>(
    source: &S,
    target_user: UserId,
    target: &CenteredVector,
    similarity: &F,
) -> Vec<SimilarityEntry>
where
    S: RatingSource + ?Sized,
    F: SimilarityFunction + ?Sized,
{
    let mut seen: HashSet<UserId> = HashSet::new();
    let mut candidates: Vec<SimilarityEntry> = Vec::new();

    for &item in target.offsets().items() {
        let raters = match source.raters_of(item) {
            Ok(raters) => raters,
            Err(e) => {
                warn!("Skipping item {} while collecting neighbours: {}", item, e);
                continue;
            }
        };

        for user in raters {
            if user == target_user || !seen.insert(user) {
                continue;
            }

            let profile = match source.rating_vector(user) {
                Ok(v) => v,
                Err(e) => {
                    warn!("Skipping candidate {}: {}", user, e);
                    continue;
                }
            };
            let vector = match profile.center() {
                Ok(c) => c,
                Err(_) => {
                    debug!("Skipping candidate {}: empty rating history", user);
                    continue;
                }
            };

            let sim = similarity.similarity(target, &vector);
            trace!("candidate {} via item {}: similarity {:.6}", user, item, sim);
            candidates.push(SimilarityEntry {
                user,
                similarity: sim,
                vector,
            });
        }
    }

    debug!(
        "Collected {} candidates for user {} over {} rated items",
        candidates.len(),
        target_user,
        target.len()
    );
    candidates
}

/// Picks the top-K candidates, keeping boundary tie groups whole.
///
/// # Examples
///
/// ```
/// use userknn::neighbourhood::{NeighbourhoodSelector, TiePolicy};
///
/// let selector = NeighbourhoodSelector::new(30);
/// assert_eq!(selector.size(), 30);
/// assert_eq!(selector.tie_policy(), TiePolicy::Exact);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NeighbourhoodSelector {
    size: usize,
    tie_policy: TiePolicy,
    threshold: Option<f64>,
}

impl Default for NeighbourhoodSelector {
    fn default() -> Self {
        Self::new(DEFAULT_NEIGHBOURHOOD_SIZE)
    }
}

impl NeighbourhoodSelector {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            tie_policy: TiePolicy::Exact,
            threshold: None,
        }
    }

    pub fn with_tie_policy(mut self, tie_policy: TiePolicy) -> Self {
        self.tie_policy = tie_policy;
        self
    }

    /// Drop candidates whose similarity is below `threshold` before ranking.
    pub fn with_threshold(mut self, threshold: Option<f64>) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tie_policy(&self) -> TiePolicy {
        self.tie_policy
    }

    pub fn threshold(&self) -> Option<f64> {
        self.threshold
    }

    /// Ranks `candidates` and returns the neighbourhood.
    ///
    /// Ties are ordered by ascending user id. Groups are emitted whole while
    /// fewer than `size` neighbours have been taken.
    pub fn select(&self, mut candidates: Vec<SimilarityEntry>) -> Neighbourhood {
        let pool = candidates.len();
        if let Some(min) = self.threshold {
            candidates.retain(|c| c.similarity >= min);
        }

        candidates.sort_by(|a, b| {
            b.similarity
                .total_cmp(&a.similarity)
                .then_with(|| a.user.cmp(&b.user))
        });

        let mut cut = 0usize;
        while cut < candidates.len() && cut < self.size {
            let head = candidates[cut].similarity;
            cut += 1;
            while cut < candidates.len() && self.tie_policy.ties(head, candidates[cut].similarity) {
                cut += 1;
            }
        }
        candidates.truncate(cut);

        debug!(
            "Selected {} of {} candidates (k={}, ties={:?}, threshold={:?})",
            candidates.len(),
            pool,
            self.size,
            self.tie_policy,
            self.threshold
        );
        Neighbourhood {
            entries: candidates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TiePolicy;

    #[test]
    fn tie_policy_grouping() {
        assert!(TiePolicy::Exact.ties(0.5, 0.5));
        assert!(!TiePolicy::Exact.ties(0.5, 0.5 + 1e-15));
        assert!(TiePolicy::Tolerance(1e-9).ties(0.5, 0.5 + 1e-12));
        assert!(!TiePolicy::Tolerance(1e-9).ties(0.5, 0.6));
    }
}

//! Interest scoring between slides.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use super::v1::TieBreak;
use crate::types::{EntryId, TagId};

/// Interest of a transition from counts.
///
/// Formula:
/// ```text
/// interest = min(shared, candidate_tags - shared, current_tags - shared)
/// ```
///
/// `shared` can never exceed either tag count for consistent inputs; the
/// subtractions saturate so that a stale count scores 0 instead of wrapping.
pub fn interest_score(shared: usize, candidate_tags: usize, current_tags: usize) -> usize {
    shared
        .min(candidate_tags.saturating_sub(shared))
        .min(current_tags.saturating_sub(shared))
}

/// Interest between two tag sets: `min(|A∩B|, |A\B|, |B\A|)`.
pub fn interest_between(a: &BTreeSet<TagId>, b: &BTreeSet<TagId>) -> usize {
    let shared = a.intersection(b).count();
    interest_score(shared, b.len(), a.len())
}

/// A candidate next slide with its shared-tag count and score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredCandidate {
    /// Candidate entry.
    pub id: EntryId,
    /// Tags shared with the current slide.
    pub shared: usize,
    /// Interest of the transition.
    pub score: usize,
}

impl ScoredCandidate {
    /// Score a candidate against the current slide.
    pub fn new(id: EntryId, shared: usize, candidate_tags: usize, current_tags: usize) -> Self {
        Self {
            id,
            shared,
            score: interest_score(shared, candidate_tags, current_tags),
        }
    }

    /// Total order used for selection; the greatest candidate wins.
    ///
    /// Primary: higher score. Secondary: entry id, per `tie_break`.
    pub fn rank(&self, other: &Self, tie_break: TieBreak) -> Ordering {
        self.score.cmp(&other.score).then_with(|| match tie_break {
            TieBreak::LowestId => other.id.cmp(&self.id),
            TieBreak::HighestId => self.id.cmp(&other.id),
        })
    }
}

/// Pick the best candidate under `tie_break`. `None` if there is none.
pub fn select_best<I>(candidates: I, tie_break: TieBreak) -> Option<ScoredCandidate>
where
    I: IntoIterator<Item = ScoredCandidate>,
{
    candidates
        .into_iter()
        .max_by(|a, b| a.rank(b, tie_break))
}

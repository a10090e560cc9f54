//! Greedy slideshow walker.
//!
//! The walker seeds the slideshow with the lowest-id entry, then repeatedly
//! appends the unused entry with the highest interest relative to the last
//! slide, found through the tag index.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::policy::{select_best, ScoredCandidate, WalkPolicy};
use crate::store::{Catalog, TagIndex};
use crate::types::{EntryId, Slideshow};

/// Error type for walker operations.
#[derive(Debug, thiserror::Error)]
pub enum WalkerError {
    /// No unused entry exists to seed the slideshow.
    #[error("Catalog is empty: no entry to seed the slideshow")]
    EmptyCatalog,
}

/// Receives `(remaining, total)` after the seed and after every step.
pub trait ProgressObserver {
    /// Called once per appended slide.
    fn observe(&mut self, remaining: usize, total: usize);
}

impl<F: FnMut(usize, usize)> ProgressObserver for F {
    fn observe(&mut self, remaining: usize, total: usize) {
        self(remaining, total)
    }
}

/// Observer that ignores progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn observe(&mut self, _remaining: usize, _total: usize) {}
}

/// Observer that logs every `interval` slides and on completion.
#[derive(Debug, Clone, Copy)]
pub struct LogProgress {
    interval: usize,
}

impl LogProgress {
    /// Log every `interval` slides (at least 1).
    pub fn new(interval: usize) -> Self {
        Self {
            interval: interval.max(1),
        }
    }
}

impl ProgressObserver for LogProgress {
    fn observe(&mut self, remaining: usize, total: usize) {
        let placed = total - remaining;
        if remaining == 0 || placed % self.interval == 0 {
            info!(placed, remaining, total, "walk progress");
        }
    }
}

/// Phase of the walk state machine. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalkPhase {
    /// Seeding the first slide.
    Init,
    /// Appending one slide per iteration.
    Step,
    /// Every entry placed, or nothing left to fall back to.
    Done,
}

/// Counters collected during a walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkStats {
    /// Steps after the seed.
    pub steps: usize,
    /// Slides chosen by interest score.
    pub scored_picks: usize,
    /// Slides chosen by `pick_lowest_unused` because no candidate shared a tag.
    pub fallback_picks: usize,
    /// Index ids with no catalog entry behind them.
    pub dangling_skips: usize,
    /// Index ids whose entry was already used.
    pub stale_skips: usize,
    /// Tag sets where the per-tag sample cap left a live entry unseen.
    pub capped_tags: usize,
}

/// Result of a completed walk.
#[derive(Debug, Clone)]
pub struct WalkOutcome {
    /// Slides in presentation order.
    pub slideshow: Slideshow,
    /// Walk counters.
    pub stats: WalkStats,
    /// Final phase; always [`WalkPhase::Done`].
    pub phase: WalkPhase,
}

/// Greedy nearest-neighbour walker over a catalog and its tag index.
///
/// ## Algorithm
///
/// 1. Seed with the lowest-id unused entry
/// 2. While entries remain:
///    - Count shared tags for live entries filed under the current slide's
///      tags, at most `sample_cap_per_tag` per tag
///    - No candidate: take the lowest-id unused entry
///    - Otherwise: take the candidate with the highest interest
///    - Mark it used, append it, prune it from its own tags' sets
///
/// The walker is the only writer of used flags and index sets.
#[derive(Debug, Clone, Default)]
pub struct GreedyWalker {
    policy: WalkPolicy,
}

impl GreedyWalker {
    /// Create a walker with the given policy.
    pub fn new(policy: WalkPolicy) -> Self {
        Self { policy }
    }

    /// Get the policy.
    pub fn policy(&self) -> &WalkPolicy {
        &self.policy
    }

    /// Walk the whole catalog without progress reporting.
    pub fn walk(&self, catalog: &mut Catalog, index: &mut TagIndex) -> Result<WalkOutcome, WalkerError> {
        self.walk_with_observer(catalog, index, &mut NoProgress)
    }

    /// Walk the whole catalog, reporting progress after every slide.
    pub fn walk_with_observer(
        &self,
        catalog: &mut Catalog,
        index: &mut TagIndex,
        observer: &mut dyn ProgressObserver,
    ) -> Result<WalkOutcome, WalkerError> {
        let mut phase = WalkPhase::Init;
        let mut stats = WalkStats::default();
        let total = catalog.unused_count();
        let mut slideshow = Slideshow::with_capacity(total);

        let seed = catalog.pick_lowest_unused().ok_or(WalkerError::EmptyCatalog)?;
        let mut current = seed;
        let mut remaining = total;
        if Self::commit(catalog, index, &mut slideshow, seed) {
            remaining -= 1;
        }
        observer.observe(remaining, total);
        trace!(?phase, seed = %seed, "walk seeded");

        phase = WalkPhase::Step;
        trace!(?phase, remaining, "walk phase");
        while remaining > 0 {
            let next = match self.best_candidate(current, catalog, index, &mut stats) {
                Some(candidate) => {
                    stats.scored_picks += 1;
                    trace!(entry = %candidate.id, score = candidate.score, shared = candidate.shared, "scored pick");
                    candidate.id
                }
                None => match catalog.pick_lowest_unused() {
                    Some(id) => {
                        stats.fallback_picks += 1;
                        debug!(entry = %id, "no tag overlap, falling back to lowest unused entry");
                        id
                    }
                    None => break,
                },
            };

            if !Self::commit(catalog, index, &mut slideshow, next) {
                debug!(entry = %next, "selected entry could not be committed, stopping walk");
                break;
            }
            current = next;
            remaining -= 1;
            stats.steps += 1;
            observer.observe(remaining, total);
        }
        phase = WalkPhase::Done;

        debug!(
            slides = slideshow.len(),
            steps = stats.steps,
            fallback_picks = stats.fallback_picks,
            dangling_skips = stats.dangling_skips,
            "walk complete"
        );

        Ok(WalkOutcome {
            slideshow,
            stats,
            phase,
        })
    }

    /// Shared-tag counts for live entries overlapping `current`.
    ///
    /// Reads only; ids are visited in ascending order within each tag.
    pub fn gather_candidates(
        &self,
        current: EntryId,
        catalog: &Catalog,
        index: &TagIndex,
        stats: &mut WalkStats,
    ) -> BTreeMap<EntryId, usize> {
        let mut shared: BTreeMap<EntryId, usize> = BTreeMap::new();
        let Some(entry) = catalog.get(current) else {
            return shared;
        };
        let cap = self.policy.sample_cap_per_tag;

        for &tag in entry.tags() {
            let mut ids = index.ids(tag);
            let mut taken = 0;
            while taken < cap {
                let Some(id) = ids.next() else { break };
                match catalog.get(id) {
                    None => stats.dangling_skips += 1,
                    Some(candidate) if candidate.is_used() => stats.stale_skips += 1,
                    Some(_) => {
                        *shared.entry(id).or_default() += 1;
                        taken += 1;
                    }
                }
            }
            // Only a live id left behind counts as a cut.
            if ids.any(|id| catalog.is_live(id)) {
                stats.capped_tags += 1;
            }
        }
        shared
    }

    fn best_candidate(
        &self,
        current: EntryId,
        catalog: &Catalog,
        index: &TagIndex,
        stats: &mut WalkStats,
    ) -> Option<ScoredCandidate> {
        let current_tags = catalog.get(current)?.tag_count();
        let shared = self.gather_candidates(current, catalog, index, stats);

        let scored = shared.into_iter().filter_map(|(id, count)| {
            catalog
                .get(id)
                .map(|c| ScoredCandidate::new(id, count, c.tag_count(), current_tags))
        });
        select_best(scored, self.policy.tie_break)
    }

    /// Mark `id` used, append it and prune it from its own tags' sets.
    fn commit(catalog: &mut Catalog, index: &mut TagIndex, slideshow: &mut Slideshow, id: EntryId) -> bool {
        if !catalog.mark_used(id) {
            return false;
        }
        slideshow.push(id);
        if let Some(entry) = catalog.get(id) {
            index.remove_entry(entry);
        }
        true
    }
}

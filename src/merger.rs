//! Vertical merging: turning raw photo records into catalog entries.
//!
//! Horizontal photos become entries immediately. Vertical photos are paired
//! in input order: the first vertical waits in a pending slot, the next one
//! closes the pair and produces an entry carrying the union of both tag sets.
//! A vertical still pending when the input ends is dropped and counted.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::store::{Catalog, TagIndex};
use crate::types::{EntryId, Orientation, RawRecord, TagId};

/// Counters describing one merge pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStats {
    /// Raw records consumed.
    pub records: usize,
    /// Entries built from a single horizontal photo.
    pub horizontal_entries: usize,
    /// Entries built from a pair of vertical photos.
    pub vertical_pairs: usize,
    /// Vertical photos left without a partner (0 or 1).
    pub dropped_verticals: usize,
    /// Record index of the dropped vertical, if any.
    pub dropped_index: Option<usize>,
}

impl MergeStats {
    /// Total entries produced.
    pub fn entries(&self) -> usize {
        self.horizontal_entries + self.vertical_pairs
    }
}

/// A vertical photo waiting for its partner.
#[derive(Debug, Clone)]
struct PendingVertical {
    index: usize,
    tags: BTreeSet<TagId>,
}

/// Streaming merger that fills a [`Catalog`].
///
/// Feed records in input order with [`VerticalMerger::push`], then call
/// [`VerticalMerger::finish`].
#[derive(Debug, Default)]
pub struct VerticalMerger {
    catalog: Catalog,
    pending: Option<PendingVertical>,
    stats: MergeStats,
}

impl VerticalMerger {
    /// Create a merger with an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one record. Returns the id of the entry it completed, if any.
    pub fn push(&mut self, record: RawRecord) -> Option<EntryId> {
        self.stats.records += 1;
        match record.orientation {
            Orientation::Horizontal => {
                self.stats.horizontal_entries += 1;
                Some(self.catalog.push_horizontal(record.index, record.tags))
            }
            Orientation::Vertical => match self.pending.take() {
                None => {
                    self.pending = Some(PendingVertical {
                        index: record.index,
                        tags: record.tags,
                    });
                    None
                }
                Some(first) => {
                    self.stats.vertical_pairs += 1;
                    Some(self.catalog.push_vertical_pair(
                        (first.index, &first.tags),
                        (record.index, &record.tags),
                    ))
                }
            },
        }
    }

    /// Close the pass, dropping an unpaired trailing vertical.
    pub fn finish(mut self) -> (Catalog, MergeStats) {
        if let Some(orphan) = self.pending.take() {
            self.stats.dropped_verticals = 1;
            self.stats.dropped_index = Some(orphan.index);
            warn!(
                record_index = orphan.index,
                "odd number of vertical photos, trailing vertical dropped"
            );
        }
        debug!(
            records = self.stats.records,
            horizontal = self.stats.horizontal_entries,
            vertical_pairs = self.stats.vertical_pairs,
            "merge pass complete"
        );
        (self.catalog, self.stats)
    }
}

/// Result of merging and indexing a record stream.
#[derive(Debug, Clone)]
pub struct MergedCatalog {
    /// All entries, ids in emission order.
    pub catalog: Catalog,
    /// Inverted index over the catalog's tags.
    pub index: TagIndex,
    /// Merge counters.
    pub stats: MergeStats,
}

/// Merge a record stream and build the tag index over the result.
pub fn merge_records<I>(records: I) -> MergedCatalog
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut merger = VerticalMerger::new();
    for record in records {
        merger.push(record);
    }
    let (catalog, stats) = merger.finish();
    let index = TagIndex::build(&catalog);
    MergedCatalog {
        catalog,
        index,
        stats,
    }
}

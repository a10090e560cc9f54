//! Raw photo records as produced by the input reader.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::entry::{Orientation, TagId};

/// One photo line of the input, before vertical merging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Photo orientation.
    pub orientation: Orientation,
    /// Interned tag ids; duplicates collapse.
    pub tags: BTreeSet<TagId>,
    /// Zero-based position of the record in the input.
    pub index: usize,
}

impl RawRecord {
    /// Create a new record.
    pub fn new(orientation: Orientation, tags: BTreeSet<TagId>, index: usize) -> Self {
        Self {
            orientation,
            tags,
            index,
        }
    }

    /// Create a horizontal record from raw tag ids.
    pub fn horizontal(index: usize, tags: &[u32]) -> Self {
        Self::new(Orientation::Horizontal, tags.iter().copied().map(TagId::new).collect(), index)
    }

    /// Create a vertical record from raw tag ids.
    pub fn vertical(index: usize, tags: &[u32]) -> Self {
        Self::new(Orientation::Vertical, tags.iter().copied().map(TagId::new).collect(), index)
    }
}

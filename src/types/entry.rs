//! Catalog entry types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Dense identifier of a catalog entry.
///
/// Assigned in merge emission order starting at 0. Implements `Ord` so that
/// index sets iterate in ascending id order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntryId(u32);

impl EntryId {
    /// Create an entry id from its dense index.
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Position of this entry in the catalog.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dense identifier of a tag label.
///
/// Labels are interned in first-seen order, so the first distinct label of a
/// run is `TagId(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TagId(u32);

impl TagId {
    /// Create a tag id from its dense index.
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Position of this tag in the interner.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Orientation of a raw photo record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Horizontal photo; forms a slide on its own.
    Horizontal,
    /// Vertical photo; must be paired with another vertical.
    Vertical,
}

impl Orientation {
    /// Parse the single-letter orientation code used by the input format.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "H" => Some(Self::Horizontal),
            "V" => Some(Self::Vertical),
            _ => None,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => write!(f, "H"),
            Self::Vertical => write!(f, "V"),
        }
    }
}

/// A slide-ready unit: one horizontal photo or a merged pair of verticals.
///
/// Identity, source indices and tags are fixed at creation. The `used` flag is
/// only flipped by [`Catalog`](crate::store::Catalog), once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    id: EntryId,
    orientation: Orientation,
    source_indices: Vec<usize>,
    tags: BTreeSet<TagId>,
    used: bool,
}

impl Entry {
    /// Create an entry for a single horizontal photo.
    pub fn horizontal(id: EntryId, source_index: usize, tags: BTreeSet<TagId>) -> Self {
        Self {
            id,
            orientation: Orientation::Horizontal,
            source_indices: vec![source_index],
            tags,
            used: false,
        }
    }

    /// Create an entry for a pair of vertical photos.
    ///
    /// Tags are the union of both photos' tags.
    pub fn vertical_pair(
        id: EntryId,
        first: (usize, &BTreeSet<TagId>),
        second: (usize, &BTreeSet<TagId>),
    ) -> Self {
        let tags = first.1.union(second.1).copied().collect();
        Self {
            id,
            orientation: Orientation::Vertical,
            source_indices: vec![first.0, second.0],
            tags,
            used: false,
        }
    }

    /// Entry id.
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Orientation of the photos behind this entry.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Original record indices, in input order.
    pub fn source_indices(&self) -> &[usize] {
        &self.source_indices
    }

    /// Tag set.
    pub fn tags(&self) -> &BTreeSet<TagId> {
        &self.tags
    }

    /// Number of distinct tags.
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// Whether the entry has been appended to the slideshow.
    pub fn is_used(&self) -> bool {
        self.used
    }

    /// Flip the used flag. Returns `false` if it was already set.
    pub(crate) fn mark_used(&mut self) -> bool {
        if self.used {
            return false;
        }
        self.used = true;
        true
    }
}

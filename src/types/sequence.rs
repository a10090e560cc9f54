//! The ordered output of a walk.

use serde::{Deserialize, Serialize};

use super::entry::EntryId;
use crate::canonical::fingerprint;

/// Ordered sequence of selected entry ids.
///
/// After a completed walk this is a permutation of every entry id in the
/// catalog; [`Slideshow::is_permutation_of`] checks that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slideshow {
    order: Vec<EntryId>,
}

impl Slideshow {
    /// Create an empty slideshow.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty slideshow sized for `capacity` slides.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            order: Vec::with_capacity(capacity),
        }
    }

    /// Append a slide.
    pub fn push(&mut self, id: EntryId) {
        self.order.push(id);
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no slide has been appended.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Slides in presentation order.
    pub fn as_slice(&self) -> &[EntryId] {
        &self.order
    }

    /// Iterate slides in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = EntryId> + '_ {
        self.order.iter().copied()
    }

    /// Consecutive slide pairs, in order.
    pub fn transitions(&self) -> impl Iterator<Item = (EntryId, EntryId)> + '_ {
        self.order.windows(2).map(|w| (w[0], w[1]))
    }

    /// Check that every id in `0..entry_count` appears exactly once.
    pub fn is_permutation_of(&self, entry_count: usize) -> bool {
        if self.order.len() != entry_count {
            return false;
        }
        let mut seen = vec![false; entry_count];
        for id in &self.order {
            match seen.get_mut(id.index()) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }

    /// Deterministic fingerprint of the order (xxh64 hex).
    pub fn fingerprint(&self) -> String {
        fingerprint(&self.order)
    }
}

impl FromIterator<EntryId> for Slideshow {
    fn from_iter<I: IntoIterator<Item = EntryId>>(iter: I) -> Self {
        Self {
            order: iter.into_iter().collect(),
        }
    }
}

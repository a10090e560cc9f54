//! Photo catalog: the owner of every entry and its used flag.

use std::collections::BTreeSet;

use crate::canonical::fingerprint;
use crate::types::{Entry, EntryId, TagId};

/// Owns every entry produced by the merge pass.
///
/// Ids are dense: the entry with id `n` lives at position `n`. The catalog is
/// the only place where an entry's `used` flag can change.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<Entry>,
    unused: usize,
    /// Every entry below this position is used.
    lowest_unused: usize,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a horizontal entry and return its id.
    pub fn push_horizontal(&mut self, source_index: usize, tags: BTreeSet<TagId>) -> EntryId {
        let id = self.next_id();
        self.insert(Entry::horizontal(id, source_index, tags))
    }

    /// Append a merged vertical pair and return its id.
    pub fn push_vertical_pair(
        &mut self,
        first: (usize, &BTreeSet<TagId>),
        second: (usize, &BTreeSet<TagId>),
    ) -> EntryId {
        let id = self.next_id();
        self.insert(Entry::vertical_pair(id, first, second))
    }

    fn next_id(&self) -> EntryId {
        EntryId::new(self.entries.len() as u32)
    }

    fn insert(&mut self, entry: Entry) -> EntryId {
        let id = entry.id();
        self.entries.push(entry);
        self.unused += 1;
        id
    }

    /// Look up an entry.
    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.get(id.index())
    }

    /// Number of entries, used or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries not yet placed in the slideshow.
    pub fn unused_count(&self) -> usize {
        self.unused
    }

    /// Iterate all entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Whether `id` names an entry that has not been used yet.
    pub fn is_live(&self, id: EntryId) -> bool {
        self.get(id).is_some_and(|e| !e.is_used())
    }

    /// Fingerprint of the merged entries (orientation, sources, tags) in id
    /// order. Used flags are left out, so it is the same before and after a walk.
    pub fn fingerprint(&self) -> String {
        let shape: Vec<_> = self
            .entries
            .iter()
            .map(|e| (e.orientation(), e.source_indices(), e.tags()))
            .collect();
        fingerprint(&shape)
    }

    /// Mark an entry as used.
    ///
    /// Returns `false` if the id is unknown or the entry was already used;
    /// the flag never goes back to unused.
    pub fn mark_used(&mut self, id: EntryId) -> bool {
        let flipped = self
            .entries
            .get_mut(id.index())
            .is_some_and(Entry::mark_used);
        if flipped {
            self.unused -= 1;
        }
        flipped
    }

    /// Lowest-id entry that has not been used yet.
    ///
    /// Used flags are monotone, so the scan resumes where the previous call
    /// stopped and the whole walk pays for at most one pass over the catalog.
    pub fn pick_lowest_unused(&mut self) -> Option<EntryId> {
        while let Some(entry) = self.entries.get(self.lowest_unused) {
            if !entry.is_used() {
                return Some(entry.id());
            }
            self.lowest_unused += 1;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Orientation;

    fn tags(ids: &[u32]) -> BTreeSet<TagId> {
        ids.iter().copied().map(TagId::new).collect()
    }

    fn catalog_of(n: usize) -> Catalog {
        let mut catalog = Catalog::new();
        for i in 0..n {
            catalog.push_horizontal(i, tags(&[i as u32]));
        }
        catalog
    }

    #[test]
    fn test_ids_are_dense() {
        let mut catalog = Catalog::new();
        let a = catalog.push_horizontal(0, tags(&[1]));
        let b = catalog.push_vertical_pair((1, &tags(&[2])), (2, &tags(&[3])));
        let c = catalog.push_horizontal(3, tags(&[4]));

        assert_eq!((a.index(), b.index(), c.index()), (0, 1, 2));
        assert_eq!(catalog.get(b).map(|e| e.source_indices().to_vec()), Some(vec![1, 2]));
        assert_eq!(catalog.get(b).map(Entry::orientation), Some(Orientation::Vertical));
    }

    #[test]
    fn test_mark_used_is_one_way() {
        let mut catalog = catalog_of(2);
        let id = EntryId::new(1);

        assert!(catalog.is_live(id));
        assert!(catalog.mark_used(id));
        assert!(!catalog.mark_used(id));
        assert!(!catalog.is_live(id));
        assert_eq!(catalog.unused_count(), 1);
    }

    #[test]
    fn test_fingerprint_tracks_merge_not_walk() {
        let mut catalog = catalog_of(3);
        let before = catalog.fingerprint();
        catalog.mark_used(EntryId::new(1));
        assert_eq!(catalog.fingerprint(), before);

        let mut paired = Catalog::new();
        paired.push_horizontal(0, tags(&[0]));
        paired.push_vertical_pair((1, &tags(&[1])), (2, &tags(&[2])));
        assert_ne!(paired.fingerprint(), before);
    }

    #[test]
    fn test_unknown_id_is_not_live() {
        let mut catalog = catalog_of(1);
        let missing = EntryId::new(7);

        assert!(!catalog.is_live(missing));
        assert!(!catalog.mark_used(missing));
        assert_eq!(catalog.unused_count(), 1);
    }

    #[test]
    fn test_pick_lowest_unused_skips_used() {
        let mut catalog = catalog_of(4);
        assert_eq!(catalog.pick_lowest_unused(), Some(EntryId::new(0)));

        catalog.mark_used(EntryId::new(0));
        catalog.mark_used(EntryId::new(2));
        assert_eq!(catalog.pick_lowest_unused(), Some(EntryId::new(1)));

        catalog.mark_used(EntryId::new(1));
        assert_eq!(catalog.pick_lowest_unused(), Some(EntryId::new(3)));

        catalog.mark_used(EntryId::new(3));
        assert_eq!(catalog.pick_lowest_unused(), None);
    }
}

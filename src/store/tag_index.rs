//! Inverted index from tag to the entries carrying it.

use std::collections::BTreeSet;

use super::catalog::Catalog;
use crate::types::{Entry, EntryId, TagId};

/// Tag → entry id sets.
///
/// Sets hold owned ids and iterate in ascending id order. An entry is only
/// removed from the sets of its own tags when it is selected, so a set may
/// still name an entry that is already used; readers must check liveness
/// through the [`Catalog`].
#[derive(Debug, Clone, Default)]
pub struct TagIndex {
    /// Indexed by `TagId::index()`; tag ids are dense.
    sets: Vec<BTreeSet<EntryId>>,
}

impl TagIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every tag of every entry in the catalog.
    pub fn build(catalog: &Catalog) -> Self {
        let mut index = Self::new();
        for entry in catalog.iter() {
            index.insert_entry(entry);
        }
        index
    }

    /// Add one id under one tag.
    pub fn insert(&mut self, tag: TagId, id: EntryId) {
        if tag.index() >= self.sets.len() {
            self.sets.resize_with(tag.index() + 1, BTreeSet::new);
        }
        self.sets[tag.index()].insert(id);
    }

    /// Add an entry under each of its tags.
    pub fn insert_entry(&mut self, entry: &Entry) {
        for &tag in entry.tags() {
            self.insert(tag, entry.id());
        }
    }

    /// Remove an entry from the sets of its own tags.
    ///
    /// Sets of other tags are left untouched.
    pub fn remove_entry(&mut self, entry: &Entry) {
        for tag in entry.tags() {
            if let Some(set) = self.sets.get_mut(tag.index()) {
                set.remove(&entry.id());
            }
        }
    }

    /// Ids currently filed under `tag`, ascending. Empty for unknown tags.
    pub fn ids(&self, tag: TagId) -> impl Iterator<Item = EntryId> + '_ {
        self.sets
            .get(tag.index())
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Number of distinct tags seen.
    pub fn tag_count(&self) -> usize {
        self.sets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(ids: &[u32]) -> BTreeSet<TagId> {
        ids.iter().copied().map(TagId::new).collect()
    }

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.push_horizontal(0, tags(&[0, 1]));
        catalog.push_horizontal(1, tags(&[1, 2]));
        catalog.push_horizontal(2, tags(&[2]));
        catalog
    }

    #[test]
    fn test_build_files_every_tag() {
        let index = TagIndex::build(&sample_catalog());

        assert_eq!(index.tag_count(), 3);
        assert_eq!(index.ids(TagId::new(1)).collect::<Vec<_>>(), vec![EntryId::new(0), EntryId::new(1)]);
        assert_eq!(index.ids(TagId::new(2)).collect::<Vec<_>>(), vec![EntryId::new(1), EntryId::new(2)]);
    }

    #[test]
    fn test_remove_entry_prunes_own_tags_only() {
        let catalog = sample_catalog();
        let mut index = TagIndex::build(&catalog);
        let entry = catalog.get(EntryId::new(1)).unwrap();

        index.remove_entry(entry);

        assert_eq!(index.ids(TagId::new(1)).collect::<Vec<_>>(), vec![EntryId::new(0)]);
        assert_eq!(index.ids(TagId::new(2)).collect::<Vec<_>>(), vec![EntryId::new(2)]);
        assert_eq!(index.ids(TagId::new(0)).count(), 1);
    }

    #[test]
    fn test_unknown_tag_is_empty() {
        let index = TagIndex::build(&sample_catalog());
        assert_eq!(index.ids(TagId::new(40)).count(), 0);
    }

    #[test]
    fn test_insert_grows_sparse_tags() {
        let mut index = TagIndex::new();
        index.insert(TagId::new(5), EntryId::new(9));

        assert_eq!(index.tag_count(), 6);
        assert_eq!(index.ids(TagId::new(5)).collect::<Vec<_>>(), vec![EntryId::new(9)]);
        assert_eq!(index.ids(TagId::new(4)).count(), 0);
    }
}

//! Entry storage: the catalog and the tag inverted index.

pub mod catalog;
pub mod tag_index;

pub use catalog::Catalog;
pub use tag_index::TagIndex;

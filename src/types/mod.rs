//! Core types for the slideshow kernel.

pub mod entry;
pub mod record;
pub mod sequence;

pub use entry::{Entry, EntryId, Orientation, TagId};
pub use record::RawRecord;
pub use sequence::Slideshow;

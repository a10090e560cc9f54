//! # slideshow-kernel
//!
//! Greedy ordering of photo slideshows by tag overlap.
//!
//! The kernel answers one question:
//!
//! > Given a set of tagged photos, in which order should the slides be shown
//! > so that consecutive slides are as **interesting** as possible?
//!
//! Interest between two slides with tag sets `A` and `B` is
//! `min(|A∩B|, |A\B|, |B\A|)`. Maximizing the sum over a whole slideshow is
//! NP-hard; the kernel approximates it with a greedy nearest-neighbour walk.
//!
//! ## Architecture
//!
//! ```text
//! RawRecords → VerticalMerger → Catalog + TagIndex → GreedyWalker → Slideshow
//!                                                          ↓
//!                                                      RunReport
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Same input + same policy → identical slide order and fingerprint
//! - Index sets iterate in ascending entry id order
//! - Ties between equal scores follow the policy's `TieBreak`
//! - The fallback pick is the lowest-id unused entry

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod policy;
pub mod store;
pub mod merger;
pub mod walker;
pub mod report;
pub mod planner;
pub mod canonical;
pub mod io;
pub mod error;

// Re-exports
pub use types::{Entry, EntryId, Orientation, RawRecord, Slideshow, TagId};
pub use policy::{
    interest_between, interest_score, PolicyError, PolicyOverrides, ScoredCandidate, TieBreak, WalkPolicy,
    DEFAULT_PROGRESS_INTERVAL, DEFAULT_SAMPLE_CAP_PER_TAG,
};
pub use store::{Catalog, TagIndex};
pub use merger::{merge_records, MergeStats, MergedCatalog, VerticalMerger};
pub use walker::{
    GreedyWalker, LogProgress, NoProgress, ProgressObserver, WalkOutcome, WalkPhase, WalkStats,
    WalkerError,
};
pub use report::{score_slideshow, RunReport, REPORT_SCHEMA_VERSION};
pub use planner::{PlannedSlideshow, SlideshowPlanner};
pub use canonical::{fingerprint, fingerprint_u64};
pub use io::{
    parse_str, read_records, read_records_from_path, submission_path, write_submission,
    write_submission_file, ParseError, ParsedInput, TagInterner, WriteError,
};
pub use error::SlideshowError;

/// Default policy version identifier.
pub const DEFAULT_POLICY_VERSION: &str = "walk_policy_v1";

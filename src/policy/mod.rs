//! Walk policy and interest scoring.

pub mod v1;
pub mod scoring;

pub use v1::{PolicyError, PolicyOverrides, TieBreak, WalkPolicy, DEFAULT_PROGRESS_INTERVAL, DEFAULT_SAMPLE_CAP_PER_TAG};
pub use scoring::{interest_between, interest_score, select_best, ScoredCandidate};

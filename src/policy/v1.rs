//! WalkPolicy v1: tunables of the greedy walk.
//!
//! The policy is serializable so it can be loaded from a JSON file and
//! recorded, together with its `params_hash`, in the run report.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::canonical::fingerprint;
use crate::DEFAULT_POLICY_VERSION;

/// Default number of live entries counted per tag during gathering.
pub const DEFAULT_SAMPLE_CAP_PER_TAG: usize = 5000;

/// Default number of steps between progress log lines.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 1000;

/// How ties between equal-score candidates are resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// The candidate with the smallest entry id wins.
    #[default]
    LowestId,
    /// The candidate with the largest entry id wins.
    HighestId,
}

impl FromStr for TieBreak {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "lowest_id" | "lowest" => Ok(Self::LowestId),
            "highest_id" | "highest" => Ok(Self::HighestId),
            _ => Err(PolicyError::UnknownTieBreak(s.to_string())),
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LowestId => write!(f, "lowest_id"),
            Self::HighestId => write!(f, "highest_id"),
        }
    }
}

/// Errors raised while loading or validating a policy.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// Policy file could not be read.
    #[error("Cannot read policy file {path}: {source}")]
    Io {
        /// File that failed.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Policy file is not valid JSON for this schema.
    #[error("Invalid policy JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// `sample_cap_per_tag` must be positive.
    #[error("sample_cap_per_tag must be at least 1")]
    ZeroSampleCap,
    /// `progress_interval` must be positive.
    #[error("progress_interval must be at least 1")]
    ZeroProgressInterval,
    /// Unrecognized tie-break name.
    #[error("Unknown tie-break '{0}' (expected lowest_id or highest_id)")]
    UnknownTieBreak(String),
}

/// Walk policy version 1.
///
/// ## Parameters
///
/// - `sample_cap_per_tag`: live entries counted per tag of the current slide
///   before the rest of that tag's set is ignored for the step
/// - `tie_break`: order among candidates with equal interest
/// - `progress_interval`: steps between progress observations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkPolicy {
    /// Policy version identifier.
    pub version: String,
    /// Cap on live entries examined per tag.
    pub sample_cap_per_tag: usize,
    /// Tie-break among equal scores.
    pub tie_break: TieBreak,
    /// Steps between progress log lines.
    pub progress_interval: usize,
}

impl WalkPolicy {
    /// Create a policy with custom parameters.
    pub fn new(sample_cap_per_tag: usize, tie_break: TieBreak, progress_interval: usize) -> Self {
        Self {
            version: DEFAULT_POLICY_VERSION.to_string(),
            sample_cap_per_tag,
            tie_break,
            progress_interval,
        }
    }

    /// Load a policy from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, PolicyError> {
        let policy = Self::read_json_file(path)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Resolve the effective policy: defaults, then `file`, then `overrides`.
    ///
    /// Validation runs once on the result, so an override may repair a value
    /// the file got wrong.
    pub fn resolve(file: Option<&Path>, overrides: &PolicyOverrides) -> Result<Self, PolicyError> {
        let mut policy = match file {
            Some(path) => Self::read_json_file(path)?,
            None => Self::default(),
        };
        overrides.apply(&mut policy);
        policy.validate()?;
        Ok(policy)
    }

    fn read_json_file(path: &Path) -> Result<Self, PolicyError> {
        let text = std::fs::read_to_string(path).map_err(|source| PolicyError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Reject values the walker cannot run with.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.sample_cap_per_tag == 0 {
            return Err(PolicyError::ZeroSampleCap);
        }
        if self.progress_interval == 0 {
            return Err(PolicyError::ZeroProgressInterval);
        }
        Ok(())
    }

    /// Get the policy ID.
    pub fn policy_id(&self) -> &str {
        &self.version
    }

    /// Hash of the policy parameters (xxh64 hex of canonical JSON).
    ///
    /// `progress_interval` only affects logging and is left out, so changing
    /// it does not change the hash.
    pub fn params_hash(&self) -> String {
        fingerprint(&(&self.version, self.sample_cap_per_tag, self.tie_break))
    }
}

/// Per-field values from flags or environment that win over the policy file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolicyOverrides {
    /// Replaces `sample_cap_per_tag`.
    pub sample_cap_per_tag: Option<usize>,
    /// Replaces `tie_break`.
    pub tie_break: Option<TieBreak>,
    /// Replaces `progress_interval`.
    pub progress_interval: Option<usize>,
}

impl PolicyOverrides {
    /// Overwrite every field of `policy` that has an override.
    pub fn apply(&self, policy: &mut WalkPolicy) {
        if let Some(cap) = self.sample_cap_per_tag {
            policy.sample_cap_per_tag = cap;
        }
        if let Some(tie_break) = self.tie_break {
            policy.tie_break = tie_break;
        }
        if let Some(interval) = self.progress_interval {
            policy.progress_interval = interval;
        }
    }
}

impl Default for WalkPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_SAMPLE_CAP_PER_TAG,
            TieBreak::default(),
            DEFAULT_PROGRESS_INTERVAL,
        )
    }
}

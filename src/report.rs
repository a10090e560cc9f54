//! Slideshow scoring and run reports.
//!
//! The report is the diagnostic record of one run: how the input merged,
//! how the walk went, what the result scores, and a fingerprint that pins
//! the exact order for reproducibility checks.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::merger::MergeStats;
use crate::policy::{interest_between, WalkPolicy};
use crate::store::Catalog;
use crate::types::Slideshow;
use crate::walker::WalkStats;

/// Report schema version. Increment on breaking changes.
pub const REPORT_SCHEMA_VERSION: &str = "slideshow_report_v1";

/// Total interest of a slideshow: the sum over consecutive slide pairs.
///
/// Pairs naming an entry missing from the catalog contribute nothing.
pub fn score_slideshow(catalog: &Catalog, slideshow: &Slideshow) -> u64 {
    slideshow
        .transitions()
        .filter_map(|(a, b)| {
            let a = catalog.get(a)?;
            let b = catalog.get(b)?;
            Some(interest_between(a.tags(), b.tags()) as u64)
        })
        .sum()
}

/// Diagnostic summary of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Schema version.
    pub version: String,
    /// Policy ID used for the walk.
    pub policy_id: String,
    /// Hash of the policy parameters.
    pub policy_params_hash: String,
    /// Merge counters, including dropped verticals.
    pub merge: MergeStats,
    /// Fingerprint of the merged catalog the walk ran over.
    pub catalog_fingerprint: String,
    /// Distinct tags in the index.
    pub tag_count: usize,
    /// Walk counters.
    pub walk: WalkStats,
    /// Number of slides written.
    pub slide_count: usize,
    /// Sum of interest over consecutive slides.
    pub total_interest: u64,
    /// Fingerprint of the slide order.
    pub sequence_fingerprint: String,
}

impl RunReport {
    /// Build the report for a finished walk.
    pub fn new(
        policy: &WalkPolicy,
        merge: MergeStats,
        tag_count: usize,
        walk: WalkStats,
        catalog: &Catalog,
        slideshow: &Slideshow,
    ) -> Self {
        Self {
            version: REPORT_SCHEMA_VERSION.to_string(),
            policy_id: policy.policy_id().to_string(),
            policy_params_hash: policy.params_hash(),
            merge,
            catalog_fingerprint: catalog.fingerprint(),
            tag_count,
            walk,
            slide_count: slideshow.len(),
            total_interest: score_slideshow(catalog, slideshow),
            sequence_fingerprint: slideshow.fingerprint(),
        }
    }

    /// Pretty JSON rendering.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write the report as pretty JSON.
    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        let json = self.to_json_pretty().map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EntryId, TagId};
    use std::collections::BTreeSet;

    fn tags(ids: &[u32]) -> BTreeSet<TagId> {
        ids.iter().copied().map(TagId::new).collect()
    }

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.push_horizontal(0, tags(&[0, 1, 2]));
        catalog.push_horizontal(1, tags(&[1, 2, 3]));
        catalog.push_horizontal(2, tags(&[3, 4]));
        catalog
    }

    fn show(ids: &[u32]) -> Slideshow {
        ids.iter().copied().map(EntryId::new).collect()
    }

    #[test]
    fn test_score_sums_transitions() {
        let catalog = sample_catalog();
        // 0->1: min(2,1,1)=1; 1->2: min(1,2,1)=1
        assert_eq!(score_slideshow(&catalog, &show(&[0, 1, 2])), 2);
        // 0->2: no overlap
        assert_eq!(score_slideshow(&catalog, &show(&[0, 2, 1])), 1);
    }

    #[test]
    fn test_score_degenerate_slideshows() {
        let catalog = sample_catalog();
        assert_eq!(score_slideshow(&catalog, &Slideshow::new()), 0);
        assert_eq!(score_slideshow(&catalog, &show(&[1])), 0);
        assert_eq!(score_slideshow(&catalog, &show(&[0, 9])), 0);
    }

    #[test]
    fn test_report_json_roundtrip_fields() {
        let catalog = sample_catalog();
        let slideshow = show(&[0, 1, 2]);
        let report = RunReport::new(
            &WalkPolicy::default(),
            MergeStats::default(),
            5,
            WalkStats::default(),
            &catalog,
            &slideshow,
        );

        assert_eq!(report.total_interest, 2);
        assert_eq!(report.slide_count, 3);
        assert_eq!(report.sequence_fingerprint, slideshow.fingerprint());
        assert_eq!(report.catalog_fingerprint, catalog.fingerprint());

        let json = report.to_json_pretty().unwrap();
        let back: RunReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}

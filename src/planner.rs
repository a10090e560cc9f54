//! End-to-end planning: records in, ordered slideshow and report out.

use tracing::info;

use crate::error::SlideshowError;
use crate::merger::{merge_records, MergeStats, MergedCatalog};
use crate::policy::WalkPolicy;
use crate::report::RunReport;
use crate::store::Catalog;
use crate::types::{RawRecord, Slideshow};
use crate::walker::{GreedyWalker, NoProgress, ProgressObserver, WalkStats};

/// Everything a run produces.
#[derive(Debug, Clone)]
pub struct PlannedSlideshow {
    /// Catalog after the walk; every entry is used.
    pub catalog: Catalog,
    /// Slides in presentation order.
    pub slideshow: Slideshow,
    /// Merge counters.
    pub merge: MergeStats,
    /// Walk counters.
    pub walk: WalkStats,
    /// Diagnostic report.
    pub report: RunReport,
}

/// Runs merge → index → walk → report.
#[derive(Debug, Clone, Default)]
pub struct SlideshowPlanner {
    walker: GreedyWalker,
}

impl SlideshowPlanner {
    /// Create a planner; the policy is validated first.
    pub fn new(policy: WalkPolicy) -> Result<Self, SlideshowError> {
        policy.validate()?;
        Ok(Self {
            walker: GreedyWalker::new(policy),
        })
    }

    /// Get the policy.
    pub fn policy(&self) -> &WalkPolicy {
        self.walker.policy()
    }

    /// Plan a slideshow without progress reporting.
    pub fn plan<I>(&self, records: I) -> Result<PlannedSlideshow, SlideshowError>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        self.plan_with_observer(records, &mut NoProgress)
    }

    /// Plan a slideshow, forwarding walk progress to `observer`.
    pub fn plan_with_observer<I>(
        &self,
        records: I,
        observer: &mut dyn ProgressObserver,
    ) -> Result<PlannedSlideshow, SlideshowError>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let MergedCatalog {
            mut catalog,
            mut index,
            stats: merge,
        } = merge_records(records);

        info!(
            records = merge.records,
            entries = catalog.len(),
            vertical_pairs = merge.vertical_pairs,
            dropped_verticals = merge.dropped_verticals,
            tags = index.tag_count(),
            policy_params_hash = %self.policy().params_hash(),
            "catalog built"
        );

        let outcome = self.walker.walk_with_observer(&mut catalog, &mut index, observer)?;
        debug_assert!(outcome.slideshow.is_permutation_of(catalog.len()));

        let report = RunReport::new(
            self.policy(),
            merge,
            index.tag_count(),
            outcome.stats,
            &catalog,
            &outcome.slideshow,
        );

        info!(
            slides = report.slide_count,
            total_interest = report.total_interest,
            fallback_picks = outcome.stats.fallback_picks,
            fingerprint = %report.sequence_fingerprint,
            "slideshow planned"
        );

        Ok(PlannedSlideshow {
            catalog,
            slideshow: outcome.slideshow,
            merge,
            walk: outcome.stats,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::TieBreak;

    #[test]
    fn test_plan_reports_dropped_vertical() {
        let planner = SlideshowPlanner::default();
        let planned = planner
            .plan(vec![
                RawRecord::horizontal(0, &[0, 1]),
                RawRecord::vertical(1, &[1]),
                RawRecord::vertical(2, &[2]),
                RawRecord::vertical(3, &[3]),
            ])
            .unwrap();

        assert_eq!(planned.slideshow.len(), 2);
        assert_eq!(planned.report.merge.dropped_verticals, 1);
        assert_eq!(planned.report.merge.dropped_index, Some(3));
        assert!(planned.catalog.iter().all(|e| e.is_used()));
    }

    #[test]
    fn test_plan_empty_input_fails() {
        let err = SlideshowPlanner::default().plan(Vec::new()).unwrap_err();
        assert!(matches!(err, SlideshowError::Walk(_)));
    }

    #[test]
    fn test_plan_single_vertical_is_empty_catalog() {
        let err = SlideshowPlanner::default()
            .plan(vec![RawRecord::vertical(0, &[0])])
            .unwrap_err();
        assert!(matches!(err, SlideshowError::Walk(crate::walker::WalkerError::EmptyCatalog)));
    }

    #[test]
    fn test_invalid_policy_rejected() {
        let err = SlideshowPlanner::new(WalkPolicy::new(0, TieBreak::LowestId, 1)).unwrap_err();
        assert!(matches!(err, SlideshowError::Policy(_)));
    }
}

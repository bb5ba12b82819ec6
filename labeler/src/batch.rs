//! Batch planning and resume decisions.
//!
//! Pure bookkeeping: splitting the catalog into batches and label
//! groups, normalizing the batch size, and deciding the starting batch
//! from a saved checkpoint. The print loop itself lives in `printjob`.

use std::ops::Range;

use tracing::warn;

use crate::checkpoint::Checkpoint;

/// How a batch job is sliced: products per label, labels per batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    pub total_products: usize,
    /// Normalized to a multiple of `per_label`.
    pub batch_size: usize,
    /// Products per label (columns × rows).
    pub per_label: usize,
}

impl BatchPlan {
    /// Build a plan, flooring `batch_size` to a multiple of
    /// columns × rows (and at least one label's worth).
    pub fn new(total_products: usize, batch_size: usize, columns: u32, rows: u32) -> Self {
        let per_label = (columns.max(1) * rows.max(1)) as usize;
        let normalized = normalize_batch_size(batch_size, per_label);
        if normalized != batch_size {
            warn!(
                requested = batch_size,
                adjusted = normalized,
                per_label,
                "batch size is not a multiple of products per label, adjusting"
            );
        }
        Self {
            total_products,
            batch_size: normalized,
            per_label,
        }
    }

    /// Number of batches, the last possibly short.
    pub fn total_batches(&self) -> usize {
        self.total_products.div_ceil(self.batch_size)
    }

    /// Product index range of one batch.
    pub fn batch_range(&self, batch: usize) -> Range<usize> {
        let start = batch * self.batch_size;
        let end = (start + self.batch_size).min(self.total_products);
        start..end
    }

    /// Label groups (chunks of `per_label` product indices) of a batch.
    pub fn label_groups(&self, batch: usize) -> Vec<Range<usize>> {
        let range = self.batch_range(batch);
        let mut groups = Vec::new();
        let mut start = range.start;
        while start < range.end {
            let end = (start + self.per_label).min(range.end);
            groups.push(start..end);
            start = end;
        }
        groups
    }

    /// Labels needed for the whole catalog.
    pub fn total_labels(&self) -> usize {
        self.total_products.div_ceil(self.per_label)
    }
}

/// Floor to a multiple of `per_label`, never below one label.
pub fn normalize_batch_size(batch_size: usize, per_label: usize) -> usize {
    let per_label = per_label.max(1);
    ((batch_size / per_label) * per_label).max(per_label)
}

/// Decide the starting batch from a saved checkpoint.
///
/// `accept_resume` is the caller-supplied decision (interactive y/n in
/// the CLI); it is only consulted when a checkpoint exists and resume
/// was not disabled.
pub fn resume_start_batch(
    checkpoint: Option<&Checkpoint>,
    no_resume: bool,
    accept_resume: impl FnOnce(&Checkpoint) -> bool,
) -> usize {
    if no_resume {
        return 0;
    }
    match checkpoint {
        Some(cp) if accept_resume(cp) => cp.last_completed_batch + 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_floors_to_multiple() {
        assert_eq!(normalize_batch_size(20, 4), 20);
        assert_eq!(normalize_batch_size(22, 4), 20);
        assert_eq!(normalize_batch_size(3, 4), 4);
        assert_eq!(normalize_batch_size(0, 4), 4);
    }

    #[test]
    fn twenty_one_products_make_two_batches() {
        // 21 rows, batch size 20, 4 products per label.
        let plan = BatchPlan::new(21, 20, 4, 1);
        assert_eq!(plan.total_batches(), 2);
        assert_eq!(plan.batch_range(0), 0..20);
        assert_eq!(plan.batch_range(1), 20..21);
        assert_eq!(plan.label_groups(0).len(), 5);
        assert_eq!(plan.label_groups(1), vec![20..21]);
        assert_eq!(plan.total_labels(), 6);
    }

    #[test]
    fn exact_multiple_has_no_short_batch() {
        let plan = BatchPlan::new(40, 20, 4, 1);
        assert_eq!(plan.total_batches(), 2);
        assert_eq!(plan.batch_range(1), 20..40);
    }

    #[test]
    fn plan_normalizes_odd_batch_size() {
        let plan = BatchPlan::new(100, 23, 4, 1);
        assert_eq!(plan.batch_size, 20);
    }

    #[test]
    fn grid_geometry_feeds_per_label() {
        let plan = BatchPlan::new(50, 24, 4, 2);
        assert_eq!(plan.per_label, 8);
        assert_eq!(plan.label_groups(0).len(), 3);
    }

    #[test]
    fn resume_accepted_starts_after_checkpoint() {
        let cp = Checkpoint::new(3, 79, 10, 20);
        let start = resume_start_batch(Some(&cp), false, |_| true);
        assert_eq!(start, 4);
    }

    #[test]
    fn resume_declined_starts_from_zero() {
        let cp = Checkpoint::new(3, 79, 10, 20);
        let start = resume_start_batch(Some(&cp), false, |_| false);
        assert_eq!(start, 0);
    }

    #[test]
    fn no_resume_flag_ignores_checkpoint() {
        let cp = Checkpoint::new(3, 79, 10, 20);
        let start = resume_start_batch(Some(&cp), true, |_| {
            panic!("decision callback must not run with --no-resume")
        });
        assert_eq!(start, 0);
    }

    #[test]
    fn missing_checkpoint_starts_from_zero() {
        assert_eq!(resume_start_batch(None, false, |_| true), 0);
    }
}

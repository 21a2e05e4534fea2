//! End-of-run summary of an allocation.

use crate::evaluation::{CapacityUsage, CapacityViolation};
use crate::ga::Allocation;
use crate::models::Dataset;
use std::fmt;

/// Number of leading student mappings kept in a summary.
pub const PREVIEW_LEN: usize = 10;

/// Counts, a short preview, and capacity violations of one allocation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllocationSummary {
    /// Students with a classroom.
    pub allocated: usize,
    /// Students left without a classroom.
    pub unallocated: usize,
    /// `(student id, classroom index)` for the first students.
    pub preview: Vec<(i64, Option<usize>)>,
    /// Classrooms holding more students than seats, in classroom order.
    pub violations: Vec<CapacityViolation>,
}

impl AllocationSummary {
    /// Summarizes `allocation` against `dataset`.
    ///
    /// Out-of-range genes count as allocated but occupy no seat.
    ///
    /// # Panics
    ///
    /// Panics unless there is exactly one gene per student.
    pub fn new(dataset: &Dataset, allocation: &Allocation) -> Self {
        assert_eq!(
            allocation.len(),
            dataset.n_students(),
            "allocation must hold one gene per student"
        );
        let allocated = allocation.assigned_count();
        let preview = dataset
            .students()
            .iter()
            .zip(allocation.genes())
            .take(PREVIEW_LEN)
            .map(|(s, &gene)| (s.id, gene))
            .collect();
        let violations = CapacityUsage::tally(dataset, allocation.genes()).violations(dataset);

        Self {
            allocated,
            unallocated: allocation.len() - allocated,
            preview,
            violations,
        }
    }

    /// Logs the summary at info level.
    pub fn log(&self) {
        for (student, gene) in &self.preview {
            tracing::info!(student, room = gene.map_or(-1, |r| r as i64), "allocation");
        }
        let total = self.allocated + self.unallocated;
        if total > self.preview.len() {
            tracing::info!("... and {} more", total - self.preview.len());
        }
        for v in &self.violations {
            tracing::warn!(
                room = v.room_id,
                capacity = v.capacity,
                used = v.used,
                "capacity violation"
            );
        }
        tracing::info!("{self}");
    }
}

impl fmt::Display for AllocationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "allocated: {} | unallocated: {} | capacity violations: {}",
            self.allocated,
            self.unallocated,
            self.violations.len()
        )
    }
}

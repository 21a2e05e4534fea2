//! Per-classroom seat counting.

use crate::ga::Gene;
use crate::models::Dataset;

/// Seats used per classroom by one allocation.
///
/// The evaluator keeps one of these as a scratch buffer: it is sized once
/// from the dataset and [`reset`](CapacityUsage::reset) at the start of
/// every evaluation, so no evaluation allocates.
///
/// # Examples
///
/// ```
/// use u_allocation::evaluation::CapacityUsage;
/// use u_allocation::models::{Classroom, Dataset, School};
///
/// let ds = Dataset::new(
///     vec![],
///     vec![School::new(1, 0.0, 0.0)],
///     vec![Classroom::new(10, 0, 1, 1)],
/// )
/// .unwrap();
///
/// let usage = CapacityUsage::tally(&ds, &[Some(0), Some(0), None]);
/// assert_eq!(usage.count(0), 2);
/// assert_eq!(usage.violations(&ds).len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct CapacityUsage {
    counts: Vec<u32>,
}

/// A classroom holding more students than it has seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapacityViolation {
    /// Index into the dataset's classrooms.
    pub room: usize,
    /// External classroom identifier.
    pub room_id: i64,
    /// Seats available.
    pub capacity: u32,
    /// Seats assigned.
    pub used: u32,
}

impl CapacityViolation {
    /// Students beyond capacity.
    pub fn excess(&self) -> u32 {
        self.used - self.capacity
    }
}

impl CapacityUsage {
    /// Creates a zeroed counter for `n_rooms` classrooms.
    pub fn new(n_rooms: usize) -> Self {
        Self {
            counts: vec![0; n_rooms],
        }
    }

    /// Counts the seats used by `genes`. Out-of-range genes are ignored.
    pub fn tally(dataset: &Dataset, genes: &[Gene]) -> Self {
        let mut usage = Self::new(dataset.n_rooms());
        for room in genes.iter().flatten() {
            if *room < usage.counts.len() {
                usage.add(*room);
            }
        }
        usage
    }

    /// Zeroes every counter.
    pub fn reset(&mut self) {
        self.counts.fill(0);
    }

    /// Records one more student in `room`.
    ///
    /// # Panics
    ///
    /// Panics if `room` is out of range.
    pub fn add(&mut self, room: usize) {
        self.counts[room] += 1;
    }

    /// Students counted in `room`.
    pub fn count(&self, room: usize) -> u32 {
        self.counts[room]
    }

    /// Total seats used beyond capacity, summed over all classrooms.
    pub fn overflow_units(&self, dataset: &Dataset) -> u64 {
        self.counts
            .iter()
            .zip(dataset.classrooms())
            .map(|(&used, room)| used.saturating_sub(room.capacity) as u64)
            .sum()
    }

    /// Every classroom over capacity, in classroom order.
    pub fn violations(&self, dataset: &Dataset) -> Vec<CapacityViolation> {
        self.counts
            .iter()
            .zip(dataset.classrooms())
            .enumerate()
            .filter(|(_, (used, room))| **used > room.capacity)
            .map(|(idx, (&used, room))| CapacityViolation {
                room: idx,
                room_id: room.id,
                capacity: room.capacity,
                used,
            })
            .collect()
    }
}

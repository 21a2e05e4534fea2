//! Classroom records.

/// A classroom offering one grade level with a fixed number of seats.
///
/// `school` is an index into [`Dataset::schools`](super::Dataset::schools),
/// not a school identifier. [`Dataset::new`](super::Dataset::new) rejects
/// classrooms whose index is out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Classroom {
    /// External classroom identifier.
    pub id: i64,
    /// Index of the owning school.
    pub school: usize,
    /// Grade level taught in this room.
    pub grade: i64,
    /// Number of seats.
    pub capacity: u32,
}

impl Classroom {
    /// Creates a classroom.
    pub fn new(id: i64, school: usize, grade: i64, capacity: u32) -> Self {
        Self {
            id,
            school,
            grade,
            capacity,
        }
    }

    /// Returns `true` if this room teaches the given grade.
    pub fn offers(&self, grade: i64) -> bool {
        self.grade == grade
    }
}

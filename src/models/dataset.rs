//! The validated problem instance.

use super::{Classroom, School, Student};
use std::collections::HashMap;

/// Error returned when the three collections do not form a consistent
/// problem instance.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatasetError {
    /// A classroom points at a school index that does not exist.
    #[error(
        "classroom {room_id} refers to school index {school_index}, which is invalid (max: {max_index})"
    )]
    UnknownSchool {
        /// Identifier of the offending classroom.
        room_id: i64,
        /// The school index it refers to.
        school_index: i64,
        /// Largest valid school index, or `-1` when there are no schools.
        max_index: i64,
    },
}

/// Students, schools and classrooms of one allocation problem.
///
/// Built once through [`Dataset::new`], which checks that every classroom
/// belongs to an existing school. After that the dataset is read-only and
/// shared by reference with the evaluator, the factory, and the reporters.
///
/// The constructor also indexes classrooms by grade so that drawing a
/// random grade-matching room is O(1).
///
/// # Examples
///
/// ```
/// use u_allocation::models::{Classroom, Dataset, School, Student};
///
/// let ds = Dataset::new(
///     vec![Student::new(1, 0.0, 0.0, 5)],
///     vec![School::new(10, 0.0, 0.0)],
///     vec![Classroom::new(100, 0, 5, 30)],
/// )
/// .unwrap();
/// assert_eq!(ds.rooms_offering(5), &[0]);
/// assert!(ds.rooms_offering(6).is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Dataset {
    students: Vec<Student>,
    schools: Vec<School>,
    classrooms: Vec<Classroom>,
    rooms_by_grade: HashMap<i64, Vec<usize>>,
}

impl Dataset {
    /// Validates and assembles a dataset.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::UnknownSchool`] for the first classroom whose
    /// school index is not in `0..schools.len()`.
    pub fn new(
        students: Vec<Student>,
        schools: Vec<School>,
        classrooms: Vec<Classroom>,
    ) -> Result<Self, DatasetError> {
        if let Some(room) = classrooms.iter().find(|r| r.school >= schools.len()) {
            return Err(DatasetError::UnknownSchool {
                room_id: room.id,
                school_index: room.school as i64,
                max_index: schools.len() as i64 - 1,
            });
        }

        let mut rooms_by_grade: HashMap<i64, Vec<usize>> = HashMap::new();
        for (idx, room) in classrooms.iter().enumerate() {
            rooms_by_grade.entry(room.grade).or_default().push(idx);
        }

        Ok(Self {
            students,
            schools,
            classrooms,
            rooms_by_grade,
        })
    }

    /// All students, in input order. Gene `i` belongs to student `i`.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// All schools, in input order.
    pub fn schools(&self) -> &[School] {
        &self.schools
    }

    /// All classrooms, in input order. Genes hold indices into this slice.
    pub fn classrooms(&self) -> &[Classroom] {
        &self.classrooms
    }

    /// Number of students (gene length).
    pub fn n_students(&self) -> usize {
        self.students.len()
    }

    /// Number of classrooms.
    pub fn n_rooms(&self) -> usize {
        self.classrooms.len()
    }

    /// The school that owns classroom `room`.
    ///
    /// # Panics
    ///
    /// Panics if `room` is out of range.
    pub fn school_of(&self, room: usize) -> &School {
        // Index validity is established in `new`.
        &self.schools[self.classrooms[room].school]
    }

    /// Indices of classrooms teaching `grade`, in input order.
    ///
    /// Empty if no classroom offers the grade.
    pub fn rooms_offering(&self, grade: i64) -> &[usize] {
        self.rooms_by_grade
            .get(&grade)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

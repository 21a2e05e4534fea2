//! Student records.

use crate::distance::GeoPoint;

/// A student to be placed in a classroom.
///
/// # Examples
///
/// ```
/// use u_allocation::models::Student;
///
/// let s = Student::new(7, -23.55, -46.63, 3);
/// assert_eq!(s.desired_grade, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Student {
    /// External student identifier.
    pub id: i64,
    /// Home location.
    pub location: GeoPoint,
    /// Grade level the student needs.
    pub desired_grade: i64,
}

impl Student {
    /// Creates a student at `(lat, lon)` wanting `desired_grade`.
    pub fn new(id: i64, lat: f64, lon: f64, desired_grade: i64) -> Self {
        Self {
            id,
            location: GeoPoint::new(lat, lon),
            desired_grade,
        }
    }
}

//! Problem data: students, schools, classrooms, and the validated
//! [`Dataset`] that owns them.
//!
//! All types here are immutable once the dataset is built. Every other
//! component receives the dataset by shared reference.

mod classroom;
mod dataset;
mod school;
mod student;

pub use classroom::Classroom;
pub use dataset::{Dataset, DatasetError};
pub use school::School;
pub use student::Student;

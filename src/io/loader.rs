//! Reading the three whitespace-delimited input files.
//!
//! Each file starts with a record count followed by that many records.
//! Tokens are split on any whitespace, so line breaks carry no meaning.
//!
//! | file       | record                                   |
//! |------------|------------------------------------------|
//! | students   | `student_id lat lon desired_grade_id`    |
//! | schools    | `school_id lat lon`                      |
//! | classrooms | `room_id school_index grade_id capacity` |

use crate::models::{Classroom, Dataset, DatasetError, School, Student};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::{FromStr, SplitWhitespace};
use tracing::instrument;

/// Error raised while loading a dataset.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The input ended before a record was complete.
    #[error("{file}: record {record}: missing `{field}`")]
    Missing {
        /// Name of the input.
        file: String,
        /// Record number (0 is the count header).
        record: usize,
        /// Field that was expected.
        field: &'static str,
    },

    /// A token could not be parsed as the expected type.
    #[error("{file}: record {record}: invalid `{field}` value {token:?}")]
    Invalid {
        /// Name of the input.
        file: String,
        /// Record number (0 is the count header).
        record: usize,
        /// Field being parsed.
        field: &'static str,
        /// The offending token.
        token: String,
    },

    /// The records do not form a consistent dataset.
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// Token cursor over one input.
struct Records<'a> {
    tokens: SplitWhitespace<'a>,
    file: &'a str,
    record: usize,
}

impl<'a> Records<'a> {
    fn new(text: &'a str, file: &'a str) -> Self {
        Self {
            tokens: text.split_whitespace(),
            file,
            record: 0,
        }
    }

    fn field<T: FromStr>(&mut self, field: &'static str) -> Result<T, LoadError> {
        let token = self.tokens.next().ok_or_else(|| LoadError::Missing {
            file: self.file.to_string(),
            record: self.record,
            field,
        })?;
        token.parse().map_err(|_| LoadError::Invalid {
            file: self.file.to_string(),
            record: self.record,
            field,
            token: token.to_string(),
        })
    }

    /// Reads the count header and then `count` records with `parse`.
    fn collect<T>(
        mut self,
        mut parse: impl FnMut(&mut Self) -> Result<T, LoadError>,
    ) -> Result<Vec<T>, LoadError> {
        let count: usize = self.field("count")?;
        let mut out = Vec::with_capacity(count);
        for record in 1..=count {
            self.record = record;
            out.push(parse(&mut self)?);
        }
        Ok(out)
    }
}

fn read_text<R: Read>(mut reader: R, file: &str) -> Result<String, LoadError> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|source| LoadError::Io {
            path: PathBuf::from(file),
            source,
        })?;
    Ok(text)
}

/// Parses a students file.
pub fn read_students<R: Read>(reader: R, file: &str) -> Result<Vec<Student>, LoadError> {
    let text = read_text(reader, file)?;
    Records::new(&text, file).collect(|r| {
        Ok(Student::new(
            r.field("student_id")?,
            r.field("lat")?,
            r.field("lon")?,
            r.field("desired_grade_id")?,
        ))
    })
}

/// Parses a schools file.
pub fn read_schools<R: Read>(reader: R, file: &str) -> Result<Vec<School>, LoadError> {
    let text = read_text(reader, file)?;
    Records::new(&text, file).collect(|r| {
        Ok(School::new(
            r.field("school_id")?,
            r.field("lat")?,
            r.field("lon")?,
        ))
    })
}

/// Parses a classrooms file.
///
/// A negative school index is reported as [`DatasetError::UnknownSchool`]
/// with `max_index = -1`, since the school list is not known here;
/// [`load_dataset`] fills in the real bound. Indices past the end of the
/// school list are caught by [`Dataset::new`].
pub fn read_classrooms<R: Read>(reader: R, file: &str) -> Result<Vec<Classroom>, LoadError> {
    let text = read_text(reader, file)?;
    Records::new(&text, file).collect(|r| {
        let id: i64 = r.field("room_id")?;
        let school: i64 = r.field("school_index")?;
        let grade: i64 = r.field("grade_id")?;
        let capacity: u32 = r.field("capacity")?;

        let school = usize::try_from(school).map_err(|_| DatasetError::UnknownSchool {
            room_id: id,
            school_index: school,
            max_index: -1,
        })?;
        Ok(Classroom::new(id, school, grade, capacity))
    })
}

fn open(path: &Path) -> Result<std::fs::File, LoadError> {
    std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads and validates a dataset from the three files.
///
/// # Errors
///
/// Any I/O or parse failure, or a classroom whose school index does not
/// exist.
#[instrument(level = "info", skip_all, fields(students = %students.display()))]
pub fn load_dataset(
    students: &Path,
    schools: &Path,
    classrooms: &Path,
) -> Result<Dataset, LoadError> {
    let student_list = read_students(open(students)?, &students.display().to_string())?;
    tracing::info!(count = student_list.len(), "loaded students");

    let school_list = read_schools(open(schools)?, &schools.display().to_string())?;
    tracing::info!(count = school_list.len(), "loaded schools");

    let max_index = school_list.len() as i64 - 1;
    let room_list = read_classrooms(open(classrooms)?, &classrooms.display().to_string())
        .map_err(|err| match err {
            LoadError::Dataset(DatasetError::UnknownSchool {
                room_id,
                school_index,
                ..
            }) => LoadError::Dataset(DatasetError::UnknownSchool {
                room_id,
                school_index,
                max_index,
            }),
            other => other,
        })?;
    tracing::info!(count = room_list.len(), "loaded classrooms");

    Ok(Dataset::new(student_list, school_list, room_list)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_students() {
        let text = "2\n1 -23.5 -46.6 3\n2 -23.6 -46.7 4\n";
        let students = read_students(text.as_bytes(), "alunos.txt").unwrap();
        assert_eq!(students.len(), 2);
        assert_eq!(students[0], Student::new(1, -23.5, -46.6, 3));
        assert_eq!(students[1].desired_grade, 4);
    }

    #[test]
    fn test_line_breaks_are_not_significant() {
        let text = "2 10 1.0 2.0\n\n  11\t3.0\n4.0";
        let schools = read_schools(text.as_bytes(), "escolas.txt").unwrap();
        assert_eq!(schools, vec![School::new(10, 1.0, 2.0), School::new(11, 3.0, 4.0)]);
    }

    #[test]
    fn test_extra_trailing_records_ignored() {
        let text = "1\n10 1.0 2.0\n11 3.0 4.0\n";
        let schools = read_schools(text.as_bytes(), "escolas.txt").unwrap();
        assert_eq!(schools.len(), 1);
    }

    #[test]
    fn test_read_classrooms() {
        let text = "2\n100 0 3 25\n101 1 4 30\n";
        let rooms = read_classrooms(text.as_bytes(), "salas.txt").unwrap();
        assert_eq!(rooms[1], Classroom::new(101, 1, 4, 30));
    }

    #[test]
    fn test_truncated_record() {
        let text = "2\n1 0.0 0.0 3\n2 0.0";
        let err = read_students(text.as_bytes(), "alunos.txt").unwrap_err();
        match err {
            LoadError::Missing { record, field, .. } => {
                assert_eq!(record, 2);
                assert_eq!(field, "desired_grade_id");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_invalid_token() {
        let text = "1\n1 north 0.0 3\n";
        let err = read_students(text.as_bytes(), "alunos.txt").unwrap_err();
        assert!(matches!(
            err,
            LoadError::Invalid { field: "lat", ref token, .. } if token == "north"
        ));
        assert!(err.to_string().contains("alunos.txt"));
    }

    #[test]
    fn test_missing_count() {
        let err = read_schools("".as_bytes(), "escolas.txt").unwrap_err();
        assert!(matches!(err, LoadError::Missing { record: 0, field: "count", .. }));
    }

    #[test]
    fn test_negative_school_index_is_fatal() {
        let text = "1\n55 -1 3 10\n";
        let err = read_classrooms(text.as_bytes(), "salas.txt").unwrap_err();
        assert!(matches!(
            err,
            LoadError::Dataset(DatasetError::UnknownSchool {
                room_id: 55,
                school_index: -1,
                ..
            })
        ));
    }

    #[test]
    fn test_missing_file() {
        let missing = Path::new("/definitely/not/here/alunos.txt");
        let err = load_dataset(missing, missing, missing).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("alunos.txt"));
    }
}

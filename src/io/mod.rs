//! Dataset loading and solution output.
//!
//! All readers and writers take any [`std::io::Read`] / [`std::io::Write`];
//! the path-based helpers wrap them with file handling and logging.

mod loader;
mod report;
mod summary;

pub use loader::{load_dataset, read_classrooms, read_schools, read_students, LoadError};
pub use report::{
    load_plain, parse_plain, save_detailed, save_plain, write_detailed, write_plain,
    ReportError, DETAILED_HEADER,
};
pub use summary::{AllocationSummary, PREVIEW_LEN};

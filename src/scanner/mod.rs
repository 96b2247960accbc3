//! Rule-based scanning for cleanup candidates.

mod engine;
mod options;
mod results;
mod sink;
mod size;

pub use engine::{
    Scanner, DEFAULT_LARGE_FILE_THRESHOLD, LARGE_FILES_CATEGORY, LARGE_FILE_DIRS,
};
pub use options::{parse_age, ScanOptions};
pub use results::ScanResults;
pub use sink::ResultSink;
pub use size::{parse_size, path_size};

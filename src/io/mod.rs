//! Input and output adapters around the kernel.

pub mod reader;
pub mod writer;
pub mod paths;

pub use reader::{parse_str, read_records, read_records_from_path, ParseError, ParsedInput, TagInterner};
pub use writer::{write_submission, write_submission_file, WriteError};
pub use paths::{submission_path, SUBMISSION_SUFFIX};

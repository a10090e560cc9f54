//! Output path derivation.

use std::path::{Path, PathBuf};

/// Suffix appended to the input's file stem.
pub const SUBMISSION_SUFFIX: &str = "_submission.txt";

/// Path of the submission for `input`.
///
/// `<dir>/<stem>_submission.txt`, where `dir` is `out_dir` if given and the
/// input's own directory otherwise.
pub fn submission_path(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "slideshow".to_string());
    let dir = match out_dir {
        Some(dir) => dir.to_path_buf(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    dir.join(format!("{stem}{SUBMISSION_SUFFIX}"))
}

//! Submission writer.
//!
//! Format:
//! ```text
//! <slide count>
//! <record index> [<record index>]   (one line per slide)
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::store::Catalog;
use crate::types::{EntryId, Slideshow};

/// Error type for writing a submission.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// Output file could not be created.
    #[error("Cannot create output file {path}: {source}")]
    Create {
        /// File that failed.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Writing to the output failed.
    #[error("I/O error writing output: {0}")]
    Io(#[from] std::io::Error),
    /// The slideshow names an entry the catalog does not hold.
    #[error("Slide {0} is not in the catalog")]
    UnknownEntry(EntryId),
}

/// Write the slideshow as record indices.
pub fn write_submission<W: Write>(
    mut out: W,
    catalog: &Catalog,
    slideshow: &Slideshow,
) -> Result<(), WriteError> {
    writeln!(out, "{}", slideshow.len())?;
    for id in slideshow.iter() {
        let entry = catalog.get(id).ok_or(WriteError::UnknownEntry(id))?;
        let line = entry
            .source_indices()
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}

/// Write the slideshow to `path`, replacing any existing file.
pub fn write_submission_file(
    path: &Path,
    catalog: &Catalog,
    slideshow: &Slideshow,
) -> Result<(), WriteError> {
    let file = File::create(path).map_err(|source| WriteError::Create {
        path: path.display().to_string(),
        source,
    })?;
    write_submission(BufWriter::new(file), catalog, slideshow)
}

//! Input reader for photo collections.
//!
//! Format:
//! ```text
//! <N>
//! <H|V> <k> <tag_1> ... <tag_k>     (N lines)
//! ```
//! Tag labels are case-sensitive and interned to dense [`TagId`]s in
//! first-seen order. Blank lines are ignored.

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::types::{Orientation, RawRecord, TagId};

/// Most records reserved up front from the header count.
const PREALLOCATE_LIMIT: usize = 1 << 16;

/// Error type for input parsing. Every variant aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Input could not be read.
    #[error("I/O error reading input: {0}")]
    Io(#[from] std::io::Error),
    /// Input had no record-count line.
    #[error("Missing record count header")]
    MissingHeader,
    /// A count field is not a non-negative integer.
    #[error("Line {line}: invalid integer '{value}'")]
    InvalidInteger {
        /// 1-based line number.
        line: usize,
        /// Offending token.
        value: String,
    },
    /// Orientation code is neither `H` nor `V`.
    #[error("Line {line}: unknown orientation '{found}' (expected H or V)")]
    UnknownOrientation {
        /// 1-based line number.
        line: usize,
        /// Offending token.
        found: String,
    },
    /// A record line is missing its tag count.
    #[error("Line {line}: missing tag count")]
    MissingTagCount {
        /// 1-based line number.
        line: usize,
    },
    /// Number of tag tokens differs from the declared count.
    #[error("Line {line}: declared {expected} tags, found {found}")]
    TagCountMismatch {
        /// 1-based line number.
        line: usize,
        /// Declared count.
        expected: usize,
        /// Tokens present.
        found: usize,
    },
    /// Number of record lines differs from the header.
    #[error("Header declares {expected} records, found {found}")]
    RecordCountMismatch {
        /// Declared count.
        expected: usize,
        /// Record lines present.
        found: usize,
    },
}

/// Maps tag labels to dense ids, first seen first.
///
/// Scoped to one run; ids are meaningless across runs.
#[derive(Debug, Clone, Default)]
pub struct TagInterner {
    ids: HashMap<String, TagId>,
}

impl TagInterner {
    /// Create an empty interner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for `label`, allocating the next id on first sight.
    pub fn intern(&mut self, label: &str) -> TagId {
        if let Some(&id) = self.ids.get(label) {
            return id;
        }
        let id = TagId::new(self.ids.len() as u32);
        self.ids.insert(label.to_string(), id);
        id
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no label has been interned.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Records and the tag dictionary read from one input.
#[derive(Debug, Clone, Default)]
pub struct ParsedInput {
    /// Records in input order; `index` is the position among records.
    pub records: Vec<RawRecord>,
    /// Label dictionary built while reading.
    pub interner: TagInterner,
}

/// Read a photo collection from any buffered reader.
pub fn read_records<R: BufRead>(reader: R) -> Result<ParsedInput, ParseError> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(i, line)| line.map(|text| (i + 1, text)));

    let expected = loop {
        match lines.next() {
            None => return Err(ParseError::MissingHeader),
            Some(line) => {
                let (number, text) = line?;
                let text = text.trim();
                if !text.is_empty() {
                    break parse_count(text, number)?;
                }
            }
        }
    };

    // The header is untrusted until the record lines back it up.
    let mut parsed = ParsedInput {
        records: Vec::with_capacity(expected.min(PREALLOCATE_LIMIT)),
        interner: TagInterner::new(),
    };
    let mut found = 0;
    for line in lines {
        let (number, text) = line?;
        if text.trim().is_empty() {
            continue;
        }
        found += 1;
        if found > expected {
            continue;
        }
        let record = parse_record(&text, number, found - 1, &mut parsed.interner)?;
        parsed.records.push(record);
    }

    if found != expected {
        return Err(ParseError::RecordCountMismatch { expected, found });
    }
    Ok(parsed)
}

/// Read a photo collection from a file.
pub fn read_records_from_path(path: &Path) -> Result<ParsedInput, ParseError> {
    let file = File::open(path)?;
    read_records(BufReader::new(file))
}

/// Read a photo collection from an in-memory string.
pub fn parse_str(input: &str) -> Result<ParsedInput, ParseError> {
    read_records(input.as_bytes())
}

fn parse_count(token: &str, line: usize) -> Result<usize, ParseError> {
    token.parse().map_err(|_| ParseError::InvalidInteger {
        line,
        value: token.to_string(),
    })
}

fn parse_record(
    text: &str,
    line: usize,
    index: usize,
    interner: &mut TagInterner,
) -> Result<RawRecord, ParseError> {
    let mut tokens = text.split_whitespace();

    let code = tokens.next().unwrap_or_default();
    let orientation = Orientation::from_code(code).ok_or_else(|| ParseError::UnknownOrientation {
        line,
        found: code.to_string(),
    })?;

    let declared = match tokens.next() {
        Some(token) => parse_count(token, line)?,
        None => return Err(ParseError::MissingTagCount { line }),
    };

    let labels: Vec<&str> = tokens.collect();
    if labels.len() != declared {
        return Err(ParseError::TagCountMismatch {
            line,
            expected: declared,
            found: labels.len(),
        });
    }

    let tags: BTreeSet<TagId> = labels.iter().map(|label| interner.intern(label)).collect();
    Ok(RawRecord::new(orientation, tags, index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_records_and_interns_tags() {
        let parsed = parse_str("3\nH 2 a b\nV 1 b\nV 2 c a\n").unwrap();

        assert_eq!(parsed.records.len(), 3);
        assert_eq!(parsed.interner.len(), 3);
        // a=0, b=1, c=2 in first-seen order
        assert_eq!(parsed.records[1].tags, [TagId::new(1)].into_iter().collect());

        let third = &parsed.records[2];
        assert_eq!(third.orientation, Orientation::Vertical);
        assert_eq!(third.index, 2);
        assert_eq!(third.tags, [TagId::new(0), TagId::new(2)].into_iter().collect());
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        let parsed = parse_str("1\nH 2 Cat cat\n").unwrap();
        assert_eq!(parsed.records[0].tags.len(), 2);
    }

    #[test]
    fn test_duplicate_tags_collapse() {
        let parsed = parse_str("1\nH 3 x x y\n").unwrap();
        assert_eq!(parsed.records[0].tags.len(), 2);
    }

    #[test]
    fn test_blank_lines_ignored() {
        let parsed = parse_str("\n2\nH 1 a\n\nH 1 b\n\n").unwrap();
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[1].index, 1);
    }

    #[test]
    fn test_zero_tag_record() {
        let parsed = parse_str("1\nH 0\n").unwrap();
        assert!(parsed.records[0].tags.is_empty());
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(parse_str(""), Err(ParseError::MissingHeader)));
        assert!(matches!(parse_str("\n\n"), Err(ParseError::MissingHeader)));
    }

    #[test]
    fn test_invalid_header() {
        let err = parse_str("three\nH 1 a\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidInteger { line: 1, .. }));
    }

    #[test]
    fn test_unknown_orientation() {
        let err = parse_str("1\nX 1 a\n").unwrap_err();
        assert!(matches!(err, ParseError::UnknownOrientation { line: 2, ref found } if found == "X"));
    }

    #[test]
    fn test_tag_count_mismatch() {
        let err = parse_str("1\nH 3 a b\n").unwrap_err();
        assert!(matches!(err, ParseError::TagCountMismatch { line: 2, expected: 3, found: 2 }));
    }

    #[test]
    fn test_missing_and_bad_tag_count() {
        assert!(matches!(parse_str("1\nH\n"), Err(ParseError::MissingTagCount { line: 2 })));
        assert!(matches!(parse_str("1\nH -1 a\n"), Err(ParseError::InvalidInteger { line: 2, .. })));
    }

    #[test]
    fn test_record_count_mismatch() {
        assert!(matches!(
            parse_str("3\nH 1 a\nH 1 b\n"),
            Err(ParseError::RecordCountMismatch { expected: 3, found: 2 })
        ));
        assert!(matches!(
            parse_str("1\nH 1 a\nH 1 b\n"),
            Err(ParseError::RecordCountMismatch { expected: 1, found: 2 })
        ));
    }

    #[test]
    fn test_oversized_header_is_rejected_not_allocated() {
        assert!(matches!(
            parse_str("18446744073709551615\nH 1 a\n"),
            Err(ParseError::RecordCountMismatch { found: 1, .. })
        ));
        assert!(matches!(
            parse_str("1000000000000\nH 1 a\nV 1 b\n"),
            Err(ParseError::RecordCountMismatch { found: 2, .. })
        ));
    }
}

// ============================================================
// Layer 4 — Manifest Parser
// ============================================================
// Reads AudioSet segment manifests. A row looks like:
//
//   # YTID, start_seconds, end_seconds, positive_labels
//   --PJHxphWEs, 30.000, 40.000, "/m/09x0r,/t/dd00088"
//
// The file is split on single spaces, so the first three fields
// keep a trailing comma (stripped here) and the quoted label
// field arrives as one comma-separated list. Lines starting
// with '#' are comments.
//
// Two readers are provided:
//   read_records    — strict, exactly 4 fields per row; used by
//                     the corpus loader which needs id + start
//                     to locate audio files.
//   read_label_sets — loose, any number of fields, the LAST one
//                     is the label list; used by the split
//                     command which only needs labels.
//
// Reference: csv crate documentation (ReaderBuilder)

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use thiserror::Error;

/// Number of fields in a strict manifest row.
pub const FIELDS_PER_RECORD: usize = 4;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("cannot open manifest '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed manifest: {0}")]
    Csv(#[from] csv::Error),

    #[error("manifest line {line}: expected 4 fields, found {found}")]
    FieldCount { line: u64, found: usize },
}

/// One strict manifest row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRecord {
    /// Clip identifier (YouTube id for AudioSet)
    pub id: String,
    /// Segment start offset, kept verbatim since it is part of the filename
    pub start: String,
    pub end: String,
    pub labels: Vec<String>,
}

impl ManifestRecord {
    /// Base filename of the clip, without the `.wav` / `.wav.gz` suffix.
    pub fn file_stem(&self) -> String {
        format!("{}_{}", self.id, self.start)
    }
}

/// Read a strict manifest from disk.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<ManifestRecord>, ManifestError> {
    parse_records(open(path.as_ref())?)
}

/// Parse a strict manifest: every row must have exactly four fields.
pub fn parse_records<R: Read>(reader: R) -> Result<Vec<ManifestRecord>, ManifestError> {
    let mut csv = builder().flexible(true).from_reader(reader);
    let mut records = Vec::new();

    for row in csv.records() {
        let row = row?;
        if row.len() != FIELDS_PER_RECORD {
            return Err(ManifestError::FieldCount {
                line: line_of(&row),
                found: row.len(),
            });
        }
        records.push(ManifestRecord {
            id: strip_field(&row[0]),
            start: strip_field(&row[1]),
            end: strip_field(&row[2]),
            labels: split_labels(&row[3]),
        });
    }

    Ok(records)
}

/// Read only the label lists from a manifest on disk.
pub fn read_label_sets(path: impl AsRef<Path>) -> Result<Vec<Vec<String>>, ManifestError> {
    parse_label_sets(open(path.as_ref())?)
}

/// Parse a manifest keeping just the last field of every row.
pub fn parse_label_sets<R: Read>(reader: R) -> Result<Vec<Vec<String>>, ManifestError> {
    let mut csv = builder().flexible(true).from_reader(reader);
    let mut sets = Vec::new();

    for row in csv.records() {
        let row = row?;
        if let Some(last) = row.iter().last() {
            sets.push(split_labels(last));
        }
    }

    Ok(sets)
}

fn open(path: &Path) -> Result<File, ManifestError> {
    File::open(path).map_err(|source| ManifestError::Open {
        path: path.to_path_buf(),
        source,
    })
}

fn builder() -> ReaderBuilder {
    let mut b = ReaderBuilder::new();
    b.delimiter(b' ').comment(Some(b'#')).has_headers(false);
    b
}

fn line_of(row: &StringRecord) -> u64 {
    row.position().map(|p| p.line()).unwrap_or(0)
}

fn strip_field(field: &str) -> String {
    field.trim().trim_end_matches(',').to_string()
}

fn split_labels(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

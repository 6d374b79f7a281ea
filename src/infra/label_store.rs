// ============================================================
// Layer 6 — Label List Files
// ============================================================
// The split command writes two plain-text files, one label per
// line, with a trailing newline:
//
//   train.txt        eval.txt
//   /m/09x0r         /m/012xff
//   /t/dd00088       ...
//
// Reading tolerates blank lines and stray whitespace so files
// edited by hand still load.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Write one label per line.
pub fn write_labels<S: AsRef<str>>(path: impl AsRef<Path>, labels: &[S]) -> Result<()> {
    let path = path.as_ref();
    let mut data = String::new();
    for label in labels {
        data.push_str(label.as_ref());
        data.push('\n');
    }
    fs::write(path, data).with_context(|| format!("Cannot write labels to '{}'", path.display()))?;
    tracing::debug!("Wrote {} labels to '{}'", labels.len(), path.display());
    Ok(())
}

/// Read a label list written by `write_labels`.
pub fn read_labels(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .with_context(|| format!("Cannot read labels from '{}'", path.display()))?;
    Ok(parse_labels(&data))
}

fn parse_labels(data: &str) -> Vec<String> {
    data.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

// ============================================================
// Layer 3 — Sample Domain Type
// ============================================================
// Meta-data about one audio clip: where it lives on disk and
// which classes it was tagged with. The PCM data itself is
// never stored here; it is decoded on demand by a
// WaveformSource (see traits.rs).
//
// AudioSet clips are multi-label, so `labels` is a list.
// It may be empty if the manifest row carried no labels;
// such samples are tolerated everywhere and simply never
// land on either side of a split.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// An audio sample and its class labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// Path to a `.wav` or `.wav.gz` file
    pub path: PathBuf,

    /// Class labels attached to this clip, in manifest order
    pub labels: Vec<String>,
}

impl Sample {
    /// Create a new Sample from a path and its labels.
    pub fn new(path: impl Into<PathBuf>, labels: Vec<String>) -> Self {
        Self {
            path: path.into(),
            labels,
        }
    }

    /// A sample with no labels, used when only the audio matters
    /// (e.g. the decode diagnostics).
    pub fn unlabeled(path: impl Into<PathBuf>) -> Self {
        Self::new(path, Vec::new())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// True if the file is gzip-compressed (`.gz` extension).
    pub fn is_compressed(&self) -> bool {
        self.path.extension().and_then(|e| e.to_str()) == Some("gz")
    }
}

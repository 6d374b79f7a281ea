// ============================================================
// Layer 4 — Corpus Loader
// ============================================================
// Matches manifest rows with audio files in a directory.
//
// For a row with id `abc` and start `30.000` we look for:
//   1. <dir>/abc_30.000.wav.gz
//   2. <dir>/abc_30.000.wav
// and skip the row if neither exists. AudioSet downloads are
// usually incomplete (videos get taken down), so missing files
// are expected and only logged at debug level.
//
// A missing manifest or a malformed row, on the other hand,
// fails the whole load: there is no partial-corpus recovery.
//
// Reference: Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::data::manifest::{self, ManifestRecord};
use crate::domain::corpus::Corpus;
use crate::domain::sample::Sample;
use crate::domain::traits::CorpusSource;

/// Suffixes tried in order when resolving a record to a file.
pub const AUDIO_SUFFIXES: [&str; 2] = [".wav.gz", ".wav"];

/// Loads a Corpus from an audio directory plus a segment manifest.
/// Implements the CorpusSource trait from Layer 3.
pub struct CorpusLoader {
    /// Directory holding the downloaded clips
    dir: PathBuf,

    /// Path to the segment manifest (CSV)
    manifest: PathBuf,
}

impl CorpusLoader {
    pub fn new(dir: impl Into<PathBuf>, manifest: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            manifest: manifest.into(),
        }
    }

    /// Find the audio file for a record, if any was downloaded.
    fn resolve(&self, record: &ManifestRecord) -> Option<PathBuf> {
        let stem = record.file_stem();
        AUDIO_SUFFIXES
            .iter()
            .map(|suffix| self.dir.join(format!("{stem}{suffix}")))
            .find(|path| path.is_file())
    }
}

impl CorpusSource for CorpusLoader {
    fn load(&self) -> Result<Corpus> {
        let records = manifest::read_records(&self.manifest)
            .with_context(|| format!("read {}", self.manifest.display()))?;

        let mut samples = Vec::with_capacity(records.len());
        let mut missing = 0usize;

        for record in records {
            match self.resolve(&record) {
                Some(path) => samples.push(Sample::new(path, record.labels)),
                None => {
                    missing += 1;
                    tracing::debug!("No audio for '{}', skipping", record.file_stem());
                }
            }
        }

        tracing::info!(
            "Loaded {} samples from '{}' ({} manifest rows without audio)",
            samples.len(),
            self.dir.display(),
            missing
        );
        Ok(Corpus::new(samples))
    }
}

/// True if a file name looks like a clip this crate can read.
pub fn is_audio_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|name| AUDIO_SUFFIXES.iter().any(|s| name.ends_with(s)))
        .unwrap_or(false)
}

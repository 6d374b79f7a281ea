// ============================================================
// Layer 2 — Diagnostic Use Cases
// ============================================================
// Two passes over a directory of downloaded clips:
//
//   FindBadUseCase   — reports every file that fails to decode
//   PcmStatsUseCase  — running mean / variance of all amplitudes
//
// Unlike the episode pipeline, a decode failure here is NOT
// fatal: the file is reported (or logged) and the scan moves on.
// Results are streamed through callbacks so the CLI layer owns
// all printing.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::data::loader::is_audio_file;
use crate::domain::sample::Sample;
use crate::domain::traits::WaveformSource;
use crate::infra::stats::RollingStats;

/// Every `.wav` / `.wav.gz` file directly inside `dir`, sorted by name.
pub fn list_audio_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Cannot read directory '{}'", dir.display()))? {
        let path = entry?.path();
        if path.is_file() && is_audio_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    tracing::debug!("Found {} audio files in '{}'", files.len(), dir.display());
    Ok(files)
}

// ─── FindBadUseCase ──────────────────────────────────────────────────────────
pub struct FindBadUseCase<'s, W: WaveformSource + ?Sized> {
    dir: PathBuf,
    source: &'s W,
}

impl<'s, W: WaveformSource + ?Sized> FindBadUseCase<'s, W> {
    pub fn new(dir: impl Into<PathBuf>, source: &'s W) -> Self {
        Self {
            dir: dir.into(),
            source,
        }
    }

    /// Decode every file, calling `on_bad` for each failure.
    /// Returns the number of files that failed.
    pub fn execute(&self, mut on_bad: impl FnMut(&Path)) -> Result<usize> {
        let files = list_audio_files(&self.dir)?;
        let mut bad = 0;
        for path in &files {
            if let Err(e) = self.source.read(&Sample::unlabeled(path)) {
                tracing::debug!("{:#}", e);
                bad += 1;
                on_bad(path);
            }
        }
        tracing::info!("Checked {} files, {} failed to decode", files.len(), bad);
        Ok(bad)
    }
}

// ─── PcmStatsUseCase ─────────────────────────────────────────────────────────
pub struct PcmStatsUseCase<'s, W: WaveformSource + ?Sized> {
    dir: PathBuf,
    source: &'s W,
}

impl<'s, W: WaveformSource + ?Sized> PcmStatsUseCase<'s, W> {
    pub fn new(dir: impl Into<PathBuf>, source: &'s W) -> Self {
        Self {
            dir: dir.into(),
            source,
        }
    }

    /// Accumulate statistics over every decodable file, calling
    /// `on_progress` after each one. Undecodable files are skipped.
    pub fn execute(&self, mut on_progress: impl FnMut(&RollingStats)) -> Result<RollingStats> {
        let mut stats = RollingStats::new();
        for path in list_audio_files(&self.dir)? {
            match self.source.read(&Sample::unlabeled(&path)) {
                Ok(data) => {
                    stats.extend(&data);
                    on_progress(&stats);
                }
                Err(e) => tracing::warn!("{:#}", e),
            }
        }
        Ok(stats)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::reader::PcmReader;
    use hound::{SampleFormat, WavSpec, WavWriter};

    fn write_mono(path: &Path, values: &[i16]) {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 16000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut w = WavWriter::create(path, spec).unwrap();
        for &v in values {
            w.write_sample(v).unwrap();
        }
        w.finalize().unwrap();
    }

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        write_mono(&dir.path().join("a_0.000.wav"), &[16384, -16384, 16384, -16384]);
        write_mono(&dir.path().join("b_0.000.wav"), &[0, 0, 0, 0]);
        fs::write(dir.path().join("c_0.000.wav"), b"garbage").unwrap();
        fs::write(dir.path().join("d_0.000.wav.gz"), b"garbage").unwrap();
        fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();
        dir
    }

    #[test]
    fn test_list_audio_files_is_sorted_and_filtered() {
        let dir = fixture();
        let names: Vec<String> = list_audio_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a_0.000.wav", "b_0.000.wav", "c_0.000.wav", "d_0.000.wav.gz"]);
    }

    #[test]
    fn test_find_bad_reports_and_continues() {
        let dir = fixture();
        let reader = PcmReader::new();
        let mut reported = Vec::new();

        let bad = FindBadUseCase::new(dir.path(), &reader)
            .execute(|p| reported.push(p.to_path_buf()))
            .unwrap();

        assert_eq!(bad, 2);
        assert_eq!(
            reported,
            vec![dir.path().join("c_0.000.wav"), dir.path().join("d_0.000.wav.gz")]
        );
    }

    #[test]
    fn test_pcm_stats_skips_bad_files() {
        let dir = fixture();
        let reader = PcmReader::new();
        let mut updates = 0;

        let stats = PcmStatsUseCase::new(dir.path(), &reader)
            .execute(|_| updates += 1)
            .unwrap();

        assert_eq!(updates, 2);
        assert_eq!(stats.count, 8);
        // four samples at ±0.5 and four at 0 → E[x²] = 0.125, mean 0
        assert!((stats.variance() - 0.125).abs() < 1e-9);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let reader = PcmReader::new();
        assert!(FindBadUseCase::new("/no/such/dir", &reader).execute(|_| {}).is_err());
    }
}

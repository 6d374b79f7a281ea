// ============================================================
// Layer 4 — Sample Reader
// ============================================================
// Decodes one clip into a mono PCM stream.
//
// Steps:
//   1. Open the file; wrap it in a gzip decoder if the name
//      ends in `.gz`
//   2. Parse the WAV container with hound
//   3. Normalise integer PCM to [-1, 1] (float PCM is kept)
//   4. Average the interleaved channels into one
//
// Step 4 fails if the sample count isn't a multiple of the
// channel count, which happens with truncated downloads.
//
// Reference: hound crate documentation (WavReader)
//            flate2 crate documentation (GzDecoder)

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use hound::{SampleFormat, WavSpec};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;

use crate::domain::sample::Sample;
use crate::domain::traits::WaveformSource;

/// Reasons a clip can fail to decode.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("bad WAV data: {0}")]
    Wav(#[from] hound::Error),

    #[error("unsupported PCM format: {bits}-bit integer")]
    UnsupportedBits { bits: u16 },

    #[error("bad sample count: {samples} samples over {channels} channels")]
    BadSampleCount { samples: usize, channels: u16 },
}

/// Reads WAV and WAV.GZ clips from disk.
/// Implements the WaveformSource trait from Layer 3.
#[derive(Debug, Clone, Copy, Default)]
pub struct PcmReader;

impl PcmReader {
    pub fn new() -> Self {
        Self
    }
}

impl WaveformSource for PcmReader {
    fn read(&self, sample: &Sample) -> Result<Vec<f64>> {
        read_file(sample.path()).with_context(|| format!("read {}", sample.path().display()))
    }
}

/// Decode the file at `path`, gunzipping first if it ends in `.gz`.
pub fn read_file(path: &Path) -> Result<Vec<f64>, DecodeError> {
    let file = BufReader::new(File::open(path)?);
    if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        read_and_mix(GzDecoder::new(file))
    } else {
        read_and_mix(file)
    }
}

/// Decode a WAV stream and mix it down to mono.
pub fn read_and_mix<R: Read>(reader: R) -> Result<Vec<f64>, DecodeError> {
    let wav = hound::WavReader::new(reader)?;
    let spec = wav.spec();
    let interleaved = decode_samples(wav, spec)?;
    mix_down(&interleaved, spec.channels)
}

fn decode_samples<R: Read>(wav: hound::WavReader<R>, spec: WavSpec) -> Result<Vec<f64>, DecodeError> {
    match spec.sample_format {
        SampleFormat::Float => {
            let samples = wav
                .into_samples::<f32>()
                .map(|s| s.map(f64::from))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(samples)
        }
        SampleFormat::Int => {
            let bits = spec.bits_per_sample;
            if bits == 0 || bits > 32 {
                return Err(DecodeError::UnsupportedBits { bits });
            }
            let scale = 1.0 / (1u64 << (bits - 1)) as f64;
            let samples = wav
                .into_samples::<i32>()
                .map(|s| s.map(|x| x as f64 * scale))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(samples)
        }
    }
}

/// Average interleaved frames into a single channel.
pub fn mix_down(interleaved: &[f64], channels: u16) -> Result<Vec<f64>, DecodeError> {
    let n = channels as usize;
    if n == 0 || interleaved.len() % n != 0 {
        return Err(DecodeError::BadSampleCount {
            samples: interleaved.len(),
            channels,
        });
    }
    if n == 1 {
        return Ok(interleaved.to_vec());
    }
    let div = 1.0 / n as f64;
    Ok(interleaved
        .chunks_exact(n)
        .map(|frame| frame.iter().sum::<f64>() * div)
        .collect())
}

// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the manifest on disk and the numeric
// sequences handed to a learner.
//
//   manifest CSV
//       │
//       ▼
//   manifest / CorpusLoader → Corpus of labelled clips
//       │
//       ▼
//   splitter                → training / evaluation classes
//       │
//       ▼
//   Corpus::split           → training corpus, evaluation corpus
//       │
//       ▼
//   EpisodeSampler          → one episode per step
//       │
//       ▼
//   EpisodeBatcher          → PcmReader + Augmenter + chunking
//
// Each module is responsible for exactly one step.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Parses AudioSet segment manifests
pub mod manifest;

/// Resolves manifest rows to audio files on disk
pub mod loader;

/// Decodes WAV / WAV.GZ clips into mono PCM
pub mod reader;

/// Searches for a label split that drops the fewest samples
pub mod splitter;

/// Draws meta-learning episodes from a corpus
pub mod episode;

/// Random time-stretch and noise augmentation
pub mod augment;

/// Turns episodes into chunked inputs and one-hot labels
pub mod batcher;

// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The sampler and batcher only need two things from the outside
// world: a way to get a Corpus, and a way to turn one Sample into
// PCM data. Both are traits so the pipeline can be driven from
// in-memory fixtures in tests.
//
// Implementations:
//   - CorpusLoader  (data/loader.rs) implements CorpusSource
//   - PcmReader     (data/reader.rs) implements WaveformSource
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::corpus::Corpus;
use crate::domain::sample::Sample;

// ─── CorpusSource ─────────────────────────────────────────────────────────────
/// Any component that can produce a labelled Corpus.
pub trait CorpusSource {
    /// Load every available sample.
    fn load(&self) -> Result<Corpus>;
}

// ─── WaveformSource ───────────────────────────────────────────────────────────
/// Any component that can decode a sample into a mono PCM stream.
pub trait WaveformSource {
    /// Decode `sample` into one value per time step, in [-1, 1].
    fn read(&self, sample: &Sample) -> Result<Vec<f64>>;
}

// ============================================================
// Layer 4 — Episode Batcher
// ============================================================
// Turns a sampled Episode into plain numeric sequences a
// sequence learner can consume.
//
// For every step of the episode:
//   input  — the clip's PCM data (optionally augmented), cut
//            into time steps of `chunk_size` samples; the last
//            time step is zero-padded
//   label  — a one-hot vector of width `num_classes`
//
// Sequence meta-learners see the label of step t-1 together
// with the input of step t, so `prev_labels` shifts the label
// sequence right by one with a zero vector in front.
//
// Decoding is all-or-nothing: one unreadable clip fails the
// whole batch. There is no skip-and-continue here.

use anyhow::{Context, Result};
use rand::Rng;

use crate::data::augment::Augmenter;
use crate::data::episode::Episode;
use crate::domain::traits::WaveformSource;

// ─── EpisodeBatch ─────────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeBatch {
    /// inputs[step][t] is a chunk of `chunk_size` samples
    pub inputs: Vec<Vec<Vec<f64>>>,

    /// labels[step] is one-hot, width `num_classes`
    pub labels: Vec<Vec<f64>>,

    pub num_classes: usize,
    pub chunk_size: usize,
}

impl EpisodeBatch {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label sequence delayed by one step (zero vector first).
    pub fn prev_labels(&self) -> Vec<Vec<f64>> {
        let mut prev = Vec::with_capacity(self.labels.len());
        if !self.labels.is_empty() {
            prev.push(vec![0.0; self.num_classes]);
            prev.extend(self.labels[..self.labels.len() - 1].iter().cloned());
        }
        prev
    }

    /// Total number of time steps across all inputs.
    pub fn total_time_steps(&self) -> usize {
        self.inputs.iter().map(Vec::len).sum()
    }
}

// ─── EpisodeBatcher ───────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct EpisodeBatcher {
    num_classes: usize,
    chunk_size: usize,
    augmenter: Option<Augmenter>,
}

impl EpisodeBatcher {
    /// `num_classes` sets the one-hot width; use the class count
    /// that was requested from the sampler.
    pub fn new(num_classes: usize, chunk_size: usize) -> Self {
        Self {
            num_classes,
            chunk_size,
            augmenter: None,
        }
    }

    pub fn with_augmentation(mut self, augmenter: Augmenter) -> Self {
        self.augmenter = Some(augmenter);
        self
    }

    /// Read every clip of the episode and build the batch.
    pub fn batch<W, R>(&self, episode: &Episode<'_>, source: &W, rng: &mut R) -> Result<EpisodeBatch>
    where
        W: WaveformSource + ?Sized,
        R: Rng + ?Sized,
    {
        let mut inputs = Vec::with_capacity(episode.len());
        let mut labels = Vec::with_capacity(episode.len());

        for step in &episode.steps {
            let pcm = source.read(step.sample).context("fetch samples")?;
            let pcm = match &self.augmenter {
                Some(aug) => aug.apply(&pcm, rng),
                None => pcm,
            };
            inputs.push(chunk(&pcm, self.chunk_size));
            labels.push(one_hot(step.label, self.num_classes));
        }

        tracing::debug!(
            "Batched episode: {} steps, {} time steps",
            labels.len(),
            inputs.iter().map(Vec::len).sum::<usize>()
        );

        Ok(EpisodeBatch {
            inputs,
            labels,
            num_classes: self.num_classes,
            chunk_size: self.chunk_size,
        })
    }
}

/// Split `pcm` into `chunk_size`-sample time steps, zero-padding
/// the last one. A zero chunk size yields no time steps.
pub fn chunk(pcm: &[f64], chunk_size: usize) -> Vec<Vec<f64>> {
    if chunk_size == 0 {
        return Vec::new();
    }
    pcm.chunks(chunk_size)
        .map(|c| {
            let mut step = c.to_vec();
            step.resize(chunk_size, 0.0);
            step
        })
        .collect()
}

/// One-hot vector of length `width`. Labels outside the range
/// give an all-zero vector.
pub fn one_hot(label: usize, width: usize) -> Vec<f64> {
    let mut v = vec![0.0; width];
    if let Some(slot) = v.get_mut(label) {
        *slot = 1.0;
    }
    v
}

// ============================================================
// Layer 2 — EpisodeUseCase
// ============================================================
// Draws meta-learning episodes from one side of a class split.
//
//   Step 1: Load the corpus                    (Layer 4 - data)
//   Step 2: Read the evaluation label list     (Layer 6 - infra)
//   Step 3: Split the corpus, keep one side    (Layer 3 - domain)
//   Step 4: Sample `count` episodes            (Layer 4 - data)
//   Step 5: Optionally fetch + batch the audio (Layer 4 - data)
//   Step 6: Optionally write a JSON listing    (this file)
//
// Step 5 is what a trainer does once per step; running it here
// checks that every clip an episode touches actually decodes.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::application::make_rng;
use crate::data::augment::Augmenter;
use crate::data::batcher::EpisodeBatcher;
use crate::data::episode::{Episode, EpisodeSampler};
use crate::data::loader::CorpusLoader;
use crate::data::reader::PcmReader;
use crate::domain::corpus::Corpus;
use crate::domain::partition::Side;
use crate::domain::traits::{CorpusSource, WaveformSource};
use crate::infra::label_store::read_labels;

// ─── Episode Configuration ───────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeConfig {
    pub audio_dir: String,
    pub manifest: String,
    /// Label list produced by `split` (the evaluation side)
    pub eval_labels: String,
    /// Which side of the split to draw from
    pub side: Side,
    pub num_classes: usize,
    pub num_steps: usize,
    /// How many episodes to draw
    pub count: usize,
    /// Samples per time step when fetching audio; 0 skips fetching
    pub chunk_size: usize,
    pub augment: bool,
    pub seed: Option<u64>,
    pub out: Option<String>,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            audio_dir: String::new(),
            manifest: String::new(),
            eval_labels: "eval.txt".to_string(),
            side: Side::Training,
            num_classes: 5,
            num_steps: 20,
            count: 1,
            chunk_size: 0,
            augment: false,
            seed: None,
            out: None,
        }
    }
}

// ─── Episode listing ─────────────────────────────────────────────────────────
/// One step of a listed episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub path: PathBuf,
    pub label: usize,
}

/// A sampled episode as written to the JSON listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub classes: Vec<String>,
    pub steps: Vec<StepRecord>,
    /// Total chunked time steps, when audio was fetched
    pub time_steps: Option<usize>,
}

impl From<&Episode<'_>> for EpisodeRecord {
    fn from(ep: &Episode<'_>) -> Self {
        Self {
            classes: ep.classes.clone(),
            steps: ep
                .steps
                .iter()
                .map(|s| StepRecord {
                    path: s.sample.path.clone(),
                    label: s.label,
                })
                .collect(),
            time_steps: None,
        }
    }
}

// ─── EpisodeUseCase ──────────────────────────────────────────────────────────
pub struct EpisodeUseCase {
    config: EpisodeConfig,
}

impl EpisodeUseCase {
    pub fn new(config: EpisodeConfig) -> Self {
        Self { config }
    }

    /// Load everything from disk and run.
    pub fn execute(&self) -> Result<Vec<EpisodeRecord>> {
        let cfg = &self.config;

        // ── Step 1: corpus ───────────────────────────────────────────────────
        let corpus = CorpusLoader::new(&cfg.audio_dir, &cfg.manifest).load()?;

        // ── Step 2: evaluation labels ────────────────────────────────────────
        let eval_labels = read_labels(&cfg.eval_labels)?;
        tracing::info!("Read {} evaluation labels", eval_labels.len());

        self.run(&corpus, &eval_labels, &PcmReader::new())
    }

    /// Steps 3–6 on an already loaded corpus.
    pub fn run<W>(&self, corpus: &Corpus, eval_labels: &[String], source: &W) -> Result<Vec<EpisodeRecord>>
    where
        W: WaveformSource + ?Sized,
    {
        let cfg = &self.config;

        // ── Step 3: one side of the split ────────────────────────────────────
        let (training, evaluation) = corpus.split(eval_labels);
        tracing::info!(
            "Split corpus: {} training, {} evaluation, {} dropped",
            training.len(),
            evaluation.len(),
            corpus.len() - training.len() - evaluation.len()
        );
        let side = match cfg.side {
            Side::Training => &training,
            Side::Evaluation => &evaluation,
        };

        // ── Step 4 + 5: sample (and fetch) ───────────────────────────────────
        let sampler = EpisodeSampler::new(side);
        tracing::info!(
            "Sampling {} episodes from {} samples over {} classes",
            cfg.count,
            side.len(),
            sampler.num_available()
        );

        let mut batcher = EpisodeBatcher::new(cfg.num_classes, cfg.chunk_size);
        if cfg.augment {
            batcher = batcher.with_augmentation(Augmenter::default());
        }

        let mut rng = make_rng(cfg.seed);
        let mut records = Vec::with_capacity(cfg.count);
        for i in 0..cfg.count {
            let episode = sampler.sample(cfg.num_classes, cfg.num_steps, &mut rng);
            let mut record = EpisodeRecord::from(&episode);

            if cfg.chunk_size > 0 {
                let batch = batcher
                    .batch(&episode, source, &mut rng)
                    .with_context(|| format!("episode {i}"))?;
                record.time_steps = Some(batch.total_time_steps());
            }

            tracing::debug!(
                "Episode {}: {} steps over classes {:?}",
                i,
                record.steps.len(),
                record.classes
            );
            records.push(record);
        }

        // ── Step 6: listing ──────────────────────────────────────────────────
        if let Some(path) = &cfg.out {
            let json = serde_json::to_string_pretty(&records)?;
            fs::write(path, json).with_context(|| format!("Cannot write episodes to '{path}'"))?;
            tracing::info!("Wrote {} episodes to '{}'", records.len(), path);
        }

        Ok(records)
    }
}

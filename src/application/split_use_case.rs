// ============================================================
// Layer 2 — SplitUseCase
// ============================================================
// Divides the set of classes into training and evaluation
// classes, aiming to minimise the number of samples tagged with
// classes from both sets.
//
//   Step 1: Read label sets from the manifest  (Layer 4 - data)
//   Step 2: Build the label universe           (Layer 4 - data)
//   Step 3: Hill-climb over partitions         (Layer 4 - data)
//   Step 4: Write train / eval label lists     (Layer 6 - infra)
//   Step 5: Optionally write a JSON report     (Layer 6 - infra)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::application::make_rng;
use crate::data::manifest::read_label_sets;
use crate::data::splitter::{PartitionSearch, SearchOutcome, SplitProblem};
use crate::domain::partition::Side;
use crate::infra::{label_store::write_labels, report::SplitReport};

// ─── Split Configuration ─────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Segment manifest to read labels from
    pub data_path: String,
    /// Number of classes to put on the evaluation side
    pub num_eval: usize,
    /// Hill-climbing iteration budget
    pub iterations: usize,
    pub train_out: String,
    pub eval_out: String,
    pub report_out: Option<String>,
    /// Fixed seed for a reproducible split; entropy if None
    pub seed: Option<u64>,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            data_path: String::new(),
            num_eval: 50,
            iterations: 10_000,
            train_out: "train.txt".to_string(),
            eval_out: "eval.txt".to_string(),
            report_out: None,
            seed: None,
        }
    }
}

// ─── SplitUseCase ─────────────────────────────────────────────────────────────
pub struct SplitUseCase {
    config: SplitConfig,
}

impl SplitUseCase {
    pub fn new(config: SplitConfig) -> Self {
        Self { config }
    }

    /// Run the split end to end and return the summary that was
    /// (optionally) written as the report.
    pub fn execute(&self) -> Result<SplitReport> {
        let cfg = &self.config;

        // ── Step 1 + 2: labels and universe ──────────────────────────────────
        let label_sets = read_label_sets(&cfg.data_path)
            .with_context(|| format!("read {}", cfg.data_path))?;
        let problem = SplitProblem::new(&label_sets);
        tracing::info!(
            "Read {} samples with {} distinct labels",
            problem.num_samples(),
            problem.universe().len()
        );

        // ── Step 3: search ────────────────────────────────────────────────────
        let mut rng = make_rng(cfg.seed);
        let outcome = PartitionSearch::new(&problem, cfg.num_eval, cfg.iterations)
            .run(&mut rng)
            .context("split classes")?;

        // ── Step 4: label lists ───────────────────────────────────────────────
        let SearchOutcome { partition, .. } = &outcome;
        let train = partition.labels_on(Side::Training);
        let eval = partition.labels_on(Side::Evaluation);

        tracing::info!("Writing {} ...", cfg.train_out);
        write_labels(&cfg.train_out, train.as_slice())?;
        tracing::info!("Writing {} ...", cfg.eval_out);
        write_labels(&cfg.eval_out, eval.as_slice())?;

        // ── Step 5: report ────────────────────────────────────────────────────
        let report = SplitReport {
            config: cfg.clone(),
            universe_size: problem.universe().len(),
            num_samples: problem.num_samples(),
            initial_dropped: outcome.initial_dropped,
            dropped: outcome.dropped,
            iterations: outcome.iterations,
            num_train_labels: train.len(),
            num_eval_labels: eval.len(),
        };
        if let Some(path) = &cfg.report_out {
            report.save(path)?;
        }

        Ok(report)
    }
}

// ============================================================
// Layer 6 — Split Report
// ============================================================
// Optional JSON summary of a split run, so a particular class
// split can be traced back to the settings that produced it:
//
//   {
//     "config": { "data_path": "...", "num_eval": 50, ... },
//     "universe_size": 527,
//     "num_samples": 22160,
//     "initial_dropped": 4100,
//     "dropped": 1210,
//     "iterations": 10000,
//     "num_train_labels": 477,
//     "num_eval_labels": 50
//   }

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::application::split_use_case::SplitConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitReport {
    pub config: SplitConfig,
    pub universe_size: usize,
    pub num_samples: usize,
    pub initial_dropped: usize,
    pub dropped: usize,
    pub iterations: usize,
    pub num_train_labels: usize,
    pub num_eval_labels: usize,
}

impl SplitReport {
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Cannot write report to '{}'", path.display()))?;
        tracing::debug!("Saved split report to '{}'", path.display());
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read report from '{}'", path.display()))?;
        Ok(serde_json::from_str(&json)?)
    }
}

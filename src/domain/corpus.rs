// ============================================================
// Layer 3 — Corpus
// ============================================================
// The ordered list of samples loaded from a manifest.
// Loaded once and read-only afterwards; the splitting helpers
// below return new corpora rather than filtering in place.
//
// Splitting rule (shared by both split methods):
//   all labels on Evaluation  → evaluation corpus
//   all labels on Training    → training corpus
//   labels on both sides      → dropped from both
//   no labels at all          → dropped from both

use std::collections::{BTreeSet, HashSet};

use crate::domain::partition::{Partition, Side};
use crate::domain::sample::Sample;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    samples: Vec<Sample>,
}

impl Corpus {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Every class found in the corpus, sorted alphabetically.
    pub fn classes(&self) -> Vec<String> {
        let unique: BTreeSet<&str> = self
            .samples
            .iter()
            .flat_map(|s| s.labels.iter().map(String::as_str))
            .collect();
        unique.into_iter().map(str::to_string).collect()
    }

    /// The label set of every sample, in corpus order.
    pub fn label_sets(&self) -> Vec<Vec<String>> {
        self.samples.iter().map(|s| s.labels.clone()).collect()
    }

    /// Split into (training, evaluation) given the evaluation labels.
    /// Any label not listed counts as a training label.
    pub fn split<S: AsRef<str>>(&self, eval_labels: &[S]) -> (Corpus, Corpus) {
        let eval: HashSet<&str> = eval_labels.iter().map(AsRef::as_ref).collect();
        self.split_with(|label| {
            if eval.contains(label) {
                Side::Evaluation
            } else {
                Side::Training
            }
        })
    }

    /// Split according to a Partition. Labels outside the
    /// partition's universe count as training labels.
    pub fn split_by(&self, partition: &Partition) -> (Corpus, Corpus) {
        self.split_with(|label| partition.side_of(label).unwrap_or(Side::Training))
    }

    fn split_with(&self, side_of: impl Fn(&str) -> Side) -> (Corpus, Corpus) {
        let mut training = Vec::new();
        let mut evaluation = Vec::new();

        for sample in &self.samples {
            let (mut num_train, mut num_eval) = (0usize, 0usize);
            for label in &sample.labels {
                match side_of(label) {
                    Side::Training => num_train += 1,
                    Side::Evaluation => num_eval += 1,
                }
            }
            match (num_train, num_eval) {
                (0, 0) => {}
                (_, 0) => training.push(sample.clone()),
                (0, _) => evaluation.push(sample.clone()),
                _ => {}
            }
        }

        tracing::debug!(
            "Corpus split: {} training, {} evaluation, {} dropped",
            training.len(),
            evaluation.len(),
            self.len() - training.len() - evaluation.len(),
        );

        (Corpus::new(training), Corpus::new(evaluation))
    }
}

impl FromIterator<Sample> for Corpus {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::partition::LabelUniverse;
    use std::sync::Arc;

    fn sample(name: &str, labels: &[&str]) -> Sample {
        Sample::new(name, labels.iter().map(|l| l.to_string()).collect())
    }

    fn corpus() -> Corpus {
        vec![
            sample("a.wav", &["dog", "cat"]),
            sample("b.wav", &["bird"]),
            sample("c.wav", &["dog"]),
            sample("d.wav", &[]),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_classes_sorted() {
        assert_eq!(corpus().classes(), vec!["bird", "cat", "dog"]);
    }

    #[test]
    fn test_split_drops_straddling_and_unlabeled() {
        let (train, eval) = corpus().split(&["dog"]);
        let train: Vec<_> = train.iter().map(|s| s.path.clone()).collect();
        let eval: Vec<_> = eval.iter().map(|s| s.path.clone()).collect();
        assert_eq!(train, vec![std::path::PathBuf::from("b.wav")]);
        assert_eq!(eval, vec![std::path::PathBuf::from("c.wav")]);
    }

    #[test]
    fn test_split_by_partition_matches_split() {
        let c = corpus();
        let universe = Arc::new(LabelUniverse::from_label_sets(&c.label_sets()));
        let p = Partition::with_eval_labels(universe, &["bird"]);
        assert_eq!(c.split_by(&p), c.split(&["bird"]));
    }

    #[test]
    fn test_split_empty_corpus() {
        let (train, eval) = Corpus::default().split(&["x"]);
        assert!(train.is_empty());
        assert!(eval.is_empty());
    }
}

// ============================================================
// Layer 4 — Episode Sampler
// ============================================================
// Draws one meta-learning episode from a corpus that has
// already been restricted to one side of the class split.
//
// An episode is built like this:
//   1. Index label → samples, remembering labels in the order
//      they are first seen
//   2. Clamp the class count to the number of labels available
//   3. Shuffle the labels; the first `num_classes` become the
//      episode classes, and a class's position in that order
//      is its dense label (0, 1, 2, ...)
//   4. Emit (sample, dense label) for every sample of every
//      chosen class
//   5. Shuffle the pairs together
//   6. Keep at most `num_steps` pairs
//
// A clip tagged with two chosen classes is emitted once per
// class, each time under a different dense label.
//
// Reference: rand crate documentation (SliceRandom::shuffle)

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::HashMap;

use crate::domain::corpus::Corpus;
use crate::domain::sample::Sample;

/// One step of an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EpisodeStep<'c> {
    pub sample: &'c Sample,
    /// Dense label in `[0, num_classes)`
    pub label: usize,
}

/// A sampled episode. Borrows its samples from the corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Episode<'c> {
    pub steps: Vec<EpisodeStep<'c>>,
    /// `classes[d]` is the corpus label behind dense label `d`
    pub classes: Vec<String>,
}

impl<'c> Episode<'c> {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of dense labels assigned (the clamped class count).
    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn samples(&self) -> impl Iterator<Item = &'c Sample> + '_ {
        self.steps.iter().map(|s| s.sample)
    }

    pub fn labels(&self) -> Vec<usize> {
        self.steps.iter().map(|s| s.label).collect()
    }
}

/// Samples episodes from one corpus.
///
/// The label index is built once in `new`, so drawing many
/// episodes from the same corpus doesn't rescan it.
pub struct EpisodeSampler<'c> {
    /// Distinct labels in first-seen order
    classes: Vec<&'c str>,
    /// Samples carrying each label, in corpus order
    by_class: HashMap<&'c str, Vec<&'c Sample>>,
}

impl<'c> EpisodeSampler<'c> {
    pub fn new(corpus: &'c Corpus) -> Self {
        let mut classes = Vec::new();
        let mut by_class: HashMap<&str, Vec<&Sample>> = HashMap::new();

        for sample in corpus {
            for label in &sample.labels {
                let entry = by_class.entry(label.as_str()).or_insert_with(|| {
                    classes.push(label.as_str());
                    Vec::new()
                });
                entry.push(sample);
            }
        }

        Self { classes, by_class }
    }

    /// Number of distinct labels available to draw from.
    pub fn num_available(&self) -> usize {
        self.classes.len()
    }

    /// Draw an episode with up to `num_classes` classes and at most
    /// `num_steps` steps. An empty corpus gives an empty episode.
    pub fn sample<R: Rng + ?Sized>(&self, num_classes: usize, num_steps: usize, rng: &mut R) -> Episode<'c> {
        let num_classes = num_classes.min(self.classes.len());

        let mut order: Vec<&'c str> = self.classes.clone();
        order.shuffle(rng);
        order.truncate(num_classes);

        let mut steps = Vec::new();
        for (label, class) in order.iter().enumerate() {
            for &sample in &self.by_class[class] {
                steps.push(EpisodeStep { sample, label });
            }
        }

        steps.shuffle(rng);
        steps.truncate(num_steps);

        Episode {
            steps,
            classes: order.into_iter().map(str::to_string).collect(),
        }
    }
}

/// Convenience wrapper: build a sampler and draw a single episode.
pub fn sample_episode<'c, R: Rng + ?Sized>(
    corpus: &'c Corpus,
    num_classes: usize,
    num_steps: usize,
    rng: &mut R,
) -> Episode<'c> {
    EpisodeSampler::new(corpus).sample(num_classes, num_steps, rng)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::BTreeSet;

    fn corpus(rows: &[(&str, &[&str])]) -> Corpus {
        rows.iter()
            .map(|(path, labels)| Sample::new(*path, labels.iter().map(|l| l.to_string()).collect()))
            .collect()
    }

    /// a: 3 samples, b: 2 samples, c: 1 sample
    fn abc() -> Corpus {
        corpus(&[
            ("a1", &["a"]),
            ("a2", &["a"]),
            ("a3", &["a"]),
            ("b1", &["b"]),
            ("b2", &["b"]),
            ("c1", &["c"]),
        ])
    }

    fn dense_labels(ep: &Episode) -> BTreeSet<usize> {
        ep.labels().into_iter().collect()
    }

    #[test]
    fn test_two_classes_four_steps() {
        let c = abc();
        let sampler = EpisodeSampler::new(&c);
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        for _ in 0..100 {
            let ep = sampler.sample(2, 4, &mut rng);
            assert!(ep.len() <= 4);
            assert_eq!(ep.num_classes(), 2);
            // no class has 4 samples, so truncation always keeps both labels
            assert_eq!(dense_labels(&ep), BTreeSet::from([0, 1]));

            let classes: BTreeSet<&str> = ep.classes.iter().map(String::as_str).collect();
            assert_eq!(classes.len(), 2);
            assert!(classes.is_subset(&["a", "b", "c"].into_iter().collect()));

            for step in &ep.steps {
                assert!(step.sample.has_label(&ep.classes[step.label]));
            }
        }
    }

    #[test]
    fn test_without_truncation_every_sample_of_chosen_classes_is_used() {
        let c = abc();
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let ep = sample_episode(&c, 2, 100, &mut rng);

        let expected: usize = ep
            .classes
            .iter()
            .map(|class| c.iter().filter(|s| s.has_label(class)).count())
            .sum();
        assert_eq!(ep.len(), expected);
        assert_eq!(dense_labels(&ep), BTreeSet::from([0, 1]));
    }

    #[test]
    fn test_class_count_is_clamped() {
        let c = abc();
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let ep = sample_episode(&c, 10, 100, &mut rng);
        assert_eq!(ep.num_classes(), 3);
        assert_eq!(ep.len(), 6);
        assert_eq!(dense_labels(&ep), BTreeSet::from([0, 1, 2]));
    }

    #[test]
    fn test_multi_label_sample_appears_once_per_chosen_class() {
        let c = corpus(&[("both", &["x", "y"])]);
        let mut rng = ChaCha8Rng::seed_from_u64(14);
        let ep = sample_episode(&c, 2, 10, &mut rng);

        assert_eq!(ep.len(), 2);
        assert!(ep.samples().all(|s| s.path.to_str() == Some("both")));
        assert_eq!(dense_labels(&ep), BTreeSet::from([0, 1]));
    }

    #[test]
    fn test_empty_corpus_gives_empty_episode() {
        let c = Corpus::default();
        let mut rng = ChaCha8Rng::seed_from_u64(15);
        let ep = sample_episode(&c, 5, 10, &mut rng);
        assert!(ep.is_empty());
        assert_eq!(ep.num_classes(), 0);
    }

    #[test]
    fn test_zero_steps() {
        let c = abc();
        let mut rng = ChaCha8Rng::seed_from_u64(16);
        assert!(sample_episode(&c, 2, 0, &mut rng).is_empty());
    }

    #[test]
    fn test_seeded_sampling_is_reproducible() {
        let c = abc();
        let a = sample_episode(&c, 2, 4, &mut ChaCha8Rng::seed_from_u64(17));
        let b = sample_episode(&c, 2, 4, &mut ChaCha8Rng::seed_from_u64(17));
        assert_eq!(a, b);
    }
}

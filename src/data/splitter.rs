// ============================================================
// Layer 4 — Label-Disjoint Class Splitter
// ============================================================
// Divides the label universe into training and evaluation
// classes so that as few samples as possible carry labels from
// both halves. Such samples would leak evaluation classes into
// training (or vice versa) and have to be dropped from both.
//
// Why not split samples directly?
//   Meta-learning evaluates on classes the model has NEVER
//   seen. The split therefore has to happen in label space,
//   and because AudioSet is multi-label every clip tagged with
//   a training class AND an evaluation class is lost.
//
// Search strategy (greedy hill climbing):
//   1. Put `num_eval` random labels on the evaluation side
//   2. Repeat `iterations` times:
//        - swap one random training label with one random
//          evaluation label (keeps the eval count fixed)
//        - keep the neighbour only if it drops STRICTLY fewer
//          samples than the best so far
//   3. Return the best partition seen
//
// There are no restarts and no annealing, so the search can
// settle in a local minimum. Each candidate is scored with a
// full rescan of the corpus label sets.
//
// Reference: rand crate documentation (seq::index::sample)

use rand::Rng;
use std::ops::ControlFlow;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::partition::{LabelUniverse, Partition, Side};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PartitionError {
    #[error(
        "cannot put {requested} of {universe} labels on the evaluation side; \
         at least one label must stay on the training side"
    )]
    TooManyEvalLabels { requested: usize, universe: usize },
}

// ─── SplitProblem ─────────────────────────────────────────────────────────────
/// The label sets of a corpus, encoded against their universe.
#[derive(Debug, Clone)]
pub struct SplitProblem {
    universe: Arc<LabelUniverse>,
    samples: Vec<Vec<usize>>,
}

impl SplitProblem {
    pub fn new<S: AsRef<str>>(label_sets: &[Vec<S>]) -> Self {
        let universe = Arc::new(LabelUniverse::from_label_sets(label_sets));
        let samples = label_sets.iter().map(|set| universe.encode(set)).collect();
        Self { universe, samples }
    }

    pub fn universe(&self) -> &Arc<LabelUniverse> {
        &self.universe
    }

    pub fn num_samples(&self) -> usize {
        self.samples.len()
    }

    /// Number of samples `partition` would drop.
    pub fn num_drop(&self, partition: &Partition) -> usize {
        partition.num_drop(&self.samples)
    }
}

/// Random initial partition with exactly `num_eval` evaluation labels.
pub fn random_split<R: Rng + ?Sized>(
    universe: &Arc<LabelUniverse>,
    num_eval: usize,
    rng: &mut R,
) -> Result<Partition, PartitionError> {
    if num_eval > 0 && num_eval >= universe.len() {
        return Err(PartitionError::TooManyEvalLabels {
            requested: num_eval,
            universe: universe.len(),
        });
    }
    let eval_ids = rand::seq::index::sample(rng, universe.len(), num_eval).into_vec();
    Ok(Partition::with_eval_ids(Arc::clone(universe), &eval_ids))
}

/// Swap one random training label with one random evaluation label.
/// Returns an unchanged copy if either side is empty.
pub fn mutate<R: Rng + ?Sized>(partition: &Partition, rng: &mut R) -> Partition {
    let training = partition.ids_on(Side::Training);
    let evaluation = partition.ids_on(Side::Evaluation);
    if training.is_empty() || evaluation.is_empty() {
        return partition.clone();
    }
    let t = training[rng.gen_range(0..training.len())];
    let e = evaluation[rng.gen_range(0..evaluation.len())];
    partition.swap(t, e)
}

// ─── PartitionSearch ──────────────────────────────────────────────────────────
/// Reported to the search callback every time the best partition improves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Improvement {
    /// Zero-based iteration that produced the improvement
    pub iteration: usize,
    /// New best drop count
    pub dropped: usize,
}

/// Result of a finished (or cancelled) search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub partition: Partition,
    pub dropped: usize,
    pub initial_dropped: usize,
    /// Iterations actually run; less than the budget only if the
    /// callback asked to stop
    pub iterations: usize,
}

/// Greedy hill-climbing search over label partitions.
pub struct PartitionSearch<'p> {
    problem: &'p SplitProblem,
    num_eval: usize,
    iterations: usize,
}

impl<'p> PartitionSearch<'p> {
    pub fn new(problem: &'p SplitProblem, num_eval: usize, iterations: usize) -> Self {
        Self {
            problem,
            num_eval,
            iterations,
        }
    }

    /// Run the full iteration budget from a random start.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SearchOutcome, PartitionError> {
        self.run_with(rng, |_| ControlFlow::Continue(()))
    }

    /// Like `run`, calling `on_improve` after every strict improvement.
    /// Returning `ControlFlow::Break` from the callback ends the search.
    pub fn run_with<R, F>(&self, rng: &mut R, on_improve: F) -> Result<SearchOutcome, PartitionError>
    where
        R: Rng + ?Sized,
        F: FnMut(&Improvement) -> ControlFlow<()>,
    {
        let start = random_split(self.problem.universe(), self.num_eval, rng)?;
        Ok(self.run_from(start, rng, on_improve))
    }

    /// Hill-climb from a given starting partition.
    pub fn run_from<R, F>(&self, start: Partition, rng: &mut R, mut on_improve: F) -> SearchOutcome
    where
        R: Rng + ?Sized,
        F: FnMut(&Improvement) -> ControlFlow<()>,
    {
        let mut best = start;
        let mut best_drop = self.problem.num_drop(&best);
        let initial_dropped = best_drop;
        tracing::info!("Started with {} dropped.", best_drop);

        let mut iterations = 0;
        while iterations < self.iterations {
            let i = iterations;
            iterations += 1;

            let candidate = mutate(&best, rng);
            let dropped = self.problem.num_drop(&candidate);
            if dropped >= best_drop {
                continue;
            }

            best = candidate;
            best_drop = dropped;
            tracing::info!("iter {}/{}: improved to {} dropped.", i, self.iterations, best_drop);

            let event = Improvement { iteration: i, dropped };
            if on_improve(&event).is_break() {
                tracing::info!("Search stopped early after {} iterations", iterations);
                break;
            }
        }

        SearchOutcome {
            partition: best,
            dropped: best_drop,
            initial_dropped,
            iterations,
        }
    }
}

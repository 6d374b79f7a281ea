// ============================================================
// Layer 3 — Label Universe and Partition
// ============================================================
// A Partition assigns every label in the universe to exactly
// one side: Training or Evaluation.
//
// Representation:
//   LabelUniverse — sorted list of distinct labels plus a
//                   label → index lookup table. Shared (Arc)
//                   by every partition built over it.
//   Partition     — one Side per label index. Never mutated
//                   in place: `swap` returns a new Partition,
//                   so a candidate can never alias the current
//                   best during search.
//
// Samples are handed to `num_drop` already encoded as label
// indices (see LabelUniverse::encode) so scoring a candidate
// is a plain array lookup per label.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Which half of the split a label belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Training,
    Evaluation,
}

impl Side {
    /// The opposite side.
    pub fn flip(self) -> Self {
        match self {
            Side::Training => Side::Evaluation,
            Side::Evaluation => Side::Training,
        }
    }
}

// ─── LabelUniverse ────────────────────────────────────────────────────────────
/// Every distinct label found in a corpus, sorted alphabetically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelUniverse {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl LabelUniverse {
    /// Collect the union of all label sets. Empty strings are ignored.
    pub fn from_label_sets<S: AsRef<str>>(sets: &[Vec<S>]) -> Self {
        let unique: BTreeSet<&str> = sets
            .iter()
            .flat_map(|set| set.iter().map(AsRef::as_ref))
            .filter(|l| !l.is_empty())
            .collect();
        Self::from_sorted(unique.into_iter().map(str::to_string).collect())
    }

    fn from_sorted(labels: Vec<String>) -> Self {
        let index = labels
            .iter()
            .enumerate()
            .map(|(i, l)| (l.clone(), i))
            .collect();
        Self { labels, index }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Label name for an index.
    ///
    /// # Panics
    /// Panics if `id >= self.len()`.
    pub fn label(&self, id: usize) -> &str {
        &self.labels[id]
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Translate a label set into universe indices.
    /// Labels outside the universe are skipped.
    pub fn encode<S: AsRef<str>>(&self, set: &[S]) -> Vec<usize> {
        set.iter()
            .filter_map(|l| self.index_of(l.as_ref()))
            .collect()
    }
}

// ─── Partition ────────────────────────────────────────────────────────────────
/// A total assignment of the label universe to Training / Evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    universe: Arc<LabelUniverse>,
    sides: Vec<Side>,
}

impl Partition {
    /// Build a partition putting the given label indices on the
    /// evaluation side and everything else on the training side.
    /// Out-of-range indices are ignored.
    pub fn with_eval_ids(universe: Arc<LabelUniverse>, eval_ids: &[usize]) -> Self {
        let mut sides = vec![Side::Training; universe.len()];
        for &id in eval_ids {
            if let Some(side) = sides.get_mut(id) {
                *side = Side::Evaluation;
            }
        }
        Self { universe, sides }
    }

    /// Same as `with_eval_ids` but by label name.
    pub fn with_eval_labels<S: AsRef<str>>(universe: Arc<LabelUniverse>, eval: &[S]) -> Self {
        let ids = universe.encode(eval);
        Self::with_eval_ids(universe, &ids)
    }

    pub fn universe(&self) -> &Arc<LabelUniverse> {
        &self.universe
    }

    /// Side of the label at `id`.
    ///
    /// # Panics
    /// Panics if `id` is outside the universe.
    pub fn side(&self, id: usize) -> Side {
        self.sides[id]
    }

    /// Side of a label by name, or None if it isn't in the universe.
    pub fn side_of(&self, label: &str) -> Option<Side> {
        self.universe.index_of(label).map(|id| self.sides[id])
    }

    /// Indices of every label on `side`, ascending.
    pub fn ids_on(&self, side: Side) -> Vec<usize> {
        self.sides
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == side)
            .map(|(id, _)| id)
            .collect()
    }

    /// Names of every label on `side`, sorted.
    pub fn labels_on(&self, side: Side) -> Vec<&str> {
        self.ids_on(side)
            .into_iter()
            .map(|id| self.universe.label(id))
            .collect()
    }

    pub fn count(&self, side: Side) -> usize {
        self.sides.iter().filter(|s| **s == side).count()
    }

    /// A copy of this partition with labels `a` and `b` trading sides.
    pub fn swap(&self, a: usize, b: usize) -> Partition {
        let mut sides = self.sides.clone();
        sides.swap(a, b);
        Partition {
            universe: Arc::clone(&self.universe),
            sides,
        }
    }

    /// A copy with every label on the opposite side.
    pub fn flipped(&self) -> Partition {
        Partition {
            universe: Arc::clone(&self.universe),
            sides: self.sides.iter().map(|s| s.flip()).collect(),
        }
    }

    /// True if the encoded label set has labels on both sides.
    pub fn straddles(&self, sample: &[usize]) -> bool {
        let mut training = false;
        let mut evaluation = false;
        for &id in sample {
            match self.sides[id] {
                Side::Training => training = true,
                Side::Evaluation => evaluation = true,
            }
            if training && evaluation {
                return true;
            }
        }
        false
    }

    /// Number of samples that would have to be dropped under this
    /// partition. Each sample is a set of universe indices.
    pub fn num_drop(&self, samples: &[Vec<usize>]) -> usize {
        samples.iter().filter(|s| self.straddles(s)).count()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn sets() -> Vec<Vec<&'static str>> {
        vec![vec!["dog", "cat"], vec!["bird"], vec!["dog"]]
    }

    fn universe() -> Arc<LabelUniverse> {
        Arc::new(LabelUniverse::from_label_sets(&sets()))
    }

    fn encoded(u: &LabelUniverse) -> Vec<Vec<usize>> {
        sets().iter().map(|s| u.encode(s)).collect()
    }

    #[test]
    fn test_universe_is_sorted_and_unique() {
        let u = universe();
        assert_eq!(u.labels(), &["bird", "cat", "dog"]);
        assert_eq!(u.index_of("cat"), Some(1));
        assert_eq!(u.index_of("cow"), None);
    }

    #[test]
    fn test_universe_skips_empty_labels() {
        let u = LabelUniverse::from_label_sets(&[vec!["", "a"], vec![""]]);
        assert_eq!(u.labels(), &["a"]);
    }

    #[test]
    fn test_bird_on_eval_drops_nothing() {
        let u = universe();
        let p = Partition::with_eval_labels(Arc::clone(&u), &["bird"]);
        assert_eq!(p.num_drop(&encoded(&u)), 0);
    }

    #[test]
    fn test_dog_on_eval_drops_one() {
        let u = universe();
        let p = Partition::with_eval_labels(Arc::clone(&u), &["dog"]);
        // {dog, cat} straddles
        assert_eq!(p.num_drop(&encoded(&u)), 1);
    }

    #[test]
    fn test_num_drop_symmetric_under_flip() {
        let u = universe();
        let samples = encoded(&u);
        for eval in [["dog"], ["cat"], ["bird"]] {
            let p = Partition::with_eval_labels(Arc::clone(&u), &eval);
            assert_eq!(p.num_drop(&samples), p.flipped().num_drop(&samples));
        }
    }

    #[test]
    fn test_swap_is_copy_on_write() {
        let u = universe();
        let p = Partition::with_eval_labels(Arc::clone(&u), &["dog"]);
        let q = p.swap(u.index_of("dog").unwrap(), u.index_of("bird").unwrap());

        assert_eq!(p.side_of("dog"), Some(Side::Evaluation));
        assert_eq!(q.side_of("dog"), Some(Side::Training));
        assert_eq!(q.side_of("bird"), Some(Side::Evaluation));
        assert_eq!(q.count(Side::Evaluation), 1);
    }

    #[test]
    fn test_every_label_has_one_side() {
        let u = universe();
        let p = Partition::with_eval_labels(Arc::clone(&u), &["cat", "bird"]);
        let train = p.labels_on(Side::Training);
        let eval = p.labels_on(Side::Evaluation);
        assert_eq!(train, vec!["dog"]);
        assert_eq!(eval, vec!["bird", "cat"]);
        assert_eq!(train.len() + eval.len(), u.len());
    }

    #[test]
    fn test_empty_label_set_never_dropped() {
        let u = universe();
        let p = Partition::with_eval_labels(Arc::clone(&u), &["dog"]);
        assert_eq!(p.num_drop(&[vec![]]), 0);
    }
}

// ============================================================
// Layer 6 — Running PCM Statistics
// ============================================================
// Accumulates mean and variance of sample amplitudes across a
// whole directory without holding the samples in memory:
//
//   variance = E[x²] − E[x]²
//
// Used by the pcm-stats diagnostic to check that decoded audio
// sits in the expected range before training on it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RollingStats {
    pub sum: f64,
    pub square_sum: f64,
    pub count: usize,
}

impl RollingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, x: f64) {
        self.count += 1;
        self.sum += x;
        self.square_sum += x * x;
    }

    pub fn extend(&mut self, xs: &[f64]) {
        for &x in xs {
            self.add(x);
        }
    }

    /// Mean of everything added so far (NaN when empty).
    pub fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }

    /// Population variance of everything added so far (NaN when empty).
    pub fn variance(&self) -> f64 {
        let div = 1.0 / self.count as f64;
        div * self.square_sum - (div * self.sum).powi(2)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variance() {
        let mut s = RollingStats::new();
        s.extend(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(s.count, 4);
        assert!((s.mean() - 2.5).abs() < 1e-12);
        assert!((s.variance() - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_constant_signal_has_zero_variance() {
        let mut s = RollingStats::new();
        s.extend(&[0.5; 100]);
        assert!(s.variance().abs() < 1e-12);
    }

    #[test]
    fn test_empty_is_nan() {
        assert!(RollingStats::new().variance().is_nan());
    }
}

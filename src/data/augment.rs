// ============================================================
// Layer 4 — Audio Augmentation
// ============================================================
// Produces a slightly different copy of a waveform so the same
// clip doesn't look identical every time it is drawn:
//
//   - time stretch: pick s in [0.9, 1.1] and read the input at
//     a fractional cursor advancing 1/s per output sample,
//     linearly interpolating between the two neighbours
//   - additive Gaussian noise (σ = 0.005) on every output sample
//
// The loop stops as soon as the cursor has no right-hand
// neighbour, so the output holds roughly len * s samples and
// the input is never read past its last element. Inputs with
// fewer than two samples give an empty output.
//
// Reference: rand_distr crate documentation (StandardNormal)

use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

pub const MIN_STRETCH: f64 = 0.9;
pub const MAX_STRETCH: f64 = 1.1;
pub const NOISE_STD: f64 = 0.005;

/// Random time-stretch + noise augmentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Augmenter {
    pub min_stretch: f64,
    pub max_stretch: f64,
    /// Standard deviation of the additive noise
    pub noise_std: f64,
}

impl Default for Augmenter {
    fn default() -> Self {
        Self {
            min_stretch: MIN_STRETCH,
            max_stretch: MAX_STRETCH,
            noise_std: NOISE_STD,
        }
    }
}

impl Augmenter {
    /// Augment `samples` with a freshly drawn stretch factor.
    pub fn apply<R: Rng + ?Sized>(&self, samples: &[f64], rng: &mut R) -> Vec<f64> {
        let stretch = self.min_stretch + rng.gen::<f64>() * (self.max_stretch - self.min_stretch);
        resample(samples, stretch, self.noise_std, rng)
    }
}

/// Resample by a fixed `stretch` factor, adding noise with
/// standard deviation `noise_std`.
///
/// A non-positive or non-finite stretch yields an empty output.
pub fn resample<R: Rng + ?Sized>(samples: &[f64], stretch: f64, noise_std: f64, rng: &mut R) -> Vec<f64> {
    if !(stretch.is_finite() && stretch > 0.0) || samples.len() < 2 {
        return Vec::new();
    }

    let step = 1.0 / stretch;
    let mut out = Vec::with_capacity((samples.len() as f64 * stretch) as usize + 1);
    let mut cursor = 0.0_f64;

    while (cursor as usize) + 1 < samples.len() {
        let idx = cursor as usize;
        let frac = cursor - idx as f64;
        let noise: f64 = rng.sample(StandardNormal);
        out.push(samples[idx] * (1.0 - frac) + samples[idx + 1] * frac + noise * noise_std);
        cursor += step;
    }

    out
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(21)
    }

    #[test]
    fn test_unit_stretch_without_noise_is_identity() {
        let input: Vec<f64> = (0..100).map(|i| (i as f64 * 0.1).sin()).collect();
        let out = resample(&input, 1.0, 0.0, &mut rng());

        assert_eq!(out.len(), input.len() - 1);
        for (a, b) in out.iter().zip(&input) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_double_stretch_interpolates_midpoints() {
        let ramp: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let out = resample(&ramp, 2.0, 0.0, &mut rng());

        assert_eq!(out.len(), 2 * (ramp.len() - 1));
        for (k, v) in out.iter().enumerate() {
            assert!((v - k as f64 * 0.5).abs() < 1e-9, "out[{k}] = {v}");
        }
    }

    #[test]
    fn test_short_inputs_give_empty_output() {
        assert!(resample(&[], 1.0, 0.0, &mut rng()).is_empty());
        assert!(resample(&[0.5], 1.0, 0.0, &mut rng()).is_empty());
        assert!(Augmenter::default().apply(&[0.5], &mut rng()).is_empty());
    }

    #[test]
    fn test_invalid_stretch_gives_empty_output() {
        let input = [0.0, 1.0, 2.0];
        assert!(resample(&input, 0.0, 0.0, &mut rng()).is_empty());
        assert!(resample(&input, f64::NAN, 0.0, &mut rng()).is_empty());
    }

    #[test]
    fn test_output_length_tracks_stretch_range() {
        let input = vec![0.0; 1000];
        let aug = Augmenter::default();
        let mut rng = rng();
        for _ in 0..50 {
            let n = aug.apply(&input, &mut rng).len() as f64;
            assert!(n >= 1000.0 * MIN_STRETCH - 2.0 && n <= 1000.0 * MAX_STRETCH + 2.0, "len {n}");
        }
    }

    #[test]
    fn test_never_reads_past_the_end() {
        // would panic on an out-of-bounds read
        let aug = Augmenter::default();
        let mut rng = rng();
        for len in 2..40 {
            let input: Vec<f64> = (0..len).map(|i| i as f64).collect();
            for _ in 0..20 {
                let out = aug.apply(&input, &mut rng);
                assert!(!out.is_empty());
            }
        }
    }

    #[test]
    fn test_noise_level() {
        let input = vec![0.0; 20_001];
        let out = resample(&input, 1.0, NOISE_STD, &mut rng());
        let n = out.len() as f64;
        let mean = out.iter().sum::<f64>() / n;
        let var = out.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        let std = var.sqrt();
        assert!(mean.abs() < 1e-3);
        assert!((std - NOISE_STD).abs() < NOISE_STD * 0.1, "std {std}");
    }
}

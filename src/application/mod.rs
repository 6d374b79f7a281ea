// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates the other layers to accomplish one
// goal per command (split classes, draw episodes, diagnose
// downloaded audio).
//
// Rules for this layer:
//   - No sampling or DSP math here (that's Layer 4)
//   - No printing here (that's Layer 1)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Label-disjoint class split
pub mod split_use_case;

// Episode sampling over one side of a split
pub mod episode_use_case;

// find-bad / pcm-stats scans
pub mod diagnose_use_case;

/// Build the random source for a use case. A fixed seed makes
/// the whole run reproducible; otherwise seed from the OS.
pub fn make_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => {
            tracing::info!("Using seed {}", seed);
            ChaCha8Rng::seed_from_u64(seed)
        }
        None => ChaCha8Rng::from_entropy(),
    }
}

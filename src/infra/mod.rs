// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting file formats and bookkeeping:
//
//   label_store.rs — newline-delimited label lists written by
//                    `split` and read back by `episodes`
//
//   report.rs      — JSON summary of a split run, including the
//                    config that produced it
//
//   stats.rs       — running mean / variance of PCM amplitudes
//
// Reference: Rust Book §9 (Error Handling with anyhow)

/// Label list reading and writing
pub mod label_store;

/// Split run summary (JSON)
pub mod report;

/// Running PCM statistics
pub mod stats;

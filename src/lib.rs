// ============================================================
// audioset-meta
// ============================================================
// Data preparation for meta-learning on AudioSet:
//
//   Layer 1 — cli          argument parsing and printing
//   Layer 2 — application  one use case per command
//   Layer 3 — domain       samples, corpora, partitions, traits
//   Layer 4 — data         manifest, decoding, splitting,
//                          episodes, augmentation, batching
//   Layer 6 — infra        label lists, reports, PCM statistics
//
// The library is what a trainer links against; the binary in
// main.rs only wires the CLI to it.

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod infra;

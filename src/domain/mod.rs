// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs and traits describing the corpus:
//
//   sample.rs    — one audio file and the labels attached to it
//   corpus.rs    — the ordered, read-only collection of samples
//   partition.rs — the label universe and a training/evaluation
//                  assignment over it
//   traits.rs    — the seams other layers implement
//
// Rules for this layer:
//   - NO file I/O
//   - NO random number generation
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// A single labelled audio file
pub mod sample;

// An ordered collection of samples
pub mod corpus;

// Label universe and training/evaluation partitions
pub mod partition;

// Core abstractions (traits) that other layers implement
pub mod traits;

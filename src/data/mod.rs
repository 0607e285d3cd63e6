// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from the synthetic ground
// truth all the way to tensor batches.
//
// The pipeline flows in this order:
//
//   ground-truth grid density
//       │
//       ▼
//   SyntheticSource   → draws seeded (x0, x1) samples
//       │
//       ▼
//   split_train_test  → shuffles and partitions the samples
//       │
//       ▼
//   PairDataset       → implements Burn's Dataset trait
//       │
//       ▼
//   PairBatcher       → stacks samples into [B, 2] Int tensors
//       │
//       ▼
//   DataLoader        → feeds batches to the training loop
//
// Each module is responsible for exactly one step.
// This makes each step independently testable and replaceable.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)
//            Rust Book §13 (Iterators and Closures)

/// Samples pairs from the fixed synthetic distribution
pub mod synthetic;

/// Shuffles and splits data into train/test sets
pub mod splitter;

/// Implements Burn's Dataset trait for pair samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

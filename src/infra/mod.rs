// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Handles all cross-cutting concerns that don't belong in
// any specific business layer:
//
//   metrics.rs   — Training metrics logging
//                  Writes epoch-level metrics (train loss,
//                  test loss) to a CSV file for later
//                  analysis and plotting.
//
//   visualize.rs — Text rendering of run outputs
//                  Turns a d × d probability (or count) table
//                  into an ASCII heatmap, renders the loss
//                  curves as per-epoch bars, and exports the
//                  joint table as CSV.
//
// Why is this a separate layer?
//   These concerns are used by multiple other layers but
//   don't belong to any one of them. Keeping them here:
//   - Prevents duplication across layers
//   - Makes it easy to swap implementations
//     (e.g. swap the ASCII heatmap for a real plotting crate)
//   - Keeps other layers focused on their core logic
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Training metrics CSV logger
pub mod metrics;

/// ASCII heatmaps, loss-curve bars, and table CSV export
pub mod visualize;

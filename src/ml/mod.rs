// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains the model math and the training loop.
//
// What's in this layer:
//
//   model.rs     — The two-factor autoregressive model
//                  Implements p(x0, x1) = p(x0) * p(x1 | x0):
//                  • a learnable length-d logit vector for p(x0)
//                  • a 3-hidden-layer ReLU network for p(x1 | x0),
//                    fed a one-hot encoding of x0
//                  • negative log-likelihood of a batch
//                  • the full d × d joint probability table
//                  Also defines the DensityModel trait so the
//                  trainer never depends on this concrete model.
//
//   trainer.rs   — The training loop
//                  Handles forward pass, loss computation,
//                  backward pass, Adam update, and per-epoch
//                  evaluation on the held-out test set
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)
//            Kingma & Ba (2015) Adam

/// The DensityModel trait and the two-factor model
pub mod model;

/// Full training loop with per-epoch test evaluation
pub mod trainer;

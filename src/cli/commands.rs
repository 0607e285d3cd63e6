// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `train` and `inspect`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// The defaults below are the demo's canonical constants:
// 10000/2500 samples, 25 categories, batch 128, 20 epochs,
// learning rate 1e-3, seed 1.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use crate::application::train_use_case::TrainConfig;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full demo: sample data, fit the model, render outputs
    Train(TrainArgs),

    /// Sample the synthetic dataset and render it without training
    Inspect(InspectArgs),
}

/// All arguments for the `train` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Number of training samples to draw from the synthetic distribution
    #[arg(long, default_value_t = 10_000)]
    pub n_train: usize,

    /// Number of held-out test samples
    #[arg(long, default_value_t = 2_500)]
    pub n_test: usize,

    /// Number of categories per component — both x0 and x1 live in [0, d)
    #[arg(long, default_value_t = 25)]
    pub num_categories: usize,

    /// Number of samples processed together in one forward pass
    #[arg(long, default_value_t = 128)]
    pub batch_size: usize,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 20)]
    pub epochs: usize,

    /// How fast the model learns — too high causes instability,
    /// too low causes slow convergence
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Width of the three hidden layers in the conditional network
    #[arg(long, default_value_t = 200)]
    pub hidden_size: usize,

    /// Random seed — fixes the synthetic dataset, the shuffles,
    /// and the parameter initialisation for reproducible runs
    #[arg(long, default_value_t = 1)]
    pub seed: u64,

    /// Directory for the run record (config, metrics CSV, joint table CSV)
    #[arg(long, default_value = "runs/demo")]
    pub out_dir: String,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            n_train:        a.n_train,
            n_test:         a.n_test,
            num_categories: a.num_categories,
            batch_size:     a.batch_size,
            epochs:         a.epochs,
            lr:             a.lr,
            hidden_size:    a.hidden_size,
            seed:           a.seed,
            out_dir:        a.out_dir,
        }
    }
}

/// All arguments for the `inspect` command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// How many samples to draw for the visualisation
    #[arg(long, default_value_t = 10_000)]
    pub n_samples: usize,

    /// Number of categories per component
    #[arg(long, default_value_t = 25)]
    pub num_categories: usize,

    /// Random seed for the synthetic dataset
    #[arg(long, default_value_t = 1)]
    pub seed: u64,
}

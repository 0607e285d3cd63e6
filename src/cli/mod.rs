// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `train`   — runs the full demo: sample data, fit the
//                  model, render the learned joint distribution
//   2. `inspect` — samples the synthetic dataset and renders
//                  the raw data as a heatmap, without training
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, TrainArgs, InspectArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "autoreg2d",
    version = "0.1.0",
    about = "Fit a two-factor autoregressive model to synthetic 2-D discrete data."
)]
pub struct Cli {
    /// The subcommand to run (train or inspect)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)   => Self::run_train(args),
            Commands::Inspect(args) => Self::run_inspect(args),
        }
    }

    /// Handles the `train` subcommand.
    /// Converts CLI args into a TrainConfig and hands off to Layer 2.
    fn run_train(args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        tracing::info!(
            "Starting demo: {} categories, {} train / {} test samples",
            args.num_categories, args.n_train, args.n_test,
        );

        // Convert CLI args → application config (separates presentation from domain)
        let use_case = TrainUseCase::new(args.into());
        use_case.execute()?;

        println!("Demo complete. Outputs written to the run directory.");
        Ok(())
    }

    /// Handles the `inspect` subcommand.
    /// Samples the dataset and prints the raw-data heatmap.
    fn run_inspect(args: InspectArgs) -> Result<()> {
        use crate::application::inspect_use_case::InspectUseCase;

        let use_case = InspectUseCase::new(
            args.n_samples,
            args.num_categories,
            args.seed,
        );
        use_case.execute()
    }
}

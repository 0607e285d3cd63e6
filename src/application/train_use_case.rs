// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full demo pipeline in order:
//
//   Step 1: Sample the synthetic dataset  (Layer 4 - data)
//   Step 2: Render the raw data           (Layer 6 - infra)
//   Step 3: Split train/test              (Layer 4 - data)
//   Step 4: Build datasets                (Layer 4 - data)
//   Step 5: Save the run config           (Layer 6 - infra)
//   Step 6: Run the training loop         (Layer 5 - ml)
//   Step 7: Log per-epoch metrics         (Layer 6 - infra)
//   Step 8: Render joint table + curves   (Layer 6 - infra)
//
// Reference: Rust Book §13 (Iterators and Closures)
//            Burn Book §5 (Training)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::PairDataset,
    splitter::split_train_test,
    synthetic::SyntheticSource,
};
use crate::domain::traits::PairSource;
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::infra::visualize;
use crate::ml::trainer::run_training;

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for a demo run.
// Serialisable so it can be saved to disk as a permanent record
// of what produced a given set of outputs. The
// #[derive(Serialize, Deserialize)] macros from serde handle
// reading/writing this struct to JSON automatically.
//
// Note there is no global state anywhere: the seed and every
// other knob travel inside this struct, and the tensor device
// is created where it is needed (Layer 5) from these values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub n_train:        usize,
    pub n_test:         usize,
    pub num_categories: usize,
    pub batch_size:     usize,
    pub epochs:         usize,
    pub lr:             f64,
    pub hidden_size:    usize,
    pub seed:           u64,
    pub out_dir:        String,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            n_train:        10_000,
            n_test:         2_500,
            num_categories: 25,
            batch_size:     128,
            epochs:         20,
            lr:             1e-3,
            hidden_size:    200,
            seed:           1,
            out_dir:        "runs/demo".to_string(),
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
// Owns the config and runs the full demo pipeline.
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    /// Create a new TrainUseCase with the given configuration
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full demo pipeline end to end
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;
        let d   = cfg.num_categories;

        // ── Step 1: Sample the synthetic dataset ─────────────────────────────
        // SyntheticSource draws (x0, x1) pairs from a fixed two-mode
        // ground-truth distribution over the d × d grid.
        tracing::info!(
            "Sampling {} pairs from the synthetic distribution (d = {})",
            cfg.n_train + cfg.n_test, d,
        );
        let source  = SyntheticSource::new(d, cfg.n_train + cfg.n_test, cfg.seed);
        let samples = source.generate()?;

        // ── Step 2: Render the raw data ──────────────────────────────────────
        // A count grid over the d × d lattice is the discrete analogue of
        // the scatter plot the demo opens with.
        let counts = visualize::count_grid(&samples, d);
        println!("Raw data ({} samples):", samples.len());
        println!("{}", visualize::render_heatmap(&counts, d));

        // ── Step 3: Train / test split ───────────────────────────────────────
        // Shuffle (seeded) and split so the model is evaluated on data
        // it never trained on.
        let (train_samples, test_samples) =
            split_train_test(samples, cfg.n_train, cfg.seed);
        tracing::info!(
            "Split: {} train, {} test",
            train_samples.len(),
            test_samples.len(),
        );

        // ── Step 4: Build Burn datasets ──────────────────────────────────────
        // PairDataset implements Burn's Dataset trait so the DataLoader
        // can call .get(index) and .len() on it
        let train_dataset = PairDataset::new(train_samples);
        let test_dataset  = PairDataset::new(test_samples);

        // ── Step 5: Save the run config ──────────────────────────────────────
        // A permanent record of the hyperparameters that produced this run.
        std::fs::create_dir_all(&cfg.out_dir)
            .with_context(|| format!("Cannot create run directory '{}'", cfg.out_dir))?;
        let config_path = std::path::Path::new(&cfg.out_dir).join("run_config.json");
        std::fs::write(&config_path, serde_json::to_string_pretty(cfg)?)
            .with_context(|| format!("Cannot write config to '{}'", config_path.display()))?;
        tracing::debug!("Saved run config to '{}'", config_path.display());

        // ── Step 6: Run the training loop (Layer 5) ──────────────────────────
        let (joint_table, history) = run_training(cfg, train_dataset, test_dataset)?;

        // ── Step 7: Log per-epoch metrics to CSV ─────────────────────────────
        let logger = MetricsLogger::new(&cfg.out_dir)?;
        let mut best = f64::INFINITY;
        let mut best_epoch = 0;
        for (i, (&train_loss, &test_loss)) in history
            .train_losses
            .iter()
            .zip(history.test_losses.iter())
            .enumerate()
        {
            let m = EpochMetrics::new(i + 1, train_loss, test_loss);
            if m.is_improvement(best) {
                best       = m.test_loss;
                best_epoch = m.epoch;
            }
            logger.log(&m)?;
        }
        tracing::info!("Best test loss {:.4} at epoch {}", best, best_epoch);

        // ── Step 8: Render the joint table and the loss curves ───────────────
        println!("\nLearned joint distribution p(x0, x1):");
        println!("{}", visualize::render_heatmap(&joint_table, d));
        println!("{}", visualize::render_train_curves(
            &history.train_losses,
            &history.test_losses,
        ));

        let table_path = std::path::Path::new(&cfg.out_dir).join("joint_dist.csv");
        visualize::save_table_csv(&table_path, &joint_table, d)?;
        tracing::info!("Saved joint table to '{}'", table_path.display());

        Ok(())
    }
}

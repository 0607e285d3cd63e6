// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Full train + test loop using Burn's DataLoader and Adam.
//
// Key Burn insight:
//   - Training uses DemoBackend (Autodiff<NdArray>) for gradients
//   - model.valid() returns the model on the inner backend,
//     so evaluation runs with no gradient tracking at all
//   - The test batcher must also use the inner backend
//
// The loop is generic over DensityModel, not over this crate's
// concrete model — swap in any type that can score a batch and
// materialise its joint table and the loop works unchanged.
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::{PairBatch, PairBatcher}, dataset::PairDataset};
use crate::ml::model::{DensityModel, PairAutoregConfig, PairAutoregModel};

type DemoBackend      = burn::backend::Autodiff<burn::backend::NdArray<f32>>;
type DemoInnerBackend = burn::backend::NdArray<f32>;

/// How many trailing batch losses the reported training loss
/// averages over. A smoothing heuristic, not a formal metric —
/// early batches in an epoch reflect a much worse model than
/// late ones, so a full-epoch average would lag behind.
const TRAIN_LOSS_WINDOW: usize = 50;

/// Per-epoch loss records for the whole run.
#[derive(Debug, Clone)]
pub struct TrainingHistory {
    /// Smoothed training loss per epoch (mean of the last
    /// TRAIN_LOSS_WINDOW batch losses)
    pub train_losses: Vec<f64>,

    /// True per-sample test loss per epoch
    pub test_losses: Vec<f64>,
}

/// Build the model, run the epoch loop, and return the learned
/// joint table (flattened row-major, row = x0) plus the loss history.
pub fn run_training(
    cfg:           &TrainConfig,
    train_dataset: PairDataset,
    test_dataset:  PairDataset,
) -> Result<(Vec<f32>, TrainingHistory)> {
    let device = burn::backend::ndarray::NdArrayDevice::default();

    // Seed the backend before the model init so parameter
    // initialisation is reproducible too.
    DemoBackend::seed(cfg.seed);

    let model: PairAutoregModel<DemoBackend> = PairAutoregConfig::new(cfg.num_categories)
        .with_hidden_size(cfg.hidden_size)
        .init(&device);
    tracing::info!(
        "Model ready: d={}, hidden={}",
        cfg.num_categories, cfg.hidden_size,
    );

    let (model, history) = train_loop(cfg, model, train_dataset, test_dataset, device)?;

    // Read the joint table back on the inner backend — a derived
    // output, recomputed from the final parameters.
    let table = model.valid().joint_distribution();
    let flat: Vec<f32> = table
        .into_data()
        .to_vec()
        .map_err(|e| anyhow::anyhow!("Cannot read back the joint table: {e:?}"))?;

    Ok((flat, history))
}

/// The epoch loop: train, evaluate, record, repeat.
///
/// Generic over the model so any DensityModel can be trained —
/// the loop only ever calls nll() and the optimizer.
pub fn train_loop<B, M>(
    cfg:           &TrainConfig,
    mut model:     M,
    train_dataset: PairDataset,
    test_dataset:  PairDataset,
    device:        B::Device,
) -> Result<(M, TrainingHistory)>
where
    B: AutodiffBackend,
    M: DensityModel<B> + AutodiffModule<B>,
    M::InnerModule: DensityModel<B::InnerBackend>,
{
    // ── Adam optimiser ────────────────────────────────────────────────────────
    // m = β1*m + (1-β1)*g        (mean)
    // v = β2*v + (1-β2)*g²       (variance)
    // θ = θ - lr * m / (√v + ε)  (update)
    let optim_cfg = AdamConfig::new().with_epsilon(1e-8);
    let mut optim = optim_cfg.init();

    // ── Training data loader (AutodiffBackend, shuffled) ──────────────────────
    let train_batcher = PairBatcher::<B>::new(device.clone());
    let train_loader  = DataLoaderBuilder::new(train_batcher)
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .num_workers(1)
        .build(train_dataset);

    // ── Test data loader (InnerBackend — no autodiff overhead) ────────────────
    let test_batcher = PairBatcher::<B::InnerBackend>::new(device.clone());
    let test_loader  = DataLoaderBuilder::new(test_batcher)
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(test_dataset);

    let mut train_losses = Vec::with_capacity(cfg.epochs);
    let mut test_losses  = Vec::with_capacity(cfg.epochs);

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {

        // ── Training phase ────────────────────────────────────────────────────
        let mut batch_losses = Vec::new();

        for batch in train_loader.iter() {
            let loss = model.nll(batch.pairs);
            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();

            // Backward pass + Adam update. step() consumes the fresh
            // gradients, so there is no separate zero-grad call.
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);

            batch_losses.push(loss_val);
        }

        let train_loss = smoothed_train_loss(&batch_losses);

        // ── Test phase ────────────────────────────────────────────────────────
        // model.valid() moves to the inner backend: no gradient
        // tracking, evaluation only.
        let model_valid = model.valid();
        let test_loss   = eval_epoch(&model_valid, test_loader.iter());

        train_losses.push(train_loss);
        test_losses.push(test_loss);

        println!(
            "Epoch {:>3}/{} | train_loss={:.4} | test_loss={:.4}",
            epoch, cfg.epochs, train_loss, test_loss,
        );
    }

    tracing::info!("Training complete!");
    Ok((model, TrainingHistory { train_losses, test_losses }))
}

/// Mean of the last TRAIN_LOSS_WINDOW batch losses (all of them
/// when an epoch has fewer batches).
fn smoothed_train_loss(batch_losses: &[f64]) -> f64 {
    if batch_losses.is_empty() {
        return f64::NAN;
    }
    let start = batch_losses.len().saturating_sub(TRAIN_LOSS_WINDOW);
    let tail  = &batch_losses[start..];
    tail.iter().sum::<f64>() / tail.len() as f64
}

/// One full evaluation pass: the true per-sample average loss.
///
/// Each batch's mean loss is weighted by its size before the final
/// division, so the result is identical no matter how the test set
/// is batched — unlike the smoothed training number.
pub fn eval_epoch<B2, M2>(
    model:   &M2,
    batches: impl Iterator<Item = PairBatch<B2>>,
) -> f64
where
    B2: Backend,
    M2: DensityModel<B2>,
{
    let mut total_loss    = 0.0f64;
    let mut total_samples = 0usize;

    for batch in batches {
        let [batch_size, _] = batch.pairs.dims();
        let loss: f64 = model.nll(batch.pairs).into_scalar().elem::<f64>();

        total_loss    += loss * batch_size as f64;
        total_samples += batch_size;
    }

    if total_samples > 0 {
        total_loss / total_samples as f64
    } else {
        f64::NAN
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample::Sample;

    fn small_config(d: usize, hidden: usize, epochs: usize, lr: f64, batch: usize) -> TrainConfig {
        TrainConfig {
            n_train:        0, // unused by train_loop — sizes come from the datasets
            n_test:         0,
            num_categories: d,
            batch_size:     batch,
            epochs,
            lr,
            hidden_size:    hidden,
            seed:           1,
            out_dir:        String::new(),
        }
    }

    fn init_model(d: usize, hidden: usize) -> PairAutoregModel<DemoBackend> {
        let device = burn::backend::ndarray::NdArrayDevice::default();
        PairAutoregConfig::new(d).with_hidden_size(hidden).init(&device)
    }

    #[test]
    fn test_smoothed_train_loss_window() {
        // Fewer losses than the window: plain mean
        assert!((smoothed_train_loss(&[1.0, 2.0, 3.0]) - 2.0).abs() < 1e-12);

        // More losses than the window: only the last 50 count
        let mut losses = vec![100.0; 30];
        losses.extend(std::iter::repeat(2.0).take(50));
        assert!((smoothed_train_loss(&losses) - 2.0).abs() < 1e-12);

        assert!(smoothed_train_loss(&[]).is_nan());
    }

    #[test]
    fn test_eval_loss_independent_of_batch_size() {
        let d       = 4;
        let device  = burn::backend::ndarray::NdArrayDevice::default();
        let model   = init_model(d, 8).valid();
        let samples: Vec<Sample> = (0..10)
            .map(|i| Sample::new(i % d, (i * 3) % d))
            .collect();

        let eval_with = |batch_size: usize| -> f64 {
            let batcher = PairBatcher::<DemoInnerBackend>::new(device.clone());
            let loader  = DataLoaderBuilder::new(batcher)
                .batch_size(batch_size)
                .num_workers(1)
                .build(PairDataset::new(samples.clone()));
            eval_epoch(&model, loader.iter())
        };

        let loss_small = eval_with(3);
        let loss_full  = eval_with(10);
        assert!(
            (loss_small - loss_full).abs() < 1e-5,
            "eval loss must not depend on batching: {loss_small} vs {loss_full}"
        );
    }

    #[test]
    fn test_loss_decreases_on_learnable_data() {
        // x1 is a deterministic function of x0, so the conditional
        // factor can drive its loss towards zero. After 20 epochs the
        // test loss must be below the first epoch's.
        let d = 5;
        let make = |n: usize, offset: usize| -> Vec<Sample> {
            (0..n).map(|i| {
                let x0 = (i + offset) % d;
                Sample::new(x0, (x0 + 2) % d)
            }).collect()
        };

        let cfg    = small_config(d, 32, 20, 1e-2, 32);
        let device = burn::backend::ndarray::NdArrayDevice::default();
        let model  = init_model(d, 32);

        let (_, history) = train_loop(
            &cfg,
            model,
            PairDataset::new(make(250, 0)),
            PairDataset::new(make(100, 1)),
            device,
        )
        .unwrap();

        let first = *history.test_losses.first().unwrap();
        let last  = *history.test_losses.last().unwrap();
        assert!(
            last < first,
            "test loss should decrease: first={first}, last={last}"
        );
    }

    #[test]
    fn test_joint_table_concentrates_on_diagonal() {
        // Only (0,0) and (1,1) ever occur, so a trained model must put
        // nearly all its mass on those two cells.
        let d = 2;
        let samples: Vec<Sample> = (0..128)
            .map(|i| if i % 2 == 0 { Sample::new(0, 0) } else { Sample::new(1, 1) })
            .collect();

        let cfg    = small_config(d, 16, 30, 5e-2, 32);
        let device = burn::backend::ndarray::NdArrayDevice::default();
        let model  = init_model(d, 16);

        let (model, _) = train_loop(
            &cfg,
            model,
            PairDataset::new(samples.clone()),
            PairDataset::new(samples),
            device,
        )
        .unwrap();

        let table: Vec<f32> = model
            .valid()
            .joint_distribution()
            .into_data()
            .to_vec()
            .unwrap();

        // Row-major [d, d]: diagonal = indices 0 and 3
        let diagonal_mass = table[0] + table[3];
        assert!(
            diagonal_mass > 0.8,
            "expected mass on the diagonal, table = {table:?}"
        );
    }
}

use burn::{
    module::Param,
    nn::{loss::CrossEntropyLossConfig, Linear, LinearConfig},
    prelude::*,
    tensor::activation::{log_softmax, relu},
};

// ─── DensityModel ─────────────────────────────────────────────────────────────
/// The contract between the training driver and any density model:
/// score a batch, and materialise the joint distribution.
///
/// The driver (trainer.rs) is generic over this trait, so a
/// different factorisation — or a flat d² lookup table — can be
/// swapped in without touching the loop.
pub trait DensityModel<B: Backend> {
    /// Negative log-likelihood of a batch of pairs, averaged over
    /// the batch. Input shape: [batch_size, 2]. Output: a scalar
    /// tensor, differentiable with respect to all parameters.
    fn nll(&self, pairs: Tensor<B, 2, Int>) -> Tensor<B, 1>;

    /// The full d × d joint probability table. Row i is x0 = i,
    /// column j is x1 = j. Nonnegative, sums to 1. Recomputed from
    /// the current parameters on every call, never cached.
    fn joint_distribution(&self) -> Tensor<B, 2>;
}

// ─── One-hot encoding ─────────────────────────────────────────────────────────
/// Encode a batch of class indices as one-hot rows.
///
/// Input shape: `[n]` (Int), output shape: `[n, num_classes]` (Float),
/// with a 1.0 at each row's index and 0.0 elsewhere.
///
/// Built by comparing each index against an arange of all classes —
/// a broadcasted equality instead of a scatter, which keeps it a
/// plain elementwise op.
pub fn one_hot<B: Backend>(indices: Tensor<B, 1, Int>, num_classes: usize) -> Tensor<B, 2> {
    let [n] = indices.dims();
    let device = indices.device();

    let classes = Tensor::<B, 1, Int>::arange(0..num_classes as i64, &device)
        .unsqueeze::<2>()            // [1, num_classes]
        .expand([n, num_classes]);   // [n, num_classes]

    let indices = indices
        .unsqueeze_dim::<2>(1)       // [n, 1]
        .expand([n, num_classes]);   // [n, num_classes]

    indices.equal(classes).float()
}

// ─── Model configuration ──────────────────────────────────────────────────────
/// Configuration for the two-factor autoregressive model.
///
/// The conditional network's 3 × 200 shape is the demo's
/// hyperparameter, not a structural requirement — any function
/// from R^d to R^d with enough capacity would conform.
#[derive(Config, Debug)]
pub struct PairAutoregConfig {
    /// Number of categories d — both components live in [0, d)
    pub num_categories: usize,

    /// Width of the three hidden layers in the conditional network
    #[config(default = 200)]
    pub hidden_size: usize,
}

impl PairAutoregConfig {
    /// Initialise a PairAutoregModel with the given configuration.
    ///
    /// The unconditional logits start at zero (a uniform p(x0));
    /// the conditional network uses Burn's default Linear init.
    pub fn init<B: Backend>(&self, device: &B::Device) -> PairAutoregModel<B> {
        let d = self.num_categories;
        let h = self.hidden_size;
        PairAutoregModel {
            logits_x0: Param::from_tensor(Tensor::zeros([d], device)),
            cond_x1:   CondNet {
                linear1: LinearConfig::new(d, h).init(device),
                linear2: LinearConfig::new(h, h).init(device),
                linear3: LinearConfig::new(h, h).init(device),
                linear4: LinearConfig::new(h, d).init(device),
            },
            num_categories: d,
        }
    }
}

// ─── Conditional network ──────────────────────────────────────────────────────
/// The conditional scorer for p(x1 | x0): a feed-forward network
/// from a one-hot x0 encoding to unnormalised x1 scores.
///
/// ```text
/// (batch, d)
///   → Linear(d→h) → ReLU
///   → Linear(h→h) → ReLU
///   → Linear(h→h) → ReLU
///   → Linear(h→d)
///   → logits: (batch, d)
/// ```
#[derive(Module, Debug)]
pub struct CondNet<B: Backend> {
    linear1: Linear<B>,
    linear2: Linear<B>,
    linear3: Linear<B>,
    linear4: Linear<B>,
}

impl<B: Backend> CondNet<B> {
    /// Forward pass: one-hot x0 rows in, x1 logits out.
    pub fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = relu(self.linear1.forward(x));
        let x = relu(self.linear2.forward(x));
        let x = relu(self.linear3.forward(x));
        self.linear4.forward(x)
    }
}

// ─── The two-factor model ─────────────────────────────────────────────────────
/// Autoregressive model of a pair of discrete variables:
///
///   p(x0, x1) = p(x0) * p(x1 | x0)
///
/// p(x0) is softmax over a learnable length-d vector; p(x1 | x0)
/// is softmax over the conditional network's output for the
/// one-hot encoding of x0.
#[derive(Module, Debug)]
pub struct PairAutoregModel<B: Backend> {
    /// Unconstrained logits for the unconditional factor p(x0)
    pub logits_x0: Param<Tensor<B, 1>>,

    /// Conditional scorer for p(x1 | x0)
    pub cond_x1: CondNet<B>,

    /// Number of categories d
    pub num_categories: usize,
}

impl<B: Backend> DensityModel<B> for PairAutoregModel<B> {
    /// nll = -mean(log p(x0)) - mean(log p(x1 | x0))
    ///
    /// Both terms are softmax cross-entropies with mean reduction,
    /// so the result is always a finite, non-negative scalar for
    /// in-range labels. Out-of-range labels are a caller error.
    fn nll(&self, pairs: Tensor<B, 2, Int>) -> Tensor<B, 1> {
        let [batch_size, _] = pairs.dims();
        let device = pairs.device();
        let d = self.num_categories;

        // Split the pair columns: x0 = column 0, x1 = column 1
        let x0 = pairs.clone()
            .slice([0..batch_size, 0..1])
            .reshape([batch_size]);
        let x1 = pairs
            .slice([0..batch_size, 1..2])
            .reshape([batch_size]);

        let ce = CrossEntropyLossConfig::new().init(&device);

        // Loss for x0 — the unconditional logits do not depend on the
        // input, so the same length-d vector is broadcast to every row
        let logits_x0 = self.logits_x0.val()
            .unsqueeze::<2>()
            .expand([batch_size, d]);
        let nll_x0 = ce.forward(logits_x0, x0.clone());

        // Loss for x1 | x0
        let x0_onehot = one_hot(x0, d);
        let logits_x1 = self.cond_x1.forward(x0_onehot);
        let nll_x1 = ce.forward(logits_x1, x1);

        nll_x0 + nll_x1
    }

    /// log p(x0=i, x1=j) = log p(x0=i) + log p(x1=j | x0=i),
    /// exponentiated into a d × d probability table.
    ///
    /// The rows are built from an ascending arange, so row i always
    /// corresponds to x0 = i — the one mapping every consumer of the
    /// table relies on.
    fn joint_distribution(&self) -> Tensor<B, 2> {
        let d = self.num_categories;
        let device = self.logits_x0.val().device();

        // All d one-hot encodings of x0, row i encoding x0 = i
        let all_x0 = Tensor::<B, 1, Int>::arange(0..d as i64, &device);
        let onehot = one_hot(all_x0, d);

        // log p(x1 | x0 = i) for every row i: [d, d]
        let log_p_x1 = log_softmax(self.cond_x1.forward(onehot), 1);

        // log p(x0 = i), broadcast down the columns: [d, 1]
        let log_p_x0 = log_softmax(self.logits_x0.val(), 0)
            .unsqueeze_dim::<2>(1);

        (log_p_x0 + log_p_x1).exp()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    fn test_model(d: usize, hidden: usize) -> PairAutoregModel<TestBackend> {
        let device = Default::default();
        PairAutoregConfig::new(d)
            .with_hidden_size(hidden)
            .init(&device)
    }

    #[test]
    fn test_one_hot_rows() {
        let device  = Default::default();
        let indices = Tensor::<TestBackend, 1, Int>::from_ints([0, 2, 1], &device);
        let encoded = one_hot(indices, 3);

        assert_eq!(encoded.dims(), [3, 3]);
        let values: Vec<f32> = encoded.into_data().to_vec().unwrap();
        assert_eq!(values, vec![
            1.0, 0.0, 0.0,
            0.0, 0.0, 1.0,
            0.0, 1.0, 0.0,
        ]);
    }

    #[test]
    fn test_nll_is_finite_and_nonnegative() {
        let device = Default::default();
        let model  = test_model(5, 16);
        let pairs  = Tensor::<TestBackend, 1, Int>::from_ints(
            [0, 4, 2, 2, 4, 0, 1, 3], &device
        ).reshape([4, 2]);

        let nll: f32 = model.nll(pairs).into_scalar().elem();
        assert!(nll.is_finite(), "nll should be finite, got {nll}");
        assert!(nll >= 0.0, "cross-entropy sum should be non-negative, got {nll}");
    }

    #[test]
    fn test_untrained_nll_is_near_uniform() {
        // Zero logits for x0 give exactly -log(1/d) for the first term,
        // so the total must be at least that much minus a small slack
        // for whatever the random conditional net produces.
        let d      = 8;
        let device = Default::default();
        let model  = test_model(d, 16);
        let pairs  = Tensor::<TestBackend, 1, Int>::from_ints(
            [3, 5, 7, 0], &device
        ).reshape([2, 2]);

        let nll: f32 = model.nll(pairs).into_scalar().elem();
        let uniform  = (d as f32).ln();
        assert!(
            nll > uniform * 0.5,
            "untrained nll {nll} implausibly below uniform baseline {uniform}"
        );
    }

    #[test]
    fn test_joint_table_sums_to_one() {
        let model = test_model(6, 16);
        let table = model.joint_distribution();

        assert_eq!(table.dims(), [6, 6]);
        let total: f32 = table.sum().into_scalar().elem();
        assert!(
            (total - 1.0).abs() < 1e-4,
            "joint table should sum to 1, got {total}"
        );
    }

    #[test]
    fn test_joint_table_entries_are_probabilities() {
        let model = test_model(4, 8);
        let values: Vec<f32> = model
            .joint_distribution()
            .into_data()
            .to_vec()
            .unwrap();

        assert!(values.iter().all(|&p| (0.0..=1.0).contains(&p)));
    }

    #[test]
    fn test_joint_rows_match_unconditional_marginal() {
        // Row i of the joint sums to p(x0 = i); with zero logits that
        // marginal is uniform regardless of the conditional net.
        let d     = 5;
        let model = test_model(d, 8);
        let row_sums: Vec<f32> = model
            .joint_distribution()
            .sum_dim(1)
            .into_data()
            .to_vec()
            .unwrap();

        for (i, &s) in row_sums.iter().enumerate() {
            assert!(
                (s - 1.0 / d as f32).abs() < 1e-4,
                "row {i} sums to {s}, expected {}",
                1.0 / d as f32
            );
        }
    }
}

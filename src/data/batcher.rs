// ============================================================
// Layer 4 — Pair Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec<Sample>
// into tensors ready for the model.
//
// What is a Batcher?
//   A Batcher takes a list of individual samples and stacks
//   them into a single batch tensor. Tensor backends are most
//   efficient when processing many samples at once.
//
// How batching works here:
//   Input:  Vec of N Samples, each an (x0, x1) pair
//   Output: PairBatch with an Int tensor of shape [N, 2]
//
//   We flatten all pairs into one long Vec, then reshape:
//   [s1_x0, s1_x1, s2_x0, s2_x1, ..., sN_x1] → [N, 2]
//
// The model splits the two columns back apart; keeping the
// pair together in one tensor mirrors how the sample is one
// observation, not two.
//
// Reference: Burn Book §4 (Batcher)
//            Rust Book §8 (Vectors)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::domain::sample::Sample;

// ─── PairBatch ────────────────────────────────────────────────────────────────
/// A batch of pair samples ready for the model forward pass.
///
/// B is the Burn Backend (e.g. NdArray, Wgpu) —
/// generic so the same batcher works on any device.
#[derive(Debug, Clone)]
pub struct PairBatch<B: Backend> {
    /// The observations — shape: [batch_size, 2]
    /// Column 0 holds x0, column 1 holds x1
    pub pairs: Tensor<B, 2, Int>,
}

// ─── PairBatcher ──────────────────────────────────────────────────────────────
/// The batcher struct — holds the target device so tensors
/// are created on the correct backend device.
#[derive(Clone, Debug)]
pub struct PairBatcher<B: Backend> {
    /// The device to create tensors on
    pub device: B::Device,
}

impl<B: Backend> PairBatcher<B> {
    /// Create a new batcher for the given device
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

// ─── Burn Batcher Trait Implementation ────────────────────────────────────────
// This is what makes PairBatcher work with Burn's DataLoader.
// The DataLoader calls .batch(items) with each mini-batch of samples.
impl<B: Backend> Batcher<Sample, PairBatch<B>> for PairBatcher<B> {
    /// Convert a Vec of Samples into a single PairBatch.
    ///
    /// Steps:
    ///   1. Flatten all (x0, x1) pairs into one Vec<i32>
    ///   2. Create a 1D tensor from the flat Vec
    ///   3. Reshape to [batch_size, 2]
    fn batch(&self, items: Vec<Sample>) -> PairBatch<B> {
        let batch_size = items.len();

        // Vec<Sample> → Vec<i32> (Burn uses i32 for Int tensors)
        let flat: Vec<i32> = items
            .iter()
            .flat_map(|s| [s.x0 as i32, s.x1 as i32])
            .collect();

        let pairs = Tensor::<B, 1, Int>::from_ints(
            flat.as_slice(), &self.device
        ).reshape([batch_size, 2]);

        PairBatch { pairs }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_batch_shape() {
        let device  = Default::default();
        let batcher = PairBatcher::<TestBackend>::new(device);
        let items   = vec![Sample::new(0, 1), Sample::new(2, 3), Sample::new(4, 4)];

        let batch = batcher.batch(items);
        assert_eq!(batch.pairs.dims(), [3, 2]);
    }

    #[test]
    fn test_batch_preserves_values() {
        let device  = Default::default();
        let batcher = PairBatcher::<TestBackend>::new(device);
        let items   = vec![Sample::new(5, 7), Sample::new(1, 0)];

        let batch = batcher.batch(items);
        // NdArray stores Int tensors as i64
        let values: Vec<i64> = batch
            .pairs
            .into_data()
            .to_vec()
            .unwrap();
        assert_eq!(values, vec![5, 7, 1, 0]);
    }
}

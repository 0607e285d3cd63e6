// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Randomly shuffles samples and splits them into two sets:
//   - Training set: used to update model weights
//   - Test set:     used to measure the loss on unseen data
//
// Why do we need a test set?
//   If we only measured loss on the training data, the model
//   could memorise the samples without actually learning the
//   distribution. The test loss tells us if the model
//   generalises to data it has never seen before.
//
// Why shuffle before splitting?
//   The samples are i.i.d. here so order carries no signal,
//   but shuffling keeps the split honest if a future source
//   produces ordered data (e.g. pairs recorded over time).
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom
// which is the standard unbiased shuffle algorithm. The RNG
// is seeded so the split is reproducible run to run.
//
// Reference: Rust Book §8 (Vectors)
//            rand crate documentation

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Randomly shuffle `samples` and split into (train, test).
///
/// # Arguments
/// * `samples` - All available samples (consumed by this function)
/// * `n_train` - Number of samples for the training set
/// * `seed`    - Seed for the shuffle RNG
///
/// # Returns
/// A tuple (train_samples, test_samples)
pub fn split_train_test<T>(mut samples: Vec<T>, n_train: usize, seed: u64) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);

    // Fisher-Yates shuffle — every permutation is equally likely
    samples.shuffle(&mut rng);

    // Clamp to valid range to avoid panics on tiny datasets
    let split_at = n_train.min(samples.len());

    // split_off(n) removes elements [n..] from the Vec and returns them
    // After this: samples = [0..split_at], test = [split_at..]
    let test = samples.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} test",
        samples.len(),
        test.len(),
    );

    (samples, test)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let (train, test)     = split_train_test(items, 80, 0);
        assert_eq!(train.len(), 80);
        assert_eq!(test.len(),  20);
    }

    #[test]
    fn test_all_items_preserved() {
        // No items should be lost in the split
        let items: Vec<usize> = (0..50).collect();
        let (mut train, test) = split_train_test(items, 35, 0);
        assert_eq!(train.len() + test.len(), 50);

        train.extend(test);
        train.sort_unstable();
        assert_eq!(train, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_dataset() {
        let items: Vec<usize> = Vec::new();
        let (train, test)     = split_train_test(items, 10, 0);
        assert!(train.is_empty());
        assert!(test.is_empty());
    }

    #[test]
    fn test_oversized_train_request() {
        // Asking for more training samples than exist must not panic
        let items: Vec<usize> = (0..10).collect();
        let (train, test)     = split_train_test(items, 100, 0);
        assert_eq!(train.len(), 10);
        assert!(test.is_empty());
    }

    #[test]
    fn test_seeded_split_is_reproducible() {
        let a = split_train_test((0..30).collect::<Vec<_>>(), 20, 9);
        let b = split_train_test((0..30).collect::<Vec<_>>(), 20, 9);
        assert_eq!(a, b);
    }
}

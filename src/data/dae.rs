use crate::data::MatrixItem;
use burn::data::dataset::Dataset;
use ndarray::Array2;
use rand::Rng;
use rand::rngs::StdRng;
use std::sync::{Mutex, PoisonError};

/// Swap noise for denoising autoencoders.
///
/// Each feature of a row is replaced, with probability `prob`, by the value that
/// a uniformly drawn row (possibly the same row) holds at that feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapNoise {
    prob: f64,
}

impl SwapNoise {
    /// # Panics
    /// If `prob` is outside `[0, 1]`.
    pub fn new(prob: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&prob),
            "corruption probability must be in [0, 1], got {prob}"
        );
        Self { prob }
    }

    pub fn prob(&self) -> f64 {
        self.prob
    }

    /// Corrupts `row` of `x`, drawing donor rows from all rows of `x`.
    ///
    /// Donor rows are drawn independently per feature, so they may repeat.
    pub fn corrupt<R: Rng>(&self, x: &Array2<f32>, row: usize, rng: &mut R) -> Vec<f32> {
        let n_rows = x.nrows();
        x.row(row)
            .iter()
            .enumerate()
            .map(|(feature, &value)| {
                // both draws always happen so the stream doesn't depend on prob
                let donor = rng.random_range(0..n_rows);
                let masked = rng.random::<f64>() < self.prob;
                if masked { x[[donor, feature]] } else { value }
            })
            .collect()
    }
}

/// Yields `(corrupted_row, original_row)` pairs for denoising autoencoder training.
///
/// A fresh corruption is drawn on every [`Dataset::get`], so the same index
/// yields different inputs across epochs.
pub struct DaeDataset {
    x: Array2<f32>,
    noise: SwapNoise,
    rng: Mutex<StdRng>,
}

impl DaeDataset {
    pub fn new(x: Array2<f32>, corruption_prob: f64, rng: StdRng) -> Self {
        Self {
            x,
            noise: SwapNoise::new(corruption_prob),
            rng: Mutex::new(rng),
        }
    }

    pub fn corruption_prob(&self) -> f64 {
        self.noise.prob()
    }
}

impl Dataset<MatrixItem<Vec<f32>>> for DaeDataset {
    fn get(&self, index: usize) -> Option<MatrixItem<Vec<f32>>> {
        if index >= self.x.nrows() {
            return None;
        }
        let features = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            self.noise.corrupt(&self.x, index, &mut *rng)
        };
        let label = self.x.row(index).to_vec();
        Some(MatrixItem { features, label })
    }

    fn len(&self) -> usize {
        self.x.nrows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;

    fn matrix() -> Array2<f32> {
        array![
            [1.0, 10.0, 100.0],
            [2.0, 20.0, 200.0],
            [3.0, 30.0, 300.0],
            [4.0, 40.0, 400.0],
        ]
    }

    #[test]
    fn zero_prob_is_identity() {
        let dataset = DaeDataset::new(matrix(), 0.0, StdRng::seed_from_u64(0));
        for _ in 0..5 {
            for i in 0..dataset.len() {
                let item = dataset.get(i).unwrap();
                assert_eq!(item.features, item.label);
                assert_eq!(item.label, matrix().row(i).to_vec());
            }
        }
    }

    #[test]
    fn full_prob_draws_from_same_column() {
        let x = matrix();
        let dataset = DaeDataset::new(x.clone(), 1.0, StdRng::seed_from_u64(7));
        for _ in 0..20 {
            for i in 0..dataset.len() {
                let item = dataset.get(i).unwrap();
                for (feature, value) in item.features.iter().enumerate() {
                    assert!(x.column(feature).iter().any(|v| v == value));
                }
            }
        }
    }

    #[test]
    fn full_prob_swaps_values() {
        let x = matrix();
        let dataset = DaeDataset::new(x.clone(), 1.0, StdRng::seed_from_u64(7));
        let changed = (0..dataset.len())
            .map(|i| dataset.get(i).unwrap())
            .any(|item| item.features != item.label);
        assert!(changed);
    }

    #[test]
    fn corruption_rate_follows_prob() {
        // every column holds distinct values, so a swap changes the entry
        // unless the donor is the row itself
        let x = matrix();
        let n_rows = x.nrows();
        let noise = SwapNoise::new(0.5);
        let mut rng = StdRng::seed_from_u64(11);

        let mut changed = 0;
        let mut total = 0;
        for _ in 0..500 {
            for row in 0..n_rows {
                let corrupted = noise.corrupt(&x, row, &mut rng);
                changed += corrupted
                    .iter()
                    .zip(x.row(row).iter())
                    .filter(|(c, v)| c != v)
                    .count();
                total += corrupted.len();
            }
        }

        let rate = changed as f64 / total as f64;
        let expected = 0.5 * (n_rows - 1) as f64 / n_rows as f64;
        assert!((rate - expected).abs() < 0.05, "rate {rate}, expected {expected}");
    }

    #[test]
    fn same_seed_same_corruption() {
        let a = DaeDataset::new(matrix(), 0.5, StdRng::seed_from_u64(3));
        let b = DaeDataset::new(matrix(), 0.5, StdRng::seed_from_u64(3));
        for i in 0..a.len() {
            assert_eq!(a.get(i), b.get(i));
        }
    }

    #[test]
    fn out_of_range_index() {
        let dataset = DaeDataset::new(matrix(), 0.5, StdRng::seed_from_u64(0));
        assert!(dataset.get(4).is_none());
    }

    #[test]
    #[should_panic(expected = "corruption probability")]
    fn rejects_invalid_prob() {
        SwapNoise::new(1.5);
    }

    #[test]
    fn keeps_checked_prob() {
        assert_eq!(SwapNoise::new(0.25).prob(), 0.25);
        let dataset = DaeDataset::new(matrix(), 0.75, StdRng::seed_from_u64(0));
        assert_eq!(dataset.corruption_prob(), 0.75);
    }
}

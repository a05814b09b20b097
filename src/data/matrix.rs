use burn::data::dataset::Dataset;
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

/// A single `(features, label)` sample.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct MatrixItem<L> {
    /// # Shape
    /// [n_features]
    pub features: Vec<f32>,
    pub label: L,
}

/// Supervised dataset over a feature matrix and its row-aligned labels.
///
/// Rows are the samples. Use [`MatrixDataset::classification`] for class ids
/// and [`MatrixDataset::regression`] for real-valued targets.
#[derive(Debug, Clone)]
pub struct MatrixDataset<L> {
    features: Array2<f32>,
    labels: Vec<L>,
}

impl<L> MatrixDataset<L> {
    fn from_parts(features: Array2<f32>, labels: Vec<L>) -> Self {
        assert_eq!(
            features.nrows(),
            labels.len(),
            "features and labels must have the same number of rows"
        );
        Self { features, labels }
    }

    pub fn features(&self) -> &Array2<f32> {
        &self.features
    }

    pub fn labels(&self) -> &[L] {
        &self.labels
    }
}

impl MatrixDataset<i64> {
    /// Labels are truncated to integer class ids.
    pub fn classification(features: Array2<f32>, labels: Array1<f32>) -> Self {
        let labels = labels.iter().map(|&y| y as i64).collect();
        Self::from_parts(features, labels)
    }
}

impl MatrixDataset<Vec<f32>> {
    /// Single-output regression, each label becomes a one-element target.
    pub fn new(features: Array2<f32>, labels: Array1<f32>) -> Self {
        Self::regression(features, labels.insert_axis(Axis(1)))
    }

    /// Multi-output regression over a `[rows, n_targets]` matrix.
    pub fn regression(features: Array2<f32>, targets: Array2<f32>) -> Self {
        let labels = targets.rows().into_iter().map(|row| row.to_vec()).collect();
        Self::from_parts(features, labels)
    }
}

impl<L> Dataset<MatrixItem<L>> for MatrixDataset<L>
where
    L: Clone + Send + Sync,
{
    fn get(&self, index: usize) -> Option<MatrixItem<L>> {
        let label = self.labels.get(index)?.clone();
        let features = self.features.row(index).to_vec();
        Some(MatrixItem { features, label })
    }

    fn len(&self) -> usize {
        self.labels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn classification_labels_are_truncated() {
        let dataset = MatrixDataset::classification(
            array![[0.5, 1.0], [1.5, 2.0], [2.5, 3.0]],
            array![0.0, 1.9, 2.0],
        );
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.labels(), &[0i64, 1, 2]);

        let item = dataset.get(1).unwrap();
        assert_eq!(item.features, vec![1.5, 2.0]);
        assert_eq!(item.label, 1);
        assert!(dataset.get(3).is_none());
    }

    #[test]
    fn regression_targets_follow_rows() {
        let dataset = MatrixDataset::regression(
            array![[1.0, 2.0], [3.0, 4.0]],
            array![[0.1, 0.2], [0.3, 0.4]],
        );
        assert_eq!(
            dataset.get(1),
            Some(MatrixItem {
                features: vec![3.0, 4.0],
                label: vec![0.3, 0.4],
            })
        );

        let single = MatrixDataset::new(array![[1.0], [2.0]], array![10.0, 20.0]);
        assert_eq!(single.get(0).unwrap().label, vec![10.0]);
    }

    #[test]
    #[should_panic(expected = "same number of rows")]
    fn mismatched_rows_panic() {
        MatrixDataset::classification(array![[1.0], [2.0]], array![0.0]);
    }
}

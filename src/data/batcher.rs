use crate::data::MatrixItem;
use burn::data::dataloader::batcher::Batcher;
use burn::prelude::*;

/// A batch of `(inputs, targets)`.
#[derive(Clone, Debug)]
pub struct Batch<B: Backend, T> {
    /// # Shape
    /// [batch_size, n_features]
    pub inputs: Tensor<B, 2>,
    /// [batch_size] class ids, or [batch_size, n_targets] values.
    pub targets: T,
}

impl<B: Backend, T> Batch<B, T> {
    pub fn new(inputs: Tensor<B, 2>, targets: T) -> Self {
        Self { inputs, targets }
    }

    pub fn batch_size(&self) -> usize {
        let [batch_size, _] = self.inputs.dims();
        batch_size
    }
}

/// Stacks [`MatrixItem`]s into a [`Batch`].
///
/// Class ids become a `[batch_size]` int tensor, value labels a
/// `[batch_size, n_targets]` float tensor.
#[derive(Clone, Debug, Default)]
pub struct MatrixBatcher;

impl MatrixBatcher {
    fn stack_rows<B: Backend>(rows: Vec<Vec<f32>>, device: &B::Device) -> Tensor<B, 2> {
        let n_rows = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let flat: Vec<f32> = rows
            .into_iter()
            .inspect(|row| debug_assert_eq!(width, row.len()))
            .flatten()
            .collect();
        let data = TensorData::new(flat, [n_rows, width]).convert::<B::FloatElem>();
        Tensor::from_data(data, device)
    }
}

impl<B: Backend> Batcher<B, MatrixItem<i64>, Batch<B, Tensor<B, 1, Int>>> for MatrixBatcher {
    fn batch(
        &self,
        items: Vec<MatrixItem<i64>>,
        device: &B::Device,
    ) -> Batch<B, Tensor<B, 1, Int>> {
        let batch_size = items.len();
        let (features, labels): (Vec<_>, Vec<_>) = items
            .into_iter()
            .map(|item| (item.features, item.label))
            .unzip();

        let inputs = Self::stack_rows(features, device);
        let targets = Tensor::from_data(
            TensorData::new(labels, [batch_size]).convert::<B::IntElem>(),
            device,
        );

        Batch { inputs, targets }
    }
}

impl<B: Backend> Batcher<B, MatrixItem<Vec<f32>>, Batch<B, Tensor<B, 2>>> for MatrixBatcher {
    fn batch(&self, items: Vec<MatrixItem<Vec<f32>>>, device: &B::Device) -> Batch<B, Tensor<B, 2>> {
        let (features, labels): (Vec<_>, Vec<_>) = items
            .into_iter()
            .map(|item| (item.features, item.label))
            .unzip();

        Batch {
            inputs: Self::stack_rows(features, device),
            targets: Self::stack_rows(labels, device),
        }
    }
}

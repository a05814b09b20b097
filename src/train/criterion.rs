use crate::mlp::Mlp;
use crate::utils::loss::{BinaryCrossEntropyLoss, CrossEntropy, MseLoss};
use burn::nn::loss::Reduction;
use burn::prelude::*;

/// A model mapping a `[batch, n_features]` input to `[batch, n_outputs]`.
pub trait TabularModel<B: Backend> {
    fn forward(&self, input: Tensor<B, 2>) -> Tensor<B, 2>;
}

impl<B: Backend> TabularModel<B> for Mlp<B> {
    fn forward(&self, input: Tensor<B, 2>) -> Tensor<B, 2> {
        Mlp::forward(self, input)
    }
}

/// Maps a model output and its targets to a scalar loss.
///
/// Any `Fn(Tensor<B, 2>, T) -> Tensor<B, 1>` closure is a criterion.
pub trait Criterion<B: Backend, T> {
    /// # Shapes
    ///   - output [batch, n_outputs]
    ///   - loss [1]
    fn loss(&self, output: Tensor<B, 2>, targets: T) -> Tensor<B, 1>;
}

impl<B, T, F> Criterion<B, T> for F
where
    B: Backend,
    F: Fn(Tensor<B, 2>, T) -> Tensor<B, 1>,
{
    fn loss(&self, output: Tensor<B, 2>, targets: T) -> Tensor<B, 1> {
        self(output, targets)
    }
}

impl<B: Backend> Criterion<B, Tensor<B, 2>> for MseLoss {
    fn loss(&self, output: Tensor<B, 2>, targets: Tensor<B, 2>) -> Tensor<B, 1> {
        self.forward(output, targets, Reduction::Mean)
    }
}

impl<B: Backend> Criterion<B, Tensor<B, 2>> for BinaryCrossEntropyLoss {
    fn loss(&self, output: Tensor<B, 2>, targets: Tensor<B, 2>) -> Tensor<B, 1> {
        self.forward(output, targets)
    }
}

impl<B: Backend> Criterion<B, Tensor<B, 1, Int>> for CrossEntropy {
    fn loss(&self, output: Tensor<B, 2>, targets: Tensor<B, 1, Int>) -> Tensor<B, 1> {
        self.forward(output, targets)
    }
}

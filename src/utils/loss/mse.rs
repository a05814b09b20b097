use crate::utils::div_eps;
use burn::module::Module;
use burn::nn::loss::Reduction;
use burn::tensor::{DType, Element, ElementConversion, Tensor, backend::Backend, f16};

/// Mean squared error between predictions and real-valued targets.
///
/// Used as the reconstruction loss of denoising autoencoders and for regression.
#[derive(Module, Clone, Debug)]
pub struct MseLoss;

impl Default for MseLoss {
    fn default() -> Self {
        Self::new()
    }
}

impl MseLoss {
    pub fn new() -> Self {
        Self
    }

    /// Reduces the squared error over every element.
    ///
    /// On f16 backends the squares are taken relative to the largest absolute
    /// error, since e.g. `256 * 256` already overflows.
    ///
    /// # Shapes
    ///
    /// - predictions: [batch_size, num_targets]
    /// - targets: [batch_size, num_targets]
    pub fn forward<const D: usize, B: Backend>(
        &self,
        predictions: Tensor<B, D>,
        targets: Tensor<B, D>,
        reduction: Reduction,
    ) -> Tensor<B, 1> {
        let reduce = |t: Tensor<B, D>| match reduction {
            Reduction::Mean | Reduction::Auto => t.mean(),
            Reduction::Sum => t.sum(),
        };

        if <B::FloatElem as Element>::dtype() == DType::F16 {
            let (scaled, scale) = Self::scaled_square(predictions.sub(targets));
            reduce(scaled) * scale
        } else {
            reduce(self.forward_no_reduction(predictions, targets))
        }
    }

    /// Element-wise squared error.
    pub fn forward_no_reduction<const D: usize, B: Backend>(
        &self,
        predictions: Tensor<B, D>,
        targets: Tensor<B, D>,
    ) -> Tensor<B, D> {
        predictions.sub(targets).powi_scalar(2)
    }

    /// Splits `diff²` into `scaled * scale` with `scale = max|diff|`, so every
    /// entry of `scaled` stays below `scale`.
    fn scaled_square<const D: usize, B: Backend>(diff: Tensor<B, D>) -> (Tensor<B, D>, Tensor<B, 1>) {
        let eps = f16::from_elem(div_eps::<B>()) * f16::from_f32(2.);
        let scale = diff.clone().detach().abs().max();
        let unit = diff.clone() / (scale.clone().expand(diff.shape()) + eps);
        (diff * unit, scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::backend::ndarray::NdArrayDevice;

    type TestBackend = NdArray<f32>;

    #[test]
    fn mean_and_sum() {
        let device = NdArrayDevice::Cpu;
        let predictions = Tensor::<TestBackend, 2>::from_floats([[1.0, 2.0], [3.0, 4.0]], &device);
        let targets = Tensor::<TestBackend, 2>::from_floats([[1.0, 0.0], [0.0, 4.0]], &device);

        let mean: f32 = MseLoss::new()
            .forward(predictions.clone(), targets.clone(), Reduction::Mean)
            .into_scalar();
        assert!((mean - 13.0 / 4.0).abs() < 1e-6);

        let sum: f32 = MseLoss::new()
            .forward(predictions, targets, Reduction::Sum)
            .into_scalar();
        assert!((sum - 13.0).abs() < 1e-6);
    }
}

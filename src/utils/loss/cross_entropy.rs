use burn::nn::loss::CrossEntropyLossConfig;
use burn::prelude::*;

/// Cross entropy between class logits and integer class ids.
///
/// The underlying [`burn::nn::loss::CrossEntropyLoss`] is built on the device of
/// the logits, so the same criterion serves training and inference backends.
#[derive(Clone, Debug, Default)]
pub struct CrossEntropy {
    /// Label smoothing factor in `[0, 1]`.
    pub smoothing: Option<f32>,
}

impl CrossEntropy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_smoothing(smoothing: f32) -> Self {
        Self {
            smoothing: Some(smoothing),
        }
    }

    /// # Shapes
    ///
    /// - logits: `[batch_size, num_classes]`
    /// - targets: `[batch_size]`
    pub fn forward<B: Backend>(&self, logits: Tensor<B, 2>, targets: Tensor<B, 1, Int>) -> Tensor<B, 1> {
        CrossEntropyLossConfig::new()
            .with_smoothing(self.smoothing)
            .init(&logits.device())
            .forward(logits, targets)
    }
}

use burn::module::Module;
use burn::prelude::*;
use burn::tensor::activation::log_sigmoid;

/// Lower bound of the log-probabilities, so that saturated predictions stay finite.
const LOG_FLOOR: f64 = -100.0;

#[derive(Config, Debug)]
pub struct BinaryCrossEntropyLossConfig {
    /// Whether predictions are logits rather than probabilities.
    #[config(default = false)]
    pub logits: bool,
}

impl BinaryCrossEntropyLossConfig {
    pub fn init(&self) -> BinaryCrossEntropyLoss {
        BinaryCrossEntropyLoss {
            logits: self.logits,
        }
    }
}

/// Binary cross entropy between predictions and binary or one-hot targets,
/// averaged over every element.
#[derive(Module, Clone, Debug)]
pub struct BinaryCrossEntropyLoss {
    pub logits: bool,
}

impl BinaryCrossEntropyLoss {
    /// # Shapes
    ///
    /// - predictions: `[batch_size, num_classes]`
    /// - targets: `[batch_size, num_classes]`, values in `[0, 1]`
    pub fn forward<const D: usize, B: Backend>(
        &self,
        predictions: Tensor<B, D>,
        targets: Tensor<B, D>,
    ) -> Tensor<B, 1> {
        self.forward_no_reduction(predictions, targets).mean()
    }

    pub fn forward_no_reduction<const D: usize, B: Backend>(
        &self,
        predictions: Tensor<B, D>,
        targets: Tensor<B, D>,
    ) -> Tensor<B, D> {
        if self.logits {
            // -t log σ(x) - (1 - t) log σ(-x) = (1 - t) x - log σ(x)
            targets.neg().add_scalar(1.) * predictions.clone() - log_sigmoid(predictions)
        } else {
            let log_p = predictions.clone().log().clamp_min(LOG_FLOOR);
            let log_not_p = predictions.neg().log1p().clamp_min(LOG_FLOOR);
            -(targets.clone() * log_p + targets.neg().add_scalar(1.) * log_not_p)
        }
    }
}

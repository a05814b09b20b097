use crate::utils::activation::Activation;
use crate::utils::batch_norm::{BatchNorm1d, BatchNorm1dConfig};
use burn::nn::{Dropout, DropoutConfig, Linear, LinearConfig};
use burn::prelude::*;

/// A fully-connected layer: `[dropout] -> linear -> activation -> [batch norm]`.
///
/// Dropout is applied before the linear transform and batch normalization after
/// the activation.
#[derive(Module, Debug)]
pub struct MlpLayer<B: Backend> {
    /// Present iff the dropout probability is positive.
    pub dropout: Option<Dropout>,
    /// Input channel: d_input.
    /// Output channel: d_output.
    pub linear: Linear<B>,
    pub activation: Activation,
    pub norm: Option<BatchNorm1d<B>>,
}

#[derive(Config, Debug)]
pub struct MlpLayerConfig {
    pub d_input: usize,
    pub d_output: usize,
    #[config(default = 0.1)]
    pub dropout: f64,
    #[config(default = true)]
    pub batchnorm: bool,
    #[config(default = "Activation::Relu")]
    pub activation: Activation,
}

impl MlpLayerConfig {
    /// Returns the initialized layer.
    pub fn init<B: Backend>(&self, device: &B::Device) -> MlpLayer<B> {
        MlpLayer {
            dropout: (self.dropout > 0.).then(|| DropoutConfig::new(self.dropout).init()),
            linear: LinearConfig::new(self.d_input, self.d_output).init(device),
            activation: self.activation.clone(),
            norm: self
                .batchnorm
                .then(|| BatchNorm1dConfig::new(self.d_output).init(device)),
        }
    }
}

impl<B: Backend> MlpLayer<B> {
    /// # Shapes
    ///   - Input [batch, d_input]
    ///   - Output [batch, d_output]
    pub fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        let [batch, _d_input] = x.dims();
        let [_d_input, d_output] = self.linear.weight.dims();

        let x = match &self.dropout {
            Some(dropout) => dropout.forward(x),
            None => x,
        };
        let x = self.linear.forward(x);
        let x = self.activation.forward(x);
        let x = match &self.norm {
            Some(norm) => norm.forward(x),
            None => x,
        };
        debug_assert_eq!([batch, d_output], x.dims());

        x
    }
}

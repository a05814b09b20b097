use crate::mlp::{MlpLayer, MlpLayerConfig};
use crate::utils::activation::Activation;
use burn::prelude::*;

/// A sequence of [`MlpLayer`]s with an optional skip connection from the
/// block input to its output, the fully-connected analogue of a ResNet block.
#[derive(Module, Debug)]
pub struct MlpBlock<B: Backend> {
    pub layers: Vec<MlpLayer<B>>,
    /// Adds the block input to the output of the last layer.
    pub skip: bool,
}

#[derive(Config, Debug)]
pub struct MlpBlockConfig {
    /// Input width, also the width of every hidden layer.
    pub d_model: usize,
    /// Number of layers in the block.
    #[config(default = 2)]
    pub n_layers: usize,
    /// Output width of the last layer.
    ///
    /// By default, set to d_model. Must equal d_model when `skip` is set.
    pub d_output: Option<usize>,
    #[config(default = 0.1)]
    pub dropout: f64,
    #[config(default = true)]
    pub skip: bool,
    #[config(default = true)]
    pub batchnorm: bool,
    #[config(default = "Activation::Relu")]
    pub activation: Activation,
}

impl MlpBlockConfig {
    /// Returns the initialized block.
    ///
    /// # Panics
    /// If `n_layers` is zero, or if `skip` is set and `d_output` differs from `d_model`.
    pub fn init<B: Backend>(&self, device: &B::Device) -> MlpBlock<B> {
        let d_output = self.d_output();
        assert_ne!(self.n_layers, 0, "a block needs at least one layer");
        assert!(
            !self.skip || d_output == self.d_model,
            "skip connection needs equal input and output widths, got {} and {d_output}",
            self.d_model
        );

        let mut layers = Vec::with_capacity(self.n_layers);
        for i in 0..self.n_layers {
            let d_layer_output = if i + 1 == self.n_layers {
                d_output
            } else {
                self.d_model
            };
            let layer = MlpLayerConfig::new(self.d_model, d_layer_output)
                .with_dropout(self.dropout)
                .with_batchnorm(self.batchnorm)
                .with_activation(self.activation.clone())
                .init(device);
            layers.push(layer);
        }

        MlpBlock {
            layers,
            skip: self.skip,
        }
    }

    pub fn d_output(&self) -> usize {
        self.d_output.unwrap_or(self.d_model)
    }
}

impl<B: Backend> MlpBlock<B> {
    /// # Shapes
    ///   - Input [batch, d_model]
    ///   - Output [batch, d_output]
    pub fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        let res = x.clone();

        let mut x = x;
        for layer in self.layers.iter() {
            x = layer.forward(x);
        }

        if self.skip {
            debug_assert_eq!(res.dims(), x.dims());
            x + res
        } else {
            x
        }
    }
}

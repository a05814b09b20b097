use crate::mlp::{MlpBlock, MlpBlockConfig};
use crate::utils::activation::Activation;
use burn::nn::{Linear, LinearConfig};
use burn::prelude::*;

/// Multilayer perceptron made of residual [`MlpBlock`]s.
///
/// `in_proj` maps the features to the hidden width, every block keeps that width
/// and `out_proj` maps it to the outputs.
#[derive(Module, Debug)]
pub struct Mlp<B: Backend> {
    /// Input channel: d_input.
    /// Output channel: d_hidden.
    pub in_proj: Linear<B>,
    pub blocks: Vec<MlpBlock<B>>,
    /// Input channel: d_hidden.
    /// Output channel: d_output.
    pub out_proj: Linear<B>,
}

#[derive(Config, Debug)]
pub struct MlpConfig {
    pub d_input: usize,
    pub d_output: usize,
    #[config(default = 512)]
    pub d_hidden: usize,
    /// Number of residual blocks.
    #[config(default = 3)]
    pub n_blocks: usize,
    /// Number of layers in each block.
    #[config(default = 1)]
    pub n_layers: usize,
    #[config(default = 0.1)]
    pub dropout: f64,
    #[config(default = true)]
    pub skip: bool,
    #[config(default = true)]
    pub batchnorm: bool,
    #[config(default = "Activation::Relu")]
    pub activation: Activation,
}

impl MlpConfig {
    /// Returns the initialized model.
    pub fn init<B: Backend>(&self, device: &B::Device) -> Mlp<B> {
        let block = self.block_config();
        let blocks = (0..self.n_blocks).map(|_| block.init(device)).collect();

        Mlp {
            in_proj: LinearConfig::new(self.d_input, self.d_hidden).init(device),
            blocks,
            out_proj: LinearConfig::new(self.d_hidden, self.d_output).init(device),
        }
    }

    pub fn block_config(&self) -> MlpBlockConfig {
        MlpBlockConfig::new(self.d_hidden)
            .with_n_layers(self.n_layers)
            .with_dropout(self.dropout)
            .with_skip(self.skip)
            .with_batchnorm(self.batchnorm)
            .with_activation(self.activation.clone())
    }
}

impl<B: Backend> Mlp<B> {
    /// # Shapes
    ///   - Input [batch, d_input]
    ///   - Output [batch, d_output]
    pub fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        let [batch, _d_input] = x.dims();
        let [_d_input, d_hidden] = self.in_proj.weight.dims();
        let [_d_hidden, d_output] = self.out_proj.weight.dims();

        // input projection
        let mut x = self.in_proj.forward(x);
        debug_assert_eq!([batch, d_hidden], x.dims());

        // blocks
        for block in self.blocks.iter() {
            x = block.forward(x);
        }

        // output projection
        let x = self.out_proj.forward(x);
        debug_assert_eq!([batch, d_output], x.dims());

        x
    }
}

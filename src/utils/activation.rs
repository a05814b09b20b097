use burn::prelude::*;
use burn::tensor::activation;

/// Element-wise non-linearity applied after each linear transform.
#[derive(Module, Default, Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Activation {
    #[default]
    Relu,
    Gelu,
    Tanh,
    Sigmoid,
    /// `x * sigmoid(x)`
    Silu,
}

impl Activation {
    /// # Shapes
    ///
    /// - input: `[..., any]`
    /// - output: `[..., any]`
    pub fn forward<B: Backend, const D: usize>(&self, x: Tensor<B, D>) -> Tensor<B, D> {
        match self {
            Activation::Relu => activation::relu(x),
            Activation::Gelu => activation::gelu(x),
            Activation::Tanh => activation::tanh(x),
            Activation::Sigmoid => activation::sigmoid(x),
            Activation::Silu => x.clone() * activation::sigmoid(x),
        }
    }
}

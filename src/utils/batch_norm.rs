use burn::module::{Content, DisplaySettings, ModuleDisplay, Param, RunningState};
use burn::nn::Initializer;
use burn::prelude::*;

/// Configuration to create a [BatchNorm1d](BatchNorm1d) layer using the [init function](BatchNorm1dConfig::init).
#[derive(Config, Debug)]
pub struct BatchNorm1dConfig {
    /// The size of the input features.
    pub d_model: usize,
    /// Weight of the newest batch in the running statistics. Default: 0.1
    #[config(default = 0.1)]
    pub momentum: f64,
    /// A value required for numerical stability. Default: 1e-5
    #[config(default = 1e-5)]
    pub epsilon: f64,
}

impl BatchNorm1dConfig {
    /// Initialize a new [batch norm](BatchNorm1d) module.
    pub fn init<B: Backend>(&self, device: &B::Device) -> BatchNorm1d<B> {
        let gamma = Initializer::Ones.init([self.d_model], device);
        let beta = Initializer::Zeros.init([self.d_model], device);
        let running_mean = RunningState::new(Tensor::zeros([self.d_model], device));
        let running_var = RunningState::new(Tensor::ones([self.d_model], device));

        BatchNorm1d {
            gamma,
            beta,
            running_mean,
            running_var,
            momentum: self.momentum,
            epsilon: self.epsilon,
        }
    }
}

/// Applies Batch Normalization over the features of a `[batch, d_model]` tensor.
///
/// `Y = (X - mean) / sqrt(var + ε) * γ + β`
///
/// During training (autodiff backends) `mean` and `var` are the batch statistics,
/// and the running statistics are updated from them. During inference the running
/// statistics are used instead.
///
/// Should be created using the [BatchNorm1dConfig](BatchNorm1dConfig) configuration.
#[derive(Module, Debug)]
#[module(custom_display)]
pub struct BatchNorm1d<B: Backend> {
    /// The learnable weight.
    pub gamma: Param<Tensor<B, 1>>,
    /// The learnable bias.
    pub beta: Param<Tensor<B, 1>>,
    /// Running mean of the features.
    pub running_mean: RunningState<Tensor<B, 1>>,
    /// Running unbiased variance of the features.
    pub running_var: RunningState<Tensor<B, 1>>,
    momentum: f64,
    epsilon: f64,
}

impl<B: Backend> BatchNorm1d<B> {
    /// # Shapes
    /// - input: `[batch, d_model]`
    /// - output: `[batch, d_model]`
    pub fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        if B::ad_enabled() {
            self.forward_train(x)
        } else {
            self.forward_inference(x)
        }
    }

    fn forward_train(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        let [batch, d_model] = x.dims();

        let mean = x.clone().mean_dim(0);
        debug_assert_eq!([1, d_model], mean.dims());
        let centered = x - mean.clone();
        let var = (centered.clone() * centered.clone()).mean_dim(0);
        debug_assert_eq!([1, d_model], var.dims());

        let unbiased_var = if batch > 1 {
            var.clone().detach() * (batch as f64 / (batch - 1) as f64)
        } else {
            var.clone().detach()
        };
        let running_mean = self.running_mean.value_sync();
        let running_var = self.running_var.value_sync();
        self.running_mean.update(
            running_mean.mul_scalar(1.0 - self.momentum)
                + mean.detach().reshape([d_model]).mul_scalar(self.momentum),
        );
        self.running_var.update(
            running_var.mul_scalar(1.0 - self.momentum)
                + unbiased_var.reshape([d_model]).mul_scalar(self.momentum),
        );

        let normalized = centered / (var + self.epsilon).sqrt();
        self.affine(normalized)
    }

    fn forward_inference(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        let mean = self.running_mean.value_sync().unsqueeze::<2>();
        let var = self.running_var.value_sync().unsqueeze::<2>();

        let normalized = (x - mean) / (var + self.epsilon).sqrt();
        self.affine(normalized)
    }

    fn affine(&self, normalized: Tensor<B, 2>) -> Tensor<B, 2> {
        normalized * self.gamma.val().unsqueeze::<2>() + self.beta.val().unsqueeze::<2>()
    }
}

impl<B: Backend> ModuleDisplay for BatchNorm1d<B> {
    fn custom_settings(&self) -> Option<DisplaySettings> {
        DisplaySettings::new()
            .with_new_line_after_attribute(false)
            .optional()
    }

    fn custom_content(&self, content: Content) -> Option<Content> {
        let [d_model] = self.gamma.shape().dims();
        content
            .add("d_model", &d_model)
            .add("momentum", &self.momentum)
            .add("epsilon", &self.epsilon)
            .optional()
    }
}

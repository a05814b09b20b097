use burn::{optim::AdamWConfig, prelude::*};

#[derive(Config)]
pub struct TrainingConfig {
    pub optimizer: AdamWConfig,
    #[config(default = 1)]
    pub num_epochs: usize,
    #[config(default = 32)]
    pub batch_size: usize,
    #[config(default = 1)]
    pub num_workers: usize,
    #[config(default = 1e-3)]
    pub lr: f64,
    #[config(default = 0)]
    pub seed: u64,
    /// Print the log every this many epochs. Zero disables printing.
    #[config(default = 1)]
    pub log_every: usize,
}

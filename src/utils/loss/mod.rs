mod bce;
mod cross_entropy;
mod mse;

pub use bce::{BinaryCrossEntropyLoss, BinaryCrossEntropyLossConfig};
pub use cross_entropy::CrossEntropy;
pub use mse::MseLoss;

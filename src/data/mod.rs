mod batcher;
pub mod cleaning;
mod dae;
mod frame;
mod matrix;

pub use batcher::{Batch, MatrixBatcher};
pub use dae::{DaeDataset, SwapNoise};
pub use frame::DataFrame;
pub use matrix::{MatrixDataset, MatrixItem};

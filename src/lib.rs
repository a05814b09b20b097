pub mod data;
pub mod mlp;
pub mod train;
pub mod utils;

pub mod prelude {
    pub use crate::data::*;
    pub use crate::mlp::*;
    pub use crate::train::*;
    pub use crate::utils::activation::Activation;
    pub use crate::utils::loss::{BinaryCrossEntropyLoss, CrossEntropy, MseLoss};
}

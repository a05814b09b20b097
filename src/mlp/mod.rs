mod block;
mod layer;
mod network;

pub use block::{MlpBlock, MlpBlockConfig};
pub use layer::{MlpLayer, MlpLayerConfig};
pub use network::{Mlp, MlpConfig};

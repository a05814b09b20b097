mod config;
mod criterion;
mod epoch;
mod fit;
mod log;

pub use config::TrainingConfig;
pub use criterion::{Criterion, TabularModel};
pub use epoch::{eval_epoch, evaluate, train_epoch, train_step};
pub use fit::fit;
pub use log::{PLOT_HEIGHT, PLOT_WIDTH, TrainingLog, format_log, plot_log, print_log};

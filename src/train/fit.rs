use crate::data::Batch;
use crate::train::{Criterion, TabularModel, TrainingConfig, TrainingLog, eval_epoch, train_epoch};
use burn::data::dataloader::{DataLoader, DataLoaderBuilder, batcher::Batcher};
use burn::data::dataset::Dataset;
use burn::module::AutodiffModule;
use burn::optim::Optimizer;
use burn::prelude::*;
use burn::tensor::backend::AutodiffBackend;
use std::fmt::Debug;
use std::sync::Arc;

/// Trains `model` for `config.num_epochs` epochs and evaluates it after each one.
///
/// Training batches are shuffled with `config.seed`, validation batches keep the
/// dataset order. `T` and `V` are the target types on the autodiff and inner
/// backends. Returns the trained model and its loss history.
#[allow(clippy::too_many_arguments)]
pub fn fit<AutoB, M, O, C, Bt, I, T, V, Dt, Dv>(
    mut model: M,
    config: &TrainingConfig,
    optim: &mut O,
    criterion: &C,
    batcher: Bt,
    train_dataset: Dt,
    valid_dataset: Dv,
    device: &AutoB::Device,
) -> (M, TrainingLog)
where
    AutoB: AutodiffBackend,
    M: AutodiffModule<AutoB> + TabularModel<AutoB>,
    M::InnerModule: TabularModel<AutoB::InnerBackend>,
    O: Optimizer<M, AutoB>,
    C: Criterion<AutoB, T> + Criterion<AutoB::InnerBackend, V>,
    Bt: Batcher<AutoB, I, Batch<AutoB, T>>
        + Batcher<AutoB::InnerBackend, I, Batch<AutoB::InnerBackend, V>>
        + Clone
        + 'static,
    I: Send + Sync + Clone + Debug + 'static,
    T: Send + Clone + Debug + 'static,
    V: Send + Clone + Debug + 'static,
    Dt: Dataset<I> + 'static,
    Dv: Dataset<I> + 'static,
{
    AutoB::seed(config.seed);

    let dataloader_train: Arc<dyn DataLoader<AutoB, Batch<AutoB, T>>> =
        DataLoaderBuilder::new(batcher.clone())
            .batch_size(config.batch_size)
            .shuffle(config.seed)
            .num_workers(config.num_workers)
            .set_device(device.clone())
            .build(train_dataset);
    let dataloader_valid: Arc<dyn DataLoader<AutoB::InnerBackend, Batch<AutoB::InnerBackend, V>>> =
        DataLoaderBuilder::new(batcher)
            .batch_size(config.batch_size)
            .num_workers(config.num_workers)
            .set_device(device.clone())
            .build(valid_dataset);

    let mut log = TrainingLog::new();
    let mut lr = config.lr;

    for epoch in 1..config.num_epochs + 1 {
        let (trained, losses) = train_epoch(model, dataloader_train.iter(), criterion, optim, &mut lr);
        model = trained;
        log.extend_losses(losses);

        let eval_loss = eval_epoch(&model, dataloader_valid.iter(), criterion);
        log.push_eval_loss(eval_loss);

        if config.log_every != 0 && epoch % config.log_every == 0 {
            println!(
                "Epoch {epoch}/{}, {} training items, {} validation items",
                config.num_epochs,
                dataloader_train.num_items(),
                dataloader_valid.num_items(),
            );
            log.print_log(epoch);
        }
    }

    (model, log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{MatrixBatcher, MatrixDataset};
    use crate::mlp::MlpConfig;
    use crate::utils::loss::MseLoss;
    use burn::backend::ndarray::NdArrayDevice;
    use burn::backend::{Autodiff, NdArray};
    use burn::optim::AdamWConfig;
    use ndarray::Array2;

    type TestBackend = NdArray<f32>;
    type TestAutodiffBackend = Autodiff<TestBackend>;

    fn dataset(n_rows: usize) -> MatrixDataset<Vec<f32>> {
        let x = Array2::from_shape_fn((n_rows, 3), |(i, j)| ((i * 3 + j) % 7) as f32 / 7.0);
        let y = Array2::from_shape_fn((n_rows, 1), |(i, _)| x.row(i).sum());
        MatrixDataset::regression(x, y)
    }

    #[test]
    fn logs_every_batch_and_epoch() {
        let device = NdArrayDevice::Cpu;
        let config = TrainingConfig::new(AdamWConfig::new())
            .with_num_epochs(3)
            .with_batch_size(4)
            .with_log_every(0);
        let model = MlpConfig::new(3, 1)
            .with_d_hidden(8)
            .with_n_blocks(1)
            .init::<TestAutodiffBackend>(&device);
        let mut optim = config.optimizer.init();

        let (_model, log) = fit(
            model,
            &config,
            &mut optim,
            &MseLoss::new(),
            MatrixBatcher,
            dataset(10),
            dataset(6),
            &device,
        );

        // 10 items in batches of 4
        assert_eq!(log.losses.len(), 3 * 3);
        assert_eq!(log.eval_losses.len(), 3);
        assert!(log.eval_losses.iter().all(|l| l.is_finite()));
    }

    #[test]
    fn improves_validation_loss() {
        let device = NdArrayDevice::Cpu;
        let config = TrainingConfig::new(AdamWConfig::new())
            .with_batch_size(8)
            .with_lr(1e-2)
            .with_log_every(0);
        let model = MlpConfig::new(3, 1)
            .with_d_hidden(16)
            .with_n_blocks(1)
            .with_dropout(0.)
            .with_batchnorm(false)
            .init::<TestAutodiffBackend>(&device);
        let mut optim = config.optimizer.init();

        let (model, first) = fit(
            model,
            &config,
            &mut optim,
            &MseLoss::new(),
            MatrixBatcher,
            dataset(32),
            dataset(32),
            &device,
        );
        let (_model, last) = fit(
            model,
            &config.clone().with_num_epochs(50),
            &mut optim,
            &MseLoss::new(),
            MatrixBatcher,
            dataset(32),
            dataset(32),
            &device,
        );
        assert!(last.eval_losses[49] < first.eval_losses[0]);
    }
}

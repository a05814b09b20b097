use crate::data::Batch;
use crate::train::{Criterion, TabularModel};
use burn::lr_scheduler::LrScheduler;
use burn::module::AutodiffModule;
use burn::optim::{GradientsParams, Optimizer};
use burn::prelude::*;
use burn::tensor::ElementConversion;
use burn::tensor::backend::AutodiffBackend;

/// Runs one optimization step on a single batch.
///
/// Gradients are computed fresh from `loss.backward()`, so nothing needs
/// zeroing between steps. Returns the updated model and the scalar loss.
pub fn train_step<AutoB, M, O, C, T>(
    model: M,
    inputs: Tensor<AutoB, 2>,
    targets: T,
    optim: &mut O,
    criterion: &C,
    lr: f64,
) -> (M, f64)
where
    AutoB: AutodiffBackend,
    M: AutodiffModule<AutoB> + TabularModel<AutoB>,
    O: Optimizer<M, AutoB>,
    C: Criterion<AutoB, T>,
{
    let output = model.forward(inputs);
    let loss = criterion.loss(output, targets);
    let value = loss.clone().into_scalar().elem::<f64>();

    let grads = loss.backward();
    let grads = GradientsParams::from_grads(grads, &model);
    let model = optim.step(lr, model, grads);

    (model, value)
}

/// Trains over every `(inputs, targets)` batch once.
///
/// The scheduler is stepped once per batch and yields the learning rate used for
/// that batch. Returns the updated model and the loss of each batch, in order.
pub fn train_epoch<AutoB, M, O, C, T, S, It>(
    mut model: M,
    batches: It,
    criterion: &C,
    optim: &mut O,
    scheduler: &mut S,
) -> (M, Vec<f64>)
where
    AutoB: AutodiffBackend,
    M: AutodiffModule<AutoB> + TabularModel<AutoB>,
    O: Optimizer<M, AutoB>,
    C: Criterion<AutoB, T>,
    S: LrScheduler,
    It: IntoIterator<Item = Batch<AutoB, T>>,
{
    let mut losses = Vec::new();
    for batch in batches {
        let lr = scheduler.step();
        let (updated, loss) = train_step(model, batch.inputs, batch.targets, optim, criterion, lr);
        model = updated;
        losses.push(loss);
    }
    (model, losses)
}

/// Evaluates `model` in inference mode.
///
/// Dropout is disabled, batch normalization uses its running statistics and no
/// gradients are tracked. See [`evaluate`].
pub fn eval_epoch<AutoB, M, C, T, It>(model: &M, batches: It, criterion: &C) -> f64
where
    AutoB: AutodiffBackend,
    M: AutodiffModule<AutoB>,
    M::InnerModule: TabularModel<AutoB::InnerBackend>,
    C: Criterion<AutoB::InnerBackend, T>,
    It: IntoIterator<Item = Batch<AutoB::InnerBackend, T>>,
{
    evaluate(&model.valid(), batches, criterion)
}

/// Mean loss over all samples: each batch loss is weighted by its batch size.
///
/// The result does not depend on how the samples are split into batches when the
/// criterion averages over samples. Returns `NaN` when there are no samples.
pub fn evaluate<B, M, C, T, It>(model: &M, batches: It, criterion: &C) -> f64
where
    B: Backend,
    M: TabularModel<B>,
    C: Criterion<B, T>,
    It: IntoIterator<Item = Batch<B, T>>,
{
    let mut total = 0.0;
    let mut count = 0;
    for batch in batches {
        let batch_size = batch.batch_size();
        let output = model.forward(batch.inputs);
        let loss = criterion.loss(output, batch.targets).into_scalar().elem::<f64>();
        total += loss * batch_size as f64;
        count += batch_size;
    }
    total / count as f64
}

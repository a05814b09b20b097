use burn::backend::{Autodiff, NdArray};
use burn::optim::AdamWConfig;
use burn::prelude::*;
use ndarray::{Array1, Array2, s};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tabular_mlp::data::cleaning;
use tabular_mlp::prelude::*;

type MainBackend = NdArray<f32>;
type MainAutoBackend = Autodiff<MainBackend>;

const N_ROWS: usize = 512;
const N_CLASSES: usize = 3;
const SEED: u64 = 42;

/// Three noisy gaussian blobs in 4 informative features, plus a constant column.
fn synthetic_frame(rng: &mut StdRng) -> (DataFrame, Array1<f32>) {
    let centers = [[0.0, 0.0, 1.0, -1.0], [2.0, -1.0, 0.0, 1.0], [-1.0, 2.0, -1.0, 0.0]];
    let mut values = Array2::<f64>::zeros((N_ROWS, 5));
    let mut labels = Array1::<f32>::zeros(N_ROWS);
    for i in 0..N_ROWS {
        let class = rng.random_range(0..N_CLASSES);
        labels[i] = class as f32;
        for (j, center) in centers[class].iter().enumerate() {
            values[[i, j]] = center + rng.random_range(-0.75..0.75);
        }
        values[[i, 4]] = 1.0;
    }
    let columns = ["a", "b", "c", "d", "constant"].map(String::from).to_vec();
    (DataFrame::new(columns, values), labels)
}

fn main() {
    let device = Default::default();
    let mut rng = StdRng::seed_from_u64(SEED);

    let (mut frame, labels) = synthetic_frame(&mut rng);
    println!("unique values per feature: {:?}", cleaning::unique_values_per_feature(&frame));
    let dropped = cleaning::remove_single_value_features_inplace(&mut frame);
    println!("dropped zero-information features: {dropped:?}");

    let x = frame.to_features();
    let n_features = x.ncols();
    let split = N_ROWS * 3 / 4;
    let (x_train, x_valid) = (x.slice(s![..split, ..]).to_owned(), x.slice(s![split.., ..]).to_owned());
    let (y_train, y_valid) = (labels.slice(s![..split]).to_owned(), labels.slice(s![split..]).to_owned());

    // denoising autoencoder pretraining
    let config = TrainingConfig::new(AdamWConfig::new())
        .with_num_epochs(5)
        .with_batch_size(64)
        .with_seed(SEED);
    let dae = MlpConfig::new(n_features, n_features)
        .with_d_hidden(64)
        .with_n_blocks(2)
        .init::<MainAutoBackend>(&device);
    let mut optim = config.optimizer.init();
    let (_dae, dae_log) = fit(
        dae,
        &config,
        &mut optim,
        &MseLoss::new(),
        MatrixBatcher,
        DaeDataset::new(x_train.clone(), 0.15, StdRng::seed_from_u64(rng.random())),
        DaeDataset::new(x_valid.clone(), 0.15, StdRng::seed_from_u64(rng.random())),
        &device,
    );
    if let Err(err) = dae_log.plot_log(&mut std::io::stdout()) {
        eprintln!("failed to plot the autoencoder log: {err}");
    }

    // classification
    let config = config.with_num_epochs(10).with_lr(3e-3);
    let classifier = MlpConfig::new(n_features, N_CLASSES)
        .with_d_hidden(64)
        .with_n_blocks(2)
        .with_activation(Activation::Gelu)
        .init::<MainAutoBackend>(&device);
    let mut optim = config.optimizer.init();
    let (classifier, log) = fit(
        classifier,
        &config,
        &mut optim,
        &CrossEntropy::new(),
        MatrixBatcher,
        MatrixDataset::classification(x_train, y_train),
        MatrixDataset::classification(x_valid.clone(), y_valid.clone()),
        &device,
    );
    log.print_log(config.num_epochs);

    let classifier = burn::module::AutodiffModule::valid(&classifier);
    let inputs = Tensor::<MainBackend, 2>::from_data(
        TensorData::new(x_valid.iter().copied().collect(), [x_valid.nrows(), n_features]),
        &device,
    );
    let predictions: Vec<i64> = classifier
        .forward(inputs)
        .argmax(1)
        .into_data()
        .iter::<i64>()
        .collect();
    let correct = predictions
        .iter()
        .zip(y_valid.iter())
        .filter(|(p, y)| **p == **y as i64)
        .count();
    println!(
        "validation accuracy: {:.2}%",
        100. * correct as f64 / y_valid.len() as f64
    );
}

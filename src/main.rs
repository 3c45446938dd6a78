use std::num::NonZeroUsize;
use std::path::Path;

use anyhow::Result;
use linreg::{
    dataset::Dataset, housing, loss::Mse, model::LinearRegression,
    optimization::GradientDescent, plot, preprocessing::StandardScaler, training::Trainer,
};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

// Hyperparameters of the run.
const LEARNING_RATE: f32 = 1e-2;
const EPOCHS: usize = 100;
const BATCH_SIZE: usize = 16;
const SEED: u64 = 42;

// 60% train, then the remainder halved into test and validation.
const TRAIN_RATIO: f32 = 0.6;
const TEST_RATIO: f32 = 0.5;

const LOSS_PLOT: &str = "loss.svg";
const PREDICTIONS_PLOT: &str = "predictions.svg";

fn main() -> Result<()> {
    env_logger::init();

    let raw = housing::load();
    info!(
        "loaded built-in dataset: {} samples, {} features",
        raw.len(),
        raw.n_features()
    );

    let scaler = StandardScaler::fit(raw.x())?;
    let x = scaler.transform(raw.x())?;
    let mut dataset = Dataset::from_parts(x, raw.y().to_owned())?;

    let mut rng = StdRng::seed_from_u64(SEED);
    dataset.shuffle(&mut rng);

    let (train, rest) = dataset.split(TRAIN_RATIO)?;
    let (test, validation) = rest.split(TEST_RATIO)?;
    info!(
        "split: {} train / {} test / {} validation",
        train.len(),
        test.len(),
        validation.len()
    );

    let mut model = LinearRegression::new(train.n_features(), &mut rng);
    let mut trainer = Trainer::new(GradientDescent::new(LEARNING_RATE), Mse, rng)
        .epochs(EPOCHS)
        .batch_size(NonZeroUsize::new(BATCH_SIZE).unwrap());

    let report = trainer.fit(&mut model, &train)?;
    if let Some(loss) = report.final_loss() {
        info!("finished training: final epoch loss = {loss}");
    }

    let training_score = model.score(train.x(), train.y());
    let testing_score = model.score(test.x(), test.y());
    let validation_score = model.score(validation.x(), validation.y());

    println!("training_score: {training_score}");
    println!("testing_score: {testing_score}");
    println!("validation_score: {validation_score}");

    plot::loss_curve(report.epoch_losses(), Path::new(LOSS_PLOT))?;

    let predicted = model.predict(test.x());
    plot::predictions(predicted.view(), test.y(), Path::new(PREDICTIONS_PLOT))?;
    info!("wrote {LOSS_PLOT} and {PREDICTIONS_PLOT}");

    Ok(())
}

//! The crate's built-in training table.
//!
//! A synthetic housing-price dataset: feature columns with housing-like
//! locations and scales, targets from a fixed linear rule plus Gaussian
//! noise. Everything is generated from a hard-coded seed, so every run (and
//! every test) sees exactly the same rows.

use ndarray::{Array1, Array2, arr1};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::StandardNormal;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::dataset::Dataset;

/// Number of samples in the built-in table.
pub const N_SAMPLES: usize = 400;

/// Per-column name, location and scale of the generated features.
const FEATURES: [(&str, f32, f32); 8] = [
    ("rooms", 6.2, 0.7),
    ("age", 68.0, 28.0),
    ("distance", 3.8, 2.1),
    ("tax_rate", 408.0, 168.0),
    ("pupil_teacher", 18.4, 2.2),
    ("lower_status", 12.6, 7.1),
    ("crime", 3.6, 8.6),
    ("nox", 0.55, 0.12),
];

// Generating rule: y = X·WEIGHTS + BIAS + N(0, NOISE_STD).
const WEIGHTS: [f32; 8] = [6.3, -0.04, -1.1, -0.01, -0.9, -0.55, -0.25, -14.0];
const BIAS: f32 = 34.0;
const NOISE_STD: f32 = 2.5;

const SEED: u64 = 0x5EED;

/// Loads the built-in dataset wholesale into memory.
pub fn load() -> Dataset {
    let mut rng = StdRng::seed_from_u64(SEED);

    let mut x = Array2::zeros((N_SAMPLES, FEATURES.len()));
    for (j, &(_name, loc, scale)) in FEATURES.iter().enumerate() {
        let z: Array1<f32> = Array1::random_using(N_SAMPLES, StandardNormal, &mut rng);
        x.column_mut(j).assign(&z.mapv(|v| v * scale + loc));
    }

    let noise: Array1<f32> = Array1::random_using(N_SAMPLES, StandardNormal, &mut rng);
    let y = x.dot(&arr1(&WEIGHTS)) + BIAS + noise.mapv(|v| v * NOISE_STD);

    Dataset::from_parts(x, y).expect("the generated table is rectangular")
}

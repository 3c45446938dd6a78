pub mod dataset;
pub mod error;
pub mod housing;
pub mod loss;
pub mod model;
pub mod optimization;
pub mod plot;
pub mod preprocessing;
pub mod training;

pub use error::{MlErr, Result};

use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The crate's error type.
#[derive(Debug)]
pub enum MlErr {
    /// A shape invariant was violated (e.g. mismatched lengths).
    ShapeMismatch {
        a: &'static str,
        b: &'static str,
        got: usize,
        expected: usize,
    },
    /// The operation needs at least one sample.
    EmptyDataset,
    /// The flat table length is not a multiple of the row width.
    RaggedTable { len: usize, row_width: usize },
    /// The split ratio would leave one side of the split without rows.
    BadSplitRatio { ratio: f32, len: usize },
    /// An input is invalid for semantic or domain reasons.
    InvalidInput(&'static str),
    /// A plot could not be rendered.
    Render(String),
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MlErr::ShapeMismatch {
                a,
                b,
                got,
                expected,
            } => {
                format!(
                    "There's a shape mismatch between {a} and {b}, got {got} and expected {expected}"
                )
            }
            MlErr::EmptyDataset => "The dataset has no samples".to_string(),
            MlErr::RaggedTable { len, row_width } => {
                format!("A flat table of {len} values cannot hold rows of width {row_width}")
            }
            MlErr::BadSplitRatio { ratio, len } => {
                format!("Splitting {len} rows by {ratio} leaves one side empty")
            }
            MlErr::InvalidInput(msg) => format!("Invalid input: {msg}"),
            MlErr::Render(msg) => format!("Failed to render plot: {msg}"),
        };

        write!(f, "{s}")
    }
}

impl Error for MlErr {}

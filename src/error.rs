use thiserror::Error;

/// Everything that can go wrong while building, training or persisting a network.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("invalid topology {widths:?}: {reason}")]
    InvalidTopology { widths: Vec<usize>, reason: String },

    #[error("weight tensor shape mismatch at layer {layer}: expected {expected_rows}x{expected_cols}, got {rows}x{cols}")]
    WeightShapeMismatch {
        layer: usize,
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },

    #[error("weight tensor has {actual} layers, topology has {expected}")]
    WeightLayerCountMismatch { expected: usize, actual: usize },

    #[error("training case {case}: {what} has length {actual}, topology expects {expected}")]
    DimensionMismatch {
        case: usize,
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{inputs} input rows but {expected} expected-output rows")]
    CaseCountMismatch { inputs: usize, expected: usize },

    #[error("line {line}: {token:?} is not a number")]
    InvalidNumber { line: usize, token: String },

    #[error("explicit partials need exactly one hidden layer, topology has {hidden}")]
    UnsupportedTopology { hidden: usize },

    #[error("invalid hyperparameters: {0}")]
    InvalidHyperparameters(String),

    #[error("training diverged at step {step}: aggregate error is {error}")]
    Diverged { step: usize, error: f64 },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NetworkError>;

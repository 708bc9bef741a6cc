use thiserror::Error;

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, NetworkError>;

/// Everything that can go wrong while configuring, training or persisting a network.
#[derive(Error, Debug)]
pub enum NetworkError {
    /// Learning rate was zero, negative or NaN.
    #[error("learning rate must be positive, got {0}")]
    InvalidLearningRate(f64),

    /// Training was requested without any stored training sets.
    #[error("no training data loaded")]
    NoTrainingData,

    /// Injected parameters did not have the expected shape.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A layer's fan-in does not match the width of the layer feeding it.
    #[error("layer {layer} expects {expected} inputs per node, found {actual}")]
    FanInMismatch { layer: usize, expected: usize, actual: usize },

    /// Persisted activation code is not one we know.
    #[error("unknown activation code {0}")]
    UnknownActivation(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

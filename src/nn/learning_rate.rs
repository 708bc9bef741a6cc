use crate::error::{NetworkError, Result};

/// Step size used when training if the caller does not pick one.
pub const DEFAULT_LEARNING_RATE: f64 = 0.01;

/// Fixed step size for stochastic gradient descent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LearningRate {
    rate: f64
}

impl LearningRate {
    /// Validates the rate, which must be strictly positive.
    pub fn new(rate: f64) -> Result<Self> {
        // NaN fails the comparison as well
        if rate > 0.0 {
            Ok(Self { rate })
        } else {
            Err(NetworkError::InvalidLearningRate(rate))
        }
    }

    /// Return the current learning rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl Default for LearningRate {
    fn default() -> Self {
        Self { rate: DEFAULT_LEARNING_RATE }
    }
}

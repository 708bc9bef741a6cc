use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};

/// Per-node nonlinearity of a dense layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    #[default]
    Relu,
    Tanh
}

impl Activation {
    /// Applies the activation to a weighted sum.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            Activation::Relu => if x > 0.0 { x } else { 0.0 },
            Activation::Tanh => x.tanh()
        }
    }

    /// Derivative expressed in terms of the activated output, not the weighted sum.
    pub fn derivative(&self, output: f64) -> f64 {
        match self {
            Activation::Relu => if output > 0.0 { 1.0 } else { 0.0 },
            Activation::Tanh => 1.0 - output * output
        }
    }

    /// Code used when persisting a network.
    pub fn code(&self) -> usize {
        match self {
            Activation::Relu => 0,
            Activation::Tanh => 1
        }
    }

    pub fn from_code(code: usize) -> Result<Activation> {
        match code {
            0 => Ok(Activation::Relu),
            1 => Ok(Activation::Tanh),
            other => Err(NetworkError::UnknownActivation(other))
        }
    }
}

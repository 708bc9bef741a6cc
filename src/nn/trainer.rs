use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::nn::learning_rate::DEFAULT_LEARNING_RATE;
use crate::nn::network::Network;
use crate::timed::timed;

/// Settings for a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingHyperParameters {
    pub total_epochs: usize,
    pub learning_rate: f64,
    /// Log the loss every this many epochs, 0 disables intermediate reports.
    pub report_interval: usize
}

impl Default for TrainingHyperParameters {
    fn default() -> Self {
        Self {
            total_epochs: 10_000,
            learning_rate: DEFAULT_LEARNING_RATE,
            report_interval: 0
        }
    }
}

impl TrainingHyperParameters {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(file_path: P) -> Result<Self> {
        let contents = fs::read_to_string(file_path)?;
        TrainingHyperParameters::from_json_str(&contents)
    }
}

/// Outcome of [`train_network`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    pub initial_loss: f64,
    pub final_loss: f64,
    pub epochs: usize,
    pub seconds: f64
}

/// Trains the network on the given data and measures the loss before and after.
/// With a non-zero report interval, training runs in chunks and the loss is logged after each chunk.
pub fn train_network(network: &mut Network, inputs: &[Vec<f64>], targets: &[Vec<f64>], tp: &TrainingHyperParameters) -> Result<TrainingReport> {
    let initial_loss = network.mean_square_error(inputs, targets);
    let chunk = if tp.report_interval == 0 { tp.total_epochs } else { tp.report_interval };

    let (trained, seconds) = timed(|| -> Result<()> {
        let mut epochs_done = 0;
        loop {
            let epochs = std::cmp::min(chunk, tp.total_epochs - epochs_done);

            network.add_training_data(inputs, targets);
            network.train(epochs, tp.learning_rate)?;
            epochs_done += epochs;

            if epochs_done >= tp.total_epochs {
                return Ok(());
            }

            let loss = network.mean_square_error(inputs, targets);
            info!("epoch {epochs_done:6} / {} | loss: {loss:.5}", tp.total_epochs);
        }
    });
    trained?;

    let final_loss = network.mean_square_error(inputs, targets);
    info!("loss {initial_loss:.5} -> {final_loss:.5} after {} epochs ({seconds:.3}s)", tp.total_epochs);

    Ok(TrainingReport {
        initial_loss,
        final_loss,
        epochs: tp.total_epochs,
        seconds
    })
}

use log::debug;
use rand::Rng;
use rand_distr::Uniform;

use crate::error::{NetworkError, Result};
use crate::geoalg::f64_math::matrix::Matrix;
use crate::nn::activation_functions::Activation;

/// A fully connected layer.
/// Weights hold one row per node, biases/output/error hold one value per node.
#[derive(Debug, Clone)]
pub struct DenseLayer {
    weights: Matrix,
    bias: Vec<f64>,
    output: Vec<f64>,
    error: Vec<f64>,
    activation: Activation
}

impl DenseLayer {
    /// Weights and biases start out uniformly random in [0, 1).
    fn random_weight_biases<R: Rng + ?Sized>(num_nodes: usize, num_weights_per_node: usize, rng: &mut R) -> (Matrix, Vec<f64>) {
        let weights = Matrix::new_randomized_uniform(num_nodes, num_weights_per_node, Uniform::new(0.0, 1.0), rng);
        let bias = Matrix::new_randomized_uniform(1, num_nodes, Uniform::new(0.0, 1.0), rng).values;

        (weights, bias)
    }

    pub fn new<R: Rng + ?Sized>(num_nodes: usize, num_weights_per_node: usize, activation: Activation, rng: &mut R) -> DenseLayer {
        let (weights, bias) = DenseLayer::random_weight_biases(num_nodes, num_weights_per_node, rng);
        debug!("created dense layer: {num_nodes} nodes x {num_weights_per_node} inputs ({activation:?})");

        DenseLayer {
            weights,
            bias,
            output: vec![0.0; num_nodes],
            error: vec![0.0; num_nodes],
            activation
        }
    }

    /// Builds a layer from explicit weight rows and biases.
    pub fn from_parameters(weights: &[Vec<f64>], bias: Vec<f64>, activation: Activation) -> Result<DenseLayer> {
        let fan_in = weights.first().map_or(0, |row| row.len());
        if let Some(row) = weights.iter().find(|row| row.len() != fan_in) {
            return Err(NetworkError::DimensionMismatch { expected: fan_in, actual: row.len() });
        }
        if bias.len() != weights.len() {
            return Err(NetworkError::DimensionMismatch { expected: weights.len(), actual: bias.len() });
        }

        let weights = Matrix::from_rows(weights)
            .ok_or(NetworkError::DimensionMismatch { expected: fan_in, actual: 0 })?;

        DenseLayer::from_matrix(weights, bias, activation)
    }

    /// Same as [`DenseLayer::from_parameters`] with the weights already laid out, one row per node.
    pub fn from_matrix(weights: Matrix, bias: Vec<f64>, activation: Activation) -> Result<DenseLayer> {
        if weights.values.len() != weights.rows * weights.columns {
            return Err(NetworkError::DimensionMismatch { expected: weights.rows * weights.columns, actual: weights.values.len() });
        }
        if bias.len() != weights.rows {
            return Err(NetworkError::DimensionMismatch { expected: weights.rows, actual: bias.len() });
        }
        let num_nodes = bias.len();

        Ok(DenseLayer {
            weights,
            bias,
            output: vec![0.0; num_nodes],
            error: vec![0.0; num_nodes],
            activation
        })
    }

    /// Fully replaces the layer's state with freshly randomized parameters of the given shape.
    pub fn init<R: Rng + ?Sized>(&mut self, num_nodes: usize, num_weights_per_node: usize, activation: Activation, rng: &mut R) {
        self.activation = activation;
        self.resize(num_nodes, num_weights_per_node, rng);
    }

    /// Reshapes the layer, keeping the activation. Previous weights are not preserved.
    pub fn resize<R: Rng + ?Sized>(&mut self, num_nodes: usize, num_weights_per_node: usize, rng: &mut R) {
        let (weights, bias) = DenseLayer::random_weight_biases(num_nodes, num_weights_per_node, rng);
        self.weights = weights;
        self.bias = bias;
        self.output = vec![0.0; num_nodes];
        self.error = vec![0.0; num_nodes];
        debug!("resized dense layer: {num_nodes} nodes x {num_weights_per_node} inputs");
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn bias(&self) -> &[f64] {
        &self.bias
    }

    /// Activated values from the most recent forward pass.
    pub fn output(&self) -> &[f64] {
        &self.output
    }

    /// Error signals from the most recent backward pass.
    pub fn error(&self) -> &[f64] {
        &self.error
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn num_nodes(&self) -> usize {
        self.output.len()
    }

    pub fn num_weights_per_node(&self) -> usize {
        self.weights.columns
    }

    /// Computes bias + weights dot input per node, then the activation.
    /// Inputs beyond the fan-in, or weights beyond the input length, are ignored.
    pub fn feedforward(&mut self, input: &[f64]) {
        for i in 0..self.num_nodes() {
            let sum = self.weights.row(i)
                .iter()
                .zip(input)
                .fold(self.bias[i], |acc, (w, x)| acc + w * x);

            self.output[i] = self.activation.function(sum);
        }
    }

    /// Error of a terminal layer against the expected values.
    /// Nodes without a matching target get a zero error so nothing stale leaks into the update.
    pub fn backpropagate_output(&mut self, target: &[f64]) {
        for i in 0..self.num_nodes() {
            self.error[i] = match target.get(i) {
                Some(expected) => (expected - self.output[i]) * self.activation.derivative(self.output[i]),
                None => 0.0
            };
        }
    }

    /// Error of a hidden layer, pulled back through the downstream layer's weights.
    /// Node i of this layer feeds column i of every row in next_layer.
    pub fn backpropagate_hidden(&mut self, next_layer: &DenseLayer) {
        for i in 0..self.num_nodes() {
            let error = (0..next_layer.num_nodes())
                .map(|j| next_layer.error[j] * next_layer.weights.get(j, i).unwrap_or(0.0))
                .sum::<f64>();

            self.error[i] = error * self.activation.derivative(self.output[i]);
        }
    }

    /// Gradient step: moves biases and weights along the stored error signals.
    pub fn optimize(&mut self, input: &[f64], learning_rate: f64) {
        for i in 0..self.num_nodes() {
            let delta = self.error[i] * learning_rate;
            self.bias[i] += delta;

            for (w, x) in self.weights.row_mut(i).iter_mut().zip(input) {
                *w += delta * x;
            }
        }
    }
}

use std::io::{self, Read, Write};
use std::path::Path;

use log::{debug, info, trace, warn};
use rand::{rngs::StdRng, SeedableRng};

use crate::cost_functions::mean_square_error;
use crate::error::{NetworkError, Result};
use crate::geoalg::f64_math::matrix::Matrix;
use crate::input_bin_reader::InputBinReader;
use crate::nn::activation_functions::Activation;
use crate::nn::layers::dense_layer::DenseLayer;
use crate::nn::learning_rate::LearningRate;
use crate::output_bin_writer::OutputBinWriter;
use crate::statistics::sample::Sample;
use crate::timed::timed;

const DIVIDER: &str = "--------------------------------------------------------------------------------";

/// Feedforward network made of one or more hidden dense layers followed by an output layer.
/// Trained online: every example runs forward, backward and update before the next one.
pub struct Network {
    hidden_layers: Vec<DenseLayer>,
    output_layer: DenseLayer,
    training_sample: Sample,
    rng: StdRng
}

impl Network {
    /// Creates a network with a single hidden layer, seeding its generator from the OS.
    /// More hidden layers can be added with [`Network::add_hidden_layer`] or [`Network::add_hidden_layers`].
    pub fn new(
        num_inputs: usize,
        num_hidden_nodes: usize,
        num_outputs: usize,
        hidden_activation: Activation,
        output_activation: Activation
    ) -> Network {
        Network::with_rng(num_inputs, num_hidden_nodes, num_outputs, hidden_activation, output_activation, StdRng::from_entropy())
    }

    /// Same as [`Network::new`] but draws all randomness from the supplied generator.
    pub fn with_rng(
        num_inputs: usize,
        num_hidden_nodes: usize,
        num_outputs: usize,
        hidden_activation: Activation,
        output_activation: Activation,
        mut rng: StdRng
    ) -> Network {
        let hidden_layer = DenseLayer::new(num_hidden_nodes, num_inputs, hidden_activation, &mut rng);
        let output_layer = DenseLayer::new(num_outputs, num_hidden_nodes, output_activation, &mut rng);

        Network {
            hidden_layers: vec![hidden_layer],
            output_layer,
            training_sample: Sample::default(),
            rng
        }
    }

    /// Rebuilds the network from scratch with exactly one hidden layer.
    /// Previous layers and stored training data are discarded.
    pub fn init(
        &mut self,
        num_inputs: usize,
        num_hidden_nodes: usize,
        num_outputs: usize,
        hidden_activation: Activation,
        output_activation: Activation
    ) {
        let hidden_layer = DenseLayer::new(num_hidden_nodes, num_inputs, hidden_activation, &mut self.rng);
        self.hidden_layers = vec![hidden_layer];
        self.output_layer.init(num_outputs, num_hidden_nodes, output_activation, &mut self.rng);
        self.remove_training_data();
    }

    pub fn hidden_layers(&self) -> &[DenseLayer] {
        &self.hidden_layers
    }

    pub fn output_layer(&self) -> &DenseLayer {
        &self.output_layer
    }

    /// Output of the most recent prediction.
    pub fn output(&self) -> &[f64] {
        self.output_layer.output()
    }

    pub fn num_inputs(&self) -> usize {
        self.hidden_layers.first().map_or(0, DenseLayer::num_weights_per_node)
    }

    pub fn num_outputs(&self) -> usize {
        self.output_layer.num_nodes()
    }

    pub fn num_hidden_layers(&self) -> usize {
        self.hidden_layers.len()
    }

    pub fn num_training_sets(&self) -> usize {
        self.training_sample.len()
    }

    /// Appends a hidden layer fed by the current last hidden layer.
    /// The output layer is re-randomized to match the new width.
    pub fn add_hidden_layer(&mut self, num_nodes: usize, activation: Activation) {
        self.push_hidden_layer(num_nodes, activation);
        self.resize_output_layer();
    }

    /// Appends num_layers hidden layers of equal width.
    pub fn add_hidden_layers(&mut self, num_layers: usize, num_nodes: usize, activation: Activation) {
        for _ in 0..num_layers {
            self.push_hidden_layer(num_nodes, activation);
        }
        self.resize_output_layer();
    }

    /// Copies the training data. It is kept until the next call to [`Network::train`] completes.
    /// If the lengths differ, the longer list is truncated.
    pub fn add_training_data(&mut self, inputs: &[Vec<f64>], targets: &[Vec<f64>]) {
        self.training_sample = Sample::create_sample(inputs, targets);
        debug!("loaded {} training sets", self.training_sample.len());
    }

    pub fn remove_training_data(&mut self) {
        self.training_sample.clear();
    }

    /// Trains on the stored data for num_epochs epochs, reshuffling the order before each one.
    /// Fails without touching anything when the learning rate is not positive or no data is stored.
    /// The training data is discarded afterwards.
    pub fn train(&mut self, num_epochs: usize, learning_rate: f64) -> Result<()> {
        let learning_rate = LearningRate::new(learning_rate).map_err(|e| {
            warn!("training rejected: {e}");
            e
        })?;
        if self.training_sample.is_empty() {
            warn!("training rejected: no training data");
            return Err(NetworkError::NoTrainingData);
        }

        let mut sample = std::mem::take(&mut self.training_sample);
        info!(
            "training for {num_epochs} epochs on {} sets, learning rate {}",
            sample.len(),
            learning_rate.rate()
        );

        let ((), seconds) = timed(|| {
            for epoch in 0..num_epochs {
                sample.shuffle(&mut self.rng);
                self.execute_epoch(&sample, learning_rate.rate());
                trace!("epoch {epoch} complete");
            }
        });

        info!("training complete in {seconds:.3}s");
        self.remove_training_data();
        Ok(())
    }

    /// Runs a full forward pass and returns the output layer's values.
    pub fn predict(&mut self, input: &[f64]) -> &[f64] {
        self.feedforward(input);
        self.output_layer.output()
    }

    /// Predicts every input and writes the input/output pairs between two dividers.
    pub fn print_predictions<W: Write>(&mut self, inputs: &[Vec<f64>], num_decimals: usize, out: &mut W) -> io::Result<()> {
        write!(out, "\n{DIVIDER}")?;
        for input in inputs {
            write!(out, "\nInput:\t")?;
            Network::print_line(input, num_decimals, out)?;
            write!(out, "Output:\t")?;
            let output = self.predict(input);
            Network::print_line(output, num_decimals, out)?;
        }
        write!(out, "{DIVIDER}\n\n")
    }

    /// Mean over all pairs of each pair's mean squared error.
    /// Pairs are bounded by the shorter list; no pairs gives 0.
    pub fn mean_square_error(&mut self, inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> f64 {
        let num_sets = std::cmp::min(inputs.len(), targets.len());
        if num_sets == 0 {
            return 0.0;
        }

        let total = inputs.iter()
            .zip(targets)
            .map(|(input, target)| mean_square_error(self.predict(input), target))
            .sum::<f64>();

        total / num_sets as f64
    }

    /// Checks that every layer's fan-in matches the width of the layer feeding it.
    pub fn validate_layers(&self) -> Result<()> {
        let last_hidden = self.hidden_layers.last().ok_or(NetworkError::DimensionMismatch { expected: 1, actual: 0 })?;

        for (i, pair) in self.hidden_layers.windows(2).enumerate() {
            if pair[1].num_weights_per_node() != pair[0].num_nodes() {
                return Err(NetworkError::FanInMismatch {
                    layer: i + 1,
                    expected: pair[0].num_nodes(),
                    actual: pair[1].num_weights_per_node()
                });
            }
        }

        if self.output_layer.num_weights_per_node() != last_hidden.num_nodes() {
            return Err(NetworkError::FanInMismatch {
                layer: self.hidden_layers.len(),
                expected: last_hidden.num_nodes(),
                actual: self.output_layer.num_weights_per_node()
            });
        }

        Ok(())
    }

    /// Writes the architecture and all parameters.
    pub fn save_network<W: Write>(&self, writer: &mut OutputBinWriter<W>) -> Result<()> {
        writer.write_usize(self.hidden_layers.len())?;
        for layer in self.hidden_layers.iter().chain(std::iter::once(&self.output_layer)) {
            writer.write_usize(layer.activation().code())?;
            writer.write_usize(layer.num_nodes())?;
            writer.write_usize(layer.num_weights_per_node())?;
            writer.write_slice_f64(&layer.weights().values)?;
            writer.write_slice_f64(layer.bias())?;
        }
        writer.flush()?;

        debug!("saved network with {} hidden layers", self.hidden_layers.len());
        Ok(())
    }

    /// Restores a network written by [`Network::save_network`].
    /// Training order shuffling afterwards draws from rng.
    pub fn load_network<R: Read>(reader: &mut InputBinReader<R>, rng: StdRng) -> Result<Network> {
        let num_hidden_layers = reader.read_usize()?;

        let mut hidden_layers = Vec::new();
        for _ in 0..num_hidden_layers {
            hidden_layers.push(Network::load_layer(reader)?);
        }
        let output_layer = Network::load_layer(reader)?;

        let network = Network {
            hidden_layers,
            output_layer,
            training_sample: Sample::default(),
            rng
        };
        network.validate_layers()?;

        debug!("loaded network with {num_hidden_layers} hidden layers");
        Ok(network)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, file_path: P) -> Result<()> {
        let mut writer = OutputBinWriter::create(file_path)?;
        self.save_network(&mut writer)
    }

    pub fn load_from_file<P: AsRef<Path>>(file_path: P) -> Result<Network> {
        let mut reader = InputBinReader::open(file_path)?;
        Network::load_network(&mut reader, StdRng::from_entropy())
    }

    fn load_layer<R: Read>(reader: &mut InputBinReader<R>) -> Result<DenseLayer> {
        let activation = Activation::from_code(reader.read_usize()?)?;
        let num_nodes = reader.read_usize()?;
        let num_weights_per_node = reader.read_usize()?;

        let element_count = num_nodes.checked_mul(num_weights_per_node)
            .ok_or(NetworkError::DimensionMismatch { expected: num_nodes, actual: num_weights_per_node })?;
        let values = reader.read_vec_f64(element_count)?;
        let weights = Matrix::from_vec(values, num_nodes, num_weights_per_node)
            .ok_or(NetworkError::DimensionMismatch { expected: element_count, actual: 0 })?;
        let bias = reader.read_vec_f64(num_nodes)?;

        DenseLayer::from_matrix(weights, bias, activation)
    }

    fn last_hidden_width(&self) -> usize {
        self.hidden_layers.last().map_or(0, DenseLayer::num_nodes)
    }

    fn push_hidden_layer(&mut self, num_nodes: usize, activation: Activation) {
        let layer = DenseLayer::new(num_nodes, self.last_hidden_width(), activation, &mut self.rng);
        self.hidden_layers.push(layer);
    }

    fn resize_output_layer(&mut self) {
        let num_outputs = self.output_layer.num_nodes();
        let fan_in = self.last_hidden_width();
        self.output_layer.resize(num_outputs, fan_in, &mut self.rng);
        debug_assert!(self.validate_layers().is_ok());
    }

    fn execute_epoch(&mut self, sample: &Sample, learning_rate: f64) {
        for (input, target) in sample.iter_ordered() {
            self.feedforward(input);
            self.backpropagate(target);
            self.optimize(input, learning_rate);
        }
    }

    fn feedforward(&mut self, input: &[f64]) {
        let mut previous_output = input;
        for layer in self.hidden_layers.iter_mut() {
            layer.feedforward(previous_output);
            previous_output = layer.output();
        }
        self.output_layer.feedforward(previous_output);
    }

    fn backpropagate(&mut self, target: &[f64]) {
        self.output_layer.backpropagate_output(target);

        let mut next_layer = &self.output_layer;
        for layer in self.hidden_layers.iter_mut().rev() {
            layer.backpropagate_hidden(next_layer);
            next_layer = &*layer;
        }
    }

    fn optimize(&mut self, input: &[f64], learning_rate: f64) {
        let mut previous_output = input;
        for layer in self.hidden_layers.iter_mut() {
            layer.optimize(previous_output, learning_rate);
            previous_output = layer.output();
        }
        self.output_layer.optimize(previous_output, learning_rate);
    }

    fn print_line<W: Write>(data: &[f64], num_decimals: usize, out: &mut W) -> io::Result<()> {
        for value in data {
            write!(out, "{value:.num_decimals$} ")?;
        }
        writeln!(out)
    }
}

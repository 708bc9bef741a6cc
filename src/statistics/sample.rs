use log::warn;
use rand::{seq::SliceRandom, Rng};

/// Paired training inputs and targets, plus the order they are visited in.
/// Inputs and targets always have the same length.
#[derive(Debug, Clone, Default)]
pub struct Sample {
    inputs: Vec<Vec<f64>>,
    targets: Vec<Vec<f64>>,
    order: Vec<usize>,
}

impl Sample {
    /// Creates a sample from the specified data, copying it.
    /// Mismatched lengths are truncated to the shorter of the two.
    /// The order starts out natural: 0, 1, 2, ...
    pub fn create_sample(inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Sample {
        let num_sets = std::cmp::min(inputs.len(), targets.len());
        if inputs.len() != targets.len() {
            warn!(
                "training data mismatch: {} inputs, {} targets, keeping {num_sets} sets",
                inputs.len(),
                targets.len()
            );
        }

        Sample {
            inputs: inputs[..num_sets].to_vec(),
            targets: targets[..num_sets].to_vec(),
            order: (0..num_sets).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Current visiting order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Uniformly permutes the visiting order.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.order.shuffle(rng);
    }

    /// Input/target pairs in the current order.
    pub fn iter_ordered(&self) -> impl Iterator<Item = (&[f64], &[f64])> {
        self.order
            .iter()
            .map(|&i| (self.inputs[i].as_slice(), self.targets[i].as_slice()))
    }

    /// Drops all stored data.
    pub fn clear(&mut self) {
        self.inputs.clear();
        self.targets.clear();
        self.order.clear();
    }
}

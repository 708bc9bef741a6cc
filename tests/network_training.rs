use dense_net::error::NetworkError;
use dense_net::nn::activation_functions::Activation;
use dense_net::nn::network::Network;
use dense_net::nn::trainer::{train_network, TrainingHyperParameters};
use rand::{rngs::StdRng, SeedableRng};

/// Counts the high bits of a 3-bit input, as a 2-bit binary number.
fn bit_counter_table() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let inputs = vec![
        vec![0.0, 0.0, 0.0], vec![0.0, 0.0, 1.0], vec![0.0, 1.0, 0.0], vec![0.0, 1.0, 1.0],
        vec![1.0, 0.0, 0.0], vec![1.0, 0.0, 1.0], vec![1.0, 1.0, 0.0], vec![1.0, 1.0, 1.0]
    ];
    let targets = vec![
        vec![0.0, 0.0], vec![0.0, 1.0], vec![0.0, 1.0], vec![1.0, 0.0],
        vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 0.0], vec![1.0, 1.0]
    ];

    (inputs, targets)
}

fn rounded(values: &[f64]) -> Vec<f64> {
    values.iter().map(|v| v.round()).collect()
}

#[test]
fn learns_bit_counter() {
    let (inputs, targets) = bit_counter_table();
    let mut network = Network::with_rng(3, 4, 2, Activation::Tanh, Activation::Tanh, StdRng::seed_from_u64(2024));

    let initial_loss = network.mean_square_error(&inputs, &targets);
    network.add_training_data(&inputs, &targets);
    network.train(10_000, 0.05).unwrap();
    let final_loss = network.mean_square_error(&inputs, &targets);

    assert!(final_loss < initial_loss, "loss went from {initial_loss} to {final_loss}");
    for (input, target) in inputs.iter().zip(&targets) {
        assert_eq!(&rounded(network.predict(input)), target, "input {input:?}");
    }
    assert_eq!(rounded(network.predict(&[1.0, 1.0, 1.0])), vec![1.0, 1.0]);
    assert_eq!(network.num_training_sets(), 0);
}

#[test]
fn learns_with_stacked_hidden_layers() {
    let (inputs, targets) = bit_counter_table();
    let mut network = Network::with_rng(3, 4, 2, Activation::Tanh, Activation::Tanh, StdRng::seed_from_u64(77));
    network.add_hidden_layer(4, Activation::Tanh);
    assert_eq!(network.num_hidden_layers(), 2);
    assert_eq!(network.output_layer().num_weights_per_node(), 4);

    let tp = TrainingHyperParameters { total_epochs: 3_000, learning_rate: 0.05, report_interval: 1_000 };
    let report = train_network(&mut network, &inputs, &targets, &tp).unwrap();

    assert!(report.final_loss < report.initial_loss);
    assert!(report.final_loss < 0.1, "final loss {}", report.final_loss);
}

#[test]
fn same_seed_same_network() {
    let (inputs, targets) = bit_counter_table();
    let mut a = Network::with_rng(3, 5, 2, Activation::Relu, Activation::Tanh, StdRng::seed_from_u64(5));
    let mut b = Network::with_rng(3, 5, 2, Activation::Relu, Activation::Tanh, StdRng::seed_from_u64(5));

    for network in [&mut a, &mut b] {
        network.add_training_data(&inputs, &targets);
        network.train(20, 0.01).unwrap();
    }

    assert_eq!(a.predict(&[0.0, 1.0, 1.0]).to_vec(), b.predict(&[0.0, 1.0, 1.0]).to_vec());
}

#[test]
fn failed_training_keeps_data() {
    let (inputs, targets) = bit_counter_table();
    let mut network = Network::with_rng(3, 4, 2, Activation::Tanh, Activation::Tanh, StdRng::seed_from_u64(8));
    network.add_training_data(&inputs[..5], &targets[..3]);
    assert_eq!(network.num_training_sets(), 3);

    let before = network.predict(&[1.0, 0.0, 1.0]).to_vec();
    assert!(matches!(network.train(100, 0.0), Err(NetworkError::InvalidLearningRate(_))));
    assert_eq!(network.num_training_sets(), 3);
    assert_eq!(network.predict(&[1.0, 0.0, 1.0]), before.as_slice());
}

#[test]
fn print_predictions_layout() {
    let (inputs, _) = bit_counter_table();
    let mut network = Network::with_rng(3, 4, 2, Activation::Tanh, Activation::Tanh, StdRng::seed_from_u64(3));

    let mut out = Vec::new();
    network.print_predictions(&inputs[..2], 1, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    // blank, divider, first pair, blank, second pair, closing divider, trailing blank
    assert_eq!(lines.len(), 9);
    assert_eq!(lines[0], "");
    assert_eq!(lines[1], "-".repeat(80));
    assert_eq!(lines[2], "Input:\t0.0 0.0 0.0 ");
    assert!(lines[3].starts_with("Output:\t"));
    assert_eq!(lines[4], "");
    assert_eq!(lines[5], "Input:\t0.0 0.0 1.0 ");
    assert!(lines[6].starts_with("Output:\t"));
    assert_eq!(lines[7], "-".repeat(80));
    assert_eq!(lines[8], "");
    assert!(text.ends_with("\n\n"));
}

#[test]
fn save_and_load_from_file() {
    let mut network = Network::with_rng(3, 4, 2, Activation::Tanh, Activation::Relu, StdRng::seed_from_u64(12));
    network.add_hidden_layers(2, 3, Activation::Relu);

    let path = std::env::temp_dir().join(format!("dense_net_{}.nn", std::process::id()));
    network.save_to_file(&path).unwrap();
    let mut loaded = Network::load_from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded.num_hidden_layers(), 3);
    let input = [0.5, 0.25, 1.0];
    let expected = network.predict(&input).to_vec();
    assert_eq!(loaded.predict(&input), expected.as_slice());
}

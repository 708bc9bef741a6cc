//! Trains a network to count the high bits of a 3-bit input.
//!
//!   inputs[2:0]    outputs[1:0]
//!       000             00
//!       001             01
//!       010             01
//!       011             10
//!       100             01
//!       101             10
//!       110             10
//!       111             11
//!
//! Run with `RUST_LOG=info cargo run --example bit_counter [config.json]`.

use std::io;

use dense_net::error::Result;
use dense_net::nn::activation_functions::Activation;
use dense_net::nn::network::Network;
use dense_net::nn::trainer::{train_network, TrainingHyperParameters};

fn main() -> Result<()> {
    env_logger::init();

    let tp = match std::env::args().nth(1) {
        Some(path) => TrainingHyperParameters::from_json_file(path)?,
        None => TrainingHyperParameters { total_epochs: 10_000, learning_rate: 0.05, report_interval: 1_000 }
    };

    let inputs = vec![
        vec![0.0, 0.0, 0.0], vec![0.0, 0.0, 1.0], vec![0.0, 1.0, 0.0], vec![0.0, 1.0, 1.0],
        vec![1.0, 0.0, 0.0], vec![1.0, 0.0, 1.0], vec![1.0, 1.0, 0.0], vec![1.0, 1.0, 1.0]
    ];
    let targets = vec![
        vec![0.0, 0.0], vec![0.0, 1.0], vec![0.0, 1.0], vec![1.0, 0.0],
        vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 0.0], vec![1.0, 1.0]
    ];

    let mut network = Network::new(3, 4, 2, Activation::Tanh, Activation::Tanh);
    let report = train_network(&mut network, &inputs, &targets, &tp)?;
    println!("Loss: {:.5} -> {:.5} in {:.3}s", report.initial_loss, report.final_loss, report.seconds);

    network.print_predictions(&inputs, 1, &mut io::stdout())?;
    Ok(())
}

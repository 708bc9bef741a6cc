pub mod geoalg;
pub mod statistics;
pub mod nn;
pub mod cost_functions;
pub mod output_bin_writer;
pub mod input_bin_reader;
pub mod timed;
pub mod error;

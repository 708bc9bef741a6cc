pub mod activation_functions;
pub mod layers;
pub mod learning_rate;
pub mod network;
pub mod trainer;

pub mod error;
pub mod math;
pub mod activation;
pub mod network;
pub mod loss;
pub mod train;

// Convenience re-exports
pub use error::{NnError, Result};
pub use math::matrix::Matrix;
pub use activation::sigmoid::{dsigmoid, sigmoid};
pub use network::config::NetworkConfig;
pub use network::network::NeuralNetwork;
pub use loss::mse::MseLoss;
pub use train::{
    evaluate, train_epoch, train_loop, train_loop_with_rng, EpochStats, TrainConfig,
};

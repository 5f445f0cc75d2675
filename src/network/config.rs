use serde::{Deserialize, Serialize};

use crate::error::{NnError, Result};

/// Learning rate used when none is given.
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;

fn default_learning_rate() -> f64 {
    DEFAULT_LEARNING_RATE
}

/// Architecture of a one-hidden-layer network plus its learning rate.
///
/// Fields:
/// - `input_nodes`   — length of every input vector
/// - `hidden_nodes`  — neurons in the hidden layer
/// - `output_nodes`  — length of every prediction and training target
/// - `learning_rate` — step size applied on every training sample
///                     (defaults to 0.1 when missing from JSON)
///
/// Only the shape is stored. Weights are drawn fresh every time a network is
/// built from a config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub input_nodes: usize,
    pub hidden_nodes: usize,
    pub output_nodes: usize,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
}

impl NetworkConfig {
    /// Config with the default learning rate.
    pub fn new(input_nodes: usize, hidden_nodes: usize, output_nodes: usize) -> NetworkConfig {
        NetworkConfig {
            input_nodes,
            hidden_nodes,
            output_nodes,
            learning_rate: DEFAULT_LEARNING_RATE,
        }
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> NetworkConfig {
        self.learning_rate = learning_rate;
        self
    }

    /// Checks that every layer has at least one node and the learning rate is
    /// finite and positive.
    pub fn validate(&self) -> Result<()> {
        if self.input_nodes == 0 {
            return Err(NnError::InvalidDimensions { rows: self.hidden_nodes, cols: 0 });
        }
        if self.hidden_nodes == 0 {
            return Err(NnError::InvalidDimensions { rows: 0, cols: self.input_nodes });
        }
        if self.output_nodes == 0 {
            return Err(NnError::InvalidDimensions { rows: 0, cols: self.hidden_nodes });
        }
        check_learning_rate(self.learning_rate)
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a `NetworkConfig` from a JSON file.
    pub fn load_json(path: &str) -> std::io::Result<NetworkConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

pub(crate) fn check_learning_rate(learning_rate: f64) -> Result<()> {
    if !learning_rate.is_finite() || learning_rate <= 0.0 {
        return Err(NnError::InvalidLearningRate(learning_rate));
    }
    Ok(())
}

use rand::rngs::OsRng;
use rand::Rng;
use tracing::debug;

use crate::activation::sigmoid::{dsigmoid, sigmoid};
use crate::error::{NnError, Result};
use crate::loss::mse::MseLoss;
use crate::math::matrix::Matrix;
use crate::network::config::{check_learning_rate, NetworkConfig};

/// Fully connected input → hidden → output network with sigmoid activations,
/// trained one sample at a time.
///
/// Parameter shapes never change after construction:
/// - `weights_ih`: (hidden, input)
/// - `weights_ho`: (output, hidden)
/// - `bias_h`:     (hidden, 1)
/// - `bias_o`:     (output, 1)
#[derive(Debug, Clone)]
pub struct NeuralNetwork {
    input_nodes: usize,
    hidden_nodes: usize,
    output_nodes: usize,
    weights_ih: Matrix,
    weights_ho: Matrix,
    bias_h: Matrix,
    bias_o: Matrix,
    learning_rate: f64,
}

impl NeuralNetwork {
    /// Builds a network with the default learning rate and weights drawn from
    /// the OS random source.
    pub fn new(
        input_nodes: usize,
        hidden_nodes: usize,
        output_nodes: usize,
    ) -> Result<NeuralNetwork> {
        NeuralNetwork::from_config(&NetworkConfig::new(input_nodes, hidden_nodes, output_nodes))
    }

    pub fn from_config(config: &NetworkConfig) -> Result<NeuralNetwork> {
        NeuralNetwork::from_config_with_rng(config, &mut OsRng)
    }

    /// Builds a network whose weights and biases are drawn from `rng`.
    /// Use a seeded generator for reproducible runs.
    pub fn from_config_with_rng<R: Rng + ?Sized>(
        config: &NetworkConfig,
        rng: &mut R,
    ) -> Result<NeuralNetwork> {
        config.validate()?;

        let mut weights_ih = Matrix::new(config.hidden_nodes, config.input_nodes)?;
        let mut weights_ho = Matrix::new(config.output_nodes, config.hidden_nodes)?;
        weights_ih.randomize_with(rng);
        weights_ho.randomize_with(rng);

        let mut bias_h = Matrix::new(config.hidden_nodes, 1)?;
        let mut bias_o = Matrix::new(config.output_nodes, 1)?;
        bias_h.randomize_with(rng);
        bias_o.randomize_with(rng);

        debug!(
            input_nodes = config.input_nodes,
            hidden_nodes = config.hidden_nodes,
            output_nodes = config.output_nodes,
            learning_rate = config.learning_rate,
            "network initialised"
        );

        Ok(NeuralNetwork {
            input_nodes: config.input_nodes,
            hidden_nodes: config.hidden_nodes,
            output_nodes: config.output_nodes,
            weights_ih,
            weights_ho,
            bias_h,
            bias_o,
            learning_rate: config.learning_rate,
        })
    }

    /// Forward pass. `input` must have `input_nodes` elements; the result has
    /// `output_nodes` elements. Does not modify the network.
    pub fn predict(&self, input: &[f64]) -> Result<Vec<f64>> {
        let inputs = column(input, self.input_nodes)?;
        let (_, outputs) = self.feed_forward(&inputs)?;
        Ok(outputs.to_vec())
    }

    /// One step of online backpropagation on a single `(input, target)` pair.
    ///
    /// Returns the squared-error loss of the prediction made before the
    /// update. On error the network is left untouched.
    pub fn train(&mut self, input: &[f64], target: &[f64]) -> Result<f64> {
        let inputs = column(input, self.input_nodes)?;
        let targets = column(target, self.output_nodes)?;

        let (hidden, outputs) = self.feed_forward(&inputs)?;
        let loss = MseLoss::loss(&outputs.to_vec(), target);

        // error = target - output
        let output_errors = Matrix::subtract(&targets, &outputs)?;

        // gradient = σ'(output) ⊙ error ⊙ lr
        let mut gradients = outputs.map(dsigmoid);
        gradients.hadamard_in_place(&output_errors)?;
        gradients.scale_in_place(self.learning_rate);
        let weights_ho_deltas = Matrix::multiply(&gradients, &hidden.transpose())?;

        // Must see weights_ho as it was during the forward pass.
        let hidden_errors = Matrix::multiply(&self.weights_ho.transpose(), &output_errors)?;

        let mut hidden_gradients = hidden.map(dsigmoid);
        hidden_gradients.hadamard_in_place(&hidden_errors)?;
        hidden_gradients.scale_in_place(self.learning_rate);
        let weights_ih_deltas = Matrix::multiply(&hidden_gradients, &inputs.transpose())?;

        self.weights_ho.add(&weights_ho_deltas)?;
        self.bias_o.add(&gradients)?;
        self.weights_ih.add(&weights_ih_deltas)?;
        self.bias_h.add(&hidden_gradients)?;

        Ok(loss)
    }

    /// Returns `(hidden, output)` activations for a column of inputs.
    fn feed_forward(&self, inputs: &Matrix) -> Result<(Matrix, Matrix)> {
        let hidden = activate(&self.weights_ih, &self.bias_h, inputs)?;
        let outputs = activate(&self.weights_ho, &self.bias_o, &hidden)?;
        Ok((hidden, outputs))
    }

    pub fn input_nodes(&self) -> usize {
        self.input_nodes
    }

    pub fn hidden_nodes(&self) -> usize {
        self.hidden_nodes
    }

    pub fn output_nodes(&self) -> usize {
        self.output_nodes
    }

    pub fn weights_ih(&self) -> &Matrix {
        &self.weights_ih
    }

    pub fn weights_ho(&self) -> &Matrix {
        &self.weights_ho
    }

    pub fn bias_h(&self) -> &Matrix {
        &self.bias_h
    }

    pub fn bias_o(&self) -> &Matrix {
        &self.bias_o
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Changes the step size used by later calls to [`NeuralNetwork::train`].
    pub fn set_learning_rate(&mut self, learning_rate: f64) -> Result<()> {
        check_learning_rate(learning_rate)?;
        self.learning_rate = learning_rate;
        Ok(())
    }
}

/// sigmoid(weights · input + bias)
fn activate(weights: &Matrix, bias: &Matrix, input: &Matrix) -> Result<Matrix> {
    let mut z = Matrix::multiply(weights, input)?;
    z.add(bias)?;
    z.map_in_place(sigmoid);
    Ok(z)
}

/// Column matrix from `values`, which must hold exactly `len` elements.
fn column(values: &[f64], len: usize) -> Result<Matrix> {
    if values.len() != len {
        return Err(NnError::ShapeMismatch {
            expected: (len, 1),
            actual: (values.len(), 1),
        });
    }
    Matrix::from_slice(values)
}

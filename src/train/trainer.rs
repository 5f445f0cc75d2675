use crate::{
    error::{NnError, Result},
    loss::mse::MseLoss,
    network::network::NeuralNetwork,
};

/// One online pass over the training pairs, in the order given.
///
/// Every pair updates the network immediately. Returns the mean
/// squared-error loss, each sample measured just before its own update.
/// Stops at the first pair that fails; pairs before it stay applied.
pub fn train_epoch(
    network: &mut NeuralNetwork,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
) -> Result<f64> {
    check_dataset(inputs, targets)?;
    let order: Vec<usize> = (0..inputs.len()).collect();
    train_in_order(network, inputs, targets, &order)
}

/// Mean squared-error loss of the current predictions. Leaves the network
/// unchanged. Every target must have `output_nodes` elements.
pub fn evaluate(
    network: &NeuralNetwork,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
) -> Result<f64> {
    check_dataset(inputs, targets)?;

    let mut total_loss = 0.0;
    for (input, target) in inputs.iter().zip(targets.iter()) {
        if target.len() != network.output_nodes() {
            return Err(NnError::ShapeMismatch {
                expected: (network.output_nodes(), 1),
                actual: (target.len(), 1),
            });
        }
        let output = network.predict(input)?;
        total_loss += MseLoss::loss(&output, target);
    }

    Ok(total_loss / inputs.len() as f64)
}

/// Trains on `inputs[order[0]]`, `inputs[order[1]]`, ... Callers have already
/// run `check_dataset` and `order` indexes within it.
pub(crate) fn train_in_order(
    network: &mut NeuralNetwork,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    order: &[usize],
) -> Result<f64> {
    let mut total_loss = 0.0;

    for &idx in order {
        total_loss += network.train(&inputs[idx], &targets[idx])?;
    }

    Ok(total_loss / order.len() as f64)
}

pub(crate) fn check_dataset(inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<()> {
    if inputs.len() != targets.len() {
        return Err(NnError::DatasetMismatch {
            inputs: inputs.len(),
            targets: targets.len(),
        });
    }
    if inputs.is_empty() {
        return Err(NnError::EmptyDataset);
    }
    Ok(())
}

use std::time::Instant;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::error::Result;
use crate::network::network::NeuralNetwork;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::{check_dataset, train_in_order};

/// Trains `network` for `config.epochs` epochs and returns the mean training
/// loss of the **last completed epoch** (`0.0` when `epochs` is 0).
///
/// # Arguments
/// - `network` — modified in place
/// - `inputs`  — training samples, each of length `network.input_nodes()`
/// - `targets` — matching targets, each of length `network.output_nodes()`
/// - `config`  — epoch count, ordering, logging and optional progress channel
///
/// Updates stay online: one weight update per sample, never batched.
///
/// # Early termination
/// The loop stops after the current epoch if the `progress_tx` receiver has
/// been dropped.
///
/// # Errors
/// `EmptyDataset` or `DatasetMismatch` before any training happens; any
/// per-sample `ShapeMismatch` aborts the run at that sample.
pub fn train_loop(
    network: &mut NeuralNetwork,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    config: &TrainConfig,
) -> Result<f64> {
    train_loop_with_rng(network, inputs, targets, config, &mut rand::thread_rng())
}

/// Like [`train_loop`] but shuffles with `rng`, so a seeded generator makes
/// shuffled runs reproducible. `rng` is untouched when `config.shuffle` is off.
pub fn train_loop_with_rng<R: Rng + ?Sized>(
    network: &mut NeuralNetwork,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    config: &TrainConfig,
    rng: &mut R,
) -> Result<f64> {
    check_dataset(inputs, targets)?;

    let mut order: Vec<usize> = (0..inputs.len()).collect();
    let mut last_train_loss = 0.0;

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();

        if config.shuffle {
            order.shuffle(&mut *rng);
        }
        let train_loss = train_in_order(network, inputs, targets, &order)?;
        last_train_loss = train_loss;

        if config.log_every > 0 && (epoch % config.log_every == 0 || epoch == config.epochs) {
            info!(epoch, total_epochs = config.epochs, train_loss, "epoch complete");
        }

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };

        if let Some(ref tx) = config.progress_tx {
            if tx.send(stats).is_err() {
                debug!(epoch, "progress receiver dropped, stopping");
                break;
            }
        }
    }

    Ok(last_train_loss)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NnError;
    use crate::network::config::NetworkConfig;
    use crate::train::trainer::train_epoch;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::mpsc;

    fn net(seed: u64) -> NeuralNetwork {
        let config = NetworkConfig::new(2, 4, 1);
        NeuralNetwork::from_config_with_rng(&config, &mut StdRng::seed_from_u64(seed)).unwrap()
    }

    fn and_gate() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
        (
            vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]],
            vec![vec![0.0], vec![0.0], vec![0.0], vec![1.0]],
        )
    }

    #[test]
    fn fixed_order_matches_repeated_epochs() {
        let (inputs, targets) = and_gate();

        let mut a = net(2);
        let loss = train_loop(&mut a, &inputs, &targets, &TrainConfig::new(3)).unwrap();

        let mut b = net(2);
        let mut expected = 0.0;
        for _ in 0..3 {
            expected = train_epoch(&mut b, &inputs, &targets).unwrap();
        }

        assert_eq!(loss, expected);
        assert_eq!(a.weights_ho(), b.weights_ho());
    }

    #[test]
    fn zero_epochs_leaves_network_alone() {
        let (inputs, targets) = and_gate();
        let mut n = net(3);
        let before = n.clone();
        assert_eq!(train_loop(&mut n, &inputs, &targets, &TrainConfig::new(0)).unwrap(), 0.0);
        assert_eq!(n.weights_ih(), before.weights_ih());
    }

    #[test]
    fn sends_one_stat_per_epoch() {
        let (inputs, targets) = and_gate();
        let (tx, rx) = mpsc::channel();
        let config = TrainConfig::new(5).with_progress(tx);

        let mut n = net(4);
        let last = train_loop(&mut n, &inputs, &targets, &config).unwrap();
        drop(config);

        let stats: Vec<EpochStats> = rx.iter().collect();
        assert_eq!(stats.len(), 5);
        assert_eq!(stats[0].epoch, 1);
        assert!(stats.iter().all(|s| s.total_epochs == 5));
        assert_eq!(stats[4].train_loss, last);
    }

    #[test]
    fn stops_when_receiver_dropped() {
        let (inputs, targets) = and_gate();
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let config = TrainConfig::new(1000).with_progress(tx);

        let mut n = net(5);
        let mut reference = net(5);
        train_epoch(&mut reference, &inputs, &targets).unwrap();

        train_loop(&mut n, &inputs, &targets, &config).unwrap();
        assert_eq!(n.weights_ih(), reference.weights_ih());
    }

    #[test]
    fn shuffled_training_still_learns() {
        let (inputs, targets) = and_gate();
        let mut n = net(6);
        n.set_learning_rate(0.5).unwrap();
        let config = TrainConfig::new(2000).with_shuffle(true).with_log_every(500);

        let first = train_epoch(&mut n.clone(), &inputs, &targets).unwrap();
        let mut rng = StdRng::seed_from_u64(60);
        let last = train_loop_with_rng(&mut n, &inputs, &targets, &config, &mut rng).unwrap();
        assert!(last < first);
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let (inputs, targets) = and_gate();
        let config = TrainConfig::new(20).with_shuffle(true);

        let mut a = net(8);
        let mut b = net(8);
        let loss_a =
            train_loop_with_rng(&mut a, &inputs, &targets, &config, &mut StdRng::seed_from_u64(1))
                .unwrap();
        let loss_b =
            train_loop_with_rng(&mut b, &inputs, &targets, &config, &mut StdRng::seed_from_u64(1))
                .unwrap();

        assert_eq!(loss_a, loss_b);
        assert_eq!(a.weights_ih(), b.weights_ih());
        assert_eq!(a.bias_o(), b.bias_o());
    }

    #[test]
    fn rejects_empty_dataset() {
        let mut n = net(7);
        assert_eq!(
            train_loop(&mut n, &[], &[], &TrainConfig::new(10)),
            Err(NnError::EmptyDataset)
        );
    }
}

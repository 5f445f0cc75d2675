use rand::rngs::StdRng;
use rand::SeedableRng;
use toy_nn::{evaluate, train_epoch, NetworkConfig, NeuralNetwork};

fn xor_pairs() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    (
        vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]],
        vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]],
    )
}

fn xor_network(seed: u64) -> NeuralNetwork {
    let config = NetworkConfig::new(2, 16, 1);
    NeuralNetwork::from_config_with_rng(&config, &mut StdRng::seed_from_u64(seed)).unwrap()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

#[test]
fn learns_xor() {
    let (inputs, targets) = xor_pairs();

    for seed in [1, 2, 3] {
        let mut network = xor_network(seed);
        let initial = evaluate(&network, &inputs, &targets).unwrap();

        let losses: Vec<f64> = (0..5000)
            .map(|_| train_epoch(&mut network, &inputs, &targets).unwrap())
            .collect();

        // Loss falls on average: every block of 500 epochs ends lower than the first.
        let first_block = mean(&losses[..500]);
        for block in losses.chunks(500).skip(1) {
            assert!(mean(block) < first_block, "seed {seed}: loss did not fall");
        }

        let final_loss = evaluate(&network, &inputs, &targets).unwrap();
        assert!(final_loss < initial, "seed {seed}: {final_loss} >= {initial}");

        for (input, target) in inputs.iter().zip(targets.iter()) {
            let guess = network.predict(input).unwrap()[0];
            assert!(
                (guess - target[0]).abs() < 0.2,
                "seed {seed}: {input:?} -> {guess}, expected {}",
                target[0]
            );
        }
    }
}

#[test]
fn untrained_network_predicts_deterministically() {
    let network = NeuralNetwork::new(2, 16, 1).unwrap();
    let a = network.predict(&[1.0, 0.0]).unwrap();
    let b = network.predict(&[1.0, 0.0]).unwrap();
    assert_eq!(a, b);
    assert!(a[0] > 0.0 && a[0] < 1.0);
}

//! XOR demo: builds a 2-input, 1-output network, prints its guesses, trains
//! it on the four XOR pairs and prints the guesses again.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use toy_nn::{evaluate, train_loop, NetworkConfig, NeuralNetwork, TrainConfig};

#[derive(Parser)]
#[command(name = "toy-nn")]
#[command(version = "0.1.0")]
#[command(about = "Train a one-hidden-layer network on XOR")]
struct Cli {
    /// Hidden layer size
    #[arg(long, default_value_t = 16)]
    hidden: usize,

    /// Passes over the four XOR pairs
    #[arg(long, default_value_t = 2000)]
    epochs: usize,

    /// Learning rate
    #[arg(long, default_value_t = 0.1)]
    learning_rate: f64,

    /// Seed for weight initialisation (OS randomness when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Network config JSON; overrides --hidden and --learning-rate
    #[arg(long)]
    config: Option<PathBuf>,
}

fn xor_pairs() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    (
        vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]],
        vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]],
    )
}

fn print_guesses(network: &NeuralNetwork, inputs: &[Vec<f64>]) -> anyhow::Result<()> {
    for input in inputs {
        let guess = network.predict(input)?;
        println!("\tGuess for {} XOR {}: {}", input[0], input[1], guess[0]);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let path_str = path.to_str().context("config path is not valid UTF-8")?;
            NetworkConfig::load_json(path_str)
                .with_context(|| format!("failed to load {}", path.display()))?
        }
        None => NetworkConfig::new(2, cli.hidden, 1).with_learning_rate(cli.learning_rate),
    };
    if config.input_nodes != 2 || config.output_nodes != 1 {
        bail!(
            "XOR needs a 2-input, 1-output network, config describes {} inputs and {} outputs",
            config.input_nodes,
            config.output_nodes
        );
    }

    let mut network = match cli.seed {
        Some(seed) => {
            NeuralNetwork::from_config_with_rng(&config, &mut StdRng::seed_from_u64(seed))?
        }
        None => NeuralNetwork::from_config(&config)?,
    };

    let (inputs, targets) = xor_pairs();

    println!("\nPrior to training:\n");
    print_guesses(&network, &inputs)?;

    let train_config = TrainConfig::new(cli.epochs).with_log_every((cli.epochs / 10).max(1));
    let loss = train_loop(&mut network, &inputs, &targets, &train_config)?;

    println!("\nAfter training for {} epochs (last epoch loss {:.6}):\n", cli.epochs, loss);
    print_guesses(&network, &inputs)?;
    println!("\n\tMean squared error: {:.6}", evaluate(&network, &inputs, &targets)?);

    Ok(())
}

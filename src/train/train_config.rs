use std::sync::mpsc;

use crate::train::epoch_stats::EpochStats;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`      — number of full passes over the training pairs
/// - `shuffle`     — visit samples in a fresh random order every epoch instead
///                   of the order given
/// - `log_every`   — emit an `info` log line every this many epochs
///                   (`0` disables it)
/// - `progress_tx` — optional channel sender; one `EpochStats` is sent per
///                   completed epoch.  If the receiver is dropped the loop
///                   stops after the current epoch.
pub struct TrainConfig {
    pub epochs: usize,
    pub shuffle: bool,
    pub log_every: usize,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
}

impl TrainConfig {
    /// Fixed sample order, no logging, no progress channel.
    pub fn new(epochs: usize) -> Self {
        TrainConfig {
            epochs,
            shuffle: false,
            log_every: 0,
            progress_tx: None,
        }
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn with_log_every(mut self, log_every: usize) -> Self {
        self.log_every = log_every;
        self
    }

    pub fn with_progress(mut self, progress_tx: mpsc::Sender<EpochStats>) -> Self {
        self.progress_tx = Some(progress_tx);
        self
    }
}

/// Statistics for one completed epoch of `train_loop`.
///
/// When `TrainConfig::progress_tx` is set, one value is sent per epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Mean per-sample squared error over the epoch, measured before each
    /// sample's update.
    pub train_loss: f64,
    /// Wall-clock duration of this epoch in milliseconds.
    pub elapsed_ms: u64,
}

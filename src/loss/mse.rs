/// Mean squared error, used to report training progress.
///
/// The network's update rule is driven by the raw error `target - output`;
/// this value only measures how far off a prediction was.
pub struct MseLoss;

impl MseLoss {
    /// mean((predicted - expected)²). Both slices must be non-empty and of
    /// equal length; callers check this before asking for a loss.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        debug_assert_eq!(predicted.len(), expected.len());
        let n = predicted.len() as f64;
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>() / n
    }
}

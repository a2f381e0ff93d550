/// Errors returned by candidate selection.
#[derive(thiserror::Error, Debug)]
pub enum SelectError {
    /// The seed array did not supply exactly `k` centroids. This is a logic
    /// bug in normalization, not a data condition.
    #[error("clustering input mismatch: k={k} but {seeds} seed centroids")]
    ClusteringInputMismatch { k: usize, seeds: usize },
}

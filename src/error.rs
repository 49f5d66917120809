use thiserror::Error;

/// Error types for the sales-kmeans library
#[derive(Error, Debug)]
pub enum KMeansError {
    /// A record or input row could not be turned into a feature vector.
    /// `row` is the 1-based data row (header excluded).
    #[error("Malformed input at row {row}: {reason}")]
    MalformedInput { row: usize, reason: String },

    /// k must lie in `[1, n_samples]`
    #[error("Invalid cluster count: k = {k} with {n_samples} samples (need 1 <= k <= n_samples)")]
    InvalidClusterCount { k: usize, n_samples: usize },

    /// There are no records or points to cluster
    #[error("Empty input: nothing to cluster")]
    EmptyInput,

    /// A configuration value is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Model has not been fitted yet
    #[error("Model has not been fitted. Call fit() first.")]
    NotFitted,

    /// Dimension mismatch between data and model
    #[error("Dimension mismatch: {0}")]
    InvalidDimensions(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

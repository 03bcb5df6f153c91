//! Error types for the operator crate.

use thiserror::Error;

/// Errors that can occur while reconciling pods.
#[derive(Error, Debug)]
pub enum OperatorError {
    /// Kubernetes API error (other than not-found, which is not an error).
    #[error("Kubernetes API error: {0}")]
    KubeApi(#[from] kube::Error),

    /// The output sink rejected a failure record.
    #[error("Failure sink error: {0}")]
    Sink(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl OperatorError {
    /// Check if this error is retriable.
    ///
    /// Retriable errors are returned to the controller, which requeues the
    /// pod according to its error policy.
    #[must_use]
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::KubeApi(_) | Self::Sink(_))
    }
}

/// A specialized Result type for operator operations.
pub type Result<T> = std::result::Result<T, OperatorError>;

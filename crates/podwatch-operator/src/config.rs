//! Operator configuration.

use std::time::Duration;

use crate::{OperatorError, Result};

/// Configuration for the pod failure operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorConfig {
    /// Namespace to watch. `None` watches every namespace.
    pub watch_namespace: Option<String>,
    /// Bind address of the health server.
    pub listen_addr: String,
    /// Delay before a pod whose reconciliation failed is retried.
    pub error_requeue_seconds: u64,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            watch_namespace: None,
            listen_addr: "0.0.0.0:8081".to_string(),
            error_requeue_seconds: 15,
        }
    }
}

impl OperatorConfig {
    /// Create a config that watches a single namespace.
    #[must_use]
    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            watch_namespace: Some(namespace.into()),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Supported environment variables:
    /// - `WATCH_NAMESPACE`: namespace to watch (unset or empty: all namespaces)
    /// - `LISTEN_ADDR`: bind address of the health server
    /// - `ERROR_REQUEUE_SECONDS`: retry delay after a failed reconciliation
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(val) = lookup("WATCH_NAMESPACE") {
            let val = val.trim();
            if !val.is_empty() {
                config.watch_namespace = Some(val.to_string());
            }
        }
        if let Some(val) = lookup("LISTEN_ADDR") {
            config.listen_addr = val;
        }
        if let Some(val) = lookup("ERROR_REQUEUE_SECONDS") {
            if let Ok(n) = val.parse() {
                config.error_requeue_seconds = n;
            }
        }

        config
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the listen address is empty or the requeue delay is zero.
    pub fn validate(&self) -> Result<()> {
        if self.listen_addr.trim().is_empty() {
            return Err(OperatorError::Config("LISTEN_ADDR is empty".to_string()));
        }
        if self.error_requeue_seconds == 0 {
            return Err(OperatorError::Config(
                "ERROR_REQUEUE_SECONDS must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the error requeue delay as a `Duration`.
    #[must_use]
    pub fn error_requeue(&self) -> Duration {
        Duration::from_secs(self.error_requeue_seconds)
    }
}

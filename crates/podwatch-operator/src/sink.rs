//! Output stage for detected failures.
//!
//! A [`FailureSink`] receives every [`PodFailure`] the reconciler detects.
//! [`LogSink`] writes a structured log event; later pipeline stages
//! (context aggregation, diagnosis, remediation) plug in here.

use async_trait::async_trait;
use podwatch_core::PodFailure;
use tracing::warn;

use crate::Result;

/// Receiver of detected pod failures.
#[async_trait]
pub trait FailureSink: Send + Sync {
    /// Hand a detected failure to the next stage.
    ///
    /// # Errors
    ///
    /// Returns an error if the failure could not be delivered. The pod is
    /// then requeued by the controller.
    async fn emit(&self, failure: &PodFailure) -> Result<()>;
}

/// Sink that records each failure as a structured log event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

#[async_trait]
impl FailureSink for LogSink {
    async fn emit(&self, failure: &PodFailure) -> Result<()> {
        // The platform message is the event message, so it lands in the
        // `message` field verbatim.
        warn!(
            pod = %failure.pod_name,
            namespace = %failure.namespace,
            failure_type = %failure.failure_type,
            container = failure.container_name.as_deref().unwrap_or(""),
            restart_count = failure.restart_count,
            message = %failure.message
        );
        Ok(())
    }
}

/// An in-memory sink for testing.
#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    use super::*;
    use crate::OperatorError;
    use parking_lot::Mutex;

    /// A sink that keeps every failure it receives.
    #[derive(Default)]
    pub struct RecordingSink {
        failures: Mutex<Vec<PodFailure>>,
        rejecting: Mutex<bool>,
    }

    impl RecordingSink {
        /// Create an empty recording sink.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every emit fail.
        pub fn set_rejecting(&self, rejecting: bool) {
            *self.rejecting.lock() = rejecting;
        }

        /// All failures received so far, in order.
        #[must_use]
        pub fn failures(&self) -> Vec<PodFailure> {
            self.failures.lock().clone()
        }

        /// Number of failures received.
        #[must_use]
        pub fn len(&self) -> usize {
            self.failures.lock().len()
        }

        /// Check if no failure has been received.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.failures.lock().is_empty()
        }
    }

    #[async_trait]
    impl FailureSink for RecordingSink {
        async fn emit(&self, failure: &PodFailure) -> Result<()> {
            if *self.rejecting.lock() {
                return Err(OperatorError::Sink("downstream stage unavailable".to_string()));
            }
            self.failures.lock().push(failure.clone());
            Ok(())
        }
    }
}

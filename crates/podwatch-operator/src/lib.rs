//! Kubernetes operator that detects and classifies failing pods.
//!
//! This crate connects the pure classifier in [`podwatch_core`] to a
//! cluster. It handles:
//!
//! - Watching pods through a `kube` controller
//! - Re-fetching current pod state for each reconciliation request
//! - Skipping platform namespaces
//! - Handing detected failures to a [`FailureSink`]
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Kubernetes API Server                         │
//! └─────────────────────────────────────────────────────────────────┘
//!               │ watch                          ▲ get
//!               ▼                                │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    kube::runtime::Controller                     │
//! └─────────────────────────────────────────────────────────────────┘
//!                              │ pod identity
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        PodReconciler                             │
//! │  ┌─────────────┐ ┌─────────────┐ ┌─────────────┐ ┌───────────┐  │
//! │  │ PodSource   │ │ Namespace   │ │ Classifier  │ │ Failure   │  │
//! │  │ (fetch)     │ │ Filter      │ │             │ │ Sink      │  │
//! │  └─────────────┘ └─────────────┘ └─────────────┘ └───────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use podwatch_operator::{KubePodSource, LogSink, OperatorConfig, PodReconciler};
//! use podwatch_core::PodKey;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = kube::Client::try_default().await?;
//! let reconciler = PodReconciler::new(
//!     KubePodSource::new(client),
//!     LogSink,
//!     OperatorConfig::default(),
//! );
//!
//! let outcome = reconciler.reconcile(&PodKey::new("shop", "checkout-7d9f8")).await?;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```
//!
//! # Testing
//!
//! Enable the `test-utils` feature for in-memory collaborators:
//!
//! ```ignore
//! use podwatch_operator::{MockPodSource, OperatorConfig, PodReconciler, RecordingSink};
//!
//! let reconciler = PodReconciler::new(
//!     MockPodSource::new(),
//!     RecordingSink::new(),
//!     OperatorConfig::default(),
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod health;
pub mod observe;
pub mod reconciler;
pub mod sink;
pub mod source;

pub use config::OperatorConfig;
pub use error::{OperatorError, Result};
pub use health::{create_router, Readiness};
pub use observe::{observe_pod, pod_key};
pub use reconciler::{run_controller, PodReconciler, ReconcileOutcome};
pub use sink::{FailureSink, LogSink};
pub use source::{KubePodSource, PodSource};

#[cfg(any(test, feature = "test-utils"))]
pub use sink::mock::RecordingSink;
#[cfg(any(test, feature = "test-utils"))]
pub use source::mock::MockPodSource;

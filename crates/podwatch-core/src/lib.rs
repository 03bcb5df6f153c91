//! Pod failure detection and classification for podwatch.
//!
//! This crate holds the decision logic of the operator, free of any
//! Kubernetes client code:
//!
//! - **Observation**: [`PodObservation`], the slice of pod status we classify
//! - **Taxonomy**: [`FailureType`], a closed set of failure categories
//! - **Namespace filter**: [`is_system_namespace`]
//! - **Classifier**: [`detect_failure`], observation → at most one [`PodFailure`]
//!
//! Everything here is pure and stateless.
//!
//! # Example
//!
//! ```
//! use podwatch_core::{
//!     detect_failure, ContainerObservation, ContainerState, FailureType, PodObservation,
//!     PodPhase,
//! };
//!
//! let pod = PodObservation::new("shop", "checkout-7d9f8")
//!     .with_phase(PodPhase::Running)
//!     .with_container(ContainerObservation::new(
//!         "app",
//!         4,
//!         ContainerState::waiting("CrashLoopBackOff", "back-off 40s"),
//!     ));
//!
//! let failure = detect_failure(&pod).unwrap();
//! assert_eq!(failure.failure_type, FailureType::CrashLoopBackOff);
//! assert_eq!(failure.container_name.as_deref(), Some("app"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod classifier;
pub mod failure;
pub mod key;
pub mod namespace;
pub mod observation;

pub use classifier::detect_failure;
pub use failure::{FailureType, PodFailure};
pub use key::PodKey;
pub use namespace::is_system_namespace;
pub use observation::{ContainerObservation, ContainerState, PodObservation, PodPhase};

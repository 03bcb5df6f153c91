//! Failure taxonomy and the failure record handed to downstream stages.
//!
//! The platform reports a wide and growing vocabulary of reason strings.
//! [`FailureType`] collapses the ones we act on into a closed set; anything
//! unmapped becomes [`FailureType::Unknown`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Waiting reasons that mark a container as failing.
pub const WAITING_FAILURE_REASONS: [&str; 6] = [
    "CrashLoopBackOff",
    "ImagePullBackOff",
    "ErrImagePull",
    "CreateContainerConfigError",
    "InvalidImageName",
    "RunContainerError",
];

/// Terminated reasons that mark a container as failing.
pub const TERMINATED_FAILURE_REASONS: [&str; 2] = ["OOMKilled", "Error"];

/// Check whether a waiting reason indicates a failure.
///
/// Normal startup reasons such as `ContainerCreating` or `PodInitializing`
/// return `false`, as does any reason the platform adds in the future.
#[must_use]
pub fn is_waiting_failure_reason(reason: &str) -> bool {
    WAITING_FAILURE_REASONS.contains(&reason)
}

/// Check whether a terminated reason indicates a failure.
///
/// `Completed` (exit code 0) returns `false`.
#[must_use]
pub fn is_terminated_failure_reason(reason: &str) -> bool {
    TERMINATED_FAILURE_REASONS.contains(&reason)
}

/// Category of a detected pod failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FailureType {
    /// Container keeps crashing and the kubelet is backing off restarts.
    CrashLoopBackOff,
    /// Image cannot be pulled (`ImagePullBackOff`, `ErrImagePull`, `InvalidImageName`).
    ImagePullBackOff,
    /// Container was killed for exceeding its memory limit.
    #[serde(rename = "OOMKilled")]
    OomKilled,
    /// Container config references a missing secret or config map.
    CreateContainerConfigError,
    /// Runtime failed to start the container.
    RunContainerError,
    /// Pod was evicted by the kubelet.
    Evicted,
    /// Container exited with a non-zero code.
    Error,
    /// Failure that does not map to a known category.
    #[default]
    Unknown,
}

impl FailureType {
    /// Map a platform reason string to a failure type.
    ///
    /// Total: reasons with no mapping return [`FailureType::Unknown`].
    #[must_use]
    pub fn from_reason(reason: &str) -> Self {
        match reason {
            "CrashLoopBackOff" => Self::CrashLoopBackOff,
            "ImagePullBackOff" | "ErrImagePull" | "InvalidImageName" => Self::ImagePullBackOff,
            "OOMKilled" => Self::OomKilled,
            "CreateContainerConfigError" => Self::CreateContainerConfigError,
            "RunContainerError" => Self::RunContainerError,
            "Evicted" => Self::Evicted,
            "Error" => Self::Error,
            _ => Self::Unknown,
        }
    }

    /// The canonical name of this failure type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CrashLoopBackOff => "CrashLoopBackOff",
            Self::ImagePullBackOff => "ImagePullBackOff",
            Self::OomKilled => "OOMKilled",
            Self::CreateContainerConfigError => "CreateContainerConfigError",
            Self::RunContainerError => "RunContainerError",
            Self::Evicted => "Evicted",
            Self::Error => "Error",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure detected on a pod during one reconciliation pass.
///
/// Only ever built from an actual failure condition; a healthy pod yields no
/// record at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodFailure {
    /// Name of the failing pod.
    pub pod_name: String,
    /// Namespace of the failing pod.
    pub namespace: String,
    /// Failure category.
    pub failure_type: FailureType,
    /// Offending container, `None` for pod-scoped failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_name: Option<String>,
    /// Diagnostic message from the platform, verbatim.
    pub message: String,
    /// Restart count of the offending container, 0 for pod-scoped failures.
    pub restart_count: i32,
}

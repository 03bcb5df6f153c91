//! Pod failure classification.
//!
//! [`detect_failure`] turns a [`PodObservation`] into at most one
//! [`PodFailure`]. Checks run in a fixed order and the first match wins:
//!
//! 1. Container statuses, in reported order. A waiting container with a
//!    failure reason, or a terminated container with reason `OOMKilled` or
//!    `Error`, produces a container-scoped failure.
//! 2. Pod reason `Evicted` produces a pod-scoped [`FailureType::Evicted`].
//! 3. Phase `Failed` produces a pod-scoped [`FailureType::Unknown`].
//!
//! Only the first failing container is reported. When several containers
//! fail at once the others are not surfaced in that pass; downstream stages
//! expect one record per reconciliation.

use crate::failure::{
    is_terminated_failure_reason, is_waiting_failure_reason, FailureType, PodFailure,
};
use crate::observation::{ContainerObservation, ContainerState, PodObservation, PodPhase};

/// Classify a pod observation.
///
/// Returns `None` for healthy pods and for pods in a non-failure transient
/// state (starting up, completed, succeeded).
#[must_use]
pub fn detect_failure(pod: &PodObservation) -> Option<PodFailure> {
    if let Some(failure) = pod
        .containers
        .iter()
        .find_map(|container| container_failure(pod, container))
    {
        return Some(failure);
    }

    if pod.reason.as_deref() == Some("Evicted") {
        return Some(pod_failure(pod, FailureType::Evicted));
    }

    if pod.phase == PodPhase::Failed {
        return Some(pod_failure(pod, FailureType::Unknown));
    }

    None
}

fn container_failure(pod: &PodObservation, container: &ContainerObservation) -> Option<PodFailure> {
    let (reason, message) = match &container.state {
        ContainerState::Waiting { reason, message } if is_waiting_failure_reason(reason) => {
            (reason, message)
        }
        ContainerState::Terminated { reason, message } if is_terminated_failure_reason(reason) => {
            (reason, message)
        }
        _ => return None,
    };

    Some(PodFailure {
        pod_name: pod.name.clone(),
        namespace: pod.namespace.clone(),
        failure_type: FailureType::from_reason(reason),
        container_name: Some(container.name.clone()),
        message: message.clone(),
        restart_count: container.restart_count,
    })
}

fn pod_failure(pod: &PodObservation, failure_type: FailureType) -> PodFailure {
    PodFailure {
        pod_name: pod.name.clone(),
        namespace: pod.namespace.clone(),
        failure_type,
        container_name: None,
        message: pod.message.clone(),
        restart_count: 0,
    }
}

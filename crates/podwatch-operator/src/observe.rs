//! Conversion from Kubernetes pod objects to classifier observations.

use k8s_openapi::api::core::v1::{ContainerState as K8sContainerState, ContainerStatus, Pod};
use podwatch_core::{ContainerObservation, ContainerState, PodKey, PodObservation, PodPhase};

/// Get the identity of a pod.
///
/// Returns `None` if the pod has no name or namespace.
#[must_use]
pub fn pod_key(pod: &Pod) -> Option<PodKey> {
    let name = pod.metadata.name.as_deref()?;
    let namespace = pod.metadata.namespace.as_deref()?;
    Some(PodKey::new(namespace, name))
}

/// Build a classifier observation from a pod.
///
/// Only regular container statuses are observed; init containers are not.
#[must_use]
pub fn observe_pod(pod: &Pod) -> PodObservation {
    let status = pod.status.as_ref();

    let phase = status
        .and_then(|s| s.phase.as_deref())
        .map(PodPhase::from_k8s_phase)
        .unwrap_or_default();

    let containers = status
        .and_then(|s| s.container_statuses.as_ref())
        .map(|statuses| statuses.iter().map(observe_container).collect())
        .unwrap_or_default();

    PodObservation {
        name: pod.metadata.name.clone().unwrap_or_default(),
        namespace: pod.metadata.namespace.clone().unwrap_or_default(),
        phase,
        reason: status.and_then(|s| s.reason.clone()),
        message: status.and_then(|s| s.message.clone()).unwrap_or_default(),
        containers,
    }
}

fn observe_container(status: &ContainerStatus) -> ContainerObservation {
    ContainerObservation::new(
        status.name.clone(),
        status.restart_count,
        observe_state(status.state.as_ref()),
    )
}

/// Collapse the platform's optional state fields into a single state.
///
/// An empty state is treated as waiting, which is the platform default.
fn observe_state(state: Option<&K8sContainerState>) -> ContainerState {
    let Some(state) = state else {
        return ContainerState::waiting("", "");
    };

    if let Some(waiting) = &state.waiting {
        return ContainerState::waiting(
            waiting.reason.clone().unwrap_or_default(),
            waiting.message.clone().unwrap_or_default(),
        );
    }
    if let Some(terminated) = &state.terminated {
        return ContainerState::terminated(
            terminated.reason.clone().unwrap_or_default(),
            terminated.message.clone().unwrap_or_default(),
        );
    }
    if state.running.is_some() {
        return ContainerState::Running;
    }

    ContainerState::waiting("", "")
}

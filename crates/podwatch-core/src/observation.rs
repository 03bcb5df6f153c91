//! Point-in-time view of a pod's status.
//!
//! A [`PodObservation`] is rebuilt from the cluster on every reconciliation
//! pass and is never cached. It keeps only the fields the classifier reads.

/// Phase of the pod lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PodPhase {
    /// Pod has been accepted but containers are not yet running.
    Pending,
    /// Pod is bound to a node and at least one container is running.
    Running,
    /// All containers terminated successfully.
    Succeeded,
    /// All containers terminated and at least one failed.
    Failed,
    /// Pod phase cannot be determined.
    #[default]
    Unknown,
}

impl PodPhase {
    /// Parse a pod phase from a Kubernetes phase string.
    #[must_use]
    pub fn from_k8s_phase(phase: &str) -> Self {
        match phase {
            "Pending" => Self::Pending,
            "Running" => Self::Running,
            "Succeeded" => Self::Succeeded,
            "Failed" => Self::Failed,
            _ => Self::Unknown,
        }
    }
}

/// Current lifecycle state of a single container.
///
/// Exactly one state applies to a container at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerState {
    /// The container is not yet running (pulling, backing off, ...).
    Waiting {
        /// Platform reason code, empty when not reported.
        reason: String,
        /// Platform message, empty when not reported.
        message: String,
    },
    /// The container is running.
    Running,
    /// The container has exited.
    Terminated {
        /// Platform reason code, empty when not reported.
        reason: String,
        /// Platform message, empty when not reported.
        message: String,
    },
}

impl ContainerState {
    /// Build a waiting state.
    #[must_use]
    pub fn waiting(reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Waiting {
            reason: reason.into(),
            message: message.into(),
        }
    }

    /// Build a terminated state.
    #[must_use]
    pub fn terminated(reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Terminated {
            reason: reason.into(),
            message: message.into(),
        }
    }
}

/// Status record of one container within a pod.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerObservation {
    /// Container name as declared in the pod spec.
    pub name: String,
    /// Number of times the container has been restarted.
    pub restart_count: i32,
    /// Current lifecycle state.
    pub state: ContainerState,
}

impl ContainerObservation {
    /// Create a container record.
    #[must_use]
    pub fn new(name: impl Into<String>, restart_count: i32, state: ContainerState) -> Self {
        Self {
            name: name.into(),
            restart_count,
            state,
        }
    }
}

/// Observed state of a pod at the time of a reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PodObservation {
    /// Pod name.
    pub name: String,
    /// Pod namespace.
    pub namespace: String,
    /// Overall pod phase.
    pub phase: PodPhase,
    /// Pod-level reason (e.g. `Evicted`), if any.
    pub reason: Option<String>,
    /// Pod-level message, empty when not reported.
    pub message: String,
    /// Container status records, in the order the platform reported them.
    pub containers: Vec<ContainerObservation>,
}

impl PodObservation {
    /// Create an observation for a pod with no status yet.
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            ..Default::default()
        }
    }

    /// Set the pod phase.
    #[must_use]
    pub fn with_phase(mut self, phase: PodPhase) -> Self {
        self.phase = phase;
        self
    }

    /// Set the pod-level reason and message.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>, message: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self.message = message.into();
        self
    }

    /// Append a container status record.
    #[must_use]
    pub fn with_container(mut self, container: ContainerObservation) -> Self {
        self.containers.push(container);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pod_phase_from_k8s() {
        assert_eq!(PodPhase::from_k8s_phase("Pending"), PodPhase::Pending);
        assert_eq!(PodPhase::from_k8s_phase("Running"), PodPhase::Running);
        assert_eq!(PodPhase::from_k8s_phase("Succeeded"), PodPhase::Succeeded);
        assert_eq!(PodPhase::from_k8s_phase("Failed"), PodPhase::Failed);
        assert_eq!(PodPhase::from_k8s_phase("Unknown"), PodPhase::Unknown);
        assert_eq!(PodPhase::from_k8s_phase("failed"), PodPhase::Unknown);
    }

    #[test]
    fn builder_keeps_container_order() {
        let obs = PodObservation::new("shop", "web")
            .with_container(ContainerObservation::new("a", 0, ContainerState::Running))
            .with_container(ContainerObservation::new("b", 1, ContainerState::Running));

        let names: Vec<_> = obs.containers.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(obs.phase, PodPhase::Unknown);
        assert!(obs.reason.is_none());
    }
}

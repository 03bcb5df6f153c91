//! Pod state retrieval.
//!
//! The reconciler never trusts the object delivered with a trigger; it
//! re-reads the pod through a [`PodSource`] so each pass sees current state.

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Pod;
use kube::api::Api;
use kube::Client;
use podwatch_core::PodKey;

use crate::Result;

/// Read access to current pod state.
#[async_trait]
pub trait PodSource: Send + Sync {
    /// Fetch the current state of a pod.
    ///
    /// Returns `Ok(None)` if the pod no longer exists.
    ///
    /// # Errors
    ///
    /// Returns an error for any failure other than not-found.
    async fn fetch(&self, key: &PodKey) -> Result<Option<Pod>>;
}

/// Pod source backed by the Kubernetes API server.
#[derive(Clone)]
pub struct KubePodSource {
    client: Client,
}

impl KubePodSource {
    /// Create a source using the given client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn pods_api(&self, namespace: &str) -> Api<Pod> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait]
impl PodSource for KubePodSource {
    async fn fetch(&self, key: &PodKey) -> Result<Option<Pod>> {
        Ok(self.pods_api(key.namespace()).get_opt(key.name()).await?)
    }
}

/// An in-memory pod source for testing without a cluster.
#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    use super::*;
    use crate::observe::pod_key;
    use crate::OperatorError;
    use parking_lot::Mutex;
    use std::collections::HashMap;

    /// A pod source that serves pods from memory.
    #[derive(Default)]
    pub struct MockPodSource {
        pods: Mutex<HashMap<PodKey, Pod>>,
        unavailable: Mutex<bool>,
        fetches: Mutex<usize>,
    }

    impl MockPodSource {
        /// Create an empty mock source.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Store a pod, keyed by its metadata.
        ///
        /// # Panics
        ///
        /// Panics if the pod has no name or namespace.
        pub fn insert(&self, pod: Pod) {
            let key = pod_key(&pod).expect("mock pod needs a name and namespace");
            self.pods.lock().insert(key, pod);
        }

        /// Remove a pod, simulating deletion.
        pub fn remove(&self, key: &PodKey) {
            self.pods.lock().remove(key);
        }

        /// Make every fetch fail as if the API server were unreachable.
        pub fn set_unavailable(&self, unavailable: bool) {
            *self.unavailable.lock() = unavailable;
        }

        /// Number of fetches served so far.
        #[must_use]
        pub fn fetch_count(&self) -> usize {
            *self.fetches.lock()
        }
    }

    #[async_trait]
    impl PodSource for MockPodSource {
        async fn fetch(&self, key: &PodKey) -> Result<Option<Pod>> {
            *self.fetches.lock() += 1;

            if *self.unavailable.lock() {
                return Err(OperatorError::KubeApi(kube::Error::Api(
                    kube::core::ErrorResponse {
                        status: "Failure".to_string(),
                        message: "the server is currently unable to handle the request"
                            .to_string(),
                        reason: "ServiceUnavailable".to_string(),
                        code: 503,
                    },
                )));
            }

            Ok(self.pods.lock().get(key).cloned())
        }
    }
}

//! Pod reconciliation.
//!
//! [`PodReconciler`] is level-triggered: for every request it re-reads the
//! pod, applies the namespace filter and the classifier, and hands any
//! detected failure to its sink. No state is kept between passes.
//!
//! [`run_controller`] wires the reconciler into a `kube` controller, which
//! owns the watch, the work queue and retries.

use std::sync::Arc;

use futures::StreamExt;
use k8s_openapi::api::core::v1::Pod;
use kube::api::Api;
use kube::runtime::controller::{Action, Controller};
use kube::runtime::reflector::Store;
use kube::runtime::watcher::Config as WatcherConfig;
use kube::Client;
use podwatch_core::{detect_failure, is_system_namespace, PodFailure, PodKey};
use tracing::{debug, info, warn};

use crate::config::OperatorConfig;
use crate::health::Readiness;
use crate::observe::{observe_pod, pod_key};
use crate::sink::{FailureSink, LogSink};
use crate::source::{KubePodSource, PodSource};
use crate::{OperatorError, Result};

/// Result of a single successful reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The pod no longer exists.
    PodGone,
    /// The pod lives in a system namespace and was skipped.
    Excluded,
    /// No failure was detected.
    Healthy,
    /// A failure was detected and handed to the sink.
    FailureDetected(PodFailure),
}

/// Reconciles pods against the failure classifier.
pub struct PodReconciler<S, K> {
    source: S,
    sink: K,
    config: OperatorConfig,
}

impl<S: PodSource, K: FailureSink> PodReconciler<S, K> {
    /// Create a reconciler from a pod source and a failure sink.
    #[must_use]
    pub fn new(source: S, sink: K, config: OperatorConfig) -> Self {
        Self {
            source,
            sink,
            config,
        }
    }

    /// Get a reference to the pod source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get a reference to the failure sink.
    #[must_use]
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Get a reference to the operator config.
    #[must_use]
    pub fn config(&self) -> &OperatorConfig {
        &self.config
    }

    /// Run one reconciliation pass for a pod.
    ///
    /// A deleted pod, a pod in a system namespace and a healthy pod are all
    /// successful no-ops.
    ///
    /// # Errors
    ///
    /// Returns an error if the pod cannot be fetched (other than not-found)
    /// or the sink rejects the failure.
    pub async fn reconcile(&self, key: &PodKey) -> Result<ReconcileOutcome> {
        let Some(pod) = self.source.fetch(key).await? else {
            debug!(pod = %key, "Pod not found, nothing to do");
            return Ok(ReconcileOutcome::PodGone);
        };

        if is_system_namespace(key.namespace()) {
            debug!(pod = %key, "Skipping pod in system namespace");
            return Ok(ReconcileOutcome::Excluded);
        }

        let Some(failure) = detect_failure(&observe_pod(&pod)) else {
            debug!(pod = %key, "No failure detected");
            return Ok(ReconcileOutcome::Healthy);
        };

        self.sink.emit(&failure).await?;

        Ok(ReconcileOutcome::FailureDetected(failure))
    }
}

/// Controller entry point for a changed pod.
///
/// The triggering object only supplies the identity; state is re-fetched.
/// Success never asks for a timed requeue.
///
/// # Errors
///
/// Propagates errors from [`PodReconciler::reconcile`].
#[allow(clippy::needless_pass_by_value)]
pub async fn reconcile<S, K>(pod: Arc<Pod>, ctx: Arc<PodReconciler<S, K>>) -> Result<Action>
where
    S: PodSource + 'static,
    K: FailureSink + 'static,
{
    let Some(key) = pod_key(&pod) else {
        warn!("Received pod without name or namespace, ignoring");
        return Ok(Action::await_change());
    };

    ctx.reconcile(&key).await?;

    Ok(Action::await_change())
}

/// Controller error policy: log and requeue after the configured delay.
#[allow(clippy::needless_pass_by_value)]
pub fn error_policy<S, K>(
    pod: Arc<Pod>,
    error: &OperatorError,
    ctx: Arc<PodReconciler<S, K>>,
) -> Action
where
    S: PodSource,
    K: FailureSink,
{
    let pod = pod_key(&pod).map_or_else(|| "<unnamed>".to_string(), |key| key.to_string());
    warn!(
        pod = %pod,
        error = %error,
        retriable = error.is_retriable(),
        "Reconciliation failed, requeueing"
    );
    Action::requeue(ctx.config().error_requeue())
}

/// Raise the readiness flag once the pod cache has completed its initial list.
///
/// Leaves the flag down if the cache is dropped before it syncs.
pub async fn mark_ready_when_synced(store: Store<Pod>, readiness: Readiness) {
    if store.wait_until_ready().await.is_ok() {
        readiness.set_ready(true);
        info!(pods = store.state().len(), "Pod cache synced, operator ready");
    }
}

/// Watch pods and reconcile them until a shutdown signal arrives.
///
/// Watches every namespace unless `config.watch_namespace` is set. The
/// readiness flag is raised after the controller's initial pod list has
/// been received, and lowered when the controller stops.
pub async fn run_controller(client: Client, config: OperatorConfig, readiness: Readiness) {
    let pods: Api<Pod> = match &config.watch_namespace {
        Some(namespace) => Api::namespaced(client.clone(), namespace),
        None => Api::all(client.clone()),
    };

    info!(
        namespace = config.watch_namespace.as_deref().unwrap_or("*"),
        "Starting pod failure controller"
    );

    let ctx = Arc::new(PodReconciler::new(
        KubePodSource::new(client),
        LogSink,
        config,
    ));

    let controller = Controller::new(pods, WatcherConfig::default()).shutdown_on_signal();
    let sync = tokio::spawn(mark_ready_when_synced(controller.store(), readiness.clone()));

    controller
        .run(
            reconcile::<KubePodSource, LogSink>,
            error_policy::<KubePodSource, LogSink>,
            ctx,
        )
        .for_each(|result| async move {
            match result {
                Ok((object, _)) => debug!(pod = %object, "Reconciled pod"),
                Err(e) => debug!(error = %e, "Controller error"),
            }
        })
        .await;

    sync.abort();
    readiness.set_ready(false);
    warn!("Pod failure controller stopped");
}

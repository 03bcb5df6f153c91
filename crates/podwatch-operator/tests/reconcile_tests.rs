//! End-to-end reconciliation tests against in-memory collaborators.

use k8s_openapi::api::core::v1::Pod;
use podwatch_core::{FailureType, PodKey};
use podwatch_operator::{
    MockPodSource, OperatorConfig, PodReconciler, ReconcileOutcome, RecordingSink,
};
use serde_json::{json, Value};

fn reconciler() -> PodReconciler<MockPodSource, RecordingSink> {
    PodReconciler::new(
        MockPodSource::new(),
        RecordingSink::new(),
        OperatorConfig::default(),
    )
}

fn container_status(name: &str, restarts: i32, state: Value) -> Value {
    json!({
        "name": name,
        "image": format!("registry.example.com/{name}:1.0"),
        "imageID": "",
        "ready": false,
        "restartCount": restarts,
        "state": state
    })
}

fn pod(namespace: &str, name: &str, status: Value) -> Pod {
    serde_json::from_value(json!({
        "metadata": { "name": name, "namespace": namespace },
        "status": status
    }))
    .unwrap()
}

#[tokio::test]
async fn healthy_pod_is_not_reported() {
    let reconciler = reconciler();
    reconciler.source().insert(pod(
        "shop",
        "web-1",
        json!({
            "phase": "Running",
            "containerStatuses": [
                container_status("app", 0, json!({ "running": {} }))
            ]
        }),
    ));

    let outcome = reconciler
        .reconcile(&PodKey::new("shop", "web-1"))
        .await
        .unwrap();

    assert_eq!(outcome, ReconcileOutcome::Healthy);
    assert!(reconciler.sink().is_empty());
}

#[tokio::test]
async fn crash_loop_is_reported_with_evidence() {
    let reconciler = reconciler();
    reconciler.source().insert(pod(
        "shop",
        "web-1",
        json!({
            "phase": "Running",
            "containerStatuses": [
                container_status("app", 12, json!({
                    "waiting": {
                        "reason": "CrashLoopBackOff",
                        "message": "back-off 5m0s restarting failed container=app"
                    }
                }))
            ]
        }),
    ));

    reconciler
        .reconcile(&PodKey::new("shop", "web-1"))
        .await
        .unwrap();

    let failures = reconciler.sink().failures();
    assert_eq!(failures.len(), 1);
    let failure = &failures[0];
    assert_eq!(failure.pod_name, "web-1");
    assert_eq!(failure.namespace, "shop");
    assert_eq!(failure.failure_type, FailureType::CrashLoopBackOff);
    assert_eq!(failure.container_name.as_deref(), Some("app"));
    assert_eq!(
        failure.message,
        "back-off 5m0s restarting failed container=app"
    );
    assert_eq!(failure.restart_count, 12);
}

#[tokio::test]
async fn image_pull_variants_report_one_category() {
    let reconciler = reconciler();

    for (i, reason) in ["ImagePullBackOff", "ErrImagePull", "InvalidImageName"]
        .iter()
        .enumerate()
    {
        let name = format!("web-{i}");
        reconciler.source().insert(pod(
            "shop",
            &name,
            json!({
                "phase": "Pending",
                "containerStatuses": [
                    container_status("app", 0, json!({ "waiting": { "reason": reason } }))
                ]
            }),
        ));
        reconciler
            .reconcile(&PodKey::new("shop", name))
            .await
            .unwrap();
    }

    let failures = reconciler.sink().failures();
    assert_eq!(failures.len(), 3);
    assert!(failures
        .iter()
        .all(|f| f.failure_type == FailureType::ImagePullBackOff));
}

#[tokio::test]
async fn unknown_waiting_reason_is_not_reported() {
    let reconciler = reconciler();
    reconciler.source().insert(pod(
        "shop",
        "web-1",
        json!({
            "phase": "Pending",
            "containerStatuses": [
                container_status("app", 0, json!({ "waiting": { "reason": "SomeFutureReason" } }))
            ]
        }),
    ));

    let outcome = reconciler
        .reconcile(&PodKey::new("shop", "web-1"))
        .await
        .unwrap();

    assert_eq!(outcome, ReconcileOutcome::Healthy);
}

#[tokio::test]
async fn evicted_pod_is_pod_scoped() {
    let reconciler = reconciler();
    reconciler.source().insert(pod(
        "shop",
        "web-1",
        json!({
            "phase": "Failed",
            "reason": "Evicted",
            "message": "The node was low on resource: memory."
        }),
    ));

    let outcome = reconciler
        .reconcile(&PodKey::new("shop", "web-1"))
        .await
        .unwrap();

    let ReconcileOutcome::FailureDetected(failure) = outcome else {
        panic!("expected eviction, got {outcome:?}");
    };
    assert_eq!(failure.failure_type, FailureType::Evicted);
    assert_eq!(failure.container_name, None);
    assert_eq!(failure.restart_count, 0);
    assert_eq!(failure.message, "The node was low on resource: memory.");
}

#[tokio::test]
async fn failed_phase_without_known_reason_is_unknown() {
    let reconciler = reconciler();
    reconciler.source().insert(pod(
        "batch",
        "report-28461",
        json!({
            "phase": "Failed",
            "reason": "DeadlineExceeded",
            "message": "Pod was active on the node longer than the specified deadline"
        }),
    ));

    let outcome = reconciler
        .reconcile(&PodKey::new("batch", "report-28461"))
        .await
        .unwrap();

    let ReconcileOutcome::FailureDetected(failure) = outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert_eq!(failure.failure_type, FailureType::Unknown);
}

#[tokio::test]
async fn system_namespace_is_never_reported() {
    let reconciler = reconciler();
    for namespace in ["kube-system", "kube-public", "kube-node-lease", "local-path-storage"] {
        reconciler.source().insert(pod(
            namespace,
            "infra-1",
            json!({
                "phase": "Running",
                "containerStatuses": [
                    container_status("app", 3, json!({ "terminated": { "exitCode": 137, "reason": "OOMKilled" } }))
                ]
            }),
        ));

        let outcome = reconciler
            .reconcile(&PodKey::new(namespace, "infra-1"))
            .await
            .unwrap();
        assert_eq!(outcome, ReconcileOutcome::Excluded, "{namespace}");
    }

    assert!(reconciler.sink().is_empty());
}

#[tokio::test]
async fn deleted_pod_is_success() {
    let reconciler = reconciler();
    let key = PodKey::new("shop", "web-1");
    reconciler.source().insert(pod("shop", "web-1", json!({ "phase": "Failed" })));
    reconciler.source().remove(&key);

    let outcome = reconciler.reconcile(&key).await.unwrap();

    assert_eq!(outcome, ReconcileOutcome::PodGone);
    assert!(reconciler.sink().is_empty());
}

#[tokio::test]
async fn fetch_error_is_surfaced_for_retry() {
    let reconciler = reconciler();
    reconciler.source().insert(pod("shop", "web-1", json!({ "phase": "Failed" })));
    reconciler.source().set_unavailable(true);

    let err = reconciler
        .reconcile(&PodKey::new("shop", "web-1"))
        .await
        .unwrap_err();

    assert!(err.is_retriable());
    assert!(reconciler.sink().is_empty());
}

#[tokio::test]
async fn sink_error_is_surfaced_for_retry() {
    let reconciler = reconciler();
    reconciler.source().insert(pod("shop", "web-1", json!({ "phase": "Failed" })));
    reconciler.sink().set_rejecting(true);

    assert!(reconciler
        .reconcile(&PodKey::new("shop", "web-1"))
        .await
        .is_err());
}

#[tokio::test]
async fn each_pass_reads_current_state() {
    let reconciler = reconciler();
    let key = PodKey::new("shop", "web-1");

    reconciler.source().insert(pod(
        "shop",
        "web-1",
        json!({
            "phase": "Running",
            "containerStatuses": [
                container_status("app", 1, json!({ "terminated": { "exitCode": 1, "reason": "Error" } }))
            ]
        }),
    ));
    let first = reconciler.reconcile(&key).await.unwrap();
    assert!(matches!(first, ReconcileOutcome::FailureDetected(_)));

    reconciler.source().insert(pod(
        "shop",
        "web-1",
        json!({
            "phase": "Running",
            "containerStatuses": [
                container_status("app", 1, json!({ "running": {} }))
            ]
        }),
    ));
    let second = reconciler.reconcile(&key).await.unwrap();
    assert_eq!(second, ReconcileOutcome::Healthy);

    assert_eq!(reconciler.source().fetch_count(), 2);
    assert_eq!(reconciler.sink().len(), 1);
}

#[tokio::test]
async fn repeated_passes_report_identical_failure() {
    let reconciler = reconciler();
    let key = PodKey::new("shop", "web-1");
    reconciler.source().insert(pod(
        "shop",
        "web-1",
        json!({
            "phase": "Running",
            "containerStatuses": [
                container_status("app", 2, json!({ "waiting": { "reason": "CreateContainerConfigError", "message": "secret \"db-creds\" not found" } })),
                container_status("proxy", 0, json!({ "waiting": { "reason": "RunContainerError" } }))
            ]
        }),
    ));

    let first = reconciler.reconcile(&key).await.unwrap();
    let second = reconciler.reconcile(&key).await.unwrap();

    assert_eq!(first, second);
    let failures = reconciler.sink().failures();
    assert_eq!(failures[0], failures[1]);
    assert_eq!(failures[0].container_name.as_deref(), Some("app"));
    assert_eq!(
        failures[0].failure_type,
        FailureType::CreateContainerConfigError
    );
}

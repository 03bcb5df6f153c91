//! Namespaces excluded from failure detection.
//!
//! Failures in platform namespaces belong to cluster infrastructure, not to
//! applications, and are never reported.

/// Platform-reserved namespaces.
pub const SYSTEM_NAMESPACES: [&str; 4] = [
    "kube-system",
    "kube-public",
    "kube-node-lease",
    // kind local clusters
    "local-path-storage",
];

/// Returns `true` if the namespace is a platform-reserved namespace.
#[must_use]
pub fn is_system_namespace(namespace: &str) -> bool {
    SYSTEM_NAMESPACES.contains(&namespace)
}

//! Pod identity used to address reconciliation requests.
//!
//! A [`PodKey`] is the `namespace/name` pair the host scheduler hands to the
//! reconciler. It carries no state beyond the identity itself.

use std::fmt;

/// The identity of a pod: its namespace and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PodKey {
    namespace: String,
    name: String,
}

impl PodKey {
    /// Create a new key from a namespace and a pod name.
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// The namespace the pod lives in.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The pod name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for PodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_display() {
        let key = PodKey::new("shop", "checkout-7d9f8");
        assert_eq!(key.to_string(), "shop/checkout-7d9f8");
        assert_eq!(key.namespace(), "shop");
        assert_eq!(key.name(), "checkout-7d9f8");
    }
}

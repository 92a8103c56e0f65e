//! `Discovery` trait definition.
//!
//! The model mapper does not talk to an API server itself. Whatever transport the
//! caller uses (a REST client, an aggregated-discovery cache, a test fixture) is
//! plugged in through this trait.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::DiscoveryError;
use crate::models::ApiResource;

/// Source of live API discovery information.
///
/// ```ignore
/// struct ClusterDiscovery { client: ApiClient }
///
/// #[async_trait]
/// impl Discovery for ClusterDiscovery {
///     async fn find_all(&self) -> Result<HashSet<ApiResource>, DiscoveryError> {
///         self.client.discover().await.map_err(|e| DiscoveryError::transport(e.to_string()))
///     }
/// }
/// ```
#[async_trait]
pub trait Discovery: Send + Sync {
    /// Returns every resource kind currently served, across all groups and versions.
    ///
    /// An empty set is a valid answer.
    ///
    /// # Errors
    ///
    /// * `Transport` - If the discovery endpoint could not be reached
    /// * `Decode` - If the discovery payload could not be decoded
    /// * `Other` - For any other failure reported by the implementation
    async fn find_all(&self) -> Result<HashSet<ApiResource>, DiscoveryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticDiscovery(HashSet<ApiResource>);

    #[async_trait]
    impl Discovery for StaticDiscovery {
        async fn find_all(&self) -> Result<HashSet<ApiResource>, DiscoveryError> {
            Ok(self.0.clone())
        }
    }

    struct BrokenDiscovery;

    #[async_trait]
    impl Discovery for BrokenDiscovery {
        async fn find_all(&self) -> Result<HashSet<ApiResource>, DiscoveryError> {
            Err(DiscoveryError::transport("connection refused"))
        }
    }

    #[tokio::test]
    async fn test_discovery_is_object_safe() {
        let pods = ApiResource::new("", "Pod", ["v1"], "pods", true);
        let sources: Vec<Box<dyn Discovery>> = vec![
            Box::new(StaticDiscovery(HashSet::from([pods.clone()]))),
            Box::new(BrokenDiscovery),
        ];

        let found = sources[0].find_all().await.unwrap();
        assert!(found.contains(&pods));

        let err = sources[1].find_all().await.unwrap_err();
        assert!(err.is_transport());
    }
}

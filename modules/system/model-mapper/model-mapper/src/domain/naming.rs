//! Naming convention of generated model types.
//!
//! Generated models are named `<GroupPrefix?><Version><Kind>`, e.g.
//! `V1Deployment`, `V1beta1TokenReview` or `StorageV1StorageClass`. Resolution is
//! purely syntactic and therefore approximate: a name that does not follow the
//! convention resolves to an empty group and/or version.

use model_mapper_sdk::GroupVersionKind;

use super::error::BootstrapError;
use crate::config::ApiGroupPrefix;

/// Built-in model-name prefix to API group table, matched in order.
pub const BUILTIN_API_GROUPS: &[(&str, &str)] = &[
    ("Admissionregistration", "admissionregistration.k8s.io"),
    ("Apiextensions", "apiextensions.k8s.io"),
    ("Apiregistration", "apiregistration.k8s.io"),
    ("Apps", "apps"),
    ("Authentication", "authentication.k8s.io"),
    ("Authorization", "authorization.k8s.io"),
    ("Autoscaling", "autoscaling"),
    ("Batch", "batch"),
    ("Certificates", "certificates.k8s.io"),
    ("Core", ""),
    ("Extensions", "extensions"),
    ("Events", "events.k8s.io"),
    ("FlowControl", "flowcontrol.apiserver.k8s.io"),
    ("Networking", "networking.k8s.io"),
    ("Policy", "policy"),
    ("RbacAuthorization", "rbac.authorization.k8s.io"),
    ("Scheduling", "scheduling.k8s.io"),
    ("Settings", "settings.k8s.io"),
    ("Storage", "storage.k8s.io"),
];

/// Version prefixes, most specific first: `V1` is a prefix of `V1beta1`.
pub const API_VERSION_PREFIXES: &[&str] = &[
    "V2beta1", "V2beta2", "V2alpha1", "V1beta2", "V1beta1", "V1alpha1", "V1",
];

/// Ordered group and version prefix tables.
#[derive(Debug, Clone)]
pub struct NamingConvention {
    groups: Vec<(String, String)>,
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self::builtin()
    }
}

impl NamingConvention {
    /// The built-in tables only.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            groups: BUILTIN_API_GROUPS
                .iter()
                .map(|(prefix, group)| ((*prefix).to_owned(), (*group).to_owned()))
                .collect(),
        }
    }

    /// The built-in tables followed by `extra` group prefixes.
    #[must_use]
    pub fn with_extra_groups(extra: &[ApiGroupPrefix]) -> Self {
        let mut convention = Self::builtin();
        convention.groups.extend(
            extra
                .iter()
                .map(|entry| (entry.prefix.clone(), entry.group.clone())),
        );
        convention
    }

    /// Derives a `GroupVersionKind` from a simple model type name.
    ///
    /// Unmatched group or version are left empty; the kind is whatever remains.
    ///
    /// # Errors
    /// - `InvalidTypeName` if `name` is not an ASCII identifier starting with an
    ///   upper-case letter
    /// - `EmptyKind` if the prefixes consume the whole name
    pub fn resolve(&self, name: &str) -> Result<GroupVersionKind, BootstrapError> {
        if !is_model_type_name(name) {
            return Err(BootstrapError::invalid_type_name(name));
        }

        let (group, rest) = self.split_group(name);
        let (version, kind) = split_version(rest);
        if kind.is_empty() {
            return Err(BootstrapError::empty_kind(name));
        }

        Ok(GroupVersionKind::new(
            group.unwrap_or_default(),
            version.unwrap_or_default(),
            kind,
        ))
    }

    fn split_group<'a>(&self, name: &'a str) -> (Option<&str>, &'a str) {
        self.groups
            .iter()
            .find_map(|(prefix, group)| {
                name.strip_prefix(prefix.as_str())
                    .map(|rest| (Some(group.as_str()), rest))
            })
            .unwrap_or((None, name))
    }
}

fn split_version(name: &str) -> (Option<String>, &str) {
    API_VERSION_PREFIXES
        .iter()
        .find_map(|prefix| {
            name.strip_prefix(prefix)
                .map(|rest| (Some(prefix.to_ascii_lowercase()), rest))
        })
        .unwrap_or((None, name))
}

fn is_model_type_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(name: &str) -> GroupVersionKind {
        NamingConvention::builtin().resolve(name).unwrap()
    }

    #[test]
    fn test_version_only_names_resolve_to_core_group() {
        assert_eq!(
            resolve("V1beta1TokenReview"),
            GroupVersionKind::new("", "v1beta1", "TokenReview")
        );
        assert_eq!(
            resolve("V1StorageClass"),
            GroupVersionKind::new("", "v1", "StorageClass")
        );
        assert_eq!(resolve("V1PodList"), GroupVersionKind::new("", "v1", "PodList"));
    }

    #[test]
    fn test_group_prefixed_names() {
        assert_eq!(
            resolve("StorageV1StorageClass"),
            GroupVersionKind::new("storage.k8s.io", "v1", "StorageClass")
        );
        assert_eq!(
            resolve("AppsV1Deployment"),
            GroupVersionKind::new("apps", "v1", "Deployment")
        );
        assert_eq!(
            resolve("CoreV1Pod"),
            GroupVersionKind::new("", "v1", "Pod")
        );
        assert_eq!(
            resolve("RbacAuthorizationV1alpha1ClusterRole"),
            GroupVersionKind::new("rbac.authorization.k8s.io", "v1alpha1", "ClusterRole")
        );
    }

    #[test]
    fn test_most_specific_version_wins() {
        assert_eq!(
            resolve("V2beta2HorizontalPodAutoscaler"),
            GroupVersionKind::new("", "v2beta2", "HorizontalPodAutoscaler")
        );
        assert_eq!(
            resolve("V1beta2ReplicaSet"),
            GroupVersionKind::new("", "v1beta2", "ReplicaSet")
        );
    }

    #[test]
    fn test_unmatched_prefixes_leave_fields_empty() {
        assert_eq!(resolve("Quantity"), GroupVersionKind::new("", "", "Quantity"));
        assert_eq!(
            resolve("BatchCronJob"),
            GroupVersionKind::new("batch", "", "CronJob")
        );
    }

    #[test]
    fn test_extra_groups_come_after_builtin() {
        let convention = NamingConvention::with_extra_groups(&[ApiGroupPrefix {
            prefix: "Monitoring".to_owned(),
            group: "monitoring.coreos.com".to_owned(),
        }]);
        assert_eq!(
            convention.resolve("MonitoringV1ServiceMonitor").unwrap(),
            GroupVersionKind::new("monitoring.coreos.com", "v1", "ServiceMonitor")
        );
        assert_eq!(
            convention.resolve("AppsV1Deployment").unwrap(),
            GroupVersionKind::new("apps", "v1", "Deployment")
        );
    }

    #[test]
    fn test_invalid_names() {
        let convention = NamingConvention::builtin();
        assert_eq!(
            convention.resolve(""),
            Err(BootstrapError::invalid_type_name(""))
        );
        assert_eq!(
            convention.resolve("v1Pod"),
            Err(BootstrapError::invalid_type_name("v1Pod"))
        );
        assert_eq!(
            convention.resolve("V1 Pod"),
            Err(BootstrapError::invalid_type_name("V1 Pod"))
        );
        assert_eq!(
            convention.resolve("AppsV1"),
            Err(BootstrapError::empty_kind("AppsV1"))
        );
    }
}

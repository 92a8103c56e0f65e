//! Public models for the `model-mapper` module.
//!
//! These are transport-agnostic value types shared between the model mapper and
//! its consumers (generated API clients, discovery transports).

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// An API group and version pair, as found in a resource's `apiVersion` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupVersion {
    /// API group; empty for the core (legacy) group.
    pub group: String,
    /// API version, e.g. `v1` or `v1beta1`.
    pub version: String,
}

impl GroupVersion {
    /// Creates a new group/version pair.
    #[must_use]
    pub fn new(group: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
        }
    }

    /// Splits an `apiVersion` string such as `apps/v1`.
    ///
    /// A string without a `/` separator belongs to the core group, so `v1`
    /// yields an empty group and version `v1`.
    #[must_use]
    pub fn parse(api_version: &str) -> Self {
        match api_version.split_once('/') {
            Some((group, version)) => Self::new(group, version),
            None => Self::new("", api_version),
        }
    }

    /// Renders the `apiVersion` form: `group/version`, or `version` for the core group.
    #[must_use]
    pub fn api_version(&self) -> String {
        api_version(&self.group, &self.version)
    }

    /// Attaches a kind to this group/version.
    #[must_use]
    pub fn with_kind(self, kind: impl Into<String>) -> GroupVersionKind {
        GroupVersionKind {
            group: self.group,
            version: self.version,
            kind: kind.into(),
        }
    }

    /// Attaches a plural resource name to this group/version.
    #[must_use]
    pub fn with_resource(self, resource_plural: impl Into<String>) -> GroupVersionResource {
        GroupVersionResource {
            group: self.group,
            version: self.version,
            resource_plural: resource_plural.into(),
        }
    }
}

/// Identifies the schema of an API object: "this type serializes as this kind".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupVersionKind {
    /// API group; empty for the core group.
    pub group: String,
    /// API version.
    pub version: String,
    /// Object kind in `PascalCase`, e.g. `Deployment`.
    pub kind: String,
}

impl GroupVersionKind {
    /// Creates a new `GroupVersionKind`.
    #[must_use]
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            kind: kind.into(),
        }
    }

    /// Builds a `GroupVersionKind` from an `apiVersion` string and a kind.
    #[must_use]
    pub fn from_api_version(api_version: &str, kind: impl Into<String>) -> Self {
        GroupVersion::parse(api_version).with_kind(kind)
    }

    /// Renders the `apiVersion` form of this identifier.
    #[must_use]
    pub fn api_version(&self) -> String {
        api_version(&self.group, &self.version)
    }

    /// Returns the same identifier in the core group.
    #[must_use]
    pub fn in_core_group(&self) -> Self {
        Self::new("", self.version.as_str(), self.kind.as_str())
    }
}

impl fmt::Display for GroupVersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, Kind={}", self.api_version(), self.kind)
    }
}

/// Identifies the REST collection a kind is listed and fetched under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupVersionResource {
    /// API group; empty for the core group.
    pub group: String,
    /// API version.
    pub version: String,
    /// Plural, lower-case resource name, e.g. `deployments`.
    pub resource_plural: String,
}

impl GroupVersionResource {
    /// Creates a new `GroupVersionResource`.
    #[must_use]
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        resource_plural: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            resource_plural: resource_plural.into(),
        }
    }

    /// Renders the `apiVersion` form of this identifier.
    #[must_use]
    pub fn api_version(&self) -> String {
        api_version(&self.group, &self.version)
    }
}

impl fmt::Display for GroupVersionResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, Resource={}", self.api_version(), self.resource_plural)
    }
}

fn api_version(group: &str, version: &str) -> String {
    if group.is_empty() {
        version.to_owned()
    } else {
        format!("{group}/{version}")
    }
}

/// A resource kind as reported by API discovery, across all versions it is served at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResource {
    /// API group; empty for the core group.
    pub group: String,
    /// Object kind.
    pub kind: String,
    /// Served versions, preferred version first.
    pub versions: Vec<String>,
    /// Plural resource name used in REST paths.
    pub resource_plural: String,
    /// Whether objects of this kind live inside a namespace.
    pub namespaced: bool,
}

impl ApiResource {
    /// Creates a new discovery descriptor.
    #[must_use]
    pub fn new<I, S>(
        group: impl Into<String>,
        kind: impl Into<String>,
        versions: I,
        resource_plural: impl Into<String>,
        namespaced: bool,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            group: group.into(),
            kind: kind.into(),
            versions: versions.into_iter().map(Into::into).collect(),
            resource_plural: resource_plural.into(),
            namespaced,
        }
    }

    /// Returns the `GroupVersionKind` of this resource at each served version.
    pub fn group_version_kinds(&self) -> impl Iterator<Item = GroupVersionKind> + '_ {
        self.versions.iter().map(|version| {
            GroupVersionKind::new(self.group.as_str(), version.as_str(), self.kind.as_str())
        })
    }
}

/// Opaque token for a concrete model type.
///
/// Equality and hashing use the `TypeId` only; the type name is carried for
/// logging and for the naming-convention bootstrap.
#[derive(Clone, Copy)]
pub struct TypeHandle {
    id: TypeId,
    name: &'static str,
}

impl TypeHandle {
    /// Returns the handle of `T`.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Returns the underlying `TypeId`.
    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.id
    }

    /// Returns the fully qualified type name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.name
    }

    /// Returns the type name without module path or generic arguments,
    /// e.g. `V1Deployment` for `k8s_models::apps::V1Deployment`.
    #[must_use]
    pub fn simple_name(&self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        base.rsplit("::").next().unwrap_or(base)
    }

    /// Returns `true` if this handle refers to `T`.
    #[must_use]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeHandle {}

impl Hash for TypeHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.simple_name())
    }
}

/// Marker for model types that represent a single API object.
pub trait KubernetesObject: 'static {}

/// Marker for model types that represent a list of API objects.
pub trait KubernetesListObject: 'static {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct V1Pod;
    struct Wrapper<T>(T);

    #[test]
    fn test_group_version_parse() {
        assert_eq!(GroupVersion::parse("apps/v1"), GroupVersion::new("apps", "v1"));
        assert_eq!(GroupVersion::parse("v1"), GroupVersion::new("", "v1"));
        assert_eq!(GroupVersion::parse(""), GroupVersion::new("", ""));
    }

    #[test]
    fn test_api_version_rendering() {
        let gvk = GroupVersionKind::new("apps", "v1", "Deployment");
        assert_eq!(gvk.api_version(), "apps/v1");
        assert_eq!(gvk.to_string(), "apps/v1, Kind=Deployment");

        let gvk = GroupVersionKind::from_api_version("v1", "Pod");
        assert_eq!(gvk, GroupVersionKind::new("", "v1", "Pod"));
        assert_eq!(gvk.api_version(), "v1");

        let gvr = GroupVersionResource::new("", "v1", "pods");
        assert_eq!(gvr.to_string(), "v1, Resource=pods");
    }

    #[test]
    fn test_in_core_group() {
        let gvk = GroupVersionKind::new("storage.k8s.io", "v1", "StorageClass");
        assert_eq!(gvk.in_core_group(), GroupVersionKind::new("", "v1", "StorageClass"));
    }

    #[test]
    fn test_group_version_kinds_per_version() {
        let resource = ApiResource::new("batch", "CronJob", ["v1", "v1beta1"], "cronjobs", true);
        let gvks: Vec<_> = resource.group_version_kinds().collect();
        assert_eq!(
            gvks,
            vec![
                GroupVersionKind::new("batch", "v1", "CronJob"),
                GroupVersionKind::new("batch", "v1beta1", "CronJob"),
            ]
        );
    }

    #[test]
    fn test_api_resource_serde_shape() {
        let json = serde_json::json!({
            "group": "apps",
            "kind": "Deployment",
            "versions": ["v1"],
            "resourcePlural": "deployments",
            "namespaced": true
        });
        let resource: ApiResource = serde_json::from_value(json).unwrap();
        assert_eq!(
            resource,
            ApiResource::new("apps", "Deployment", ["v1"], "deployments", true)
        );
    }

    #[test]
    fn test_type_handle_identity() {
        let a = TypeHandle::of::<V1Pod>();
        let b = TypeHandle::of::<V1Pod>();
        let c = TypeHandle::of::<String>();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.is::<V1Pod>());
        assert!(!a.is::<String>());

        let set: HashSet<TypeHandle> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_type_handle_simple_name() {
        assert_eq!(TypeHandle::of::<V1Pod>().simple_name(), "V1Pod");
        assert_eq!(TypeHandle::of::<Wrapper<V1Pod>>().simple_name(), "Wrapper");
        assert_eq!(TypeHandle::of::<u32>().simple_name(), "u32");
        assert_eq!(TypeHandle::of::<V1Pod>().to_string(), "V1Pod");
    }
}

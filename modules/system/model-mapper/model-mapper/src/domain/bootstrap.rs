//! Startup-time fallback mappings derived from model type names.
//!
//! Candidates are enumerated at link time: every model crate submits its API
//! object and list types with [`submit_model!`](crate::submit_model), and the
//! default `ModelMapper` bootstraps from everything that was linked in.

use std::collections::HashMap;

use model_mapper_sdk::{GroupVersionKind, KubernetesListObject, KubernetesObject, TypeHandle};
use tracing::{debug, info, warn};

use super::naming::NamingConvention;

/// What a candidate model type represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelCategory {
    /// A single API object, e.g. `V1Pod`.
    Object,
    /// A list of API objects, e.g. `V1PodList`.
    List,
}

/// A model type offered to the bootstrap resolver, with the name its GVK is
/// derived from.
#[derive(Debug, Clone, Copy)]
pub struct ModelCandidate {
    name: &'static str,
    handle: fn() -> TypeHandle,
    category: ModelCategory,
}

impl ModelCandidate {
    /// A candidate for a single-object model type.
    #[must_use]
    pub const fn object<T: KubernetesObject>(name: &'static str) -> Self {
        Self {
            name,
            handle: TypeHandle::of::<T>,
            category: ModelCategory::Object,
        }
    }

    /// A candidate for a list model type.
    #[must_use]
    pub const fn list<T: KubernetesListObject>(name: &'static str) -> Self {
        Self {
            name,
            handle: TypeHandle::of::<T>,
            category: ModelCategory::List,
        }
    }

    /// The simple type name: the last path segment of the registered name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name).trim()
    }

    #[must_use]
    pub fn handle(&self) -> TypeHandle {
        (self.handle)()
    }

    #[must_use]
    pub const fn category(&self) -> ModelCategory {
        self.category
    }
}

inventory::collect!(ModelCandidate);

/// Every candidate submitted with `submit_model!` in the linked crates.
pub fn linked_candidates() -> impl Iterator<Item = ModelCandidate> {
    inventory::iter::<ModelCandidate>.into_iter().copied()
}

/// Submits a model type as a bootstrap candidate.
///
/// ```ignore
/// impl KubernetesObject for V1Pod {}
/// impl KubernetesListObject for V1PodList {}
///
/// model_mapper::submit_model!(object V1Pod);
/// model_mapper::submit_model!(list V1PodList);
/// ```
#[macro_export]
macro_rules! submit_model {
    (object $ty:ty) => {
        $crate::inventory::submit! {
            $crate::ModelCandidate::object::<$ty>(stringify!($ty))
        }
    };
    (list $ty:ty) => {
        $crate::inventory::submit! {
            $crate::ModelCandidate::list::<$ty>(stringify!($ty))
        }
    };
}

/// Name-derived GVK to type mappings. Immutable once built.
#[derive(Debug, Default)]
pub struct BootstrapMap {
    by_gvk: HashMap<GroupVersionKind, TypeHandle>,
}

impl BootstrapMap {
    /// Resolves every candidate through `convention`.
    ///
    /// Candidates whose names cannot be resolved are logged and skipped. When two
    /// candidates resolve to the same GVK the later one wins.
    pub fn build<I>(convention: &NamingConvention, candidates: I) -> Self
    where
        I: IntoIterator<Item = ModelCandidate>,
    {
        let mut by_gvk = HashMap::new();
        let (mut objects, mut lists, mut skipped) = (0_usize, 0_usize, 0_usize);

        for candidate in candidates {
            let name = candidate.name();
            let gvk = match convention.resolve(name) {
                Ok(gvk) => gvk,
                Err(e) => {
                    warn!(model = %name, error = %e, "Skipping bootstrap candidate");
                    skipped += 1;
                    continue;
                }
            };

            match candidate.category() {
                ModelCategory::Object => objects += 1,
                ModelCategory::List => lists += 1,
            }

            let handle = candidate.handle();
            if let Some(previous) = by_gvk.insert(gvk.clone(), handle) {
                debug!(
                    gvk = %gvk,
                    previous = previous.type_name(),
                    current = handle.type_name(),
                    "Bootstrap GVK collision, keeping the later model"
                );
            }
        }

        info!(
            mapped = by_gvk.len(),
            objects,
            lists,
            skipped,
            "Bootstrapped model mappings"
        );
        Self { by_gvk }
    }

    /// Looks up `gvk`, retrying in the core group when the exact group misses.
    ///
    /// Model names rarely carry their group, so `V1StorageClass` is bootstrapped as
    /// `("", "v1", "StorageClass")` and still answers for `storage.k8s.io`.
    #[must_use]
    pub fn get(&self, gvk: &GroupVersionKind) -> Option<TypeHandle> {
        self.by_gvk
            .get(gvk)
            .or_else(|| self.by_gvk.get(&gvk.in_core_group()))
            .copied()
    }

    /// The GVK the naming convention assigned to `ty`, if any.
    #[must_use]
    pub fn gvk_for(&self, ty: TypeHandle) -> Option<GroupVersionKind> {
        self.by_gvk
            .iter()
            .find(|(_, handle)| **handle == ty)
            .map(|(gvk, _)| gvk.clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_gvk.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_gvk.is_empty()
    }
}

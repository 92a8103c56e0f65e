//! The model mapper: a concurrent, two-way registry between resource identifiers
//! and model types.
//!
//! Lookups consult the dynamic layer (filled by `register` and discovery) first
//! and fall back to the name-derived bootstrap layer for GVK queries.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use model_mapper_sdk::{
    ApiResource, GroupVersion, GroupVersionKind, GroupVersionResource, TypeHandle,
};
use parking_lot::RwLock;
use tokio::time::Instant;
use tracing::{debug, warn};

use super::bootstrap::{BootstrapMap, ModelCandidate, linked_candidates};
use super::naming::NamingConvention;
use crate::config::ModelMapperConfig;
use crate::infra::StripedBiMap;

static GLOBAL: LazyLock<ModelMapper> = LazyLock::new(ModelMapper::from_linked_models);

/// Discovery results cached between two refreshes.
#[derive(Debug, Default)]
pub(super) struct RefreshState {
    pub(super) last_discovery: Arc<HashSet<ApiResource>>,
    /// `None` until the first successful refresh.
    pub(super) next_refresh_deadline: Option<Instant>,
}

/// Registry of model types by GVK and GVR.
pub struct ModelMapper {
    config: ModelMapperConfig,
    bootstrap: BootstrapMap,
    by_gvk: StripedBiMap<GroupVersionKind, TypeHandle>,
    by_gvr: StripedBiMap<GroupVersionResource, TypeHandle>,
    namespaced: DashMap<TypeHandle, bool>,
    pub(super) refresh_state: RwLock<RefreshState>,
    /// Serializes discovery round-trips; never held by lookups.
    pub(super) refresh_gate: tokio::sync::Mutex<()>,
}

impl ModelMapper {
    /// Creates a mapper whose bootstrap layer is resolved from `candidates`.
    #[must_use]
    pub fn new<I>(config: ModelMapperConfig, candidates: I) -> Self
    where
        I: IntoIterator<Item = ModelCandidate>,
    {
        let convention = NamingConvention::with_extra_groups(&config.extra_api_groups);
        let bootstrap = BootstrapMap::build(&convention, candidates);
        if bootstrap.is_empty() {
            warn!("No model types bootstrapped, GVK lookups rely on explicit registration");
        }

        let by_gvk = StripedBiMap::new(config.lock_stripes());
        let by_gvr = StripedBiMap::new(config.lock_stripes());
        debug!(stripes = by_gvk.stripes(), "Model mapper initialized");

        Self {
            config,
            bootstrap,
            by_gvk,
            by_gvr,
            namespaced: DashMap::new(),
            refresh_state: RwLock::new(RefreshState::default()),
            refresh_gate: tokio::sync::Mutex::new(()),
        }
    }

    /// Creates a mapper bootstrapped from every model submitted with `submit_model!`.
    #[must_use]
    pub fn with_config(config: ModelMapperConfig) -> Self {
        Self::new(config, linked_candidates())
    }

    fn from_linked_models() -> Self {
        Self::with_config(ModelMapperConfig::default())
    }

    /// The process-wide mapper, bootstrapped from the linked models on first use.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    #[must_use]
    pub fn config(&self) -> &ModelMapperConfig {
        &self.config
    }

    /// Registers `ty` under both identifiers, overwriting previous mappings.
    ///
    /// The namespaced flag is only touched when `namespaced` is `Some`. Keys that
    /// previously pointed at `ty` keep resolving to it until overwritten.
    pub fn register(
        &self,
        group: &str,
        version: &str,
        kind: &str,
        resource_plural: &str,
        namespaced: Option<bool>,
        ty: TypeHandle,
    ) {
        // Written in reverse order of the reader's path (GVK, then GVR, then flag):
        // once a GVK entry is visible, the rest of this call is too.
        if let Some(namespaced) = namespaced {
            self.namespaced.insert(ty, namespaced);
        }
        self.by_gvr
            .insert(GroupVersionResource::new(group, version, resource_plural), ty);
        self.by_gvk
            .insert(GroupVersionKind::new(group, version, kind), ty);
    }

    /// Registers `ty` using an `apiVersion` string such as `apps/v1` or `v1`.
    pub fn register_api_version(
        &self,
        api_version: &str,
        kind: &str,
        resource_plural: &str,
        namespaced: Option<bool>,
        ty: TypeHandle,
    ) {
        let gv = GroupVersion::parse(api_version);
        self.register(&gv.group, &gv.version, kind, resource_plural, namespaced, ty);
    }

    /// Looks up the model type of a GVK, falling back to the bootstrap layer.
    #[must_use]
    pub fn lookup_type_by_gvk(&self, group: &str, version: &str, kind: &str) -> Option<TypeHandle> {
        let gvk = GroupVersionKind::new(group, version, kind);
        self.by_gvk
            .get_by_key(&gvk)
            .or_else(|| self.bootstrap.get(&gvk))
    }

    /// Looks up the model type of an `apiVersion` string and kind.
    #[must_use]
    pub fn lookup_type_by_api_version(&self, api_version: &str, kind: &str) -> Option<TypeHandle> {
        let gv = GroupVersion::parse(api_version);
        self.lookup_type_by_gvk(&gv.group, &gv.version, kind)
    }

    /// Looks up the model type listed under a GVR. There is no bootstrap layer for GVRs.
    #[must_use]
    pub fn lookup_type_by_gvr(
        &self,
        group: &str,
        version: &str,
        resource_plural: &str,
    ) -> Option<TypeHandle> {
        self.by_gvr
            .get_by_key(&GroupVersionResource::new(group, version, resource_plural))
    }

    /// The GVK most recently registered for `ty`.
    #[must_use]
    pub fn lookup_gvk(&self, ty: TypeHandle) -> Option<GroupVersionKind> {
        self.by_gvk.get_by_value(&ty)
    }

    /// The GVR most recently registered for `ty`.
    #[must_use]
    pub fn lookup_gvr(&self, ty: TypeHandle) -> Option<GroupVersionResource> {
        self.by_gvr.get_by_value(&ty)
    }

    /// The GVK the naming convention assigned to `ty` at bootstrap.
    #[must_use]
    pub fn bootstrap_gvk_for(&self, ty: TypeHandle) -> Option<GroupVersionKind> {
        self.bootstrap.gvk_for(ty)
    }

    /// Whether `ty` is a namespaced resource, if known.
    #[must_use]
    pub fn is_namespaced(&self, ty: TypeHandle) -> Option<bool> {
        self.namespaced.get(&ty).map(|flag| *flag)
    }

    /// Whether a discovery refresh has ever completed.
    #[must_use]
    pub fn has_ever_refreshed(&self) -> bool {
        self.refresh_state.read().next_refresh_deadline.is_some()
    }

    /// Number of name-derived bootstrap mappings.
    #[must_use]
    pub fn bootstrap_len(&self) -> usize {
        self.bootstrap.len()
    }

    /// Drops every dynamic mapping and the cached discovery state.
    ///
    /// The bootstrap layer is kept. Intended for test isolation.
    pub fn reset(&self) {
        debug!(
            gvk_entries = self.by_gvk.len(),
            gvr_entries = self.by_gvr.len(),
            "Resetting dynamic model mappings"
        );
        self.by_gvk.clear();
        self.by_gvr.clear();
        self.namespaced.clear();
        *self.refresh_state.write() = RefreshState::default();
    }
}

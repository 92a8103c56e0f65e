#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

//! Shared fixtures: a handful of model types and a scriptable discovery source.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use model_mapper::{
    ApiResource, Discovery, DiscoveryError, KubernetesListObject, KubernetesObject, ModelMapper,
    ModelMapperConfig, submit_model,
};
use parking_lot::Mutex;

pub struct V1Pod;
pub struct V1PodList;
pub struct V1Deployment;
pub struct V1beta1TokenReview;
pub struct V1StorageClass;
pub struct BatchV1CronJob;

impl KubernetesObject for V1Pod {}
impl KubernetesListObject for V1PodList {}
impl KubernetesObject for V1Deployment {}
impl KubernetesObject for V1beta1TokenReview {}
impl KubernetesObject for V1StorageClass {}
impl KubernetesObject for BatchV1CronJob {}

submit_model!(object V1Pod);
submit_model!(list V1PodList);
submit_model!(object V1Deployment);
submit_model!(object V1beta1TokenReview);
submit_model!(object V1StorageClass);
submit_model!(object BatchV1CronJob);

/// A fresh mapper bootstrapped from the models above.
pub fn create_mapper() -> ModelMapper {
    ModelMapper::with_config(ModelMapperConfig::default())
}

pub fn pod_resource() -> ApiResource {
    ApiResource::new("", "Pod", ["v1"], "pods", true)
}

/// Discovery double that counts calls and answers with a replaceable response.
pub struct FakeDiscovery {
    calls: AtomicUsize,
    response: Mutex<Result<HashSet<ApiResource>, DiscoveryError>>,
    latency: Duration,
}

impl FakeDiscovery {
    pub fn new(resources: impl IntoIterator<Item = ApiResource>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            response: Mutex::new(Ok(resources.into_iter().collect())),
            latency: Duration::ZERO,
        }
    }

    pub fn failing(error: DiscoveryError) -> Self {
        let discovery = Self::new([]);
        discovery.respond_with(Err(error));
        discovery
    }

    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn respond_with(&self, response: Result<HashSet<ApiResource>, DiscoveryError>) {
        *self.response.lock() = response;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Discovery for FakeDiscovery {
    async fn find_all(&self) -> Result<HashSet<ApiResource>, DiscoveryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.response.lock().clone()
    }
}

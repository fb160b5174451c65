//! The REST client for the console backend.
//!
//! `Backend` is the seam used by the session services.  `HttpBackend` implements it over
//! `reqwest`, under the base url from the console config.

mod error;
mod http;

pub use error::BackendError;
pub use http::HttpBackend;
pub use reqwest::StatusCode;

use async_trait::async_trait;
use console_api::{
    namespace::{Namespace, NamespaceId},
    resource::{NamespaceDetails, Resource, ResourceKind, Schema},
};

pub type BackendResult<T> = std::result::Result<T, BackendError>;

#[async_trait]
pub trait Backend: Send + Sync + 'static {
    /// The namespace catalog
    async fn namespaces(&self) -> BackendResult<Vec<Namespace>>;

    /// The schema catalog
    async fn schemas(&self) -> BackendResult<Vec<Schema>>;

    /// Fetches every resource list of a namespace.
    ///
    /// Safe to call repeatedly.  A 4xx on a resource list yields an empty list, not an error.
    async fn fetch_namespace_details(&self, namespace: &NamespaceId)
        -> BackendResult<NamespaceDetails>;

    async fn create(&self, namespace: &NamespaceId, resource: &Resource) -> BackendResult<()>;

    async fn update(&self, namespace: &NamespaceId, resource: &Resource) -> BackendResult<()>;

    async fn delete(
        &self,
        namespace: &NamespaceId,
        kind: ResourceKind,
        id: &str,
    ) -> BackendResult<()>;
}

use crate::{Backend, BackendError, BackendResult};
use async_trait::async_trait;
use console_api::{
    config::Config,
    namespace::{Namespace, NamespaceId},
    resource::{
        Account, Lambda, Method, NamespaceDetails, Resource, ResourceKind, Schema, Webhook,
    },
};
use log::{debug, warn};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

/// The backend, over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &Config) -> BackendResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(BackendError::Client)?;

        Ok(Self::with_client(client, config.backend_url.as_str()))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn collection_url(&self, namespace: &NamespaceId, kind: ResourceKind) -> String {
        self.url(format!("namespaces/{}/{}", namespace, kind.path()).as_str())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> BackendResult<T> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|source| BackendError::Request {
                url: url.clone(),
                source,
            })?;

        let response = check_status(url.as_str(), response)?;
        response
            .json()
            .await
            .map_err(|source| BackendError::Decode { url, source })
    }

    /// Fetches a resource list, treating a 4xx as an empty list
    async fn list_or_empty<T: DeserializeOwned>(&self, url: String) -> BackendResult<Vec<T>> {
        match self.get_json(url.clone()).await {
            Ok(items) => Ok(items),
            Err(err) if err.is_client_error() => {
                warn!("{} - continuing with an empty list", err);
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }

    async fn send_body(
        &self,
        method: reqwest::Method,
        url: String,
        resource: &Resource,
    ) -> BackendResult<()> {
        debug!("{} {}", method, url);
        let response = self
            .client
            .request(method, url.as_str())
            .json(resource)
            .send()
            .await
            .map_err(|source| BackendError::Request {
                url: url.clone(),
                source,
            })?;

        check_status(url.as_str(), response)?;
        Ok(())
    }
}

fn check_status(url: &str, response: Response) -> BackendResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(BackendError::status(url, status))
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn namespaces(&self) -> BackendResult<Vec<Namespace>> {
        self.get_json(self.url("namespaces")).await
    }

    async fn schemas(&self) -> BackendResult<Vec<Schema>> {
        self.get_json(self.url("schemas")).await
    }

    async fn fetch_namespace_details(
        &self,
        namespace: &NamespaceId,
    ) -> BackendResult<NamespaceDetails> {
        let (accounts, methods, schemas, webhooks, lambdas) = tokio::try_join!(
            self.list_or_empty::<Account>(self.collection_url(namespace, ResourceKind::Account)),
            self.list_or_empty::<Method>(self.collection_url(namespace, ResourceKind::Method)),
            self.list_or_empty::<Schema>(self.collection_url(namespace, ResourceKind::Schema)),
            self.list_or_empty::<Webhook>(self.collection_url(namespace, ResourceKind::Webhook)),
            self.list_or_empty::<Lambda>(self.collection_url(namespace, ResourceKind::Lambda)),
        )?;

        Ok(NamespaceDetails {
            accounts,
            methods,
            schemas,
            webhooks,
            lambdas,
        })
    }

    async fn create(&self, namespace: &NamespaceId, resource: &Resource) -> BackendResult<()> {
        let url = self.collection_url(namespace, resource.kind());
        self.send_body(reqwest::Method::POST, url, resource).await
    }

    async fn update(&self, namespace: &NamespaceId, resource: &Resource) -> BackendResult<()> {
        let url = format!(
            "{}/{}",
            self.collection_url(namespace, resource.kind()),
            resource.id()
        );
        self.send_body(reqwest::Method::PUT, url, resource).await
    }

    async fn delete(
        &self,
        namespace: &NamespaceId,
        kind: ResourceKind,
        id: &str,
    ) -> BackendResult<()> {
        let url = format!("{}/{}", self.collection_url(namespace, kind), id);
        debug!("DELETE {}", url);

        let response = self
            .client
            .delete(url.as_str())
            .send()
            .await
            .map_err(|source| BackendError::Request {
                url: url.clone(),
                source,
            })?;

        check_status(url.as_str(), response)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::HttpBackend;
    use console_api::{namespace::NamespaceId, resource::ResourceKind};
    use reqwest::Client;

    #[test]
    fn urls_trim_slashes() {
        let backend = HttpBackend::with_client(Client::new(), "http://backend:8080/api/");

        assert_eq!("http://backend:8080/api", backend.base_url());
        assert_eq!("http://backend:8080/api/namespaces", backend.url("/namespaces"));
        assert_eq!(
            "http://backend:8080/api/namespaces/ns1/webhooks",
            backend.collection_url(&NamespaceId::from("ns1"), ResourceKind::Webhook)
        );
    }
}

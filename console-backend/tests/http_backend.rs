use axum::{
    extract::Path,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use console_api::{
    namespace::NamespaceId,
    resource::{Account, Resource, ResourceKind},
};
use console_backend::{Backend, BackendError, HttpBackend};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};
use tokio::{net::TcpListener, task::JoinHandle};

type Seen = Arc<Mutex<Vec<(String, Value)>>>;

fn router(seen: Seen) -> Router {
    let post_seen = seen.clone();
    let put_seen = seen.clone();
    let delete_seen = seen;

    Router::new()
        .route(
            "/namespaces",
            get(|| async {
                Json(json!([
                    {"namespace-id": "ns1", "namespace-name": "NS One", "namespace-url": "https://ns1"},
                    {"namespace-id": "ns2", "namespace-name": "NS Two"}
                ]))
            }),
        )
        .route(
            "/schemas",
            get(|| async { Json(json!([{"id": "s1", "schemaName": "order", "schema": {"type": "object"}}])) }),
        )
        .route(
            "/namespaces/:ns/accounts",
            get(|Path(ns): Path<String>| async move {
                if ns == "broken" {
                    return Err(StatusCode::INTERNAL_SERVER_ERROR);
                }

                Ok(Json(json!([
                    {"namespace-account-id": "a1", "namespace-account-name": "billing"}
                ])))
            })
            .post(move |Path(ns): Path<String>, Json(body): Json<Value>| {
                let seen = post_seen.clone();
                async move {
                    if ns == "readonly" {
                        return StatusCode::FORBIDDEN;
                    }

                    seen.lock().unwrap().push((format!("POST {}", ns), body));
                    StatusCode::CREATED
                }
            }),
        )
        .route(
            "/namespaces/:ns/accounts/:id",
            put(move |Path((ns, id)): Path<(String, String)>, Json(body): Json<Value>| {
                let seen = put_seen.clone();
                async move {
                    seen.lock().unwrap().push((format!("PUT {}/{}", ns, id), body));
                    StatusCode::OK
                }
            })
            .delete(move |Path((ns, id)): Path<(String, String)>| {
                let seen = delete_seen.clone();
                async move {
                    seen.lock()
                        .unwrap()
                        .push((format!("DELETE {}/{}", ns, id), Value::Null));
                    StatusCode::NO_CONTENT
                }
            }),
        )
        .route(
            "/namespaces/:ns/methods",
            get(|| async { Json(json!([{"namespace-method-id": "m1", "namespace-method-name": "list"}])) }),
        )
        .route(
            "/namespaces/:ns/schemas",
            get(|| async { Json(json!([])) }),
        )
        // webhooks are not enabled for this backend
        .route("/namespaces/:ns/webhooks", get(|| async { StatusCode::NOT_FOUND }))
        .route(
            "/namespaces/:ns/lambdas",
            get(|| async { Json(json!([{"id": "l1", "functionName": "resize"}])) }),
        )
}

async fn spawn_backend() -> anyhow::Result<(HttpBackend, Seen, JoinHandle<()>)> {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;

    let app = router(seen.clone());
    let handle = tokio::spawn(async move {
        axum::serve(listener, app.into_make_service()).await.ok();
    });

    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(std::time::Duration::from_secs(2))
        .build()?;
    let backend = HttpBackend::with_client(client, format!("http://{}/", addr).as_str());

    Ok((backend, seen, handle))
}

#[tokio::test]
async fn catalogs() -> anyhow::Result<()> {
    let (backend, _seen, handle) = spawn_backend().await?;

    let namespaces = backend.namespaces().await?;
    assert_eq!(2, namespaces.len());
    assert_eq!("NS One", namespaces[0].name);
    assert_eq!(Some("https://ns1".to_string()), namespaces[0].url);
    assert_eq!(None, namespaces[1].url);

    let schemas = backend.schemas().await?;
    assert_eq!(1, schemas.len());
    assert_eq!("order", schemas[0].name);
    assert_eq!(json!({"type": "object"}), schemas[0].schema);

    handle.abort();
    Ok(())
}

#[tokio::test]
async fn namespace_details_tolerate_client_errors() -> anyhow::Result<()> {
    let (backend, _seen, handle) = spawn_backend().await?;

    let details = backend
        .fetch_namespace_details(&NamespaceId::from("ns1"))
        .await?;

    assert_eq!(1, details.accounts.len());
    assert_eq!("billing", details.accounts[0].name);
    assert_eq!(1, details.methods.len());
    assert!(details.schemas.is_empty());
    assert!(details.webhooks.is_empty());
    assert_eq!("resize", details.lambdas[0].function_name);

    // repeated calls are safe
    let again = backend
        .fetch_namespace_details(&NamespaceId::from("ns1"))
        .await?;
    assert_eq!(details, again);

    handle.abort();
    Ok(())
}

#[tokio::test]
async fn namespace_details_server_error() -> anyhow::Result<()> {
    let (backend, _seen, handle) = spawn_backend().await?;

    let result = backend
        .fetch_namespace_details(&NamespaceId::from("broken"))
        .await;

    match result {
        Err(BackendError::Status { status, .. }) => assert_eq!(500, status.as_u16()),
        other => panic!("expected a status error, got {:?}", other),
    }

    handle.abort();
    Ok(())
}

#[tokio::test]
async fn mutations() -> anyhow::Result<()> {
    let (backend, seen, handle) = spawn_backend().await?;
    let ns = NamespaceId::from("ns1");
    let account = Resource::Account(Account::builder().id("a2").name("ops").build());

    backend.create(&ns, &account).await?;
    backend.update(&ns, &account).await?;
    backend.delete(&ns, ResourceKind::Account, "a2").await?;

    let seen = seen.lock().unwrap().clone();
    let requests: Vec<&str> = seen.iter().map(|(request, _)| request.as_str()).collect();
    assert_eq!(vec!["POST ns1", "PUT ns1/a2", "DELETE ns1/a2"], requests);
    assert_eq!(
        json!({"namespace-account-id": "a2", "namespace-account-name": "ops",
               "namespace-account-header": [], "variables": [], "tags": []}),
        seen[0].1
    );

    handle.abort();
    Ok(())
}

#[tokio::test]
async fn rejected_mutation_is_an_error() -> anyhow::Result<()> {
    let (backend, _seen, handle) = spawn_backend().await?;
    let account = Resource::Account(Account::builder().id("a3").name("ops").build());

    let err = backend
        .create(&NamespaceId::from("readonly"), &account)
        .await
        .expect_err("forbidden");

    assert!(err.is_client_error());

    handle.abort();
    Ok(())
}

#[tokio::test]
async fn unreachable_backend() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let backend = HttpBackend::with_client(reqwest::Client::new(), format!("http://{}", addr).as_str());
    let err = backend.namespaces().await.expect_err("connection refused");

    assert!(matches!(err, BackendError::Request { .. }));
    Ok(())
}

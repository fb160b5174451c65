use crate::{
    message::{
        notification::Notification,
        workspace::{CatalogRequest, CatalogResult, WorkspaceRecv},
    },
    prelude::*,
    resource::BackendResource,
    utils::notify,
};
use console_backend::{Backend, BackendResult};
use console_workspace::Catalog;

/// Resyncs the namespace and schema catalogs (`refresh_data`)
pub struct CatalogService {
    _refresh: Lifeline,
}

impl Service for CatalogService {
    type Bus = SessionBus;
    type Lifeline = anyhow::Result<Self>;

    fn spawn(bus: &Self::Bus) -> Self::Lifeline {
        let mut rx = bus.rx::<CatalogRequest>()?;
        let tx = bus.tx::<WorkspaceRecv>()?;
        let tx_notify = bus.tx::<Notification>()?;
        let backend = bus.resource::<BackendResource>()?;

        let _refresh = Self::try_task("refresh", async move {
            while let Some(CatalogRequest(ticket)) = rx.recv().await {
                let backend = backend.0.clone();
                let mut tx = tx.clone();
                let mut tx_notify = tx_notify.clone();

                tokio::spawn(async move {
                    let (result, notification) = match Self::load(backend.as_ref()).await {
                        Ok(catalog) => {
                            info!(
                                "loaded {} namespaces and {} schemas",
                                catalog.namespaces.len(),
                                catalog.schemas.len()
                            );
                            (Ok(catalog), None)
                        }
                        Err(err) => {
                            error!("catalog refresh failed: {}", err);
                            let message = format!("Failed to refresh data: {}", err);
                            (Err(err.to_string()), Some(Notification::error(message)))
                        }
                    };

                    let loaded = WorkspaceRecv::CatalogLoaded(CatalogResult { ticket, result });
                    tx.send(loaded).await.ok();

                    if let Some(notification) = notification {
                        notify(&mut tx_notify, notification);
                    }
                });
            }

            Ok(())
        });

        Ok(Self { _refresh })
    }
}

impl CatalogService {
    async fn load(backend: &dyn Backend) -> BackendResult<Catalog> {
        let (namespaces, schemas) = tokio::try_join!(backend.namespaces(), backend.schemas())?;

        Ok(Catalog {
            namespaces,
            schemas,
        })
    }
}

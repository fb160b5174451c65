use crate::{
    message::workspace::{HydrationRequest, HydrationResult, WorkspaceRecv},
    prelude::*,
    resource::BackendResource,
};

/// Runs `fetch_namespace_details` for each opened page, and reports the result to the
/// workspace with the ticket it was issued.
///
/// Requests run concurrently.  Out-of-order responses are discarded by the store, and the
/// workspace only reports failures it has applied.
pub struct HydrationService {
    _fetch: Lifeline,
}

impl Service for HydrationService {
    type Bus = SessionBus;
    type Lifeline = anyhow::Result<Self>;

    fn spawn(bus: &Self::Bus) -> Self::Lifeline {
        let mut rx = bus.rx::<HydrationRequest>()?;
        let tx = bus.tx::<WorkspaceRecv>()?;
        let backend = bus.resource::<BackendResource>()?;

        let _fetch = Self::try_task("fetch", async move {
            while let Some(HydrationRequest(ticket)) = rx.recv().await {
                let backend = backend.0.clone();
                let mut tx = tx.clone();

                tokio::spawn(async move {
                    debug!("fetching details for page {}", ticket.key);
                    let result = backend
                        .fetch_namespace_details(&ticket.namespace)
                        .await
                        .map_err(|err| {
                            error!("failed to load namespace {}: {}", ticket.namespace, err);
                            err.to_string()
                        });

                    let hydrated = WorkspaceRecv::Hydrated(HydrationResult { ticket, result });
                    tx.send(hydrated).await.ok();
                });
            }

            Ok(())
        });

        Ok(Self { _fetch })
    }
}

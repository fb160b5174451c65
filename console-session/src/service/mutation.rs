use crate::{
    message::{
        notification::Notification,
        session::Mutation,
        workspace::{MutationRequest, MutationResult, WorkspaceRecv},
    },
    prelude::*,
    resource::BackendResource,
    utils::notify,
};
use console_backend::{Backend, BackendResult};
use console_api::namespace::NamespaceId;

/// Sends create, update, and delete requests to the backend.
///
/// Local state only changes once the backend accepts the request.  The outcome is reported to
/// the workspace, which refreshes the catalogs and the namespace caches.
pub struct MutationService {
    _mutate: Lifeline,
}

impl Service for MutationService {
    type Bus = SessionBus;
    type Lifeline = anyhow::Result<Self>;

    fn spawn(bus: &Self::Bus) -> Self::Lifeline {
        let mut rx = bus.rx::<MutationRequest>()?;
        let tx = bus.tx::<WorkspaceRecv>()?;
        let tx_notify = bus.tx::<Notification>()?;
        let backend = bus.resource::<BackendResource>()?;

        let _mutate = Self::try_task("mutate", async move {
            while let Some(request) = rx.recv().await {
                let backend = backend.0.clone();
                let mut tx = tx.clone();
                let mut tx_notify = tx_notify.clone();

                tokio::spawn(async move {
                    let MutationRequest {
                        namespace,
                        mutation,
                    } = request;

                    let described = format!("{} {}", mutation.kind(), mutation.target());
                    let result = Self::apply(backend.as_ref(), &namespace.id, &mutation).await;

                    let notification = match result {
                        Ok(()) => {
                            info!("{} {} in {}", mutation.verb(), described, namespace.id);
                            Notification::info(format!("{} {}", capitalize(&described), mutation.verb()))
                        }
                        Err(ref err) => {
                            error!("failed to {} {}: {}", verb_of(&mutation), described, err);
                            Notification::error(format!(
                                "Failed to {} {}: {}",
                                verb_of(&mutation),
                                described,
                                err
                            ))
                        }
                    };

                    let result = result.map_err(|err| err.to_string());
                    let mutated = WorkspaceRecv::Mutated(MutationResult {
                        namespace,
                        mutation,
                        result,
                    });

                    tx.send(mutated).await.ok();
                    notify(&mut tx_notify, notification);
                });
            }

            Ok(())
        });

        Ok(Self { _mutate })
    }
}

impl MutationService {
    async fn apply(
        backend: &dyn Backend,
        namespace: &NamespaceId,
        mutation: &Mutation,
    ) -> BackendResult<()> {
        match mutation {
            Mutation::Create(resource) => backend.create(namespace, resource).await,
            Mutation::Update(resource) => backend.update(namespace, resource).await,
            Mutation::Delete { kind, id } => backend.delete(namespace, *kind, id.as_str()).await,
        }
    }
}

fn verb_of(mutation: &Mutation) -> &'static str {
    match mutation {
        Mutation::Create(_) => "create",
        Mutation::Update(_) => "update",
        Mutation::Delete { .. } => "delete",
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::capitalize;

    #[test]
    fn capitalize_first_letter() {
        assert_eq!("Account ops", capitalize("account ops"));
        assert_eq!("", capitalize(""));
    }
}

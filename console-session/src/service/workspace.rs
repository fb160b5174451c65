use crate::{
    message::{
        notification::Notification,
        session::{Mutation, SessionRecv},
        workspace::{
            CatalogRequest, CatalogResult, HydrationRequest, HydrationResult, MutationRequest,
            MutationResult, WorkspaceRecv,
        },
    },
    prelude::*,
    utils::notify,
};
use console_api::{
    namespace::{NamespaceId, NamespaceRef},
    route::ActiveKey,
};
use console_workspace::{
    CatalogTicket, HydrationTicket, OpenOptions, OpenTab, WorkspaceSnapshot, WorkspaceStore,
};
use std::time::{SystemTime, UNIX_EPOCH};

/// Owns the workspace store.
///
/// Display layer callbacks and backend results are applied in arrival order, and a snapshot is
/// published after each one.  Backend calls are requested from the other services.
pub struct WorkspaceService {
    _forward: Lifeline,
    _run: Lifeline,
}

/// A backend call requested by a store transition
#[derive(Debug, Clone, PartialEq)]
enum Effect {
    Hydrate(HydrationTicket),
    RefreshCatalog(CatalogTicket),
    Mutate(MutationRequest),
    Notify(Notification),
}

impl Service for WorkspaceService {
    type Bus = SessionBus;
    type Lifeline = anyhow::Result<Self>;

    fn spawn(bus: &Self::Bus) -> Self::Lifeline {
        let _forward = {
            let mut rx = bus.rx::<SessionRecv>()?;
            let mut tx = bus.tx::<WorkspaceRecv>()?;

            Self::try_task("forward", async move {
                while let Some(msg) = rx.recv().await {
                    tx.send(WorkspaceRecv::Session(msg)).await?;
                }

                Ok(())
            })
        };

        let _run = {
            let mut rx = bus.rx::<WorkspaceRecv>()?;

            let mut tx_snapshot = bus.tx::<WorkspaceSnapshot>()?;
            let mut tx_hydrate = bus.tx::<HydrationRequest>()?;
            let mut tx_catalog = bus.tx::<CatalogRequest>()?;
            let mut tx_mutate = bus.tx::<MutationRequest>()?;
            let mut tx_notify = bus.tx::<Notification>()?;

            Self::try_task("run", async move {
                let mut store = WorkspaceStore::new();

                tx_catalog
                    .send(CatalogRequest(store.catalog_ticket()))
                    .await?;
                tx_snapshot.send(store.snapshot()).await?;

                while let Some(msg) = rx.recv().await {
                    debug!("WorkspaceRecv: {:?}", &msg);

                    for effect in Self::handle(&mut store, msg) {
                        match effect {
                            Effect::Hydrate(ticket) => {
                                tx_hydrate.send(HydrationRequest(ticket)).await?
                            }
                            Effect::RefreshCatalog(ticket) => {
                                tx_catalog.send(CatalogRequest(ticket)).await?
                            }
                            Effect::Mutate(request) => tx_mutate.send(request).await?,
                            Effect::Notify(notification) => notify(&mut tx_notify, notification),
                        }
                    }

                    tx_snapshot.send(store.snapshot()).await?;
                }

                Ok(())
            })
        };

        Ok(Self { _forward, _run })
    }
}

impl WorkspaceService {
    fn handle(store: &mut WorkspaceStore, msg: WorkspaceRecv) -> Vec<Effect> {
        match msg {
            WorkspaceRecv::Session(recv) => Self::handle_session(store, recv),
            WorkspaceRecv::Hydrated(HydrationResult { ticket, result }) => {
                let failure = result.as_ref().err().map(|err| {
                    format!("Failed to load namespace {}: {}", ticket.namespace, err)
                });

                match (store.apply_hydration(&ticket, result), failure) {
                    (true, Some(message)) => vec![Effect::Notify(Notification::error(message))],
                    _ => vec![],
                }
            }
            WorkspaceRecv::CatalogLoaded(CatalogResult { ticket, result }) => {
                match result {
                    Ok(catalog) => {
                        store.apply_catalog(ticket, catalog);
                    }
                    Err(err) => debug!("keeping the previous catalog: {}", err),
                }

                vec![]
            }
            WorkspaceRecv::Mutated(MutationResult {
                namespace,
                mutation,
                result,
            }) => {
                if let Err(err) = result {
                    debug!("{} {} failed: {}", mutation.kind(), mutation.target(), err);
                    return vec![];
                }

                if let Mutation::Create(_) = mutation {
                    store.finish_create(mutation.kind(), &namespace.id);
                }

                let mut effects = vec![Effect::RefreshCatalog(store.catalog_ticket())];
                if let Some(ticket) = Self::namespace_ticket(store, &namespace.id) {
                    effects.push(Effect::Hydrate(ticket));
                }

                effects
            }
        }
    }

    fn handle_session(store: &mut WorkspaceStore, recv: SessionRecv) -> Vec<Effect> {
        match recv {
            SessionRecv::OnItemClick { request, namespace } => {
                Self::open(store, request, namespace, OpenOptions::default())
            }
            SessionRecv::OnAdd { kind, namespace } => {
                let options = OpenOptions::builder()
                    .open_create(true)
                    .timestamp(now_millis())
                    .build();

                Self::open(store, OpenTab::listing(kind), namespace, options)
            }
            SessionRecv::Open {
                request,
                namespace,
                options,
            } => Self::open(store, request, namespace, options),
            SessionRecv::CloseTab(key) => {
                store.close_tab(&key);
                vec![]
            }
            SessionRecv::ClosePage(key) => {
                store.close_page(key.as_str());
                vec![]
            }
            SessionRecv::PinTab(key) => {
                store.pin_tab(&key);
                vec![]
            }
            SessionRecv::UnpinTab(key) => {
                store.unpin_tab(&key);
                vec![]
            }
            SessionRecv::ActivateTab(key) => {
                let opened = store.pages().len();
                store.activate_tab(&key);

                // the tab had no pages, and its accounts listing was opened
                if store.pages().len() > opened {
                    if let ActiveKey::Page(key) = store.active() {
                        return store
                            .hydration_ticket(key.as_str())
                            .map(Effect::Hydrate)
                            .into_iter()
                            .collect();
                    }
                }

                vec![]
            }
            SessionRecv::SetActive(key) => {
                store.set_active(key.as_str());
                vec![]
            }
            SessionRecv::AddBlankTab => {
                store.add_blank_tab();
                vec![]
            }
            SessionRecv::Mutate {
                namespace,
                mutation,
            } => vec![Effect::Mutate(MutationRequest {
                namespace,
                mutation,
            })],
            SessionRecv::RefreshData => vec![Effect::RefreshCatalog(store.catalog_ticket())],
        }
    }

    fn open(
        store: &mut WorkspaceStore,
        request: OpenTab,
        namespace: NamespaceRef,
        options: OpenOptions,
    ) -> Vec<Effect> {
        let key = store.open(request, namespace, options);

        store
            .hydration_ticket(key.as_str())
            .filter(|ticket| !ticket.namespace.as_str().is_empty())
            .map(Effect::Hydrate)
            .into_iter()
            .collect()
    }

    /// A fresh ticket for the most recently opened page of the namespace
    fn namespace_ticket(
        store: &mut WorkspaceStore,
        namespace: &NamespaceId,
    ) -> Option<HydrationTicket> {
        let key = store
            .pages()
            .iter()
            .rev()
            .find(|page| &page.namespace.id == namespace)
            .map(|page| page.key.clone())?;

        store.rehydrate(key.as_str())
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{Effect, WorkspaceService};
    use crate::message::{
        notification::Notification,
        session::{Mutation, SessionRecv},
        workspace::{CatalogResult, HydrationResult, MutationRequest, MutationResult, WorkspaceRecv},
    };
    use console_api::{
        namespace::{NamespaceId, NamespaceRef},
        resource::{Account, NamespaceDetails, Resource, ResourceKind},
        route::TabKey,
    };
    use console_workspace::{Catalog, HydrationTicket, LoadState, OpenTab, WorkspaceStore};
    use pretty_assertions::assert_eq;

    fn ns1() -> NamespaceRef {
        NamespaceRef::new("ns1", "NS One")
    }

    fn session(store: &mut WorkspaceStore, recv: SessionRecv) -> Vec<Effect> {
        WorkspaceService::handle(store, WorkspaceRecv::Session(recv))
    }

    fn ticket(key: &str, generation: u64) -> HydrationTicket {
        HydrationTicket {
            key: key.to_string(),
            namespace: NamespaceId::from("ns1"),
            generation,
        }
    }

    #[test]
    fn on_add_opens_listing_in_create_mode() {
        let mut store = WorkspaceStore::new();

        let effects = session(
            &mut store,
            SessionRecv::OnAdd {
                kind: ResourceKind::Method,
                namespace: ns1(),
            },
        );

        assert_eq!(vec![Effect::Hydrate(ticket("allMethods-ns1", 1))], effects);

        let page = store.page("allMethods-ns1").expect("listing");
        assert!(page.page.open_create());
        assert!(page.page.timestamp().is_some());
        assert!(store
            .tab(&TabKey::Namespace(NamespaceId::from("ns1")))
            .is_some());
    }

    #[test]
    fn reopen_issues_a_newer_ticket() {
        let mut store = WorkspaceStore::new();
        let click = SessionRecv::OnItemClick {
            request: OpenTab::SingleNamespace,
            namespace: ns1(),
        };

        let first = session(&mut store, click.clone());
        let second = session(&mut store, click);

        assert_eq!(vec![Effect::Hydrate(ticket("allAccounts-ns1", 1))], first);
        assert_eq!(vec![Effect::Hydrate(ticket("allAccounts-ns1", 2))], second);

        let mut details = NamespaceDetails::default();
        details
            .accounts
            .push(Account::builder().id("a1").name("billing").build());

        WorkspaceService::handle(
            &mut store,
            WorkspaceRecv::Hydrated(HydrationResult {
                ticket: ticket("allAccounts-ns1", 1),
                result: Ok(details),
            }),
        );

        let page = store.page("allAccounts-ns1").unwrap();
        assert_eq!(LoadState::Pending, page.load);
        assert_eq!(None, store.details(&NamespaceId::from("ns1")));
    }

    #[test]
    fn mutate_is_forwarded_unchanged() {
        let mut store = WorkspaceStore::new();
        let mutation = Mutation::Delete {
            kind: ResourceKind::Account,
            id: "a1".into(),
        };

        let effects = session(
            &mut store,
            SessionRecv::Mutate {
                namespace: ns1(),
                mutation: mutation.clone(),
            },
        );

        assert_eq!(
            vec![Effect::Mutate(MutationRequest {
                namespace: ns1(),
                mutation
            })],
            effects
        );
        assert!(store.pages().is_empty());
    }

    #[test]
    fn failed_mutation_changes_nothing() {
        let mut store = WorkspaceStore::new();
        session(
            &mut store,
            SessionRecv::OnAdd {
                kind: ResourceKind::Account,
                namespace: ns1(),
            },
        );
        let before = store.snapshot();

        let account = Account::builder().id("a2").name("ops").build();
        let effects = WorkspaceService::handle(
            &mut store,
            WorkspaceRecv::Mutated(MutationResult {
                namespace: ns1(),
                mutation: Mutation::Create(Resource::Account(account)),
                result: Err("request returned status 500".into()),
            }),
        );

        assert!(effects.is_empty());
        assert_eq!(before, store.snapshot());
    }

    #[test]
    fn created_resource_refreshes() {
        let mut store = WorkspaceStore::new();
        session(
            &mut store,
            SessionRecv::OnAdd {
                kind: ResourceKind::Account,
                namespace: ns1(),
            },
        );

        let account = Account::builder().id("a2").name("ops").build();
        let effects = WorkspaceService::handle(
            &mut store,
            WorkspaceRecv::Mutated(MutationResult {
                namespace: ns1(),
                mutation: Mutation::Create(Resource::Account(account)),
                result: Ok(()),
            }),
        );

        assert_eq!(2, effects.len());
        assert!(matches!(effects[0], Effect::RefreshCatalog(_)));
        assert_eq!(Effect::Hydrate(ticket("allAccounts-ns1", 2)), effects[1]);
        assert!(!store.page("allAccounts-ns1").unwrap().page.open_create());
    }

    #[test]
    fn activating_an_empty_namespace_tab_hydrates() {
        let mut store = WorkspaceStore::new();
        session(
            &mut store,
            SessionRecv::OnItemClick {
                request: OpenTab::AllLambdas,
                namespace: ns1(),
            },
        );
        session(&mut store, SessionRecv::ClosePage("allLambdas-ns1".into()));

        let tab = TabKey::Namespace(NamespaceId::from("ns1"));
        let effects = session(&mut store, SessionRecv::ActivateTab(tab.clone()));
        assert_eq!(vec![Effect::Hydrate(ticket("allAccounts-ns1", 2))], effects);

        // the page is open now, so nothing is fetched
        session(&mut store, SessionRecv::SetActive("overview".into()));
        assert!(session(&mut store, SessionRecv::ActivateTab(tab)).is_empty());
    }

    fn hydrated(ticket: HydrationTicket, result: Result<NamespaceDetails, String>) -> WorkspaceRecv {
        WorkspaceRecv::Hydrated(HydrationResult { ticket, result })
    }

    fn single_namespace(store: &mut WorkspaceStore) -> HydrationTicket {
        let click = SessionRecv::OnItemClick {
            request: OpenTab::SingleNamespace,
            namespace: ns1(),
        };

        match session(store, click).pop() {
            Some(Effect::Hydrate(ticket)) => ticket,
            other => panic!("unexpected effect {:?}", other),
        }
    }

    #[test]
    fn late_response_from_before_a_mutation_is_discarded() {
        let mut store = WorkspaceStore::new();
        let before = single_namespace(&mut store);

        let account = Account::builder().id("a2").name("ops").build();
        let effects = WorkspaceService::handle(
            &mut store,
            WorkspaceRecv::Mutated(MutationResult {
                namespace: ns1(),
                mutation: Mutation::Create(Resource::Account(account.clone())),
                result: Ok(()),
            }),
        );
        let after = match effects.last() {
            Some(Effect::Hydrate(ticket)) => ticket.clone(),
            other => panic!("unexpected effect {:?}", other),
        };
        assert!(after.generation > before.generation);

        let mut details = NamespaceDetails::default();
        details.accounts.push(account);

        WorkspaceService::handle(&mut store, hydrated(after, Ok(details.clone())));
        WorkspaceService::handle(&mut store, hydrated(before, Ok(NamespaceDetails::default())));

        assert_eq!(Some(&details), store.details(&NamespaceId::from("ns1")));
    }

    #[test]
    fn failed_hydration_notifies() {
        let mut store = WorkspaceStore::new();
        let ticket = single_namespace(&mut store);

        let effects = WorkspaceService::handle(
            &mut store,
            hydrated(ticket, Err("connection refused".into())),
        );

        assert_eq!(
            vec![Effect::Notify(Notification::error(
                "Failed to load namespace ns1: connection refused"
            ))],
            effects
        );
    }

    #[test]
    fn failure_for_a_closed_page_is_silent() {
        let mut store = WorkspaceStore::new();
        let ticket = single_namespace(&mut store);
        session(&mut store, SessionRecv::ClosePage("allAccounts-ns1".into()));

        let effects = WorkspaceService::handle(
            &mut store,
            hydrated(ticket, Err("connection refused".into())),
        );

        assert!(effects.is_empty());
    }

    #[test]
    fn stale_catalog_result_is_ignored() {
        let mut store = WorkspaceStore::new();
        let stale = match session(&mut store, SessionRecv::RefreshData).pop() {
            Some(Effect::RefreshCatalog(ticket)) => ticket,
            other => panic!("unexpected effect {:?}", other),
        };
        session(&mut store, SessionRecv::RefreshData);

        let mut catalog = Catalog::default();
        catalog.namespaces.push(ns1());
        WorkspaceService::handle(
            &mut store,
            WorkspaceRecv::CatalogLoaded(CatalogResult {
                ticket: stale,
                result: Ok(catalog),
            }),
        );

        assert!(store.catalog().namespaces.is_empty());
    }
}

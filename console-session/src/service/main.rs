use super::{
    catalog::CatalogService, hydration::HydrationService, mutation::MutationService,
    persist::PersistService, workspace::WorkspaceService,
};
use crate::prelude::*;

/// Launches the session: the workspace store, and the backend services that hydrate it.
pub struct MainService {
    _workspace: WorkspaceService,
    _hydration: HydrationService,
    _catalog: CatalogService,
    _mutation: MutationService,
    _persist: PersistService,
}

impl Service for MainService {
    type Bus = SessionBus;
    type Lifeline = anyhow::Result<Self>;

    fn spawn(bus: &Self::Bus) -> Self::Lifeline {
        debug!("Launching MainService");

        let _hydration = HydrationService::spawn(bus)?;
        let _catalog = CatalogService::spawn(bus)?;
        let _mutation = MutationService::spawn(bus)?;
        let _persist = PersistService::spawn(bus)?;
        let _workspace = WorkspaceService::spawn(bus)?;

        Ok(Self {
            _workspace,
            _hydration,
            _catalog,
            _mutation,
            _persist,
        })
    }
}

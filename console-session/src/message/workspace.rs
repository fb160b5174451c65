use super::session::{Mutation, SessionRecv};
use console_api::{namespace::NamespaceRef, resource::NamespaceDetails};
use console_workspace::{Catalog, CatalogTicket, HydrationTicket};

/// Everything the workspace task applies to the store, in arrival order
#[derive(Debug, Clone)]
pub enum WorkspaceRecv {
    Session(SessionRecv),
    Hydrated(HydrationResult),
    CatalogLoaded(CatalogResult),
    Mutated(MutationResult),
}

#[derive(Debug, Clone)]
pub struct HydrationRequest(pub HydrationTicket);

#[derive(Debug, Clone)]
pub struct HydrationResult {
    pub ticket: HydrationTicket,
    pub result: Result<NamespaceDetails, String>,
}

#[derive(Debug, Clone)]
pub struct CatalogRequest(pub CatalogTicket);

#[derive(Debug, Clone)]
pub struct CatalogResult {
    pub ticket: CatalogTicket,
    pub result: Result<Catalog, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MutationRequest {
    pub namespace: NamespaceRef,
    pub mutation: Mutation,
}

#[derive(Debug, Clone)]
pub struct MutationResult {
    pub namespace: NamespaceRef,
    pub mutation: Mutation,
    pub result: Result<(), String>,
}

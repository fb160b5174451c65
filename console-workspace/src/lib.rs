//! The workspace store for the namespace console.
//!
//! Tracks the primary tab bar, the open pages within each namespace, the active key, and the
//! secondary rail selector.  All operations are synchronous and infallible; invalid requests
//! are ignored.  Data for a page is fetched by the caller after the page is opened, and applied
//! with a `HydrationTicket` so stale responses can be discarded.

mod hydration;
mod page;
mod snapshot;
mod store;
mod tab;

pub use hydration::{CatalogTicket, HydrationTicket};
pub use page::{
    Catalog, DetailPage, ListingPage, LoadState, NamespacePage, OpenOptions, OpenTab, Page,
    PageRecord, TestPage,
};
pub use snapshot::{Active, WorkspaceSnapshot};
pub use store::WorkspaceStore;
pub use tab::Tab;

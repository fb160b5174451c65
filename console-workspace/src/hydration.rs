use console_api::namespace::NamespaceId;

/// Issued when a page is opened.  The hydration response must present it, and is discarded if
/// the page was closed or re-opened in the meantime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HydrationTicket {
    pub key: String,
    pub namespace: NamespaceId,
    pub generation: u64,
}

/// Issued for each catalog refresh.  Only the most recent refresh may be applied.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CatalogTicket(pub u64);

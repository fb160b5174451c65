use crate::{
    hydration::{CatalogTicket, HydrationTicket},
    page::{Catalog, LoadState, OpenOptions, OpenTab, PageRecord},
    snapshot::{resolve, Active, WorkspaceSnapshot},
    tab::Tab,
};
use console_api::{
    namespace::{NamespaceId, NamespaceRef},
    resource::{NamespaceDetails, ResourceKind},
    route::{ActiveKey, FixedView, PageKind, Route, SecondaryTab, TabKey},
};
use log::{debug, info};
use std::collections::HashMap;

/// Owns the tabs, the open pages, and the active key.
///
/// Pages live in a single insertion-ordered collection keyed by their route key, so a key is
/// unique across every page kind.  Per-kind collections are views over it.
#[derive(Debug, Clone)]
pub struct WorkspaceStore {
    tabs: Vec<Tab>,
    pages: Vec<PageRecord>,
    active: ActiveKey,
    secondary: SecondaryTab,
    details: HashMap<NamespaceId, NamespaceDetails>,
    applied: HashMap<NamespaceId, Applied>,
    catalog: Catalog,
    catalog_generation: u64,
    next_generation: u64,
    next_blank: u32,
}

/// The newest hydration written to a namespace cache
#[derive(Debug, Clone)]
struct Applied {
    generation: u64,
    load: LoadState,
}

impl Default for WorkspaceStore {
    fn default() -> Self {
        Self {
            tabs: vec![Tab::overview()],
            pages: Vec::new(),
            active: ActiveKey::default(),
            secondary: SecondaryTab::default(),
            details: HashMap::new(),
            applied: HashMap::new(),
            catalog: Catalog::default(),
            catalog_generation: 0,
            next_generation: 0,
            next_blank: 1,
        }
    }
}

impl WorkspaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tabs(&self) -> &[Tab] {
        self.tabs.as_slice()
    }

    pub fn pages(&self) -> &[PageRecord] {
        self.pages.as_slice()
    }

    pub fn active(&self) -> &ActiveKey {
        &self.active
    }

    pub fn secondary(&self) -> SecondaryTab {
        self.secondary
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn details(&self, namespace: &NamespaceId) -> Option<&NamespaceDetails> {
        self.details.get(namespace)
    }

    pub fn page(&self, key: &str) -> Option<&PageRecord> {
        self.pages.iter().find(|page| page.key == key)
    }

    pub fn tab(&self, key: &TabKey) -> Option<&Tab> {
        self.tabs.iter().find(|tab| &tab.key == key)
    }

    /// The open pages of one kind, in open order
    pub fn collection(&self, kind: PageKind) -> Vec<&PageRecord> {
        self.pages.iter().filter(|page| page.kind() == kind).collect()
    }

    /// Opens a page, or refreshes it in place if its key is already open.
    ///
    /// Activates the page, updates the secondary selector, and for listings ensures the
    /// namespace tab exists.  Returns the page key.
    pub fn open(&mut self, request: OpenTab, namespace: NamespaceRef, options: OpenOptions) -> String {
        let route = request.route(&namespace.id);
        let key = route.key();
        let ensure_tab = request.ensures_namespace_tab();
        let generation = self.mint_generation();

        if let Some(record) = self.pages.iter_mut().find(|page| page.key == key) {
            debug!("refreshing page {}", key);
            record.page.refresh(request, &options);
            record.generation = generation;
            record.load = LoadState::Pending;

            // entity ids are backend-assigned, but a detail key may still move between namespaces
            if record.route != route {
                record.route = route.clone();
                record.namespace = namespace.clone();
            }
        } else {
            info!("opening page {}", key);
            let page = request.into_page(&options);
            self.pages.push(PageRecord {
                key: key.clone(),
                route: route.clone(),
                namespace: namespace.clone(),
                generation,
                load: LoadState::Pending,
                page,
            });
        }

        self.active = ActiveKey::Page(key.clone());
        self.secondary = route.kind.secondary_tab();

        if ensure_tab {
            self.ensure_namespace_tab(&namespace);
        }

        key
    }

    /// Generations are shared by every page and never reused, so a ticket outlives its page.
    fn mint_generation(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    fn ensure_namespace_tab(&mut self, namespace: &NamespaceRef) {
        if namespace.id.as_str().is_empty() {
            return;
        }

        let key = TabKey::Namespace(namespace.id.clone());
        if self.tab(&key).is_none() {
            debug!("adding namespace tab {}", key);
            self.tabs.push(Tab::namespace(namespace));
        }
    }

    /// Closes a tab.  Pinned tabs, the overview tab, and unknown keys are ignored.
    ///
    /// Closing a namespace tab closes every page of that namespace.
    pub fn close_tab(&mut self, key: &TabKey) {
        let index = match self.tabs.iter().position(|tab| &tab.key == key) {
            Some(index) => index,
            None => return,
        };

        if !self.tabs[index].is_closable() {
            debug!("ignoring close for tab {}", key);
            return;
        }

        info!("closing tab {}", key);
        self.tabs.remove(index);

        match key {
            TabKey::Namespace(namespace) => {
                self.pages.retain(|page| &page.namespace.id != namespace);
                self.details.remove(namespace);
                self.applied.remove(namespace);
            }
            TabKey::Blank(index) => {
                if self.active == ActiveKey::Placeholder(*index) {
                    self.active = ActiveKey::default();
                }
            }
            TabKey::Overview => {}
        }

        self.reset_dangling_active();
    }

    /// Closes a single page
    pub fn close_page(&mut self, key: &str) {
        let before = self.pages.len();
        self.pages.retain(|page| page.key != key);

        if self.pages.len() != before {
            info!("closed page {}", key);
            self.reset_dangling_active();
        }
    }

    fn reset_dangling_active(&mut self) {
        let dangling = matches!(
            resolve(&self.active, self.pages.as_slice()),
            Active::Unresolved(_)
        );

        if dangling {
            debug!("active page {} was closed", self.active);
            self.active = ActiveKey::default();
        }
    }

    pub fn pin_tab(&mut self, key: &TabKey) {
        self.set_pinned(key, true);
    }

    pub fn unpin_tab(&mut self, key: &TabKey) {
        self.set_pinned(key, false);
    }

    fn set_pinned(&mut self, key: &TabKey, pinned: bool) {
        if let Some(tab) = self.tabs.iter_mut().find(|tab| &tab.key == key) {
            tab.pinned = pinned;
        }
    }

    /// Appends a blank `tab-<n>` tab, and activates it
    pub fn add_blank_tab(&mut self) -> TabKey {
        let index = self.next_blank;
        self.next_blank += 1;

        let tab = Tab::blank(index);
        let key = tab.key.clone();
        self.tabs.push(tab);
        self.active = ActiveKey::Placeholder(index);

        key
    }

    /// Handles a click on a primary tab.
    ///
    /// A namespace tab activates its most recently opened page, or opens its accounts listing.
    pub fn activate_tab(&mut self, key: &TabKey) {
        let tab = match self.tab(key) {
            Some(tab) => tab.clone(),
            None => return,
        };

        match tab.key {
            TabKey::Overview => self.active = ActiveKey::Fixed(FixedView::Overview),
            TabKey::Blank(index) => self.active = ActiveKey::Placeholder(index),
            TabKey::Namespace(ref namespace) => {
                let last = self
                    .pages
                    .iter()
                    .rev()
                    .find(|page| &page.namespace.id == namespace)
                    .map(|page| (page.key.clone(), page.kind()));

                match last {
                    Some((key, kind)) => {
                        self.active = ActiveKey::Page(key);
                        self.secondary = kind.secondary_tab();
                    }
                    None => {
                        let namespace = self
                            .catalog
                            .namespace(namespace)
                            .cloned()
                            .unwrap_or_else(|| NamespaceRef {
                                id: namespace.clone(),
                                name: tab.label.clone(),
                                url: None,
                            });

                        self.open(OpenTab::AllAccounts, namespace, OpenOptions::default());
                    }
                }
            }
        }
    }

    /// Assigns the active key directly.  Returns false, and changes nothing, if the key does not
    /// resolve to a fixed view, an open blank tab, or an open page.
    pub fn set_active(&mut self, key: &str) -> bool {
        let active = ActiveKey::parse(key);

        let valid = match active {
            ActiveKey::Fixed(_) => true,
            ActiveKey::Placeholder(index) => self.tab(&TabKey::Blank(index)).is_some(),
            ActiveKey::Page(ref key) => self.page(key.as_str()).is_some(),
        };

        if !valid {
            debug!("ignoring unknown active key {}", key);
            return false;
        }

        if let ActiveKey::Page(ref key) = active {
            if let Some(page) = self.page(key.as_str()) {
                self.secondary = page.kind().secondary_tab();
            }
        }

        self.active = active;
        true
    }

    pub fn resolve_active(&self) -> Active<'_> {
        resolve(&self.active, self.pages.as_slice())
    }

    /// The namespace of the active page.  None for fixed views and blank tabs.
    pub fn namespace_context(&self) -> Option<&NamespaceRef> {
        match self.resolve_active() {
            Active::Page(page) => Some(&page.namespace),
            _ => None,
        }
    }

    /// Issues a ticket for the current generation of an open page
    pub fn hydration_ticket(&self, key: &str) -> Option<HydrationTicket> {
        self.page(key).map(|page| HydrationTicket {
            key: page.key.clone(),
            namespace: page.namespace.id.clone(),
            generation: page.generation,
        })
    }

    /// Moves an open page to a new generation, and issues its ticket.
    ///
    /// Responses to fetches issued before the call are discarded.
    pub fn rehydrate(&mut self, key: &str) -> Option<HydrationTicket> {
        let index = self.pages.iter().position(|page| page.key == key)?;
        let generation = self.mint_generation();
        self.pages[index].generation = generation;

        self.hydration_ticket(key)
    }

    /// Applies a `fetch_namespace_details` response.
    ///
    /// Returns false if the page was closed or re-opened since the ticket was issued, or if a
    /// newer response for the namespace has already been applied.  On error, the namespace
    /// caches default to empty and the page is marked failed.
    pub fn apply_hydration(
        &mut self,
        ticket: &HydrationTicket,
        result: Result<NamespaceDetails, String>,
    ) -> bool {
        let current = self
            .pages
            .iter()
            .position(|page| page.key == ticket.key && page.generation == ticket.generation);

        let index = match current {
            Some(index) => index,
            None => {
                debug!(
                    "discarding stale hydration for {} generation {}",
                    ticket.key, ticket.generation
                );
                return false;
            }
        };

        if let Some(applied) = self.applied.get(&ticket.namespace) {
            if applied.generation > ticket.generation {
                debug!(
                    "namespace {} already holds generation {}, discarding {}",
                    ticket.namespace, applied.generation, ticket.generation
                );
                self.pages[index].load = applied.load.clone();
                return false;
            }
        }

        let (details, load) = match result {
            Ok(details) => (details, LoadState::Ready),
            Err(err) => (NamespaceDetails::default(), LoadState::Failed(err)),
        };

        for page in self.pages.iter_mut() {
            if page.namespace.id != ticket.namespace {
                continue;
            }

            if load == LoadState::Ready {
                page.page.sync_entity(&details);
            }

            if page.key == ticket.key {
                page.load = load.clone();
            }
        }

        self.details.insert(ticket.namespace.clone(), details);
        self.applied.insert(
            ticket.namespace.clone(),
            Applied {
                generation: ticket.generation,
                load,
            },
        );
        true
    }

    /// Clears the create flag on a listing once its create request has succeeded
    pub fn finish_create(&mut self, kind: ResourceKind, namespace: &NamespaceId) {
        let key = Route::listing(kind, namespace.clone()).key();
        if let Some(record) = self.pages.iter_mut().find(|page| page.key == key) {
            if let crate::page::Page::Listing(ref mut listing) = record.page {
                listing.open_create = false;
            }
        }
    }

    pub fn catalog_ticket(&mut self) -> CatalogTicket {
        self.catalog_generation += 1;
        CatalogTicket(self.catalog_generation)
    }

    /// Replaces the catalog.  Returns false if a newer refresh has been issued.
    pub fn apply_catalog(&mut self, ticket: CatalogTicket, catalog: Catalog) -> bool {
        if ticket.0 != self.catalog_generation {
            debug!("discarding stale catalog refresh {}", ticket.0);
            return false;
        }

        for tab in self.tabs.iter_mut() {
            if let TabKey::Namespace(ref id) = tab.key {
                if let Some(namespace) = catalog.namespace(id) {
                    tab.label = namespace.label().to_string();
                }
            }
        }

        self.catalog = catalog;
        true
    }

    pub fn snapshot(&self) -> WorkspaceSnapshot {
        WorkspaceSnapshot {
            tabs: self.tabs.clone(),
            pages: self.pages.clone(),
            active: self.active.clone(),
            secondary: self.secondary,
            namespace: self.namespace_context().cloned(),
            details: self.details.clone(),
            catalog: self.catalog.clone(),
        }
    }
}

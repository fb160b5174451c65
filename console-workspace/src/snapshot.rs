use crate::{
    page::{Catalog, PageRecord},
    tab::Tab,
};
use console_api::{
    namespace::{NamespaceId, NamespaceRef},
    resource::NamespaceDetails,
    route::{ActiveKey, FixedView, PageKind, SecondaryTab, TabKey},
};
use std::collections::HashMap;

/// The resolved target of the active key
#[derive(Debug, Clone, PartialEq)]
pub enum Active<'a> {
    Fixed(FixedView),
    Placeholder(u32),
    Page(&'a PageRecord),
    /// A page key with no open page.  The store never produces this.
    Unresolved(&'a str),
}

pub(crate) fn resolve<'a>(active: &'a ActiveKey, pages: &'a [PageRecord]) -> Active<'a> {
    match active {
        ActiveKey::Fixed(fixed) => Active::Fixed(*fixed),
        ActiveKey::Placeholder(index) => Active::Placeholder(*index),
        ActiveKey::Page(key) => pages
            .iter()
            .find(|page| &page.key == key)
            .map(Active::Page)
            .unwrap_or_else(|| Active::Unresolved(key.as_str())),
    }
}

/// An owned copy of the workspace, published to the display layer after every change.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceSnapshot {
    pub tabs: Vec<Tab>,
    pub pages: Vec<PageRecord>,
    pub active: ActiveKey,
    pub secondary: SecondaryTab,
    pub namespace: Option<NamespaceRef>,
    pub details: HashMap<NamespaceId, NamespaceDetails>,
    pub catalog: Catalog,
}

impl Default for WorkspaceSnapshot {
    fn default() -> Self {
        Self {
            tabs: vec![Tab::overview()],
            pages: Vec::new(),
            active: ActiveKey::default(),
            secondary: SecondaryTab::default(),
            namespace: None,
            details: HashMap::new(),
            catalog: Catalog::default(),
        }
    }
}

impl WorkspaceSnapshot {
    pub fn resolve_active(&self) -> Active<'_> {
        resolve(&self.active, self.pages.as_slice())
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
}

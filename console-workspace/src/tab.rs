use console_api::{namespace::NamespaceRef, route::TabKey};

/// An entry in the primary tab bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: TabKey,
    pub label: String,
    pub pinned: bool,
}

impl Tab {
    pub fn overview() -> Self {
        Self {
            key: TabKey::Overview,
            label: "Overview".to_string(),
            pinned: false,
        }
    }

    pub fn namespace(namespace: &NamespaceRef) -> Self {
        Self {
            key: TabKey::Namespace(namespace.id.clone()),
            label: namespace.label().to_string(),
            pinned: false,
        }
    }

    pub fn blank(index: u32) -> Self {
        Self {
            key: TabKey::Blank(index),
            label: "New Tab".to_string(),
            pinned: false,
        }
    }

    /// The overview tab is never closable, and pinned tabs reject close requests.
    pub fn is_closable(&self) -> bool {
        !self.pinned && self.key != TabKey::Overview
    }
}

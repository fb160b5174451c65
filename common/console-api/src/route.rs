//! The routing scheme for tabs and pages.
//!
//! Every page is addressed by a `Route`, and every route derives exactly one key string.
//! Key prefixes are distinct per page kind, so keys of different kinds never collide.
use crate::{namespace::NamespaceId, resource::ResourceKind};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// The kind of a page.  Each value identifies one page collection.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum PageKind {
    /// The namespace detail page
    Namespace,
    /// An all-X listing within a namespace
    Listing(ResourceKind),
    /// A single entity page, or a create page when the route has no entity
    Detail(ResourceKind),
    /// The method test console
    MethodTest,
}

impl PageKind {
    /// The secondary rail entry highlighted when a page of this kind is opened
    pub fn secondary_tab(&self) -> SecondaryTab {
        match self {
            PageKind::Namespace => SecondaryTab::Accounts,
            PageKind::Listing(kind) | PageKind::Detail(kind) => SecondaryTab::from(*kind),
            PageKind::MethodTest => SecondaryTab::Methods,
        }
    }

    fn listing_prefix(kind: ResourceKind) -> &'static str {
        match kind {
            ResourceKind::Account => "allAccounts",
            ResourceKind::Method => "allMethods",
            ResourceKind::Schema => "allSchemas",
            ResourceKind::Webhook => "allWebhooks",
            ResourceKind::Lambda => "allLambdas",
        }
    }

    fn detail_prefix(kind: ResourceKind) -> &'static str {
        match kind {
            ResourceKind::Account => "accountPage",
            ResourceKind::Method => "methodPage",
            ResourceKind::Schema => "schemaPage",
            ResourceKind::Webhook => "webhookPage",
            ResourceKind::Lambda => "lambdaPage",
        }
    }
}

/// The address of a page
#[derive(Serialize, Deserialize, Clone, Debug, Hash, PartialEq, Eq)]
pub struct Route {
    pub kind: PageKind,
    pub namespace: NamespaceId,
    pub entity: Option<String>,
}

impl Route {
    pub fn namespace(namespace: NamespaceId) -> Self {
        Self {
            kind: PageKind::Namespace,
            namespace,
            entity: None,
        }
    }

    pub fn listing(kind: ResourceKind, namespace: NamespaceId) -> Self {
        Self {
            kind: PageKind::Listing(kind),
            namespace,
            entity: None,
        }
    }

    /// A detail page.  With no entity, this is the create page for the namespace.
    pub fn detail(kind: ResourceKind, namespace: NamespaceId, entity: Option<String>) -> Self {
        Self {
            kind: PageKind::Detail(kind),
            namespace,
            entity,
        }
    }

    pub fn method_test(namespace: NamespaceId, method_id: impl Into<String>) -> Self {
        Self {
            kind: PageKind::MethodTest,
            namespace,
            entity: Some(method_id.into()),
        }
    }

    /// Derives the page key.
    ///
    /// Detail and test keys are addressed by entity id, listing and create keys by namespace id.
    pub fn key(&self) -> String {
        match (self.kind, self.entity.as_ref()) {
            (PageKind::Namespace, _) => format!("namespacePage-{}", self.namespace),
            (PageKind::Listing(kind), _) => {
                format!("{}-{}", PageKind::listing_prefix(kind), self.namespace)
            }
            (PageKind::Detail(kind), Some(entity)) => {
                format!("{}-{}", PageKind::detail_prefix(kind), entity)
            }
            (PageKind::Detail(kind), None) => format!("{}-create-{}", kind, self.namespace),
            (PageKind::MethodTest, Some(entity)) => format!("methodTest-{}", entity),
            (PageKind::MethodTest, None) => format!("methodTest-{}", self.namespace),
        }
    }
}

/// The secondary navigation rail filter
#[derive(Serialize, Deserialize, Copy, Clone, Debug, Hash, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SecondaryTab {
    Accounts,
    Methods,
    Schemas,
    Webhooks,
    Lambdas,
}

impl Default for SecondaryTab {
    fn default() -> Self {
        SecondaryTab::Accounts
    }
}

impl From<ResourceKind> for SecondaryTab {
    fn from(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Account => SecondaryTab::Accounts,
            ResourceKind::Method => SecondaryTab::Methods,
            ResourceKind::Schema => SecondaryTab::Schemas,
            ResourceKind::Webhook => SecondaryTab::Webhooks,
            ResourceKind::Lambda => SecondaryTab::Lambdas,
        }
    }
}

impl Display for SecondaryTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SecondaryTab::Accounts => "accounts",
            SecondaryTab::Methods => "methods",
            SecondaryTab::Schemas => "schemas",
            SecondaryTab::Webhooks => "webhooks",
            SecondaryTab::Lambdas => "lambdas",
        };

        f.write_str(name)
    }
}

/// The reserved views which are not scoped to a namespace
#[derive(Serialize, Deserialize, Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum FixedView {
    Overview,
    Namespace,
    SchemaService,
    Tables,
    UnifiedNamespace,
    New,
}

impl FixedView {
    pub fn as_str(&self) -> &'static str {
        match self {
            FixedView::Overview => "overview",
            FixedView::Namespace => "namespace",
            FixedView::SchemaService => "schemaService",
            FixedView::Tables => "tables",
            FixedView::UnifiedNamespace => "unifiedNamespace",
            FixedView::New => "new",
        }
    }
}

impl FromStr for FixedView {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overview" => Ok(FixedView::Overview),
            "namespace" => Ok(FixedView::Namespace),
            "schemaService" => Ok(FixedView::SchemaService),
            "tables" => Ok(FixedView::Tables),
            "unifiedNamespace" => Ok(FixedView::UnifiedNamespace),
            "new" => Ok(FixedView::New),
            _ => Err(()),
        }
    }
}

const NAMESPACE_TAB_PREFIX: &str = "namespace-";
const BLANK_TAB_PREFIX: &str = "tab-";

/// The key of a tab in the primary tab bar
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum TabKey {
    Overview,
    Namespace(NamespaceId),
    Blank(u32),
}

impl TabKey {
    pub fn parse(key: &str) -> Option<TabKey> {
        if key == "overview" {
            return Some(TabKey::Overview);
        }

        if let Some(id) = key.strip_prefix(NAMESPACE_TAB_PREFIX) {
            if id.is_empty() {
                return None;
            }

            return Some(TabKey::Namespace(NamespaceId::from(id)));
        }

        key.strip_prefix(BLANK_TAB_PREFIX)
            .and_then(|n| n.parse().ok())
            .map(TabKey::Blank)
    }

    pub fn namespace_id(&self) -> Option<&NamespaceId> {
        match self {
            TabKey::Namespace(id) => Some(id),
            _ => None,
        }
    }
}

impl Display for TabKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TabKey::Overview => f.write_str("overview"),
            TabKey::Namespace(id) => write!(f, "{}{}", NAMESPACE_TAB_PREFIX, id),
            TabKey::Blank(n) => write!(f, "{}{}", BLANK_TAB_PREFIX, n),
        }
    }
}

/// The pointer to the currently displayed view
#[derive(Serialize, Deserialize, Clone, Debug, Hash, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum ActiveKey {
    Fixed(FixedView),
    /// A blank `tab-<n>` placeholder
    Placeholder(u32),
    /// The key of an open page
    Page(String),
}

impl ActiveKey {
    pub fn parse(key: &str) -> ActiveKey {
        if let Ok(fixed) = FixedView::from_str(key) {
            return ActiveKey::Fixed(fixed);
        }

        if let Some(TabKey::Blank(n)) = TabKey::parse(key) {
            return ActiveKey::Placeholder(n);
        }

        ActiveKey::Page(key.to_string())
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, ActiveKey::Fixed(_))
    }
}

impl Default for ActiveKey {
    fn default() -> Self {
        ActiveKey::Fixed(FixedView::Overview)
    }
}

impl Display for ActiveKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActiveKey::Fixed(fixed) => f.write_str(fixed.as_str()),
            ActiveKey::Placeholder(n) => write!(f, "{}", TabKey::Blank(*n)),
            ActiveKey::Page(key) => f.write_str(key.as_str()),
        }
    }
}

impl From<String> for ActiveKey {
    fn from(key: String) -> Self {
        ActiveKey::parse(key.as_str())
    }
}

impl From<ActiveKey> for String {
    fn from(key: ActiveKey) -> Self {
        key.to_string()
    }
}

impl PartialEq<str> for ActiveKey {
    fn eq(&self, other: &str) -> bool {
        self.to_string() == other
    }
}

impl PartialEq<&str> for ActiveKey {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

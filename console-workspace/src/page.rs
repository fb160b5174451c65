use console_api::{
    namespace::{NamespaceId, NamespaceRef},
    resource::{Account, Lambda, Method, Resource, ResourceKind, Schema, Webhook},
    route::{PageKind, Route},
};
use typed_builder::TypedBuilder;

/// The open request issued by the display layer.  One variant per page kind.
#[derive(Debug, Clone, PartialEq)]
pub enum OpenTab {
    /// The namespace detail page
    Namespace,
    AllAccounts,
    AllMethods,
    AllSchemas,
    AllWebhooks,
    AllLambdas,
    /// An account page, or the create page if `None`
    AccountPage(Option<Account>),
    MethodPage(Option<Method>),
    SchemaPage(Option<Schema>),
    WebhookPage(Option<Webhook>),
    LambdaPage(Option<Lambda>),
    MethodTestPage(Method),
    /// Opens the namespace tab, with the accounts listing selected
    SingleNamespace,
}

impl OpenTab {
    pub fn listing(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Account => OpenTab::AllAccounts,
            ResourceKind::Method => OpenTab::AllMethods,
            ResourceKind::Schema => OpenTab::AllSchemas,
            ResourceKind::Webhook => OpenTab::AllWebhooks,
            ResourceKind::Lambda => OpenTab::AllLambdas,
        }
    }

    /// The create page for a resource kind
    pub fn create(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Account => OpenTab::AccountPage(None),
            ResourceKind::Method => OpenTab::MethodPage(None),
            ResourceKind::Schema => OpenTab::SchemaPage(None),
            ResourceKind::Webhook => OpenTab::WebhookPage(None),
            ResourceKind::Lambda => OpenTab::LambdaPage(None),
        }
    }

    /// The detail page for an existing entity
    pub fn resource(resource: Resource) -> Self {
        match resource {
            Resource::Account(account) => OpenTab::AccountPage(Some(account)),
            Resource::Method(method) => OpenTab::MethodPage(Some(method)),
            Resource::Schema(schema) => OpenTab::SchemaPage(Some(schema)),
            Resource::Webhook(webhook) => OpenTab::WebhookPage(Some(webhook)),
            Resource::Lambda(lambda) => OpenTab::LambdaPage(Some(lambda)),
        }
    }

    /// Listings, and the namespace tab itself, require a visible namespace tab
    pub fn ensures_namespace_tab(&self) -> bool {
        match self {
            OpenTab::AllAccounts
            | OpenTab::AllMethods
            | OpenTab::AllSchemas
            | OpenTab::AllWebhooks
            | OpenTab::AllLambdas
            | OpenTab::SingleNamespace => true,
            _ => false,
        }
    }

    pub(crate) fn route(&self, namespace: &NamespaceId) -> Route {
        let namespace = namespace.clone();
        match self {
            OpenTab::Namespace => Route::namespace(namespace),
            OpenTab::AllAccounts | OpenTab::SingleNamespace => {
                Route::listing(ResourceKind::Account, namespace)
            }
            OpenTab::AllMethods => Route::listing(ResourceKind::Method, namespace),
            OpenTab::AllSchemas => Route::listing(ResourceKind::Schema, namespace),
            OpenTab::AllWebhooks => Route::listing(ResourceKind::Webhook, namespace),
            OpenTab::AllLambdas => Route::listing(ResourceKind::Lambda, namespace),
            OpenTab::AccountPage(account) => Route::detail(
                ResourceKind::Account,
                namespace,
                account.as_ref().map(|a| a.id.clone()),
            ),
            OpenTab::MethodPage(method) => Route::detail(
                ResourceKind::Method,
                namespace,
                method.as_ref().map(|m| m.id.clone()),
            ),
            OpenTab::SchemaPage(schema) => Route::detail(
                ResourceKind::Schema,
                namespace,
                schema.as_ref().map(|s| s.id.clone()),
            ),
            OpenTab::WebhookPage(webhook) => Route::detail(
                ResourceKind::Webhook,
                namespace,
                webhook.as_ref().map(|w| w.id.clone()),
            ),
            OpenTab::LambdaPage(lambda) => Route::detail(
                ResourceKind::Lambda,
                namespace,
                lambda.as_ref().map(|l| l.id.clone()),
            ),
            OpenTab::MethodTestPage(method) => Route::method_test(namespace, method.id.clone()),
        }
    }

    pub(crate) fn into_page(self, options: &OpenOptions) -> Page {
        match self {
            OpenTab::Namespace => Page::Namespace(NamespacePage {
                open_edit: options.open_edit,
                timestamp: options.timestamp,
            }),
            OpenTab::AllAccounts | OpenTab::SingleNamespace => {
                Page::Listing(ListingPage::new(ResourceKind::Account, options))
            }
            OpenTab::AllMethods => Page::Listing(ListingPage::new(ResourceKind::Method, options)),
            OpenTab::AllSchemas => Page::Listing(ListingPage::new(ResourceKind::Schema, options)),
            OpenTab::AllWebhooks => {
                Page::Listing(ListingPage::new(ResourceKind::Webhook, options))
            }
            OpenTab::AllLambdas => Page::Listing(ListingPage::new(ResourceKind::Lambda, options)),
            OpenTab::AccountPage(account) => Page::Account(DetailPage::new(account, options)),
            OpenTab::MethodPage(method) => Page::Method(DetailPage::new(method, options)),
            OpenTab::SchemaPage(schema) => Page::Schema(DetailPage::new(schema, options)),
            OpenTab::WebhookPage(webhook) => Page::Webhook(DetailPage::new(webhook, options)),
            OpenTab::LambdaPage(lambda) => Page::Lambda(DetailPage::new(lambda, options)),
            OpenTab::MethodTestPage(method) => Page::Test(TestPage {
                method,
                timestamp: options.timestamp,
            }),
        }
    }
}

/// Flags refreshed in place when an open page is requested again.
///
/// A new `timestamp` asks the display layer to remount the page, re-running its create flow.
#[derive(TypedBuilder, Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenOptions {
    #[builder(default)]
    pub open_create: bool,
    #[builder(default)]
    pub open_edit: bool,
    #[builder(default, setter(strip_option))]
    pub timestamp: Option<u64>,
}

/// The hydration state of a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Ready,
    Failed(String),
}

impl Default for LoadState {
    fn default() -> Self {
        LoadState::Pending
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespacePage {
    pub open_edit: bool,
    pub timestamp: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    pub kind: ResourceKind,
    pub open_create: bool,
    pub timestamp: Option<u64>,
}

impl ListingPage {
    fn new(kind: ResourceKind, options: &OpenOptions) -> Self {
        Self {
            kind,
            open_create: options.open_create,
            timestamp: options.timestamp,
        }
    }
}

/// A single entity page.  `entity` is `None` on a create page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPage<T> {
    pub entity: Option<T>,
    pub open_edit: bool,
    pub timestamp: Option<u64>,
}

impl<T> DetailPage<T> {
    fn new(entity: Option<T>, options: &OpenOptions) -> Self {
        Self {
            entity,
            open_edit: options.open_edit,
            timestamp: options.timestamp,
        }
    }

    fn refresh(&mut self, entity: Option<T>, options: &OpenOptions) {
        if entity.is_some() {
            self.entity = entity;
        }

        self.open_edit = options.open_edit;
        self.timestamp = options.timestamp;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestPage {
    pub method: Method,
    pub timestamp: Option<u64>,
}

/// The per-kind contents of a page record
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Namespace(NamespacePage),
    Listing(ListingPage),
    Account(DetailPage<Account>),
    Method(DetailPage<Method>),
    Schema(DetailPage<Schema>),
    Webhook(DetailPage<Webhook>),
    Lambda(DetailPage<Lambda>),
    Test(TestPage),
}

impl Page {
    pub fn timestamp(&self) -> Option<u64> {
        match self {
            Page::Namespace(page) => page.timestamp,
            Page::Listing(page) => page.timestamp,
            Page::Account(page) => page.timestamp,
            Page::Method(page) => page.timestamp,
            Page::Schema(page) => page.timestamp,
            Page::Webhook(page) => page.timestamp,
            Page::Lambda(page) => page.timestamp,
            Page::Test(page) => page.timestamp,
        }
    }

    pub fn open_create(&self) -> bool {
        match self {
            Page::Listing(page) => page.open_create,
            _ => false,
        }
    }

    /// Refreshes flags in place from a repeated open request.
    ///
    /// The request targets the same key, so it has the same variant.
    pub(crate) fn refresh(&mut self, request: OpenTab, options: &OpenOptions) {
        match (self, request) {
            (Page::Namespace(page), _) => {
                page.open_edit = options.open_edit;
                page.timestamp = options.timestamp;
            }
            (Page::Listing(page), _) => {
                page.open_create = options.open_create;
                page.timestamp = options.timestamp;
            }
            (Page::Account(page), OpenTab::AccountPage(entity)) => page.refresh(entity, options),
            (Page::Method(page), OpenTab::MethodPage(entity)) => page.refresh(entity, options),
            (Page::Schema(page), OpenTab::SchemaPage(entity)) => page.refresh(entity, options),
            (Page::Webhook(page), OpenTab::WebhookPage(entity)) => page.refresh(entity, options),
            (Page::Lambda(page), OpenTab::LambdaPage(entity)) => page.refresh(entity, options),
            (Page::Test(page), OpenTab::MethodTestPage(method)) => {
                page.method = method;
                page.timestamp = options.timestamp;
            }
            (page, request) => {
                log::warn!("refresh request {:?} does not match page {:?}", request, page);
            }
        }
    }

    /// Replaces the entity of a detail page with the freshly fetched copy, if it still exists
    pub(crate) fn sync_entity(&mut self, details: &console_api::resource::NamespaceDetails) {
        fn sync<T: Clone>(page: &mut DetailPage<T>, found: Option<T>) {
            if let Some(found) = found {
                page.entity = Some(found);
            }
        }

        match self {
            Page::Account(page) => {
                let found = page
                    .entity
                    .as_ref()
                    .and_then(|a| details.accounts.iter().find(|f| f.id == a.id).cloned());
                sync(page, found);
            }
            Page::Method(page) => {
                let found = page
                    .entity
                    .as_ref()
                    .and_then(|m| details.methods.iter().find(|f| f.id == m.id).cloned());
                sync(page, found);
            }
            Page::Schema(page) => {
                let found = page
                    .entity
                    .as_ref()
                    .and_then(|s| details.schemas.iter().find(|f| f.id == s.id).cloned());
                sync(page, found);
            }
            Page::Webhook(page) => {
                let found = page
                    .entity
                    .as_ref()
                    .and_then(|w| details.webhooks.iter().find(|f| f.id == w.id).cloned());
                sync(page, found);
            }
            Page::Lambda(page) => {
                let found = page
                    .entity
                    .as_ref()
                    .and_then(|l| details.lambdas.iter().find(|f| f.id == l.id).cloned());
                sync(page, found);
            }
            Page::Test(page) => {
                if let Some(method) = details.methods.iter().find(|m| m.id == page.method.id) {
                    page.method = method.clone();
                }
            }
            Page::Namespace(_) | Page::Listing(_) => {}
        }
    }
}

/// An open page.  Keys are unique across every page kind.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRecord {
    pub key: String,
    pub route: Route,
    pub namespace: NamespaceRef,
    /// Replaced from the store-wide counter on every open or refetch, guarding hydration responses
    pub generation: u64,
    pub load: LoadState,
    pub page: Page,
}

impl PageRecord {
    pub fn kind(&self) -> PageKind {
        self.route.kind
    }
}

/// The namespace and schema catalogs, replaced on every `refresh_data`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub namespaces: Vec<NamespaceRef>,
    pub schemas: Vec<Schema>,
}

impl Catalog {
    pub fn namespace(&self, id: &NamespaceId) -> Option<&NamespaceRef> {
        self.namespaces.iter().find(|n| &n.id == id)
    }
}

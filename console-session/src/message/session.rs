use console_api::{
    namespace::NamespaceRef,
    resource::{Resource, ResourceKind},
    route::TabKey,
};
use console_workspace::{OpenOptions, OpenTab};

/// Callbacks from the display layer
#[derive(Debug, Clone, PartialEq)]
pub enum SessionRecv {
    /// A click on a namespace, listing row, or entity.  Opens the page with default options.
    OnItemClick {
        request: OpenTab,
        namespace: NamespaceRef,
    },
    /// The add button on a resource listing.  Opens the listing in create mode.
    OnAdd {
        kind: ResourceKind,
        namespace: NamespaceRef,
    },
    Open {
        request: OpenTab,
        namespace: NamespaceRef,
        options: OpenOptions,
    },
    CloseTab(TabKey),
    ClosePage(String),
    PinTab(TabKey),
    UnpinTab(TabKey),
    ActivateTab(TabKey),
    SetActive(String),
    AddBlankTab,
    Mutate {
        namespace: NamespaceRef,
        mutation: Mutation,
    },
    /// Resyncs the namespace and schema catalogs
    RefreshData,
}

/// A create, update, or delete request against the backend
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Create(Resource),
    Update(Resource),
    Delete { kind: ResourceKind, id: String },
}

impl Mutation {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Mutation::Create(resource) | Mutation::Update(resource) => resource.kind(),
            Mutation::Delete { kind, .. } => *kind,
        }
    }

    /// The past-tense verb, for notifications
    pub fn verb(&self) -> &'static str {
        match self {
            Mutation::Create(_) => "created",
            Mutation::Update(_) => "updated",
            Mutation::Delete { .. } => "deleted",
        }
    }

    pub fn target(&self) -> &str {
        match self {
            Mutation::Create(resource) | Mutation::Update(resource) => {
                if resource.name().is_empty() {
                    resource.id()
                } else {
                    resource.name()
                }
            }
            Mutation::Delete { id, .. } => id.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Mutation;
    use console_api::resource::{Resource, ResourceKind, Webhook};

    #[test]
    fn mutation_target() {
        let hook = Webhook::builder().id("w1").name("").build();
        let create = Mutation::Create(Resource::Webhook(hook));
        assert_eq!(ResourceKind::Webhook, create.kind());
        assert_eq!("w1", create.target());

        let delete = Mutation::Delete {
            kind: ResourceKind::Lambda,
            id: "l1".into(),
        };
        assert_eq!("deleted", delete.verb());
        assert_eq!("l1", delete.target());
    }
}

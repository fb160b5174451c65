use crate::{
    message::{
        notification::Notification,
        session::SessionRecv,
        workspace::{CatalogRequest, HydrationRequest, MutationRequest, WorkspaceRecv},
    },
    resource::{BackendResource, SessionFileResource},
};
use console_workspace::WorkspaceSnapshot;
use lifeline::{lifeline_bus, Message, Resource};
use postage::{broadcast, mpsc, watch};

lifeline_bus!(pub struct SessionBus);

// Display layer
impl Message<SessionBus> for SessionRecv {
    type Channel = mpsc::Sender<Self>;
}

impl Message<SessionBus> for WorkspaceSnapshot {
    type Channel = watch::Sender<Self>;
}

impl Message<SessionBus> for Notification {
    type Channel = broadcast::Sender<Self>;
}

// Workspace task
impl Message<SessionBus> for WorkspaceRecv {
    type Channel = mpsc::Sender<Self>;
}

// Backend calls
impl Message<SessionBus> for HydrationRequest {
    type Channel = mpsc::Sender<Self>;
}

impl Message<SessionBus> for CatalogRequest {
    type Channel = mpsc::Sender<Self>;
}

impl Message<SessionBus> for MutationRequest {
    type Channel = mpsc::Sender<Self>;
}

impl Resource<SessionBus> for BackendResource {}
impl Resource<SessionBus> for SessionFileResource {}

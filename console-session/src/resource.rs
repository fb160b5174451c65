use console_backend::Backend;
use lifeline::impl_storage_clone;
use std::{fmt::Debug, path::PathBuf, sync::Arc};

/// The backend shared by the hydration, catalog, and mutation services
#[derive(Clone)]
pub struct BackendResource(pub Arc<dyn Backend>);

impl Debug for BackendResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("BackendResource").finish()
    }
}

impl_storage_clone!(BackendResource);

/// The path of the persisted session file, e.g. `~/.console/session.yml`
#[derive(Debug, Clone)]
pub struct SessionFileResource(pub PathBuf);

impl_storage_clone!(SessionFileResource);

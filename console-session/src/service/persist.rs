use crate::{prelude::*, resource::SessionFileResource};
use console_api::config::{write_session_at, SessionFile};
use console_workspace::WorkspaceSnapshot;

/// Writes the last active key to the session file whenever it changes
pub struct PersistService {
    _write: Lifeline,
}

impl Service for PersistService {
    type Bus = SessionBus;
    type Lifeline = anyhow::Result<Self>;

    fn spawn(bus: &Self::Bus) -> Self::Lifeline {
        let mut rx = bus.rx::<WorkspaceSnapshot>()?;
        let SessionFileResource(path) = bus.resource::<SessionFileResource>()?;

        let _write = Self::try_task("write", async move {
            let mut last = None;

            while let Some(snapshot) = rx.recv().await {
                if last.as_ref() == Some(&snapshot.active) {
                    continue;
                }

                let session = SessionFile {
                    last_active: Some(snapshot.active.clone()),
                };

                if let Err(err) = write_session_at(path.as_path(), &session) {
                    warn!("failed to write session file {:?}: {}", path, err);
                    continue;
                }

                debug!("persisted active key {}", snapshot.active);
                last = Some(snapshot.active);
            }

            Ok(())
        });

        Ok(Self { _write })
    }
}

#[cfg(test)]
mod tests {
    use super::PersistService;
    use crate::{prelude::*, resource::SessionFileResource};
    use console_api::{
        config::load_session_at,
        route::{ActiveKey, FixedView},
    };
    use console_workspace::WorkspaceSnapshot;
    use lifeline::{assert_completes, dyn_bus::DynBus};
    use std::time::Duration;

    #[tokio::test]
    async fn writes_active_key() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.yml");

        let bus = SessionBus::default();
        bus.store_resource(SessionFileResource(path.clone()));
        let _service = PersistService::spawn(&bus)?;

        let mut tx = bus.tx::<WorkspaceSnapshot>()?;
        let mut snapshot = WorkspaceSnapshot::default();
        snapshot.active = ActiveKey::Fixed(FixedView::SchemaService);
        tx.send(snapshot).await?;

        assert_completes!(async move {
            loop {
                let session = load_session_at(path.as_path()).unwrap_or_default();
                if session.last_active == Some(ActiveKey::Fixed(FixedView::SchemaService)) {
                    break;
                }

                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        }, 500);

        Ok(())
    }
}

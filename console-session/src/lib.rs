//! The session services for the namespace console.
//!
//! A `Session` owns the workspace store on a single task.  The display layer sends
//! `SessionRecv` callbacks, and reads `WorkspaceSnapshot` updates and `Notification` toasts.
//! Page data is fetched from the backend after each open, and applied with the page generation
//! it was requested for.

use crate::prelude::*;

use console_api::{
    config::{load_config, load_session_at, session_log, session_path, Config},
    env::log_level_override,
    log::{effective_level, set_level},
};
use console_backend::{Backend, HttpBackend};
use console_workspace::WorkspaceSnapshot;
use lifeline::dyn_bus::DynBus;
use postage::{broadcast, mpsc, watch};
use resource::{BackendResource, SessionFileResource};
use simplelog::{ColorChoice, CombinedLogger, TermLogger, TerminalMode, WriteLogger};
use std::{fs::File, path::PathBuf, sync::Arc};
use utils::await_condition;

mod bus;
mod message;
mod prelude;
mod resource;
mod service;
mod utils;

pub use message::{
    notification::Notification,
    session::{Mutation, SessionRecv},
};
pub use service::main::MainService;
pub use utils::SessionClosedError;

/// A running session.  Dropping it stops the services.
pub struct Session {
    tx: mpsc::Sender<SessionRecv>,
    rx_snapshot: watch::Receiver<WorkspaceSnapshot>,
    rx_notification: broadcast::Receiver<Notification>,
    _service: MainService,
}

impl Session {
    pub async fn send(&mut self, recv: SessionRecv) -> anyhow::Result<()> {
        self.tx.send(recv).await?;
        Ok(())
    }

    /// The most recently published snapshot
    pub fn snapshot(&self) -> WorkspaceSnapshot {
        self.rx_snapshot.borrow().clone()
    }

    /// Waits until a published snapshot satisfies the condition
    pub async fn await_snapshot<F>(&mut self, condition: F) -> Result<WorkspaceSnapshot, SessionClosedError>
    where
        F: FnMut(&WorkspaceSnapshot) -> bool,
    {
        await_condition(&mut self.rx_snapshot, condition).await
    }

    /// The next toast, in publish order
    pub async fn notification(&mut self) -> Option<Notification> {
        self.rx_notification.recv().await
    }
}

/// Loads `~/.console/console.yml`, installs the loggers, and launches a session against the
/// configured backend.
///
/// `CONSOLE_LOG` overrides the configured log level.
pub async fn launch() -> anyhow::Result<Session> {
    if let Some(level) = log_level_override() {
        set_level(level);
    }

    let config = load_config()?;
    init_logging(&config)?;

    info!("console session starting");
    info!("backend url: {}", config.backend_url);

    let backend = HttpBackend::new(&config)?;
    spawn(Arc::new(backend), session_path()?).await
}

/// Launches a session with the given backend, persisting the active key to `session_file`.
///
/// A fixed view persisted by the previous session is restored.
pub async fn spawn(backend: Arc<dyn Backend>, session_file: PathBuf) -> anyhow::Result<Session> {
    let restore = match load_session_at(session_file.as_path()) {
        Ok(session) => session.last_active.filter(|active| active.is_fixed()),
        Err(err) => {
            warn!("ignoring unreadable session file {:?}: {}", session_file, err);
            None
        }
    };

    let bus = SessionBus::default();
    bus.capacity::<SessionRecv>(64)?;
    bus.capacity::<Notification>(64)?;
    bus.store_resource(BackendResource(backend));
    bus.store_resource(SessionFileResource(session_file));

    let rx_notification = bus.rx::<Notification>()?;
    let service = MainService::spawn(&bus)?;

    let mut tx = bus.tx::<SessionRecv>()?;
    let rx_snapshot = bus.rx::<WorkspaceSnapshot>()?;

    if let Some(active) = restore {
        debug!("restoring active view {}", active);
        tx.send(SessionRecv::SetActive(active.to_string())).await?;
    }

    Ok(Session {
        tx,
        rx_snapshot,
        rx_notification,
        _service: service,
    })
}

fn init_logging(config: &Config) -> anyhow::Result<()> {
    let log_file = session_log()?;
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let log_config = simplelog::ConfigBuilder::new()
        .set_time_format_str("%H:%M:%S%.3f CON")
        .build();

    let level = effective_level(config.log_level.as_deref());
    CombinedLogger::init(vec![
        TermLogger::new(
            level,
            log_config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ),
        WriteLogger::new(level, log_config, File::create(log_file)?),
    ])?;

    log_panics::init();

    Ok(())
}

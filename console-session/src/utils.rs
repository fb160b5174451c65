use crate::message::notification::Notification;
use log::warn;
use postage::{broadcast, sink::Sink, stream::Stream, watch};
use thiserror::Error;

#[derive(Error, Debug)]
#[error("the session shut down before the state resolved")]
pub struct SessionClosedError {}

/// Waits for a watched value matching the condition, starting with the current value
pub async fn await_condition<T, F>(
    channel: &mut watch::Receiver<T>,
    mut condition: F,
) -> Result<T, SessionClosedError>
where
    T: Clone + Send + Sync,
    F: FnMut(&T) -> bool,
{
    {
        let current = channel.borrow();
        if condition(&current) {
            return Ok(current.clone());
        }
    }

    while let Some(update) = channel.recv().await {
        if condition(&update) {
            return Ok(update);
        }
    }

    Err(SessionClosedError {})
}

/// Publishes a toast without waiting on slow readers.  Dropped if the buffer is full.
pub fn notify(tx: &mut broadcast::Sender<Notification>, notification: Notification) {
    if let Err(err) = tx.try_send(notification) {
        warn!("dropped notification: {:?}", err);
    }
}

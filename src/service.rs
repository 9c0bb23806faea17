//! Serial input queue on top of tokio.
//!
//! Platforms that deliver touches, key presses and timer callbacks on
//! different threads hand them to an [`InputHandle`]. One spawned task owns the
//! [`InputBridge`] and processes commands and timer deadlines strictly one at a
//! time, which keeps the ordering guarantees of the state machines intact.

use std::future;

use log::{debug, info};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::input::{InputBridge, InputEvent, KeyboardSink, MouseSink};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("input service has shut down")]
    Closed,
}

#[derive(Debug)]
enum Command {
    Event(InputEvent),
    Shutdown,
}

/// Clonable sender side of the input service.
#[derive(Debug, Clone)]
pub struct InputHandle {
    tx: mpsc::UnboundedSender<Command>,
}

impl InputHandle {
    /// Queues an event. Events from all clones are processed in send order.
    pub fn send(&self, event: InputEvent) -> Result<(), ServiceError> {
        self.tx
            .send(Command::Event(event))
            .map_err(|_| ServiceError::Closed)
    }

    /// Asks the service to stop after the events already queued.
    pub fn shutdown(&self) -> Result<(), ServiceError> {
        self.tx.send(Command::Shutdown).map_err(|_| ServiceError::Closed)
    }
}

/// Spawns the service task. The join handle yields the bridge back once the
/// service stops, either on [`InputHandle::shutdown`] or when every handle is
/// dropped.
pub fn spawn<M, K>(
    runtime_handle: &tokio::runtime::Handle,
    bridge: InputBridge<M, K>,
) -> (InputHandle, JoinHandle<InputBridge<M, K>>)
where
    M: MouseSink + Send + 'static,
    K: KeyboardSink + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let task = runtime_handle.spawn(run(bridge, rx));
    (InputHandle { tx }, task)
}

async fn run<M, K>(
    mut bridge: InputBridge<M, K>,
    mut rx: mpsc::UnboundedReceiver<Command>,
) -> InputBridge<M, K>
where
    M: MouseSink,
    K: KeyboardSink,
{
    info!("Input service started");
    loop {
        let deadline = bridge.next_deadline();
        tokio::select! {
            command = rx.recv() => match command {
                Some(Command::Event(event)) => {
                    if let Some(dispatch) = bridge.handle(event, Instant::now().into_std()) {
                        debug!("Key dispatch: {:?}", dispatch);
                    }
                }
                Some(Command::Shutdown) | None => break,
            },
            _ = wait_until(deadline) => bridge.poll(Instant::now().into_std()),
        }
    }
    info!("Input service stopped");
    bridge
}

async fn wait_until(deadline: Option<std::time::Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(Instant::from_std(deadline)).await,
        None => future::pending().await,
    }
}

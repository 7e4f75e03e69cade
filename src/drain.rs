//! Drain tracking for the terminal event's publish.
//!
//! The `done` handler does not await its own publish; the publish runs on
//! a spawned task whose handle is parked here so shutdown can be sequenced
//! after the last publish completes.

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::error::{EmitterError, Result};

/// Handle to the in-flight terminal publish.
pub type DrainHandle = JoinHandle<Result<()>>;

/// Single-slot holder for the pending terminal publish.
///
/// At most one operation is pending at a time; `drain` consumes the slot
/// exactly once.
#[derive(Default)]
pub struct DrainSlot {
    pending: Mutex<Option<DrainHandle>>,
}

impl DrainSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park the terminal publish handle.
    ///
    /// A previous un-drained handle is replaced; its task keeps running
    /// but its outcome is no longer observable, so the replacement is
    /// warned about rather than silent.
    pub async fn store(&self, handle: DrainHandle) {
        if self.pending.lock().await.replace(handle).is_some() {
            warn!("Replacing un-drained terminal publish; its outcome will not be observed");
        }
    }

    /// Whether a terminal publish is currently parked.
    pub async fn is_pending(&self) -> bool {
        self.pending.lock().await.is_some()
    }

    /// Await the parked publish and clear the slot.
    ///
    /// Returns `DrainNotReady` when no terminal publish has been parked;
    /// callers decide whether that is an error (explicit `drain`) or a
    /// no-op (shutdown cleanup).
    pub async fn drain(&self) -> Result<()> {
        let handle = self
            .pending
            .lock()
            .await
            .take()
            .ok_or(EmitterError::DrainNotReady)?;

        match handle.await {
            Ok(result) => result,
            Err(e) => Err(EmitterError::Publish(format!(
                "Terminal publish task failed: {}",
                e
            ))),
        }
    }
}

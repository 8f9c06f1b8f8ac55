//! Publish/subscribe fan-out for gesture state.
//!
//! One producer (the tracker loop), many listeners (WebSocket sessions).
//! Messages supersede each other, so a lagged listener drops what it
//! missed instead of queueing; the channel capacity only has to absorb
//! short scheduling hiccups.

use anyhow::Result;
use tokio::sync::broadcast;

use crate::types::GestureState;

#[derive(Clone)]
pub struct StateHub {
    tx: broadcast::Sender<String>,
}

impl StateHub {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Serialize and broadcast one state record. Having no listeners is
    /// not an error; the tracker publishes regardless.
    pub fn publish(&self, state: &GestureState) -> Result<()> {
        let payload = serde_json::to_string(state)?;
        let _ = self.tx.send(payload);
        Ok(())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.tx.subscribe()
    }
}

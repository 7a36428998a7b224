//! Connection readiness - One-shot notification from the gateway

use std::sync::Arc;
use tokio::sync::watch;

use crate::application::errors::BotError;
use crate::domain::traits::BotInfo;

/// Signalled once by the gateway when the session is established
#[derive(Clone)]
pub struct ReadySignal {
    tx: Arc<watch::Sender<Option<BotInfo>>>,
}

impl ReadySignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Mark the connection ready. Returns false if it was already signalled.
    pub fn signal(&self, info: BotInfo) -> bool {
        let mut info = Some(info);
        self.tx.send_if_modified(|current| {
            if current.is_some() {
                return false;
            }
            *current = info.take();
            true
        })
    }

    pub fn is_ready(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// Suspend until the gateway signals readiness
    pub async fn wait(&self) -> Result<BotInfo, BotError> {
        let mut rx = self.tx.subscribe();
        let ready = rx
            .wait_for(|info| info.is_some())
            .await
            .map_err(|_| BotError::Internal("ready signal dropped".to_string()))?;

        ready
            .clone()
            .ok_or_else(|| BotError::Internal("ready signal without identity".to_string()))
    }
}

impl Default for ReadySignal {
    fn default() -> Self {
        Self::new()
    }
}

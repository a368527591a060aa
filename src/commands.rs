use crate::errors::CommandError;
use crate::store::KickStore;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Identifier of the last kick logged in this session, if it can still be undone.
#[derive(Debug, Default)]
pub struct UndoSlot {
    last: Mutex<Option<String>>,
}

impl UndoSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn remember(&self, id: String) {
        *self.last.lock().await = Some(id);
    }

    pub async fn take(&self) -> Option<String> {
        self.last.lock().await.take()
    }

    pub async fn peek(&self) -> Option<String> {
        self.last.lock().await.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub message: &'static str,
    pub kick_id: Option<String>,
    pub undo_available: bool,
}

pub async fn log_kick<S: KickStore>(
    store: &S,
    slot: &UndoSlot,
    now: DateTime<Utc>,
) -> Result<Confirmation, CommandError> {
    let id = store.append(now).await.map_err(|err| {
        error!("log kick failed: {err}");
        CommandError::Log(err)
    })?;

    slot.remember(id.clone()).await;
    info!(%id, "kick logged");
    Ok(Confirmation {
        message: "Kick logged successfully!",
        kick_id: Some(id),
        undo_available: true,
    })
}

/// Removes the last logged kick. The slot is emptied whether or not the delete succeeds.
pub async fn undo_last<S: KickStore>(store: &S, slot: &UndoSlot) -> Result<Confirmation, CommandError> {
    let Some(id) = slot.take().await else {
        warn!("undo requested with nothing to undo");
        return Err(CommandError::NoUndoTarget);
    };

    store.delete(&id).await.map_err(|err| {
        error!(%id, "undo failed: {err}");
        CommandError::Undo(err)
    })?;

    info!(%id, "kick removed");
    Ok(Confirmation {
        message: "Kick removed",
        kick_id: Some(id),
        undo_available: false,
    })
}

use crate::errors::StoreWriteError;
use crate::models::{Kick, KickData};
use crate::storage::{load_data, persist_data};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, watch};
use tokio::time::timeout;
use tracing::{debug, info};
use uuid::Uuid;

/// Full event collection as of one change. Every change publishes a new one.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub version: u64,
    pub loaded: bool,
    pub kicks: Arc<Vec<Kick>>,
}

/// Event source backing the tracker: current snapshot, change feed, append, delete.
pub trait KickStore: Send + Sync {
    fn snapshot(&self) -> Snapshot;

    fn subscribe(&self) -> watch::Receiver<Snapshot>;

    /// Appends a kick stamped `at` and returns its new identifier.
    fn append(
        &self,
        at: DateTime<Utc>,
    ) -> impl Future<Output = Result<String, StoreWriteError>> + Send;

    fn delete(&self, id: &str) -> impl Future<Output = Result<(), StoreWriteError>> + Send;
}

/// Kicks kept in memory and mirrored to a JSON file after every change.
pub struct FileStore {
    path: PathBuf,
    data: Mutex<KickData>,
    tx: watch::Sender<Snapshot>,
}

impl FileStore {
    pub async fn open(path: PathBuf) -> Self {
        let data = load_data(&path).await;
        info!(path = %path.display(), kicks = data.kicks.len(), "kick store opened");
        let snapshot = Snapshot {
            version: data.version,
            loaded: true,
            kicks: Arc::new(data.kicks.clone()),
        };
        let (tx, _) = watch::channel(snapshot);
        Self {
            path,
            data: Mutex::new(data),
            tx,
        }
    }

    fn publish(&self, data: &KickData) {
        self.tx.send_replace(Snapshot {
            version: data.version,
            loaded: true,
            kicks: Arc::new(data.kicks.clone()),
        });
    }
}

impl KickStore for FileStore {
    fn snapshot(&self) -> Snapshot {
        self.tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.tx.subscribe()
    }

    async fn append(&self, at: DateTime<Utc>) -> Result<String, StoreWriteError> {
        let kick = Kick::new(Uuid::new_v4().to_string(), at);
        let id = kick.id.clone();

        let mut data = self.data.lock().await;
        data.kicks.push(kick);
        data.version += 1;
        if let Err(err) = persist_data(&self.path, &data).await {
            data.kicks.pop();
            data.version -= 1;
            return Err(err);
        }

        self.publish(&data);
        info!(%id, "kick appended");
        Ok(id)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreWriteError> {
        let mut data = self.data.lock().await;
        let Some(position) = data.kicks.iter().position(|kick| kick.id == id) else {
            debug!(%id, "delete of unknown kick ignored");
            return Ok(());
        };

        let removed = data.kicks.remove(position);
        data.version += 1;
        if let Err(err) = persist_data(&self.path, &data).await {
            data.kicks.insert(position, removed);
            data.version -= 1;
            return Err(err);
        }

        self.publish(&data);
        info!(%id, "kick deleted");
        Ok(())
    }
}

/// Waits up to `limit` for a snapshot newer than `since`.
///
/// A `since` ahead of the store was handed out by an earlier process over a
/// replaced data file; the current snapshot is returned at once.
pub async fn next_change(
    mut rx: watch::Receiver<Snapshot>,
    since: u64,
    limit: Duration,
) -> Snapshot {
    if rx.borrow().version < since {
        return rx.borrow().clone();
    }
    let changed = timeout(limit, rx.wait_for(|snapshot| snapshot.version > since))
        .await
        .map(|result| result.map(|snapshot| snapshot.clone()));
    match changed {
        Ok(Ok(snapshot)) => snapshot,
        _ => rx.borrow().clone(),
    }
}

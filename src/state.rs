use crate::commands::UndoSlot;
use crate::config::Config;
use crate::store::FileStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<FileStore>,
    pub undo: Arc<UndoSlot>,
}

impl AppState {
    pub fn new(config: Config, store: FileStore) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
            undo: Arc::new(UndoSlot::new()),
        }
    }
}

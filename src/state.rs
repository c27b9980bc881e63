use crate::storage::CsvStore;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared handler state. Every request rereads the file, so the only
/// coordination needed is serializing the whole-file rewrites.
#[derive(Clone)]
pub struct AppState {
    pub store: CsvStore,
    pub write_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(store: CsvStore) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }
}

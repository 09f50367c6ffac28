use crate::store::{MemoryStorage, RecordStore};
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub store: Arc<Mutex<RecordStore<MemoryStorage>>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: MemoryStorage) -> Self {
        Self {
            data_path,
            store: Arc::new(Mutex::new(RecordStore::new(data))),
        }
    }
}

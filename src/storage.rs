use crate::errors::AppError;
use crate::store::MemoryStorage;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

const DEFAULT_DATA_PATH: &str = "data/arthritis-log.json";

pub fn resolve_data_path() -> PathBuf {
    data_path_from(env::var("APP_DATA_PATH").ok())
}

fn data_path_from(configured: Option<String>) -> PathBuf {
    configured
        .filter(|path| !path.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH))
}

pub async fn load_data(path: &Path) -> MemoryStorage {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file: {err}");
                MemoryStorage::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => MemoryStorage::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            MemoryStorage::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &MemoryStorage) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JournalEntry;
    use crate::store::{KeyValueStore, RecordStore};
    use chrono::{TimeZone, Utc};

    fn temp_path(tag: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        env::temp_dir().join(format!("arthritis_storage_{tag}_{}_{nanos}.json", std::process::id()))
    }

    #[test]
    fn data_path_defaults_when_unset_or_blank() {
        assert_eq!(data_path_from(None), PathBuf::from("data/arthritis-log.json"));
        assert_eq!(data_path_from(Some("  ".into())), PathBuf::from("data/arthritis-log.json"));
        assert_eq!(data_path_from(Some("/tmp/log.json".into())), PathBuf::from("/tmp/log.json"));
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let data = load_data(&temp_path("missing")).await;
        assert!(data.is_empty());
    }

    #[tokio::test]
    async fn garbage_file_loads_empty() {
        let path = temp_path("garbage");
        fs::write(&path, b"][").await.unwrap();
        assert!(load_data(&path).await.is_empty());
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn persisted_snapshot_reloads_identically() {
        let path = temp_path("roundtrip");
        let mut store = RecordStore::new(MemoryStorage::new());
        store
            .append(JournalEntry {
                timestamp: Utc.with_ymd_and_hms(2026, 2, 14, 19, 0, 0).unwrap(),
                text: "Hands ached after gardening".into(),
            })
            .unwrap();

        persist_data(&path, store.storage()).await.unwrap();
        let reloaded = load_data(&path).await;
        assert_eq!(&reloaded, store.storage());
        assert!(reloaded.get_item("journal").is_some());
        let _ = fs::remove_file(&path).await;
    }
}

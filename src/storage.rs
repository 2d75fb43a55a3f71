use crate::errors::AppError;
use crate::repository::JsonStore;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{debug, error};

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/fit_track.json"))
}

pub async fn load_store(path: &Path) -> JsonStore {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(store) => store,
            Err(err) => {
                error!("failed to parse data file: {err}");
                JsonStore::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => JsonStore::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            JsonStore::default()
        }
    }
}

pub async fn persist_store(path: &Path, store: &JsonStore) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(store)?;
    fs::write(path, payload).await?;
    debug!(path = %path.display(), keys = store.len(), "store persisted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{keys, Repository};

    #[tokio::test]
    async fn missing_file_loads_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = load_store(&dir.path().join("absent.json")).await;
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_loads_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, b"{ not json").unwrap();
        assert!(load_store(&path).await.is_empty());
    }

    #[tokio::test]
    async fn persisted_store_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let mut store = JsonStore::new();
        store.set(keys::DARK_MODE, &false).unwrap();

        persist_store(&path, &store).await.unwrap();
        let loaded = load_store(&path).await;
        assert_eq!(loaded, store);
        assert!(!loaded.get_or(keys::DARK_MODE, true));
    }
}

use crate::models::User;
use crate::utils::StoreError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, MutexGuard};

/// Flat-file user store: the whole collection lives in one JSON array.
///
/// Every read loads the full file and every write replaces it. Callers that
/// read, modify and write back must hold [`UserStore::lock`] for the whole
/// sequence.
pub struct UserStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl UserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Exclusive section for read-modify-write sequences.
    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Loads all users. A missing file is an empty collection.
    pub async fn load(&self) -> Result<Vec<User>, StoreError> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("📂 {} not found, starting with no users", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(StoreError::Read(e)),
        };

        serde_json::from_str(&data).map_err(StoreError::Parse)
    }

    /// Replaces the file with `users`, pretty-printed with two-space indent.
    ///
    /// The JSON goes to a sibling `.tmp` file first and is renamed over the
    /// store, so readers never observe a half-written array.
    pub async fn save(&self, users: &[User]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(users).map_err(StoreError::Serialize)?;

        let tmp_path = self.tmp_path();
        tokio::fs::write(&tmp_path, json).await.map_err(StoreError::Write)?;

        if let Err(e) = tokio::fs::rename(&tmp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(StoreError::Write(e));
        }

        log::debug!("💾 Saved {} users to {}", users.len(), self.path.display());
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "users.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

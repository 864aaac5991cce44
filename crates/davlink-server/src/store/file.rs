//! JSON-file credential store.
//!
//! All records live in one JSON document. Writes go to a temp file that is
//! renamed over the original, so a reader sees either the old or the new
//! set of records and never a partial write.

use std::io;
use std::path::{Path, PathBuf};

use davlink_core::{NewCredential, StoredCredential, UserId};
use davlink_providers::BoxFuture;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use super::CredentialStore;
use crate::error::{StoreError, StoreResult};

/// On-disk format version.
const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct CredentialFile {
    version: u32,
    credentials: Vec<StoredCredential>,
}

impl Default for CredentialFile {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            credentials: Vec::new(),
        }
    }
}

/// Credential store backed by a JSON file.
#[derive(Debug)]
pub struct FileStore {
    /// Path to the store file.
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileStore {
    /// Creates a store at the given path. The file is created on first insert.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Returns the store path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> StoreResult<CredentialFile> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no credential store at {:?}", self.path);
                return Ok(CredentialFile::default());
            }
            Err(e) => return Err(e.into()),
        };

        let file: CredentialFile = serde_json::from_str(&content)?;
        if file.version != FORMAT_VERSION {
            return Err(StoreError::Corrupt {
                path: self.path.display().to_string(),
                message: format!("unsupported format version {}", file.version),
            });
        }
        Ok(file)
    }

    async fn save(&self, file: &CredentialFile) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let temp_path = self.path.with_extension("json.tmp");
        let content = serde_json::to_vec_pretty(file)?;
        fs::write(&temp_path, &content).await?;

        // Restrict permissions before the file becomes visible under its real name
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o600)).await?;
        }

        fs::rename(&temp_path, &self.path).await?;
        debug!("saved {} credentials to {:?}", file.credentials.len(), self.path);
        Ok(())
    }
}

impl CredentialStore for FileStore {
    fn create(&self, credential: NewCredential) -> BoxFuture<'_, StoreResult<StoredCredential>> {
        Box::pin(async move {
            let _guard = self.lock.lock().await;
            let mut file = self.load().await?;
            let record = StoredCredential::from_new(credential);
            file.credentials.push(record.clone());
            self.save(&file).await?;
            Ok(record)
        })
    }

    fn find_by_user<'a>(
        &'a self,
        user_id: &'a UserId,
    ) -> BoxFuture<'a, StoreResult<Vec<StoredCredential>>> {
        Box::pin(async move {
            let _guard = self.lock.lock().await;
            let file = self.load().await?;
            Ok(file
                .credentials
                .into_iter()
                .filter(|r| &r.user_id == user_id)
                .collect())
        })
    }
}

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, warn};

use crate::{
    application::{error::ApplicationError, services::StorageService},
    domain::models::file::FileData,
    services::error::StorageError,
};

/// Writes each blob to `<root>/<code>`.
pub struct DiskStorageService {
    root: PathBuf,
}

impl DiskStorageService {
    pub async fn new(root: impl AsRef<Path>) -> Result<Self, StorageError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn path_for(&self, code: &str) -> PathBuf {
        self.root.join(code)
    }
}

#[async_trait]
impl StorageService for DiskStorageService {
    async fn write(&self, file: FileData) -> Result<(), ApplicationError> {
        let path = self.path_for(&file.code);

        // create_new: an existing file under a fresh code means something
        // outside this process wrote into the directory.
        let mut handle = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(StorageError::from)?;

        let written = async {
            handle.write_all(&file.content).await?;
            handle.flush().await
        }
        .await;
        if let Err(e) = written {
            drop(handle);
            if let Err(cleanup) = fs::remove_file(&path).await {
                warn!("Could not remove partial blob {}: {}", path.display(), cleanup);
            }
            return Err(StorageError::from(e).into());
        }

        debug!("Wrote {} bytes to {}", file.size(), path.display());
        Ok(())
    }

    fn provider(&self) -> &'static str {
        "disk"
    }
}

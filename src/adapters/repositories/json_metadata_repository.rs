use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    application::{error::PersistError, repositories::metadata_repository::MetadataRepository},
    domain::models::snapshot::MetadataSnapshot,
};

/// Keeps the metadata snapshot in a single JSON file.
pub struct JsonMetadataRepository {
    path: PathBuf,
}

impl JsonMetadataRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl MetadataRepository for JsonMetadataRepository {
    async fn load(&self) -> Result<MetadataSnapshot, PersistError> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    "No metadata file at {}, starting empty",
                    self.path.display()
                );
                return Ok(MetadataSnapshot::default());
            }
            Err(e) => return Err(e.into()),
        };

        let snapshot: MetadataSnapshot = serde_json::from_slice(&raw)?;
        debug!(
            "Loaded {} entries from {}",
            snapshot.data.len(),
            self.path.display()
        );
        Ok(snapshot)
    }

    async fn save(&self, snapshot: &MetadataSnapshot) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let body = serde_json::to_vec_pretty(snapshot)?;

        // Write beside the target and rename so readers never see a torn file.
        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(format!(".{}.tmp", Uuid::new_v4().simple()));
        let tmp_path = PathBuf::from(tmp_name);

        if let Err(e) = fs::write(&tmp_path, &body).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&tmp_path, &self.path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        debug!(
            "Persisted {} entries to {}",
            snapshot.data.len(),
            self.path.display()
        );
        Ok(())
    }
}

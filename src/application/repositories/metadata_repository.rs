use async_trait::async_trait;

use crate::{application::error::PersistError, domain::models::snapshot::MetadataSnapshot};

#[async_trait]
pub trait MetadataRepository: Send + Sync {
    async fn load(&self) -> Result<MetadataSnapshot, PersistError>;
    async fn save(&self, snapshot: &MetadataSnapshot) -> Result<(), PersistError>;
}

use async_trait::async_trait;

use crate::{application::error::ApplicationError, domain::models::file::FileData};

/// Blob sink. Implementations store `file.content` under `file.code`.
#[async_trait]
pub trait StorageService: Send + Sync {
    async fn write(&self, file: FileData) -> Result<(), ApplicationError>;
    fn provider(&self) -> &'static str;
}

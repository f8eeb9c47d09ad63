mod disk_storage;
mod error;
mod supabase_storage;

pub use disk_storage::DiskStorageService;
pub use error::StorageError;
pub use supabase_storage::SupabaseStorageService;

use std::sync::Arc;

use crate::{
    application::services::StorageService,
    domain::config::{
        local::{LocalConfig, Provider},
        secrets::Secrets,
    },
};

pub async fn create_storage_service(
    config: &LocalConfig,
    secrets: &Secrets,
) -> Result<Arc<dyn StorageService>, StorageError> {
    match config.provider {
        Provider::Disk => {
            let service = DiskStorageService::new(&config.data_dir).await?;
            Ok(Arc::new(service))
        }
        Provider::Supabase => {
            let supabase_secrets = secrets.supabase_secrets.as_ref().ok_or_else(|| {
                StorageError::InvalidCredentials("Supabase secrets not found".to_string())
            })?;

            let service = SupabaseStorageService::new(supabase_secrets.clone());
            Ok(Arc::new(service))
        }
    }
}

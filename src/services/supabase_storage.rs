use async_trait::async_trait;
use reqwest::Client;

use crate::{
    application::{error::ApplicationError, services::StorageService},
    domain::{config::secrets::SupabaseSecrets, models::file::FileData},
    services::error::StorageError,
};

/// Supabase storage bucket, addressed by code.
pub struct SupabaseStorageService {
    client: Client,
    storage_url: String,
    api_key: String,
    bucket_name: String,
}

impl SupabaseStorageService {
    pub fn new(secrets: SupabaseSecrets) -> Self {
        Self {
            client: Client::new(),
            storage_url: secrets.storage_url.trim_end_matches('/').to_string(),
            api_key: secrets.api_key,
            bucket_name: secrets.bucket_name,
        }
    }

    fn object_url(&self, code: &str) -> String {
        format!("{}/object/{}/{}", self.storage_url, self.bucket_name, code)
    }
}

#[async_trait]
impl StorageService for SupabaseStorageService {
    async fn write(&self, file: FileData) -> Result<(), ApplicationError> {
        let url = self.object_url(&file.code);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("apikey", &self.api_key)
            .header("Content-Type", "application/octet-stream")
            .header("x-upsert", "false")
            .body(file.content)
            .send()
            .await
            .map_err(StorageError::from)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            let error = match status.as_u16() {
                401 | 403 => StorageError::Unauthorized(error_text),
                _ => StorageError::ProviderError(format!(
                    "Upload failed with status {}: {}",
                    status, error_text
                )),
            };
            return Err(error.into());
        }

        Ok(())
    }

    fn provider(&self) -> &'static str {
        "supabase"
    }
}

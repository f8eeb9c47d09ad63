use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::{info, warn};

use crate::{
    adapters::{
        dto::file_dto::{FileResponse, RecentResponse, UploadFileResponse},
        state::AppState,
    },
    application::{
        dto::upload_dto::UploadForm,
        error::ApplicationError,
        services::{
            code_allocator::{is_valid_code, CODE_LENGTH},
            upload_service::store_upload,
            upload_validator::validate_upload,
        },
    },
};

fn read_error(field: &str, error: MultipartError) -> ApplicationError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!("Upload field '{}' exceeds the body limit", field);
        return ApplicationError::PayloadTooLarge;
    }
    ApplicationError::PayloadUnreadable(format!("field '{}': {}", field, error.body_text()))
}

pub struct FileController;

impl FileController {
    /// Receives an upload.
    /// POST /send
    /// Multipart fields: data (file), name, ttl (optional), tags (optional)
    pub async fn upload_file(
        State(app_state): State<AppState>,
        mut multipart: Multipart,
    ) -> Result<Json<UploadFileResponse>, ApplicationError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| read_error("<next>", e))?
        {
            let name = field.name().unwrap_or("").to_string();

            // First occurrence wins; repeats are skipped unread.
            match name.as_str() {
                "data" if form.data.is_none() => {
                    form.data = Some(
                        field
                            .bytes()
                            .await
                            .map_err(|e| read_error("data", e))?
                            .to_vec(),
                    );
                }
                "name" if form.name.is_none() => {
                    form.name = Some(field.text().await.map_err(|e| read_error("name", e))?);
                }
                "ttl" if form.ttl.is_none() => {
                    form.ttl = Some(field.text().await.map_err(|e| read_error("ttl", e))?);
                }
                "tags" if form.tags.is_none() => {
                    form.tags = Some(field.text().await.map_err(|e| read_error("tags", e))?);
                }
                _ => {}
            }
        }

        let upload = validate_upload(form)?;
        info!(
            "Accepted upload of {} ({} bytes)",
            upload.original_filename,
            upload.content.len()
        );

        let receipt = store_upload(
            &app_state.metadata_store,
            app_state.storage_service.as_ref(),
            upload,
            Utc::now(),
        )
        .await?;

        Ok(Json(UploadFileResponse::from(receipt)))
    }

    /// GET /api/v1/files/{code}
    pub async fn get_file_metadata(
        State(app_state): State<AppState>,
        Path(code): Path<String>,
    ) -> Result<Json<FileResponse>, ApplicationError> {
        if !is_valid_code(&code, CODE_LENGTH) {
            return Err(ApplicationError::NotFound);
        }
        let entry = app_state
            .metadata_store
            .lookup(&code)
            .ok_or(ApplicationError::NotFound)?;
        Ok(Json(FileResponse::from(entry)))
    }

    /// Most recent uploads, newest first. Codes may point at entries that
    /// have since been removed.
    /// GET /api/v1/files/recent
    pub async fn get_recent_files(State(app_state): State<AppState>) -> Json<RecentResponse> {
        Json(RecentResponse {
            names: app_state.metadata_store.recent(),
        })
    }
}

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::{
    application::{
        dto::upload_dto::{UploadReceipt, ValidatedUpload},
        error::ApplicationError,
        services::{
            code_allocator::{CODE_LENGTH, DELETE_KEY_LENGTH},
            metadata_store::MetadataStore,
            storage_service::StorageService,
        },
    },
    domain::models::{entry::UploadEntry, expiration::Expiration, file::FileData},
};

/// Stores a validated upload: reserve a code, write the blob, then commit the
/// metadata in one step and persist it on a best-effort basis.
///
/// Any failure before the commit leaves the store untouched.
pub async fn store_upload(
    store: &MetadataStore,
    storage: &dyn StorageService,
    upload: ValidatedUpload,
    now: DateTime<Utc>,
) -> Result<UploadReceipt, ApplicationError> {
    let expiration = Expiration::from_ttl(upload.lifetime, now);

    let reservation = store.reserve_code(CODE_LENGTH);
    let code = reservation.code().to_string();

    let file = FileData::new(code.clone(), upload.content);
    let size = file.size();
    storage.write(file).await.inspect_err(|e| {
        warn!("Blob write failed for {}, releasing code: {:?}", code, e);
    })?;

    let delete_key = store.delete_key(DELETE_KEY_LENGTH);
    let entry = UploadEntry {
        code: code.clone(),
        original_filename: upload.original_filename,
        tags: upload.tags,
        ttl: upload.ttl,
        delete_key: delete_key.clone(),
        creation_time: now,
        expiration,
    };

    reservation.commit(entry).map_err(|e| {
        error!("Metadata invariant violated after reservation: {}", e);
        ApplicationError::from(e)
    })?;

    info!(
        "Stored upload {} ({} bytes, provider {})",
        code,
        size,
        storage.provider()
    );

    // The in-memory entry stays authoritative when this fails.
    if store.persist().await.is_err() {
        warn!("Upload {} kept in memory only until the next persist", code);
    }

    Ok(UploadReceipt {
        code,
        delete_key,
        expiration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::{
            error::PersistError, repositories::metadata_repository::MetadataRepository,
            services::code_allocator::is_valid_code,
        },
        domain::models::snapshot::MetadataSnapshot,
    };
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingStorage {
        writes: Mutex<Vec<FileData>>,
        fail: bool,
    }

    #[async_trait]
    impl StorageService for RecordingStorage {
        async fn write(&self, file: FileData) -> Result<(), ApplicationError> {
            if self.fail {
                return Err(ApplicationError::StorageFailure("disk unplugged".to_string()));
            }
            self.writes.lock().unwrap().push(file);
            Ok(())
        }

        fn provider(&self) -> &'static str {
            "memory"
        }
    }

    struct BrokenRepository;

    #[async_trait]
    impl MetadataRepository for BrokenRepository {
        async fn load(&self) -> Result<MetadataSnapshot, PersistError> {
            Ok(MetadataSnapshot::default())
        }

        async fn save(&self, _snapshot: &MetadataSnapshot) -> Result<(), PersistError> {
            Err(PersistError::Io(std::io::Error::other("read-only filesystem")))
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
    }

    fn upload(ttl: Option<(&str, Duration)>) -> ValidatedUpload {
        ValidatedUpload {
            content: b"payload".to_vec(),
            original_filename: "holiday.jpg".to_string(),
            ttl: ttl.map(|(raw, _)| raw.to_string()),
            lifetime: ttl.map(|(_, duration)| duration),
            tags: vec!["a".to_string(), "".to_string()],
        }
    }

    #[tokio::test]
    async fn test_store_upload_commits_entry() {
        let store = MetadataStore::new(Arc::new(BrokenRepository));
        let storage = RecordingStorage::default();

        let receipt = store_upload(
            &store,
            &storage,
            upload(Some(("1h", Duration::hours(1)))),
            t0(),
        )
        .await
        .unwrap();

        assert!(is_valid_code(&receipt.code, CODE_LENGTH));
        assert!(is_valid_code(&receipt.delete_key, DELETE_KEY_LENGTH));
        assert_eq!(receipt.expiration, Expiration::At(t0() + Duration::hours(1)));

        let entry = store.lookup(&receipt.code).unwrap();
        assert_eq!(entry.original_filename, "holiday.jpg");
        assert_eq!(entry.tags, vec!["a", ""]);
        assert_eq!(entry.ttl.as_deref(), Some("1h"));
        assert_eq!(entry.delete_key, receipt.delete_key);
        assert_eq!(entry.creation_time, t0());
        assert_eq!(store.recent(), vec![receipt.code.clone()]);

        let writes = storage.writes.lock().unwrap();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].code, receipt.code);
        assert_eq!(writes[0].content, b"payload");
    }

    #[tokio::test]
    async fn test_no_ttl_never_expires() {
        let store = MetadataStore::new(Arc::new(BrokenRepository));
        let storage = RecordingStorage::default();

        let receipt = store_upload(&store, &storage, upload(None), t0())
            .await
            .unwrap();
        assert_eq!(receipt.expiration, Expiration::Never);
    }

    #[tokio::test]
    async fn test_storage_failure_leaves_store_unmodified() {
        let store = MetadataStore::new(Arc::new(BrokenRepository));
        let storage = RecordingStorage {
            fail: true,
            ..Default::default()
        };

        let result = store_upload(&store, &storage, upload(None), t0()).await;

        assert!(matches!(result, Err(ApplicationError::StorageFailure(_))));
        assert!(store.is_empty());
        assert!(store.snapshot().data.is_empty());
        assert!(store.recent().is_empty());
    }

    #[tokio::test]
    async fn test_negative_ttl_expires_in_the_past() {
        let store = MetadataStore::new(Arc::new(BrokenRepository));
        let storage = RecordingStorage::default();

        let receipt = store_upload(
            &store,
            &storage,
            upload(Some(("-1h", -Duration::hours(1)))),
            t0(),
        )
        .await
        .unwrap();

        assert_eq!(receipt.expiration, Expiration::At(t0() - Duration::hours(1)));
        assert_eq!(store.len(), 1);
    }
}

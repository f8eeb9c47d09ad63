use chrono::Duration;

use crate::domain::models::expiration::Expiration;

/// Fields collected from an upload submission, before validation.
#[derive(Debug, Default, Clone)]
pub struct UploadForm {
    pub data: Option<Vec<u8>>,
    pub name: Option<String>,
    pub ttl: Option<String>,
    pub tags: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ValidatedUpload {
    pub content: Vec<u8>,
    pub original_filename: String,
    /// TTL expression as submitted, kept on the entry.
    pub ttl: Option<String>,
    /// The same TTL, parsed.
    pub lifetime: Option<Duration>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadReceipt {
    pub code: String,
    pub delete_key: String,
    pub expiration: Expiration,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    application::dto::upload_dto::UploadReceipt,
    domain::models::{entry::UploadEntry, expiration::Expiration},
};

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadFileResponse {
    pub name: String,
    pub delete_key: String,
    // Field name is part of the public wire format, misspelling included.
    #[serde(rename = "availaible_until")]
    pub available_until: Expiration,
}

impl From<UploadReceipt> for UploadFileResponse {
    fn from(receipt: UploadReceipt) -> Self {
        Self {
            name: receipt.code,
            delete_key: receipt.delete_key,
            available_until: receipt.expiration,
        }
    }
}

/// Public view of an entry. The delete key is never exposed here.
#[derive(Debug, Serialize, Deserialize)]
pub struct FileResponse {
    pub name: String,
    pub original: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<String>,
    pub creation_time: DateTime<Utc>,
    #[serde(rename = "availaible_until")]
    pub available_until: Expiration,
}

impl From<UploadEntry> for FileResponse {
    fn from(entry: UploadEntry) -> Self {
        Self {
            name: entry.code,
            original: entry.original_filename,
            tags: entry.tags,
            ttl: entry.ttl,
            creation_time: entry.creation_time,
            available_until: entry.expiration,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecentResponse {
    pub names: Vec<String>,
}

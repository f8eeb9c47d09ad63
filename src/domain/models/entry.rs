use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::expiration::Expiration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadEntry {
    pub code: String,
    pub original_filename: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<String>,
    pub delete_key: String,
    pub creation_time: DateTime<Utc>,
    pub expiration: Expiration,
}

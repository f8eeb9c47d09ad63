use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::models::entry::UploadEntry;

/// Durable form of the metadata store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataSnapshot {
    #[serde(default)]
    pub data: HashMap<String, UploadEntry>,
    #[serde(default)]
    pub last_uploaded: Vec<String>,
}

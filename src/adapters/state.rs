use axum::extract::FromRef;
use std::sync::Arc;

use crate::{
    application::services::{metadata_store::MetadataStore, StorageService},
    domain::config::{local::LocalConfig, secrets::Secrets},
};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub secrets: Arc<Secrets>,
    pub local_config: Arc<LocalConfig>,
    pub metadata_store: Arc<MetadataStore>,
    pub storage_service: Arc<dyn StorageService>,
}

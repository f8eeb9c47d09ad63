pub mod auth_gate;
pub mod code_allocator;
pub mod metadata_store;
pub mod storage_service;
pub mod upload_service;
pub mod upload_validator;

pub use storage_service::StorageService;

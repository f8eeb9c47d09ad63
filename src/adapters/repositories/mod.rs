mod json_metadata_repository;

pub use json_metadata_repository::JsonMetadataRepository;

pub mod metadata_repository;

pub mod duration;
pub mod entry;
pub mod expiration;
pub mod file;
pub mod snapshot;

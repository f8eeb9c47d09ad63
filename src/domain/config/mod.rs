pub mod local;
pub mod secrets;

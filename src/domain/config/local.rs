use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error("missing required setting {0}")]
    Missing(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Provider {
    Disk,
    Supabase,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Disk => "disk",
            Provider::Supabase => "supabase",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LocalConfig {
    pub port: u16,
    pub provider: Provider,
    pub data_dir: PathBuf,
    pub metadata_file: PathBuf,
    pub max_upload_bytes: usize,
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl LocalConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let provider = match lookup("STORAGE_PROVIDER").as_deref() {
            None | Some("disk") => Provider::Disk,
            Some("supabase") => Provider::Supabase,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    key: "STORAGE_PROVIDER",
                    value: other.to_string(),
                })
            }
        };

        let data_dir = lookup("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./data"));

        let metadata_file = lookup("METADATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("metadata.json"));

        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(value) => value
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "MAX_UPLOAD_BYTES",
                    value,
                })?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect()
        });

        Ok(LocalConfig {
            port,
            provider,
            data_dir,
            metadata_file,
            max_upload_bytes,
            cors_allowed_origins,
        })
    }
}

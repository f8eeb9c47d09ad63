use crate::domain::config::local::{ConfigError, Provider};

#[derive(Debug, Clone)]
pub struct SupabaseSecrets {
    pub storage_url: String,
    pub api_key: String,
    pub bucket_name: String,
}

#[derive(Debug, Clone, Default)]
pub struct Secrets {
    /// Pre-shared upload key. Empty disables the check.
    pub secret_key: String,
    pub supabase_secrets: Option<SupabaseSecrets>,
}

impl Secrets {
    pub fn from_env(provider: Provider) -> Result<Self, ConfigError> {
        Self::from_lookup(provider, |key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(provider: Provider, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret_key = lookup("SECRET_KEY").unwrap_or_default();

        let supabase_secrets = match provider {
            Provider::Disk => None,
            Provider::Supabase => Some(SupabaseSecrets {
                storage_url: lookup("SUPABASE_STORAGE_URL")
                    .ok_or(ConfigError::Missing("SUPABASE_STORAGE_URL"))?,
                api_key: lookup("SUPABASE_API_KEY")
                    .ok_or(ConfigError::Missing("SUPABASE_API_KEY"))?,
                bucket_name: lookup("SUPABASE_BUCKET")
                    .ok_or(ConfigError::Missing("SUPABASE_BUCKET"))?,
            }),
        };

        Ok(Secrets {
            secret_key,
            supabase_secrets,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_defaults_to_empty() {
        let secrets = Secrets::from_lookup(Provider::Disk, |_| None).unwrap();
        assert_eq!(secrets.secret_key, "");
        assert!(secrets.supabase_secrets.is_none());
    }

    #[test]
    fn test_supabase_requires_credentials() {
        let result = Secrets::from_lookup(Provider::Supabase, |key| match key {
            "SUPABASE_STORAGE_URL" => Some("https://x.supabase.co/storage/v1".to_string()),
            _ => None,
        });
        assert!(matches!(result, Err(ConfigError::Missing("SUPABASE_API_KEY"))));
    }

    #[test]
    fn test_supabase_secrets_loaded() {
        let secrets = Secrets::from_lookup(Provider::Supabase, |key| match key {
            "SECRET_KEY" => Some("S".to_string()),
            "SUPABASE_STORAGE_URL" => Some("https://x.supabase.co/storage/v1".to_string()),
            "SUPABASE_API_KEY" => Some("key".to_string()),
            "SUPABASE_BUCKET" => Some("drops".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(secrets.secret_key, "S");
        let supabase = secrets.supabase_secrets.unwrap();
        assert_eq!(supabase.bucket_name, "drops");
    }
}

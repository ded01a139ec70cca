//! Persistence store configuration (Supabase REST)

use serde::Deserialize;

use super::error::ValidationError;

/// Supabase store configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    /// Project base URL (`https://<project>.supabase.co`)
    pub supabase_url: String,

    /// Service role key used for server-side writes
    pub service_key: String,
}

impl StoreConfig {
    /// Validate store configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.supabase_url.is_empty() {
            return Err(ValidationError::MissingRequired("STORE__SUPABASE_URL"));
        }
        if self.service_key.is_empty() {
            return Err(ValidationError::MissingRequired("STORE__SERVICE_KEY"));
        }
        if !self.supabase_url.starts_with("http://") && !self.supabase_url.starts_with("https://") {
            return Err(ValidationError::InvalidStoreUrl);
        }
        Ok(())
    }
}

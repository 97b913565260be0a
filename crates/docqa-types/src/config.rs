use serde::{Deserialize, Serialize};

/// Backend base URL baked in at build time, if any.
const BUILD_API_URL: Option<&str> = option_env!("DOCQA_API_URL");

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TOKEN_KEY: &str = "userToken";

/// Top-level client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the question-answering backend
    pub api_url: String,
    /// Browser storage key holding the bearer token
    pub token_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: BUILD_API_URL.unwrap_or(DEFAULT_API_URL).to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
        }
    }
}

impl ClientConfig {
    /// Parse a stored JSON override. Missing fields keep their defaults.
    pub fn from_json(data: &str) -> crate::Result<Self> {
        let config: ClientConfig = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(crate::ClientError::Config("api_url is empty".to_string()));
        }
        if self.token_key.is_empty() {
            return Err(crate::ClientError::Config("token_key is empty".to_string()));
        }
        Ok(())
    }
}

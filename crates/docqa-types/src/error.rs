use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// The request never produced an HTTP response (DNS, CORS, offline...)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response. Displays as the backend-supplied message only.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid session token: {0}")]
    Token(String),

    #[error("{0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JS interop error: {0}")]
    JsInterop(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the backend rejected the bearer credential.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            ClientError::Api { message, .. } => {
                self.status() == Some(401) || message.contains("Could not validate credentials")
            }
            _ => false,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Serialization(e.to_string())
    }
}

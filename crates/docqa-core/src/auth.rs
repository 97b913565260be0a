//! Login and registration forms.

use docqa_types::{ClientError, Result, event::AppEvent};

use crate::ports::ApiPort;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Credentials ready to be posted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub error: Option<String>,
    /// Informational banner, e.g. after registering
    pub notice: Option<String>,
    pub submitting: bool,
}

impl LoginForm {
    pub fn begin_submit(&mut self) -> Option<Credentials> {
        if self.submitting {
            return None;
        }
        self.error = None;
        let username = self.username.trim();
        if username.is_empty() || self.password.is_empty() {
            self.error = Some("Please enter a username and password.".to_string());
            return None;
        }
        self.submitting = true;
        Some(Credentials {
            username: username.to_string(),
            password: self.password.clone(),
        })
    }

    /// Called once the token has been accepted (or rejected) by the session.
    pub fn finish(&mut self, error: Option<String>) {
        self.submitting = false;
        match error {
            Some(message) => self.error = Some(message),
            None => {
                self.password.clear();
                self.error = None;
                self.notice = None;
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub agree_terms: bool,
    pub show_password: bool,
    pub error: Option<String>,
    pub submitting: bool,
}

impl RegisterForm {
    fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(ClientError::Validation("Please enter a username.".to_string()));
        }
        if self.password != self.confirm_password {
            return Err(ClientError::Validation("Passwords do not match.".to_string()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ClientError::Validation("Password must be at least 6 characters.".to_string()));
        }
        if !self.agree_terms {
            return Err(ClientError::Validation("Please accept the terms of use.".to_string()));
        }
        Ok(())
    }

    pub fn begin_submit(&mut self) -> Option<Credentials> {
        if self.submitting {
            return None;
        }
        if let Err(e) = self.validate() {
            self.error = Some(e.to_string());
            return None;
        }
        self.error = None;
        self.submitting = true;
        Some(Credentials {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        })
    }

    pub fn apply(&mut self, event: &AppEvent) {
        match event {
            AppEvent::RegisterSucceeded { .. } => *self = Self::default(),
            AppEvent::RegisterFailed { message } => {
                self.submitting = false;
                self.error = Some(message.clone());
            }
            _ => {}
        }
    }
}

pub async fn login(api: &dyn ApiPort, credentials: Credentials) -> AppEvent {
    match api.login(&credentials.username, &credentials.password).await {
        Ok(resp) => AppEvent::LoginSucceeded { token: resp.access_token },
        Err(e) => AppEvent::LoginFailed { message: e.to_string() },
    }
}

pub async fn register(api: &dyn ApiPort, credentials: Credentials) -> AppEvent {
    match api.register(&credentials.username, &credentials.password).await {
        Ok(()) => AppEvent::RegisterSucceeded { username: credentials.username },
        Err(e) => AppEvent::RegisterFailed { message: e.to_string() },
    }
}

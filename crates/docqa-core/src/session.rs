//! Session store.
//!
//! The persisted token is the single source of truth. The decoded
//! `Session` is a projection of it and is recomputed whenever the token
//! is read, written or cleared.

use std::rc::Rc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use docqa_types::{
    ClientError, Result,
    session::{Role, Session, TokenClaims},
};

use crate::ports::TokenStore;

/// Decode the claims of a JWT-shaped token without verifying its signature.
/// The backend verifies; the client only needs subject and role for routing.
pub fn decode_token(token: &str) -> Result<Session> {
    let mut parts = token.split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => return Err(ClientError::Token("expected three dot-separated segments".to_string())),
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| ClientError::Token(format!("payload is not base64url: {}", e)))?;
    let claims: TokenClaims = serde_json::from_slice(&bytes)
        .map_err(|e| ClientError::Token(format!("payload is not JSON claims: {}", e)))?;

    let subject = claims
        .sub
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ClientError::Token("missing subject claim".to_string()))?;

    Ok(Session {
        token: token.to_string(),
        subject,
        role: Role::from_claim(claims.role.as_deref()),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Initial decode has not run yet
    Loading,
    Anonymous,
    Authenticated(Session),
}

/// Injected session store; created once by the composition root.
pub struct SessionStore {
    tokens: Rc<dyn TokenStore>,
    state: SessionState,
}

impl SessionStore {
    pub fn new(tokens: Rc<dyn TokenStore>) -> Self {
        Self {
            tokens,
            state: SessionState::Loading,
        }
    }

    /// Read the persisted token and populate the session.
    /// A token that cannot be read or decoded means "no session".
    pub fn init(&mut self) {
        self.state = self.derive();
        match &self.state {
            SessionState::Authenticated(s) => {
                log::info!("Session restored for {} ({})", s.subject, s.role.label())
            }
            _ => log::info!("No stored session"),
        }
    }

    /// Re-derive from storage, e.g. after another tab changed it.
    pub fn refresh(&mut self) {
        self.state = self.derive();
    }

    fn derive(&self) -> SessionState {
        let token = match self.tokens.read_token() {
            Ok(Some(t)) if !t.is_empty() => t,
            Ok(_) => return SessionState::Anonymous,
            Err(e) => {
                log::warn!("Token store {} unreadable: {}", self.tokens.backend_name(), e);
                return SessionState::Anonymous;
            }
        };
        match decode_token(&token) {
            Ok(session) => SessionState::Authenticated(session),
            Err(e) => {
                log::warn!("Discarding stored token: {}", e);
                if let Err(e) = self.tokens.clear_token() {
                    log::warn!("Failed to clear stored token: {}", e);
                }
                SessionState::Anonymous
            }
        }
    }

    /// Persist a freshly issued token and project it.
    pub fn login(&mut self, token: &str) -> Result<Session> {
        let session = decode_token(token)?;
        self.tokens.write_token(token)?;
        log::info!("Logged in as {} ({})", session.subject, session.role.label());
        self.state = SessionState::Authenticated(session.clone());
        Ok(session)
    }

    pub fn logout(&mut self) {
        if let Err(e) = self.tokens.clear_token() {
            log::warn!("Failed to clear stored token: {}", e);
        }
        self.state = SessionState::Anonymous;
        log::info!("Logged out");
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == SessionState::Loading
    }

    pub fn current(&self) -> Option<&Session> {
        match &self.state {
            SessionState::Authenticated(s) => Some(s),
            _ => None,
        }
    }
}

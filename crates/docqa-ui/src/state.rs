//! UI-level state that drives rendering.
//! Owns the per-view state machines and is updated each frame by
//! draining the EventBus. Anything that needs the session, the browser or
//! another request is handed back to the app as a `FollowUp`.

use docqa_core::admin::{AdminCommand, AdminState};
use docqa_core::auth::{LoginForm, RegisterForm};
use docqa_core::chat::ChatState;
use docqa_core::guard::Route;
use docqa_types::event::AppEvent;

/// Notice shown on the login form after a successful registration
pub const REGISTERED_NOTICE: &str = "Registration successful. Please sign in.";

/// Work the composition root must do in response to an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUp {
    /// Persist a freshly issued token and enter the app
    AcceptToken(String),
    /// The backend rejected our token
    Logout,
    Navigate(Route),
    Admin(AdminCommand),
    Alert(String),
}

/// State visible to UI panels
pub struct UiState {
    /// Route currently rendered (after guard resolution)
    pub route: Route,
    pub login: LoginForm,
    pub register: RegisterForm,
    pub chat: ChatState,
    pub admin: AdminState,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            route: Route::Chat,
            login: LoginForm::default(),
            register: RegisterForm::default(),
            chat: ChatState::new(),
            admin: AdminState::new(),
        }
    }

    /// Drop everything tied to the previous user.
    pub fn reset_user_views(&mut self) {
        self.chat = ChatState::new();
        self.admin = AdminState::new();
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<AppEvent>) -> Vec<FollowUp> {
        let mut follow_ups = Vec::new();
        for event in events {
            match &event {
                AppEvent::LoginSucceeded { token } => {
                    follow_ups.push(FollowUp::AcceptToken(token.clone()));
                }
                AppEvent::LoginFailed { message } => {
                    self.login.finish(Some(message.clone()));
                }
                AppEvent::RegisterSucceeded { username } => {
                    self.register.apply(&event);
                    self.login.username = username.clone();
                    self.login.password.clear();
                    self.login.error = None;
                    self.login.notice = Some(REGISTERED_NOTICE.to_string());
                    follow_ups.push(FollowUp::Navigate(Route::Login));
                }
                AppEvent::RegisterFailed { .. } => {
                    self.register.apply(&event);
                }
                AppEvent::ThreadsFailed { unauthorized, .. } => {
                    self.chat.apply(&event);
                    if *unauthorized {
                        follow_ups.push(FollowUp::Logout);
                    }
                }
                AppEvent::ReplyFailed { unauthorized, .. } | AppEvent::HistoryFailed { unauthorized, .. } => {
                    self.chat.apply(&event);
                    if *unauthorized {
                        log::info!("Token expired mid-conversation");
                        follow_ups.push(FollowUp::Logout);
                    }
                }
                AppEvent::ThreadActionFailed { message } => {
                    log::warn!("Thread action failed: {}", message);
                    follow_ups.push(FollowUp::Alert(message.clone()));
                }
                AppEvent::DashboardLoaded { .. }
                | AppEvent::DashboardFailed { .. }
                | AppEvent::UploadSucceeded { .. }
                | AppEvent::UploadFailed { .. }
                | AppEvent::CollectionDeleted { .. }
                | AppEvent::CollectionDeleteFailed { .. }
                | AppEvent::DocumentsLoaded { .. }
                | AppEvent::DocumentsFailed { .. } => {
                    if let Some(cmd) = self.admin.apply(&event) {
                        follow_ups.push(FollowUp::Admin(cmd));
                    }
                }
                _ => self.chat.apply(&event),
            }
        }
        follow_ups
    }

    pub fn is_busy(&self) -> bool {
        self.chat.is_busy() || self.admin.loading || self.login.submitting || self.register.submitting
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

//! Routes and the guard that gates them on session state.

use crate::session::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Chat,
    Admin,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Chat => "/",
            Route::Admin => "/admin",
        }
    }

    /// Unknown paths land on the chat view (which is itself guarded).
    pub fn from_path(path: &str) -> Self {
        let path = path.trim_start_matches('#');
        match path.trim_end_matches('/') {
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/admin" => Route::Admin,
            _ => Route::Chat,
        }
    }

    pub fn requirement(&self) -> Option<Requirement> {
        match self {
            Route::Login | Route::Register => None,
            Route::Chat => Some(Requirement::Authenticated),
            Route::Admin => Some(Requirement::Admin),
        }
    }
}

/// What a protected route demands of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Authenticated,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session still being established; show a placeholder
    Loading,
    Redirect(Route),
    Render,
}

pub fn check(state: &SessionState, requirement: Requirement) -> GuardDecision {
    match state {
        SessionState::Loading => GuardDecision::Loading,
        SessionState::Anonymous => GuardDecision::Redirect(Route::Login),
        SessionState::Authenticated(session) => match requirement {
            Requirement::Admin if !session.is_admin() => GuardDecision::Redirect(Route::Chat),
            _ => GuardDecision::Render,
        },
    }
}

/// Resolve the route to show, following redirects.
pub fn resolve(state: &SessionState, route: Route) -> (Route, GuardDecision) {
    let mut current = route;
    // Redirect chains are at most Admin → Chat → Login.
    for _ in 0..3 {
        let decision = match current.requirement() {
            None => GuardDecision::Render,
            Some(req) => check(state, req),
        };
        match decision {
            GuardDecision::Redirect(next) if next != current => current = next,
            other => return (current, other),
        }
    }
    (current, GuardDecision::Render)
}

#[cfg(test)]
mod tests {
    use crate::panels::{admin, chat, login, register, viewer};
    use crate::state::*;
    use docqa_core::admin::{AdminCommand, UploadStatus};
    use docqa_core::chat::Conversation;
    use docqa_core::guard::Route;
    use docqa_types::admin::*;
    use docqa_types::chat::{ChatMessage, Sender, SourceCitation, Thread};
    use docqa_types::event::AppEvent;

    fn thread(id: &str) -> Thread {
        Thread { thread_id: id.to_string(), name: id.to_uppercase(), updated_at: String::new() }
    }

    fn dashboard() -> Dashboard {
        Dashboard {
            db_stats: DbStats {
                total_collections: 1,
                total_documents: 2,
                details: vec![CollectionDetail { name: "rules".to_string(), document_count: 2 }],
            },
            collections: vec![Collection { id: "1".to_string(), name: "rules".to_string() }],
            response_stats: ResponseStats::default(),
            token_stats: TokenUsageStats::default(),
        }
    }

    /// Run one frame with a central panel.
    fn frame(mut body: impl FnMut(&mut egui::Ui)) {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| body(ui));
        });
    }

    // ─── UiState Tests ───────────────────────────────────────

    #[test]
    fn test_ui_state_initial() {
        let state = UiState::new();
        assert_eq!(state.route, Route::Chat);
        assert!(state.chat.threads.is_empty());
        assert!(state.admin.dashboard.is_none());
        assert!(!state.is_busy());
    }

    #[test]
    fn test_login_success_asks_app_to_accept_token() {
        let mut state = UiState::new();
        let follow_ups = state.process_events(vec![AppEvent::LoginSucceeded { token: "jwt".to_string() }]);
        assert_eq!(follow_ups, vec![FollowUp::AcceptToken("jwt".to_string())]);
    }

    #[test]
    fn test_login_failure_shows_error() {
        let mut state = UiState::new();
        state.login.submitting = true;
        let follow_ups = state.process_events(vec![AppEvent::LoginFailed { message: "Login failed.".to_string() }]);
        assert!(follow_ups.is_empty());
        assert!(!state.login.submitting);
        assert_eq!(state.login.error.as_deref(), Some("Login failed."));
    }

    #[test]
    fn test_registration_success_goes_to_login_with_notice() {
        let mut state = UiState::new();
        state.register.username = "carol".to_string();
        state.register.submitting = true;
        let follow_ups = state.process_events(vec![AppEvent::RegisterSucceeded { username: "carol".to_string() }]);
        assert_eq!(follow_ups, vec![FollowUp::Navigate(Route::Login)]);
        assert_eq!(state.login.username, "carol");
        assert_eq!(state.login.notice.as_deref(), Some(REGISTERED_NOTICE));
        assert!(!state.register.submitting);
        assert!(state.register.username.is_empty());
    }

    #[test]
    fn test_unauthorized_thread_list_logs_out() {
        let mut state = UiState::new();
        let follow_ups = state.process_events(vec![AppEvent::ThreadsFailed {
            message: "Could not validate credentials".to_string(),
            unauthorized: true,
        }]);
        assert_eq!(follow_ups, vec![FollowUp::Logout]);

        let follow_ups = state.process_events(vec![AppEvent::ThreadsFailed {
            message: "Internal Server Error".to_string(),
            unauthorized: false,
        }]);
        assert!(follow_ups.is_empty());
        assert_eq!(state.chat.threads_error.as_deref(), Some("Internal Server Error"));
    }

    #[test]
    fn test_expired_token_on_reply_logs_out() {
        let mut state = UiState::new();
        state.chat.input = "hello".to_string();
        let out = state.chat.begin_send().unwrap();
        let follow_ups = state.process_events(vec![AppEvent::ReplyFailed {
            thread_id: out.thread_id,
            message: "Could not validate credentials".to_string(),
            unauthorized: true,
        }]);
        assert_eq!(follow_ups, vec![FollowUp::Logout]);
        assert_eq!(state.chat.messages.len(), 2);
    }

    #[test]
    fn test_bare_401_on_history_logs_out() {
        let mut state = UiState::new();
        state.chat.begin_load("a");
        let follow_ups = state.process_events(vec![AppEvent::HistoryFailed {
            thread_id: "a".to_string(),
            message: "Unauthorized".to_string(),
            unauthorized: true,
        }]);
        assert_eq!(follow_ups, vec![FollowUp::Logout]);

        state.chat.begin_load("b");
        let follow_ups = state.process_events(vec![AppEvent::HistoryFailed {
            thread_id: "b".to_string(),
            message: "Internal Server Error".to_string(),
            unauthorized: false,
        }]);
        assert!(follow_ups.is_empty());
    }

    #[test]
    fn test_thread_action_failure_alerts() {
        let mut state = UiState::new();
        let follow_ups = state.process_events(vec![AppEvent::ThreadActionFailed { message: "nope".to_string() }]);
        assert_eq!(follow_ups, vec![FollowUp::Alert("nope".to_string())]);
    }

    #[test]
    fn test_chat_events_reach_chat_state() {
        let mut state = UiState::new();
        state.process_events(vec![
            AppEvent::ThreadsLoaded { threads: vec![thread("a"), thread("b")] },
            AppEvent::ThreadDeleted { thread_id: "a".to_string() },
        ]);
        assert_eq!(state.chat.threads, vec![thread("b")]);
    }

    #[test]
    fn test_upload_success_requests_refresh() {
        let mut state = UiState::new();
        let follow_ups = state.process_events(vec![AppEvent::UploadSucceeded { collection: "rules".to_string() }]);
        assert_eq!(follow_ups, vec![FollowUp::Admin(AdminCommand::RefreshDashboard)]);
        assert_eq!(state.admin.status, UploadStatus::Success);
        assert!(state.is_busy());
    }

    #[test]
    fn test_reset_user_views() {
        let mut state = UiState::new();
        state.process_events(vec![
            AppEvent::ThreadsLoaded { threads: vec![thread("a")] },
            AppEvent::DashboardLoaded { dashboard: Box::new(dashboard()) },
        ]);
        state.reset_user_views();
        assert!(state.chat.threads.is_empty());
        assert!(state.admin.dashboard.is_none());
    }

    // ─── Panel smoke tests ───────────────────────────────────

    #[test]
    fn test_login_panel_renders_without_action() {
        let mut form = docqa_core::auth::LoginForm::default();
        form.error = Some("Login failed.".to_string());
        frame(|ui| {
            assert!(matches!(login::login_panel(ui, &mut form), login::LoginAction::None));
        });
    }

    #[test]
    fn test_register_panel_renders_without_action() {
        let mut form = docqa_core::auth::RegisterForm::default();
        frame(|ui| {
            assert!(matches!(register::register_panel(ui, &mut form), register::RegisterAction::None));
        });
    }

    #[test]
    fn test_chat_panels_render_messages() {
        let mut state = UiState::new();
        state.process_events(vec![AppEvent::ThreadsLoaded { threads: vec![thread("a")] }]);
        state.chat.begin_load("a");
        state.process_events(vec![AppEvent::HistoryLoaded {
            thread_id: "a".to_string(),
            messages: vec![
                ChatMessage::user("q"),
                ChatMessage {
                    sender: Sender::Ai,
                    text: "answer".to_string(),
                    sources: vec![SourceCitation { name: "rules.pdf".to_string(), url: "https://x".to_string() }],
                    response_time: Some(0.4),
                },
            ],
        }]);
        assert_eq!(state.chat.conversation, Conversation::Loaded { thread_id: "a".to_string() });

        frame(|ui| {
            assert_eq!(chat::thread_sidebar(ui, &mut state.chat), chat::ChatAction::None);
            assert_eq!(chat::conversation_panel(ui, &mut state.chat), chat::ChatAction::None);
        });
    }

    #[test]
    fn test_admin_panel_and_viewer_render() {
        let mut state = UiState::new();
        state.process_events(vec![AppEvent::DashboardLoaded { dashboard: Box::new(dashboard()) }]);
        let _ = state.admin.viewer.open("rules");
        state.process_events(vec![AppEvent::DocumentsLoaded {
            collection: "rules".to_string(),
            page: DocumentPage {
                documents: vec![Document { id: "d1".to_string(), content: "text".to_string(), metadata: None }],
                pagination: Pagination { offset: 0, limit: 10, total: 1, has_next: false },
            },
        }]);

        frame(|ui| {
            assert_eq!(admin::admin_panel(ui, &mut state.admin, false), admin::AdminAction::None);
            assert!(viewer::document_viewer(ui.ctx(), &mut state.admin.viewer).is_none());
        });
        assert!(state.admin.viewer.is_open());
    }
}

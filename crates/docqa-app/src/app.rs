//! Main egui application: routes between views and dispatches backend calls.

use std::future::Future;
use std::rc::Rc;

use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};

use docqa_core::admin::{self, AdminCommand};
use docqa_core::api::ApiClient;
use docqa_core::auth::{self, Credentials};
use docqa_core::chat;
use docqa_core::event_bus::EventBus;
use docqa_core::guard::{self, GuardDecision, Route};
use docqa_core::session::SessionStore;
use docqa_platform::file_picker::FilePicker;
use docqa_platform::watch::StorageWatcher;
use docqa_platform::{auto_detect_token_store, dialog, route, FetchTransport};
use docqa_types::config::ClientConfig;
use docqa_types::event::AppEvent;
use docqa_ui::panels::admin::AdminAction;
use docqa_ui::panels::chat::ChatAction;
use docqa_ui::panels::login::LoginAction;
use docqa_ui::panels::nav::NavAction;
use docqa_ui::panels::register::RegisterAction;
use docqa_ui::panels::{admin as admin_panel, chat as chat_panel, login, nav, register, viewer};
use docqa_ui::state::{FollowUp, UiState};
use docqa_ui::theme;

const UPLOAD_ACCEPT: &str = ".pdf,.doc,.docx,.txt,.md";
const EXTRA_FONT_URL: &str = "NotoSans-Regular.ttf";

/// Build the root app, or a static error screen if wiring fails.
pub fn build(cc: &eframe::CreationContext<'_>) -> Box<dyn eframe::App> {
    let config = docqa_platform::config::load_config();
    match DocqaApp::new(cc, config) {
        Ok(app) => Box::new(app),
        Err(message) => {
            log::error!("Startup failed: {}", message);
            Box::new(StartupFailure { message })
        }
    }
}

/// The main application state
pub struct DocqaApp {
    ui_state: UiState,
    event_bus: EventBus,
    session: SessionStore,
    api: Rc<ApiClient>,
    file_picker: Option<FilePicker>,
    storage_watcher: Option<StorageWatcher>,
    /// Route whose data was last fetched on entry
    entered: Option<Route>,
    first_frame: bool,
}

impl DocqaApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: ClientConfig) -> Result<Self, String> {
        let tokens = auto_detect_token_store(&config.token_key);
        let api = ApiClient::new(&config.api_url, Rc::new(FetchTransport::new()), tokens.clone())
            .map_err(|e| e.to_string())?;
        log::info!("Backend: {}", api.base_url());

        let mut session = SessionStore::new(tokens);
        session.init();

        let repaint_ctx = cc.egui_ctx.clone();
        let file_picker = match FilePicker::new(UPLOAD_ACCEPT, move || repaint_ctx.request_repaint()) {
            Ok(p) => Some(p),
            Err(e) => {
                log::warn!("File picker unavailable: {}", e);
                None
            }
        };

        let repaint_ctx = cc.egui_ctx.clone();
        let storage_watcher =
            match StorageWatcher::new(&config.token_key, move || repaint_ctx.request_repaint()) {
                Ok(w) => Some(w),
                Err(e) => {
                    log::warn!("Cross-tab session sync unavailable: {}", e);
                    None
                }
            };

        let mut ui_state = UiState::new();
        ui_state.route = Route::from_path(&route::current_path());

        Ok(Self {
            ui_state,
            event_bus: EventBus::new(),
            session,
            api: Rc::new(api),
            file_picker,
            storage_watcher,
            entered: None,
            first_frame: true,
        })
    }

    /// Fetch a wider-coverage font from the server and install it into egui.
    fn load_extra_font(ctx: egui::Context) {
        wasm_bindgen_futures::spawn_local(async move {
            let window = match web_sys::window() {
                Some(w) => w,
                None => return,
            };
            let resp = match wasm_bindgen_futures::JsFuture::from(window.fetch_with_str(EXTRA_FONT_URL)).await {
                Ok(r) => r,
                Err(e) => {
                    log::warn!("Failed to fetch {}: {:?}", EXTRA_FONT_URL, e);
                    return;
                }
            };
            let resp: web_sys::Response = resp.into();
            if !resp.ok() {
                log::info!("{} not served, keeping built-in fonts", EXTRA_FONT_URL);
                return;
            }
            let buf = match resp.array_buffer() {
                Ok(p) => match wasm_bindgen_futures::JsFuture::from(p).await {
                    Ok(b) => b,
                    Err(_) => return,
                },
                Err(_) => return,
            };
            let bytes = js_sys::Uint8Array::new(&buf).to_vec();

            let mut fonts = egui::FontDefinitions::default();
            fonts
                .font_data
                .insert("noto_sans".to_owned(), egui::FontData::from_owned(bytes).into());
            fonts
                .families
                .entry(egui::FontFamily::Proportional)
                .or_default()
                .insert(0, "noto_sans".to_owned());

            ctx.set_fonts(fonts);
            ctx.request_repaint();
            log::info!("Extra font loaded");
        });
    }

    // ─── Dispatch ────────────────────────────────────────────

    /// Run a background call and post its outcome to the event bus.
    fn spawn<F>(&self, ctx: &egui::Context, task: F)
    where
        F: Future<Output = AppEvent> + 'static,
    {
        let sender = self.event_bus.sender();
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            sender.emit(task.await);
            ctx.request_repaint();
        });
    }

    fn navigate(&mut self, to: Route) {
        self.ui_state.route = to;
        route::set_path(to.path());
    }

    /// Forget everything shown for the previous user, including results
    /// of calls still in flight.
    fn reset_views(&mut self) {
        let generation = self.event_bus.advance();
        log::debug!("Session generation {}", generation);
        self.ui_state.reset_user_views();
        self.entered = None;
    }

    fn logout(&mut self) {
        self.session.logout();
        self.reset_views();
        self.navigate(Route::Login);
    }

    fn accept_token(&mut self, token: &str) {
        match self.session.login(token) {
            Ok(_) => {
                self.ui_state.login.finish(None);
                self.reset_views();
                self.navigate(Route::Chat);
            }
            Err(e) => {
                log::warn!("Rejected issued token: {}", e);
                self.ui_state.login.finish(Some(e.to_string()));
            }
        }
    }

    fn dispatch_admin(&self, ctx: &egui::Context, command: AdminCommand) {
        let api = self.api.clone();
        match command {
            AdminCommand::RefreshDashboard => {
                self.spawn(ctx, async move { admin::load_dashboard(api.as_ref()).await });
            }
            AdminCommand::FetchDocuments { collection, offset } => {
                self.spawn(ctx, async move { admin::load_documents(api.as_ref(), collection, offset).await });
            }
        }
    }

    fn handle_follow_ups(&mut self, ctx: &egui::Context, follow_ups: Vec<FollowUp>) {
        for follow_up in follow_ups {
            match follow_up {
                FollowUp::AcceptToken(token) => self.accept_token(&token),
                FollowUp::Logout => {
                    log::warn!("Session rejected by the backend, logging out");
                    self.logout();
                }
                FollowUp::Navigate(to) => self.navigate(to),
                FollowUp::Admin(command) => self.dispatch_admin(ctx, command),
                FollowUp::Alert(message) => dialog::alert(&message),
            }
        }
    }

    /// Fetch what a view needs the first time it is shown.
    fn enter_route(&mut self, ctx: &egui::Context, current: Route) {
        if self.entered == Some(current) {
            return;
        }
        self.entered = Some(current);
        let api = self.api.clone();
        match current {
            Route::Chat => {
                self.spawn(ctx, async move { chat::load_threads(api.as_ref()).await });
            }
            Route::Admin => {
                let command = self.ui_state.admin.begin_refresh();
                self.dispatch_admin(ctx, command);
            }
            Route::Login | Route::Register => {}
        }
    }

    fn submit_login(&self, ctx: &egui::Context, credentials: Credentials) {
        let api = self.api.clone();
        self.spawn(ctx, async move { auth::login(api.as_ref(), credentials).await });
    }

    fn submit_register(&self, ctx: &egui::Context, credentials: Credentials) {
        let api = self.api.clone();
        self.spawn(ctx, async move { auth::register(api.as_ref(), credentials).await });
    }

    fn handle_chat_action(&mut self, ctx: &egui::Context, action: ChatAction) {
        let api = self.api.clone();
        match action {
            ChatAction::None => {}
            ChatAction::Open(thread_id) => {
                self.spawn(ctx, async move { chat::load_history(api.as_ref(), thread_id).await });
            }
            ChatAction::Send(outgoing) => {
                self.spawn(ctx, async move { chat::send_message(api.as_ref(), outgoing).await });
            }
            ChatAction::Rename(draft) => {
                self.spawn(ctx, async move { chat::rename_thread(api.as_ref(), draft).await });
            }
            ChatAction::ConfirmDelete(thread) => {
                if dialog::confirm(&format!("Delete the conversation \"{}\"?", thread.name)) {
                    let id = thread.thread_id;
                    self.spawn(ctx, async move { chat::delete_thread(api.as_ref(), id).await });
                }
            }
            ChatAction::ConfirmDeleteSelected(ids) => {
                if dialog::confirm(&format!("Delete {} selected conversation(s)?", ids.len())) {
                    self.spawn(ctx, async move { chat::delete_threads(api.as_ref(), ids).await });
                }
            }
        }
    }

    fn handle_admin_action(&mut self, ctx: &egui::Context, action: AdminAction) {
        match action {
            AdminAction::None => {}
            AdminAction::Refresh => {
                let command = self.ui_state.admin.begin_refresh();
                self.dispatch_admin(ctx, command);
            }
            AdminAction::ChooseFile => match &self.file_picker {
                Some(picker) => picker.open(),
                None => dialog::alert("File selection is not available in this browser."),
            },
            AdminAction::Upload(job) => {
                let api = self.api.clone();
                self.spawn(ctx, async move { admin::upload(api.as_ref(), job).await });
            }
            AdminAction::ConfirmDeleteCollection(name) => {
                let prompt = format!("Delete the collection \"{}\" and all of its documents?", name);
                if dialog::confirm(&prompt) {
                    let api = self.api.clone();
                    self.spawn(ctx, async move { admin::delete_collection(api.as_ref(), name).await });
                }
            }
            AdminAction::Fetch(command) => self.dispatch_admin(ctx, command),
        }
    }

    // ─── Views ───────────────────────────────────────────────

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        let session = match self.session.current() {
            Some(s) => s.clone(),
            None => return,
        };
        let mut action = NavAction::None;
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            action = nav::top_bar(ui, &session, self.ui_state.route);
        });
        match action {
            NavAction::None => {}
            NavAction::Go(to) => self.navigate(to),
            NavAction::Logout => self.logout(),
        }
    }

    fn show_chat(&mut self, ctx: &egui::Context) {
        let mut actions = Vec::new();
        SidePanel::left("threads_panel")
            .default_width(theme::SIDEBAR_WIDTH)
            .show(ctx, |ui| {
                actions.push(chat_panel::thread_sidebar(ui, &mut self.ui_state.chat));
            });
        CentralPanel::default().show(ctx, |ui| {
            actions.push(chat_panel::conversation_panel(ui, &mut self.ui_state.chat));
        });
        chat_panel::source_preview(ctx, &mut self.ui_state.chat);

        for action in actions {
            self.handle_chat_action(ctx, action);
        }
    }

    fn show_admin(&mut self, ctx: &egui::Context) {
        if let Some(file) = self.file_picker.as_ref().and_then(|p| p.take()) {
            self.ui_state.admin.form.file = Some(file);
        }
        let picking = self.file_picker.as_ref().map(|p| p.is_reading()).unwrap_or(false);

        let mut action = AdminAction::None;
        CentralPanel::default().show(ctx, |ui| {
            action = admin_panel::admin_panel(ui, &mut self.ui_state.admin, picking);
        });
        if let Some(command) = viewer::document_viewer(ctx, &mut self.ui_state.admin.viewer) {
            self.dispatch_admin(ctx, command);
        }
        self.handle_admin_action(ctx, action);
    }
}

impl eframe::App for DocqaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            Self::load_extra_font(ctx.clone());
            self.first_frame = false;
        }

        // Another tab logged in or out
        if self.storage_watcher.as_ref().map(|w| w.take_changed()).unwrap_or(false) {
            let before = self.session.current().map(|s| s.subject.clone());
            self.session.refresh();
            if self.session.current().map(|s| s.subject.clone()) != before {
                log::info!("Session changed in another tab");
                self.reset_views();
            }
        }

        // Drain results of background calls
        let events = self.event_bus.drain();
        if !events.is_empty() {
            let follow_ups = self.ui_state.process_events(events);
            self.handle_follow_ups(ctx, follow_ups);
            ctx.request_repaint();
        }

        // Keep spinners moving while calls are outstanding
        if self.ui_state.is_busy() {
            ctx.request_repaint();
        }

        // Back/forward and manual hash edits
        let requested = Route::from_path(&route::current_path());
        if requested != self.ui_state.route {
            self.ui_state.route = requested;
        }

        let (current, decision) = guard::resolve(self.session.state(), self.ui_state.route);
        if current != self.ui_state.route {
            self.navigate(current);
        }

        match decision {
            GuardDecision::Loading | GuardDecision::Redirect(_) => {
                CentralPanel::default().show(ctx, |ui| {
                    ui.centered_and_justified(|ui| ui.spinner());
                });
                return;
            }
            GuardDecision::Render => {}
        }

        self.enter_route(ctx, current);

        match current {
            Route::Login => {
                let mut action = LoginAction::None;
                CentralPanel::default().show(ctx, |ui| {
                    action = login::login_panel(ui, &mut self.ui_state.login);
                });
                match action {
                    LoginAction::None => {}
                    LoginAction::Submit(credentials) => self.submit_login(ctx, credentials),
                    LoginAction::GoToRegister => self.navigate(Route::Register),
                }
            }
            Route::Register => {
                let mut action = RegisterAction::None;
                CentralPanel::default().show(ctx, |ui| {
                    action = register::register_panel(ui, &mut self.ui_state.register);
                });
                match action {
                    RegisterAction::None => {}
                    RegisterAction::Submit(credentials) => self.submit_register(ctx, credentials),
                    RegisterAction::GoToLogin => self.navigate(Route::Login),
                }
            }
            Route::Chat => {
                self.show_top_bar(ctx);
                self.show_chat(ctx);
            }
            Route::Admin => {
                self.show_top_bar(ctx);
                self.show_admin(ctx);
            }
        }
    }
}

/// Shown instead of the console when the configuration is unusable.
struct StartupFailure {
    message: String,
}

impl eframe::App for StartupFailure {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(80.0);
                ui.heading(RichText::new("DocQA could not start").color(theme::ERROR));
                ui.label(RichText::new(&self.message).color(theme::TEXT_SECONDARY));
                ui.label(
                    RichText::new(format!(
                        "Check the \"{}\" entry in localStorage.",
                        docqa_platform::config::CONFIG_STORAGE_KEY
                    ))
                    .color(theme::TEXT_SECONDARY)
                    .small(),
                );
            });
        });
    }
}

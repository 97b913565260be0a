//! Chat view: thread sidebar, conversation and input field.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use docqa_core::chat::{ChatState, Conversation, Outgoing, RenameDraft};
use docqa_types::chat::{ChatMessage, Sender, Thread};
use crate::theme::*;

/// What the caller should do after rendering the chat view
#[derive(Debug, Clone, PartialEq)]
pub enum ChatAction {
    None,
    /// Fetch history for a thread the state machine just started loading
    Open(String),
    Send(Outgoing),
    Rename(RenameDraft),
    /// Ask for confirmation, then delete
    ConfirmDelete(Thread),
    ConfirmDeleteSelected(Vec<String>),
}

// ─── Sidebar ─────────────────────────────────────────────────

pub fn thread_sidebar(ui: &mut egui::Ui, chat: &mut ChatState) -> ChatAction {
    let mut action = ChatAction::None;

    ui.horizontal(|ui| {
        ui.label(RichText::new("Conversations").color(TEXT_PRIMARY).strong());
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            let label = if chat.selection_mode { "Cancel" } else { "Select" };
            if ui.small_button(label).clicked() {
                chat.toggle_selection_mode();
            }
        });
    });

    let new_chat = egui::Button::new(RichText::new("+ New conversation").color(TEXT_PRIMARY))
        .fill(ACCENT)
        .corner_radius(PANEL_ROUNDING)
        .min_size(Vec2::new(ui.available_width(), 28.0));
    if ui.add_enabled(!chat.is_busy(), new_chat).clicked() {
        chat.start_new_conversation();
    }

    if chat.selection_mode {
        let count = chat.selected_count();
        let delete = egui::Button::new(
            RichText::new(format!("Delete selected ({})", count)).color(TEXT_PRIMARY),
        )
        .fill(if count > 0 { ERROR } else { BG_SURFACE })
        .corner_radius(PANEL_ROUNDING);
        if ui.add_enabled(count > 0, delete).clicked() {
            if let Some(ids) = chat.batch_delete_ids() {
                action = ChatAction::ConfirmDeleteSelected(ids);
            }
        }
    }

    if let Some(error) = &chat.threads_error {
        ui.label(RichText::new(error).color(ERROR).small());
    }

    ui.separator();

    let threads = chat.threads.clone();
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            if threads.is_empty() {
                ui.label(RichText::new("No conversations yet").color(TEXT_SECONDARY).italics());
            }
            for thread in &threads {
                let row = thread_row(ui, chat, thread);
                if row != ChatAction::None {
                    action = row;
                }
            }
        });

    action
}

fn thread_row(ui: &mut egui::Ui, chat: &mut ChatState, thread: &Thread) -> ChatAction {
    let mut action = ChatAction::None;
    let is_open = chat.current_thread() == Some(thread.thread_id.as_str());
    let editing = chat
        .rename
        .as_ref()
        .map(|d| d.thread_id == thread.thread_id)
        .unwrap_or(false);

    egui::Frame::default()
        .fill(if is_open { BG_SELECTED } else { BG_PRIMARY })
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(4.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                if chat.selection_mode {
                    let mut checked = chat.is_selected(&thread.thread_id);
                    if ui.checkbox(&mut checked, "").changed() {
                        chat.toggle_selected(&thread.thread_id);
                    }
                }

                if editing {
                    let (mut commit, mut cancel) = (false, false);
                    if let Some(draft) = chat.rename.as_mut() {
                        let resp = ui.add(
                            egui::TextEdit::singleline(&mut draft.name)
                                .desired_width(ui.available_width() - 60.0),
                        );
                        if resp.lost_focus() {
                            if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                                cancel = true;
                            } else if ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                                commit = true;
                            }
                        }
                    }
                    if ui.small_button("Save").clicked() {
                        commit = true;
                    }
                    if ui.small_button("x").clicked() {
                        cancel = true;
                    }
                    if cancel {
                        chat.cancel_rename();
                    } else if commit {
                        if let Some(draft) = chat.commit_rename() {
                            action = ChatAction::Rename(draft);
                        }
                    }
                    return;
                }

                let name = RichText::new(&thread.name).color(TEXT_PRIMARY);
                if ui.selectable_label(is_open, name).clicked() {
                    if chat.selection_mode {
                        chat.toggle_selected(&thread.thread_id);
                    } else if chat.begin_load(&thread.thread_id) {
                        action = ChatAction::Open(thread.thread_id.clone());
                    }
                }

                if !chat.selection_mode {
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.small_button("Delete").clicked() {
                            action = ChatAction::ConfirmDelete(thread.clone());
                        }
                        if ui.small_button("Rename").clicked() {
                            chat.begin_rename(thread);
                        }
                    });
                }
            });
            if !thread.updated_at.is_empty() {
                ui.label(RichText::new(thread.updated_label()).color(TEXT_SECONDARY).small());
            }
        });

    action
}

// ─── Conversation ────────────────────────────────────────────

pub fn conversation_panel(ui: &mut egui::Ui, chat: &mut ChatState) -> ChatAction {
    let mut action = ChatAction::None;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                // Header
                ui.horizontal(|ui| {
                    let title = chat
                        .current_thread()
                        .and_then(|id| chat.threads.iter().find(|t| t.thread_id == id))
                        .map(|t| t.name.clone())
                        .unwrap_or_else(|| "New conversation".to_string());
                    ui.heading(RichText::new(title).color(TEXT_PRIMARY).strong());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if chat.sending {
                            ui.label(RichText::new("Thinking...").color(WARNING).small());
                        }
                    });
                });

                ui.separator();

                let loading = matches!(chat.conversation, Conversation::Loading { .. });
                let blank = chat.conversation == Conversation::Unselected && chat.messages.is_empty();
                let available_height = ui.available_height() - 60.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        if loading {
                            ui.horizontal(|ui| {
                                ui.spinner();
                                ui.label(RichText::new("Loading conversation...").color(TEXT_SECONDARY));
                            });
                            return;
                        }
                        if blank {
                            ui.add_space(40.0);
                            ui.vertical_centered(|ui| {
                                ui.label(
                                    RichText::new("Ask a question about your documents to start a conversation.")
                                        .color(TEXT_SECONDARY),
                                );
                            });
                            return;
                        }

                        let mut clicked_source = None;
                        for message in &chat.messages {
                            if let Some(url) = render_message(ui, message) {
                                clicked_source = Some(url);
                            }
                            ui.add_space(4.0);
                        }
                        if chat.sending {
                            ui.horizontal(|ui| {
                                ui.spinner();
                                ui.label(RichText::new("Waiting for an answer...").color(TEXT_SECONDARY));
                            });
                        }
                        if let Some(url) = clicked_source {
                            chat.view_source(&url);
                        }
                    });

                ui.add_space(8.0);

                // Input area
                ui.horizontal(|ui| {
                    let input = egui::TextEdit::singleline(&mut chat.input)
                        .hint_text("Type your question...")
                        .desired_width(ui.available_width() - 70.0)
                        .font(egui::FontId::proportional(14.0));
                    let response = ui.add(input);

                    let send_enabled = !chat.input.trim().is_empty() && !chat.is_busy();
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(RichText::new("Send").color(TEXT_PRIMARY))
                            .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );

                    let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if enter || send_btn.clicked() {
                        if let Some(outgoing) = chat.begin_send() {
                            action = ChatAction::Send(outgoing);
                        }
                        response.request_focus();
                    }
                });
            });
        });

    action
}

/// Returns the URL of a source citation the user clicked.
fn render_message(ui: &mut egui::Ui, message: &ChatMessage) -> Option<String> {
    let mut clicked = None;
    let (label, label_color, bg) = match message.sender {
        Sender::User => ("You", ACCENT, USER_BUBBLE),
        Sender::Ai => ("Assistant", SUCCESS, BG_SECONDARY),
    };

    egui::Frame::default()
        .fill(bg)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.label(RichText::new(label).color(label_color).strong().small());
            ui.label(RichText::new(&message.text).color(TEXT_PRIMARY));

            if !message.sources.is_empty() {
                ui.add_space(4.0);
                ui.label(RichText::new("Sources").color(TEXT_SECONDARY).small().strong());
                for source in &message.sources {
                    if source.url.is_empty() {
                        ui.label(RichText::new(&source.name).color(TEXT_SECONDARY).small());
                    } else if ui.link(RichText::new(&source.name).small()).clicked() {
                        clicked = Some(source.url.clone());
                    }
                }
            }

            if let Some(time) = message.response_time_label() {
                ui.label(RichText::new(time).color(TEXT_SECONDARY).small().italics());
            }
        });

    clicked
}

/// Floating preview of the source citation being viewed.
pub fn source_preview(ctx: &egui::Context, chat: &mut ChatState) {
    let url = match &chat.viewing_source {
        Some(url) => url.clone(),
        None => return,
    };

    let mut open = true;
    egui::Window::new("Source")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(RichText::new(&url).monospace().small().color(TEXT_SECONDARY));
            ui.add_space(4.0);
            ui.add(egui::Hyperlink::from_label_and_url("Open in new tab", &url).open_in_new_tab(true));
        });
    if !open {
        chat.viewing_source = None;
    }
}

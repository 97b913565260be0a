//! Admin dashboard: usage statistics, upload form, collection table.

use egui::{self, Align, Grid, Layout, RichText, ScrollArea, Vec2};
use docqa_core::admin::{AdminCommand, AdminState, UploadJob, UploadStatus};
use docqa_types::admin::Dashboard;
use crate::theme::*;

/// What the caller should do after rendering the dashboard
#[derive(Debug, Clone, PartialEq)]
pub enum AdminAction {
    None,
    Refresh,
    /// Open the native file dialog
    ChooseFile,
    Upload(UploadJob),
    /// Ask for confirmation, then delete
    ConfirmDeleteCollection(String),
    Fetch(AdminCommand),
}

pub fn admin_panel(ui: &mut egui::Ui, admin: &mut AdminState, picking_file: bool) -> AdminAction {
    let mut action = AdminAction::None;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.heading(RichText::new("Administration").color(TEXT_PRIMARY).strong());
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.add_enabled(!admin.loading, egui::Button::new("Refresh")).clicked() {
                        action = AdminAction::Refresh;
                    }
                    if admin.loading {
                        ui.spinner();
                    }
                });
            });
            ui.separator();

            if let Some(error) = &admin.dashboard_error {
                error_banner(ui, &format!("Could not load the dashboard: {}", error));
                ui.add_space(8.0);
            }

            if let Some(dashboard) = &admin.dashboard {
                stats_section(ui, dashboard);
                ui.add_space(12.0);
            } else if admin.loading {
                ui.label(RichText::new("Loading statistics...").color(TEXT_SECONDARY));
            }

            let upload = upload_section(ui, admin, picking_file);
            if upload != AdminAction::None {
                action = upload;
            }

            ui.add_space(12.0);

            if let Some(dashboard) = &admin.dashboard {
                let table = collections_section(ui, dashboard, admin.viewer.collection());
                if let Some(table_action) = table {
                    action = match table_action {
                        TableAction::View(name) => AdminAction::Fetch(admin.viewer.open(&name)),
                        TableAction::Delete(name) => AdminAction::ConfirmDeleteCollection(name),
                    };
                }
            }
        });

    action
}

fn stat_card(ui: &mut egui::Ui, title: &str, value: String, detail: Option<String>) {
    egui::Frame::default()
        .fill(BG_SECONDARY)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.set_min_width(160.0);
            ui.label(RichText::new(title).color(TEXT_SECONDARY).small());
            ui.label(RichText::new(value).color(TEXT_PRIMARY).strong().size(20.0));
            if let Some(detail) = detail {
                ui.label(RichText::new(detail).color(TEXT_SECONDARY).small());
            }
        });
}

fn stats_section(ui: &mut egui::Ui, dashboard: &Dashboard) {
    let db = &dashboard.db_stats;
    let rt = &dashboard.response_stats;
    let tokens = &dashboard.token_stats;

    ui.horizontal_wrapped(|ui| {
        stat_card(ui, "Collections", db.total_collections.to_string(), None);
        stat_card(ui, "Documents", db.total_documents.to_string(), None);
        stat_card(
            ui,
            "Average response",
            format!("{:.2} s", rt.average_response_time),
            Some(format!(
                "fastest {:.2} s, slowest {:.2} s",
                rt.fastest_response_time, rt.slowest_response_time
            )),
        );
        stat_card(ui, "Answers", rt.total_ai_messages.to_string(), None);
        stat_card(
            ui,
            "Tokens used",
            tokens.grand_total_tokens.to_string(),
            Some(format!(
                "prompt {} / completion {}",
                tokens.total_prompt_tokens, tokens.total_completion_tokens
            )),
        );
        stat_card(ui, "LLM calls", tokens.total_llm_calls.to_string(), None);
    });
}

fn upload_section(ui: &mut egui::Ui, admin: &mut AdminState, picking_file: bool) -> AdminAction {
    let mut action = AdminAction::None;
    let uploading = admin.status == UploadStatus::Uploading;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.label(RichText::new("Upload document").color(ACCENT).strong());
            ui.add_space(4.0);

            ui.add_enabled_ui(!uploading, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("Choose file...").clicked() {
                        action = AdminAction::ChooseFile;
                    }
                    let file_label = match (&admin.form.file, picking_file) {
                        (_, true) => "Reading file...".to_string(),
                        (Some(file), false) => format!("{} ({})", file.name, file.size_label()),
                        (None, false) => "No file chosen".to_string(),
                    };
                    ui.label(RichText::new(file_label).color(TEXT_SECONDARY));
                });

                ui.label(RichText::new("Collection name").color(TEXT_SECONDARY).small());
                ui.add(
                    egui::TextEdit::singleline(&mut admin.form.collection_name)
                        .hint_text("e.g. Admission Rules 2025")
                        .desired_width(FORM_WIDTH),
                );
                ui.label(RichText::new("Source URL (optional)").color(TEXT_SECONDARY).small());
                ui.add(
                    egui::TextEdit::singleline(&mut admin.form.source_url)
                        .hint_text("https://drive.google.com/...")
                        .desired_width(FORM_WIDTH),
                );
                ui.add_space(4.0);

                let label = if uploading { "Uploading..." } else { "Upload" };
                let button = egui::Button::new(RichText::new(label).color(TEXT_PRIMARY))
                    .fill(ACCENT)
                    .corner_radius(PANEL_ROUNDING)
                    .min_size(Vec2::new(120.0, 28.0));
                if ui.add(button).clicked() {
                    if let Some(job) = admin.begin_upload() {
                        action = AdminAction::Upload(job);
                    }
                }
            });

            if !admin.message.is_empty() {
                let color = match admin.status {
                    UploadStatus::Success => SUCCESS,
                    UploadStatus::Error => ERROR,
                    UploadStatus::Uploading => WARNING,
                    UploadStatus::Idle => TEXT_SECONDARY,
                };
                ui.label(RichText::new(&admin.message).color(color));
            }
        });

    action
}

enum TableAction {
    View(String),
    Delete(String),
}

fn collections_section(
    ui: &mut egui::Ui,
    dashboard: &Dashboard,
    viewing: Option<&str>,
) -> Option<TableAction> {
    let mut action = None;
    let rows = dashboard.rows();

    ui.label(RichText::new("Collections").color(ACCENT).strong());
    ui.add_space(4.0);

    if rows.is_empty() {
        ui.label(RichText::new("No collections yet").color(TEXT_SECONDARY).italics());
        return None;
    }

    Grid::new("collections_table")
        .striped(true)
        .num_columns(4)
        .spacing(Vec2::new(16.0, 6.0))
        .show(ui, |ui| {
            ui.label(RichText::new("ID").color(TEXT_SECONDARY).strong());
            ui.label(RichText::new("Name").color(TEXT_SECONDARY).strong());
            ui.label(RichText::new("Documents").color(TEXT_SECONDARY).strong());
            ui.label("");
            ui.end_row();

            for row in &rows {
                ui.label(RichText::new(&row.id).monospace().small());
                let name = RichText::new(&row.name).color(TEXT_PRIMARY);
                ui.label(if viewing == Some(row.name.as_str()) { name.strong() } else { name });
                ui.label(row.count_label());
                ui.horizontal(|ui| {
                    if ui.small_button("View").clicked() {
                        action = Some(TableAction::View(row.name.clone()));
                    }
                    if ui.small_button(RichText::new("Delete").color(ERROR)).clicked() {
                        action = Some(TableAction::Delete(row.name.clone()));
                    }
                });
                ui.end_row();
            }
        });

    action
}

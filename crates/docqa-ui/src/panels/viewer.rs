//! Paginated document viewer window for one collection.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use docqa_core::admin::{AdminCommand, DocumentViewer};
use docqa_types::admin::Document;
use crate::theme::*;

const PREVIEW_CHARS: usize = 300;

/// Render the viewer if a collection is open. Returns a page fetch to dispatch.
pub fn document_viewer(ctx: &egui::Context, viewer: &mut DocumentViewer) -> Option<AdminCommand> {
    let collection = viewer.collection()?.to_string();
    let mut command = None;
    let mut open = true;

    egui::Window::new(format!("Collection: {}", collection))
        .id(egui::Id::new("document_viewer"))
        .open(&mut open)
        .collapsible(false)
        .default_size(Vec2::new(640.0, 520.0))
        .show(ctx, |ui| {
            if let Some(error) = &viewer.error {
                error_banner(ui, error);
            }

            let footer_height = 36.0;
            ScrollArea::vertical()
                .max_height(ui.available_height() - footer_height)
                .auto_shrink([false, false])
                .show(ui, |ui| match &viewer.page {
                    None if viewer.loading => {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label(RichText::new("Loading documents...").color(TEXT_SECONDARY));
                        });
                    }
                    None => {}
                    Some(page) if page.documents.is_empty() => {
                        ui.label(RichText::new("This collection has no documents").color(TEXT_SECONDARY).italics());
                    }
                    Some(page) => {
                        for doc in &page.documents {
                            document_card(ui, doc);
                            ui.add_space(6.0);
                        }
                    }
                });

            ui.separator();
            ui.horizontal(|ui| {
                let can_prev = !viewer.loading && viewer.prev_offset().is_some();
                let can_next = !viewer.loading && viewer.next_offset().is_some();
                if ui.add_enabled(can_prev, egui::Button::new("< Previous")).clicked() {
                    command = viewer.prev();
                }
                if let Some(page) = &viewer.page {
                    let p = page.pagination;
                    ui.label(
                        RichText::new(format!(
                            "Page {} | {} of {}",
                            p.page(),
                            p.range_label(),
                            p.total
                        ))
                        .color(TEXT_SECONDARY),
                    );
                }
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.add_enabled(can_next, egui::Button::new("Next >")).clicked() {
                        command = viewer.next();
                    }
                    if viewer.loading {
                        ui.spinner();
                    }
                });
            });
        });

    if !open {
        viewer.close();
    }
    command
}

fn document_card(ui: &mut egui::Ui, doc: &Document) {
    egui::Frame::default()
        .fill(BG_SECONDARY)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(format!("ID: {}", doc.id)).monospace().small().color(TEXT_SECONDARY));
            ui.label(RichText::new(doc.preview(PREVIEW_CHARS)).color(TEXT_PRIMARY));

            let metadata = doc.metadata_pairs();
            if !metadata.is_empty() {
                egui::CollapsingHeader::new(RichText::new("Metadata").small())
                    .id_salt(("doc_meta", &doc.id))
                    .show(ui, |ui| {
                        for (key, value) in metadata {
                            ui.horizontal_wrapped(|ui| {
                                ui.label(RichText::new(key).strong().small());
                                ui.label(RichText::new(value).small());
                            });
                        }
                    });
            }
        });
}

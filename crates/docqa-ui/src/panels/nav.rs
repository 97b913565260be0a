//! Top bar: current user, view switcher, logout.

use egui::{self, Align, Layout, RichText};
use docqa_core::guard::Route;
use docqa_types::session::Session;
use crate::theme::*;

pub enum NavAction {
    None,
    Go(Route),
    Logout,
}

pub fn top_bar(ui: &mut egui::Ui, session: &Session, route: Route) -> NavAction {
    let mut action = NavAction::None;

    ui.horizontal(|ui| {
        ui.label(RichText::new("DocQA").color(ACCENT).strong().size(18.0));
        ui.add_space(12.0);

        if ui.selectable_label(route == Route::Chat, "Chat").clicked() && route != Route::Chat {
            action = NavAction::Go(Route::Chat);
        }
        if session.is_admin()
            && ui.selectable_label(route == Route::Admin, "Admin").clicked()
            && route != Route::Admin
        {
            action = NavAction::Go(Route::Admin);
        }

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui.button(RichText::new("Log out").color(TEXT_PRIMARY)).clicked() {
                action = NavAction::Logout;
            }
            ui.label(
                RichText::new(format!("{} ({})", session.subject, session.role.label()))
                    .color(TEXT_SECONDARY)
                    .small(),
            );
        });
    });

    action
}

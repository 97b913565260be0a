//! Login form.

use egui::{self, RichText};
use docqa_core::auth::{Credentials, LoginForm};
use crate::theme::*;

pub enum LoginAction {
    None,
    Submit(Credentials),
    GoToRegister,
}

pub fn login_panel(ui: &mut egui::Ui, form: &mut LoginForm) -> LoginAction {
    let mut action = LoginAction::None;

    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.15);
        egui::Frame::default()
            .fill(BG_SECONDARY)
            .corner_radius(PANEL_ROUNDING)
            .inner_margin(24.0)
            .show(ui, |ui| {
                ui.set_width(FORM_WIDTH);
                ui.heading(RichText::new("Sign in").color(TEXT_PRIMARY).strong());
                ui.add_space(8.0);

                if let Some(notice) = &form.notice {
                    ui.label(RichText::new(notice).color(SUCCESS));
                }
                if let Some(error) = &form.error {
                    error_banner(ui, error);
                }

                ui.add_enabled_ui(!form.submitting, |ui| {
                    ui.label(RichText::new("Username").color(TEXT_SECONDARY).small());
                    ui.add(
                        egui::TextEdit::singleline(&mut form.username)
                            .hint_text("Enter your username")
                            .desired_width(FORM_WIDTH),
                    );
                    ui.label(RichText::new("Password").color(TEXT_SECONDARY).small());
                    let password = ui.add(
                        egui::TextEdit::singleline(&mut form.password)
                            .password(true)
                            .hint_text("Enter your password")
                            .desired_width(FORM_WIDTH),
                    );
                    ui.add_space(8.0);

                    let label = if form.submitting { "Signing in..." } else { "Sign in" };
                    let submit = ui.add(primary_button(label)).clicked()
                        || (password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)));
                    if submit {
                        if let Some(credentials) = form.begin_submit() {
                            action = LoginAction::Submit(credentials);
                        }
                    }
                });

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    ui.label(RichText::new("No account yet?").color(TEXT_SECONDARY));
                    if ui.link("Register").clicked() {
                        action = LoginAction::GoToRegister;
                    }
                });
            });
    });

    action
}

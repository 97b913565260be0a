//! Registration form.

use egui::{self, RichText};
use docqa_core::auth::{Credentials, RegisterForm};
use crate::theme::*;

pub enum RegisterAction {
    None,
    Submit(Credentials),
    GoToLogin,
}

pub fn register_panel(ui: &mut egui::Ui, form: &mut RegisterForm) -> RegisterAction {
    let mut action = RegisterAction::None;

    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.1);
        egui::Frame::default()
            .fill(BG_SECONDARY)
            .corner_radius(PANEL_ROUNDING)
            .inner_margin(24.0)
            .show(ui, |ui| {
                ui.set_width(FORM_WIDTH);
                ui.heading(RichText::new("Create an account").color(TEXT_PRIMARY).strong());
                ui.add_space(8.0);

                if let Some(error) = &form.error {
                    error_banner(ui, error);
                }

                ui.add_enabled_ui(!form.submitting, |ui| {
                    ui.label(RichText::new("Username").color(TEXT_SECONDARY).small());
                    ui.add(
                        egui::TextEdit::singleline(&mut form.username)
                            .hint_text("Choose a username")
                            .desired_width(FORM_WIDTH),
                    );

                    ui.label(RichText::new("Password").color(TEXT_SECONDARY).small());
                    ui.add(
                        egui::TextEdit::singleline(&mut form.password)
                            .password(!form.show_password)
                            .hint_text("At least 6 characters")
                            .desired_width(FORM_WIDTH),
                    );
                    ui.label(RichText::new("Confirm password").color(TEXT_SECONDARY).small());
                    ui.add(
                        egui::TextEdit::singleline(&mut form.confirm_password)
                            .password(!form.show_password)
                            .hint_text("Repeat the password")
                            .desired_width(FORM_WIDTH),
                    );
                    ui.checkbox(&mut form.show_password, "Show passwords");
                    ui.checkbox(&mut form.agree_terms, "I accept the terms of use");
                    ui.add_space(8.0);

                    let label = if form.submitting { "Registering..." } else { "Register" };
                    if ui.add(primary_button(label)).clicked() {
                        if let Some(credentials) = form.begin_submit() {
                            action = RegisterAction::Submit(credentials);
                        }
                    }
                });

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Already registered?").color(TEXT_SECONDARY));
                    if ui.link("Sign in").clicked() {
                        action = RegisterAction::GoToLogin;
                    }
                });
            });
    });

    action
}

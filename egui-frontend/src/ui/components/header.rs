//! # Header Module
//!
//! Top bar of the signed-in view: app title on the left, the user's avatar,
//! name and a logout button on the right.

use eframe::egui;
use shared::User;

use crate::ui::components::theme::colors;

const AVATAR_SIZE: f32 = 32.0;

/// What the user asked for in the header this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    Logout,
}

pub fn render_header(ui: &mut egui::Ui, user: &User) -> Option<HeaderAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        ui.add(
            egui::Label::new(
                egui::RichText::new("Monthly Bank Usage")
                    .font(egui::FontId::new(22.0, egui::FontFamily::Proportional))
                    .strong()
                    .color(colors::TEXT_PRIMARY),
            )
            .selectable(false),
        );

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Logout").clicked() {
                action = Some(HeaderAction::Logout);
            }

            ui.add_space(10.0);
            ui.add(
                egui::Label::new(
                    egui::RichText::new(user.full_name())
                        .font(egui::FontId::new(15.0, egui::FontFamily::Proportional))
                        .color(colors::TEXT_SECONDARY),
                )
                .selectable(false),
            )
            .on_hover_text(&user.email);

            render_avatar(ui, user);
        });
    });

    action
}

/// Photo from the auth provider, or the user's initial in a circle
fn render_avatar(ui: &mut egui::Ui, user: &User) {
    match user.photo_url.as_deref().filter(|url| !url.trim().is_empty()) {
        Some(url) => {
            ui.add(
                egui::Image::new(url)
                    .fit_to_exact_size(egui::vec2(AVATAR_SIZE, AVATAR_SIZE))
                    .rounding(egui::Rounding::same(AVATAR_SIZE / 2.0)),
            );
        }
        None => {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(AVATAR_SIZE, AVATAR_SIZE), egui::Sense::hover());
            let painter = ui.painter();
            painter.circle_filled(rect.center(), AVATAR_SIZE / 2.0, colors::ACCENT);
            let initial = user
                .first_name
                .chars()
                .next()
                .map(|c| c.to_uppercase().to_string())
                .unwrap_or_default();
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                initial,
                egui::FontId::proportional(16.0),
                colors::TEXT_WHITE,
            );
        }
    }
}

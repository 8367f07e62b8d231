use eframe::egui;

use crate::ui::components::theme::colors;

/// Signed-out landing page. Returns true when "Sign in" was clicked.
pub fn render_login_screen(ui: &mut egui::Ui, notice: Option<&str>) -> bool {
    let mut clicked = false;

    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.25);

        ui.label(
            egui::RichText::new("Monthly Bank Usage")
                .font(egui::FontId::new(32.0, egui::FontFamily::Proportional))
                .strong()
                .color(colors::TEXT_PRIMARY),
        );
        ui.add_space(8.0);
        ui.label(
            egui::RichText::new("Track your monthly income and expenses")
                .font(egui::FontId::new(16.0, egui::FontFamily::Proportional))
                .color(colors::TEXT_SECONDARY),
        );
        ui.add_space(30.0);

        let button = egui::Button::new(
            egui::RichText::new("Sign in with Google")
                .font(egui::FontId::new(16.0, egui::FontFamily::Proportional))
                .color(colors::TEXT_WHITE),
        )
        .fill(colors::ACCENT)
        .rounding(egui::Rounding::same(8.0))
        .min_size(egui::vec2(220.0, 44.0));

        if ui.add(button).clicked() {
            clicked = true;
        }

        if let Some(notice) = notice {
            ui.add_space(16.0);
            ui.colored_label(colors::TEXT_ERROR, notice);
        }
    });

    clicked
}

use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::ui::components::theme::{category_color, colors, CURRENT_THEME};
use crate::ui::mappers::{Direction, TransactionRow};

/// Render the transactions of the selected month
pub fn render_transaction_table(ui: &mut egui::Ui, rows: &[TransactionRow]) {
    if rows.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.label(
                egui::RichText::new("No transactions for this month")
                    .font(egui::FontId::new(16.0, egui::FontFamily::Proportional))
                    .color(colors::TEXT_SECONDARY),
            );
        });
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(false)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::exact(110.0)) // DATE
        .column(Column::remainder().at_least(180.0)) // STORE / DESCRIPTION
        .column(Column::exact(160.0)) // CATEGORY
        .column(Column::exact(40.0)) // SOURCE
        .column(Column::exact(130.0)) // AMOUNT
        .header(34.0, |mut header| {
            for title in ["DATE", "DESCRIPTION", "CATEGORY", "", "AMOUNT"] {
                header.col(|ui| {
                    ui.painter().rect_filled(ui.max_rect(), egui::Rounding::ZERO, CURRENT_THEME.table.header);
                    ui.label(egui::RichText::new(title).strong().color(colors::TEXT_SECONDARY));
                });
            }
        })
        .body(|mut body| {
            for row in rows {
                body.row(36.0, |mut table_row| {
                    table_row.col(|ui| {
                        ui.label(egui::RichText::new(&row.date).color(colors::TEXT_SECONDARY));
                    });

                    table_row.col(|ui| {
                        ui.add(egui::Label::new(egui::RichText::new(&row.label).color(colors::TEXT_PRIMARY)).truncate());
                    });

                    table_row.col(|ui| {
                        category_badge(ui, &row.category_name, &row.category_color);
                    });

                    table_row.col(|ui| {
                        ui.label(row.source_badge()).on_hover_text(row.source_hint());
                    });

                    table_row.col(|ui| {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            let prefix = match row.direction {
                                Direction::Income => "+",
                                Direction::Expense => "−",
                            };
                            ui.label(
                                egui::RichText::new(format!("{} {}", prefix, row.amount))
                                    .strong()
                                    .color(CURRENT_THEME.amount_color(row.direction)),
                            );
                        });
                    });
                });
            }
        });
}

fn category_badge(ui: &mut egui::Ui, name: &str, color: &str) {
    let color = category_color(color);
    egui::Frame::none()
        .fill(color.gamma_multiply(0.18))
        .stroke(egui::Stroke::new(1.0, color))
        .rounding(egui::Rounding::same(10.0))
        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(name).small().color(colors::TEXT_PRIMARY));
        });
}

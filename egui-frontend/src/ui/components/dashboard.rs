//! # Dashboard
//!
//! Month navigation bar and the three summary cards (income, expenses, balance).

use eframe::egui;
use shared::Period;

use crate::ui::components::theme::{colors, CURRENT_THEME};
use crate::ui::mappers::{Direction, SummaryCards};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardAction {
    PreviousMonth,
    NextMonth,
    AddTransaction,
}

/// "← March 2025 →" on the left, "+ Add Transaction" on the right
pub fn render_period_bar(ui: &mut egui::Ui, period: Period, loading: bool) -> Option<DashboardAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        let nav_button = |text: &str| {
            egui::Button::new(egui::RichText::new(text).font(egui::FontId::new(18.0, egui::FontFamily::Proportional)))
                .rounding(egui::Rounding::same(6.0))
                .min_size(egui::vec2(36.0, 32.0))
        };

        if ui.add(nav_button("←")).on_hover_text("Previous month").clicked() {
            action = Some(DashboardAction::PreviousMonth);
        }

        ui.add_sized(
            egui::vec2(170.0, 32.0),
            egui::Label::new(
                egui::RichText::new(period.label())
                    .font(egui::FontId::new(18.0, egui::FontFamily::Proportional))
                    .strong()
                    .color(colors::TEXT_PRIMARY),
            )
            .selectable(false),
        );

        if ui.add(nav_button("→")).on_hover_text("Next month").clicked() {
            action = Some(DashboardAction::NextMonth);
        }

        if loading {
            ui.spinner();
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let add_button = egui::Button::new(
                egui::RichText::new("+ Add Transaction")
                    .font(egui::FontId::new(15.0, egui::FontFamily::Proportional))
                    .color(colors::TEXT_WHITE),
            )
            .fill(colors::ACCENT)
            .rounding(egui::Rounding::same(6.0))
            .min_size(egui::vec2(160.0, 32.0));

            if ui.add(add_button).clicked() {
                action = Some(DashboardAction::AddTransaction);
            }
        });
    });

    action
}

pub fn render_summary_cards(ui: &mut egui::Ui, cards: &SummaryCards) {
    let money = &CURRENT_THEME.money;
    let spacing = ui.spacing().item_spacing.x;
    let card_width = ((ui.available_width() - 2.0 * spacing) / 3.0).max(120.0);

    ui.horizontal(|ui| {
        summary_card(ui, card_width, "Income", &cards.income, money.income, money.income_background);
        summary_card(ui, card_width, "Expenses", &cards.expenses, money.expense, money.expense_background);

        let (color, background) = match cards.balance_direction {
            Direction::Income => (money.income, colors::CARD_BACKGROUND),
            Direction::Expense => (money.expense, colors::CARD_BACKGROUND),
        };
        summary_card(ui, card_width, "Balance", &cards.balance, color, background);
    });

    ui.label(
        egui::RichText::new(format!("{} transactions this month", cards.transaction_count))
            .small()
            .color(colors::TEXT_SECONDARY),
    );
}

fn summary_card(
    ui: &mut egui::Ui,
    width: f32,
    title: &str,
    value: &str,
    value_color: egui::Color32,
    background: egui::Color32,
) {
    egui::Frame::none()
        .fill(background)
        .stroke(egui::Stroke::new(1.0, colors::CARD_BORDER))
        .rounding(egui::Rounding::same(10.0))
        .inner_margin(egui::Margin::same(14.0))
        .show(ui, |ui| {
            ui.set_width(width - 28.0);
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(title).color(colors::TEXT_SECONDARY));
                ui.label(
                    egui::RichText::new(value)
                        .font(egui::FontId::new(22.0, egui::FontFamily::Proportional))
                        .strong()
                        .color(value_color),
                );
            });
        });
}

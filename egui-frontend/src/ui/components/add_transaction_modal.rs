//! # Add Transaction Modal
//!
//! Form for entering a transaction by hand.
//!
//! The dialog edits a copy of the draft every frame and hands it back; the
//! coordinator stores it and does all validation, so this module never decides
//! what is a valid transaction.

use eframe::egui;
use egui_extras::DatePickerButton;

use crate::ui::components::theme::{colors, CURRENT_THEME};
use crate::ui::state::{AddTransactionForm, CategoryLookup, TransactionDraft};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    Submit,
    Cancel,
}

/// Returns the edited draft and the button pressed, if any
pub fn render_add_transaction_modal(
    ctx: &egui::Context,
    form: &AddTransactionForm,
    categories: &CategoryLookup,
) -> (TransactionDraft, Option<ModalAction>) {
    let mut draft = form.draft.clone();
    let mut action = None;
    let mut open = true;

    egui::Window::new("Add Transaction")
        .collapsible(false)
        .resizable(false)
        .open(&mut open)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .default_width(380.0)
        .show(ctx, |ui| {
            ui.add_enabled_ui(!form.submitting, |ui| {
                render_direction_toggle(ui, &mut draft);
                ui.add_space(8.0);

                egui::Grid::new("add_transaction_fields")
                    .num_columns(2)
                    .spacing(egui::vec2(12.0, 10.0))
                    .show(ui, |ui| {
                        ui.label("Amount");
                        let amount = ui.add(
                            egui::TextEdit::singleline(&mut draft.amount)
                                .hint_text("0,00")
                                .desired_width(200.0),
                        );
                        if amount.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                            action = Some(ModalAction::Submit);
                        }
                        ui.end_row();

                        ui.label("Store");
                        ui.add(
                            egui::TextEdit::singleline(&mut draft.store)
                                .hint_text("Optional")
                                .desired_width(200.0),
                        );
                        ui.end_row();

                        ui.label("Description");
                        ui.add(
                            egui::TextEdit::singleline(&mut draft.description)
                                .hint_text("Optional")
                                .desired_width(200.0),
                        );
                        ui.end_row();

                        ui.label("Category");
                        render_category_picker(ui, &mut draft, categories);
                        ui.end_row();

                        ui.label("Date");
                        ui.add(DatePickerButton::new(&mut draft.date).id_source("add_transaction_date"));
                        ui.end_row();
                    });
            });

            if let Some(error) = &form.error {
                ui.add_space(6.0);
                ui.colored_label(colors::TEXT_ERROR, error);
            }

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                let submit_text = if form.submitting { "Adding..." } else { "Add" };
                let submit = egui::Button::new(egui::RichText::new(submit_text).color(colors::TEXT_WHITE))
                    .fill(colors::ACCENT)
                    .min_size(egui::vec2(110.0, 32.0));
                if ui.add_enabled(!form.submitting, submit).clicked() {
                    action = Some(ModalAction::Submit);
                }

                if ui
                    .add_enabled(!form.submitting, egui::Button::new("Cancel").min_size(egui::vec2(90.0, 32.0)))
                    .clicked()
                {
                    action = Some(ModalAction::Cancel);
                }
            });
        });

    if !open && !form.submitting {
        action = Some(ModalAction::Cancel);
    }
    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) && !form.submitting {
        action = Some(ModalAction::Cancel);
    }

    (draft, action)
}

fn render_direction_toggle(ui: &mut egui::Ui, draft: &mut TransactionDraft) {
    let money = &CURRENT_THEME.money;
    ui.horizontal(|ui| {
        let expense = egui::RichText::new("Expense").color(if draft.is_income { colors::TEXT_SECONDARY } else { money.expense });
        if ui.selectable_label(!draft.is_income, expense).clicked() {
            draft.set_income(false);
        }

        let income = egui::RichText::new("Income").color(if draft.is_income { money.income } else { colors::TEXT_SECONDARY });
        if ui.selectable_label(draft.is_income, income).clicked() {
            draft.set_income(true);
        }
    });
}

fn render_category_picker(ui: &mut egui::Ui, draft: &mut TransactionDraft, categories: &CategoryLookup) {
    let options = draft.category_options(categories);
    let selected_text = categories
        .get(draft.category_id.as_deref())
        .map(|c| c.display_label())
        .unwrap_or_else(|| "No category".to_string());

    egui::ComboBox::from_id_source("add_transaction_category")
        .selected_text(selected_text)
        .width(200.0)
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut draft.category_id, None, "No category");
            for category in options {
                ui.selectable_value(&mut draft.category_id, Some(category.id.clone()), category.display_label());
            }
        });
}

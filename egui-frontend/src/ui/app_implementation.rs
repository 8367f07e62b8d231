//! # Application Shell
//!
//! `eframe::App` implementation. Each frame it renders a snapshot of
//! [`AppState`] and turns clicks into coordinator calls spawned on the tokio
//! runtime, so the UI thread never waits on the backend.
//!
//! ## Screen Flow:
//! 1. Session still resolving: spinner
//! 2. Nobody signed in: login screen
//! 3. Signed in: header, month bar, summary cards, transaction table and the
//!    add-transaction dialog when open

use std::future::Future;

use eframe::egui;
use log::{debug, info};
use tokio::runtime::Handle;

use crate::config::DisplayConfig;
use crate::ui::app_coordinator::AppCoordinator;
use crate::ui::components::*;
use crate::ui::mappers::{DisplayFormat, SummaryCards, TransactionRow};
use crate::ui::state::AppState;

pub struct BankUsageApp {
    coordinator: AppCoordinator,
    runtime: Handle,
    format: DisplayFormat,
}

impl BankUsageApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        coordinator: AppCoordinator,
        runtime: Handle,
        display: &DisplayConfig,
    ) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);
        setup_style(&cc.egui_ctx);

        // Wake the UI whenever background work publishes new state
        let ctx = cc.egui_ctx.clone();
        let mut updates = coordinator.subscribe();
        runtime.spawn(async move {
            while updates.changed().await.is_ok() {
                ctx.request_repaint();
            }
        });

        let app = Self {
            coordinator,
            runtime,
            format: DisplayFormat::from(display),
        };

        info!("🚀 Resolving session");
        app.spawn(|coordinator| async move { coordinator.load_user_data().await });
        app
    }

    fn spawn<F, Fut>(&self, task: F)
    where
        F: FnOnce(AppCoordinator) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.runtime.spawn(task(self.coordinator.clone()));
    }

    fn render_loading_screen(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.4);
            ui.spinner();
            ui.label("Loading...");
        });
    }

    fn render_notice(&self, ui: &mut egui::Ui, notice: &str) {
        ui.horizontal(|ui| {
            ui.colored_label(colors::TEXT_ERROR, format!("⚠ {}", notice));
            if ui.small_button("✕").on_hover_text("Dismiss").clicked() {
                self.coordinator.dismiss_notice();
            }
        });
    }

    fn render_main_view(&self, ctx: &egui::Context, state: &AppState) {
        let Some(user) = state.session.user.as_ref() else {
            return;
        };

        egui::TopBottomPanel::top("header")
            .frame(
                egui::Frame::none()
                    .fill(CURRENT_THEME.layout.header_background)
                    .inner_margin(egui::Margin::symmetric(20.0, 12.0)),
            )
            .show(ctx, |ui| {
                if let Some(HeaderAction::Logout) = render_header(ui, user) {
                    self.spawn(|coordinator| async move { coordinator.logout().await });
                }
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::central_panel(&ctx.style()).inner_margin(egui::Margin::same(20.0)))
            .show(ctx, |ui| {
                if let Some(notice) = &state.notice {
                    self.render_notice(ui, notice);
                    ui.add_space(6.0);
                }

                let refreshing = state.ledger.is_refreshing();
                match render_period_bar(ui, state.period, refreshing) {
                    Some(DashboardAction::PreviousMonth) => {
                        self.spawn(|coordinator| async move { coordinator.previous_month().await })
                    }
                    Some(DashboardAction::NextMonth) => {
                        self.spawn(|coordinator| async move { coordinator.next_month().await })
                    }
                    Some(DashboardAction::AddTransaction) => {
                        self.coordinator.open_add_transaction(chrono::Local::now().date_naive())
                    }
                    None => {}
                }
                if !refreshing && state.ledger.is_stale(state.period) {
                    ui.weak(format!("Figures for {} have not loaded", state.period.label()));
                }
                ui.add_space(12.0);

                render_summary_cards(ui, &SummaryCards::new(&state.ledger.summary_or_default(), &self.format));
                ui.add_space(12.0);

                let rows: Vec<TransactionRow> = state
                    .ledger
                    .transactions
                    .iter()
                    .map(|t| TransactionRow::new(t, &state.categories, &self.format))
                    .collect();
                egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                    render_transaction_table(ui, &rows);
                });
            });

        if let Some(form) = &state.add_transaction {
            let (draft, action) = render_add_transaction_modal(ctx, form, &state.categories);
            self.coordinator.update_draft(draft);
            match action {
                Some(ModalAction::Submit) => self.spawn(|coordinator| async move {
                    if let Err(e) = coordinator.submit_add_transaction().await {
                        debug!("Transaction not added: {}", e);
                    }
                }),
                Some(ModalAction::Cancel) => self.coordinator.close_add_transaction(),
                None => {}
            }
        }
    }
}

impl eframe::App for BankUsageApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let state = self.coordinator.snapshot();

        if state.session.is_authenticated() {
            self.render_main_view(ctx, &state);
            return;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if state.session.loading {
                self.render_loading_screen(ui);
            } else if render_login_screen(ui, state.notice.as_deref()) {
                self.spawn(|coordinator| async move { coordinator.login().await });
            }
        });
    }
}

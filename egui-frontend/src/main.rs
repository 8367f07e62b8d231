use std::sync::Arc;

use anyhow::Context;
use eframe::egui;
use log::{error, info};

use bank_usage::backend::BridgeClient;
use bank_usage::config::AppConfig;
use bank_usage::ui::{AppCoordinator, BankUsageApp};
use shared::Period;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level.as_str())).init();
    info!("Starting Monthly Bank Usage");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("bank-usage-worker")
        .build()
        .context("Failed to start async runtime")?;

    let backend = runtime
        .block_on(BridgeClient::spawn(&config.backend))
        .with_context(|| format!("Failed to launch backend {}", config.backend.command.display()))?;

    let coordinator = AppCoordinator::new(Arc::new(backend), Period::current());
    let handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([760.0, 520.0])
            .with_title("Monthly Bank Usage")
            .with_resizable(true),
        ..Default::default()
    };

    info!("Launching egui window");
    eframe::run_native(
        "Monthly Bank Usage",
        options,
        Box::new(move |cc| {
            let app = BankUsageApp::new(cc, coordinator, handle, &config.display);
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| {
        error!("❌ UI terminated with an error: {}", e);
        anyhow::anyhow!("Failed to run the UI: {}", e)
    })?;

    info!("👋 Shutting down");
    Ok(())
}

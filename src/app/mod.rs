// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Application entry point wiring logging and egui/eframe to launch the editor.

pub mod config;

use eframe::egui;
use egui_phosphor::Variant;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use config::AppConfig;

use crate::models::Resume;
use crate::ui::ResumeBuilderApp;

/// Install the global tracing subscriber.
///
/// An explicit filter wins over `RUST_LOG`; without either, `info` is used.
/// Calling this twice is harmless (the second install is ignored).
pub fn init_tracing(filter: Option<&str>) {
    let filter = filter
        .and_then(|f| EnvFilter::try_new(f).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Bootstrap the desktop application and run the main egui event loop.
pub fn run(config: AppConfig) -> eframe::Result<()> {
    // Register Phosphor icon font.
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, Variant::Regular);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    let resume = if config.start_blank {
        Resume::default()
    } else {
        Resume::starter()
    };
    info!(blank = config.start_blank, "starting resume builder");

    eframe::run_native(
        "Resume Builder",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(ResumeBuilderApp::new(&cc.egui_ctx, resume)))
        }),
    )
}

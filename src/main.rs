// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

mod app;
mod logic;
mod models;
mod mvu;
mod ui;
mod utils;

fn main() -> eframe::Result<()> {
    let config = app::AppConfig::from_args();
    app::init_tracing(config.log_filter.as_deref());
    app::run(config)
}

// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Command-line configuration for the desktop app.

use clap::Parser;

const MIN_WINDOW_SIZE: [f32; 2] = [600.0, 400.0];

/// Desktop resume editor with drag-and-drop ordering and Markdown/Word export.
#[derive(Debug, Parser)]
#[command(name = "resumebuilder", version, about)]
pub struct Cli {
    /// Tracing filter, e.g. `debug` or `resumebuilder::logic=trace`. Defaults to `RUST_LOG`, then `info`.
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,

    /// Start from an empty document instead of the starter sections.
    #[arg(long)]
    pub blank: bool,

    /// Initial window width in logical points.
    #[arg(long, default_value_t = 1024.0)]
    pub window_width: f32,

    /// Initial window height in logical points.
    #[arg(long, default_value_t = 768.0)]
    pub window_height: f32,
}

/// Resolved settings used to bootstrap logging and the UI.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub log_filter: Option<String>,
    pub start_blank: bool,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl AppConfig {
    /// Parse process arguments; exits with usage on invalid input (clap behavior).
    pub fn from_args() -> Self {
        Cli::parse().into()
    }
}

impl From<Cli> for AppConfig {
    fn from(cli: Cli) -> Self {
        let clamp = |value: f32, min: f32| if value.is_finite() { value.max(min) } else { min };
        Self {
            log_filter: cli.log_filter.filter(|f| !f.trim().is_empty()),
            start_blank: cli.blank,
            window_size: [
                clamp(cli.window_width, MIN_WINDOW_SIZE[0]),
                clamp(cli.window_height, MIN_WINDOW_SIZE[1]),
            ],
            min_window_size: MIN_WINDOW_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_starter_document_and_standard_window() {
        let config: AppConfig = Cli::try_parse_from(["resumebuilder"]).unwrap().into();

        assert!(!config.start_blank);
        assert_eq!(config.window_size, [1024.0, 768.0]);
        assert_eq!(config.log_filter, None);
    }

    #[test]
    fn flags_are_applied_and_window_is_clamped() {
        let config: AppConfig = Cli::try_parse_from([
            "resumebuilder",
            "--blank",
            "--log-filter",
            "debug",
            "--window-width",
            "200",
            "--window-height",
            "900",
        ])
        .unwrap()
        .into();

        assert!(config.start_blank);
        assert_eq!(config.log_filter.as_deref(), Some("debug"));
        assert_eq!(config.window_size, [600.0, 900.0]);
    }

    #[test]
    fn blank_log_filter_is_ignored() {
        let config: AppConfig = Cli::try_parse_from(["resumebuilder", "--log-filter", " "])
            .unwrap()
            .into();

        assert_eq!(config.log_filter, None);
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["resumebuilder", "--nope"]).is_err());
    }
}

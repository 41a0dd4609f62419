// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Top-level egui application shell for editing a resume.
//! Handles layout, form controls, and wiring to export.

pub mod components;

use eframe::egui;

use crate::logic::export::{ExportFormat, ensure_extension, suggested_file_name};
use crate::models::Resume;
use crate::mvu::{self, AppModel, Command, Msg};
use crate::ui::components::{personal_info, sections};

/// Stateful egui application for building and exporting a resume.
pub struct ResumeBuilderApp {
    model: AppModel,
    inbox: Vec<Msg>,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
}

impl ResumeBuilderApp {
    /// Spawn the command workers and start editing `resume`.
    ///
    /// Workers wake the UI through `ctx` whenever they finish a command.
    pub fn new(ctx: &egui::Context, resume: Resume) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        // Exports are rare and short; two workers keep one free while another writes.
        for _ in 0..2 {
            let cmd_rx = cmd_rx.clone();
            let msg_tx = msg_tx.clone();
            let ctx = ctx.clone();
            std::thread::spawn(move || {
                for cmd in cmd_rx.iter() {
                    let msg = mvu::run_command(cmd);
                    if msg_tx.send(msg).is_err() {
                        break;
                    }
                    ctx.request_repaint();
                }
            });
        }

        Self {
            model: AppModel::new(resume),
            inbox: Vec::new(),
            cmd_tx,
            msg_rx,
        }
    }
}

impl eframe::App for ResumeBuilderApp {
    /// Applies queued messages in arrival order; drag start must be seen
    /// before the matching drag end.
    fn logic(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_spacing(ctx);

        // Pull messages produced by the command workers.
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            self.inbox.push(msg);
        }

        for msg in std::mem::take(&mut self.inbox) {
            let mut commands = Vec::new();
            mvu::update(&mut self.model, msg, &mut commands);
            for cmd in commands {
                if self.cmd_tx.send(cmd).is_ok() {
                    self.model.pending_commands += 1;
                }
            }
        }
    }

    /// Renders the top bar, error modal, status bar, and the scrollable editor.
    /// Views append their messages to the inbox for the next frame.
    fn ui(&mut self, ui: &mut egui::Ui, _frame: &mut eframe::Frame) {
        let ctx = ui.ctx().clone();

        egui::Panel::top("top_bar").show_inside(ui, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Resume Builder");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    self.render_theme_controls(ui);
                    ui.separator();
                    self.render_export_button(ui, ExportFormat::Word);
                    self.render_export_button(ui, ExportFormat::Markdown);
                });
            });
            ui.add_space(4.0);
        });

        self.render_error_modal(&ctx);

        egui::Panel::bottom("status_panel")
            .resizable(false)
            .show_inside(ui, |ui| {
                self.render_status(ui);
            });

        egui::CentralPanel::default().show_inside(ui, |ui| {
            ui.add_space(8.0);

            egui::ScrollArea::vertical().show(ui, |ui| {
                let info_msgs = personal_info::view(ui, &self.model.resume.personal_info);
                self.inbox
                    .extend(info_msgs.into_iter().map(Msg::PersonalInfo));
                ui.add_space(12.0);

                ui.label(
                    egui::RichText::new(
                        "Drag the handles to reorder sections, or to move entries within and between sections. \
                         The arrow buttons do the same from the keyboard.",
                    )
                    .small()
                    .color(egui::Color32::from_gray(110)),
                );
                ui.add_space(6.0);

                let section_msgs =
                    sections::view(ui, &self.model.sections, &self.model.resume);
                self.inbox
                    .extend(section_msgs.into_iter().map(Msg::Sections));
                ui.add_space(8.0);
            });
        });

        // Drag-and-drop needs continuous frames to follow the pointer.
        if self.model.sections.dragging().is_some() || !self.inbox.is_empty() {
            ctx.request_repaint();
        }
    }
}

impl ResumeBuilderApp {
    fn ensure_spacing(&self, ctx: &egui::Context) {
        ctx.global_style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        });
    }

    /// Renders a small spacer followed by the global theme preference switch.
    fn render_theme_controls(&mut self, ui: &mut egui::Ui) {
        ui.add_space(2.0);
        egui::widgets::global_theme_preference_switch(ui);
    }

    /// Render an export button and handle the save-file dialog interaction.
    ///
    /// Enabled once the resume has a name or any entry text. Pushes
    /// `Msg::ExportRequested` with the chosen path (extension enforced) or
    /// `Msg::ExportCancelled` when the dialog is dismissed.
    fn render_export_button(&mut self, ui: &mut egui::Ui, format: ExportFormat) {
        let enabled = self.model.resume.has_exportable_content();
        let (icon, text) = match format {
            ExportFormat::Markdown => (egui_phosphor::regular::MARKDOWN_LOGO, "Export to Markdown"),
            ExportFormat::Word => (egui_phosphor::regular::FILE_DOC, "Export to Word"),
        };
        let button = egui::Button::new(format!("{icon} {text}"));

        if ui
            .add_enabled(enabled, button)
            .on_disabled_hover_text("Please enter your name or at least one entry")
            .clicked()
        {
            let default_name = suggested_file_name(&self.model.resume.personal_info.name, format);
            let dialog = rfd::FileDialog::new()
                .set_title(text)
                .add_filter(format.label(), &[format.extension()])
                .set_file_name(&default_name);

            if let Some(path) = dialog.save_file() {
                let output = ensure_extension(path, format.extension());
                self.inbox.push(Msg::ExportRequested { format, output });
            } else {
                self.inbox.push(Msg::ExportCancelled);
            }
        }
    }

    /// Render a simple modal window for error messages.
    fn render_error_modal(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.model.error.clone() {
            egui::Window::new("Something went wrong")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        self.inbox.push(Msg::DismissError);
                    }
                });
        }
    }

    /// Render latest status message, a spinner for running exports, and an
    /// "Open" shortcut for the last written file.
    fn render_status(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if let Some(text) = &self.model.status {
                let display = if self.model.pending_commands > 0 {
                    format!("{}  ({} working…)", text, self.model.pending_commands)
                } else {
                    text.to_string()
                };
                ui.label(egui::RichText::new(display).color(egui::Color32::from_gray(68)));
            }
            if self.model.pending_commands > 0 {
                ui.add(egui::Spinner::new().size(14.0)).on_hover_text(format!(
                    "{} task(s) running in background",
                    self.model.pending_commands
                ));
            }
            if self.model.last_export.is_some()
                && ui
                    .small_button(format!(
                        "{} Open last export",
                        egui_phosphor::regular::ARROW_SQUARE_OUT
                    ))
                    .clicked()
            {
                self.inbox.push(Msg::OpenLastExport);
            }
        });
    }
}

// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Personal information form (name, contact details, summary).

use eframe::egui;

use crate::models::{PersonalField, PersonalInfo, Resume};

/// Messages emitted by the personal info view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PersonalInfoMsg {
    Changed { field: PersonalField, value: String },
}

/// Apply a message to the document.
pub fn update(resume: &mut Resume, msg: PersonalInfoMsg) {
    match msg {
        PersonalInfoMsg::Changed { field, value } => resume.update_personal_info(field, value),
    }
}

fn hint(field: PersonalField) -> &'static str {
    match field {
        PersonalField::Name => "e.g., Ada Lovelace",
        PersonalField::Email => "e.g., ada@example.org",
        PersonalField::Phone => "e.g., +44 20 7946 0000",
        PersonalField::Location => "e.g., London, UK",
        PersonalField::Website => "e.g., https://ada.dev",
        PersonalField::Summary => "A few sentences about your profile and goals.",
    }
}

/// Render the form and return any edits.
pub fn view(ui: &mut egui::Ui, info: &PersonalInfo) -> Vec<PersonalInfoMsg> {
    let mut msgs = Vec::new();

    egui::CollapsingHeader::new("Personal information")
        .default_open(true)
        .show(ui, |ui| {
            egui::Grid::new("personal_info_grid")
                .num_columns(2)
                .spacing(egui::vec2(8.0, 8.0))
                .min_col_width(100.0)
                .show(ui, |ui| {
                    for field in PersonalField::ALL {
                        ui.label(field.label());
                        let mut value = info.get(field).to_string();
                        let editor = if field == PersonalField::Summary {
                            egui::TextEdit::multiline(&mut value).desired_rows(3)
                        } else {
                            egui::TextEdit::singleline(&mut value)
                        };
                        if ui
                            .add(editor.hint_text(hint(field)).desired_width(f32::INFINITY))
                            .changed()
                        {
                            msgs.push(PersonalInfoMsg::Changed { field, value });
                        }
                        ui.end_row();
                    }
                });
        });

    msgs
}

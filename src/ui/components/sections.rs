// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Sections and entries editor with drag-and-drop reordering.
//!
//! Sections and entries each have a grip handle acting as an egui drag source
//! carrying a [`DragItem`]. Section frames accept section drops, entry cards
//! accept entry drops; the resulting gesture is reconciled by
//! [`crate::logic::reorder`]. Move up/down buttons next to each handle give
//! the same reordering from the keyboard.

use eframe::egui;
use egui_phosphor::regular;

use crate::logic::reorder::{self, DragItem, DragKind, DragTracker, Step};
use crate::models::{Entry, EntryField, ItemId, Resume, Section};

const DEFAULT_SECTION_TITLE: &str = "New section";

/// UI state for the sections editor. The document itself lives in the app model.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct SectionsModel {
    drag: DragTracker,
    renaming: Option<ItemId>,
    rename_buffer: String,
}

impl SectionsModel {
    /// Item currently being dragged, if any.
    pub fn dragging(&self) -> Option<&DragItem> {
        self.drag.active()
    }
}

/// Drag gesture lifecycle as observed by the view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragMsg {
    Started(DragItem),
    /// Released over `over`, or outside any accepting drop zone.
    Ended { over: Option<ItemId> },
    Cancelled,
}

/// Messages emitted by the sections view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SectionsMsg {
    AddSection,
    StartRename(ItemId),
    RenameInputChanged(String),
    CommitRename,
    CancelRename,
    RemoveSection(ItemId),
    AddEntry(ItemId),
    UpdateEntry {
        section: ItemId,
        entry: ItemId,
        field: EntryField,
        value: String,
    },
    AddDetail {
        section: ItemId,
        entry: ItemId,
    },
    UpdateDetail {
        section: ItemId,
        entry: ItemId,
        index: usize,
        value: String,
    },
    RemoveDetail {
        section: ItemId,
        entry: ItemId,
        index: usize,
    },
    RemoveEntry {
        section: ItemId,
        entry: ItemId,
    },
    Drag(DragMsg),
    /// Keyboard reorder of a section or entry by one position.
    Step {
        item: DragItem,
        step: Step,
    },
}

/// Feedback surfaced to the status bar or error modal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionsEvent {
    pub message: String,
    pub is_error: bool,
}

impl SectionsEvent {
    fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }
}

/// Apply a message to the editor state and the document.
pub fn update(
    model: &mut SectionsModel,
    resume: &mut Resume,
    msg: SectionsMsg,
) -> Option<SectionsEvent> {
    match msg {
        SectionsMsg::AddSection => {
            let id = resume.add_section(DEFAULT_SECTION_TITLE);
            model.renaming = Some(id);
            model.rename_buffer = DEFAULT_SECTION_TITLE.to_string();
            None
        }
        SectionsMsg::StartRename(id) => {
            if let Some(section) = resume.find_section(&id) {
                model.rename_buffer = section.title.clone();
                model.renaming = Some(id);
            }
            None
        }
        SectionsMsg::RenameInputChanged(text) => {
            model.rename_buffer = text;
            None
        }
        SectionsMsg::CommitRename => commit_rename(model, resume),
        SectionsMsg::CancelRename => {
            model.renaming = None;
            model.rename_buffer.clear();
            None
        }
        SectionsMsg::RemoveSection(id) => {
            let title = resume.find_section(&id).map(|s| s.title.clone());
            if resume.remove_section(&id) {
                if model.renaming.as_ref() == Some(&id) {
                    model.renaming = None;
                    model.rename_buffer.clear();
                }
                return Some(SectionsEvent::info(format!(
                    "Section \"{}\" removed",
                    title.unwrap_or_default()
                )));
            }
            None
        }
        SectionsMsg::AddEntry(section) => {
            resume.add_entry(&section);
            None
        }
        SectionsMsg::UpdateEntry {
            section,
            entry,
            field,
            value,
        } => {
            resume.update_entry(&section, &entry, field, value);
            None
        }
        SectionsMsg::AddDetail { section, entry } => {
            resume.add_detail(&section, &entry);
            None
        }
        SectionsMsg::UpdateDetail {
            section,
            entry,
            index,
            value,
        } => {
            resume.update_detail(&section, &entry, index, value);
            None
        }
        SectionsMsg::RemoveDetail {
            section,
            entry,
            index,
        } => {
            resume.remove_detail(&section, &entry, index);
            None
        }
        SectionsMsg::RemoveEntry { section, entry } => {
            if resume.remove_entry(&section, &entry) {
                return Some(SectionsEvent::info("Entry removed"));
            }
            None
        }
        SectionsMsg::Drag(DragMsg::Started(item)) => {
            model.drag.start(item);
            None
        }
        SectionsMsg::Drag(DragMsg::Ended { over }) => {
            reorder::handle_drag_end(&mut model.drag, resume, over.as_ref());
            None
        }
        SectionsMsg::Drag(DragMsg::Cancelled) => {
            model.drag.cancel();
            None
        }
        SectionsMsg::Step { item, step } => {
            reorder::handle_step(resume, &item, step);
            None
        }
    }
}

/// Validate and commit an inline section rename, returning a feedback event on error.
fn commit_rename(model: &mut SectionsModel, resume: &mut Resume) -> Option<SectionsEvent> {
    let id = model.renaming.clone()?;
    let title = model.rename_buffer.trim();
    if title.is_empty() {
        return Some(SectionsEvent {
            message: "Section title cannot be empty.".into(),
            is_error: true,
        });
    }

    resume.rename_section(&id, title.to_string());
    model.renaming = None;
    model.rename_buffer.clear();
    None
}

/// Render all sections and return any messages triggered by user interaction.
pub fn view(ui: &mut egui::Ui, model: &SectionsModel, resume: &Resume) -> Vec<SectionsMsg> {
    let mut msgs = Vec::new();

    for section in &resume.sections {
        render_section(ui, model, resume, section, &mut msgs);
        ui.add_space(10.0);
    }

    if ui
        .button(format!("{} Add section", regular::PLUS))
        .clicked()
    {
        msgs.push(SectionsMsg::AddSection);
    }

    finish_pending_drag(ui, model, &mut msgs);
    msgs
}

/// Emit an end/cancel for a tracked drag that no drop zone consumed this frame.
fn finish_pending_drag(ui: &egui::Ui, model: &SectionsModel, msgs: &mut Vec<SectionsMsg>) {
    if msgs.iter().any(is_drag_end) {
        return;
    }
    let tracking = model.drag.is_active() || msgs.iter().any(is_drag_start);
    if !tracking {
        return;
    }
    let ctx = ui.ctx();
    if !egui::DragAndDrop::has_payload_of_type::<DragItem>(ctx) {
        // Escape aborts the egui drag and drops the payload before layout.
        msgs.push(SectionsMsg::Drag(DragMsg::Cancelled));
    } else if ctx.input(|i| i.pointer.any_released()) {
        msgs.push(SectionsMsg::Drag(DragMsg::Ended { over: None }));
    }
}

fn is_drag_start(msg: &SectionsMsg) -> bool {
    matches!(msg, SectionsMsg::Drag(DragMsg::Started(_)))
}

fn is_drag_end(msg: &SectionsMsg) -> bool {
    matches!(msg, SectionsMsg::Drag(DragMsg::Ended { .. }))
}

/// Take the drag payload when it matches `kind` and is released over `response`.
fn take_drop(response: &egui::Response, kind: DragKind) -> Option<DragItem> {
    let matches_kind = response
        .dnd_hover_payload::<DragItem>()
        .is_some_and(|item| item.kind == kind);
    if !matches_kind {
        return None;
    }
    response
        .dnd_release_payload::<DragItem>()
        .map(|item| DragItem::clone(&item))
}

/// Queue the end of a drag on `over`, preceded by its start if the editor has not seen one.
fn push_drop(model: &SectionsModel, msgs: &mut Vec<SectionsMsg>, item: DragItem, over: &ItemId) {
    let seen = model.dragging() == Some(&item)
        || msgs
            .iter()
            .any(|m| matches!(m, SectionsMsg::Drag(DragMsg::Started(started)) if *started == item));
    if !seen {
        msgs.push(SectionsMsg::Drag(DragMsg::Started(item)));
    }
    msgs.push(SectionsMsg::Drag(DragMsg::Ended {
        over: Some(over.clone()),
    }));
}

/// Outline a drop zone while a compatible item hovers it.
fn highlight_drop_target(ui: &egui::Ui, response: &egui::Response, kind: DragKind, own: &ItemId) {
    let hovering = response
        .dnd_hover_payload::<DragItem>()
        .is_some_and(|item| item.kind == kind && &item.id != own);
    if hovering {
        ui.painter().rect_stroke(
            response.rect,
            4.0,
            ui.visuals().selection.stroke,
            egui::StrokeKind::Outside,
        );
    }
}

fn drag_source_id(id: &ItemId) -> egui::Id {
    egui::Id::new(("resume-drag", id.as_str()))
}

/// Grip handle plus label that starts a drag of `item`.
fn drag_handle(ui: &mut egui::Ui, item: &DragItem, label: egui::RichText, msgs: &mut Vec<SectionsMsg>) {
    let id = drag_source_id(&item.id);
    let response = ui
        .dnd_drag_source(id, item.clone(), |ui| {
            ui.horizontal(|ui| {
                ui.add(
                    egui::Label::new(egui::RichText::new(regular::DOTS_SIX_VERTICAL).size(16.0))
                        .selectable(false),
                );
                ui.add(egui::Label::new(label).selectable(false));
            });
        })
        .response;
    // On the starting frame the source is already in the air, so its own
    // response never reports `drag_started`.
    if ui.ctx().drag_started_id() == Some(id) {
        msgs.push(SectionsMsg::Drag(DragMsg::Started(item.clone())));
    }
    response.on_hover_text("Drag to reorder");
}

/// Move down/up buttons for `item`, reachable with Tab and pressed with Enter or Space.
///
/// Focus follows the item after a step so repeated presses keep moving it.
fn step_buttons(ui: &mut egui::Ui, resume: &Resume, item: &DragItem, msgs: &mut Vec<SectionsMsg>) {
    let focus_key = egui::Id::new("resume-step-focus");
    let refocus = ui
        .ctx()
        .data_mut(|d| d.get_temp::<(ItemId, Step)>(focus_key));

    for (step, icon, hint) in [
        (Step::Down, regular::ARROW_DOWN, "Move down"),
        (Step::Up, regular::ARROW_UP, "Move up"),
    ] {
        let enabled = reorder::step_move(resume, item, step).is_some();
        let response = ui
            .add_enabled(enabled, egui::Button::new(icon).small())
            .on_hover_text(hint);
        if refocus
            .as_ref()
            .is_some_and(|(id, s)| id == &item.id && *s == step)
        {
            response.request_focus();
            ui.ctx().data_mut(|d| d.remove::<(ItemId, Step)>(focus_key));
        }
        if response.clicked() {
            ui.ctx()
                .data_mut(|d| d.insert_temp(focus_key, (item.id.clone(), step)));
            msgs.push(SectionsMsg::Step {
                item: item.clone(),
                step,
            });
        }
    }
}

fn render_section(
    ui: &mut egui::Ui,
    model: &SectionsModel,
    resume: &Resume,
    section: &Section,
    msgs: &mut Vec<SectionsMsg>,
) {
    let frame = egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            if model.renaming.as_ref() == Some(&section.id) {
                render_rename(ui, model, msgs);
            } else {
                render_section_header(ui, resume, section, msgs);
            }
        });
        ui.add_space(6.0);

        if section.entries.is_empty() {
            ui.label(
                egui::RichText::new("No entries yet.")
                    .italics()
                    .color(egui::Color32::from_gray(110)),
            );
        }
        for entry in &section.entries {
            render_entry(ui, model, resume, &section.id, entry, msgs);
            ui.add_space(6.0);
        }

        if ui
            .button(format!("{} Add entry", regular::PLUS))
            .clicked()
        {
            msgs.push(SectionsMsg::AddEntry(section.id.clone()));
        }
    });

    let response = frame.response;
    highlight_drop_target(ui, &response, DragKind::Section, &section.id);
    if let Some(item) = take_drop(&response, DragKind::Section) {
        push_drop(model, msgs, item, &section.id);
    }
}

fn render_section_header(
    ui: &mut egui::Ui,
    resume: &Resume,
    section: &Section,
    msgs: &mut Vec<SectionsMsg>,
) {
    let title = if section.title.trim().is_empty() {
        DEFAULT_SECTION_TITLE
    } else {
        section.title.as_str()
    };
    let item = DragItem::section(section.id.clone());
    drag_handle(ui, &item, egui::RichText::new(title).heading(), msgs);

    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
        if ui
            .button(
                egui::RichText::new(regular::TRASH_SIMPLE).color(egui::Color32::from_gray(140)),
            )
            .on_hover_text("Remove section")
            .clicked()
        {
            msgs.push(SectionsMsg::RemoveSection(section.id.clone()));
        }
        if ui
            .button(regular::PENCIL_SIMPLE)
            .on_hover_text("Rename section")
            .clicked()
        {
            msgs.push(SectionsMsg::StartRename(section.id.clone()));
        }
        step_buttons(ui, resume, &item, msgs);
    });
}

/// Render the inline rename UI for a section header.
fn render_rename(ui: &mut egui::Ui, model: &SectionsModel, msgs: &mut Vec<SectionsMsg>) {
    let mut buffer = model.rename_buffer.clone();
    let response = ui.add(
        egui::TextEdit::singleline(&mut buffer)
            .hint_text("Section title")
            .desired_width(220.0),
    );

    if response.changed() {
        msgs.push(SectionsMsg::RenameInputChanged(buffer));
    }

    if response.lost_focus() && ui.input(|inp| inp.key_pressed(egui::Key::Enter)) {
        msgs.push(SectionsMsg::CommitRename);
        return;
    }

    if ui
        .button(regular::CHECK)
        .on_hover_text("Save")
        .clicked()
    {
        msgs.push(SectionsMsg::CommitRename);
    }

    if ui
        .button(regular::X)
        .on_hover_text("Cancel")
        .clicked()
    {
        msgs.push(SectionsMsg::CancelRename);
    }
}

fn render_entry(
    ui: &mut egui::Ui,
    model: &SectionsModel,
    resume: &Resume,
    section_id: &ItemId,
    entry: &Entry,
    msgs: &mut Vec<SectionsMsg>,
) {
    let frame = egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());

        ui.horizontal(|ui| {
            let title = entry.title.trim();
            let label = if title.is_empty() {
                egui::RichText::new("Untitled entry").italics()
            } else {
                egui::RichText::new(title).strong()
            };
            let item = DragItem::entry(entry.id.clone());
            drag_handle(ui, &item, label, msgs);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button(
                        egui::RichText::new(regular::TRASH_SIMPLE)
                            .color(egui::Color32::from_gray(140)),
                    )
                    .on_hover_text("Remove entry")
                    .clicked()
                {
                    msgs.push(SectionsMsg::RemoveEntry {
                        section: section_id.clone(),
                        entry: entry.id.clone(),
                    });
                }
                step_buttons(ui, resume, &item, msgs);
            });
        });

        egui::Grid::new(("entry_fields", entry.id.as_str()))
            .num_columns(2)
            .spacing(egui::vec2(8.0, 6.0))
            .min_col_width(80.0)
            .show(ui, |ui| {
                for (field, label, hint) in [
                    (EntryField::Title, "Title", "e.g., Senior Engineer"),
                    (EntryField::Subtitle, "Subtitle", "e.g., Company or school"),
                    (EntryField::Date, "Date", "e.g., 2021 - present"),
                ] {
                    ui.label(label);
                    let mut value = entry.get(field).to_string();
                    if ui
                        .add(
                            egui::TextEdit::singleline(&mut value)
                                .id_salt((entry.id.as_str(), label))
                                .hint_text(hint)
                                .desired_width(f32::INFINITY),
                        )
                        .changed()
                    {
                        msgs.push(SectionsMsg::UpdateEntry {
                            section: section_id.clone(),
                            entry: entry.id.clone(),
                            field,
                            value,
                        });
                    }
                    ui.end_row();
                }
            });

        ui.add_space(4.0);
        render_details(ui, section_id, entry, msgs);
    });

    let response = frame.response;
    highlight_drop_target(ui, &response, DragKind::Entry, &entry.id);
    if let Some(item) = take_drop(&response, DragKind::Entry) {
        push_drop(model, msgs, item, &entry.id);
    }
}

/// Render the bullet detail lines of an entry.
fn render_details(ui: &mut egui::Ui, section_id: &ItemId, entry: &Entry, msgs: &mut Vec<SectionsMsg>) {
    for (index, detail) in entry.details.iter().enumerate() {
        ui.horizontal(|ui| {
            ui.label(regular::DOT_OUTLINE);
            let mut value = detail.clone();
            let width = (ui.available_width() - 40.0).max(80.0);
            if ui
                .add(
                    egui::TextEdit::singleline(&mut value)
                        .id_salt((entry.id.as_str(), "detail", index))
                        .hint_text("Achievement or responsibility (supports **bold** and *italic*)")
                        .desired_width(width),
                )
                .changed()
            {
                msgs.push(SectionsMsg::UpdateDetail {
                    section: section_id.clone(),
                    entry: entry.id.clone(),
                    index,
                    value,
                });
            }
            if ui
                .button(regular::X)
                .on_hover_text("Remove detail")
                .clicked()
            {
                msgs.push(SectionsMsg::RemoveDetail {
                    section: section_id.clone(),
                    entry: entry.id.clone(),
                    index,
                });
            }
        });
    }

    if ui
        .small_button(format!("{} Add detail", regular::PLUS))
        .clicked()
    {
        msgs.push(SectionsMsg::AddDetail {
            section: section_id.clone(),
            entry: entry.id.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ItemId {
        ItemId::from(s)
    }

    #[test]
    fn add_section_starts_rename_of_new_section() {
        let mut model = SectionsModel::default();
        let mut resume = Resume::starter();

        update(&mut model, &mut resume, SectionsMsg::AddSection);
        update(
            &mut model,
            &mut resume,
            SectionsMsg::RenameInputChanged("Projects".into()),
        );
        let event = update(&mut model, &mut resume, SectionsMsg::CommitRename);

        assert!(event.is_none());
        assert_eq!(resume.sections.len(), 4);
        assert_eq!(resume.sections[3].title, "Projects");
        assert!(model.renaming.is_none());
    }

    #[test]
    fn commit_rename_rejects_blank_title() {
        let mut model = SectionsModel::default();
        let mut resume = Resume::starter();

        update(&mut model, &mut resume, SectionsMsg::StartRename(id("skills")));
        update(
            &mut model,
            &mut resume,
            SectionsMsg::RenameInputChanged("   ".into()),
        );
        let event = update(&mut model, &mut resume, SectionsMsg::CommitRename)
            .expect("should return error event");

        assert!(event.is_error);
        assert_eq!(resume.sections[2].title, "Skills");
        assert_eq!(model.renaming, Some(id("skills")));
    }

    #[test]
    fn remove_section_reports_title() {
        let mut model = SectionsModel::default();
        let mut resume = Resume::starter();

        let event = update(
            &mut model,
            &mut resume,
            SectionsMsg::RemoveSection(id("education")),
        )
        .expect("event expected");

        assert_eq!(event.message, "Section \"Education\" removed");
        assert!(resume.find_section(&id("education")).is_none());
    }

    #[test]
    fn entry_messages_edit_the_document() {
        let mut model = SectionsModel::default();
        let mut resume = Resume::starter();
        let (section, entry) = (id("experience"), id("experience-1"));

        update(
            &mut model,
            &mut resume,
            SectionsMsg::UpdateEntry {
                section: section.clone(),
                entry: entry.clone(),
                field: EntryField::Date,
                value: "2020 - 2024".into(),
            },
        );
        update(
            &mut model,
            &mut resume,
            SectionsMsg::AddDetail {
                section: section.clone(),
                entry: entry.clone(),
            },
        );
        update(
            &mut model,
            &mut resume,
            SectionsMsg::UpdateDetail {
                section: section.clone(),
                entry: entry.clone(),
                index: 0,
                value: "Cut build times in half".into(),
            },
        );

        let stored = &resume.sections[0].entries[0];
        assert_eq!(stored.date, "2020 - 2024");
        assert_eq!(stored.details, vec!["Cut build times in half".to_string()]);

        let event = update(
            &mut model,
            &mut resume,
            SectionsMsg::RemoveEntry { section, entry },
        )
        .expect("event expected");
        assert_eq!(event.message, "Entry removed");
        assert!(resume.sections[0].entries.is_empty());
    }

    #[test]
    fn drag_messages_reorder_sections() {
        let mut model = SectionsModel::default();
        let mut resume = Resume::starter();

        update(
            &mut model,
            &mut resume,
            SectionsMsg::Drag(DragMsg::Started(DragItem::section(id("skills")))),
        );
        assert_eq!(model.dragging().map(|d| d.kind), Some(DragKind::Section));

        update(
            &mut model,
            &mut resume,
            SectionsMsg::Drag(DragMsg::Ended {
                over: Some(id("experience")),
            }),
        );

        let order: Vec<_> = resume.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(order, vec!["skills", "experience", "education"]);
        assert!(model.dragging().is_none());
    }

    #[test]
    fn drag_cancel_leaves_document_untouched() {
        let mut model = SectionsModel::default();
        let mut resume = Resume::starter();
        let before = resume.clone();

        update(
            &mut model,
            &mut resume,
            SectionsMsg::Drag(DragMsg::Started(DragItem::entry(id("skills-1")))),
        );
        update(&mut model, &mut resume, SectionsMsg::Drag(DragMsg::Cancelled));

        assert_eq!(resume, before);
        assert!(model.dragging().is_none());
    }

    #[test]
    fn step_message_moves_entry_into_next_section() {
        let mut model = SectionsModel::default();
        let mut resume = Resume::starter();

        update(
            &mut model,
            &mut resume,
            SectionsMsg::Step {
                item: DragItem::entry(id("experience-1")),
                step: Step::Down,
            },
        );

        assert!(resume.sections[0].entries.is_empty());
        let education: Vec<_> = resume.sections[1].entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(education, vec!["experience-1", "education-1"]);
    }

    fn frame_input(events: Vec<egui::Event>) -> egui::RawInput {
        egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(1024.0, 4096.0),
            )),
            events,
            ..Default::default()
        }
    }

    /// Render one frame and apply what it emitted, as the app inbox does.
    fn run_frame(
        ctx: &egui::Context,
        model: &mut SectionsModel,
        resume: &mut Resume,
        events: Vec<egui::Event>,
    ) -> Vec<SectionsMsg> {
        let mut emitted = Vec::new();
        let _ = ctx.run_ui(frame_input(events), |ui| {
            emitted.extend(view(ui, model, resume));
        });
        for msg in emitted.clone() {
            update(model, resume, msg);
        }
        emitted
    }

    fn handle_center(ctx: &egui::Context, item: &str) -> egui::Pos2 {
        ctx.read_response(drag_source_id(&id(item)))
            .expect("drag handle should be laid out")
            .rect
            .center()
    }

    fn button(pos: egui::Pos2, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        }
    }

    /// Press on the handle of `from`, move over `to` in small steps and release there.
    fn pointer_drag(
        ctx: &egui::Context,
        model: &mut SectionsModel,
        resume: &mut Resume,
        from: &str,
        to: &str,
    ) -> Vec<SectionsMsg> {
        run_frame(ctx, model, resume, vec![]);
        run_frame(ctx, model, resume, vec![]);
        let start = handle_center(ctx, from);
        let end = handle_center(ctx, to);

        let mut seen = Vec::new();
        seen.extend(run_frame(ctx, model, resume, vec![egui::Event::PointerMoved(start)]));
        seen.extend(run_frame(ctx, model, resume, vec![button(start, true)]));
        for i in 1..=8 {
            let pos = start.lerp(end, i as f32 / 8.0);
            seen.extend(run_frame(ctx, model, resume, vec![egui::Event::PointerMoved(pos)]));
        }
        seen.extend(run_frame(ctx, model, resume, vec![button(end, false)]));
        seen.extend(run_frame(ctx, model, resume, vec![]));
        seen
    }

    #[test]
    fn pointer_drag_of_section_handle_reorders_sections() {
        let ctx = egui::Context::default();
        let mut model = SectionsModel::default();
        let mut resume = Resume::starter();

        let seen = pointer_drag(&ctx, &mut model, &mut resume, "skills", "experience");

        assert!(seen.iter().any(|m| matches!(
            m,
            SectionsMsg::Drag(DragMsg::Started(item)) if *item == DragItem::section(id("skills"))
        )));
        let order: Vec<_> = resume.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(order, vec!["skills", "experience", "education"]);
        assert!(model.dragging().is_none());
    }

    #[test]
    fn pointer_drag_of_entry_handle_moves_entry_across_sections() {
        let ctx = egui::Context::default();
        let mut model = SectionsModel::default();
        let mut resume = Resume::starter();

        pointer_drag(&ctx, &mut model, &mut resume, "skills-1", "experience-1");

        let experience: Vec<_> = resume.sections[0].entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(experience, vec!["skills-1", "experience-1"]);
        assert!(resume.sections[2].entries.is_empty());
        assert!(model.dragging().is_none());
    }

    #[test]
    fn escape_during_pointer_drag_cancels_it() {
        let ctx = egui::Context::default();
        let mut model = SectionsModel::default();
        let mut resume = Resume::starter();
        let before = resume.clone();

        run_frame(&ctx, &mut model, &mut resume, vec![]);
        run_frame(&ctx, &mut model, &mut resume, vec![]);
        let start = handle_center(&ctx, "skills");
        run_frame(&ctx, &mut model, &mut resume, vec![egui::Event::PointerMoved(start)]);
        run_frame(&ctx, &mut model, &mut resume, vec![button(start, true)]);
        run_frame(
            &ctx,
            &mut model,
            &mut resume,
            vec![egui::Event::PointerMoved(start + egui::vec2(0.0, 40.0))],
        );
        assert!(model.dragging().is_some());

        let seen = run_frame(
            &ctx,
            &mut model,
            &mut resume,
            vec![egui::Event::Key {
                key: egui::Key::Escape,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: egui::Modifiers::NONE,
            }],
        );

        assert!(seen.contains(&SectionsMsg::Drag(DragMsg::Cancelled)));
        assert!(model.dragging().is_none());
        assert_eq!(resume, before);
    }
}


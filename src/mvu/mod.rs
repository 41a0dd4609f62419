// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Root Model-View-Update kernel wiring component state, messages, and commands.

use std::path::PathBuf;

use time::OffsetDateTime;
use tracing::{info, warn};

use crate::logic::export::{ExportFormat, ensure_extension, write_export};
use crate::models::Resume;
use crate::ui::components::personal_info::{self, PersonalInfoMsg};
use crate::ui::components::sections::{self, SectionsModel, SectionsMsg};

/// Top-level application state.
#[derive(Default)]
pub struct AppModel {
    /// The resume being edited.
    pub resume: Resume,
    /// Sections editor state (drag in progress, inline rename).
    pub sections: SectionsModel,
    /// Latest status message to display.
    pub status: Option<String>,
    /// Latest error message to display in modal.
    pub error: Option<String>,
    /// Count of queued background commands.
    pub pending_commands: usize,
    /// Most recent successfully written export, offered for opening.
    pub last_export: Option<PathBuf>,
}

impl AppModel {
    pub fn new(resume: Resume) -> Self {
        Self {
            resume,
            ..Default::default()
        }
    }
}

/// Application messages routed through the update function.
pub enum Msg {
    PersonalInfo(PersonalInfoMsg),
    Sections(SectionsMsg),
    ExportRequested { format: ExportFormat, output: PathBuf },
    ExportCancelled,
    ExportCompleted(Result<PathBuf, String>),
    OpenLastExport,
    OpenCompleted(Result<PathBuf, String>),
    DismissError,
}

/// Commands represent side-effects executed between frames.
pub enum Command {
    Export(ExportPayload),
    OpenFile(PathBuf),
}

/// Snapshot of the document captured for an export.
pub struct ExportPayload {
    /// Final output path on disk (with the format's extension enforced).
    pub output: PathBuf,
    pub format: ExportFormat,
    /// Owned copy so later edits do not race the worker.
    pub resume: Resume,
    /// Timestamp recorded in document metadata.
    pub created_at: OffsetDateTime,
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::PersonalInfo(m) => personal_info::update(&mut model.resume, m),
        Msg::Sections(m) => {
            if let Some(event) = sections::update(&mut model.sections, &mut model.resume, m) {
                surface_event(model, event.message, event.is_error);
            }
        }
        Msg::ExportRequested { format, output } => match validate_for_export(model, format, output)
        {
            Ok(payload) => {
                info!(path = %payload.output.display(), ?format, "export queued");
                cmds.push(Command::Export(payload));
            }
            Err(err) => surface_event(model, err, true),
        },
        Msg::ExportCancelled => surface_event(model, "Export cancelled.".to_string(), false),
        Msg::ExportCompleted(result) => match result {
            Ok(path) => {
                surface_event(model, format!("Resume exported: {}", path.display()), false);
                model.last_export = Some(path);
            }
            Err(err) => {
                warn!(error = %err, "export failed");
                surface_event(model, format!("Failed to export resume:\n\n{err}"), true);
            }
        },
        Msg::OpenLastExport => {
            if let Some(path) = model.last_export.clone() {
                cmds.push(Command::OpenFile(path));
            }
        }
        Msg::OpenCompleted(result) => match result {
            Ok(path) => surface_event(model, format!("Opened {}", path.display()), false),
            Err(err) => surface_event(model, err, true),
        },
        Msg::DismissError => model.error = None,
    }
}

/// Execute a command synchronously (on a worker thread) and return a resulting message.
pub fn run_command(cmd: Command) -> Msg {
    match cmd {
        Command::Export(payload) => {
            let res = write_export(
                &payload.output,
                &payload.resume,
                payload.format,
                payload.created_at,
            )
            .map(|_| payload.output.clone());
            Msg::ExportCompleted(res.map_err(|e| format!("{e:#}")))
        }
        Command::OpenFile(path) => {
            let res = open::that(&path)
                .map(|_| path.clone())
                .map_err(|err| format!("Failed to open {}: {err}", path.display()));
            Msg::OpenCompleted(res)
        }
    }
}

/// Update status/error fields consistently for user feedback.
fn surface_event(model: &mut AppModel, message: String, is_error: bool) {
    if is_error {
        model.error = Some(message.clone());
    }
    model.status = Some(message);
}

/// Validate model state and build the payload required to export.
fn validate_for_export(
    model: &AppModel,
    format: ExportFormat,
    output: PathBuf,
) -> Result<ExportPayload, String> {
    if !model.resume.has_exportable_content() {
        return Err("Please enter your name or at least one entry before exporting.".into());
    }

    Ok(ExportPayload {
        output: ensure_extension(output, format.extension()),
        format,
        resume: model.resume.clone(),
        created_at: OffsetDateTime::now_utc(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::reorder::DragItem;
    use crate::models::{ItemId, PersonalField};
    use crate::ui::components::sections::DragMsg;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn named_model() -> AppModel {
        let mut model = AppModel::new(Resume::starter());
        let mut cmds = Vec::new();
        update(
            &mut model,
            Msg::PersonalInfo(PersonalInfoMsg::Changed {
                field: PersonalField::Name,
                value: "Grace Hopper".into(),
            }),
            &mut cmds,
        );
        assert!(cmds.is_empty());
        model
    }

    #[test]
    fn export_request_enqueues_and_completes() {
        let tmp = TempDir::new().unwrap();
        let output = tmp.path().join("grace.md");
        let mut model = named_model();

        let mut cmds = Vec::new();
        update(
            &mut model,
            Msg::ExportRequested {
                format: ExportFormat::Markdown,
                output: output.clone(),
            },
            &mut cmds,
        );

        assert_eq!(cmds.len(), 1, "export should enqueue command");

        let msg = run_command(cmds.pop().unwrap());
        let mut cmds2 = Vec::new();
        update(&mut model, msg, &mut cmds2);

        assert!(model.error.is_none());
        assert!(
            model
                .status
                .as_deref()
                .map(|s| s.contains("Resume exported"))
                .unwrap_or(false)
        );
        assert_eq!(model.last_export.as_deref(), Some(output.as_path()));
        assert!(std::fs::read_to_string(&output).unwrap().contains("# Grace Hopper"));
    }

    #[test]
    fn export_request_enforces_format_extension() {
        let mut model = named_model();
        let mut cmds = Vec::new();

        update(
            &mut model,
            Msg::ExportRequested {
                format: ExportFormat::Word,
                output: PathBuf::from("/tmp/grace.txt"),
            },
            &mut cmds,
        );

        match cmds.pop() {
            Some(Command::Export(payload)) => {
                assert_eq!(payload.output, PathBuf::from("/tmp/grace.docx"));
                assert_eq!(payload.format, ExportFormat::Word);
            }
            _ => panic!("expected export command"),
        }
    }

    #[test]
    fn export_payload_is_a_snapshot() {
        let mut model = named_model();
        let mut cmds = Vec::new();

        update(
            &mut model,
            Msg::ExportRequested {
                format: ExportFormat::Markdown,
                output: PathBuf::from("/tmp/snapshot.md"),
            },
            &mut cmds,
        );
        update(
            &mut model,
            Msg::PersonalInfo(PersonalInfoMsg::Changed {
                field: PersonalField::Name,
                value: "Changed later".into(),
            }),
            &mut Vec::new(),
        );

        match cmds.pop() {
            Some(Command::Export(payload)) => {
                assert_eq!(payload.resume.personal_info.name, "Grace Hopper")
            }
            _ => panic!("expected export command"),
        }
    }

    #[test]
    fn export_request_with_empty_resume_sets_error() {
        let mut model = AppModel::new(Resume::starter());
        let mut cmds = Vec::new();

        update(
            &mut model,
            Msg::ExportRequested {
                format: ExportFormat::Word,
                output: PathBuf::from("/tmp/ignored.docx"),
            },
            &mut cmds,
        );

        assert!(cmds.is_empty());
        assert!(model.error.is_some());
    }

    #[test]
    fn export_failure_surfaces_error() {
        let mut model = named_model();
        let mut cmds = Vec::new();

        update(
            &mut model,
            Msg::ExportCompleted(Err("disk full".into())),
            &mut cmds,
        );

        assert!(model.error.as_deref().unwrap().contains("disk full"));
        assert!(model.last_export.is_none());

        update(&mut model, Msg::DismissError, &mut cmds);
        assert!(model.error.is_none());
    }

    #[test]
    fn export_cancelled_sets_status() {
        let mut model = AppModel::default();
        let mut cmds = Vec::new();

        update(&mut model, Msg::ExportCancelled, &mut cmds);

        assert!(cmds.is_empty());
        assert_eq!(model.status.as_deref(), Some("Export cancelled."));
        assert!(model.error.is_none());
    }

    #[test]
    fn open_last_export_requires_a_previous_export() {
        let mut model = AppModel::default();
        let mut cmds = Vec::new();

        update(&mut model, Msg::OpenLastExport, &mut cmds);
        assert!(cmds.is_empty());

        model.last_export = Some(PathBuf::from("/tmp/cv.md"));
        update(&mut model, Msg::OpenLastExport, &mut cmds);
        assert!(matches!(cmds.pop(), Some(Command::OpenFile(p)) if p == PathBuf::from("/tmp/cv.md")));
    }

    #[test]
    fn cross_section_drag_moves_entry() {
        let mut model = AppModel::new(Resume::starter());
        let mut cmds = Vec::new();

        update(
            &mut model,
            Msg::Sections(SectionsMsg::Drag(DragMsg::Started(DragItem::entry(
                ItemId::from("skills-1"),
            )))),
            &mut cmds,
        );
        update(
            &mut model,
            Msg::Sections(SectionsMsg::Drag(DragMsg::Ended {
                over: Some(ItemId::from("experience-1")),
            })),
            &mut cmds,
        );

        let experience: Vec<_> = model.resume.sections[0]
            .entries
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(experience, vec!["skills-1", "experience-1"]);
        assert!(model.resume.sections[2].entries.is_empty());
        assert_eq!(model.resume.entry_count(), 3);
        assert!(cmds.is_empty());
    }

    #[test]
    fn removing_entry_reports_status() {
        let mut model = AppModel::new(Resume::starter());
        let mut cmds = Vec::new();

        update(
            &mut model,
            Msg::Sections(SectionsMsg::RemoveEntry {
                section: ItemId::from("education"),
                entry: ItemId::from("education-1"),
            }),
            &mut cmds,
        );

        assert_eq!(model.status.as_deref(), Some("Entry removed"));
        assert!(model.error.is_none());
    }
}

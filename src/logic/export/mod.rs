// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Export of the resume to downloadable document formats.
//!
//! Responsibilities:
//! - Suggest filesystem-safe output names from the person's name.
//! - Render Markdown text and Word (`.docx`) packages from a document snapshot.

pub mod docx;
pub mod markdown;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use time::OffsetDateTime;
use tracing::info;

use crate::models::Resume;
use crate::utils::file_stem::FALLBACK_STEM;
use crate::utils::sanitize_file_stem;

/// Output formats offered by the export buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Word,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Word => "docx",
        }
    }

    /// Filter label for the save dialog.
    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "Markdown",
            ExportFormat::Word => "Word document",
        }
    }
}

/// Suggest a safe export filename from the person's name.
///
/// Uses [`crate::utils::sanitize_file_stem()`] and lowercases the result, so
/// "Ada Lovelace" becomes `ada_lovelace_resume.md`. Blank names give `resume.md`.
pub fn suggested_file_name(name: &str, format: ExportFormat) -> String {
    let stem = sanitize_file_stem(name).to_ascii_lowercase();
    let base = if stem == FALLBACK_STEM {
        stem
    } else {
        format!("{stem}_resume")
    };
    format!("{}.{}", base, format.extension())
}

/// Force a specific extension onto a path when it is missing or different.
///
/// Keeps existing matching extension (case-insensitive); otherwise replaces it.
pub fn ensure_extension(mut path: PathBuf, extension: &str) -> PathBuf {
    let replace = !matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case(extension)
    );

    if replace {
        path.set_extension(extension);
    }
    path
}

/// Write `resume` to `output` in the requested format.
pub fn write_export(
    output: &Path,
    resume: &Resume,
    format: ExportFormat,
    created_at: OffsetDateTime,
) -> Result<()> {
    ensure_parent_dir(output)?;
    match format {
        ExportFormat::Markdown => {
            markdown::write_markdown(output, &resume.personal_info, &resume.sections)?
        }
        ExportFormat::Word => docx::build_and_write_docx(
            output,
            &resume.personal_info,
            &resume.sections,
            created_at,
        )?,
    }
    info!(path = %output.display(), ?format, "resume exported");
    Ok(())
}

/// Ensure the parent exists so the file can be written without IO errors.
fn ensure_parent_dir(output: &Path) -> Result<()> {
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {:?}", parent))?;
    }
    Ok(())
}

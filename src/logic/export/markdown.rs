// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Markdown rendering of the resume.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{Entry, PersonalInfo, Section};

/// Heading used for entries that only carry subtitle/date/details.
pub(crate) const UNTITLED_ENTRY: &str = "Untitled";

/// Render the resume as Markdown.
///
/// Layout: `# name`, a ` | `-joined contact line, the summary, then one
/// `##` heading per section and one `###` heading per entry followed by an
/// italic subtitle/date line and a bullet per detail. Blank entries and
/// sections without any content are skipped.
pub fn render_markdown(personal: &PersonalInfo, sections: &[Section]) -> String {
    let mut blocks: Vec<String> = Vec::new();

    let name = personal.name.trim();
    if !name.is_empty() {
        blocks.push(format!("# {name}"));
    }

    let contact = personal.contact_parts();
    if !contact.is_empty() {
        blocks.push(contact.join(" | "));
    }

    let summary = personal.summary.trim();
    if !summary.is_empty() {
        blocks.push(summary.to_string());
    }

    for section in sections.iter().filter(|s| s.has_content()) {
        blocks.push(format!("## {}", section.title.trim()));
        for entry in section.entries.iter().filter(|e| e.has_content()) {
            blocks.push(render_entry(entry));
        }
    }

    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

fn render_entry(entry: &Entry) -> String {
    let mut lines = Vec::new();

    let title = entry.title.trim();
    lines.push(format!(
        "### {}",
        if title.is_empty() { UNTITLED_ENTRY } else { title }
    ));

    if let Some(meta) = entry_meta_line(entry) {
        lines.push(format!("*{meta}*"));
    }

    let details: Vec<&str> = entry
        .details
        .iter()
        .map(|d| d.trim())
        .filter(|d| !d.is_empty())
        .collect();
    if !details.is_empty() {
        // Blank line keeps the list from being glued to the italic line.
        lines.push(String::new());
        lines.extend(details.into_iter().map(|d| format!("- {d}")));
    }

    lines.join("\n")
}

/// Subtitle and date joined with ` | `, or `None` when both are blank.
pub(crate) fn entry_meta_line(entry: &Entry) -> Option<String> {
    let parts: Vec<&str> = [entry.subtitle.trim(), entry.date.trim()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    (!parts.is_empty()).then(|| parts.join(" | "))
}

/// Render and write the Markdown file.
pub fn write_markdown(output: &Path, personal: &PersonalInfo, sections: &[Section]) -> Result<()> {
    let text = render_markdown(personal, sections);
    fs::write(output, text).with_context(|| format!("Failed to write Markdown file {:?}", output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemId;

    fn entry(id: &str, title: &str, subtitle: &str, date: &str, details: &[&str]) -> Entry {
        Entry {
            id: ItemId::from(id),
            title: title.into(),
            subtitle: subtitle.into(),
            date: date.into(),
            details: details.iter().map(|d| d.to_string()).collect(),
        }
    }

    fn personal() -> PersonalInfo {
        PersonalInfo {
            name: "Ada Lovelace".into(),
            email: "ada@example.org".into(),
            phone: String::new(),
            location: "London".into(),
            website: String::new(),
            summary: "Analyst of engines.".into(),
        }
    }

    #[test]
    fn renders_header_sections_and_entries() {
        let sections = vec![Section::new(ItemId::from("exp"), "Experience").with_entries(vec![
            entry(
                "e1",
                "Engineer",
                "Analytical Engine Co.",
                "1842 - 1843",
                &["Wrote the first program", "  "],
            ),
        ])];

        let md = render_markdown(&personal(), &sections);

        let expected = "# Ada Lovelace\n\n\
                        ada@example.org | London\n\n\
                        Analyst of engines.\n\n\
                        ## Experience\n\n\
                        ### Engineer\n\
                        *Analytical Engine Co. | 1842 - 1843*\n\
                        \n\
                        - Wrote the first program\n";
        assert_eq!(md, expected);
    }

    #[test]
    fn skips_blank_entries_and_empty_sections() {
        let sections = vec![
            Section::new(ItemId::from("edu"), "Education")
                .with_entries(vec![entry("e1", " ", "", "", &[""])]),
            Section::new(ItemId::from("skills"), "Skills")
                .with_entries(vec![entry("e2", "", "", "", &["Rust"]), entry("e3", "", "", "", &[])]),
        ];

        let md = render_markdown(&PersonalInfo::default(), &sections);

        assert!(!md.contains("Education"));
        assert_eq!(md, "## Skills\n\n### Untitled\n\n- Rust\n");
    }

    #[test]
    fn follows_section_and_entry_order() {
        let sections = vec![
            Section::new(ItemId::from("b"), "Second")
                .with_entries(vec![entry("e2", "Two", "", "", &[]), entry("e1", "One", "", "", &[])]),
            Section::new(ItemId::from("a"), "First").with_entries(vec![entry("e3", "Three", "", "", &[])]),
        ];

        let md = render_markdown(&PersonalInfo::default(), &sections);

        let second = md.find("## Second").unwrap();
        let first = md.find("## First").unwrap();
        let two = md.find("### Two").unwrap();
        let one = md.find("### One").unwrap();
        assert!(second < first);
        assert!(two < one);
    }

    #[test]
    fn meta_line_uses_available_parts() {
        let e = entry("e", "", "", "2020", &[]);
        assert_eq!(entry_meta_line(&e).as_deref(), Some("2020"));

        let e = entry("e", "", "", "", &[]);
        assert_eq!(entry_meta_line(&e), None);
    }
}

// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Word (`.docx`) export.
//!
//! Writes a minimal Office Open XML package by hand: content types, package
//! relationships, core properties, and the main document with its styles and
//! bullet numbering. The body follows the same layout as the Markdown export.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use time::{OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339};
use zip::{CompressionMethod, write::FileOptions};

use super::markdown::{UNTITLED_ENTRY, entry_meta_line};
use crate::models::{PersonalInfo, Section};

const WORD_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const CODE_FONT: &str = "Consolas";
/// Numbering instance used for detail bullets (see `numbering.xml`).
const BULLET_NUM_ID: u32 = 1;

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/></Relationships>"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/><w:sz w:val="22"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="120"/></w:pPr></w:pPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style><w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:rPr><w:b/><w:sz w:val="48"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="120"/><w:pBdr><w:bottom w:val="single" w:sz="4" w:space="1" w:color="auto"/></w:pBdr><w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/><w:sz w:val="30"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:pPr><w:keepNext/><w:spacing w:before="160" w:after="40"/><w:outlineLvl w:val="1"/></w:pPr><w:rPr><w:b/><w:sz w:val="24"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Subtitle"><w:name w:val="Subtitle"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:rPr><w:i/><w:color w:val="595959"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="ListParagraph"><w:name w:val="List Paragraph"/><w:basedOn w:val="Normal"/><w:pPr><w:spacing w:after="40"/><w:ind w:left="720"/></w:pPr></w:style></w:styles>"#;

const NUMBERING_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:abstractNum w:abstractNumId="0"><w:multiLevelType w:val="singleLevel"/><w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="•"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:lvl></w:abstractNum><w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num></w:numbering>"#;

/// Paragraph styles defined in `styles.xml`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ParagraphStyle {
    Normal,
    Title,
    Heading1,
    Heading2,
    Subtitle,
    Bullet,
}

impl ParagraphStyle {
    fn style_id(&self) -> Option<&'static str> {
        match self {
            ParagraphStyle::Normal => None,
            ParagraphStyle::Title => Some("Title"),
            ParagraphStyle::Heading1 => Some("Heading1"),
            ParagraphStyle::Heading2 => Some("Heading2"),
            ParagraphStyle::Subtitle => Some("Subtitle"),
            ParagraphStyle::Bullet => Some("ListParagraph"),
        }
    }
}

/// Run of text sharing one set of character properties.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Run {
    text: String,
    bold: bool,
    italic: bool,
    strike: bool,
    code: bool,
}

impl Run {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Paragraph {
    style: ParagraphStyle,
    runs: Vec<Run>,
}

impl Paragraph {
    fn plain(style: ParagraphStyle, text: &str) -> Self {
        Self {
            style,
            runs: vec![Run::plain(text)],
        }
    }
}

/// Create a `.docx` at `output` for the given personal info and sections.
///
/// `created_at` is stored (as UTC) in the package core properties.
pub fn build_and_write_docx(
    output: &Path,
    personal: &PersonalInfo,
    sections: &[Section],
    created_at: OffsetDateTime,
) -> Result<()> {
    let timestamp = created_at
        .to_offset(UtcOffset::UTC)
        .format(&Rfc3339)
        .map_err(|err| anyhow::anyhow!("Failed to format document timestamp: {}", err))?;

    let document_xml = render_document_xml(&document_paragraphs(personal, sections));
    let core_xml = render_core_xml(personal.name.trim(), &timestamp);

    let file = File::create(output)
        .with_context(|| format!("Failed to write Word document {:?}", output))?;
    let mut zip = zip::ZipWriter::new(file);
    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts: [(&str, &str); 7] = [
        ("[Content_Types].xml", CONTENT_TYPES_XML),
        ("_rels/.rels", PACKAGE_RELS_XML),
        ("docProps/core.xml", &core_xml),
        ("word/document.xml", &document_xml),
        ("word/styles.xml", STYLES_XML),
        ("word/numbering.xml", NUMBERING_XML),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML),
    ];
    for (name, body) in parts {
        zip.start_file(name, options)
            .with_context(|| format!("Failed to add {} to document", name))?;
        zip.write_all(body.as_bytes())
            .with_context(|| format!("Failed to write {} into document", name))?;
    }

    zip.finish().context("Failed to finalize Word document")?;
    Ok(())
}

/// Lay out the resume as styled paragraphs, mirroring the Markdown export.
fn document_paragraphs(personal: &PersonalInfo, sections: &[Section]) -> Vec<Paragraph> {
    let mut out = Vec::new();

    let name = personal.name.trim();
    if !name.is_empty() {
        out.push(Paragraph::plain(ParagraphStyle::Title, name));
    }

    let contact = personal.contact_parts();
    if !contact.is_empty() {
        out.push(Paragraph::plain(ParagraphStyle::Normal, &contact.join(" | ")));
    }

    let summary = personal.summary.trim();
    if !summary.is_empty() {
        out.push(Paragraph::plain(ParagraphStyle::Normal, summary));
    }

    for section in sections.iter().filter(|s| s.has_content()) {
        out.push(Paragraph::plain(ParagraphStyle::Heading1, section.title.trim()));

        for entry in section.entries.iter().filter(|e| e.has_content()) {
            let title = entry.title.trim();
            out.push(Paragraph::plain(
                ParagraphStyle::Heading2,
                if title.is_empty() { UNTITLED_ENTRY } else { title },
            ));
            if let Some(meta) = entry_meta_line(entry) {
                out.push(Paragraph::plain(ParagraphStyle::Subtitle, &meta));
            }
            for detail in entry.details.iter().map(|d| d.trim()).filter(|d| !d.is_empty()) {
                out.push(Paragraph {
                    style: ParagraphStyle::Bullet,
                    runs: inline_runs(detail),
                });
            }
        }
    }

    out
}

/// Split a detail line written with inline Markdown emphasis into Word runs.
///
/// Only inline markup is honoured: block markers and entities stay literal,
/// and link targets are kept after the link text.
fn inline_runs(text: &str) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    let mut bold = 0usize;
    let mut italic = 0usize;
    let mut strike = 0usize;
    let mut link: Option<(String, String)> = None;

    let mut push = |text: &str, code: bool, bold: usize, italic: usize, strike: usize| {
        let run = Run {
            text: text.to_string(),
            bold: bold > 0,
            italic: italic > 0,
            strike: strike > 0,
            code,
        };
        // Merge with the previous run when formatting is identical.
        match runs.last_mut() {
            Some(last)
                if (last.bold, last.italic, last.strike, last.code)
                    == (run.bold, run.italic, run.strike, run.code) =>
            {
                last.text.push_str(&run.text)
            }
            _ => runs.push(run),
        }
    };

    let source = escape_block_syntax(text);
    for event in Parser::new_ext(&source, Options::ENABLE_STRIKETHROUGH) {
        match event {
            Event::Start(Tag::Strong) => bold += 1,
            Event::End(TagEnd::Strong) => bold = bold.saturating_sub(1),
            Event::Start(Tag::Emphasis) => italic += 1,
            Event::End(TagEnd::Emphasis) => italic = italic.saturating_sub(1),
            Event::Start(Tag::Strikethrough) => strike += 1,
            Event::End(TagEnd::Strikethrough) => strike = strike.saturating_sub(1),
            Event::Start(Tag::Link { dest_url, .. } | Tag::Image { dest_url, .. }) => {
                link = Some((dest_url.to_string(), String::new()));
            }
            Event::End(TagEnd::Link | TagEnd::Image) => {
                if let Some((dest, label)) = link.take()
                    && !dest.is_empty()
                    && dest != label
                {
                    push(&format!(" ({dest})"), false, bold, italic, strike);
                }
            }
            Event::Text(t) | Event::Html(t) | Event::InlineHtml(t) => {
                if let Some((_, label)) = link.as_mut() {
                    label.push_str(&t);
                }
                push(&t, false, bold, italic, strike)
            }
            Event::Code(t) => push(&t, true, bold, italic, strike),
            Event::SoftBreak | Event::HardBreak => push(" ", false, bold, italic, strike),
            _ => {}
        }
    }

    if runs.is_empty() {
        runs.push(Run::plain(text));
    }
    runs
}

/// Backslash-escape anything that would make a single detail line parse as a
/// block (heading, list, quote, fence, rule) and every `&` outside code spans.
fn escape_block_syntax(text: &str) -> String {
    let line = text.trim_start();
    let marker = block_marker_at(line);
    let mut out = String::with_capacity(line.len() + 8);
    let mut code_fence: Option<usize> = None;
    let mut chars = line.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if Some(idx) == marker {
            out.push('\\');
        }
        if ch == '`' {
            let mut ticks = 1;
            out.push(ch);
            while let Some((_, '`')) = chars.peek() {
                chars.next();
                ticks += 1;
                out.push('`');
            }
            code_fence = match code_fence {
                Some(open) if open == ticks => None,
                None => Some(ticks),
                other => other,
            };
            continue;
        }
        if ch == '&' && code_fence.is_none() {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Byte offset of the character that starts block syntax in `line`, if any.
fn block_marker_at(line: &str) -> Option<usize> {
    let first = line.chars().next()?;
    let rest = &line[first.len_utf8()..];
    match first {
        '#' | '>' => Some(0),
        '-' | '+' | '*' | '_' => {
            let list_item = first != '_' && (rest.is_empty() || rest.starts_with([' ', '\t']));
            let rule = rest.chars().all(|c| c == first || c == ' ' || c == '\t');
            (list_item || rule).then_some(0)
        }
        '`' | '~' => rest.chars().take(2).eq([first, first]).then_some(0),
        '0'..='9' => {
            let digits = line.find(|c: char| !c.is_ascii_digit())?;
            let after = line[digits..].strip_prefix(['.', ')'])?;
            let spaced = after.is_empty() || after.starts_with([' ', '\t']);
            (digits <= 9 && spaced).then_some(digits)
        }
        _ => None,
    }
}

fn render_document_xml(paragraphs: &[Paragraph]) -> String {
    let mut body = String::new();
    for paragraph in paragraphs {
        render_paragraph(&mut body, paragraph);
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{WORD_NS}"><w:body>{body}<w:sectPr><w:pgSz w:w="11906" w:h="16838"/><w:pgMar w:top="1134" w:right="1134" w:bottom="1134" w:left="1134" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr></w:body></w:document>"#
    )
}

fn render_paragraph(out: &mut String, paragraph: &Paragraph) {
    out.push_str("<w:p>");
    if let Some(style) = paragraph.style.style_id() {
        out.push_str("<w:pPr>");
        out.push_str(&format!(r#"<w:pStyle w:val="{style}"/>"#));
        if paragraph.style == ParagraphStyle::Bullet {
            out.push_str(&format!(
                r#"<w:numPr><w:ilvl w:val="0"/><w:numId w:val="{BULLET_NUM_ID}"/></w:numPr>"#
            ));
        }
        out.push_str("</w:pPr>");
    }
    for run in &paragraph.runs {
        render_run(out, run);
    }
    out.push_str("</w:p>");
}

fn render_run(out: &mut String, run: &Run) {
    out.push_str("<w:r>");
    if run.code || run.bold || run.italic || run.strike {
        // Child order follows the CT_RPr sequence.
        out.push_str("<w:rPr>");
        if run.code {
            out.push_str(&format!(
                r#"<w:rFonts w:ascii="{CODE_FONT}" w:hAnsi="{CODE_FONT}" w:cs="{CODE_FONT}"/>"#
            ));
        }
        if run.bold {
            out.push_str("<w:b/>");
        }
        if run.italic {
            out.push_str("<w:i/>");
        }
        if run.strike {
            out.push_str("<w:strike/>");
        }
        out.push_str("</w:rPr>");
    }
    out.push_str(r#"<w:t xml:space="preserve">"#);
    out.push_str(&escape_xml(&run.text));
    out.push_str("</w:t></w:r>");
}

fn render_core_xml(title: &str, timestamp: &str) -> String {
    let title = escape_xml(title);
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><dc:title>{title}</dc:title><dc:creator>{title}</dc:creator><cp:lastModifiedBy>resumebuilder</cp:lastModifiedBy><dcterms:created xsi:type="dcterms:W3CDTF">{timestamp}</dcterms:created><dcterms:modified xsi:type="dcterms:W3CDTF">{timestamp}</dcterms:modified></cp:coreProperties>"#
    )
}

/// Escape text for XML element content and attribute values.
///
/// Control characters other than tab/newline/carriage return are not allowed
/// in XML 1.0 and are dropped.
fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(ch),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

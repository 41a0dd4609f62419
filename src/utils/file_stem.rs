// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Turn a person's name into a filesystem-safe file stem.

/// Stem used when nothing usable is left after sanitizing.
pub const FALLBACK_STEM: &str = "resume";

/// Windows device names that cannot be used as a file stem.
const RESERVED_STEMS: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Produce a file stem (no extension) from free text such as a full name.
///
/// Unicode is transliterated to ASCII with `deunicode` ("Zoë" becomes "Zoe"),
/// anything outside `[A-Za-z0-9-]` becomes a single `_`, and leading or
/// trailing separators are trimmed. Blank results fall back to
/// [`FALLBACK_STEM`]; Windows device names get a trailing `_`.
pub fn sanitize_file_stem(value: &str) -> String {
    let transliterated = deunicode::deunicode(value);
    let mut out = String::with_capacity(transliterated.len());

    for ch in transliterated.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' {
            out.push(ch);
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
    }

    while out.ends_with('_') || out.ends_with('-') {
        out.pop();
    }

    if out.is_empty() {
        return FALLBACK_STEM.to_string();
    }

    if RESERVED_STEMS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(&out))
    {
        out.push('_');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transliterates_and_joins_words() {
        assert_eq!(sanitize_file_stem("Zoë Saldaña"), "Zoe_Saldana");
        assert_eq!(sanitize_file_stem("Åsa Berg CV 2025/11/25"), "Asa_Berg_CV_2025_11_25");
    }

    #[test]
    fn collapses_punctuation_and_trims_edges() {
        assert_eq!(sanitize_file_stem("  José O'Neil-Smith, PhD. "), "Jose_O_Neil-Smith_PhD");
        assert_eq!(sanitize_file_stem("../etc/passwd"), "etc_passwd");
    }

    #[test]
    fn falls_back_when_nothing_is_left() {
        assert_eq!(sanitize_file_stem("..."), FALLBACK_STEM);
        assert_eq!(sanitize_file_stem(""), FALLBACK_STEM);
    }

    #[test]
    fn guards_windows_device_names() {
        assert_eq!(sanitize_file_stem("con"), "con_");
        assert_eq!(sanitize_file_stem("LPT1"), "LPT1_");
    }
}

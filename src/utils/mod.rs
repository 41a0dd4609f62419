// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Shared helper utilities reused by UI and business logic.

pub mod file_stem;

/// Sanitize free text into a filesystem-safe file stem.
pub use file_stem::sanitize_file_stem;

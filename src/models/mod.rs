// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Domain layer: pure data types shared between UI, reorder logic, and export.

pub mod resume;

pub use resume::{Entry, EntryField, ItemId, PersonalField, PersonalInfo, Resume, Section};

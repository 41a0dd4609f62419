// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Business logic kept free of egui: drag-and-drop reordering and document export.

pub mod export;
pub mod reorder;

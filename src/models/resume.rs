// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Resume document model and the form-editing operations applied to it.
//!
//! Identifiers are globally unique across sections and entries; drag-and-drop
//! resolves targets by id alone, so the two id spaces must never collide.

use std::fmt;

use uuid::Uuid;

/// Opaque identifier shared by sections and entries.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    /// Allocate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Contact and headline data shown at the top of the resume.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub summary: String,
}

/// Editable personal info fields, used by the form to address a single value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PersonalField {
    Name,
    Email,
    Phone,
    Location,
    Website,
    Summary,
}

impl PersonalField {
    pub const ALL: [PersonalField; 6] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Location,
        Self::Website,
        Self::Summary,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Full name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Location => "Location",
            Self::Website => "Website",
            Self::Summary => "Summary",
        }
    }
}

impl PersonalInfo {
    pub fn get(&self, field: PersonalField) -> &str {
        match field {
            PersonalField::Name => &self.name,
            PersonalField::Email => &self.email,
            PersonalField::Phone => &self.phone,
            PersonalField::Location => &self.location,
            PersonalField::Website => &self.website,
            PersonalField::Summary => &self.summary,
        }
    }

    fn slot_mut(&mut self, field: PersonalField) -> &mut String {
        match field {
            PersonalField::Name => &mut self.name,
            PersonalField::Email => &mut self.email,
            PersonalField::Phone => &mut self.phone,
            PersonalField::Location => &mut self.location,
            PersonalField::Website => &mut self.website,
            PersonalField::Summary => &mut self.summary,
        }
    }

    /// Contact details in display order, skipping blank values.
    pub fn contact_parts(&self) -> Vec<&str> {
        [&self.email, &self.phone, &self.location, &self.website]
            .into_iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Single resume line item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub id: ItemId,
    pub title: String,
    pub subtitle: String,
    pub date: String,
    pub details: Vec<String>,
}

/// Single-line entry fields editable from the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryField {
    Title,
    Subtitle,
    Date,
}

impl Entry {
    /// Empty entry with a fresh id.
    pub fn new() -> Self {
        Self::with_id(ItemId::generate())
    }

    pub fn with_id(id: ItemId) -> Self {
        Self {
            id,
            title: String::new(),
            subtitle: String::new(),
            date: String::new(),
            details: Vec::new(),
        }
    }

    pub fn get(&self, field: EntryField) -> &str {
        match field {
            EntryField::Title => &self.title,
            EntryField::Subtitle => &self.subtitle,
            EntryField::Date => &self.date,
        }
    }

    /// Whether the entry carries any text worth exporting.
    pub fn has_content(&self) -> bool {
        !self.title.trim().is_empty()
            || !self.subtitle.trim().is_empty()
            || !self.date.trim().is_empty()
            || self.details.iter().any(|d| !d.trim().is_empty())
    }
}

impl Default for Entry {
    fn default() -> Self {
        Self::new()
    }
}

/// Named, ordered container of entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    pub id: ItemId,
    pub title: String,
    pub entries: Vec<Entry>,
}

impl Section {
    pub fn new(id: ItemId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            entries: Vec::new(),
        }
    }

    pub fn with_entries(mut self, entries: Vec<Entry>) -> Self {
        self.entries = entries;
        self
    }

    pub fn entry_index(&self, entry_id: &ItemId) -> Option<usize> {
        self.entries.iter().position(|e| &e.id == entry_id)
    }

    /// Whether any entry in this section would show up in an export.
    pub fn has_content(&self) -> bool {
        self.entries.iter().any(Entry::has_content)
    }
}

/// The whole resume document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resume {
    pub personal_info: PersonalInfo,
    pub sections: Vec<Section>,
}

impl Resume {
    /// Template shown on first launch: the usual resume sections, one empty entry each.
    pub fn starter() -> Self {
        let section = |id: &str, title: &str| {
            Section::new(ItemId::from(id), title)
                .with_entries(vec![Entry::with_id(ItemId::from(format!("{id}-1").as_str()))])
        };
        Self {
            personal_info: PersonalInfo::default(),
            sections: vec![
                section("experience", "Experience"),
                section("education", "Education"),
                section("skills", "Skills"),
            ],
        }
    }

    pub fn section_index(&self, id: &ItemId) -> Option<usize> {
        self.sections.iter().position(|s| &s.id == id)
    }

    pub fn find_section(&self, id: &ItemId) -> Option<&Section> {
        self.sections.iter().find(|s| &s.id == id)
    }

    fn section_mut(&mut self, id: &ItemId) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| &s.id == id)
    }

    fn entry_mut(&mut self, section_id: &ItemId, entry_id: &ItemId) -> Option<&mut Entry> {
        self.section_mut(section_id)?
            .entries
            .iter_mut()
            .find(|e| &e.id == entry_id)
    }

    /// Find `(section index, entry index)` of an entry anywhere in the document.
    pub fn locate_entry(&self, entry_id: &ItemId) -> Option<(usize, usize)> {
        self.sections
            .iter()
            .enumerate()
            .find_map(|(si, s)| s.entry_index(entry_id).map(|ei| (si, ei)))
    }

    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }

    pub fn section_ids(&self) -> Vec<&ItemId> {
        self.sections.iter().map(|s| &s.id).collect()
    }

    pub fn entry_ids(&self) -> Vec<&ItemId> {
        self.sections
            .iter()
            .flat_map(|s| s.entries.iter().map(|e| &e.id))
            .collect()
    }

    /// Whether an export would produce anything beyond an empty page.
    pub fn has_exportable_content(&self) -> bool {
        !self.personal_info.name.trim().is_empty() || self.sections.iter().any(Section::has_content)
    }

    pub fn update_personal_info(&mut self, field: PersonalField, value: String) {
        *self.personal_info.slot_mut(field) = value;
    }

    pub fn add_section(&mut self, title: impl Into<String>) -> ItemId {
        let id = ItemId::generate();
        self.sections.push(Section::new(id.clone(), title));
        id
    }

    pub fn rename_section(&mut self, id: &ItemId, title: String) {
        if let Some(section) = self.section_mut(id) {
            section.title = title;
        }
    }

    /// Remove a section and every entry it owns. Returns whether anything was removed.
    pub fn remove_section(&mut self, id: &ItemId) -> bool {
        let before = self.sections.len();
        self.sections.retain(|s| &s.id != id);
        self.sections.len() != before
    }

    /// Append an empty entry to the section and return its id.
    pub fn add_entry(&mut self, section_id: &ItemId) -> Option<ItemId> {
        let section = self.section_mut(section_id)?;
        let entry = Entry::new();
        let id = entry.id.clone();
        section.entries.push(entry);
        Some(id)
    }

    pub fn update_entry(
        &mut self,
        section_id: &ItemId,
        entry_id: &ItemId,
        field: EntryField,
        value: String,
    ) {
        if let Some(entry) = self.entry_mut(section_id, entry_id) {
            match field {
                EntryField::Title => entry.title = value,
                EntryField::Subtitle => entry.subtitle = value,
                EntryField::Date => entry.date = value,
            }
        }
    }

    pub fn add_detail(&mut self, section_id: &ItemId, entry_id: &ItemId) {
        if let Some(entry) = self.entry_mut(section_id, entry_id) {
            entry.details.push(String::new());
        }
    }

    pub fn update_detail(
        &mut self,
        section_id: &ItemId,
        entry_id: &ItemId,
        index: usize,
        value: String,
    ) {
        if let Some(slot) = self
            .entry_mut(section_id, entry_id)
            .and_then(|e| e.details.get_mut(index))
        {
            *slot = value;
        }
    }

    pub fn remove_detail(&mut self, section_id: &ItemId, entry_id: &ItemId, index: usize) {
        if let Some(entry) = self.entry_mut(section_id, entry_id)
            && index < entry.details.len()
        {
            entry.details.remove(index);
        }
    }

    /// Remove an entry from its section. Returns whether anything was removed.
    pub fn remove_entry(&mut self, section_id: &ItemId, entry_id: &ItemId) -> bool {
        let Some(section) = self.section_mut(section_id) else {
            return false;
        };
        let before = section.entries.len();
        section.entries.retain(|e| &e.id != entry_id);
        section.entries.len() != before
    }
}

use super::fields::required;
use crate::errors::ValidationError;
use crate::persistence::Record;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Note folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteCategory {
    #[default]
    Study,
    Personal,
    Projects,
    Important,
}

impl NoteCategory {
    pub fn name(&self) -> &'static str {
        match self {
            NoteCategory::Study => "Study",
            NoteCategory::Personal => "Personal",
            NoteCategory::Projects => "Projects",
            NoteCategory::Important => "Important",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ValidationError::Unparsable {
                field: "category",
                value: value.trim().to_string(),
            })
    }

    pub fn all() -> &'static [NoteCategory] {
        &[
            NoteCategory::Study,
            NoteCategory::Personal,
            NoteCategory::Projects,
            NoteCategory::Important,
        ]
    }

    /// Cycle for the category filter: None (all notes) -> each category -> None
    pub fn next_filter(current: Option<NoteCategory>) -> Option<NoteCategory> {
        let all = Self::all();
        match current {
            None => all.first().copied(),
            Some(category) => {
                let index = all.iter().position(|c| *c == category).unwrap_or(0);
                all.get(index + 1).copied()
            }
        }
    }
}

/// Card color of a note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteColor {
    #[default]
    Gray,
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
}

impl NoteColor {
    pub fn name(&self) -> &'static str {
        match self {
            NoteColor::Gray => "Gray",
            NoteColor::Red => "Red",
            NoteColor::Blue => "Blue",
            NoteColor::Green => "Green",
            NoteColor::Yellow => "Yellow",
            NoteColor::Purple => "Purple",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ValidationError::Unparsable {
                field: "color",
                value: value.trim().to_string(),
            })
    }

    pub fn all() -> &'static [NoteColor] {
        &[
            NoteColor::Gray,
            NoteColor::Red,
            NoteColor::Blue,
            NoteColor::Green,
            NoteColor::Yellow,
            NoteColor::Purple,
        ]
    }
}

/// A free-form note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: NoteCategory,
    #[serde(default)]
    pub color: NoteColor,
    pub created_at: DateTime<Local>,
    pub updated_at: DateTime<Local>,
}

impl Note {
    pub fn new(
        title: &str,
        content: &str,
        category: NoteCategory,
        color: NoteColor,
    ) -> Result<Self, ValidationError> {
        let title = required("Note title", title)?;
        let now = Local::now();
        Ok(Self {
            id: Uuid::new_v4(),
            title,
            content: content.to_string(),
            category,
            color,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply an edit. Nothing changes if the new title is blank.
    pub fn edit(
        &mut self,
        title: &str,
        content: &str,
        category: NoteCategory,
        color: NoteColor,
    ) -> Result<(), ValidationError> {
        let title = required("Note title", title)?;
        self.title = title;
        self.content = content.to_string();
        self.category = category;
        self.color = color;
        self.updated_at = Local::now();
        Ok(())
    }

    /// Case-insensitive match on title or content; empty term matches everything
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.title.to_lowercase().contains(&term)
            || self.content.to_lowercase().contains(&term)
    }

    /// First line of the content, cut to `max_chars`
    pub fn preview(&self, max_chars: usize) -> String {
        let first_line = self.content.lines().next().unwrap_or("");
        if first_line.chars().count() > max_chars {
            let cut: String = first_line.chars().take(max_chars).collect();
            format!("{}…", cut)
        } else {
            first_line.to_string()
        }
    }
}

impl Record for Note {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Notes matching both the search term and the category (None = all)
pub fn filter_notes<'a>(
    notes: &'a [Note],
    search: &str,
    category: Option<NoteCategory>,
) -> Vec<&'a Note> {
    notes
        .iter()
        .filter(|n| n.matches_search(search))
        .filter(|n| category.map_or(true, |c| n.category == c))
        .collect()
}

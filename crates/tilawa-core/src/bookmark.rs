use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A saved reading position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: Uuid,
    pub surah_number: u32,
    /// English surah name at the time the bookmark was saved
    pub surah_name: String,
    pub verse_number: u32,
    pub title: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new bookmark
#[derive(Debug, Clone)]
pub struct NewBookmark {
    pub surah_number: u32,
    pub surah_name: String,
    pub verse_number: u32,
    pub title: String,
    pub notes: Option<String>,
}

impl NewBookmark {
    /// Bookmark with the default title and no notes
    pub fn new(surah_number: u32, surah_name: &str, verse_number: u32) -> Self {
        Self {
            surah_number,
            surah_name: surah_name.to_string(),
            verse_number,
            title: default_title(surah_name, verse_number),
            notes: None,
        }
    }

    /// Replace the title unless `title` is blank
    pub fn with_title(mut self, title: &str) -> Self {
        let title = title.trim();
        if !title.is_empty() {
            self.title = title.to_string();
        }
        self
    }

    /// Attach notes; blank notes are dropped
    pub fn with_notes(mut self, notes: &str) -> Self {
        let notes = notes.trim();
        self.notes = (!notes.is_empty()).then(|| notes.to_string());
        self
    }
}

/// Title suggested for a new bookmark
pub fn default_title(surah_name: &str, verse_number: u32) -> String {
    format!("{} - Ayah {}", surah_name, verse_number)
}

impl Bookmark {
    /// Parse a bookmark id as printed by `bookmarks list`
    pub fn parse_id(id: &str) -> crate::Result<Uuid> {
        Uuid::parse_str(id.trim()).map_err(|_| crate::Error::InvalidBookmarkId(id.to_string()))
    }

    /// Case-insensitive match on surah name, title or notes
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.surah_name.to_lowercase().contains(&query)
            || self.title.to_lowercase().contains(&query)
            || self
                .notes
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(&query))
    }

    /// Short location label, e.g. "2:255"
    pub fn reference(&self) -> String {
        format!("{}:{}", self.surah_number, self.verse_number)
    }
}

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::Database;
use crate::bookmark::{Bookmark, NewBookmark};
use crate::Result;

/// Repository for bookmark CRUD operations
pub struct BookmarkRepository<'a> {
    db: &'a Database,
}

#[derive(FromRow)]
struct BookmarkRow {
    id: String,
    surah_number: i64,
    surah_name: String,
    verse_number: i64,
    title: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<BookmarkRow> for Bookmark {
    fn from(row: BookmarkRow) -> Self {
        Bookmark {
            id: Uuid::parse_str(&row.id).unwrap_or_default(),
            surah_number: u32::try_from(row.surah_number).unwrap_or_default(),
            surah_name: row.surah_name,
            verse_number: u32::try_from(row.verse_number).unwrap_or_default(),
            title: row.title,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}

impl<'a> BookmarkRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Save a bookmark and return its new id
    pub async fn save(&self, new_bookmark: &NewBookmark) -> Result<Uuid> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO bookmarks (id, surah_number, surah_name, verse_number, title, notes, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id.to_string())
        .bind(i64::from(new_bookmark.surah_number))
        .bind(&new_bookmark.surah_name)
        .bind(i64::from(new_bookmark.verse_number))
        .bind(&new_bookmark.title)
        .bind(&new_bookmark.notes)
        .bind(now)
        .execute(self.db.pool())
        .await?;

        tracing::debug!(
            bookmark = %id,
            surah = new_bookmark.surah_number,
            verse = new_bookmark.verse_number,
            "Bookmark saved"
        );
        Ok(id)
    }

    /// Find a bookmark by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Bookmark>> {
        let row: Option<BookmarkRow> = sqlx::query_as(
            r#"
            SELECT id, surah_number, surah_name, verse_number, title, notes, created_at
            FROM bookmarks
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(Bookmark::from))
    }

    /// All bookmarks, newest first
    pub async fn list(&self) -> Result<Vec<Bookmark>> {
        let rows: Vec<BookmarkRow> = sqlx::query_as(
            r#"
            SELECT id, surah_number, surah_name, verse_number, title, notes, created_at
            FROM bookmarks
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.into_iter().map(Bookmark::from).collect())
    }

    /// Delete a bookmark; returns false if it did not exist
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE id = ?")
            .bind(id.to_string())
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

use anyhow::{anyhow, Result};

use tilawa_core::bookmark::{Bookmark, NewBookmark};
use tilawa_core::quran::{QuranClient, QuranProvider, Surah};
use tilawa_core::storage::{BookmarkRepository, Database};
use tilawa_core::{AppConfig, Error};

pub async fn list(db: &Database) -> Result<()> {
    let bookmarks = BookmarkRepository::new(db).list().await?;

    if bookmarks.is_empty() {
        println!("No bookmarks yet.");
        println!("\nTo add one, run:");
        println!("  tilawa bookmarks add <surah> <verse>");
        return Ok(());
    }

    println!("Bookmarks ({}):\n", bookmarks.len());

    for bookmark in &bookmarks {
        println!(
            "  {} [{}] {}",
            bookmark.reference(),
            bookmark.created_at.format("%Y-%m-%d %H:%M"),
            bookmark.title
        );
        if let Some(notes) = &bookmark.notes {
            println!("    {}", notes);
        }
        println!("    id: {}", bookmark.id);
    }

    Ok(())
}

pub async fn add(
    db: &Database,
    config: &AppConfig,
    surah: u32,
    verse: u32,
    title: Option<&str>,
    notes: Option<&str>,
) -> Result<()> {
    Surah::validate_number(surah)?;

    // The surah name is only used for display; fall back if the API is down
    let meta = match QuranClient::new(config)?.list_surahs().await {
        Ok(surahs) => surahs.into_iter().find(|s| s.number == surah),
        Err(e) => {
            tracing::warn!("Could not fetch surah index: {}", e);
            None
        }
    };
    if let Some(meta) = &meta {
        if verse == 0 || verse > meta.verse_count {
            return Err(anyhow!(
                "{} has {} ayahs, got {}",
                meta.english_name,
                meta.verse_count,
                verse
            ));
        }
    }
    let surah_name = meta
        .map(|m| m.english_name)
        .unwrap_or_else(|| format!("Surah {}", surah));

    let new_bookmark = NewBookmark::new(surah, &surah_name, verse)
        .with_title(title.unwrap_or(""))
        .with_notes(notes.unwrap_or(""));
    let id = BookmarkRepository::new(db).save(&new_bookmark).await?;

    println!("Bookmarked {}:{} \"{}\"", surah, verse, new_bookmark.title);
    println!("  id: {}", id);
    Ok(())
}

pub async fn delete(db: &Database, id: &str) -> Result<()> {
    let id = Bookmark::parse_id(id)?;

    if BookmarkRepository::new(db).delete(id).await? {
        println!("Deleted bookmark {}", id);
        Ok(())
    } else {
        Err(Error::BookmarkNotFound(id.to_string()).into())
    }
}

use anyhow::Result;

use tilawa_core::quran::{QuranClient, QuranProvider};
use tilawa_core::storage::{Database, ReaderPreferences, SettingsRepository};
use tilawa_core::AppConfig;

pub async fn run(
    db: &Database,
    config: &AppConfig,
    surah: u32,
    edition: Option<String>,
    no_translation: bool,
) -> Result<()> {
    let prefs = ReaderPreferences::load(&SettingsRepository::new(db), config).await?;
    let edition = edition.unwrap_or(prefs.translation_edition);
    let show_translation = prefs.show_translation && !no_translation;

    let client = QuranClient::new(config)?;
    let text = client.surah_verses(surah, &edition).await?;

    let info = &text.surah;
    println!(
        "{}. {} ({}) · {} · {} ayahs\n",
        info.number,
        info.english_name,
        info.english_name_translation,
        info.revelation_place.as_str(),
        info.verse_count
    );

    for verse in &text.verses {
        println!("[{}] {}", verse.number, verse.arabic_text);
        if show_translation && !verse.translation_text.is_empty() {
            println!("    {}", verse.translation_text);
        }
        println!();
    }

    Ok(())
}

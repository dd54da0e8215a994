use anyhow::Result;

use tilawa_core::quran::{filter_surahs, QuranClient, QuranProvider};
use tilawa_core::AppConfig;

pub async fn run(config: &AppConfig, search: Option<&str>) -> Result<()> {
    let client = QuranClient::new(config)?;
    let surahs = client.list_surahs().await?;
    let matches = filter_surahs(&surahs, search.unwrap_or(""));

    if matches.is_empty() {
        println!("No surahs match \"{}\".", search.unwrap_or(""));
        return Ok(());
    }

    for surah in matches {
        println!(
            "{:>3}. {:<18} {:<28} {:<8} {:>3} ayahs  {}",
            surah.number,
            surah.english_name,
            surah.english_name_translation,
            surah.revelation_place.as_str(),
            surah.verse_count,
            surah.name
        );
    }

    Ok(())
}

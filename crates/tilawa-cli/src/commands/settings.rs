use anyhow::Result;

use tilawa_core::storage::{Database, ReaderPreferences, SettingKey, SettingsRepository};
use tilawa_core::AppConfig;

fn effective_value(prefs: &ReaderPreferences, key: SettingKey) -> String {
    match key {
        SettingKey::Theme => prefs.theme.as_str().to_string(),
        SettingKey::ScrollSpeed => prefs.scroll_speed.to_string(),
        SettingKey::ShowTranslation => prefs.show_translation.to_string(),
        SettingKey::TranslationEdition => prefs.translation_edition.clone(),
    }
}

pub async fn list(db: &Database, config: &AppConfig) -> Result<()> {
    let repo = SettingsRepository::new(db);
    let stored = repo.list().await?;
    let prefs = ReaderPreferences::load(&repo, config).await?;

    for key in SettingKey::ALL {
        let source = if stored.iter().any(|(k, _)| k == key.as_str()) {
            ""
        } else {
            " (default)"
        };
        println!("{:<20} {}{}", key, effective_value(&prefs, key), source);
    }

    Ok(())
}

pub async fn get(db: &Database, config: &AppConfig, key: &str) -> Result<()> {
    let key = SettingKey::parse(key)?;
    let prefs = ReaderPreferences::load(&SettingsRepository::new(db), config).await?;
    println!("{}", effective_value(&prefs, key));
    Ok(())
}

pub async fn set(db: &Database, key: &str, value: &str) -> Result<()> {
    let key = SettingKey::parse(key)?;
    let stored = SettingsRepository::new(db).set(key, value).await?;
    println!("{} = {}", key, stored);
    Ok(())
}

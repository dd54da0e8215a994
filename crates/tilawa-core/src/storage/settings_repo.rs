use chrono::Utc;
use std::fmt;

use super::Database;
use crate::config::{AppConfig, ThemeMode};
use crate::reading::clamp_rate_percent;
use crate::{Error, Result};

/// Keys persisted in the settings table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    Theme,
    ScrollSpeed,
    ShowTranslation,
    TranslationEdition,
}

impl SettingKey {
    pub const ALL: [SettingKey; 4] = [
        SettingKey::Theme,
        SettingKey::ScrollSpeed,
        SettingKey::ShowTranslation,
        SettingKey::TranslationEdition,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::Theme => "theme",
            SettingKey::ScrollSpeed => "scroll_speed",
            SettingKey::ShowTranslation => "show_translation",
            SettingKey::TranslationEdition => "translation_edition",
        }
    }

    pub fn parse(key: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == key.trim())
            .ok_or_else(|| {
                Error::Config(format!(
                    "Unknown setting '{}' (expected one of: theme, scroll_speed, show_translation, translation_edition)",
                    key
                ))
            })
    }

    /// Validate and normalize a value before it is stored
    pub fn normalize(&self, value: &str) -> Result<String> {
        let value = value.trim();
        match self {
            SettingKey::Theme => ThemeMode::parse(value)
                .map(|t| t.as_str().to_string())
                .ok_or_else(|| Error::Config(format!("Invalid theme '{}' (light|dark)", value))),
            SettingKey::ScrollSpeed => value
                .parse::<u32>()
                .map(|p| clamp_rate_percent(p).to_string())
                .map_err(|_| Error::Config(format!("Invalid scroll speed '{}' (10-100)", value))),
            SettingKey::ShowTranslation => parse_bool(value)
                .map(|b| b.to_string())
                .ok_or_else(|| Error::Config(format!("Invalid boolean '{}'", value))),
            SettingKey::TranslationEdition if value.is_empty() => {
                Err(Error::Config("Translation edition cannot be empty".to_string()))
            }
            SettingKey::TranslationEdition => Ok(value.to_string()),
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Key-value store for user preferences
pub struct SettingsRepository<'a> {
    db: &'a Database,
}

impl<'a> SettingsRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub async fn get(&self, key: SettingKey) -> Result<Option<String>> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM settings WHERE key = ?")
            .bind(key.as_str())
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.map(|(value,)| value))
    }

    /// Store a value after normalizing it for the key
    pub async fn set(&self, key: SettingKey, value: &str) -> Result<String> {
        let value = key.normalize(value)?;

        sqlx::query(
            r#"
            INSERT INTO settings (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(key.as_str())
        .bind(&value)
        .bind(Utc::now())
        .execute(self.db.pool())
        .await?;

        tracing::debug!(key = key.as_str(), value = %value, "Setting saved");
        Ok(value)
    }

    /// All stored settings ordered by key
    pub async fn list(&self) -> Result<Vec<(String, String)>> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT key, value FROM settings ORDER BY key ASC")
                .fetch_all(self.db.pool())
                .await?;

        Ok(rows)
    }
}

/// Reading preferences with config defaults for anything not stored
#[derive(Debug, Clone, PartialEq)]
pub struct ReaderPreferences {
    pub theme: ThemeMode,
    /// Auto-scroll speed percent (10-100)
    pub scroll_speed: u32,
    pub show_translation: bool,
    pub translation_edition: String,
}

impl ReaderPreferences {
    pub fn defaults(config: &AppConfig) -> Self {
        Self {
            theme: config.ui.theme,
            scroll_speed: clamp_rate_percent(config.reading.default_speed_percent),
            show_translation: config.reading.show_translation,
            translation_edition: config.api.translation_edition.clone(),
        }
    }

    /// Load stored preferences, falling back to defaults for absent or
    /// unparsable values
    pub async fn load(repo: &SettingsRepository<'_>, config: &AppConfig) -> Result<Self> {
        let mut prefs = Self::defaults(config);

        if let Some(theme) = repo.get(SettingKey::Theme).await?.as_deref().and_then(ThemeMode::parse) {
            prefs.theme = theme;
        }
        if let Some(speed) = repo
            .get(SettingKey::ScrollSpeed)
            .await?
            .and_then(|v| v.trim().parse::<u32>().ok())
        {
            prefs.scroll_speed = clamp_rate_percent(speed);
        }
        if let Some(show) = repo
            .get(SettingKey::ShowTranslation)
            .await?
            .as_deref()
            .and_then(parse_bool)
        {
            prefs.show_translation = show;
        }
        if let Some(edition) = repo
            .get(SettingKey::TranslationEdition)
            .await?
            .filter(|v| !v.trim().is_empty())
        {
            prefs.translation_edition = edition;
        }

        Ok(prefs)
    }
}

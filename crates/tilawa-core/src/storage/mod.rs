mod bookmark_repo;
mod database;
mod settings_repo;

pub use bookmark_repo::BookmarkRepository;
pub use database::Database;
pub use settings_repo::{ReaderPreferences, SettingKey, SettingsRepository};

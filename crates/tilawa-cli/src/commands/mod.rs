pub mod bookmarks;
pub mod read;
pub mod run;
pub mod settings;
pub mod surahs;

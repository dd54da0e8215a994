pub mod bookmark;
pub mod config;
pub mod error;
pub mod quran;
pub mod reading;
pub mod storage;

pub use config::{AppConfig, EasingType, ScrollConfig, ThemeMode};
pub use error::{Error, Result};

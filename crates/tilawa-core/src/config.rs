use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub reading: ReadingConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the alquran.cloud compatible API
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    /// Edition used for the Arabic text
    #[serde(default = "default_arabic_edition")]
    pub arabic_edition: String,
    /// Default translation edition (e.g., "en.asad", "en.sahih")
    #[serde(default = "default_translation_edition")]
    pub translation_edition: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// HTTP proxy URL (e.g., "http://127.0.0.1:7890")
    #[serde(default)]
    pub proxy_url: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            arabic_edition: default_arabic_edition(),
            translation_edition: default_translation_edition(),
            request_timeout_secs: default_timeout(),
            proxy_url: None,
        }
    }
}

/// Reading mode parameters shared by the scroll driver and viewport tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingConfig {
    /// Auto-scroll speed used when no preference has been saved (10-100)
    #[serde(default = "default_speed_percent")]
    pub default_speed_percent: u32,
    /// Scroll rate in pixels per second at 100% speed
    #[serde(default = "default_max_speed")]
    pub max_speed_px_per_sec: f64,
    /// Distance from the end of content at which auto-scroll stops
    #[serde(default = "default_end_margin")]
    pub end_margin_px: f64,
    /// Minimum visible fraction for a verse to become active (0.0-1.0)
    #[serde(default = "default_visibility_threshold")]
    pub visibility_threshold: f64,
    /// Use the sampled topmost-visible fallback instead of ratio tracking
    #[serde(default)]
    pub visibility_sampling: bool,
    /// Sample interval for the fallback tracker in milliseconds
    #[serde(default = "default_sample_interval")]
    pub sample_interval_ms: u64,
    /// Engine pixels per terminal row
    #[serde(default = "default_row_height")]
    pub row_height_px: f64,
    /// Show translation when no preference has been saved
    #[serde(default = "default_true")]
    pub show_translation: bool,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            default_speed_percent: default_speed_percent(),
            max_speed_px_per_sec: default_max_speed(),
            end_margin_px: default_end_margin(),
            visibility_threshold: default_visibility_threshold(),
            visibility_sampling: false,
            sample_interval_ms: default_sample_interval(),
            row_height_px: default_row_height(),
            show_translation: default_true(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds when nothing is animating
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Theme used when no preference has been saved
    #[serde(default)]
    pub theme: ThemeMode,
    /// Smooth scrolling for verse jumps
    #[serde(default)]
    pub scroll: ScrollConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            theme: ThemeMode::default(),
            scroll: ScrollConfig::default(),
        }
    }
}

/// Light or dark color scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

/// Easing curve for smooth jumps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animate verse jumps instead of landing immediately
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Jump animation duration in milliseconds
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    /// Easing curve for jump animations
    #[serde(default)]
    pub easing: EasingType,
    /// Frame rate while auto-scroll or a jump is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_animation_duration(),
            easing: EasingType::default(),
            animation_fps: default_animation_fps(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tilawa")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_api_base_url() -> String {
    "https://api.alquran.cloud/v1".to_string()
}

fn default_arabic_edition() -> String {
    "quran-uthmani".to_string()
}

fn default_translation_edition() -> String {
    "en.asad".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_speed_percent() -> u32 {
    50
}

fn default_max_speed() -> f64 {
    40.0
}

fn default_end_margin() -> f64 {
    20.0
}

fn default_visibility_threshold() -> f64 {
    0.3
}

fn default_sample_interval() -> u64 {
    250
}

fn default_row_height() -> f64 {
    16.0
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_duration() -> u64 {
    300
}

fn default_animation_fps() -> u32 {
    60
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/tilawa/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("tilawa")
            .join("config.toml")
    }

    /// Get the database file path
    pub fn database_path(&self) -> PathBuf {
        self.data_dir().join("tilawa.db")
    }

    /// Get the log file path used while the TUI owns the terminal
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("tilawa.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "https://api.alquran.cloud/v1");
        assert_eq!(config.api.translation_edition, "en.asad");
        assert_eq!(config.reading.default_speed_percent, 50);
        assert!((config.reading.max_speed_px_per_sec - 40.0).abs() < f64::EPSILON);
        assert!((config.reading.end_margin_px - 20.0).abs() < f64::EPSILON);
        assert!((config.reading.visibility_threshold - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.ui.theme, ThemeMode::Dark);
        assert_eq!(config.ui.scroll.easing, EasingType::Cubic);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [reading]
            end_margin_px = 40.0

            [ui]
            theme = "light"

            [ui.scroll]
            easing = "ease_out"
            "#,
        )
        .unwrap();

        assert!((config.reading.end_margin_px - 40.0).abs() < f64::EPSILON);
        assert_eq!(config.reading.default_speed_percent, 50);
        assert_eq!(config.ui.theme, ThemeMode::Light);
        assert_eq!(config.ui.scroll.easing, EasingType::EaseOut);
        assert!(config.ui.scroll.smooth_enabled);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml("[reading]\nend_margin_px = \"far\"").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_theme_mode_parse_and_toggle() {
        assert_eq!(ThemeMode::parse("Dark"), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::parse(" light "), Some(ThemeMode::Light));
        assert_eq!(ThemeMode::parse("sepia"), None);
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
    }

    #[test]
    fn test_expand_tilde_passthrough() {
        let path = PathBuf::from("/var/lib/tilawa");
        assert_eq!(expand_tilde(&path), path);
    }
}

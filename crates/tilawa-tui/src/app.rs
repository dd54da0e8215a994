use std::sync::Arc;
use std::time::Instant;

use tilawa_core::bookmark::{default_title, Bookmark, NewBookmark};
use tilawa_core::quran::{filter_surahs, Surah, SurahText, SURAH_COUNT};
use tilawa_core::reading::{clamp_rate_percent, ReaderEngine, ReadingEvent};
use tilawa_core::storage::ReaderPreferences;
use tilawa_core::{AppConfig, ThemeMode};
use uuid::Uuid;

use crate::layout::VerseLayout;
use crate::theme::Theme;

/// Speed change per `+`/`-` press, in percent
pub const SPEED_STEP: i32 = 5;

/// Top-level tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Surahs,
    Bookmarks,
    Reading,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Surahs, Tab::Bookmarks, Tab::Reading];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Surahs => "Surahs",
            Tab::Bookmarks => "Bookmarks",
            Tab::Reading => "Reading",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Surahs => 0,
            Tab::Bookmarks => 1,
            Tab::Reading => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Which field of the bookmark dialog receives input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Notes,
}

/// Bookmark being edited in the dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkDraft {
    pub surah_number: u32,
    pub surah_name: String,
    pub verse_number: u32,
    pub title: String,
    pub notes: String,
    pub field: DraftField,
}

impl BookmarkDraft {
    pub fn new(surah_number: u32, surah_name: &str, verse_number: u32) -> Self {
        Self {
            surah_number,
            surah_name: surah_name.to_string(),
            verse_number,
            title: default_title(surah_name, verse_number),
            notes: String::new(),
            field: DraftField::Title,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.field_mut().push(c);
    }

    pub fn backspace(&mut self) {
        self.field_mut().pop();
    }

    pub fn next_field(&mut self) {
        self.field = match self.field {
            DraftField::Title => DraftField::Notes,
            DraftField::Notes => DraftField::Title,
        };
    }

    pub fn to_new_bookmark(&self) -> NewBookmark {
        NewBookmark::new(self.surah_number, &self.surah_name, self.verse_number)
            .with_title(&self.title)
            .with_notes(&self.notes)
    }

    fn field_mut(&mut self) -> &mut String {
        match self.field {
            DraftField::Title => &mut self.title,
            DraftField::Notes => &mut self.notes,
        }
    }
}

/// Application mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Normal browsing mode
    Normal,
    /// Incremental search on the current list tab
    Search,
    /// Verse number input for a jump
    JumpInput(String),
    /// Bookmark dialog
    BookmarkDialog(BookmarkDraft),
    /// Bookmark delete confirmation
    DeleteConfirm(Uuid),
    /// Help overlay
    Help,
}

/// The open surah and its reading engine
pub struct ReadingState {
    pub text: SurahText,
    pub engine: ReaderEngine,
    pub layout: VerseLayout,
}

impl ReadingState {
    pub fn surah_number(&self) -> u32 {
        self.text.surah.number
    }

    pub fn verse_count(&self) -> u32 {
        self.text.verses.len() as u32
    }

    /// Active verse, or the first verse before tracking has reported one
    pub fn current_verse(&self) -> u32 {
        self.engine
            .active_verse()
            .or_else(|| self.text.verses.first().map(|v| v.number))
            .unwrap_or(1)
    }

    /// Footer label for the active verse, e.g. " Ayah 5/7 · Juz 1 · Page 2 "
    pub fn position_label(&self) -> String {
        match self.engine.active_verse() {
            Some(number) => match self.text.verse(number) {
                Some(verse) => format!(
                    " Ayah {}/{} · Juz {} · Page {} ",
                    number,
                    self.verse_count(),
                    verse.juz,
                    verse.page
                ),
                None => format!(" Ayah {}/{} ", number, self.verse_count()),
            },
            None => format!(" {} ayahs ", self.verse_count()),
        }
    }

    /// First visible layout row
    pub fn first_row(&self) -> usize {
        self.layout.first_row(self.engine.scroll_offset())
    }
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub prefs: ReaderPreferences,
    pub tab: Tab,
    pub mode: Mode,
    /// Surah index
    pub surahs: Vec<Surah>,
    /// Selected index into the visible (filtered) surahs
    pub selected_surah: usize,
    pub surah_query: String,
    /// Bookmarks, newest first
    pub bookmarks: Vec<Bookmark>,
    pub selected_bookmark: usize,
    pub bookmark_query: String,
    pub reading: Option<ReadingState>,
    /// Surah whose text is being fetched; stale results are dropped
    pub pending_surah: Option<u32>,
    /// Inner size of the reading pane in terminal cells
    pub reading_area: (u16, u16),
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message
    pub status_message: Option<String>,
}

impl App {
    pub fn new(config: Arc<AppConfig>, prefs: ReaderPreferences) -> Self {
        Self {
            config,
            theme: Theme::for_mode(prefs.theme),
            prefs,
            tab: Tab::Surahs,
            mode: Mode::Normal,
            surahs: Vec::new(),
            selected_surah: 0,
            surah_query: String::new(),
            bookmarks: Vec::new(),
            selected_bookmark: 0,
            bookmark_query: String::new(),
            reading: None,
            pending_surah: None,
            reading_area: (80, 20),
            should_quit: false,
            status_message: None,
        }
    }

    /// Surahs matching the current search
    pub fn visible_surahs(&self) -> Vec<&Surah> {
        filter_surahs(&self.surahs, &self.surah_query)
    }

    /// Bookmarks matching the current search
    pub fn visible_bookmarks(&self) -> Vec<&Bookmark> {
        self.bookmarks
            .iter()
            .filter(|b| b.matches(&self.bookmark_query))
            .collect()
    }

    pub fn selected_surah_number(&self) -> Option<u32> {
        self.visible_surahs()
            .get(self.selected_surah)
            .map(|s| s.number)
    }

    pub fn selected_bookmark(&self) -> Option<&Bookmark> {
        self.visible_bookmarks().get(self.selected_bookmark).copied()
    }

    /// Metadata for a surah number, if the index is loaded
    pub fn surah_meta(&self, number: u32) -> Option<&Surah> {
        self.surahs.iter().find(|s| s.number == number)
    }

    pub fn set_surahs(&mut self, surahs: Vec<Surah>) {
        self.surahs = surahs;
        self.clamp_selection();
    }

    pub fn set_bookmarks(&mut self, bookmarks: Vec<Bookmark>) {
        self.bookmarks = bookmarks;
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let surahs = self.visible_surahs().len();
        self.selected_surah = self.selected_surah.min(surahs.saturating_sub(1));
        let bookmarks = self.visible_bookmarks().len();
        self.selected_bookmark = self.selected_bookmark.min(bookmarks.saturating_sub(1));
    }

    /// Active verse of the open surah
    pub fn active_verse(&self) -> Option<u32> {
        self.reading.as_ref().and_then(|r| r.engine.active_verse())
    }

    /// Whether the event loop should run at animation rate
    pub fn needs_frames(&self) -> bool {
        self.reading
            .as_ref()
            .is_some_and(|r| r.engine.needs_frames())
    }

    /// Record that a surah is being fetched; returns `None` when out of range
    pub fn begin_surah_load(&mut self, number: u32) -> Option<u32> {
        if !(1..=SURAH_COUNT).contains(&number) {
            return None;
        }
        self.pending_surah = Some(number);
        let label = self
            .surah_meta(number)
            .map(|s| s.english_name.clone())
            .unwrap_or_else(|| format!("surah {}", number));
        self.set_status(format!("Loading {}...", label));
        Some(number)
    }

    /// Install fetched surah text. Returns `false` for a stale result.
    pub fn accept_surah(&mut self, text: SurahText, jump_to: Option<u32>) -> bool {
        if self.pending_surah != Some(text.surah.number) {
            tracing::debug!(surah = text.surah.number, "Dropping stale surah result");
            return false;
        }
        self.pending_surah = None;

        let (width, height) = self.reading_area;
        let layout = VerseLayout::build(
            &text.verses,
            width,
            self.prefs.show_translation,
            self.config.reading.row_height_px,
        );

        // Reuse the engine so a running session is stopped by the new layout
        let mut engine = match self.reading.take() {
            Some(previous) => previous.engine,
            None => ReaderEngine::from_config(&self.config),
        };
        engine.load_layout(
            layout.blocks.clone(),
            layout.content_height(),
            layout.rows_to_px(height),
        );
        engine.drain_events();

        tracing::info!(
            surah = text.surah.number,
            verses = text.verses.len(),
            "Opened surah"
        );
        self.set_status(format!(
            "{} ({}) - {} ayahs",
            text.surah.english_name,
            text.surah.english_name_translation,
            text.verses.len()
        ));

        let mut state = ReadingState {
            text,
            engine,
            layout,
        };
        if let Some(verse) = jump_to {
            if !state.engine.scroll_to(verse) {
                self.set_status(format!("Ayah {} not found", verse));
            }
        }
        self.reading = Some(state);
        self.tab = Tab::Reading;
        true
    }

    /// A surah fetch failed
    pub fn reject_surah(&mut self, number: u32, error: &str) {
        if self.pending_surah == Some(number) {
            self.pending_surah = None;
        }
        self.set_status(format!("Failed to load surah {}: {}", number, error));
    }

    /// Update the reading pane size, re-laying out if the width changed
    pub fn set_reading_area(&mut self, width: u16, height: u16) {
        if self.reading_area == (width, height) {
            return;
        }
        let width_changed = self.reading_area.0 != width;
        self.reading_area = (width, height);

        if let Some(reading) = self.reading.as_mut() {
            if width_changed {
                Self::relayout_state(reading, width, height, self.prefs.show_translation);
            } else {
                let px = reading.layout.rows_to_px(height);
                reading.engine.set_viewport_height(px);
            }
        }
    }

    fn relayout_state(reading: &mut ReadingState, width: u16, height: u16, show_translation: bool) {
        let layout = VerseLayout::build(
            &reading.text.verses,
            width,
            show_translation,
            reading.layout.row_height,
        );
        reading.engine.relayout(
            layout.blocks.clone(),
            layout.content_height(),
            layout.rows_to_px(height),
        );
        reading.layout = layout;
    }

    /// Advance the reading engine and react to its events
    pub fn tick(&mut self, now: Instant) {
        let Some(reading) = self.reading.as_mut() else {
            return;
        };
        reading.engine.tick(now);

        let mut status = None;
        while let Some(event) = reading.engine.poll_event() {
            match event {
                ReadingEvent::ActiveVerseChanged(verse) => {
                    tracing::trace!(verse, "Active verse changed");
                }
                ReadingEvent::AutoScrollEnded => {
                    status = Some("Reached the end of the surah".to_string());
                }
                ReadingEvent::JumpCompleted(verse) => {
                    status = Some(format!("Ayah {}", verse));
                }
            }
        }
        if let Some(status) = status {
            self.set_status(status);
        }
    }

    /// Start or stop auto-scroll in the open surah
    pub fn toggle_auto_scroll(&mut self) {
        let speed = self.prefs.scroll_speed;
        let Some(reading) = self.reading.as_mut() else {
            return;
        };
        if reading.engine.toggle_auto_scroll(speed) {
            self.set_status(format!("Auto-scroll on ({}%)", speed));
        } else {
            self.set_status("Auto-scroll off");
        }
    }

    /// Change the speed by `delta` percent. Returns the new speed when it
    /// changed, so the caller can persist it.
    pub fn adjust_speed(&mut self, delta: i32) -> Option<u32> {
        let current = self.prefs.scroll_speed;
        let target = (i64::from(current) + i64::from(delta)).clamp(0, 1000) as u32;
        let speed = clamp_rate_percent(target);
        if speed == current {
            return None;
        }
        self.prefs.scroll_speed = speed;
        if let Some(reading) = self.reading.as_mut() {
            reading.engine.set_auto_scroll_rate(speed);
        }
        self.set_status(format!("Speed {}%", speed));
        Some(speed)
    }

    /// Show or hide translations; returns the new setting
    pub fn toggle_translation(&mut self) -> bool {
        self.prefs.show_translation = !self.prefs.show_translation;
        let (width, height) = self.reading_area;
        if let Some(reading) = self.reading.as_mut() {
            Self::relayout_state(reading, width, height, self.prefs.show_translation);
        }
        self.prefs.show_translation
    }

    /// Switch light/dark; returns the new mode
    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.prefs.theme = self.prefs.theme.toggled();
        self.theme = Theme::for_mode(self.prefs.theme);
        self.prefs.theme
    }

    /// Manual scroll in the reading view
    pub fn scroll_rows(&mut self, rows: i32) {
        if let Some(reading) = self.reading.as_mut() {
            let delta = f64::from(rows) * reading.layout.row_height;
            reading.engine.scroll_by(delta);
        }
    }

    fn half_page_rows(&self) -> i32 {
        i32::from((self.reading_area.1 / 2).max(1))
    }

    /// Neighbouring surah number, bounded to 1-114
    pub fn adjacent_surah(&self, delta: i32) -> Option<u32> {
        let current = self.reading.as_ref()?.surah_number();
        let target = i64::from(current) + i64::from(delta);
        (1..=i64::from(SURAH_COUNT))
            .contains(&target)
            .then_some(target as u32)
    }

    /// Open the jump dialog prefilled with the active verse
    pub fn start_jump(&mut self) {
        if let Some(reading) = self.reading.as_ref() {
            self.mode = Mode::JumpInput(reading.current_verse().to_string());
        }
    }

    /// Jump to the verse typed in the dialog
    pub fn confirm_jump(&mut self, input: &str) -> Result<u32, String> {
        let reading = self.reading.as_mut().ok_or("No surah open")?;
        let count = reading.verse_count();
        let verse: u32 = input
            .trim()
            .parse()
            .map_err(|_| format!("Enter an ayah number between 1 and {}", count))?;
        if verse == 0 || verse > count {
            return Err(format!("Ayah must be between 1 and {}", count));
        }
        if !reading.engine.scroll_to(verse) {
            return Err(format!("Ayah {} not found", verse));
        }
        Ok(verse)
    }

    /// Open the bookmark dialog for the active verse
    pub fn start_bookmark(&mut self) {
        if let Some(reading) = self.reading.as_ref() {
            let draft = BookmarkDraft::new(
                reading.surah_number(),
                &reading.text.surah.english_name,
                reading.current_verse(),
            );
            self.mode = Mode::BookmarkDialog(draft);
        }
    }

    /// Ask for confirmation before deleting the selected bookmark
    pub fn start_delete(&mut self) {
        if let Some(id) = self.selected_bookmark().map(|b| b.id) {
            self.mode = Mode::DeleteConfirm(id);
        }
    }

    pub fn move_down(&mut self) {
        match self.tab {
            Tab::Surahs => {
                let len = self.visible_surahs().len();
                if self.selected_surah + 1 < len {
                    self.selected_surah += 1;
                }
            }
            Tab::Bookmarks => {
                let len = self.visible_bookmarks().len();
                if self.selected_bookmark + 1 < len {
                    self.selected_bookmark += 1;
                }
            }
            Tab::Reading => self.scroll_rows(1),
        }
    }

    pub fn move_up(&mut self) {
        match self.tab {
            Tab::Surahs => self.selected_surah = self.selected_surah.saturating_sub(1),
            Tab::Bookmarks => self.selected_bookmark = self.selected_bookmark.saturating_sub(1),
            Tab::Reading => self.scroll_rows(-1),
        }
    }

    /// Scroll down by half page
    pub fn scroll_half_page_down(&mut self) {
        match self.tab {
            Tab::Reading => self.scroll_rows(self.half_page_rows()),
            _ => {
                for _ in 0..10 {
                    self.move_down();
                }
            }
        }
    }

    /// Scroll up by half page
    pub fn scroll_half_page_up(&mut self) {
        match self.tab {
            Tab::Reading => self.scroll_rows(-self.half_page_rows()),
            _ => {
                for _ in 0..10 {
                    self.move_up();
                }
            }
        }
    }

    pub fn jump_to_top(&mut self) {
        match self.tab {
            Tab::Surahs => self.selected_surah = 0,
            Tab::Bookmarks => self.selected_bookmark = 0,
            Tab::Reading => {
                if let Some(reading) = self.reading.as_mut() {
                    let offset = reading.engine.scroll_offset();
                    reading.engine.scroll_by(-offset);
                }
            }
        }
    }

    pub fn jump_to_bottom(&mut self) {
        match self.tab {
            Tab::Surahs => self.selected_surah = self.visible_surahs().len().saturating_sub(1),
            Tab::Bookmarks => {
                self.selected_bookmark = self.visible_bookmarks().len().saturating_sub(1)
            }
            Tab::Reading => {
                if let Some(reading) = self.reading.as_mut() {
                    let max = reading.engine.region().max_offset();
                    let offset = reading.engine.scroll_offset();
                    reading.engine.scroll_by(max - offset);
                }
            }
        }
    }

    /// Start searching the current list tab
    pub fn start_search(&mut self) {
        if matches!(self.tab, Tab::Surahs | Tab::Bookmarks) {
            self.mode = Mode::Search;
        }
    }

    /// Mutable access to the query of the current tab
    fn query_mut(&mut self) -> Option<&mut String> {
        match self.tab {
            Tab::Surahs => Some(&mut self.surah_query),
            Tab::Bookmarks => Some(&mut self.bookmark_query),
            Tab::Reading => None,
        }
    }

    pub fn search_push(&mut self, c: char) {
        if let Some(query) = self.query_mut() {
            query.push(c);
        }
        self.reset_list_selection();
    }

    pub fn search_backspace(&mut self) {
        if let Some(query) = self.query_mut() {
            query.pop();
        }
        self.reset_list_selection();
    }

    pub fn clear_search(&mut self) {
        if let Some(query) = self.query_mut() {
            query.clear();
        }
        self.reset_list_selection();
    }

    fn reset_list_selection(&mut self) {
        match self.tab {
            Tab::Surahs => self.selected_surah = 0,
            Tab::Bookmarks => self.selected_bookmark = 0,
            Tab::Reading => {}
        }
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Check if we're in a mode that accepts text input
    pub fn is_input_mode(&self) -> bool {
        matches!(
            self.mode,
            Mode::Search | Mode::JumpInput(_) | Mode::BookmarkDialog(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tilawa_core::quran::{RevelationPlace, Verse};

    fn surah(number: u32, name: &str, verses: u32) -> Surah {
        Surah {
            number,
            name: String::new(),
            english_name: name.into(),
            english_name_translation: format!("{} meaning", name),
            verse_count: verses,
            revelation_place: RevelationPlace::Meccan,
        }
    }

    fn surah_text(number: u32, verses: u32) -> SurahText {
        SurahText {
            surah: surah(number, "Al-Test", verses),
            verses: (1..=verses)
                .map(|n| Verse {
                    number: n,
                    arabic_text: "بِسْمِ ٱللَّهِ".into(),
                    translation_text: "In the name of God".into(),
                    juz: 1,
                    page: 1 + n / 5,
                })
                .collect(),
        }
    }

    fn app() -> App {
        let config = Arc::new(AppConfig::default());
        let prefs = ReaderPreferences::defaults(&config);
        App::new(config, prefs)
    }

    fn open(app: &mut App, number: u32, verses: u32) {
        app.begin_surah_load(number);
        assert!(app.accept_surah(surah_text(number, verses), None));
    }

    #[test]
    fn test_tab_cycle() {
        assert_eq!(Tab::Surahs.next(), Tab::Bookmarks);
        assert_eq!(Tab::Reading.next(), Tab::Surahs);
        assert_eq!(Tab::Surahs.prev(), Tab::Reading);
    }

    #[test]
    fn test_surah_search_resets_selection() {
        let mut app = app();
        app.set_surahs(vec![surah(1, "Al-Faatiha", 7), surah(2, "Al-Baqara", 286)]);
        app.selected_surah = 1;
        app.search_push('b');
        assert_eq!(app.selected_surah, 0);
        assert_eq!(app.selected_surah_number(), Some(2));
        app.clear_search();
        assert_eq!(app.visible_surahs().len(), 2);
    }

    #[test]
    fn test_position_label_shows_juz_and_page() {
        let mut app = app();
        open(&mut app, 1, 7);
        let reading = app.reading.as_ref().unwrap();
        assert_eq!(reading.engine.active_verse(), Some(1));
        assert_eq!(reading.position_label(), " Ayah 1/7 · Juz 1 · Page 1 ");
    }

    #[test]
    fn test_stale_surah_result_dropped() {
        let mut app = app();
        app.begin_surah_load(2);
        app.begin_surah_load(3);
        assert!(!app.accept_surah(surah_text(2, 5), None));
        assert!(app.reading.is_none());
        assert!(app.accept_surah(surah_text(3, 5), None));
        assert_eq!(app.tab, Tab::Reading);
        assert_eq!(app.begin_surah_load(115), None);
    }

    #[test]
    fn test_open_surah_tracks_first_verse() {
        let mut app = app();
        open(&mut app, 1, 7);
        assert_eq!(app.active_verse(), Some(1));
        assert_eq!(app.adjacent_surah(-1), None);
        assert_eq!(app.adjacent_surah(1), Some(2));
    }

    #[test]
    fn test_new_surah_stops_auto_scroll() {
        let mut app = app();
        app.reading_area = (40, 5);
        open(&mut app, 2, 40);
        app.toggle_auto_scroll();
        assert!(app.needs_frames());

        open(&mut app, 3, 40);
        let reading = app.reading.as_ref().unwrap();
        assert!(!reading.engine.is_auto_scrolling());
        assert_eq!(reading.engine.scroll_offset(), 0.0);
    }

    #[test]
    fn test_speed_bounds() {
        let mut app = app();
        app.prefs.scroll_speed = 95;
        assert_eq!(app.adjust_speed(SPEED_STEP), Some(100));
        assert_eq!(app.adjust_speed(SPEED_STEP), None);
        app.prefs.scroll_speed = 10;
        assert_eq!(app.adjust_speed(-SPEED_STEP), None);
    }

    #[test]
    fn test_jump_validation() {
        let mut app = app();
        app.reading_area = (40, 5);
        open(&mut app, 1, 7);
        assert!(app.confirm_jump("0").is_err());
        assert!(app.confirm_jump("8").is_err());
        assert!(app.confirm_jump("x").is_err());
        assert_eq!(app.confirm_jump(" 5 "), Ok(5));

        let start = Instant::now();
        for i in 1..=30 {
            app.tick(start + Duration::from_millis(20 * i));
        }
        assert_eq!(app.active_verse(), Some(5));
        assert_eq!(app.status_message.as_deref(), Some("Ayah 5"));
    }

    #[test]
    fn test_bookmark_draft_defaults_to_active_verse() {
        let mut app = app();
        open(&mut app, 1, 7);
        app.start_bookmark();
        let Mode::BookmarkDialog(mut draft) = app.mode.clone() else {
            panic!("expected bookmark dialog");
        };
        assert_eq!(draft.title, "Al-Test - Ayah 1");
        draft.next_field();
        for c in "note".chars() {
            draft.push_char(c);
        }
        let new = draft.to_new_bookmark();
        assert_eq!(new.verse_number, 1);
        assert_eq!(new.notes.as_deref(), Some("note"));
    }

    #[test]
    fn test_toggle_translation_relayouts() {
        let mut app = app();
        app.reading_area = (40, 5);
        open(&mut app, 1, 3);
        let with = app.reading.as_ref().unwrap().layout.lines.len();
        assert!(!app.toggle_translation());
        let without = app.reading.as_ref().unwrap().layout.lines.len();
        assert_eq!(with - without, 3);
    }

    #[test]
    fn test_toggle_theme() {
        let mut app = app();
        assert_eq!(app.toggle_theme(), ThemeMode::Light);
        assert_eq!(app.theme.mode, ThemeMode::Light);
    }
}

use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use tilawa_core::{
    quran::{QuranClient, QuranProvider},
    storage::{BookmarkRepository, Database, ReaderPreferences, SettingKey, SettingsRepository},
    AppConfig,
};
use tilawa_tui::{
    app::{App, Mode, Tab, SPEED_STEP},
    event::{AppEvent, EventHandler, LoadResult},
    input::{handle_key_event, Action},
    widgets::{
        BookmarkListWidget, PopupWidget, ReadingViewWidget, StatusBarWidget, SurahListWidget,
        TabBarWidget,
    },
};

type Provider = Arc<dyn QuranProvider>;

pub async fn run(config: Arc<AppConfig>, db: Arc<Database>, initial_surah: Option<u32>) -> Result<()> {
    let provider: Provider = Arc::new(QuranClient::new(&config)?);
    let prefs = ReaderPreferences::load(&SettingsRepository::new(&db), &config).await?;

    // Create app state
    let mut app = App::new(config.clone(), prefs);
    app.set_bookmarks(BookmarkRepository::new(&db).list().await?);

    // Create channel for background loads
    let (load_tx, mut load_rx) = mpsc::unbounded_channel::<LoadResult>();
    spawn_surah_index(provider.clone(), load_tx.clone());
    if let Some(number) = initial_surah {
        request_surah(&mut app, &provider, &load_tx, number, None);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("Tilawa"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create event handler with animation FPS support
    let event_handler = EventHandler::with_animation_fps(
        config.ui.tick_rate_ms,
        config.ui.scroll.animation_fps,
    );

    tracing::info!("TUI started");
    let result = event_loop(&mut terminal, &mut app, &event_handler, &db, &provider, &load_tx, &mut load_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("TUI stopped");
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_handler: &EventHandler,
    db: &Database,
    provider: &Provider,
    load_tx: &mpsc::UnboundedSender<LoadResult>,
    load_rx: &mut mpsc::UnboundedReceiver<LoadResult>,
) -> Result<()> {
    loop {
        // Process any completed loads (non-blocking)
        while let Ok(result) = load_rx.try_recv() {
            handle_load_result(app, result);
        }

        app.tick(Instant::now());

        terminal.draw(|frame| draw(frame, app))?;

        // Animate at frame rate only while the reader is moving
        let event = if app.needs_frames() {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(AppEvent::Key(key)) = event {
            let action = handle_key_event(key, app);
            handle_action(app, action, db, provider, load_tx).await?;
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn draw(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    // Main layout: tabs + content + status bar
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(size);

    TabBarWidget::render(frame, main_layout[0], app);
    match app.tab {
        Tab::Surahs => SurahListWidget::render(frame, main_layout[1], app),
        Tab::Bookmarks => BookmarkListWidget::render(frame, main_layout[1], app),
        Tab::Reading => ReadingViewWidget::render(frame, main_layout[1], app),
    }
    StatusBarWidget::render(frame, main_layout[2], app);

    // Render popup dialogs on top
    match &app.mode {
        Mode::DeleteConfirm(id) => {
            let title = app
                .bookmarks
                .iter()
                .find(|b| b.id == *id)
                .map(|b| b.title.as_str())
                .unwrap_or("Unknown");
            PopupWidget::render_delete_confirm(frame, title, &app.theme);
        }
        Mode::JumpInput(input) => {
            let count = app.reading.as_ref().map(|r| r.verse_count()).unwrap_or(0);
            PopupWidget::render_jump(frame, input, count, &app.theme);
        }
        Mode::BookmarkDialog(draft) => PopupWidget::render_bookmark(frame, draft, &app.theme),
        Mode::Help => PopupWidget::render_help(frame, &app.theme),
        Mode::Normal | Mode::Search => {}
    }
}

/// Fetch the surah index in the background
fn spawn_surah_index(provider: Provider, tx: mpsc::UnboundedSender<LoadResult>) {
    tokio::spawn(async move {
        let result = provider.list_surahs().await.map_err(|e| e.to_string());
        let _ = tx.send(LoadResult::SurahIndex(result));
    });
}

/// Fetch a surah's text in the background
fn request_surah(
    app: &mut App,
    provider: &Provider,
    tx: &mpsc::UnboundedSender<LoadResult>,
    number: u32,
    jump_to: Option<u32>,
) {
    let Some(number) = app.begin_surah_load(number) else {
        app.set_status(format!("No surah {}", number));
        return;
    };

    let provider = provider.clone();
    let tx = tx.clone();
    let edition = app.prefs.translation_edition.clone();
    tokio::spawn(async move {
        let result = provider
            .surah_verses(number, &edition)
            .await
            .map_err(|e| e.to_string());
        let _ = tx.send(LoadResult::Surah {
            number,
            jump_to,
            result,
        });
    });
}

fn handle_load_result(app: &mut App, result: LoadResult) {
    match result {
        LoadResult::SurahIndex(Ok(surahs)) => {
            tracing::info!(count = surahs.len(), "Surah index loaded");
            app.set_surahs(surahs);
        }
        LoadResult::SurahIndex(Err(error)) => {
            tracing::warn!("Failed to load surah index: {}", error);
            app.set_status(format!("Failed to load surah index: {}", error));
        }
        LoadResult::Surah {
            jump_to,
            result: Ok(text),
            ..
        } => {
            app.accept_surah(text, jump_to);
        }
        LoadResult::Surah {
            number,
            result: Err(error),
            ..
        } => {
            tracing::warn!(surah = number, "Failed to load surah: {}", error);
            app.reject_surah(number, &error);
        }
    }
}

/// Persist a setting, reporting failures on the status line
async fn persist(app: &mut App, db: &Database, key: SettingKey, value: &str) {
    if let Err(e) = SettingsRepository::new(db).set(key, value).await {
        tracing::warn!(key = key.as_str(), "Failed to save setting: {}", e);
        app.set_status(format!("Failed to save {}: {}", key, e));
    }
}

async fn reload_bookmarks(app: &mut App, db: &Database) -> Result<()> {
    let bookmarks = BookmarkRepository::new(db).list().await?;
    app.set_bookmarks(bookmarks);
    Ok(())
}

async fn handle_action(
    app: &mut App,
    action: Action,
    db: &Database,
    provider: &Provider,
    load_tx: &mpsc::UnboundedSender<LoadResult>,
) -> Result<()> {
    match action {
        Action::Quit => app.should_quit = true,
        Action::NextTab => app.tab = app.tab.next(),
        Action::PrevTab => app.tab = app.tab.prev(),
        Action::ShowTab(tab) => app.tab = tab,
        Action::MoveDown => app.move_down(),
        Action::MoveUp => app.move_up(),
        Action::ScrollHalfPageDown => app.scroll_half_page_down(),
        Action::ScrollHalfPageUp => app.scroll_half_page_up(),
        Action::JumpToTop => app.jump_to_top(),
        Action::JumpToBottom => app.jump_to_bottom(),
        Action::Select => match app.tab {
            Tab::Surahs => {
                if let Some(number) = app.selected_surah_number() {
                    request_surah(app, provider, load_tx, number, None);
                }
            }
            Tab::Bookmarks => {
                if let Some((surah, verse)) = app
                    .selected_bookmark()
                    .map(|b| (b.surah_number, b.verse_number))
                {
                    open_at(app, provider, load_tx, surah, verse);
                }
            }
            Tab::Reading => {}
        },
        Action::StartSearch => app.start_search(),
        Action::ToggleAutoScroll => app.toggle_auto_scroll(),
        Action::SpeedUp | Action::SpeedDown => {
            let delta = if action == Action::SpeedUp { SPEED_STEP } else { -SPEED_STEP };
            if let Some(speed) = app.adjust_speed(delta) {
                persist(app, db, SettingKey::ScrollSpeed, &speed.to_string()).await;
            }
        }
        Action::PrevSurah | Action::NextSurah => {
            let delta = if action == Action::NextSurah { 1 } else { -1 };
            if let Some(number) = app.adjacent_surah(delta) {
                request_surah(app, provider, load_tx, number, None);
            }
        }
        Action::ToggleTranslation => {
            let show = app.toggle_translation();
            persist(app, db, SettingKey::ShowTranslation, &show.to_string()).await;
        }
        Action::StartJump => app.start_jump(),
        Action::StartBookmark => app.start_bookmark(),
        Action::Delete => app.start_delete(),
        Action::ToggleTheme => {
            let mode = app.toggle_theme();
            persist(app, db, SettingKey::Theme, mode.as_str()).await;
        }
        Action::Help => app.mode = Mode::Help,
        Action::ExitMode => {
            app.mode = Mode::Normal;
            app.clear_status();
        }
        Action::Confirm => confirm(app, db).await?,
        Action::Cancel => {
            if app.mode == Mode::Search {
                app.clear_search();
            }
            app.mode = Mode::Normal;
        }
        Action::InputChar(c) if app.mode == Mode::Search => app.search_push(c),
        Action::InputChar(c) => match &mut app.mode {
            Mode::JumpInput(input) => {
                if c.is_ascii_digit() && input.len() < 3 {
                    input.push(c);
                }
            }
            Mode::BookmarkDialog(draft) => draft.push_char(c),
            _ => {}
        },
        Action::Backspace if app.mode == Mode::Search => app.search_backspace(),
        Action::Backspace => match &mut app.mode {
            Mode::JumpInput(input) => {
                input.pop();
            }
            Mode::BookmarkDialog(draft) => draft.backspace(),
            _ => {}
        },
        Action::NextField => {
            if let Mode::BookmarkDialog(draft) = &mut app.mode {
                draft.next_field();
            }
        }
        Action::None => {}
    }

    Ok(())
}

/// Open a surah and jump to a verse, without refetching an open surah
fn open_at(
    app: &mut App,
    provider: &Provider,
    load_tx: &mpsc::UnboundedSender<LoadResult>,
    surah: u32,
    verse: u32,
) {
    let already_open = app
        .reading
        .as_ref()
        .is_some_and(|r| r.surah_number() == surah);

    if already_open {
        app.tab = Tab::Reading;
        if let Err(message) = app.confirm_jump(&verse.to_string()) {
            app.set_status(message);
        }
    } else {
        request_surah(app, provider, load_tx, surah, Some(verse));
    }
}

/// Handle Enter / `y` in the current dialog
async fn confirm(app: &mut App, db: &Database) -> Result<()> {
    match std::mem::replace(&mut app.mode, Mode::Normal) {
        Mode::Search => {}
        Mode::JumpInput(input) => {
            if let Err(message) = app.confirm_jump(&input) {
                app.set_status(message);
            }
        }
        Mode::BookmarkDialog(draft) => {
            let new_bookmark = draft.to_new_bookmark();
            match BookmarkRepository::new(db).save(&new_bookmark).await {
                Ok(_) => {
                    app.set_status(format!("Bookmarked \"{}\"", new_bookmark.title));
                    reload_bookmarks(app, db).await?;
                }
                Err(e) => app.set_status(format!("Failed to save bookmark: {}", e)),
            }
        }
        Mode::DeleteConfirm(id) => {
            match BookmarkRepository::new(db).delete(id).await {
                Ok(true) => app.set_status("Bookmark deleted"),
                Ok(false) => app.set_status("Bookmark already removed"),
                Err(e) => app.set_status(format!("Failed to delete bookmark: {}", e)),
            }
            reload_bookmarks(app, db).await?;
        }
        other => app.mode = other,
    }
    Ok(())
}

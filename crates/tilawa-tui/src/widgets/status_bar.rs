use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Mode, Tab};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let mode_str = match &app.mode {
            Mode::Normal => "NORMAL",
            Mode::Search => "SEARCH",
            Mode::JumpInput(_) => "JUMP",
            Mode::BookmarkDialog(_) => "BOOKMARK",
            Mode::DeleteConfirm(_) => "DELETE?",
            Mode::Help => "HELP",
        };

        let status_text = match &app.status_message {
            Some(msg) => format!(" {} | {}", mode_str, msg),
            None => format!(" {} | {}", mode_str, app.tab.title()),
        };

        let help_hint = match app.tab {
            Tab::Reading => " space:auto +/-:speed [/]:surah ::jump b:mark ?:help ",
            Tab::Bookmarks => " enter:open /:search d:delete ?:help ",
            Tab::Surahs => " enter:read /:search tab:next ?:help q:quit ",
        };
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.chars().count() + help_hint.chars().count());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        let paragraph = Paragraph::new(line);
        frame.render_widget(paragraph, area);
    }
}

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Tabs,
    Frame,
};

use crate::app::{App, Tab};

pub struct TabBarWidget;

impl TabBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let titles: Vec<Line> = Tab::ALL
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                let label = match tab {
                    Tab::Reading => match app.reading.as_ref() {
                        Some(r) => format!("{} {}", i + 1, r.text.surah.english_name),
                        None => format!("{} {}", i + 1, tab.title()),
                    },
                    Tab::Bookmarks => format!("{} {} ({})", i + 1, tab.title(), app.bookmarks.len()),
                    Tab::Surahs => format!("{} {}", i + 1, tab.title()),
                };
                Line::from(Span::raw(label))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .select(app.tab.index())
            .style(Style::default().fg(theme.grey1).bg(theme.bg1))
            .highlight_style(
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .divider(Span::styled("│", Style::default().fg(theme.grey0)));

        frame.render_widget(tabs, area);
    }
}

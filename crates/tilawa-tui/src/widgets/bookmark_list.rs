use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::app::{App, Mode};
use crate::widgets::highlight_matches;

pub struct BookmarkListWidget;

impl BookmarkListWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let bookmarks = app.visible_bookmarks();

        let title = if app.bookmark_query.is_empty() && app.mode != Mode::Search {
            format!(" Bookmarks ({}) ", bookmarks.len())
        } else {
            format!(" Bookmarks /{} ({}) ", app.bookmark_query, bookmarks.len())
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg0));

        if bookmarks.is_empty() {
            let hint = if app.bookmarks.is_empty() {
                "No bookmarks yet. Press b while reading to add one."
            } else {
                "No bookmarks match the search."
            };
            let list = List::new(vec![ListItem::new(Span::styled(
                hint,
                Style::default().fg(theme.grey1),
            ))])
            .block(block);
            frame.render_widget(list, area);
            return;
        }

        let query = app.bookmark_query.as_str();
        let items: Vec<ListItem> = bookmarks
            .iter()
            .enumerate()
            .map(|(i, bookmark)| {
                let selected = i == app.selected_bookmark;
                let base_style = if selected {
                    Style::default().fg(theme.fg0).bg(theme.selection)
                } else {
                    Style::default().fg(theme.fg0)
                };

                let mut header = vec![Span::styled(
                    format!("{:>7}  ", bookmark.reference()),
                    Style::default().fg(theme.yellow),
                )];
                header.extend(highlight_matches(
                    &bookmark.title,
                    query,
                    base_style.add_modifier(Modifier::BOLD),
                    theme,
                ));
                header.push(Span::styled(
                    format!("  {}", bookmark.created_at.format("%Y-%m-%d")),
                    Style::default().fg(theme.grey0),
                ));

                let mut detail = vec![Span::raw("         ")];
                detail.extend(highlight_matches(
                    &bookmark.surah_name,
                    query,
                    Style::default().fg(theme.grey2),
                    theme,
                ));
                if let Some(notes) = bookmark.notes.as_deref() {
                    detail.push(Span::styled(" · ", Style::default().fg(theme.grey0)));
                    detail.extend(highlight_matches(
                        notes,
                        query,
                        Style::default().fg(theme.grey1),
                        theme,
                    ));
                }

                ListItem::new(vec![Line::from(header), Line::from(detail)])
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(theme.selection));

        let mut state = ListState::default();
        state.select(Some(app.selected_bookmark));

        frame.render_stateful_widget(list, area, &mut state);
    }
}

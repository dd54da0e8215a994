use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::app::{App, Mode};
use crate::widgets::highlight_matches;

pub struct SurahListWidget;

impl SurahListWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let surahs = app.visible_surahs();

        let title = if app.surah_query.is_empty() && app.mode != Mode::Search {
            format!(" Surahs ({}) ", surahs.len())
        } else {
            format!(" Surahs /{} ({}) ", app.surah_query, surahs.len())
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg0));

        if app.surahs.is_empty() {
            let list = List::new(vec![ListItem::new(Span::styled(
                "Loading surah index...",
                Style::default().fg(theme.grey1),
            ))])
            .block(block);
            frame.render_widget(list, area);
            return;
        }

        let items: Vec<ListItem> = surahs
            .iter()
            .enumerate()
            .map(|(i, surah)| {
                let base_style = if i == app.selected_surah {
                    Style::default().fg(theme.fg0).bg(theme.selection)
                } else {
                    Style::default().fg(theme.fg0)
                };

                let mut spans = vec![
                    Span::styled(format!("{:>3}. ", surah.number), Style::default().fg(theme.grey1)),
                ];
                spans.extend(highlight_matches(&surah.english_name, &app.surah_query, base_style, theme));
                spans.push(Span::styled(" - ", Style::default().fg(theme.grey0)));
                spans.extend(highlight_matches(
                    &surah.english_name_translation,
                    &app.surah_query,
                    Style::default().fg(theme.grey2),
                    theme,
                ));
                spans.push(Span::styled(
                    format!("  {} · {} ayahs  ", surah.revelation_place.as_str(), surah.verse_count),
                    Style::default().fg(theme.grey1),
                ));
                spans.push(Span::styled(surah.name.as_str(), Style::default().fg(theme.arabic)));

                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(theme.selection));

        let mut state = ListState::default();
        state.select(Some(app.selected_surah));

        frame.render_stateful_widget(list, area, &mut state);
    }
}

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::layout::LineKind;

pub struct ReadingViewWidget;

impl ReadingViewWidget {
    /// Render the open surah. Takes `&mut App` because the pane size feeds
    /// back into the verse layout.
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = app.theme.clone();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg0));

        let inner = block.inner(area);
        app.set_reading_area(inner.width, inner.height);
        let speed = app.prefs.scroll_speed;

        let Some(reading) = app.reading.as_ref() else {
            let hint = if app.pending_surah.is_some() {
                "Loading..."
            } else {
                "Select a surah from the Surahs tab to start reading."
            };
            let paragraph = Paragraph::new(Span::styled(hint, Style::default().fg(theme.grey1)))
                .alignment(Alignment::Center)
                .block(block.title(" Reading "));
            frame.render_widget(paragraph, area);
            return;
        };

        let surah = &reading.text.surah;
        let active = reading.engine.active_verse();
        let title = format!(
            " {}. {} ({}) · {} ",
            surah.number, surah.english_name, surah.english_name_translation, surah.name
        );
        let scroll_label = if reading.engine.is_auto_scrolling() {
            format!(" ▶ auto-scroll {}% ", speed)
        } else {
            format!(" ❚❚ {}% ", speed)
        };
        let position = reading.position_label();

        let block = block
            .title(Span::styled(
                title,
                Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Line::from(Span::styled(scroll_label, Style::default().fg(theme.green))))
            .title_bottom(Line::from(Span::styled(position, Style::default().fg(theme.grey2))).right_aligned());

        let first = reading.first_row();
        let height = usize::from(inner.height);
        let lines: Vec<Line> = reading
            .layout
            .lines
            .iter()
            .skip(first)
            .take(height)
            .map(|line| {
                let is_active = active == Some(line.verse_number);
                let bg = if is_active { theme.active_verse } else { theme.bg0 };
                let styled = match line.kind {
                    LineKind::Header => Line::from(Span::styled(
                        line.text.as_str(),
                        Style::default()
                            .fg(if is_active { theme.yellow } else { theme.grey1 })
                            .add_modifier(Modifier::BOLD),
                    )),
                    LineKind::Arabic => Line::from(Span::styled(
                        line.text.as_str(),
                        Style::default().fg(theme.arabic),
                    ))
                    .alignment(Alignment::Right),
                    LineKind::Translation => Line::from(Span::styled(
                        line.text.as_str(),
                        Style::default().fg(theme.translation),
                    )),
                    LineKind::Spacer => Line::from(""),
                };
                styled.style(Style::default().bg(bg))
            })
            .collect();

        let paragraph = Paragraph::new(lines).block(block);
        frame.render_widget(paragraph, area);
    }
}

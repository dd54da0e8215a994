use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{BookmarkDraft, DraftField};
use crate::theme::Theme;

pub struct PopupWidget;

impl PopupWidget {
    /// Render a confirmation popup dialog
    pub fn render_confirm(frame: &mut Frame, title: &str, message: &str, theme: &Theme) {
        let popup_area = Self::frame_popup(frame, title, 50, 7, theme.error, theme);
        let inner_area = inner(popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Message
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Hint
            ])
            .split(inner_area);

        let message_paragraph = Paragraph::new(Line::from(vec![Span::styled(
            message,
            Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD),
        )]))
        .alignment(Alignment::Center);

        frame.render_widget(message_paragraph, chunks[0]);

        // Render hint (y/n options)
        let hint_paragraph = Paragraph::new(Line::from(vec![
            Span::styled("[", Style::default().fg(theme.grey1)),
            Span::styled(
                "y",
                Style::default().fg(theme.green).add_modifier(Modifier::BOLD),
            ),
            Span::styled("]es  [", Style::default().fg(theme.grey1)),
            Span::styled(
                "n",
                Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
            ),
            Span::styled("]o", Style::default().fg(theme.grey1)),
        ]))
        .alignment(Alignment::Center);

        frame.render_widget(hint_paragraph, chunks[2]);
    }

    /// Render a delete confirmation popup for a bookmark
    pub fn render_delete_confirm(frame: &mut Frame, bookmark_title: &str, theme: &Theme) {
        let message = format!("Delete bookmark \"{}\"?", truncate_str(bookmark_title, 30));
        Self::render_confirm(frame, "Confirm Delete", &message, theme);
    }

    /// Verse number input
    pub fn render_jump(frame: &mut Frame, input: &str, verse_count: u32, theme: &Theme) {
        let popup_area = Self::frame_popup(frame, "Jump to Ayah", 40, 6, theme.accent, theme);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
            .split(inner(popup_area));

        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("Ayah (1-{})", verse_count),
                Style::default().fg(theme.grey2),
            )),
            chunks[0],
        );
        frame.render_widget(input_line(input, true, theme), chunks[1]);
        frame.render_widget(
            Paragraph::new(Span::styled(
                "enter:go  esc:cancel",
                Style::default().fg(theme.grey1),
            ))
            .alignment(Alignment::Center),
            chunks[2],
        );
    }

    /// Bookmark title and notes form
    pub fn render_bookmark(frame: &mut Frame, draft: &BookmarkDraft, theme: &Theme) {
        let popup_area = Self::frame_popup(frame, "Add Bookmark", 60, 10, theme.accent, theme);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Location
                Constraint::Length(1), // Title label
                Constraint::Length(1), // Title input
                Constraint::Length(1), // Notes label
                Constraint::Length(1), // Notes input
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Hint
            ])
            .split(inner(popup_area));

        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("{} · Ayah {}", draft.surah_name, draft.verse_number),
                Style::default().fg(theme.yellow),
            )),
            chunks[0],
        );
        let label = |text: &'static str| Span::styled(text, Style::default().fg(theme.grey2));
        frame.render_widget(Paragraph::new(label("Title")), chunks[1]);
        frame.render_widget(
            input_line(&draft.title, draft.field == DraftField::Title, theme),
            chunks[2],
        );
        frame.render_widget(Paragraph::new(label("Notes (optional)")), chunks[3]);
        frame.render_widget(
            input_line(&draft.notes, draft.field == DraftField::Notes, theme),
            chunks[4],
        );
        frame.render_widget(
            Paragraph::new(Span::styled(
                "tab:switch field  enter:save  esc:cancel",
                Style::default().fg(theme.grey1),
            ))
            .alignment(Alignment::Center),
            chunks[6],
        );
    }

    /// Key reference overlay
    pub fn render_help(frame: &mut Frame, theme: &Theme) {
        const KEYS: &[(&str, &str)] = &[
            ("tab / 1 2 3", "switch tabs"),
            ("j k / ↑ ↓", "move or scroll"),
            ("ctrl-d ctrl-u", "half page down / up"),
            ("g G", "top / bottom"),
            ("/", "search surahs or bookmarks"),
            ("enter", "open surah or bookmark"),
            ("space", "toggle auto-scroll"),
            ("+ -", "auto-scroll speed ±5%"),
            ("[ ]", "previous / next surah"),
            (":", "jump to ayah"),
            ("b", "bookmark current ayah"),
            ("t", "toggle translation"),
            ("d", "delete bookmark"),
            ("T", "toggle light / dark"),
            ("q", "quit"),
        ];

        let height = KEYS.len() as u16 + 4;
        let popup_area = Self::frame_popup(frame, "Keys", 50, height, theme.accent, theme);
        let lines: Vec<Line> = KEYS
            .iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:>14}  ", key),
                        Style::default().fg(theme.yellow).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(*desc, Style::default().fg(theme.fg0)),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner(popup_area));
    }

    /// Clear a centered area and draw the popup border; returns the area
    fn frame_popup(
        frame: &mut Frame,
        title: &str,
        width: u16,
        height: u16,
        border: ratatui::style::Color,
        theme: &Theme,
    ) -> Rect {
        let area = frame.area();
        let popup_width = width.min(area.width.saturating_sub(4));
        let popup_height = height.min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(format!(" {} ", title))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(theme.bg1));
        frame.render_widget(block, popup_area);

        popup_area
    }
}

fn inner(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(area)
}

fn input_line<'a>(value: &'a str, focused: bool, theme: &Theme) -> Paragraph<'a> {
    let style = if focused {
        Style::default().fg(theme.fg1).bg(theme.bg2)
    } else {
        Style::default().fg(theme.grey2)
    };
    let cursor = if focused { "▏" } else { "" };
    Paragraph::new(Line::from(vec![
        Span::styled(value, style),
        Span::styled(cursor, style.fg(theme.accent)),
    ]))
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Truncate a string to max length with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

mod bookmark_list;
mod popup;
mod reading_view;
mod status_bar;
mod surah_list;
mod tab_bar;

pub use bookmark_list::BookmarkListWidget;
pub use popup::PopupWidget;
pub use reading_view::ReadingViewWidget;
pub use status_bar::StatusBarWidget;
pub use surah_list::SurahListWidget;
pub use tab_bar::TabBarWidget;

use ratatui::{style::Style, text::Span};

use crate::theme::Theme;

/// Highlight matching parts of a string with a different color
pub(crate) fn highlight_matches<'a>(
    text: &'a str,
    query: &str,
    base_style: Style,
    theme: &Theme,
) -> Vec<Span<'a>> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return vec![Span::styled(text, base_style)];
    }

    let mut spans = Vec::new();
    let text_lower = text.to_lowercase();
    // Lowercasing can change byte lengths; fall back to no highlighting then
    if text_lower.len() != text.len() {
        return vec![Span::styled(text, base_style)];
    }

    let highlight_style = base_style.fg(theme.bg0).bg(theme.yellow);
    let mut last_end = 0;
    for (start, _) in text_lower.match_indices(&query) {
        if start > last_end {
            spans.push(Span::styled(&text[last_end..start], base_style));
        }
        let end = start + query.len();
        spans.push(Span::styled(&text[start..end], highlight_style));
        last_end = end;
    }
    if last_end < text.len() {
        spans.push(Span::styled(&text[last_end..], base_style));
    }
    if spans.is_empty() {
        spans.push(Span::styled(text, base_style));
    }
    spans
}

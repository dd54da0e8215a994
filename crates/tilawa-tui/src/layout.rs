//! Verse layout: wraps verses into terminal rows and derives the block
//! geometry the reading engine tracks. One row is `row_height` engine pixels.

use tilawa_core::quran::Verse;
use tilawa_core::reading::VerseBlock;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Kind of a laid-out row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Header,
    Arabic,
    Translation,
    Spacer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutLine {
    pub verse_number: u32,
    pub kind: LineKind,
    pub text: String,
}

/// Rows for a whole surah at one width
#[derive(Debug, Clone, Default)]
pub struct VerseLayout {
    pub lines: Vec<LayoutLine>,
    pub blocks: Vec<VerseBlock>,
    pub row_height: f64,
    pub width: u16,
    pub show_translation: bool,
}

impl VerseLayout {
    pub fn build(verses: &[Verse], width: u16, show_translation: bool, row_height: f64) -> Self {
        let row_height = if row_height > 0.0 { row_height } else { 1.0 };
        let wrap_width = usize::from(width.max(1));
        let mut lines = Vec::new();
        let mut blocks = Vec::with_capacity(verses.len());

        for verse in verses {
            let start = lines.len();
            let push = |lines: &mut Vec<LayoutLine>, kind, text: String| {
                lines.push(LayoutLine {
                    verse_number: verse.number,
                    kind,
                    text,
                })
            };

            push(&mut lines, LineKind::Header, verse_header(verse));
            for row in wrap_text(&verse.arabic_text, wrap_width) {
                push(&mut lines, LineKind::Arabic, row);
            }
            if show_translation && !verse.translation_text.trim().is_empty() {
                for row in wrap_text(&verse.translation_text, wrap_width) {
                    push(&mut lines, LineKind::Translation, row);
                }
            }
            push(&mut lines, LineKind::Spacer, String::new());

            let rows = lines.len() - start;
            blocks.push(VerseBlock::new(
                verse.number,
                start as f64 * row_height,
                rows as f64 * row_height,
            ));
        }

        Self {
            lines,
            blocks,
            row_height,
            width,
            show_translation,
        }
    }

    pub fn content_height(&self) -> f64 {
        self.lines.len() as f64 * self.row_height
    }

    /// Convert a row count to engine pixels
    pub fn rows_to_px(&self, rows: u16) -> f64 {
        f64::from(rows) * self.row_height
    }

    /// First visible row for a scroll offset in engine pixels
    pub fn first_row(&self, offset: f64) -> usize {
        if offset <= 0.0 {
            return 0;
        }
        ((offset / self.row_height).floor() as usize).min(self.lines.len())
    }
}

fn verse_header(verse: &Verse) -> String {
    if verse.juz > 0 && verse.page > 0 {
        format!("﴿{}﴾  Juz {} · Page {}", verse.number, verse.juz, verse.page)
    } else {
        format!("﴿{}﴾", verse.number)
    }
}

/// Greedy word wrap by display width. Words wider than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = word.width();
            let sep = usize::from(!current.is_empty());

            if current_width + sep + word_width <= width {
                if sep == 1 {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += sep + word_width;
                continue;
            }

            if !current.is_empty() {
                rows.push(std::mem::take(&mut current));
                current_width = 0;
            }

            if word_width <= width {
                current.push_str(word);
                current_width = word_width;
            } else {
                for ch in word.chars() {
                    let w = ch.width().unwrap_or(0);
                    if current_width + w > width && !current.is_empty() {
                        rows.push(std::mem::take(&mut current));
                        current_width = 0;
                    }
                    current.push(ch);
                    current_width += w;
                }
            }
        }

        if !current.is_empty() || paragraph.trim().is_empty() {
            rows.push(current);
        }
    }

    if rows.is_empty() {
        rows.push(String::new());
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verse(number: u32, arabic: &str, translation: &str) -> Verse {
        Verse {
            number,
            arabic_text: arabic.into(),
            translation_text: translation.into(),
            juz: 1,
            page: 1,
        }
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_text("", 10), vec![""]);
        assert_eq!(wrap_text("a  b", 10), vec!["a b"]);
    }

    #[test]
    fn test_blocks_cover_all_rows() {
        let verses = vec![
            verse(1, "short", "In the name of God"),
            verse(2, "short", "All praise is due to God alone"),
        ];
        let layout = VerseLayout::build(&verses, 20, true, 16.0);

        // header + arabic + 1 translation row + spacer
        assert_eq!(layout.blocks[0].height, 4.0 * 16.0);
        // header + arabic + 2 translation rows + spacer
        assert_eq!(layout.blocks[1].top, 64.0);
        assert_eq!(layout.blocks[1].height, 5.0 * 16.0);
        assert_eq!(layout.content_height(), 9.0 * 16.0);
        assert_eq!(layout.lines.len(), 9);
    }

    #[test]
    fn test_translation_hidden() {
        let verses = vec![verse(1, "short", "In the name of God")];
        let layout = VerseLayout::build(&verses, 20, false, 16.0);
        assert!(layout.lines.iter().all(|l| l.kind != LineKind::Translation));
        assert_eq!(layout.blocks[0].height, 3.0 * 16.0);
    }

    #[test]
    fn test_first_row() {
        let verses = vec![verse(1, "a", "b"), verse(2, "c", "d")];
        let layout = VerseLayout::build(&verses, 20, true, 16.0);
        assert_eq!(layout.first_row(0.0), 0);
        assert_eq!(layout.first_row(31.9), 1);
        assert_eq!(layout.first_row(32.0), 2);
        assert_eq!(layout.first_row(1e9), layout.lines.len());
    }
}

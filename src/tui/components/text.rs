//! Pure text layout helpers shared by the page sections and overlays.
//!
//! Sections pre-wrap their copy with `textwrap` and render the resulting
//! lines unwrapped, so the height a section reports is exactly the number of
//! rows it draws.

use ratatui::layout::{Constraint, Layout, Rect};
use unicode_width::UnicodeWidthStr;

/// Build textwrap options for the given column width.
pub fn wrap_options(width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(width.max(1) as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Wrap `text` to `width` columns, one owned string per row.
pub fn wrap_lines(text: &str, width: u16) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }
    textwrap::wrap(text, wrap_options(width))
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

/// Display width in terminal columns.
pub fn display_width(text: &str) -> u16 {
    UnicodeWidthStr::width(text).min(u16::MAX as usize) as u16
}

/// A `width` x 1 rect horizontally centered in `area` at row `y`.
///
/// Uses the same rounding as a centered `Paragraph` line, so the rect lines
/// up with what was drawn.
pub fn centered_row(area: Rect, y: u16, width: u16) -> Rect {
    let width = width.min(area.width);
    let offset = (area.width / 2).saturating_sub(width / 2);
    Rect::new(area.x + offset, y, width, 1)
}

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

/// Strip the scheme so placeholder captions stay short.
pub fn short_url(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

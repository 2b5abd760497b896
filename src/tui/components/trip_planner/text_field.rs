//! Single-line text input used by the planner form.
//!
//! Same editing model as a one-line input box: the cursor is a byte offset
//! into `value`, always on a char boundary.
//!
//! Values wider than the row scroll horizontally. Only the window ending at
//! the cursor is drawn, so the character being typed is always on screen.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

use crate::tui::components::text::{next_char_boundary, prev_char_boundary};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, Default)]
pub struct TextField {
    pub value: String,
    /// Cursor position as byte offset in `value`.
    pub cursor: usize,
    placeholder: &'static str,
}

impl TextField {
    pub fn new(placeholder: &'static str) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            placeholder,
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Apply an editing event. Returns `true` if the event was consumed.
    pub fn handle_event(&mut self, event: &TuiEvent) -> bool {
        match event {
            TuiEvent::InputChar(c) => {
                self.value.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                true
            }
            TuiEvent::Paste(text) => {
                // Single line: newlines in pasted text become spaces.
                let text = text.replace(['\r', '\n'], " ");
                self.value.insert_str(self.cursor, &text);
                self.cursor += text.len();
                true
            }
            TuiEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = prev_char_boundary(&self.value, self.cursor);
                    self.value.drain(prev..self.cursor);
                    self.cursor = prev;
                }
                true
            }
            TuiEvent::Delete => {
                if self.cursor < self.value.len() {
                    let next = next_char_boundary(&self.value, self.cursor);
                    self.value.drain(self.cursor..next);
                }
                true
            }
            TuiEvent::CursorLeft => {
                if self.cursor > 0 {
                    self.cursor = prev_char_boundary(&self.value, self.cursor);
                }
                true
            }
            TuiEvent::CursorRight => {
                if self.cursor < self.value.len() {
                    self.cursor = next_char_boundary(&self.value, self.cursor);
                }
                true
            }
            TuiEvent::CursorHome => {
                self.cursor = 0;
                true
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.value.len();
                true
            }
            _ => false,
        }
    }

    /// First visible byte and the cursor's column within a `width`-column
    /// row. One column is kept free for the cursor at the end of the value.
    pub fn window(&self, width: u16) -> (usize, u16) {
        let room = width.saturating_sub(1) as usize;
        let mut start = self.cursor;
        let mut used = 0;
        for (idx, c) in self.value[..self.cursor].char_indices().rev() {
            let w = c.width().unwrap_or(0);
            if used + w > room {
                break;
            }
            used += w;
            start = idx;
        }
        (start, used as u16)
    }

    /// The visible part of the field in a `width`-column row.
    pub fn line(&self, focused: bool, width: u16) -> Line<'_> {
        if self.value.is_empty() {
            return Line::from(Span::styled(
                self.placeholder,
                Style::default().fg(Color::DarkGray),
            ));
        }
        let style = if focused {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::Gray)
        };
        let (start, _) = self.window(width);
        Line::from(Span::styled(&self.value[start..], style))
    }
}

//! # StatusBar Component
//!
//! Bottom line of the screen: trip progress on the left, key hints on the
//! right. Purely presentational; every field is a prop.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;
use crate::tui::components::text::display_width;

const SPINNER: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

pub struct StatusBar<'a> {
    pub status_message: &'a str,
    /// Ordered stops of the last course, once it has arrived.
    pub route: Option<String>,
    /// A trip request is outstanding.
    pub pending: bool,
    pub spinner_frame: usize,
    pub hints: &'a str,
}

impl Component for StatusBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let hints_width = display_width(self.hints).min(area.width / 2);
        let [left, right] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(hints_width)]).areas(area);

        let mut spans = Vec::new();
        if self.pending {
            spans.push(Span::styled(
                format!("{} ", SPINNER[self.spinner_frame % SPINNER.len()]),
                Style::default().fg(Color::Cyan),
            ));
        }
        spans.push(Span::raw(self.status_message));
        if let Some(route) = &self.route {
            spans.push(Span::styled(
                format!(" | {route}"),
                Style::default().fg(Color::Green),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), left);
        frame.render_widget(
            Paragraph::new(Span::styled(self.hints, Style::default().fg(Color::DarkGray))),
            right,
        );
    }
}

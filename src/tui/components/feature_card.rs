//! # FeatureCard Component
//!
//! One tile of the feature grid: image placeholder, icon + title and a short
//! description, inside a rounded border. A pure function of its props.
//!
//! Large cards get a taller image band; the grid also gives them a wider
//! column.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Widget};

use crate::tui::component::Component;
use crate::tui::components::icon::Icon;
use crate::tui::components::text::{short_url, wrap_lines};

/// Borders (2) plus one column of padding each side.
const HORIZONTAL_CHROME: u16 = 4;
/// Top and bottom border.
const VERTICAL_CHROME: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureCard<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub image: &'a str,
    pub icon: Icon,
    pub large: bool,
}

impl<'a> FeatureCard<'a> {
    fn image_rows(&self) -> u16 {
        if self.large { 3 } else { 1 }
    }

    fn description_lines(&self, width: u16) -> Vec<String> {
        wrap_lines(self.description, width.saturating_sub(HORIZONTAL_CHROME))
    }

    /// Rows needed to draw the card at `width` columns.
    pub fn height(&self, width: u16) -> u16 {
        // image band, blank, title, description
        VERTICAL_CHROME + self.image_rows() + 2 + self.description_lines(width).len() as u16
    }

    fn lines(&self, width: u16) -> Vec<Line<'a>> {
        let image_style = Style::default().fg(Color::DarkGray).bg(Color::Indexed(236));
        let caption = Line::from(Span::styled(
            format!("{} {}", Icon::Image.glyph(), short_url(self.image)),
            image_style,
        ))
        .centered();

        let mut lines = Vec::new();
        if self.large {
            lines.push(Line::from(Span::styled("", image_style)));
            lines.push(caption);
            lines.push(Line::from(Span::styled("", image_style)));
        } else {
            lines.push(caption);
        }
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled(self.icon.glyph(), Style::default().fg(Color::Cyan)),
            Span::raw(" "),
            Span::styled(
                self.title,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.extend(
            self.description_lines(width)
                .into_iter()
                .map(|l| Line::styled(l, Style::default().fg(Color::Gray))),
        );
        lines
    }
}

impl Widget for FeatureCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1));

        Paragraph::new(self.lines(area.width))
            .block(block)
            .render(area, buf);
    }
}

impl Component for FeatureCard<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

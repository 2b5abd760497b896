//! # Hero Component
//!
//! The first screen of the page: headline, tagline and the "Plan Trip"
//! call-to-action. Stateless. The CTA doesn't own anything; the page reports
//! clicks on [`Hero::button_rect`] to the root container, which opens the
//! planner.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::tui::component::Component;
use crate::tui::components::icon::Icon;
use crate::tui::components::text::{centered_row, display_width, short_url, wrap_lines};

const EYEBROW: &str = "AI TRAVEL CURATOR";
const HEADLINE: &str = "Travel, Curated.";
const SUBHEADLINE: &str = "Routes picked for you.";
const TAGLINE: &str = "Tell RoutePick your theme, your place and your pace. \
    Our agents search the city, pick the spots worth your time and sequence them into one smooth day.";
const IMAGE: &str = "https://picsum.photos/seed/road_trip/1600/900";

/// Widest the tagline is allowed to run, for readability.
const MAX_TEXT_WIDTH: u16 = 72;

/// Rows above the tagline: blank, eyebrow, blank, headline, subheadline, blank.
const TAGLINE_ROW: u16 = 6;

#[derive(Clone, Copy, Default)]
pub struct Hero;

impl Hero {
    pub fn new() -> Self {
        Self
    }

    pub fn button_label() -> String {
        format!("[ Plan Trip {} ]", Icon::ArrowRight.glyph())
    }

    fn tagline(width: u16) -> Vec<String> {
        wrap_lines(TAGLINE, width.saturating_sub(4).min(MAX_TEXT_WIDTH))
    }

    /// Row of the CTA, relative to the top of the section.
    fn button_row(width: u16) -> u16 {
        TAGLINE_ROW + Self::tagline(width).len() as u16 + 1
    }

    pub fn height(width: u16) -> u16 {
        // button, blank, image caption, blank
        Self::button_row(width) + 4
    }

    /// Where the CTA lands when the hero is rendered into `area`.
    pub fn button_rect(area: Rect) -> Rect {
        centered_row(
            area,
            area.y + Self::button_row(area.width),
            display_width(&Self::button_label()),
        )
    }
}

impl Widget for Hero {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dim = Style::default().fg(Color::DarkGray);

        let mut lines = vec![
            Line::default(),
            Line::from(Span::styled(EYEBROW, dim.add_modifier(Modifier::BOLD))),
            Line::default(),
            Line::from(Span::styled(
                HEADLINE,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                SUBHEADLINE,
                Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            )),
            Line::default(),
        ];
        lines.extend(Self::tagline(area.width).into_iter().map(Line::from));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            Self::button_label(),
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("{} {}", Icon::Image.glyph(), short_url(IMAGE)),
            dim,
        )));
        lines.push(Line::default());

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

impl Component for Hero {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

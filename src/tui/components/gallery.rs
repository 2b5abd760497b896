//! # Gallery Section
//!
//! "More to Discover": a short blurb, two photo placeholders and a list of
//! journal entries. Stateless.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph, Widget};

use crate::tui::component::Component;
use crate::tui::components::icon::Icon;
use crate::tui::components::text::{short_url, wrap_lines};

const BLURB: &str = "From the winding coasts of Amalfi to the silent peaks of the Andes, \
    RoutePick curates experiences that resonate with your soul.";

const PHOTOS: [(&str, &str); 2] = [
    ("Mountain", "https://picsum.photos/seed/mountain_hike/800/1000"),
    ("Ocean", "https://picsum.photos/seed/ocean_view/600/800"),
];

/// (date, title)
const ARTICLES: [(&str, &str); 3] = [
    ("09.16.2025", "Why I chose an AI Curator over a Travel Agent"),
    ("10.29.2025", "The Future of Sustainable Tourism"),
    ("06.13.2025", "Hidden Gems: The Algorithm's Secret Spots"),
];

const MAX_TEXT_WIDTH: u16 = 64;
const SIDE_PADDING: u16 = 2;

#[derive(Debug, Clone, Copy, Default)]
pub struct Gallery;

impl Gallery {
    pub fn new() -> Self {
        Self
    }

    fn text_width(width: u16) -> u16 {
        width.saturating_sub(SIDE_PADDING * 2).min(MAX_TEXT_WIDTH)
    }

    fn lines(width: u16) -> Vec<Line<'static>> {
        let text_width = Self::text_width(width);
        let dim = Style::default().fg(Color::DarkGray);
        let rule = Line::styled("─".repeat(text_width as usize), dim);

        let mut lines = vec![
            Line::default(),
            Line::styled("More to", Style::default().add_modifier(Modifier::BOLD)),
            Line::styled(
                "Discover",
                Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            ),
            Line::default(),
        ];
        lines.extend(
            wrap_lines(BLURB, text_width)
                .into_iter()
                .map(|l| Line::styled(l, Style::default().fg(Color::Gray))),
        );
        lines.push(Line::default());

        for (alt, url) in PHOTOS {
            lines.push(Line::from(vec![
                Span::styled(format!("{} {alt} ", Icon::Image.glyph()), Style::default().fg(Color::Cyan)),
                Span::styled(short_url(url), dim),
            ]));
        }
        lines.push(Line::default());

        for (date, title) in ARTICLES {
            lines.push(rule.clone());
            lines.push(Line::styled(date, dim));
            lines.extend(wrap_lines(title, text_width).into_iter().map(Line::from));
            lines.push(Line::default());
        }
        lines
    }

    pub fn height(width: u16) -> u16 {
        Self::lines(width).len() as u16
    }
}

impl Widget for Gallery {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(Self::lines(area.width))
            .block(Block::default().padding(Padding::horizontal(SIDE_PADDING)))
            .render(area, buf);
    }
}

impl Component for Gallery {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

//! # Cta Section
//!
//! Newsletter call-to-action. The email field and "Register" button are
//! drawn as static controls; nothing here takes input.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph, Widget};

use crate::tui::component::Component;
use crate::tui::components::icon::Icon;
use crate::tui::components::text::{short_url, wrap_lines};

const EYEBROW: &str = "NEWSLETTER";
const HEADING: &str = "New RoutePick production updates, travel stories, and secret destinations \
    found in the wild. Find it in our newsletter.";
const EMAIL_PLACEHOLDER: &str = "name@email.com";
const IMAGE: &str = "https://picsum.photos/seed/van_life/800/600";
const IMAGE_CAPTION: &str = "WATCH FILM";

const MAX_TEXT_WIDTH: u16 = 60;
const SIDE_PADDING: u16 = 2;

#[derive(Debug, Clone, Copy, Default)]
pub struct Cta;

impl Cta {
    pub fn new() -> Self {
        Self
    }

    fn lines(width: u16) -> Vec<Line<'static>> {
        let text_width = width.saturating_sub(SIDE_PADDING * 2).min(MAX_TEXT_WIDTH);
        let dim = Style::default().fg(Color::DarkGray);

        let mut lines = vec![
            Line::default(),
            Line::styled(EYEBROW, dim),
            Line::default(),
        ];
        lines.extend(wrap_lines(HEADING, text_width).into_iter().map(|l| {
            Line::styled(l, Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        }));
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {EMAIL_PLACEHOLDER:<24}"),
                Style::default().fg(Color::DarkGray).bg(Color::White),
            ),
            Span::styled(
                format!(" Register {} ", Icon::ArrowRight.glyph()),
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", Icon::Image.glyph()), Style::default().fg(Color::Cyan)),
            Span::styled(short_url(IMAGE), dim),
        ]));
        lines.push(Line::styled(
            format!("  {IMAGE_CAPTION}"),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        lines.push(Line::default());
        lines
    }

    pub fn height(width: u16) -> u16 {
        Self::lines(width).len() as u16
    }
}

impl Widget for Cta {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(Self::lines(area.width))
            .block(
                Block::default()
                    .padding(Padding::horizontal(SIDE_PADDING))
                    .style(Style::default().bg(Color::Indexed(235))),
            )
            .render(area, buf);
    }
}

impl Component for Cta {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

//! # Footer Section
//!
//! Brand, the two decorative icons and the repository link. One row in the
//! wide layout, stacked in the compact one.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::tui::component::Component;
use crate::tui::components::icon::Icon;
use crate::tui::components::text::short_url;

pub const GITHUB_URL: &str = "https://github.com/yunjin-Kim4809/RoutePick";
const BRAND: &str = "RoutePick";

#[derive(Debug, Clone, Copy, Default)]
pub struct Footer {
    pub compact: bool,
}

impl Footer {
    pub fn new(compact: bool) -> Self {
        Self { compact }
    }

    pub fn height(&self, _width: u16) -> u16 {
        // top rule, padding, content, padding
        if self.compact { 8 } else { 4 }
    }

    fn brand() -> Line<'static> {
        Line::styled(BRAND, Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
    }

    fn icons() -> Line<'static> {
        Line::from(format!(
            "{}    {}",
            Icon::Navigation.glyph(),
            Icon::Map.glyph()
        ))
    }

    fn link() -> Line<'static> {
        Line::from(vec![
            Span::raw(format!("{} ", Icon::Github.glyph())),
            Span::styled(
                short_url(GITHUB_URL),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
            ),
        ])
    }
}

impl Widget for Footer {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.compact {
            let lines = vec![
                Line::default(),
                Self::brand(),
                Line::default(),
                Self::icons(),
                Line::default(),
                Self::link(),
            ];
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .render(inner, buf);
            return;
        }

        let [_, row, _] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner);
        let [left, center, right] = Layout::horizontal([Constraint::Fill(1); 3])
            .horizontal_margin(2)
            .areas(row);
        Paragraph::new(Self::brand()).render(left, buf);
        Paragraph::new(Self::icons())
            .alignment(Alignment::Center)
            .render(center, buf);
        Paragraph::new(Self::link())
            .alignment(Alignment::Right)
            .render(right, buf);
    }
}

impl Component for Footer {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

//! # Features Section
//!
//! Section header plus the four feature cards. In the wide layout cards are
//! packed into rows three column-units wide (large cards take two units); in
//! the compact layout every card gets the full width.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::tui::component::Component;
use crate::tui::components::feature_card::FeatureCard;
use crate::tui::components::icon::Icon;

const PILL: &str = "Technology";
const HEADING: &str = "Smarter Systems.";
const SUBHEADING: &str = "Smoother Journeys.";

/// blank, pill, blank, heading, subheading, blank
const HEADER_ROWS: u16 = 6;
const ROW_UNITS: u16 = 3;
const GAP: u16 = 1;

pub const FEATURES: [FeatureCard<'static>; 4] = [
    FeatureCard {
        title: "Predictive Routing",
        description: "Our AI anticipates traffic, weather, and crowd density to ensure you're always on the optimal path.",
        image: "https://picsum.photos/seed/road_winding/800/600",
        icon: Icon::Compass,
        large: true,
    },
    FeatureCard {
        title: "Smart Stays",
        description: "Automatic booking of eco-friendly, high-comfort accommodations that match your style.",
        image: "https://picsum.photos/seed/hotel_luxury/600/600",
        icon: Icon::Zap,
        large: false,
    },
    FeatureCard {
        title: "Local Immersion",
        description: "Connect with local guides and experiences often missed by standard travel agents.",
        image: "https://picsum.photos/seed/people_culture/600/600",
        icon: Icon::Map,
        large: false,
    },
    FeatureCard {
        title: "Real-time Adaptability",
        description: "Change of plans? The system instantly re-optimizes your entire itinerary in seconds.",
        image: "https://picsum.photos/seed/tech_map/800/600",
        icon: Icon::Cpu,
        large: true,
    },
];

#[derive(Debug, Clone, Copy, Default)]
pub struct Features {
    pub compact: bool,
}

impl Features {
    pub fn new(compact: bool) -> Self {
        Self { compact }
    }

    /// Group card indices into grid rows.
    fn rows(&self) -> Vec<Vec<usize>> {
        if self.compact {
            return (0..FEATURES.len()).map(|i| vec![i]).collect();
        }

        let mut rows = Vec::new();
        let mut current = Vec::new();
        let mut used = 0;
        for (i, card) in FEATURES.iter().enumerate() {
            let units = span(card);
            if used + units > ROW_UNITS && !current.is_empty() {
                rows.push(std::mem::take(&mut current));
                used = 0;
            }
            current.push(i);
            used += units;
        }
        if !current.is_empty() {
            rows.push(current);
        }
        rows
    }

    /// Card rects for one grid row placed at `area`.
    fn row_areas(row: &[usize], area: Rect) -> Vec<Rect> {
        Layout::horizontal(row.iter().map(|&i| Constraint::Fill(span(&FEATURES[i]))))
            .spacing(GAP)
            .split(area)
            .to_vec()
    }

    fn row_height(row: &[usize], width: u16) -> u16 {
        Self::row_areas(row, Rect::new(0, 0, width, 1))
            .iter()
            .zip(row)
            .map(|(rect, &i)| FEATURES[i].height(rect.width))
            .max()
            .unwrap_or(0)
    }

    pub fn height(&self, width: u16) -> u16 {
        let grid_width = width.saturating_sub(4);
        let rows = self.rows();
        let cards: u16 = rows.iter().map(|row| Self::row_height(row, grid_width)).sum();
        // gaps between rows, plus a trailing blank
        HEADER_ROWS + cards + GAP * rows.len().saturating_sub(1) as u16 + 1
    }
}

fn span(card: &FeatureCard<'_>) -> u16 {
    if card.large { 2 } else { 1 }
}

impl Widget for Features {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let header = vec![
            Line::default(),
            Line::from(Span::styled(
                format!(" {PILL} "),
                Style::default().fg(Color::Black).bg(Color::Gray),
            )),
            Line::default(),
            Line::from(Span::styled(
                HEADING,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                SUBHEADING,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
        ];
        Paragraph::new(header)
            .alignment(Alignment::Center)
            .render(Rect { height: HEADER_ROWS.min(area.height), ..area }, buf);

        let grid_x = area.x + 2;
        let grid_width = area.width.saturating_sub(4);
        let mut y = area.y + HEADER_ROWS;
        for row in self.rows() {
            let height = Self::row_height(&row, grid_width);
            let row_area = Rect::new(grid_x, y, grid_width, height).intersection(area);
            if row_area.is_empty() {
                break;
            }
            for (rect, &i) in Self::row_areas(&row, Rect::new(grid_x, y, grid_width, height))
                .iter()
                .zip(&row)
            {
                let rect = rect.intersection(area);
                if !rect.is_empty() {
                    FEATURES[i].render(rect, buf);
                }
            }
            y += height + GAP;
        }
    }
}

impl Component for Features {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

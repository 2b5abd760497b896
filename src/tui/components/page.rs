//! # LandingPage Component
//!
//! The scrolling body of the page: Hero, Features, Gallery, Cta and Footer
//! stacked in that order inside a `tui-scrollview` canvas.
//!
//! ## Architecture
//!
//! `LandingPage` is a transient component (created each frame) that wraps
//! `&'a mut LandingPageState` (persistent state). Section heights depend only
//! on the content width and the layout flag, so they are cached and rebuilt
//! when either changes.
//!
//! Clicks arrive in screen coordinates; [`LandingPageState::screen_to_content`]
//! maps them into canvas coordinates using the last viewport and scroll
//! offset, which is how the Hero's "Plan Trip" button is hit-tested.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::tui::component::{Component, EventHandler};
use crate::tui::components::cta::Cta;
use crate::tui::components::features::Features;
use crate::tui::components::footer::Footer;
use crate::tui::components::gallery::Gallery;
use crate::tui::components::hero::Hero;
use crate::tui::event::TuiEvent;

/// Page sections in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Hero,
    Features,
    Gallery,
    Cta,
    Footer,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Hero,
        Section::Features,
        Section::Gallery,
        Section::Cta,
        Section::Footer,
    ];

    fn height(self, width: u16, compact: bool) -> u16 {
        match self {
            Section::Hero => Hero::height(width),
            Section::Features => Features::new(compact).height(width),
            Section::Gallery => Gallery::height(width),
            Section::Cta => Cta::height(width),
            Section::Footer => Footer::new(compact).height(width),
        }
    }
}

/// Events emitted by the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    PlanTripRequested,
}

/// Persistent scroll and layout state for the landing page.
#[derive(Default)]
pub struct LandingPageState {
    pub scroll_state: ScrollViewState,
    /// Height of each section, in `Section::ALL` order.
    pub heights: Vec<u16>,
    /// Running totals of `heights` (bottom edge of each section).
    pub prefix_heights: Vec<u16>,
    /// Screen area the page was last drawn into.
    pub viewport: Rect,
    content_width: u16,
    compact: bool,
}

impl LandingPageState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild cached section heights if the width or layout changed.
    pub fn relayout(&mut self, content_width: u16, compact: bool) {
        if !self.heights.is_empty() && self.content_width == content_width && self.compact == compact {
            return;
        }
        self.heights = Section::ALL
            .iter()
            .map(|section| section.height(content_width, compact))
            .collect();
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
        self.content_width = content_width;
        self.compact = compact;
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Canvas rect of a section.
    pub fn section_rect(&self, section: Section) -> Option<Rect> {
        let idx = Section::ALL.iter().position(|s| *s == section)?;
        let top = if idx == 0 { 0 } else { self.prefix_heights[idx - 1] };
        let height = *self.heights.get(idx)?;
        Some(Rect::new(0, top, self.content_width, height))
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.total_height().saturating_sub(self.viewport.height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Map a screen position into canvas coordinates, if it's on the page.
    pub fn screen_to_content(&self, x: u16, y: u16) -> Option<Position> {
        if !self.viewport.contains(Position::new(x, y)) {
            return None;
        }
        let offset = self.scroll_state.offset();
        Some(Position::new(
            x - self.viewport.x + offset.x,
            y - self.viewport.y + offset.y,
        ))
    }

    /// Canvas rect of the Hero's "Plan Trip" button.
    pub fn hero_button(&self) -> Option<Rect> {
        self.section_rect(Section::Hero).map(Hero::button_rect)
    }

    fn hits_hero_button(&self, x: u16, y: u16) -> bool {
        match (self.screen_to_content(x, y), self.hero_button()) {
            (Some(pos), Some(button)) => button.contains(pos),
            _ => false,
        }
    }

    /// Whether any of the Hero's rows are on screen.
    fn hero_visible(&self) -> bool {
        self.heights
            .first()
            .is_some_and(|&h| self.scroll_state.offset().y < h)
    }
}

impl EventHandler for LandingPageState {
    type Event = PageEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<PageEvent> {
        match event {
            TuiEvent::ScrollUp | TuiEvent::CursorUp => {
                self.scroll_state.scroll_up();
                None
            }
            TuiEvent::ScrollDown | TuiEvent::CursorDown => {
                self.scroll_state.scroll_down();
                self.clamp_scroll();
                None
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                None
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.clamp_scroll();
                None
            }
            TuiEvent::CursorHome => {
                self.scroll_state.scroll_to_top();
                None
            }
            TuiEvent::CursorEnd => {
                self.scroll_state.set_offset(Position {
                    x: 0,
                    y: self.total_height().saturating_sub(self.viewport.height),
                });
                None
            }
            // Enter activates the Hero CTA while it's on screen.
            TuiEvent::Submit if self.hero_visible() => Some(PageEvent::PlanTripRequested),
            TuiEvent::MouseClick(x, y) if self.hits_hero_button(*x, *y) => {
                Some(PageEvent::PlanTripRequested)
            }
            _ => None,
        }
    }
}

/// Scrollable landing page. Created fresh each frame.
pub struct LandingPage<'a> {
    pub state: &'a mut LandingPageState,
    pub compact: bool,
}

impl<'a> LandingPage<'a> {
    pub fn new(state: &'a mut LandingPageState, compact: bool) -> Self {
        Self { state, compact }
    }
}

impl Component for LandingPage<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        self.state.relayout(content_width, self.compact);
        self.state.viewport = area;
        self.state.clamp_scroll();

        let mut scroll_view = ScrollView::new(Size::new(content_width, self.state.total_height()))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        for section in Section::ALL {
            let Some(rect) = self.state.section_rect(section) else {
                continue;
            };
            match section {
                Section::Hero => scroll_view.render_widget(Hero::new(), rect),
                Section::Features => scroll_view.render_widget(Features::new(self.compact), rect),
                Section::Gallery => scroll_view.render_widget(Gallery::new(), rect),
                Section::Cta => scroll_view.render_widget(Cta::new(), rect),
                Section::Footer => scroll_view.render_widget(Footer::new(self.compact), rect),
            }
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

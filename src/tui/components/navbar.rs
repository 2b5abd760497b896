//! # Navbar Component
//!
//! Brand on the left; on the right either a "Plan Trip" button (wide layout)
//! or a menu toggle (compact layout). The toggle opens a mobile menu that
//! drops down over the page and holds its own "Plan Trip" button.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `NavbarState` lives in `TuiState` and owns `is_mobile_menu_open`
//! - `Navbar` is created each frame with borrowed state and the layout flag
//!
//! The navbar never opens the planner itself. Plan requests come back out of
//! [`NavbarState::handle_event`] as [`NavbarEvent::PlanTripRequested`] and the
//! root container turns them into `Action::OpenPlanner`.
//!
//! ## Menu flag and layout
//!
//! The menu is only drawn in the compact layout, but the flag is not reset
//! when the terminal widens. Narrowing the terminal again shows the menu in
//! whatever state it was left.

use log::debug;
use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::components::icon::Icon;
use crate::tui::components::text::display_width;
use crate::tui::event::TuiEvent;

const BRAND: &str = "RoutePick";
const DESKTOP_PLAN_LABEL: &str = "( PLAN TRIP )";
const MENU_PLAN_LABEL: &str = "Plan Trip";

/// Rows the navbar occupies: padding, content, bottom rule.
pub const NAVBAR_HEIGHT: u16 = 3;
/// Rows the dropped-down mobile menu occupies.
pub const MOBILE_MENU_HEIGHT: u16 = 5;

/// Events emitted by the navbar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavbarEvent {
    /// One of the "Plan Trip" controls was activated.
    PlanTripRequested,
    /// The mobile menu was opened or closed.
    MenuToggled(bool),
}

/// Persistent navbar state.
#[derive(Debug, Default)]
pub struct NavbarState {
    pub is_mobile_menu_open: bool,
    /// Layout used for the last frame; decides what `p` activates.
    compact: bool,
    bar: Option<Rect>,
    plan_button: Option<Rect>,
    toggle: Option<Rect>,
    menu: Option<Rect>,
    menu_plan_button: Option<Rect>,
}

impl NavbarState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the mobile menu.
    pub fn toggle_mobile_menu(&mut self) -> NavbarEvent {
        self.is_mobile_menu_open = !self.is_mobile_menu_open;
        debug!("Mobile menu open: {}", self.is_mobile_menu_open);
        NavbarEvent::MenuToggled(self.is_mobile_menu_open)
    }

    /// Activate the mobile menu's "Plan Trip": close the menu, then request
    /// the planner. Does nothing while the menu is closed, since the button
    /// doesn't exist then.
    pub fn activate_menu_plan(&mut self) -> Option<NavbarEvent> {
        if !self.is_mobile_menu_open {
            return None;
        }
        self.is_mobile_menu_open = false;
        Some(NavbarEvent::PlanTripRequested)
    }

    /// Whether a screen position lands on the navbar or its open menu.
    /// Clicks there belong to the navbar even when they miss every control.
    pub fn covers(&self, x: u16, y: u16) -> bool {
        let pos = Position::new(x, y);
        [self.bar, self.menu]
            .into_iter()
            .flatten()
            .any(|rect| rect.contains(pos))
    }

    fn hit(rect: Option<Rect>, x: u16, y: u16) -> bool {
        rect.is_some_and(|r| r.contains(Position::new(x, y)))
    }
}

impl EventHandler for NavbarState {
    type Event = NavbarEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<NavbarEvent> {
        match event {
            TuiEvent::InputChar('m') => Some(self.toggle_mobile_menu()),
            TuiEvent::InputChar('p') => {
                if self.compact && self.is_mobile_menu_open {
                    self.activate_menu_plan()
                } else {
                    Some(NavbarEvent::PlanTripRequested)
                }
            }
            TuiEvent::MouseClick(x, y) => {
                let (x, y) = (*x, *y);
                if Self::hit(self.menu_plan_button, x, y) {
                    self.activate_menu_plan()
                } else if Self::hit(self.toggle, x, y) {
                    Some(self.toggle_mobile_menu())
                } else if Self::hit(self.plan_button, x, y) {
                    Some(NavbarEvent::PlanTripRequested)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the navbar.
pub struct Navbar<'a> {
    state: &'a mut NavbarState,
    compact: bool,
}

impl<'a> Navbar<'a> {
    pub fn new(state: &'a mut NavbarState, compact: bool) -> Self {
        Self { state, compact }
    }

    /// Draw the mobile menu just below the navbar, over the top of `page`.
    /// Must be called after the page is drawn so it stays on top.
    pub fn render_mobile_menu(&mut self, frame: &mut Frame, page: Rect) {
        self.state.menu = None;
        self.state.menu_plan_button = None;
        if !self.compact || !self.state.is_mobile_menu_open {
            return;
        }

        let area = Rect {
            height: MOBILE_MENU_HEIGHT.min(page.height),
            ..page
        };
        frame.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::new(2, 2, 1, 0));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.height == 0 {
            return;
        }
        // Full-width pill, label centered.
        let button = Rect { height: 1, ..inner };
        let label_width = display_width(MENU_PLAN_LABEL);
        let pad = button.width.saturating_sub(label_width) as usize;
        let label = format!(
            "{}{}{}",
            " ".repeat(pad / 2),
            MENU_PLAN_LABEL,
            " ".repeat(pad - pad / 2)
        );
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                label,
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ))),
            button,
        );

        self.state.menu = Some(area);
        self.state.menu_plan_button = Some(button);
    }
}

impl Component for Navbar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.compact = self.compact;
        self.state.bar = Some(area);
        self.state.plan_button = None;
        self.state.toggle = None;

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::new(2, 2, 1, 0));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 {
            return;
        }
        let row = Rect { height: 1, ..inner };

        frame.render_widget(
            Paragraph::new(Span::styled(
                BRAND,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            row,
        );

        let (label, style) = if self.compact {
            let icon = if self.state.is_mobile_menu_open {
                Icon::Close
            } else {
                Icon::Menu
            };
            (icon.glyph().to_string(), Style::default().fg(Color::White))
        } else {
            (
                DESKTOP_PLAN_LABEL.to_string(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )
        };
        let width = display_width(&label).min(row.width);
        let control = Rect {
            x: row.right().saturating_sub(width),
            width,
            ..row
        };
        frame.render_widget(Paragraph::new(Span::styled(label, style)), control);

        if self.compact {
            self.state.toggle = Some(control);
        } else {
            self.state.plan_button = Some(control);
        }
    }
}

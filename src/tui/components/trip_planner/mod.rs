//! # TripPlanner Overlay
//!
//! Modal form for a new trip request. Visibility is owned by the root
//! container (`App::is_planner_open`); this component only reports
//! dismissals and submissions back up.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `TripPlannerState` lives in `TuiState` and keeps the form contents, so
//!   closing and reopening the overlay doesn't lose what was typed
//! - `TripPlanner` is created each frame with borrowed state and `is_open`
//!
//! When `is_open` is false the wrapper draws nothing and swallows no input.
//!
//! ## Keys
//!
//! | Key | Action |
//! |-----|--------|
//! | Tab / Down | Next field |
//! | Shift+Tab / Up | Previous field |
//! | Left / Right | Cycle visit time (on that row) |
//! | Space | Toggle transport mode / press submit |
//! | Enter | Next field, or submit on the submit row |
//! | Esc | Close |

mod text_field;

use log::debug;
use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph};

use crate::core::trip::{TripDraft, TripError, TripRequest, Transport, VisitTime};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::icon::Icon;
use crate::tui::components::text::{centered_rect, display_width};
use crate::tui::event::TuiEvent;

pub use text_field::TextField;

const TITLE: &str = " Plan Your Trip ";
const HELP: &str = " Tab Next  Space Toggle  Esc Close ";
const SUBMIT_LABEL: &str = "[ Find my route → ]";
const LABEL_WIDTH: u16 = 14;

/// Smallest panel the form can be drawn in.
const MIN_WIDTH: u16 = 44;
const MIN_HEIGHT: u16 = 20;

/// One focusable row of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Theme,
    Location,
    GroupSize,
    StartDate,
    EndDate,
    VisitTime,
    Transport(Transport),
    CustomTransport,
    Submit,
}

impl Focus {
    pub const ORDER: [Focus; 12] = [
        Focus::Theme,
        Focus::Location,
        Focus::GroupSize,
        Focus::StartDate,
        Focus::EndDate,
        Focus::VisitTime,
        Focus::Transport(Transport::Walk),
        Focus::Transport(Transport::Transit),
        Focus::Transport(Transport::Car),
        Focus::Transport(Transport::Bike),
        Focus::CustomTransport,
        Focus::Submit,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Focus {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Focus {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    fn label(self) -> &'static str {
        match self {
            Focus::Theme => "Theme",
            Focus::Location => "Location",
            Focus::GroupSize => "Group size",
            Focus::StartDate => "Start date",
            Focus::EndDate => "End date",
            Focus::VisitTime => "Visit time",
            Focus::Transport(Transport::Walk) => "Transport",
            Focus::Transport(_) => "",
            Focus::CustomTransport => "Other",
            Focus::Submit => "",
        }
    }
}

/// Events emitted by the planner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripPlannerEvent {
    Submit(TripRequest),
    Dismiss,
}

/// Persistent form state.
#[derive(Debug)]
pub struct TripPlannerState {
    pub theme: TextField,
    pub location: TextField,
    pub group_size: TextField,
    pub start_date: TextField,
    pub end_date: TextField,
    pub custom_transport: TextField,
    pub visit_time: Option<VisitTime>,
    /// Kept in `Transport::ALL` order.
    pub transportation: Vec<Transport>,
    pub focus: Focus,
    /// Last validation failure, shown inside the panel.
    pub error: Option<String>,
    panel: Option<Rect>,
    close_button: Option<Rect>,
    rows: Vec<(Focus, Rect)>,
}

impl Default for TripPlannerState {
    fn default() -> Self {
        Self::new()
    }
}

impl TripPlannerState {
    pub fn new() -> Self {
        Self {
            theme: TextField::new("e.g. Rainy day indoor date"),
            location: TextField::new("e.g. Hongdae, Seoul"),
            group_size: TextField::new("1 person"),
            start_date: TextField::new("YYYY-MM-DD"),
            end_date: TextField::new("YYYY-MM-DD (optional)"),
            custom_transport: TextField::new("e.g. Scooter"),
            visit_time: None,
            transportation: Vec::new(),
            focus: Focus::Theme,
            error: None,
            panel: None,
            close_button: None,
            rows: Vec::new(),
        }
    }

    /// Clear the form back to a blank draft.
    pub fn reset(&mut self) {
        for field in self.text_fields_mut() {
            field.clear();
        }
        self.visit_time = None;
        self.transportation.clear();
        self.focus = Focus::Theme;
        self.error = None;
    }

    fn text_fields_mut(&mut self) -> [&mut TextField; 6] {
        [
            &mut self.theme,
            &mut self.location,
            &mut self.group_size,
            &mut self.start_date,
            &mut self.end_date,
            &mut self.custom_transport,
        ]
    }

    fn field(&self, focus: Focus) -> Option<&TextField> {
        match focus {
            Focus::Theme => Some(&self.theme),
            Focus::Location => Some(&self.location),
            Focus::GroupSize => Some(&self.group_size),
            Focus::StartDate => Some(&self.start_date),
            Focus::EndDate => Some(&self.end_date),
            Focus::CustomTransport => Some(&self.custom_transport),
            _ => None,
        }
    }

    fn field_mut(&mut self, focus: Focus) -> Option<&mut TextField> {
        match focus {
            Focus::Theme => Some(&mut self.theme),
            Focus::Location => Some(&mut self.location),
            Focus::GroupSize => Some(&mut self.group_size),
            Focus::StartDate => Some(&mut self.start_date),
            Focus::EndDate => Some(&mut self.end_date),
            Focus::CustomTransport => Some(&mut self.custom_transport),
            _ => None,
        }
    }

    /// The form contents as an unvalidated draft.
    pub fn draft(&self) -> TripDraft {
        TripDraft {
            theme: self.theme.value.clone(),
            location: self.location.value.clone(),
            group_size: self.group_size.value.clone(),
            start_date: self.start_date.value.clone(),
            end_date: self.end_date.value.clone(),
            visit_time: self.visit_time,
            transportation: self.transportation.clone(),
            custom_transport: self.custom_transport.value.clone(),
        }
    }

    /// Validate the form. On success the form is reset and the request
    /// returned; on failure the error is kept for display and focus moves to
    /// the offending field.
    pub fn submit(&mut self) -> Option<TripPlannerEvent> {
        match self.draft().validate() {
            Ok(request) => {
                debug!("Trip request validated: {}", request.summary());
                self.reset();
                Some(TripPlannerEvent::Submit(request))
            }
            Err(e) => {
                debug!("Trip request rejected: {}", e);
                self.focus = match &e {
                    TripError::MissingTheme => Focus::Theme,
                    TripError::MissingLocation => Focus::Location,
                    TripError::MissingStartDate => Focus::StartDate,
                    TripError::InvalidDate(raw) if *raw == self.start_date.value.trim() => {
                        Focus::StartDate
                    }
                    TripError::InvalidDate(_) | TripError::EndBeforeStart { .. } => Focus::EndDate,
                };
                self.error = Some(e.to_string());
                None
            }
        }
    }

    /// Activate the focused row (Space, or a click).
    fn activate(&mut self) -> Option<TripPlannerEvent> {
        match self.focus {
            Focus::Transport(mode) => {
                mode.toggle_in(&mut self.transportation);
                None
            }
            Focus::VisitTime => {
                self.visit_time = VisitTime::cycle_next(self.visit_time);
                None
            }
            Focus::Submit => self.submit(),
            _ => None,
        }
    }

    fn handle_click(&mut self, x: u16, y: u16) -> Option<TripPlannerEvent> {
        let pos = Position::new(x, y);
        if self.close_button.is_some_and(|r| r.contains(pos)) {
            return Some(TripPlannerEvent::Dismiss);
        }
        // Backdrop click closes the overlay.
        if self.panel.is_some_and(|r| !r.contains(pos)) {
            return Some(TripPlannerEvent::Dismiss);
        }
        let hit = self
            .rows
            .iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(focus, _)| *focus)?;
        self.focus = hit;
        self.activate()
    }
}

impl EventHandler for TripPlannerState {
    type Event = TripPlannerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<TripPlannerEvent> {
        match event {
            TuiEvent::Escape => return Some(TripPlannerEvent::Dismiss),
            TuiEvent::NextField | TuiEvent::CursorDown => {
                self.focus = self.focus.next();
                return None;
            }
            TuiEvent::PrevField | TuiEvent::CursorUp => {
                self.focus = self.focus.prev();
                return None;
            }
            TuiEvent::MouseClick(x, y) => return self.handle_click(*x, *y),
            _ => {}
        }

        let focus = self.focus;
        if let Some(field) = self.field_mut(focus) {
            if field.handle_event(event) {
                return None;
            }
            if matches!(event, TuiEvent::Submit) {
                self.focus = focus.next();
            }
            return None;
        }

        match (focus, event) {
            (Focus::VisitTime, TuiEvent::CursorRight) => {
                self.visit_time = VisitTime::cycle_next(self.visit_time);
                None
            }
            (Focus::VisitTime, TuiEvent::CursorLeft) => {
                self.visit_time = VisitTime::cycle_prev(self.visit_time);
                None
            }
            (Focus::VisitTime, TuiEvent::Submit) => {
                self.focus = focus.next();
                None
            }
            (Focus::Transport(_), TuiEvent::Submit) => {
                self.focus = focus.next();
                None
            }
            (_, TuiEvent::InputChar(' ')) | (Focus::Submit, TuiEvent::Submit) => self.activate(),
            _ => None,
        }
    }
}

/// Transient render wrapper for the planner overlay.
pub struct TripPlanner<'a> {
    state: &'a mut TripPlannerState,
    is_open: bool,
}

impl<'a> TripPlanner<'a> {
    pub fn new(state: &'a mut TripPlannerState, is_open: bool) -> Self {
        Self { state, is_open }
    }

    /// Route an event to the form. A closed planner ignores everything.
    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<TripPlannerEvent> {
        if !self.is_open {
            return None;
        }
        self.state.handle_event(event)
    }

    fn panel_rect(area: Rect) -> Rect {
        let mut panel = centered_rect(60, 80, area);
        if panel.width < MIN_WIDTH {
            panel.width = MIN_WIDTH.min(area.width);
            panel.x = area.x + (area.width - panel.width) / 2;
        }
        if panel.height < MIN_HEIGHT {
            panel.height = MIN_HEIGHT.min(area.height);
            panel.y = area.y + (area.height - panel.height) / 2;
        }
        panel
    }

    fn row_line(&self, focus: Focus, value_width: u16) -> Line<'_> {
        let focused = self.state.focus == focus;
        let marker = if focused { "› " } else { "  " };
        let label_style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let mut spans = vec![
            Span::styled(marker, label_style),
            Span::styled(
                format!("{:<width$}", focus.label(), width = LABEL_WIDTH as usize - 2),
                label_style,
            ),
        ];

        match focus {
            Focus::VisitTime => {
                let value = self.state.visit_time.map_or("Any time", VisitTime::label);
                spans.push(Span::styled(
                    format!("‹ {value} ›"),
                    Style::default().fg(if focused { Color::White } else { Color::Gray }),
                ));
            }
            Focus::Transport(mode) => {
                let checked = self.state.transportation.contains(&mode);
                spans.push(Span::styled(
                    format!("[{}] {}", if checked { "x" } else { " " }, mode.label()),
                    Style::default().fg(if checked { Color::Green } else { Color::Gray }),
                ));
            }
            Focus::Submit => {
                let width = display_width(SUBMIT_LABEL);
                let pad = value_width.saturating_sub(width) / 2;
                spans.push(Span::raw(" ".repeat(pad as usize)));
                let style = if focused {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
                };
                spans.push(Span::styled(SUBMIT_LABEL, style));
            }
            _ => {
                if let Some(field) = self.state.field(focus) {
                    spans.extend(field.line(focused, value_width).spans);
                }
            }
        }
        Line::from(spans)
    }
}

impl Component for TripPlanner<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.panel = None;
        self.state.close_button = None;
        self.state.rows.clear();
        if !self.is_open {
            return;
        }

        let panel = Self::panel_rect(area);
        frame.render_widget(Clear, panel);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(TITLE)
            .title_bottom(Line::from(HELP).centered())
            .padding(Padding::new(2, 2, 1, 0));
        let inner = block.inner(panel);
        frame.render_widget(block, panel);

        // Close control sits on the top border.
        let close_label = format!("[{}]", Icon::Close.glyph());
        let close_width = display_width(&close_label);
        let close = Rect::new(
            panel.right().saturating_sub(close_width + 2),
            panel.y,
            close_width,
            1,
        )
        .intersection(panel);
        frame.render_widget(Paragraph::new(close_label), close);

        self.state.panel = Some(panel);
        self.state.close_button = Some(close);

        let value_width = inner.width.saturating_sub(LABEL_WIDTH);
        let mut y = inner.y;
        let bottom = inner.bottom();
        for focus in Focus::ORDER {
            if focus == Focus::Submit {
                // Blank line, then the validation message (or another blank).
                y += 1;
                if let Some(error) = &self.state.error
                    && y < bottom
                {
                    frame.render_widget(
                        Paragraph::new(Span::styled(
                            format!("! {error}"),
                            Style::default().fg(Color::Red),
                        )),
                        Rect::new(inner.x, y, inner.width, 1),
                    );
                }
                y += 1;
            }
            if y >= bottom {
                break;
            }
            let row = Rect::new(inner.x, y, inner.width, 1);
            frame.render_widget(Paragraph::new(self.row_line(focus, value_width)), row);
            self.state.rows.push((focus, row));

            if focus == self.state.focus
                && let Some(field) = self.state.field(focus)
            {
                let (_, column) = field.window(value_width);
                let x = inner
                    .x
                    .saturating_add(LABEL_WIDTH)
                    .saturating_add(column)
                    .min(row.right().saturating_sub(1));
                frame.set_cursor_position((x, y));
            }
            y += 1;
        }
    }
}

//! # CourseView Overlay
//!
//! The finished course and a conversation with the planner about it.
//! Opened with `c` once a trip is ready; visibility lives in
//! `App::is_course_open`.
//!
//! The body is pre-wrapped into lines so the scroll range is known before
//! drawing. The view jumps to the bottom after a question is sent and stays
//! where the visitor scrolled it otherwise.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph};

use crate::core::state::{ChatMessage, ChatRole, TripStatus};
use crate::core::trip::TripRequest;
use crate::planner::Course;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::text::{centered_rect, display_width, wrap_lines};
use crate::tui::components::trip_planner::TextField;
use crate::tui::event::TuiEvent;

const TITLE: &str = " Your Course ";
const HELP: &str = " ↑↓ Scroll  Enter Ask  Esc Close ";
const PROMPT: &str = "Ask › ";
const LABEL_WIDTH: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseViewEvent {
    SendChat(String),
    Dismiss,
}

#[derive(Debug)]
pub struct CourseViewState {
    pub input: TextField,
    pub scroll: u16,
    /// Jump to the newest chat line on the next draw.
    pub stick_to_bottom: bool,
    max_scroll: u16,
    viewport: u16,
    panel: Option<Rect>,
}

impl Default for CourseViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl CourseViewState {
    pub fn new() -> Self {
        Self {
            input: TextField::new("e.g. Where can we eat near the second stop?"),
            scroll: 0,
            stick_to_bottom: false,
            max_scroll: 0,
            viewport: 0,
            panel: None,
        }
    }

    fn scroll_by(&mut self, delta: i32) {
        let target = (self.scroll as i32 + delta).clamp(0, self.max_scroll as i32);
        self.scroll = target as u16;
        self.stick_to_bottom = false;
    }
}

impl EventHandler for CourseViewState {
    type Event = CourseViewEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<CourseViewEvent> {
        match event {
            TuiEvent::Escape => Some(CourseViewEvent::Dismiss),
            TuiEvent::ScrollUp | TuiEvent::CursorUp => {
                self.scroll_by(-1);
                None
            }
            TuiEvent::ScrollDown | TuiEvent::CursorDown => {
                self.scroll_by(1);
                None
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_by(-(self.viewport.max(1) as i32));
                None
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_by(self.viewport.max(1) as i32);
                None
            }
            TuiEvent::MouseClick(x, y) => {
                let outside = self
                    .panel
                    .is_some_and(|r| !r.contains(Position::new(*x, *y)));
                outside.then_some(CourseViewEvent::Dismiss)
            }
            TuiEvent::Submit => {
                if self.input.value.trim().is_empty() {
                    return None;
                }
                let message = std::mem::take(&mut self.input.value);
                self.input.clear();
                self.stick_to_bottom = true;
                Some(CourseViewEvent::SendChat(message))
            }
            other => {
                self.input.handle_event(other);
                None
            }
        }
    }
}

/// Transient render wrapper for the course overlay.
pub struct CourseView<'a> {
    state: &'a mut CourseViewState,
    trip: &'a TripStatus,
    is_open: bool,
}

impl<'a> CourseView<'a> {
    pub fn new(state: &'a mut CourseViewState, trip: &'a TripStatus, is_open: bool) -> Self {
        Self {
            state,
            trip,
            is_open,
        }
    }

    fn visible(&self) -> bool {
        self.is_open && self.trip.is_ready()
    }

    /// Route an event to the view. Ignored unless open over a ready course.
    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<CourseViewEvent> {
        if !self.visible() {
            return None;
        }
        // Keep the next question typed until the last one is answered.
        if matches!(event, TuiEvent::Submit)
            && matches!(self.trip, TripStatus::Ready { awaiting_reply: true, .. })
        {
            return None;
        }
        self.state.handle_event(event)
    }
}

fn label_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label:<LABEL_WIDTH$}"),
            Style::default().fg(Color::Gray),
        ),
        Span::raw(value),
    ])
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

fn wrapped(text: &str, width: u16, style: Style) -> impl Iterator<Item = Line<'static>> {
    wrap_lines(text, width)
        .into_iter()
        .map(move |row| Line::from(Span::styled(row, style)))
}

/// Everything above the input box, wrapped to `width` columns.
pub fn course_lines(
    request: &TripRequest,
    course_url: &str,
    course: Option<&Course>,
    chat: &[ChatMessage],
    awaiting_reply: bool,
    width: u16,
) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        request.summary(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    let when = match request.time_window() {
        Some(w) => format!("{} – {} ({} min)", w.start_time, w.end_time, w.total_minutes),
        None => "Any time".to_string(),
    };
    lines.push(label_line("When", when));
    let transport = request.transportation_label();
    lines.push(label_line(
        "Transport",
        if transport.is_empty() { "Not specified".to_string() } else { transport },
    ));
    if let Some(area) = course.and_then(|c| c.location.as_deref()) {
        lines.push(label_line("Area", area.to_string()));
    }
    lines.push(label_line("Map", course_url.to_string()));
    lines.push(Line::default());

    match course {
        None => lines.push(Line::from(Span::styled(
            "Loading course details...",
            Style::default().fg(Color::DarkGray),
        ))),
        Some(course) => {
            if let Some(description) = &course.course_description {
                lines.extend(wrapped(description, width, Style::default()));
                lines.push(Line::default());
            }

            lines.push(heading("Stops"));
            let itinerary = course.itinerary();
            if itinerary.is_empty() {
                lines.push(Line::from(Span::styled(
                    "The planner returned no stops.",
                    Style::default().fg(Color::DarkGray),
                )));
            }
            for (n, (place, minutes)) in itinerary.iter().enumerate() {
                let mut stop = format!("{}. {}", n + 1, place.name);
                if let Some(category) = &place.category {
                    stop.push_str(&format!(" ({category})"));
                }
                if let Some(minutes) = minutes {
                    stop.push_str(&format!(" · {minutes} min"));
                }
                lines.extend(wrapped(&stop, width, Style::default()));
            }
            let total: u64 = itinerary.iter().filter_map(|(_, m)| *m).sum();
            if total > 0 {
                lines.push(Line::from(Span::styled(
                    format!("Total {total} min"),
                    Style::default().fg(Color::Gray),
                )));
            }

            if let Some(reasoning) = &course.reasoning {
                lines.push(Line::default());
                lines.push(heading("Why this route"));
                lines.extend(wrapped(reasoning, width, Style::default().fg(Color::Gray)));
            }
        }
    }

    lines.push(Line::default());
    lines.push(heading("Ask the planner"));
    if chat.is_empty() && !awaiting_reply {
        lines.push(Line::from(Span::styled(
            "Questions about this course go to the planner with the course attached.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for message in chat {
        let (prefix, style) = match message.role {
            ChatRole::Visitor => ("You: ", Style::default().fg(Color::Cyan)),
            ChatRole::Planner => ("Planner: ", Style::default()),
            ChatRole::Error => ("! ", Style::default().fg(Color::Red)),
        };
        lines.extend(wrapped(&format!("{prefix}{}", message.text), width, style));
    }
    if awaiting_reply {
        lines.push(Line::from(Span::styled(
            "Planner is thinking...",
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

impl Component for CourseView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.panel = None;
        if !self.visible() {
            return;
        }
        let TripStatus::Ready {
            request,
            course_url,
            course,
            chat,
            awaiting_reply,
            ..
        } = self.trip
        else {
            return;
        };

        let panel = centered_rect(80, 85, area);
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
        self.state.panel = Some(panel);

        let [body, input_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

        let lines = course_lines(
            request,
            course_url,
            course.as_ref(),
            chat,
            *awaiting_reply,
            body.width,
        );
        let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
        self.state.viewport = body.height;
        self.state.max_scroll = total.saturating_sub(body.height);
        if self.state.stick_to_bottom {
            self.state.scroll = self.state.max_scroll;
        }
        self.state.scroll = self.state.scroll.min(self.state.max_scroll);
        frame.render_widget(Paragraph::new(lines).scroll((self.state.scroll, 0)), body);

        let prompt_width = display_width(PROMPT);
        let field_width = input_area.width.saturating_sub(prompt_width);
        let mut spans = vec![Span::styled(
            PROMPT,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )];
        spans.extend(self.state.input.line(true, field_width).spans);
        frame.render_widget(Paragraph::new(Line::from(spans)), input_area);

        let (_, column) = self.state.input.window(field_width);
        let x = input_area
            .x
            .saturating_add(prompt_width)
            .saturating_add(column)
            .min(input_area.right().saturating_sub(1));
        frame.set_cursor_position((x, input_area.y));
    }
}

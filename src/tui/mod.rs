//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the page, and
//! translates input into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Routing
//!
//! One event is handled at a time, in this order:
//!
//! 1. `Ctrl+C` quits from anywhere.
//! 2. While the trip planner is open it gets every event (it's modal).
//! 3. Same for the course view.
//! 4. Otherwise the navbar, then the page, then the global keys (`c`, `q`).
//!
//! Component events are mapped to actions here, and effects returned by
//! `update()` are started as tokio tasks that report back over an mpsc
//! channel drained between frames.
//!
//! ## Redraw Strategy
//!
//! - **Pending trip**: draws every ~80ms so the status spinner moves.
//! - **Idle**: sleeps up to 500ms, only redraws on events, resizes or
//!   backend results.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::planner::{BackendError, HttpPlannerBackend, PlannerBackend, TaskId};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    CourseView, CourseViewEvent, CourseViewState, LandingPageState, NavbarEvent, NavbarState,
    PageEvent, TripPlanner, TripPlannerEvent, TripPlannerState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub navbar: NavbarState,
    pub page: LandingPageState,
    pub trip_planner: TripPlannerState,
    pub course_view: CourseViewState,
    /// Terminals narrower than this use the compact layout.
    pub compact_width: u16,
    pub spinner_frame: usize,
}

impl TuiState {
    pub fn new(compact_width: u16) -> Self {
        Self {
            navbar: NavbarState::new(),
            page: LandingPageState::new(),
            trip_planner: TripPlannerState::new(),
            course_view: CourseViewState::new(),
            compact_width,
            spinner_frame: 0,
        }
    }

    pub fn is_compact(&self, width: u16) -> bool {
        width < self.compact_width
    }
}

struct TerminalModeGuard {
    mouse: bool,
}

impl TerminalModeGuard {
    fn new(mouse: bool) -> std::io::Result<Self> {
        if mouse {
            execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        } else {
            execute!(stdout(), EnableBracketedPaste)?;
        }
        info!("Terminal modes enabled (mouse: {}, bracketed paste)", mouse);
        Ok(Self { mouse })
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        if self.mouse {
            let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
        } else {
            let _ = execute!(stdout(), DisableBracketedPaste);
        }
    }
}

/// Build the planner backend from a resolved config.
pub fn build_backend(config: &ResolvedConfig) -> Result<Arc<dyn PlannerBackend>, BackendError> {
    let backend = HttpPlannerBackend::new(&config.backend_url, config.request_timeout)?;
    info!("Planner backend: {}", backend.base_url());
    Ok(Arc::new(backend))
}

/// Timing for the status poll loop.
#[derive(Debug, Clone, Copy)]
struct PollSettings {
    interval: Duration,
    max_wait: Duration,
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let backend = build_backend(&config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let mut app = App::new(backend);
    let mut tui = TuiState::new(config.compact_width);
    let poll = PollSettings {
        interval: config.poll_interval,
        max_wait: config.max_wait,
    };

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = match TerminalModeGuard::new(config.mouse) {
        Ok(guard) => guard,
        Err(e) => {
            ratatui::restore();
            return Err(e);
        }
    };

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Tasks working on the current trip; a new submission supersedes them.
    let mut active_tasks: Vec<tokio::task::AbortHandle> = Vec::new();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        let animating = app.trip.is_pending();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            tui.spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let effect = handle_event(&mut app, &mut tui, &event);
            if run_effect(effect, &app, poll, &tx, &mut active_tasks) {
                break 'main;
            }
        }

        // Handle background task actions
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if run_effect(effect, &app, poll, &tx, &mut active_tasks) {
                break 'main;
            }
        }
    }

    for handle in active_tasks.drain(..) {
        handle.abort();
    }
    ratatui::restore();
    Ok(())
}

/// Route one input event through the components and into `update()`.
fn handle_event(app: &mut App, tui: &mut TuiState, event: &TuiEvent) -> Effect {
    match event {
        TuiEvent::Resize => return Effect::None,
        TuiEvent::ForceQuit => return update(app, Action::Quit),
        _ => {}
    }

    // The planner is modal while open.
    if app.is_planner_open {
        let planner_event =
            TripPlanner::new(&mut tui.trip_planner, app.is_planner_open).handle_event(event);
        return match planner_event {
            Some(TripPlannerEvent::Submit(request)) => update(app, Action::SubmitTrip(request)),
            Some(TripPlannerEvent::Dismiss) => update(app, Action::ClosePlanner),
            None => Effect::None,
        };
    }

    if app.is_course_open {
        let course_event =
            CourseView::new(&mut tui.course_view, &app.trip, app.is_course_open).handle_event(event);
        return match course_event {
            Some(CourseViewEvent::SendChat(message)) => update(app, Action::SendChat(message)),
            Some(CourseViewEvent::Dismiss) => update(app, Action::CloseCourse),
            None => Effect::None,
        };
    }

    if let Some(navbar_event) = tui.navbar.handle_event(event) {
        return match navbar_event {
            NavbarEvent::PlanTripRequested => update(app, Action::OpenPlanner),
            NavbarEvent::MenuToggled(_) => Effect::None,
        };
    }
    if let TuiEvent::MouseClick(x, y) = event
        && tui.navbar.covers(*x, *y)
    {
        return Effect::None;
    }

    if let Some(PageEvent::PlanTripRequested) = tui.page.handle_event(event) {
        return update(app, Action::OpenPlanner);
    }

    match event {
        TuiEvent::InputChar('c') => update(app, Action::OpenCourse),
        TuiEvent::InputChar('q') => update(app, Action::Quit),
        _ => Effect::None,
    }
}

/// Start whatever I/O an effect asks for. Returns `true` on quit.
fn run_effect(
    effect: Effect,
    app: &App,
    poll: PollSettings,
    tx: &mpsc::Sender<Action>,
    active_tasks: &mut Vec<tokio::task::AbortHandle>,
) -> bool {
    match effect {
        Effect::None => {}
        Effect::Quit => return true,
        Effect::CreateTrip(request) => {
            // A new submission supersedes whatever was still running.
            for handle in active_tasks.drain(..) {
                handle.abort();
            }
            active_tasks.push(spawn_create_trip(app.backend.clone(), request, tx.clone()));
        }
        Effect::PollStatus(task_id) => {
            active_tasks.push(spawn_poll_status(app.backend.clone(), task_id, poll, tx.clone()));
        }
        Effect::FetchCourse(task_id) => {
            active_tasks.push(spawn_fetch_course(app.backend.clone(), task_id, tx.clone()));
        }
        Effect::Chat { task_id, message } => {
            active_tasks.push(spawn_chat(app.backend.clone(), task_id, message, tx.clone()));
        }
    }
    active_tasks.retain(|handle| !handle.is_finished());
    false
}

fn send(tx: &mpsc::Sender<Action>, action: Action) {
    if tx.send(action).is_err() {
        warn!("Failed to send action: receiver dropped");
    }
}

fn spawn_create_trip(
    backend: Arc<dyn PlannerBackend>,
    request: crate::core::trip::TripRequest,
    tx: mpsc::Sender<Action>,
) -> tokio::task::AbortHandle {
    info!("Spawning create-trip request via {}", backend.name());
    tokio::spawn(async move {
        match backend.create_trip(&request).await {
            Ok(task_id) => {
                info!("Trip accepted as task {}", task_id);
                send(&tx, Action::TripAccepted(task_id));
            }
            Err(e) => send(
                &tx,
                Action::TripFailed {
                    task_id: None,
                    message: e.to_string(),
                },
            ),
        }
    })
    .abort_handle()
}

fn spawn_poll_status(
    backend: Arc<dyn PlannerBackend>,
    task_id: TaskId,
    poll: PollSettings,
    tx: mpsc::Sender<Action>,
) -> tokio::task::AbortHandle {
    tokio::spawn(async move {
        let started = Instant::now();
        loop {
            tokio::time::sleep(poll.interval).await;
            match backend.task_status(&task_id).await {
                Ok(status) if status.done => {
                    info!("Task {} done (success: {})", task_id, status.success);
                    send(&tx, Action::TripFinished { task_id, status });
                    return;
                }
                Ok(_) => debug!("Task {} still running", task_id),
                Err(e) if e.is_retryable() => warn!("Status poll for {} failed, retrying: {}", task_id, e),
                Err(e) => {
                    send(
                        &tx,
                        Action::TripFailed {
                            task_id: Some(task_id),
                            message: e.to_string(),
                        },
                    );
                    return;
                }
            }
            if started.elapsed() >= poll.max_wait {
                send(
                    &tx,
                    Action::TripFailed {
                        task_id: Some(task_id),
                        message: format!(
                            "gave up after {}s waiting for the planner",
                            poll.max_wait.as_secs()
                        ),
                    },
                );
                return;
            }
        }
    })
    .abort_handle()
}

fn spawn_fetch_course(
    backend: Arc<dyn PlannerBackend>,
    task_id: TaskId,
    tx: mpsc::Sender<Action>,
) -> tokio::task::AbortHandle {
    tokio::spawn(async move {
        match backend.course(&task_id).await {
            Ok(course) => send(&tx, Action::CourseReceived { task_id, course }),
            // The course page link is already in the status bar.
            Err(e) => warn!("Could not fetch course for {}: {}", task_id, e),
        }
    })
    .abort_handle()
}

fn spawn_chat(
    backend: Arc<dyn PlannerBackend>,
    task_id: TaskId,
    message: String,
    tx: mpsc::Sender<Action>,
) -> tokio::task::AbortHandle {
    tokio::spawn(async move {
        let action = match backend.chat(&task_id, &message).await {
            Ok(reply) => Action::ChatReplied { task_id, reply },
            Err(e) => Action::ChatFailed {
                task_id,
                message: e.to_string(),
            },
        };
        send(&tx, action);
    })
    .abort_handle()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::trip::{Transport, TripDraft};
    use crate::planner::TaskStatus;
    use crate::test_support::{NoopBackend, ScriptedBackend, test_app};
    use uuid::Uuid;

    fn key(c: char) -> TuiEvent {
        TuiEvent::InputChar(c)
    }

    #[test]
    fn test_fresh_state_is_default() {
        let app = test_app();
        let tui = TuiState::new(80);
        assert!(!app.is_planner_open);
        assert!(!tui.navbar.is_mobile_menu_open);
        assert!(tui.trip_planner.theme.value.is_empty());
    }

    #[test]
    fn test_plan_key_opens_planner() {
        let mut app = test_app();
        let mut tui = TuiState::new(80);
        assert_eq!(handle_event(&mut app, &mut tui, &key('p')), Effect::None);
        assert!(app.is_planner_open);
    }

    #[test]
    fn test_open_planner_captures_keys() {
        let mut app = test_app();
        let mut tui = TuiState::new(80);
        handle_event(&mut app, &mut tui, &key('p'));

        // 'q' and 'm' are text while the form is up.
        assert_eq!(handle_event(&mut app, &mut tui, &key('q')), Effect::None);
        handle_event(&mut app, &mut tui, &key('m'));
        assert_eq!(tui.trip_planner.theme.value, "qm");
        assert!(!tui.navbar.is_mobile_menu_open);

        handle_event(&mut app, &mut tui, &TuiEvent::Escape);
        assert!(!app.is_planner_open);
        // Reopening keeps the draft.
        handle_event(&mut app, &mut tui, &key('p'));
        assert_eq!(tui.trip_planner.theme.value, "qm");
    }

    #[test]
    fn test_closed_planner_lets_q_quit() {
        let mut app = test_app();
        let mut tui = TuiState::new(80);
        assert_eq!(handle_event(&mut app, &mut tui, &key('q')), Effect::Quit);
        assert_eq!(
            handle_event(&mut app, &mut tui, &TuiEvent::ForceQuit),
            Effect::Quit
        );
    }

    #[test]
    fn test_menu_and_planner_flags_are_independent() {
        for menu_open in [false, true] {
            for planner_open in [false, true] {
                let mut app = test_app();
                let mut tui = TuiState::new(80);
                if menu_open {
                    handle_event(&mut app, &mut tui, &key('m'));
                }
                if planner_open {
                    app.open_planner();
                }
                // Redundant input that shouldn't disturb either flag.
                handle_event(&mut app, &mut tui, &TuiEvent::Resize);
                handle_event(&mut app, &mut tui, &TuiEvent::ScrollDown);

                assert_eq!(tui.navbar.is_mobile_menu_open, menu_open);
                assert_eq!(app.is_planner_open, planner_open);
            }
        }
    }

    #[test]
    fn test_submit_closes_planner_once_and_requests_trip() {
        let mut app = test_app();
        let mut tui = TuiState::new(80);
        handle_event(&mut app, &mut tui, &key('p'));

        for c in "Cafe hopping".chars() {
            handle_event(&mut app, &mut tui, &key(c));
        }
        handle_event(&mut app, &mut tui, &TuiEvent::NextField);
        for c in "Seoul".chars() {
            handle_event(&mut app, &mut tui, &key(c));
        }
        tui.trip_planner.focus = crate::tui::components::trip_planner::Focus::StartDate;
        for c in "2025-09-16".chars() {
            handle_event(&mut app, &mut tui, &key(c));
        }
        tui.trip_planner.focus =
            crate::tui::components::trip_planner::Focus::Transport(Transport::Transit);
        handle_event(&mut app, &mut tui, &key(' '));
        tui.trip_planner.focus = crate::tui::components::trip_planner::Focus::Submit;

        let effect = handle_event(&mut app, &mut tui, &TuiEvent::Submit);
        let Effect::CreateTrip(request) = effect else {
            panic!("expected a create-trip effect");
        };
        assert_eq!(request.theme, "Cafe hopping");
        assert_eq!(request.transportation, vec![Transport::Transit]);
        assert!(!app.is_planner_open);
        assert!(app.trip.is_pending());

        // The next keystroke goes to the page again, not the planner.
        handle_event(&mut app, &mut tui, &key('x'));
        assert!(tui.trip_planner.theme.value.is_empty());
    }

    #[test]
    fn test_compact_threshold() {
        let tui = TuiState::new(80);
        assert!(tui.is_compact(79));
        assert!(!tui.is_compact(80));
    }

    fn settings(interval_ms: u64, max_wait_ms: u64) -> PollSettings {
        PollSettings {
            interval: Duration::from_millis(interval_ms),
            max_wait: Duration::from_millis(max_wait_ms),
        }
    }

    fn done() -> Result<TaskStatus, BackendError> {
        Ok(TaskStatus {
            done: true,
            success: true,
            error: None,
        })
    }

    /// Waits up to a second for the next action from a background task.
    async fn next_action(rx: &mpsc::Receiver<Action>) -> Option<Action> {
        for _ in 0..200 {
            if let Ok(action) = rx.try_recv() {
                return Some(action);
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        None
    }

    #[tokio::test]
    async fn test_poll_retries_server_errors_until_done() {
        let backend = Arc::new(ScriptedBackend::new(vec![
            Err(BackendError::Api {
                status: 503,
                message: "busy".into(),
            }),
            Ok(TaskStatus::default()),
            done(),
        ]));
        let (tx, rx) = mpsc::channel();
        let id = Uuid::new_v4();
        spawn_poll_status(backend.clone(), id, settings(1, 5_000), tx);

        let Some(Action::TripFinished { task_id, status }) = next_action(&rx).await else {
            panic!("expected the finished job to be reported");
        };
        assert_eq!(task_id, id);
        assert!(status.success);
        assert_eq!(backend.status_calls(), 3);
    }

    #[tokio::test]
    async fn test_poll_reports_client_error_once() {
        let backend = Arc::new(ScriptedBackend::new(vec![Err(BackendError::Api {
            status: 404,
            message: "unknown task".into(),
        })]));
        let (tx, rx) = mpsc::channel();
        let id = Uuid::new_v4();
        spawn_poll_status(backend.clone(), id, settings(1, 5_000), tx);

        let Some(Action::TripFailed { task_id, message }) = next_action(&rx).await else {
            panic!("expected a failure");
        };
        assert_eq!(task_id, Some(id));
        assert!(message.contains("404"));

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(backend.status_calls(), 1);
    }

    #[tokio::test]
    async fn test_poll_gives_up_after_max_wait() {
        // Never finishes.
        let backend = Arc::new(ScriptedBackend::new(Vec::new()));
        let (tx, rx) = mpsc::channel();
        let id = Uuid::new_v4();
        spawn_poll_status(backend.clone(), id, settings(2, 20), tx);

        let Some(Action::TripFailed { task_id, message }) = next_action(&rx).await else {
            panic!("expected the poll loop to give up");
        };
        assert_eq!(task_id, Some(id));
        assert!(message.contains("gave up"));
        assert!(backend.status_calls() >= 1);
    }

    #[tokio::test]
    async fn test_aborted_poll_sends_nothing() {
        let backend = Arc::new(ScriptedBackend::new(vec![done()]));
        let (tx, rx) = mpsc::channel();
        let handle = spawn_poll_status(backend.clone(), Uuid::new_v4(), settings(20, 5_000), tx);
        handle.abort();

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(backend.status_calls(), 0);
    }

    #[tokio::test]
    async fn test_chat_task_reports_reply_and_failure() {
        let id = Uuid::new_v4();

        let (tx, rx) = mpsc::channel();
        spawn_chat(Arc::new(NoopBackend), id, "Rain plan?".into(), tx);
        assert_eq!(
            next_action(&rx).await,
            Some(Action::ChatReplied {
                task_id: id,
                reply: "You asked: Rain plan?".into(),
            })
        );

        let (tx, rx) = mpsc::channel();
        spawn_chat(Arc::new(ScriptedBackend::new(Vec::new())), id, "Rain plan?".into(), tx);
        let Some(Action::ChatFailed { task_id, message }) = next_action(&rx).await else {
            panic!("expected a chat failure");
        };
        assert_eq!(task_id, id);
        assert!(message.contains("offline"));
    }

    #[test]
    fn test_course_key_opens_view_and_captures_typing() {
        let mut app = test_app();
        let mut tui = TuiState::new(80);
        update(
            &mut app,
            Action::SubmitTrip(
                TripDraft {
                    theme: "Museums".to_string(),
                    location: "Daegu".to_string(),
                    start_date: "2025-05-05".to_string(),
                    ..Default::default()
                }
                .validate()
                .unwrap(),
            ),
        );
        let id = Uuid::new_v4();
        update(&mut app, Action::TripAccepted(id));
        update(
            &mut app,
            Action::TripFinished {
                task_id: id,
                status: TaskStatus {
                    done: true,
                    success: true,
                    error: None,
                },
            },
        );

        handle_event(&mut app, &mut tui, &key('c'));
        assert!(app.is_course_open);

        // 'q' is text now, and Enter asks it.
        assert_eq!(handle_event(&mut app, &mut tui, &key('q')), Effect::None);
        assert_eq!(
            handle_event(&mut app, &mut tui, &TuiEvent::Submit),
            Effect::Chat {
                task_id: id,
                message: "q".into(),
            }
        );

        handle_event(&mut app, &mut tui, &TuiEvent::Escape);
        assert!(!app.is_course_open);
        assert_eq!(handle_event(&mut app, &mut tui, &key('q')), Effect::Quit);
    }
}

//! # Actions
//!
//! Everything that can happen to the root container becomes an `Action`.
//! Navbar asks for the planner? That's `Action::OpenPlanner`.
//! The backend finishes a course? That's `Action::CourseReceived { .. }`.
//!
//! `update()` applies an action to the state and returns an `Effect`
//! describing any I/O the caller should start. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::core::state::{App, ChatMessage, ChatRole, TripStatus};
use crate::core::trip::TripRequest;
use crate::planner::{Course, TaskId, TaskStatus};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Navbar or Hero asked for the trip planner.
    OpenPlanner,
    /// The planner overlay was dismissed.
    ClosePlanner,
    /// The planner form completed. Closes the overlay and starts the request.
    SubmitTrip(TripRequest),
    /// Backend accepted the request.
    TripAccepted(TaskId),
    /// Backend reports the job as done.
    TripFinished { task_id: TaskId, status: TaskStatus },
    CourseReceived { task_id: TaskId, course: Course },
    /// Any step of the backend exchange failed. `task_id` is `None` when
    /// the failure happened before the backend assigned one.
    TripFailed { task_id: Option<TaskId>, message: String },
    /// Show the finished course. Refused until a course is ready.
    OpenCourse,
    CloseCourse,
    /// A question typed into the course view.
    SendChat(String),
    ChatReplied { task_id: TaskId, reply: String },
    ChatFailed { task_id: TaskId, message: String },
    Quit,
}

/// Side effects requested by `update()`, executed by the TUI event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    CreateTrip(TripRequest),
    PollStatus(TaskId),
    FetchCourse(TaskId),
    Chat { task_id: TaskId, message: String },
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::OpenPlanner => {
            app.open_planner();
            Effect::None
        }
        Action::ClosePlanner => {
            app.close_planner();
            Effect::None
        }
        Action::SubmitTrip(request) => {
            app.close_planner();
            app.is_course_open = false;
            let summary = request.summary();
            info!("Trip submitted: {}", summary);
            app.status_message = format!("Planning {}...", summary);
            app.trip = TripStatus::Submitting {
                request: request.clone(),
            };
            Effect::CreateTrip(request)
        }
        Action::TripAccepted(task_id) => {
            let TripStatus::Submitting { request } = &app.trip else {
                warn!("Ignoring task {} accepted with no submission outstanding", task_id);
                return Effect::None;
            };
            let request = request.clone();
            app.trip = TripStatus::Planning { task_id, request };
            Effect::PollStatus(task_id)
        }
        Action::TripFinished { task_id, status } => {
            if !is_current(app, task_id) {
                return Effect::None;
            }
            if status.success {
                // A repeated success report leaves an already ready course alone.
                let TripStatus::Planning { request, .. } = &app.trip else {
                    return Effect::None;
                };
                let request = request.clone();
                let course_url = app.backend.course_url(&task_id);
                app.status_message = format!("Course ready, press c to view: {}", course_url);
                app.trip = TripStatus::Ready {
                    task_id,
                    request,
                    course_url,
                    course: None,
                    chat: Vec::new(),
                    awaiting_reply: false,
                };
                Effect::FetchCourse(task_id)
            } else {
                let message = status
                    .error
                    .unwrap_or_else(|| "unknown error".to_string());
                fail(app, message);
                Effect::None
            }
        }
        Action::CourseReceived { task_id, course } => {
            if let TripStatus::Ready {
                task_id: current,
                course_url,
                course: slot,
                ..
            } = &mut app.trip
                && *current == task_id
            {
                app.status_message = format!(
                    "Course ready ({} stops), press c to view: {}",
                    course.ordered_stops().len(),
                    course_url
                );
                *slot = Some(course);
            }
            Effect::None
        }
        Action::TripFailed { task_id, message } => {
            // Failures from a superseded job are stale; pre-id failures always count.
            let relevant = match task_id {
                Some(id) => is_current(app, id),
                None => matches!(app.trip, TripStatus::Submitting { .. }),
            };
            if relevant {
                fail(app, message);
            }
            Effect::None
        }
        Action::OpenCourse => {
            match &app.trip {
                TripStatus::Ready { .. } => app.is_course_open = true,
                TripStatus::Submitting { .. } | TripStatus::Planning { .. } => {
                    app.status_message = "Your course is still being planned...".to_string();
                }
                TripStatus::Idle | TripStatus::Failed(_) => {
                    app.status_message = "No course yet. Press p to plan a trip.".to_string();
                }
            }
            Effect::None
        }
        Action::CloseCourse => {
            app.is_course_open = false;
            Effect::None
        }
        Action::SendChat(message) => {
            let message = message.trim();
            let TripStatus::Ready {
                task_id,
                chat,
                awaiting_reply,
                ..
            } = &mut app.trip
            else {
                return Effect::None;
            };
            if message.is_empty() || *awaiting_reply {
                return Effect::None;
            }
            chat.push(ChatMessage::new(ChatRole::Visitor, message));
            *awaiting_reply = true;
            Effect::Chat {
                task_id: *task_id,
                message: message.to_string(),
            }
        }
        Action::ChatReplied { task_id, reply } => {
            record_chat(app, task_id, ChatMessage::new(ChatRole::Planner, reply));
            Effect::None
        }
        Action::ChatFailed { task_id, message } => {
            warn!("Chat about task {} failed: {}", task_id, message);
            record_chat(app, task_id, ChatMessage::new(ChatRole::Error, message));
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// Append an answer to the current course's conversation; answers about a
/// superseded course are dropped.
fn record_chat(app: &mut App, task_id: TaskId, message: ChatMessage) {
    if let TripStatus::Ready {
        task_id: current,
        chat,
        awaiting_reply,
        ..
    } = &mut app.trip
        && *current == task_id
    {
        chat.push(message);
        *awaiting_reply = false;
    } else {
        debug!("Dropping chat answer for stale task {}", task_id);
    }
}

fn is_current(app: &App, task_id: TaskId) -> bool {
    let current = app.trip.task_id() == Some(task_id);
    if !current {
        debug!("Dropping result for stale task {}", task_id);
    }
    current
}

fn fail(app: &mut App, message: String) {
    warn!("Trip planning failed: {}", message);
    app.status_message = format!("Trip planning failed: {}", message);
    app.trip = TripStatus::Failed(message);
    app.is_course_open = false;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::trip::TripDraft;
    use crate::planner::CoursePlace;
    use crate::test_support::test_app;
    use uuid::Uuid;

    fn request() -> TripRequest {
        TripDraft {
            theme: "Hidden gems".to_string(),
            location: "Lisbon".to_string(),
            start_date: "2025-06-13".to_string(),
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    fn planning(app: &mut App) -> TaskId {
        let id = Uuid::new_v4();
        update(app, Action::SubmitTrip(request()));
        update(app, Action::TripAccepted(id));
        id
    }

    #[test]
    fn test_open_and_close_planner() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::OpenPlanner), Effect::None);
        assert!(app.is_planner_open);
        assert_eq!(update(&mut app, Action::OpenPlanner), Effect::None);
        assert!(app.is_planner_open);
        assert_eq!(update(&mut app, Action::ClosePlanner), Effect::None);
        assert!(!app.is_planner_open);
    }

    #[test]
    fn test_submit_closes_planner_and_requests_trip() {
        let mut app = test_app();
        update(&mut app, Action::OpenPlanner);
        let effect = update(&mut app, Action::SubmitTrip(request()));
        assert!(!app.is_planner_open);
        assert_eq!(effect, Effect::CreateTrip(request()));
        assert!(app.trip.is_pending());
        assert!(app.status_message.contains("Hidden gems in Lisbon"));
    }

    #[test]
    fn test_accept_starts_polling() {
        let mut app = test_app();
        update(&mut app, Action::SubmitTrip(request()));
        let id = Uuid::new_v4();
        assert_eq!(update(&mut app, Action::TripAccepted(id)), Effect::PollStatus(id));
        assert_eq!(app.trip.task_id(), Some(id));
    }

    #[test]
    fn test_accept_without_submission_ignored() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::TripAccepted(Uuid::new_v4())), Effect::None);
        assert_eq!(app.trip, TripStatus::Idle);
    }

    #[test]
    fn test_success_fetches_course() {
        let mut app = test_app();
        let id = planning(&mut app);
        let status = TaskStatus { done: true, success: true, error: None };
        let effect = update(&mut app, Action::TripFinished { task_id: id, status });
        assert_eq!(effect, Effect::FetchCourse(id));
        assert!(matches!(app.trip, TripStatus::Ready { course: None, .. }));
        assert!(app.status_message.contains(&id.to_string()));

        let course = Course {
            sequence: vec![0],
            places: vec![CoursePlace { name: "Alfama".into(), category: None }],
            ..Default::default()
        };
        update(&mut app, Action::CourseReceived { task_id: id, course });
        assert!(matches!(app.trip, TripStatus::Ready { course: Some(_), .. }));
        assert!(app.status_message.contains("1 stops"));
    }

    #[test]
    fn test_backend_failure_reported() {
        let mut app = test_app();
        let id = planning(&mut app);
        let status = TaskStatus {
            done: true,
            success: false,
            error: Some("no places found".into()),
        };
        update(&mut app, Action::TripFinished { task_id: id, status });
        assert_eq!(app.trip, TripStatus::Failed("no places found".into()));
        assert!(app.status_message.contains("no places found"));
    }

    #[test]
    fn test_stale_results_ignored() {
        let mut app = test_app();
        let old = planning(&mut app);
        let current = planning(&mut app);
        assert_ne!(old, current);

        let status = TaskStatus { done: true, success: true, error: None };
        assert_eq!(update(&mut app, Action::TripFinished { task_id: old, status }), Effect::None);
        update(
            &mut app,
            Action::TripFailed { task_id: Some(old), message: "late".into() },
        );
        assert_eq!(app.trip.task_id(), Some(current));
    }

    #[test]
    fn test_failure_before_task_id() {
        let mut app = test_app();
        update(&mut app, Action::SubmitTrip(request()));
        update(
            &mut app,
            Action::TripFailed { task_id: None, message: "connection refused".into() },
        );
        assert_eq!(app.trip, TripStatus::Failed("connection refused".into()));
    }

    #[test]
    fn test_trip_progress_never_touches_planner_flag() {
        let mut app = test_app();
        let id = planning(&mut app);
        update(&mut app, Action::OpenPlanner);
        let status = TaskStatus { done: true, success: true, error: None };
        update(&mut app, Action::TripFinished { task_id: id, status });
        assert!(app.is_planner_open);
    }

    fn ready(app: &mut App) -> TaskId {
        let id = planning(app);
        let status = TaskStatus { done: true, success: true, error: None };
        update(app, Action::TripFinished { task_id: id, status });
        id
    }

    fn chat_of(app: &App) -> Vec<ChatMessage> {
        match &app.trip {
            TripStatus::Ready { chat, .. } => chat.clone(),
            other => panic!("expected a ready trip, got {other:?}"),
        }
    }

    #[test]
    fn test_ready_keeps_the_request() {
        let mut app = test_app();
        ready(&mut app);
        let TripStatus::Ready { request: kept, .. } = &app.trip else {
            panic!("expected a ready trip");
        };
        assert_eq!(*kept, request());
    }

    #[test]
    fn test_course_view_only_opens_when_ready() {
        let mut app = test_app();
        update(&mut app, Action::OpenCourse);
        assert!(!app.is_course_open);
        assert!(app.status_message.contains("No course yet"));

        planning(&mut app);
        update(&mut app, Action::OpenCourse);
        assert!(!app.is_course_open);
        assert!(app.status_message.contains("still being planned"));
    }

    #[test]
    fn test_course_view_opens_and_closes() {
        let mut app = test_app();
        ready(&mut app);
        update(&mut app, Action::OpenCourse);
        assert!(app.is_course_open);
        update(&mut app, Action::CloseCourse);
        assert!(!app.is_course_open);
    }

    #[test]
    fn test_resubmitting_closes_course_view() {
        let mut app = test_app();
        ready(&mut app);
        update(&mut app, Action::OpenCourse);
        update(&mut app, Action::SubmitTrip(request()));
        assert!(!app.is_course_open);
    }

    #[test]
    fn test_chat_round_trip() {
        let mut app = test_app();
        let id = ready(&mut app);

        let effect = update(&mut app, Action::SendChat("  Any vegan food?  ".into()));
        assert_eq!(
            effect,
            Effect::Chat { task_id: id, message: "Any vegan food?".into() }
        );
        // One question at a time.
        assert_eq!(update(&mut app, Action::SendChat("Hello?".into())), Effect::None);

        update(
            &mut app,
            Action::ChatReplied { task_id: id, reply: "Try the temple food stall.".into() },
        );
        assert_eq!(
            chat_of(&app),
            vec![
                ChatMessage::new(ChatRole::Visitor, "Any vegan food?"),
                ChatMessage::new(ChatRole::Planner, "Try the temple food stall."),
            ]
        );
    }

    #[test]
    fn test_chat_failure_recorded_and_unblocks() {
        let mut app = test_app();
        let id = ready(&mut app);
        update(&mut app, Action::SendChat("Parking?".into()));
        update(
            &mut app,
            Action::ChatFailed { task_id: id, message: "network error".into() },
        );
        assert_eq!(chat_of(&app)[1], ChatMessage::new(ChatRole::Error, "network error"));
        assert!(matches!(
            update(&mut app, Action::SendChat("Parking?".into())),
            Effect::Chat { .. }
        ));
    }

    #[test]
    fn test_chat_ignored_without_course_or_text() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::SendChat("hi".into())), Effect::None);
        ready(&mut app);
        assert_eq!(update(&mut app, Action::SendChat("   ".into())), Effect::None);
        assert!(chat_of(&app).is_empty());
    }

    #[test]
    fn test_stale_chat_reply_dropped() {
        let mut app = test_app();
        ready(&mut app);
        let current = ready(&mut app);
        update(
            &mut app,
            Action::ChatReplied { task_id: Uuid::new_v4(), reply: "late".into() },
        );
        assert!(chat_of(&app).is_empty());
        assert_eq!(app.trip.task_id(), Some(current));
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}

//! # Application State
//!
//! Root-container state for RoutePick. Domain logic only, no TUI types.
//! Presentation state (the navbar's mobile menu, scroll offsets, the
//! planner form) lives in the `tui` module with the component that owns it.
//!
//! ```text
//! App
//! ├── backend: Arc<dyn PlannerBackend>  // planning server client
//! ├── is_planner_open: bool             // trip planner overlay visibility
//! ├── is_course_open: bool              // course view overlay visibility
//! ├── status_message: String            // status bar text
//! └── trip: TripStatus                  // progress of the last submitted trip
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::core::trip::TripRequest;
use crate::planner::{Course, PlannerBackend, TaskId};

pub const WELCOME_STATUS: &str = "Welcome to RoutePick! Press p to plan a trip.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    Visitor,
    Planner,
    /// A question that never got an answer.
    Error,
}

/// One line of the conversation about a finished course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

/// Progress of the most recently submitted trip.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TripStatus {
    #[default]
    Idle,
    /// Request sent, waiting for a task id.
    Submitting { request: TripRequest },
    /// Backend accepted the job and is building the course.
    Planning { task_id: TaskId, request: TripRequest },
    /// Job finished. `course` is `None` until the course body arrives.
    Ready {
        task_id: TaskId,
        request: TripRequest,
        course_url: String,
        course: Option<Course>,
        chat: Vec<ChatMessage>,
        /// A chat question is waiting for its answer.
        awaiting_reply: bool,
    },
    Failed(String),
}

impl TripStatus {
    pub fn task_id(&self) -> Option<TaskId> {
        match self {
            TripStatus::Planning { task_id, .. } | TripStatus::Ready { task_id, .. } => {
                Some(*task_id)
            }
            _ => None,
        }
    }

    /// True while a request or job is outstanding.
    pub fn is_pending(&self) -> bool {
        matches!(self, TripStatus::Submitting { .. } | TripStatus::Planning { .. })
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, TripStatus::Ready { .. })
    }
}

pub struct App {
    pub backend: Arc<dyn PlannerBackend>,
    pub is_planner_open: bool,
    /// Only ever true while `trip` is `Ready`.
    pub is_course_open: bool,
    pub status_message: String,
    pub trip: TripStatus,
}

impl App {
    pub fn new(backend: Arc<dyn PlannerBackend>) -> Self {
        Self {
            backend,
            is_planner_open: false,
            is_course_open: false,
            status_message: String::from(WELCOME_STATUS),
            trip: TripStatus::Idle,
        }
    }

    /// `plannerClosed → plannerOpen`. No-op when already open.
    pub fn open_planner(&mut self) {
        self.is_planner_open = true;
    }

    /// `plannerOpen → plannerClosed`. No-op when already closed.
    pub fn close_planner(&mut self) {
        self.is_planner_open = false;
    }
}

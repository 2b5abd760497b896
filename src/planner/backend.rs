use std::fmt;

use async_trait::async_trait;

use super::types::{Course, TaskId, TaskStatus};
use crate::core::trip::TripRequest;

/// Errors that can occur while talking to the planner backend.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendError {
    /// Backend misconfigured (bad base URL). Not retryable.
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused). Retryable.
    Network(String),
    /// Backend returned an error response.
    Api { status: u16, message: String },
    /// Failed to parse the backend's response.
    Parse(String),
}

impl BackendError {
    /// Transient failures worth another status poll.
    pub fn is_retryable(&self) -> bool {
        match self {
            BackendError::Network(_) => true,
            BackendError::Api { status, .. } => *status >= 500 || *status == 429,
            BackendError::Config(_) | BackendError::Parse(_) => false,
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Config(msg) => write!(f, "config error: {msg}"),
            BackendError::Network(msg) => write!(f, "network error: {msg}"),
            BackendError::Api { status, message } => {
                write!(f, "backend error (HTTP {status}): {message}")
            }
            BackendError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

/// The service that turns a trip request into a course.
#[async_trait]
pub trait PlannerBackend: Send + Sync {
    /// Returns the name of the backend (for logs).
    fn name(&self) -> &str;

    /// Starts a planning job and returns its id.
    async fn create_trip(&self, request: &TripRequest) -> Result<TaskId, BackendError>;

    /// Reports whether the job has finished.
    async fn task_status(&self, task_id: &TaskId) -> Result<TaskStatus, BackendError>;

    /// Fetches the finished course.
    async fn course(&self, task_id: &TaskId) -> Result<Course, BackendError>;

    /// Asks the planner a question about a finished course.
    async fn chat(&self, task_id: &TaskId, message: &str) -> Result<String, BackendError>;

    /// Where a browser can open the interactive course map.
    fn course_url(&self, task_id: &TaskId) -> String;
}

//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::core::trip::TripRequest;
use crate::planner::{BackendError, Course, PlannerBackend, TaskId, TaskStatus};

/// A backend for tests that never leave the process.
pub struct NoopBackend;

#[async_trait]
impl PlannerBackend for NoopBackend {
    fn name(&self) -> &str {
        "noop"
    }

    async fn create_trip(&self, _request: &TripRequest) -> Result<TaskId, BackendError> {
        Ok(uuid::Uuid::nil())
    }

    async fn task_status(&self, _task_id: &TaskId) -> Result<TaskStatus, BackendError> {
        Ok(TaskStatus {
            done: true,
            success: true,
            error: None,
        })
    }

    async fn course(&self, _task_id: &TaskId) -> Result<Course, BackendError> {
        Ok(Course::default())
    }

    async fn chat(&self, _task_id: &TaskId, message: &str) -> Result<String, BackendError> {
        Ok(format!("You asked: {message}"))
    }

    fn course_url(&self, task_id: &TaskId) -> String {
        format!("http://noop/chat-map/{}", task_id)
    }
}

/// A backend that answers status polls from a script, then reports "still
/// running" forever.
pub struct ScriptedBackend {
    statuses: Mutex<VecDeque<Result<TaskStatus, BackendError>>>,
    status_calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new(statuses: Vec<Result<TaskStatus, BackendError>>) -> Self {
        Self {
            statuses: Mutex::new(statuses.into()),
            status_calls: AtomicUsize::new(0),
        }
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlannerBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn create_trip(&self, _request: &TripRequest) -> Result<TaskId, BackendError> {
        Ok(uuid::Uuid::nil())
    }

    async fn task_status(&self, _task_id: &TaskId) -> Result<TaskStatus, BackendError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(TaskStatus::default()))
    }

    async fn course(&self, _task_id: &TaskId) -> Result<Course, BackendError> {
        Ok(Course::default())
    }

    async fn chat(&self, _task_id: &TaskId, _message: &str) -> Result<String, BackendError> {
        Err(BackendError::Network("offline".to_string()))
    }

    fn course_url(&self, task_id: &TaskId) -> String {
        format!("http://scripted/chat-map/{}", task_id)
    }
}

/// Creates a test App with a NoopBackend.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(NoopBackend))
}

/// Flattens a test terminal buffer into text, one line per row.
pub fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    let width = buffer.area.width.max(1) as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

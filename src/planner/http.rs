//! HTTP client for the RoutePick planning server.
//!
//! Endpoints:
//! - `POST /api/create-trip` starts a job and returns `{taskId, status}`
//! - `GET /status/{taskId}` reports `{done, success, error}`
//! - `GET /api/locations/{taskId}` returns the finished course
//! - `POST /api/chat` answers `{message, taskId}` with `{response}`
//! - `/chat-map/{taskId}` is the browser page for the course map

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use super::backend::{BackendError, PlannerBackend};
use super::types::{
    ChatBody, ChatResponse, Course, CreateTripBody, CreateTripResponse, TaskId, TaskStatus,
};
use crate::core::trip::TripRequest;

pub struct HttpPlannerBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpPlannerBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(BackendError::Config(format!(
                "backend URL must start with http:// or https:// (got '{base_url}')"
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Config(e.to_string()))?;

        info!("Planner backend at {}", base_url);
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Turns a response into `T`, mapping non-2xx statuses to `BackendError::Api`.
    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
        let status = response.status();
        debug!("Planner backend response status: {}", status);

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Planner backend error: {} - {}", status.as_u16(), message);
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| BackendError::Parse(e.to_string()))
    }
}

#[async_trait]
impl PlannerBackend for HttpPlannerBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn create_trip(&self, request: &TripRequest) -> Result<TaskId, BackendError> {
        let body = CreateTripBody::from(request);
        info!(
            "Creating trip: theme={:?}, location={:?}, dates={}",
            body.theme,
            body.location,
            request.visit_date()
        );

        let response = self
            .client
            .post(format!("{}/api/create-trip", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let created: CreateTripResponse = Self::read_json(response).await?;
        info!("Trip task {} accepted ({})", created.task_id, created.status);
        Ok(created.task_id)
    }

    async fn task_status(&self, task_id: &TaskId) -> Result<TaskStatus, BackendError> {
        let response = self
            .client
            .get(format!("{}/status/{}", self.base_url, task_id))
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status: TaskStatus = Self::read_json(response).await?;
        debug!("Task {} status: {:?}", task_id, status);
        Ok(status)
    }

    async fn course(&self, task_id: &TaskId) -> Result<Course, BackendError> {
        let response = self
            .client
            .get(format!("{}/api/locations/{}", self.base_url, task_id))
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let course: Course = Self::read_json(response).await?;
        info!("Task {} course has {} stops", task_id, course.sequence.len());
        Ok(course)
    }

    async fn chat(&self, task_id: &TaskId, message: &str) -> Result<String, BackendError> {
        debug!("Chat about task {}: {} chars", task_id, message.len());
        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&ChatBody {
                message,
                task_id: *task_id,
            })
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        match Self::read_json::<ChatResponse>(response).await {
            Ok(reply) => Ok(reply.response),
            // Rejections carry a readable reason in the same `{response}` shape.
            Err(BackendError::Api { status, message }) => {
                let message = serde_json::from_str::<ChatResponse>(&message)
                    .map(|r| r.response)
                    .unwrap_or(message);
                Err(BackendError::Api { status, message })
            }
            Err(e) => Err(e),
        }
    }

    fn course_url(&self, task_id: &TaskId) -> String {
        format!("{}/chat-map/{}", self.base_url, task_id)
    }
}

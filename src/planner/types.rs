use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::core::trip::{DATE_FORMAT, TripRequest};

/// Identifier the backend assigns to a planning job.
pub type TaskId = Uuid;

/// Body of `POST /api/create-trip`.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateTripBody {
    pub theme: String,
    pub location: String,
    pub group_size: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub visit_time: Option<String>,
    pub transportation: Vec<String>,
    pub custom_transport: Option<String>,
}

impl From<&TripRequest> for CreateTripBody {
    fn from(req: &TripRequest) -> Self {
        Self {
            theme: req.theme.clone(),
            location: req.location.clone(),
            group_size: req.group_size.clone(),
            start_date: req.start_date.format(DATE_FORMAT).to_string(),
            end_date: req.end_date.map(|d| d.format(DATE_FORMAT).to_string()),
            visit_time: req.visit_time.map(|t| t.wire_value().to_string()),
            transportation: req
                .transportation
                .iter()
                .map(|m| m.label().to_string())
                .collect(),
            custom_transport: req.custom_transport.clone(),
        }
    }
}

/// Response of `POST /api/create-trip`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateTripResponse {
    pub task_id: TaskId,
    pub status: String,
}

/// Body of `POST /api/chat`.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatBody<'a> {
    pub message: &'a str,
    pub task_id: TaskId,
}

/// Response of `POST /api/chat`. Error responses use the same shape.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ChatResponse {
    pub response: String,
}

/// Response of `GET /status/{task_id}`.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TaskStatus {
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// A place on a generated course.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CoursePlace {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// Response of `GET /api/locations/{task_id}`.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Course {
    #[serde(default)]
    pub course_description: Option<String>,
    /// Visit order as indices into `places`.
    #[serde(default)]
    pub sequence: Vec<usize>,
    #[serde(default)]
    pub places: Vec<CoursePlace>,
    /// Minutes per stop, keyed by the stringified place index. The backend
    /// emits both numbers and numeric strings here.
    #[serde(default)]
    pub estimated_duration: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub reasoning: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl Course {
    /// Places in visiting order, skipping indices that point nowhere.
    pub fn ordered_stops(&self) -> Vec<&CoursePlace> {
        self.sequence
            .iter()
            .filter_map(|&idx| self.places.get(idx))
            .collect()
    }

    pub fn duration_minutes(&self, place_index: usize) -> Option<u64> {
        match self.estimated_duration.get(&place_index.to_string())? {
            serde_json::Value::Number(n) => n.as_u64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Places in visiting order, each with the minutes planned there.
    pub fn itinerary(&self) -> Vec<(&CoursePlace, Option<u64>)> {
        self.sequence
            .iter()
            .filter_map(|&idx| Some((self.places.get(idx)?, self.duration_minutes(idx))))
            .collect()
    }

    /// `"Gyeongbokgung → Insadong → Cafe Onion"`.
    pub fn route_line(&self) -> String {
        self.ordered_stops()
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(" → ")
    }
}

pub mod backend;
pub mod http;
pub mod types;

pub use backend::{BackendError, PlannerBackend};
pub use http::HttpPlannerBackend;
pub use types::{ChatBody, ChatResponse, Course, CoursePlace, CreateTripBody, TaskId, TaskStatus};

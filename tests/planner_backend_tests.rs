use std::time::Duration;

use routepick::core::trip::{Transport, TripDraft, TripRequest, VisitTime};
use routepick::planner::{BackendError, HttpPlannerBackend, PlannerBackend};
use serde_json::json;
use uuid::Uuid;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

const TASK_ID: &str = "6f1c2a4e-93d1-4b0a-8c55-2f0e7d1a9b3c";

fn task_id() -> Uuid {
    Uuid::parse_str(TASK_ID).unwrap()
}

fn backend(server: &MockServer) -> HttpPlannerBackend {
    HttpPlannerBackend::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

fn seoul_request() -> TripRequest {
    let mut draft = TripDraft {
        theme: "Old palaces".to_string(),
        location: "Seoul".to_string(),
        group_size: "2 people".to_string(),
        start_date: "2025-10-29".to_string(),
        visit_time: Some(VisitTime::Morning),
        ..Default::default()
    };
    draft.toggle_transport(Transport::Walk);
    draft.toggle_transport(Transport::Transit);
    draft.validate().unwrap()
}

// ============================================================================
// create_trip
// ============================================================================

#[tokio::test]
async fn test_create_trip_posts_camel_case_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/create-trip"))
        .and(body_partial_json(json!({
            "theme": "Old palaces",
            "location": "Seoul",
            "groupSize": "2 people",
            "startDate": "2025-10-29",
            "visitTime": "오전",
            "transportation": ["Walking", "Public transit"],
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "taskId": TASK_ID,
                "status": "processing",
            })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let id = backend(&server).create_trip(&seoul_request()).await.unwrap();
    assert_eq!(id, task_id());
}

#[tokio::test]
async fn test_create_trip_sends_afternoon_as_server_keyword() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/create-trip"))
        .and(body_partial_json(json!({ "visitTime": "오후" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "taskId": TASK_ID,
            "status": "processing",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut request = seoul_request();
    request.visit_time = Some(VisitTime::Afternoon);
    // The client's own schedule agrees with what the server derives.
    assert_eq!(request.time_window().unwrap().start_time, "14:00");

    let id = backend(&server).create_trip(&request).await.unwrap();
    assert_eq!(id, task_id());
}

#[tokio::test]
async fn test_create_trip_server_error_is_retryable_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/create-trip"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let err = backend(&server)
        .create_trip(&seoul_request())
        .await
        .unwrap_err();
    match &err {
        BackendError::Api { status, message } => {
            assert_eq!(*status, 503);
            assert_eq!(message, "overloaded");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_create_trip_bad_request_is_not_retryable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/create-trip"))
        .respond_with(ResponseTemplate::new(400).set_body_string("missing theme"))
        .mount(&server)
        .await;

    let err = backend(&server)
        .create_trip(&seoul_request())
        .await
        .unwrap_err();
    assert!(matches!(err, BackendError::Api { status: 400, .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_create_trip_malformed_response_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/create-trip"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = backend(&server)
        .create_trip(&seoul_request())
        .await
        .unwrap_err();
    assert!(matches!(err, BackendError::Parse(_)));
}

#[tokio::test]
async fn test_create_trip_connection_refused_is_network_error() {
    // Nothing listens here once the server is dropped.
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };
    let backend = HttpPlannerBackend::new(&uri, Duration::from_secs(2)).unwrap();

    let err = backend.create_trip(&seoul_request()).await.unwrap_err();
    assert!(matches!(err, BackendError::Network(_)));
    assert!(err.is_retryable());
}

// ============================================================================
// task_status
// ============================================================================

#[tokio::test]
async fn test_task_status_in_progress_then_done() {
    let server = MockServer::start().await;
    let status_path = format!("/status/{TASK_ID}");

    Mock::given(method("GET"))
        .and(path(status_path.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "done": false })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(status_path.as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "done": true, "success": true })),
        )
        .mount(&server)
        .await;

    let backend = backend(&server);
    let first = backend.task_status(&task_id()).await.unwrap();
    assert!(!first.done);

    let second = backend.task_status(&task_id()).await.unwrap();
    assert!(second.done);
    assert!(second.success);
    assert_eq!(second.error, None);
}

#[tokio::test]
async fn test_task_status_reports_failure_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/status/{TASK_ID}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "done": true,
            "success": false,
            "error": "no places found",
        })))
        .mount(&server)
        .await;

    let status = backend(&server).task_status(&task_id()).await.unwrap();
    assert!(status.done);
    assert!(!status.success);
    assert_eq!(status.error.as_deref(), Some("no places found"));
}

// ============================================================================
// course / course_url
// ============================================================================

#[tokio::test]
async fn test_course_orders_stops_by_sequence() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/locations/{TASK_ID}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "course_description": "A morning among the palaces",
            "sequence": [2, 0, 1],
            "places": [
                { "name": "Gyeongbokgung", "category": "palace" },
                { "name": "Insadong" },
                { "name": "Cafe Onion", "category": "cafe" },
            ],
            "estimated_duration": { "0": 90, "1": "45", "2": 30 },
        })))
        .mount(&server)
        .await;

    let course = backend(&server).course(&task_id()).await.unwrap();
    assert_eq!(course.route_line(), "Cafe Onion → Gyeongbokgung → Insadong");
    assert_eq!(course.duration_minutes(0), Some(90));
    assert_eq!(course.duration_minutes(1), Some(45));
    assert_eq!(
        course.course_description.as_deref(),
        Some("A morning among the palaces")
    );
}

#[tokio::test]
async fn test_course_not_found_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/locations/{TASK_ID}").as_str()))
        .respond_with(ResponseTemplate::new(404).set_body_string("unknown task"))
        .mount(&server)
        .await;

    let err = backend(&server).course(&task_id()).await.unwrap_err();
    assert!(matches!(err, BackendError::Api { status: 404, .. }));
}

#[tokio::test]
async fn test_course_url_points_at_chat_map() {
    let server = MockServer::start().await;
    let backend = backend(&server);
    assert_eq!(
        backend.course_url(&task_id()),
        format!("{}/chat-map/{TASK_ID}", server.uri())
    );
}

// ============================================================================
// chat
// ============================================================================

#[tokio::test]
async fn test_chat_posts_message_and_task_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({
            "message": "Is Insadong open on Mondays?",
            "taskId": TASK_ID,
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "response": "Most shops are open daily." })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let reply = backend(&server)
        .chat(&task_id(), "Is Insadong open on Mondays?")
        .await
        .unwrap();
    assert_eq!(reply, "Most shops are open daily.");
}

#[tokio::test]
async fn test_chat_rejection_surfaces_server_reason() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "response": "invalid taskId" })),
        )
        .mount(&server)
        .await;

    let err = backend(&server).chat(&task_id(), "hello").await.unwrap_err();
    assert_eq!(
        err,
        BackendError::Api {
            status: 400,
            message: "invalid taskId".to_string(),
        }
    );
}

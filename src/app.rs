use axum::{routing::get, Json, Router};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use crate::{events, rsvps, tasks};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        message: "Event Planner API is running",
    })
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(events::router())
        .merge(rsvps::router())
        .merge(tasks::router())
        .route("/health", get(health))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!(
                        "http_request",
                        %method,
                        uri = %uri,
                        status = tracing::field::Empty
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        let latency_ms = latency.as_millis() as u64;
                        if status.is_server_error() {
                            tracing::error!(%status, latency_ms, "response");
                        } else {
                            tracing::info!(%status, latency_ms, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router, addr: &str) -> anyhow::Result<()> {
    let addr: std::net::SocketAddr = addr.parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    /// Sends one request through the router and decodes the JSON reply.
    pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}

#[cfg(test)]
mod app_tests {
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use serde_json::json;
    use tower::ServiceExt;

    use super::test_support::send;
    use super::build_app;
    use crate::state::AppState;

    // None of these requests get past validation, so the lazy pool never connects.

    #[tokio::test]
    async fn health_reports_healthy() {
        let app = build_app(AppState::fake());
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn create_event_with_past_date_is_rejected() {
        let app = build_app(AppState::fake());
        let (status, body) = send(
            &app,
            Method::POST,
            "/events",
            Some(json!({ "title": "Launch", "date": "2000-01-01T10:00:00Z" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Date must be in the future" }));
    }

    #[tokio::test]
    async fn create_event_requires_title_and_date() {
        let app = build_app(AppState::fake());

        let (status, body) = send(
            &app,
            Method::POST,
            "/events",
            Some(json!({ "date": "2099-01-01T10:00:00Z" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Title is required");

        let (status, body) =
            send(&app, Method::POST, "/events", Some(json!({ "title": "Launch" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Date is required");
    }

    #[tokio::test]
    async fn create_event_with_malformed_date_is_rejected() {
        let app = build_app(AppState::fake());
        let (status, body) = send(
            &app,
            Method::POST,
            "/events",
            Some(json!({ "title": "Launch", "date": "01/01/2099" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("Use ISO format"));
    }

    #[tokio::test]
    async fn missing_body_yields_json_error() {
        let app = build_app(AppState::fake());
        let (status, body) = send(&app, Method::POST, "/events", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No data provided");
    }

    #[tokio::test]
    async fn malformed_json_yields_json_error() {
        let app = build_app(AppState::fake());
        let request = Request::builder()
            .method(Method::POST)
            .uri("/events")
            .header("content-type", "application/json")
            .body(Body::from("{\"title\": "))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn non_uuid_ids_are_not_found() {
        let app = build_app(AppState::fake());
        for uri in ["/events/42", "/rsvps/abc", "/tasks/not-a-task", "/events/x/rsvps"] {
            let (status, body) = send(&app, Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert!(body["error"].is_string(), "{uri}");
        }
    }

    #[tokio::test]
    async fn patch_event_with_blank_title_is_rejected() {
        let app = build_app(AppState::fake());
        let uri = format!("/events/{}", uuid::Uuid::new_v4());
        let (status, body) = send(&app, Method::PATCH, &uri, Some(json!({ "title": "   " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Title cannot be empty");
    }

    #[tokio::test]
    async fn create_rsvp_validates_before_touching_storage() {
        let app = build_app(AppState::fake());
        let event_id = uuid::Uuid::new_v4();

        let (status, body) = send(
            &app,
            Method::POST,
            "/rsvps",
            Some(json!({
                "event_id": event_id,
                "guest_name": "Ada",
                "guest_email": "not-an-email",
                "rsvp_status": "Yes"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid email format");

        let (status, body) = send(
            &app,
            Method::POST,
            "/rsvps",
            Some(json!({
                "event_id": event_id,
                "guest_name": "Ada",
                "guest_email": "ada@example.com",
                "rsvp_status": "yes"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "RSVP status must be one of: Yes, No, Maybe");
    }

    #[tokio::test]
    async fn patch_rsvp_with_invalid_status_is_rejected() {
        let app = build_app(AppState::fake());
        let uri = format!("/rsvps/{}", uuid::Uuid::new_v4());
        let (status, _) = send(&app, Method::PATCH, &uri, Some(json!({ "rsvp_status": "Sure" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn task_due_date_outside_rfc3339_years_is_rejected() {
        let app = build_app(AppState::fake());
        let uri = format!("/events/{}/tasks", uuid::Uuid::new_v4());
        let (status, body) = send(
            &app,
            Method::POST,
            &uri,
            Some(json!({ "description": "x", "due_date": "-000001-01-01T00:00:00Z" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid date format"));
    }

    #[tokio::test]
    async fn bad_task_filter_is_rejected() {
        let app = build_app(AppState::fake());
        let uri = format!("/events/{}/tasks?completed=sometimes", uuid::Uuid::new_v4());
        let (status, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }
}

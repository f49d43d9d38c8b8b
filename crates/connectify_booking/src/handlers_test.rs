#[cfg(test)]
mod tests {
    use crate::directory::{MockProfessionalDirectory, StaticProfessionalDirectory};
    use crate::error::BookingError;
    use crate::handlers::BookingState;
    use crate::logic::BookingService;
    use crate::routes::routes;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use connectify_config::AppConfig;
    use connectify_db::MemoryBookingRepository;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app_with(config: AppConfig) -> Router {
        let service = BookingService::new(
            MemoryBookingRepository::new(),
            Arc::new(StaticProfessionalDirectory::new(["pro-1"])),
        );
        routes(Arc::new(BookingState::new(Arc::new(config), service)))
    }

    fn app() -> Router {
        app_with(AppConfig::default())
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    fn booking_body(start: &str, end: &str) -> Value {
        json!({
            "professional_id": "pro-1",
            "client_id": "client-1",
            "start_time": start,
            "end_time": end,
        })
    }

    async fn create(app: &Router, start: &str, end: &str) -> (StatusCode, Value) {
        send(app, Method::POST, "/bookings", Some(booking_body(start, end))).await
    }

    #[tokio::test]
    async fn test_create_booking_handler() {
        let app = app();
        let (status, body) = create(&app, "2099-03-02T10:00:00Z", "2099-03-02T11:00:00Z").await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "pending");
        assert_eq!(body["professional_id"], "pro-1");
        assert!(body["id"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_overlapping_create_is_conflict() {
        let app = app();
        create(&app, "2099-03-02T10:00:00Z", "2099-03-02T11:00:00Z").await;

        let (status, body) = create(&app, "2099-03-02T10:30:00Z", "2099-03-02T11:30:00Z").await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], 409);
    }

    #[tokio::test]
    async fn test_invalid_create_requests() {
        let app = app();

        let (status, _) = create(&app, "2099-03-02T11:00:00Z", "2099-03-02T10:00:00Z").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = create(&app, "2001-03-02T10:00:00Z", "2001-03-02T11:00:00Z").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 400);

        let mut unknown = booking_body("2099-03-02T10:00:00Z", "2099-03-02T11:00:00Z");
        unknown["professional_id"] = json!("pro-404");
        let (status, _) = send(&app, Method::POST, "/bookings", Some(unknown)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_booking_handler() {
        let app = app();
        let (_, created) = create(&app, "2099-03-02T10:00:00Z", "2099-03-02T11:00:00Z").await;
        let id = created["id"].as_str().unwrap();

        let (status, body) = send(&app, Method::GET, &format!("/bookings/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, created);

        let (status, _) = send(
            &app,
            Method::GET,
            "/bookings/6f2b8a52-0c4e-4e7e-9a39-0d7b0c1f4e11",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::GET, "/bookings/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_booking_status_handler() {
        let app = app();
        let (_, created) = create(&app, "2099-03-02T10:00:00Z", "2099-03-02T11:00:00Z").await;
        let uri = format!("/bookings/{}/status", created["id"].as_str().unwrap());

        let (status, body) =
            send(&app, Method::PUT, &uri, Some(json!({ "status": "confirmed" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "confirmed");

        let (status, _) = send(&app, Method::PUT, &uri, Some(json!({ "status": "pending" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, Method::PUT, &uri, Some(json!({ "status": "archived" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_cancel_booking_handler() {
        let app = app();
        let (_, created) = create(&app, "2099-03-02T10:00:00Z", "2099-03-02T11:00:00Z").await;
        let uri = format!("/bookings/{}/cancel", created["id"].as_str().unwrap());

        let (status, body) = send(&app, Method::POST, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "cancelled");

        let (status, _) = send(&app, Method::POST, &uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // The slot is free again
        let (status, _) = create(&app, "2099-03-02T10:00:00Z", "2099-03-02T11:00:00Z").await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_list_handlers() {
        let app = app();
        let (_, first) = create(&app, "2099-03-02T09:00:00Z", "2099-03-02T10:00:00Z").await;
        let (_, second) = create(&app, "2099-03-02T13:00:00Z", "2099-03-02T14:00:00Z").await;

        let (status, body) = send(
            &app,
            Method::GET,
            "/professional/bookings?professional_id=pro-1",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let list = body.as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["id"], first["id"]);

        let (status, body) =
            send(&app, Method::GET, "/client/bookings?client_id=client-1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap()[0]["id"], second["id"]);

        let (status, body) = send(
            &app,
            Method::GET,
            "/professional/bookings?professional_id=pro-1&from=2099-03-02T12:00:00Z&status=pending",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let list = body.as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["id"], second["id"]);

        let (status, body) = send(
            &app,
            Method::GET,
            "/professional/bookings?professional_id=pro-1&status=completed",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().is_empty());

        let (status, _) = send(
            &app,
            Method::GET,
            "/professional/bookings?professional_id=pro-1&status=lost",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_check_availability_handler() {
        let app = app();
        let uri = "/bookings/availability?professional_id=pro-1&start_time=2099-03-02T10:00:00Z&end_time=2099-03-02T11:00:00Z";

        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["available"], true);

        create(&app, "2099-03-02T10:30:00Z", "2099-03-02T11:30:00Z").await;
        let (_, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(body["available"], false);
    }

    #[tokio::test]
    async fn test_disabled_booking_service() {
        let config = AppConfig {
            use_booking: false,
            ..AppConfig::default()
        };
        let app = app_with(config);

        let (status, body) = create(&app, "2099-03-02T10:00:00Z", "2099-03-02T11:00:00Z").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], 503);
    }

    #[tokio::test]
    async fn test_service_id_round_trip() {
        let app = app();
        let mut body = booking_body("2099-03-02T10:00:00Z", "2099-03-02T11:00:00Z");
        body["service_id"] = json!("consultation-60");

        let (status, created) = send(&app, Method::POST, "/bookings", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["service_id"], "consultation-60");

        let id = created["id"].as_str().unwrap();
        let (_, fetched) = send(&app, Method::GET, &format!("/bookings/{}", id), None).await;
        assert_eq!(fetched["service_id"], "consultation-60");

        // Omitted service is reported as null
        let (_, plain) = create(&app, "2099-03-02T12:00:00Z", "2099-03-02T13:00:00Z").await;
        assert_eq!(plain["service_id"], Value::Null);
    }

    #[tokio::test]
    async fn test_directory_failure_hides_details() {
        let mut directory = MockProfessionalDirectory::new();
        directory.expect_professional_exists().returning(|_| {
            Err(BookingError::Directory(
                "error returned from database: no such table: professionals".to_string(),
            ))
        });
        let service = BookingService::new(MemoryBookingRepository::new(), Arc::new(directory));
        let app = routes(Arc::new(BookingState::new(
            Arc::new(AppConfig::default()),
            service,
        )));

        let (status, body) = create(&app, "2099-03-02T10:00:00Z", "2099-03-02T11:00:00Z").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], 502);
        assert_eq!(body["error"]["message"], "Bad Gateway");
        assert!(!body.to_string().contains("no such table"));
    }
}

//! Gateway interceptor behavior: classification, teardown, CSRF handling.


use std::sync::Arc;

use coursehub_client::models::course::Course;
use coursehub_client::services::auth::LoginRequest;
use coursehub_client::{ApiError, ApiGateway, Config, SessionStore};
use fixtures::{RecordingNavigator, gateway, user_json};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn session_expiry_resets_store_and_redirects_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": user_json(1, "alice", "student"),
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/courses/1/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "detail": "Session expired" })),
        )
        .mount(&server)
        .await;

    let navigator = RecordingNavigator::at("/login");
    let gw = gateway(&server, Arc::clone(&navigator));
    let session = SessionStore::new(Arc::clone(&gw));

    session
        .login(LoginRequest {
            username: "alice".to_string(),
            password: "pw".to_string(),
        })
        .await
        .unwrap();
    navigator.set_current("/courses");

    let err = gw.get::<Course>("/courses/1/").await.unwrap_err();
    assert!(err.is_session_expired());
    assert_eq!(err.detail(), Some("Session expired"));

    // The gateway emitted the signal; the store reset itself.
    let state = session.snapshot();
    assert_eq!(state.user, None);
    assert!(!state.is_authenticated);

    assert_eq!(navigator.redirects(), vec!["/login".to_string()]);

    // A second 401 while already on the login page must not re-redirect.
    let err = gw.get::<Course>("/courses/1/").await.unwrap_err();
    assert!(err.is_session_expired());
    assert_eq!(navigator.redirects().len(), 1);
}

#[tokio::test]
async fn forbidden_and_not_found_surface_without_teardown() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/courses/1/"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({ "detail": "Students cannot edit courses" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/courses/2/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "Not found." })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/courses/3/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    fixtures::mount_current_user(&server, user_json(1, "alice", "student")).await;

    let navigator = RecordingNavigator::at("/courses");
    let gw = gateway(&server, Arc::clone(&navigator));
    let session = SessionStore::new(Arc::clone(&gw));
    session.fetch_current_user().await.unwrap();

    assert!(matches!(
        gw.get::<Course>("/courses/1/").await.unwrap_err(),
        ApiError::Forbidden { .. }
    ));
    assert!(matches!(
        gw.get::<Course>("/courses/2/").await.unwrap_err(),
        ApiError::NotFound { .. }
    ));
    assert!(matches!(
        gw.get::<Course>("/courses/3/").await.unwrap_err(),
        ApiError::Server { status: 500, .. }
    ));

    // None of these mutate session state or request a redirect.
    assert!(session.snapshot().is_authenticated);
    assert!(navigator.redirects().is_empty());
}

#[tokio::test]
async fn transport_failure_classifies_as_connectivity() {
    // Nothing listens here; the request never produces a response.
    let config = Config::with_base_url("http://127.0.0.1:9");
    let navigator = RecordingNavigator::at("/courses");
    let gw = ApiGateway::new(&config, navigator.clone()).unwrap();

    let err = gw.get::<Course>("/courses/1/").await.unwrap_err();
    assert!(matches!(err, ApiError::Connectivity(_)));
    assert!(navigator.redirects().is_empty());
}

#[tokio::test]
async fn captured_csrf_cookie_rides_on_subsequent_mutations() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "csrftoken=tok-123; Path=/")
                .set_body_json(json!({ "user": user_json(1, "alice", "student") })),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/enrollments/"))
        .and(header("X-CSRFToken", "tok-123"))
        .respond_with(ResponseTemplate::new(201).set_body_json(fixtures::enrollment_json(
            12,
            fixtures::course_json(2, "Baking", 2, 6),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let navigator = RecordingNavigator::at("/login");
    let gw = gateway(&server, navigator);
    let session = SessionStore::new(Arc::clone(&gw));

    session
        .login(LoginRequest {
            username: "alice".to_string(),
            password: "pw".to_string(),
        })
        .await
        .unwrap();

    // The enroll mutation must carry the captured token.
    gw.post::<coursehub_client::models::enrollment::Enrollment, _>(
        "/enrollments/",
        &json!({ "course_id": 2 }),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn absent_csrf_token_is_a_legal_state() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let navigator = RecordingNavigator::at("/register");
    let gw = gateway(&server, navigator);

    // First request of a fresh runtime: no token held, request still goes out.
    gw.post_ignored("/auth/register/", &json!({ "username": "bob" }))
        .await
        .unwrap();
}

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::Duration;
use std::sync::Arc;
use session_gate::application::auth_service::AuthService;
use session_gate::data::user_repository::InMemoryUserRepository;
use session_gate::domain::user::Credentials;
use session_gate::infrastructure::security::generate_token;
use session_gate::presentation::handlers::AppState;
use session_gate::presentation::middleware::{
    JwtAuthMiddleware, RequestIdMiddleware, TimingMiddleware,
};
use session_gate::presentation::routes::configure;

const JWT_SECRET: &str = "test-secret-key-for-testing-only";

macro_rules! setup_test {
    () => {
        setup_test!(false)
    };
    ($debug:expr) => {{
        let user_repository = InMemoryUserRepository::new();
        let auth_service = Arc::new(AuthService::new(
            Arc::new(user_repository),
            JWT_SECRET.to_string(),
            Duration::hours(24),
        ));

        // Register a test user up front
        let session = auth_service
            .register_user(Credentials::new("test@example.com", "Test1234"))
            .await
            .unwrap();

        let state = web::Data::new(AppState {
            auth_service: auth_service.clone(),
            debug: $debug,
        });

        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .wrap(JwtAuthMiddleware::new(auth_service))
                .wrap(TimingMiddleware)
                .wrap(RequestIdMiddleware)
                .configure(configure),
        )
        .await;

        (app, session)
    }};
}

#[actix_web::test]
async fn test_private_with_valid_token() {
    let (app, session) = setup_test!();

    let req = test::TestRequest::get()
        .uri("/api/private")
        .insert_header(("Authorization", format!("Bearer {}", session.token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["msg"], "Welcome test@example.com!");
    assert_eq!(body["user"]["email"], "test@example.com");
    assert_eq!(body["user"]["id"], session.user.id);
}

#[actix_web::test]
async fn test_private_without_header_is_missing_token() {
    let (app, _) = setup_test!();

    let req = test::TestRequest::get().uri("/api/private").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["msg"], "Token is missing");
}

#[actix_web::test]
async fn test_private_with_non_bearer_scheme_is_missing_token() {
    let (app, session) = setup_test!();

    let req = test::TestRequest::get()
        .uri("/api/private")
        .insert_header(("Authorization", session.token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["msg"], "Token is missing");
}

#[actix_web::test]
async fn test_private_with_garbage_token_is_invalid() {
    let (app, _) = setup_test!();

    let req = test::TestRequest::get()
        .uri("/api/private")
        .insert_header(("Authorization", "Bearer not.a.jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["msg"], "Token is invalid");
}

#[actix_web::test]
async fn test_private_with_foreign_secret_is_invalid() {
    let (app, session) = setup_test!();
    let forged = generate_token(&session.user.id, "someone-elses-secret", Duration::hours(1)).unwrap();

    let req = test::TestRequest::get()
        .uri("/api/private")
        .insert_header(("Authorization", format!("Bearer {}", forged)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["msg"], "Token is invalid");
}

#[actix_web::test]
async fn test_private_with_expired_token() {
    let (app, session) = setup_test!();
    let expired = generate_token(&session.user.id, JWT_SECRET, Duration::hours(-3)).unwrap();

    let req = test::TestRequest::get()
        .uri("/api/private")
        .insert_header(("Authorization", format!("Bearer {}", expired)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["msg"], "Token has expired");
}

#[actix_web::test]
async fn test_token_for_unknown_user_is_invalid() {
    let (app, _) = setup_test!();
    let orphan = generate_token("deleted-user", JWT_SECRET, Duration::hours(1)).unwrap();

    let req = test::TestRequest::get()
        .uri("/api/me")
        .insert_header(("Authorization", format!("Bearer {}", orphan)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["msg"], "Token is invalid");
}

#[actix_web::test]
async fn test_me_returns_current_user() {
    let (app, session) = setup_test!();

    let req = test::TestRequest::get()
        .uri("/api/me")
        .insert_header(("Authorization", format!("Bearer {}", session.token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["email"], "test@example.com");
    assert!(body.get("msg").is_none());
}

#[actix_web::test]
async fn test_logout_requires_token() {
    let (app, session) = setup_test!();

    let req = test::TestRequest::post().uri("/api/logout").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/logout")
        .insert_header(("Authorization", format!("Bearer {}", session.token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(
        body["msg"],
        "Logout successful (please remove token on client side)"
    );
}

#[actix_web::test]
async fn test_status_is_public() {
    let (app, _) = setup_test!();

    let req = test::TestRequest::get().uri("/api/status").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    assert!(resp.headers().contains_key("x-response-time"));

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], "API is running");
    assert!(chrono::DateTime::parse_from_rfc3339(body["time"].as_str().unwrap()).is_ok());
}

#[actix_web::test]
async fn test_sitemap_hidden_outside_debug() {
    let (app, _) = setup_test!();

    let req = test::TestRequest::get().uri("/sitemap").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Not available in production");
}

#[actix_web::test]
async fn test_sitemap_lists_routes_in_debug() {
    let (app, _) = setup_test!(true);

    let req = test::TestRequest::get().uri("/sitemap").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let routes: Vec<&str> = body["routes"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|r| r.as_str())
        .collect();
    assert!(routes.contains(&"GET /api/private"));
    assert!(routes.contains(&"POST /api/signup"));
}

#[actix_web::test]
async fn test_unknown_api_route_uses_error_envelope() {
    let (app, _) = setup_test!();

    let req = test::TestRequest::get().uri("/api/nothing-here").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["msg"], "Resource not found");
}

//! Route-level tests
//!
//! Drive the assembled router directly as a tower service: auth gating,
//! login flow, server-managed order fields and error mapping.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::Service;

use cms_server::auth::JwtConfig;
use cms_server::core::{Config, ServerState, create_router};
use cms_server::db::DbService;

const ADMIN_EMAIL: &str = "admin@example.org";
const ADMIN_PASSWORD: &str = "correct-horse-battery-staple";

fn test_config() -> Config {
    Config {
        work_dir: ".".to_string(),
        http_port: 0,
        jwt: JwtConfig {
            secret: "test-secret-key-with-enough-length!!".to_string(),
            expiration_minutes: 60,
            issuer: "cms-server".to_string(),
            audience: "cms-dashboard".to_string(),
        },
        environment: "test".to_string(),
        admin_email: Some(ADMIN_EMAIL.to_string()),
        admin_password: Some(ADMIN_PASSWORD.to_string()),
    }
}

async fn test_router() -> Router {
    let db = DbService::memory().await.unwrap();
    let state = ServerState::with_db(test_config(), db.db).await.unwrap();
    create_router(state)
}

async fn send(router: &mut Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = router.call(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

fn json_request(method: &str, path: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn login(router: &mut Router) -> String {
    let (status, body) = send(
        router,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

fn event_body() -> Value {
    json!({
        "title": { "text": "Launch night", "color": "#606161" },
        "description": { "text": "Doors open at eight", "color": "#606161" },
        "date": { "text": "June 1, 2026", "color": "#FBB859" },
        "cover_image": { "url": "https://img.example.org/launch.jpg", "alt": "" }
    })
}

#[tokio::test]
async fn health_is_public() {
    let mut router = test_router().await;
    let (status, body) = send(&mut router, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Server is running!");
}

#[tokio::test]
async fn public_list_is_open_admin_list_is_gated() {
    let mut router = test_router().await;

    let (status, body) = send(&mut router, get("/api/events")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, _) = send(&mut router, get("/api/events/admin")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn mutations_require_a_token() {
    let mut router = test_router().await;
    let (status, _) = send(
        &mut router,
        json_request("POST", "/api/events", None, event_body()),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &mut router,
        json_request("POST", "/api/events", Some("not-a-real-token"), event_body()),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let mut router = test_router().await;
    let (status, _) = send(
        &mut router,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "email": ADMIN_EMAIL, "password": "wrong" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_token_identifies_the_admin() {
    let mut router = test_router().await;
    let token = login(&mut router).await;

    let mut req = get("/api/auth/me");
    req.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Bearer {token}").parse().unwrap(),
    );
    let (status, body) = send(&mut router, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], ADMIN_EMAIL);
}

#[tokio::test]
async fn client_supplied_order_fields_are_stripped() {
    let mut router = test_router().await;
    let token = login(&mut router).await;

    // smuggle ordering state into the create payload
    let mut body = event_body();
    body["sort_order"] = json!(99);
    body["order"] = json!(42);

    let (status, created) = send(
        &mut router,
        json_request("POST", "/api/events", Some(&token), body),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["sort_order"], 0);

    let (_, second) = send(
        &mut router,
        json_request("POST", "/api/events", Some(&token), event_body()),
    )
    .await;
    assert_eq!(second["sort_order"], 1);
}

#[tokio::test]
async fn reorder_endpoint_moves_and_lists() {
    let mut router = test_router().await;
    let token = login(&mut router).await;

    let (_, first) = send(
        &mut router,
        json_request("POST", "/api/events", Some(&token), event_body()),
    )
    .await;
    send(
        &mut router,
        json_request("POST", "/api/events", Some(&token), event_body()),
    )
    .await;

    let id = first["id"].as_str().unwrap().to_string();
    let (status, listed) = send(
        &mut router,
        json_request(
            "PATCH",
            &format!("/api/events/{id}/order"),
            Some(&token),
            json!({ "order": 1 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let orders: Vec<i64> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["sort_order"].as_i64().unwrap())
        .collect();
    assert_eq!(orders, vec![0, 1]);
    assert_eq!(listed[1]["id"].as_str().unwrap(), id);

    // one past the end is a client error
    let (status, _) = send(
        &mut router,
        json_request(
            "PATCH",
            &format!("/api/events/{id}/order"),
            Some(&token),
            json!({ "order": 2 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_record_maps_to_404() {
    let mut router = test_router().await;
    let (status, _) = send(&mut router, get("/api/events/missing")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_payload_maps_to_400() {
    let mut router = test_router().await;
    let token = login(&mut router).await;

    let mut body = event_body();
    body["title"]["color"] = json!("not-a-color");
    let (status, _) = send(
        &mut router,
        json_request("POST", "/api/events", Some(&token), body),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

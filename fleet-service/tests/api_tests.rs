mod common;

use chrono::Utc;
use common::TestApp;
use common::PASSWORD;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;

    let response = app.get("/health").send().await.expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_register_defaults_to_driver_role() {
    let app = TestApp::spawn().await;

    let body = app.register("New.Driver@Fleet.io", None).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user"]["email"], "new.driver@fleet.io");
    assert_eq!(body["data"]["user"]["role"], "driver");
    assert!(body["data"]["user"]["id"].is_string());
    assert!(body["data"]["user"].get("password").is_none());
    assert!(body["data"]["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_then_login_round_trip() {
    let app = TestApp::spawn().await;
    app.register("dispatch@fleet.io", Some("admin")).await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({ "email": "DISPATCH@fleet.io", "password": PASSWORD }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["user"]["role"], "admin");

    let token = body["data"]["token"].as_str().unwrap();
    let claims: auth::Claims = app.jwt_handler.decode(token).expect("Token should decode");
    assert_eq!(claims.email, "dispatch@fleet.io");
    assert_eq!(claims.role.as_deref(), Some("admin"));
    assert_eq!(claims.sub, body["data"]["user"]["id"].as_str().unwrap());
}

#[tokio::test]
async fn test_register_validation_failures() {
    let app = TestApp::spawn().await;

    let cases = [
        (json!({ "email": "", "password": PASSWORD }), "Email and password are required"),
        (json!({ "email": "a@fleet.io", "password": "" }), "Email and password are required"),
        (json!({ "password": PASSWORD }), "Email and password are required"),
        (
            json!({ "email": "not-an-email", "password": PASSWORD }),
            "Please provide a valid email address",
        ),
        (
            json!({ "email": "a@fleet.io", "password": "12345" }),
            "Password must be at least 6 characters long",
        ),
        (
            json!({ "email": "a@fleet.io", "password": PASSWORD, "role": "superuser" }),
            "Role must be either 'admin' or 'driver'",
        ),
    ];

    for (payload, message) in cases {
        let response = app
            .post("/api/auth/register")
            .json(&payload)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "payload: {}", payload);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], message);
    }
}

#[tokio::test]
async fn test_register_duplicate_email_conflict() {
    let app = TestApp::spawn().await;
    app.register("driver@fleet.io", None).await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({ "email": "driver@fleet.io", "password": "another-password", "role": "admin" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "User with this email already exists");

    // Original credentials and role are untouched
    let token = app.login("driver@fleet.io").await;
    let claims: auth::Claims = app.jwt_handler.decode(&token).unwrap();
    assert_eq!(claims.role.as_deref(), Some("driver"));
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("driver@fleet.io", None).await;

    let unknown = app
        .post("/api/auth/login")
        .json(&json!({ "email": "ghost@fleet.io", "password": PASSWORD }))
        .send()
        .await
        .expect("Failed to execute request");
    let wrong_password = app
        .post("/api/auth/login")
        .json(&json!({ "email": "driver@fleet.io", "password": "wrong-password" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);

    let unknown: Value = unknown.json().await.unwrap();
    let wrong_password: Value = wrong_password.json().await.unwrap();
    assert_eq!(unknown, wrong_password);
    assert_eq!(unknown["error"], "Invalid email or password");
}

#[tokio::test]
async fn test_login_requires_both_fields() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({ "email": "driver@fleet.io" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/login")
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_me_returns_identity_for_every_role() {
    let app = TestApp::spawn().await;

    for (email, role) in [("admin@fleet.io", "admin"), ("driver@fleet.io", "driver")] {
        let registered = app.register(email, Some(role)).await;
        let token = app.login(email).await;

        let response = app
            .get_authenticated("/api/auth/me", &token)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["data"]["id"], registered["data"]["user"]["id"]);
        assert_eq!(body["data"]["role"], role);
    }
}

#[tokio::test]
async fn test_missing_or_malformed_token() {
    let app = TestApp::spawn().await;

    let missing = app
        .get("/api/auth/me")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    let body: Value = missing.json().await.unwrap();
    assert_eq!(body["error"], "No token provided");

    let wrong_scheme = app
        .get("/api/auth/me")
        .header("authorization", "Token abc")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(wrong_scheme.status(), StatusCode::UNAUTHORIZED);
    let body: Value = wrong_scheme.json().await.unwrap();
    assert_eq!(body["error"], "No token provided");
}

#[tokio::test]
async fn test_expired_and_tampered_tokens_rejected_uniformly() {
    let app = TestApp::spawn().await;
    let registered = app.register("driver@fleet.io", None).await;
    let account_id = registered["data"]["user"]["id"].as_str().unwrap().to_string();

    let now = Utc::now().timestamp();
    let expired_claims =
        auth::Claims::for_account(&account_id, "driver@fleet.io", Some("driver".into()), 1)
            .with_window(now - 7200, now - 3600);
    let expired = app.jwt_handler.encode(&expired_claims).unwrap();

    let valid = app.login("driver@fleet.io").await;
    let (unsigned, signature) = valid.rsplit_once('.').unwrap();
    let flipped = if signature.starts_with('A') { 'B' } else { 'A' };
    let tampered = format!("{}.{}{}", unsigned, flipped, &signature[1..]);

    for token in [expired.as_str(), tampered.as_str(), "garbage"] {
        let response = app
            .get_authenticated("/api/auth/me", token)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Invalid or expired token");
    }
}

//! Session lifecycle and route guards, end to end.

#![allow(clippy::unwrap_used)]

use bizsphere_integration_tests::{TestContext, location, user_json};
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_anonymous_dashboard_redirects_to_login() {
    let ctx = TestContext::start().await;

    let response = ctx.get("/dashboard").await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_root_redirects_to_dashboard() {
    let ctx = TestContext::start().await;

    let response = ctx.get("/").await;
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn test_login_page_renders_with_security_headers() {
    let ctx = TestContext::start().await;

    let response = ctx.get("/login").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-frame-options"], "DENY");
    assert!(response.headers().contains_key("x-request-id"));
    let html = response.text().await.unwrap();
    assert!(html.contains(r#"action="/login""#));
}

#[tokio::test]
async fn test_customer_login_reaches_general_dashboard() {
    let ctx = TestContext::start().await;
    ctx.login_as(user_json("c1", "customer")).await;

    let response = ctx.get("/dashboard").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.unwrap();
    assert!(html.contains("Welcome to BizSphere"));
    assert!(html.contains("Coming Soon"));
}

#[tokio::test]
async fn test_logged_in_user_is_sent_away_from_login() {
    let ctx = TestContext::start().await;
    ctx.login_as(user_json("r1", "rider")).await;

    let response = ctx.get("/login").await;
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn test_rejected_credentials_rerender_login_with_message() {
    let ctx = TestContext::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&ctx.api)
        .await;

    let response = ctx
        .post_form("/login", &[("email", "who@bizsphere.test"), ("password", "nope")])
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.unwrap();
    assert!(html.contains("Invalid credentials"));
    assert!(html.contains("who@bizsphere.test"));

    // Nothing was stored, so the guard still applies
    assert_eq!(location(&ctx.get("/dashboard").await), "/login");
}

#[tokio::test]
async fn test_logout_forgets_session() {
    let ctx = TestContext::start().await;
    ctx.login_as(user_json("c2", "customer")).await;

    let response = ctx.post_form("/logout", &[]).await;
    assert!(location(&response).starts_with("/login?success="));

    assert_eq!(location(&ctx.get("/dashboard").await), "/login");
}

#[tokio::test]
async fn test_revoked_token_signs_user_out() {
    let ctx = TestContext::start().await;
    ctx.login_as(user_json("c3", "customer")).await;

    ctx.api.reset().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "jwt expired" })))
        .mount(&ctx.api)
        .await;

    assert_eq!(location(&ctx.get("/dashboard").await), "/login");
}

#[tokio::test]
async fn test_register_customer_lands_on_dashboard() {
    let ctx = TestContext::start().await;
    let user = user_json("c4", "customer");
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "token": "token-c4", "user": user })),
        )
        .expect(1)
        .mount(&ctx.api)
        .await;

    let response = ctx
        .post_form(
            "/register",
            &[
                ("name", "Kiran"),
                ("email", "c4@bizsphere.test"),
                ("password", "secret123"),
                ("role", "customer"),
            ],
        )
        .await;
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn test_register_owner_without_business_name_makes_no_call() {
    let ctx = TestContext::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&ctx.api)
        .await;

    let response = ctx
        .post_form(
            "/register",
            &[
                ("name", "Asha"),
                ("email", "asha@bizsphere.test"),
                ("password", "secret123"),
                ("role", "owner"),
            ],
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.unwrap();
    assert!(html.contains("Business name is required for business owners"));
}

#[tokio::test]
async fn test_health_endpoints() {
    let ctx = TestContext::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "backend": "ok", "database": "connected", "timestamp": "2026-10-16T09:00:00Z"
        })))
        .mount(&ctx.api)
        .await;

    let response = ctx.get("/health").await;
    assert_eq!(response.text().await.unwrap(), "ok");

    assert_eq!(ctx.get("/health/ready").await.status(), StatusCode::OK);

    let html = ctx.get("/connection-test").await.text().await.unwrap();
    assert!(html.contains("Connected to backend!"));
    assert!(html.contains("connected"));
}

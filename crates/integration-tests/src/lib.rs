//! End-to-end tests for the BizSphere front-end.
//!
//! Each test starts the full router on an ephemeral port and points it at a
//! `wiremock` server standing in for the BizSphere REST API. The browser is a
//! `reqwest` client with a cookie store and redirects disabled, so tests can
//! assert on `Location` headers.
//!
//! ```bash
//! cargo test -p bizsphere-integration-tests
//! ```

use std::net::SocketAddr;

use bizsphere_web::app::build_app;
use bizsphere_web::config::{ApiConfig, WebConfig};
use bizsphere_web::state::AppState;
use reqwest::{Client, Response, redirect};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A running front-end plus the mocked API behind it.
pub struct TestContext {
    pub api: MockServer,
    pub client: Client,
    base_url: String,
}

impl TestContext {
    /// Start a mock API and the front-end wired to it.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn start() -> Self {
        let api = MockServer::start().await;
        let api_url = format!("{}/api", api.uri());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr: SocketAddr = listener.local_addr().expect("Failed to read local address");

        let config = WebConfig {
            host: addr.ip(),
            port: addr.port(),
            base_url: format!("http://{addr}"),
            api: ApiConfig::for_base_url(&api_url).expect("Invalid mock API URL"),
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 0.0,
            sentry_traces_sample_rate: 0.0,
        };
        let state = AppState::new(config).expect("Failed to build app state");
        let app = build_app(state);
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        let client = Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api,
            client,
            base_url: format!("http://{addr}"),
        }
    }

    /// Absolute URL of a front-end path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET a front-end page.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET failed")
    }

    /// POST a form to a front-end path.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST failed")
    }

    /// Mount the login and session endpoints for `user`, then log in.
    ///
    /// # Panics
    ///
    /// Panics if the login does not redirect to the dashboard.
    pub async fn login_as(&self, user: Value) {
        let token = format!("token-{}", user["_id"].as_str().unwrap_or("user"));

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "token": token, "user": user })),
            )
            .mount(&self.api)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .and(header("authorization", format!("Bearer {token}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": user })))
            .mount(&self.api)
            .await;

        let email = user["email"].as_str().unwrap_or("user@example.com");
        let response = self
            .post_form("/login", &[("email", email), ("password", "secret123")])
            .await;
        assert!(response.status().is_redirection(), "login did not redirect");
        assert_eq!(location(&response), "/dashboard");
    }
}

/// The `Location` header of a redirect, or an empty string.
#[must_use]
pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// A user as the API returns it.
#[must_use]
pub fn user_json(id: &str, role: &str) -> Value {
    json!({
        "_id": id,
        "name": format!("{role} {id}"),
        "email": format!("{id}@bizsphere.test"),
        "role": role,
    })
}

/// A business owner with the given verification status.
#[must_use]
pub fn owner_json(id: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "name": "Asha",
        "email": format!("{id}@bizsphere.test"),
        "role": "owner",
        "businessName": "Chai Co",
        "verificationStatus": status,
        "businessVerified": status == "approved",
    })
}
